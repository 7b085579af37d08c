//! SQLite storage implementation for the batch run log.

mod model;
mod repository;

pub use model::BatchRunDB;
pub use repository::BatchRunRepository;
