//! SQLite storage implementation for the filing ledger.

mod model;
mod repository;

pub use model::FilingDB;
pub use repository::FilingRepository;
