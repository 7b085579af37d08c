//! SQLite storage implementation for companies.

mod model;
mod repository;

pub use model::{CompanyDB, NewCompanyDB};
pub use repository::CompanyRepository;
