//! SQLite storage implementation for quarterly and TTM financials.

mod model;
mod repository;

pub use model::{QuarterlyFinancialDB, TtmFinancialDB};
pub use repository::FinancialRepository;
