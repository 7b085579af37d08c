//! SQLite storage implementation for daily prices.

mod model;
mod repository;

pub use model::PriceDailyDB;
pub use repository::PriceRepository;
