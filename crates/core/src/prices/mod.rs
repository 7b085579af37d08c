//! Prices module - the daily price ledger.

mod prices_model;
mod prices_service;
mod prices_traits;

pub use prices_model::{price_id, PriceDaily, PriceIngestSummary};
pub use prices_service::PriceService;
pub use prices_traits::{PriceRepositoryTrait, PriceServiceTrait};
