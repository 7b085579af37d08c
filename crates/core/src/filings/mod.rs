//! Filings module - classification, key-number extraction and the filing ledger.

pub mod classifier;
pub mod extraction;
mod filing_service;
mod filings_model;
mod filings_traits;


pub use classifier::classify;
pub use extraction::extract_key_numbers;
pub use filing_service::FilingService;
pub use filings_model::{
    is_tracked_exchange, market_for_exchange_class, CapitalFigures, Classification,
    ContractFigures, Filing, FilingCategory, IngestOutcome, KeyNumbers, MergeStep,
    PerformanceFigures, ShareholderReturnFigures,
};
pub use filings_traits::{FilingRepositoryTrait, FilingServiceTrait};
