//! Filingscope Core - Domain entities, services, and traits.
//!
//! Filing classification, quarterly financial merging, TTM aggregation and
//! peer-relative valuation scoring. The crate is database-agnostic: storage
//! traits defined here are implemented by `filingscope-storage-sqlite`.

pub mod batch;
pub mod companies;
pub mod constants;
pub mod errors;
pub mod filings;
pub mod financials;
pub mod prices;
pub mod utils;
pub mod valuation;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
