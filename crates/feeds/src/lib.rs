//! Filingscope Feeds Crate
//!
//! Inbound data for the filing and valuation pipeline. Every upstream shape
//! (filing-list JSON, exchange price JSON, exchange CSV download, local files)
//! is normalized here into one of two canonical records before it reaches
//! `filingscope-core`.
//!
//! ```text
//! filing list JSON ──► dart::parse_list_response ──► FilingRecord ─┐
//!                                                                  ├──► core batches
//! KRX JSON / CSV ───► krx_api / krx_csv ───────────► PriceRecord ──┘
//! ```
//!
//! # Core Types
//!
//! - [`FilingRecord`] - one filing as delivered by the filing feed
//! - [`PriceRecord`] - one daily price row as delivered by a price feed
//! - [`FilingSource`] / [`PriceSource`] - pluggable async sources

pub mod errors;
pub mod models;
pub mod normalize;
pub mod provider;

pub use errors::FeedError;
pub use models::{FilingRecord, PriceRecord};
pub use provider::{
    FileFilingSource, FilePriceSource, FilingSource, MockPriceSource, PriceSource,
};
