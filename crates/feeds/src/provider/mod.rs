//! Feed sources and the source-shape parsers behind them.

pub mod dart;
mod file;
pub mod krx_api;
pub mod krx_csv;
mod mock;
mod traits;

pub use file::{FileFilingSource, FilePriceSource};
pub use mock::MockPriceSource;
pub use traits::{FilingSource, PriceSource};
