//! Canonical inbound records.

mod filing;
mod price;

pub use filing::FilingRecord;
pub use price::PriceRecord;
