//! SQLite storage implementation for valuation snapshots and peer mappings.

mod model;
mod peer_map_repository;
mod repository;

pub use model::{PeerMappingDB, ValuationSnapshotDB};
pub use peer_map_repository::PeerMapRepository;
pub use repository::ValuationRepository;
