//! Valuation module - ratios, peer percentiles, scores and daily snapshots.

mod metrics_calculator;
pub mod peer_groups;
mod percentile_ranker;
mod score_composer;
mod valuation_model;
mod valuation_service;
mod valuation_traits;


pub use metrics_calculator::compute_metrics;
pub use peer_groups::{find_peer_group, resolve_auto_peer, PeerGroup, PEER_GROUPS};
pub use percentile_ranker::{rank_peer_group, rank_percentiles};
pub use score_composer::{compose_score, score_snapshots};
pub use valuation_model::{
    snapshot_id, BandLabel, MetricPercentiles, PeerMapping, RankedMetric, ValuationMetrics,
    ValuationSnapshot,
};
pub use valuation_service::ValuationService;
pub use valuation_traits::{
    PeerMapRepositoryTrait, ValuationRepositoryTrait, ValuationServiceTrait,
};
