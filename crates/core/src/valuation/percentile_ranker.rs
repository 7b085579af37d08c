//! Peer-relative percentile ranking.
//!
//! Each metric is ranked independently within one peer group:
//! `percentile = rank / count * 100` over the companies that have a value,
//! with rank taken from an ascending stable sort. Price multiples are
//! inverted (`100 - percentile`) so a higher percentile always reads better.
//!
//! Equal values are not averaged. Two companies with the same metric get
//! adjacent ranks in their input order, so their percentiles can differ by
//! one step. This is a known approximation: the score and band built on top
//! of it tolerate that jitter.

use rust_decimal::Decimal;

use super::valuation_model::{RankedMetric, ValuationSnapshot};
use crate::constants::PERCENTILE_DECIMAL_PRECISION;
use crate::utils::decimal::round_half_up;

/// Percentiles for one metric column, positionally aligned with `values`.
/// Entries without a value stay `None`.
pub fn rank_percentiles(values: &[Option<Decimal>], inverted: bool) -> Vec<Option<Decimal>> {
    let mut out = vec![None; values.len()];

    let mut present: Vec<(usize, Decimal)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    if present.is_empty() {
        return out;
    }
    present.sort_by(|a, b| a.1.cmp(&b.1));

    let count = Decimal::from(present.len());
    for (position, (index, _)) in present.iter().enumerate() {
        let mut pct = Decimal::from(position + 1) * Decimal::ONE_HUNDRED / count;
        if inverted {
            pct = Decimal::ONE_HUNDRED - pct;
        }
        out[*index] = Some(round_half_up(pct, PERCENTILE_DECIMAL_PRECISION));
    }
    out
}

/// Fills the percentiles of every draft in a single peer group.
///
/// Call only once all drafts of the group are built.
pub fn rank_peer_group(group: &mut [ValuationSnapshot]) {
    for metric in RankedMetric::ALL {
        let values: Vec<Option<Decimal>> =
            group.iter().map(|s| metric.value(&s.metrics)).collect();
        let ranked = rank_percentiles(&values, metric.is_inverted());
        for (snapshot, pct) in group.iter_mut().zip(ranked) {
            snapshot.percentiles.set(metric, pct);
        }
    }
}
