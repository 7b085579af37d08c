use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::percentile_ranker::rank_peer_group;
use super::valuation_model::{BandLabel, MetricPercentiles, RankedMetric, ValuationSnapshot};
use crate::constants::{NEUTRAL_SCORE, UNCLASSIFIED_PEER_CODE};
use crate::utils::decimal::round_half_up;

/// Weighted blend of the available percentiles, normalized by the weights
/// actually used. No percentiles at all scores exactly [`NEUTRAL_SCORE`].
pub fn compose_score(percentiles: &MetricPercentiles) -> i32 {
    let (weighted, used) = RankedMetric::ALL
        .iter()
        .filter_map(|m| percentiles.get(*m).map(|p| (p * m.weight(), m.weight())))
        .fold((Decimal::ZERO, Decimal::ZERO), |(s, w), (ps, pw)| (s + ps, w + pw));

    if used.is_zero() {
        return NEUTRAL_SCORE;
    }
    round_half_up(weighted / used, 0)
        .to_i32()
        .map_or(NEUTRAL_SCORE, |s| s.clamp(0, 100))
}

fn peer_of(snapshot: &ValuationSnapshot) -> &str {
    snapshot
        .peer_code
        .as_deref()
        .unwrap_or(UNCLASSIFIED_PEER_CODE)
}

/// Groups drafts by peer code, ranks each group, then scores and bands
/// every draft.
///
/// Drafts end up ordered by peer code; order inside a group is preserved.
pub fn score_snapshots(drafts: &mut [ValuationSnapshot]) {
    drafts.sort_by(|a, b| peer_of(a).cmp(peer_of(b)));

    let mut start = 0;
    while start < drafts.len() {
        let peer = peer_of(&drafts[start]).to_string();
        let end = drafts[start..]
            .iter()
            .position(|d| peer_of(d) != peer)
            .map_or(drafts.len(), |offset| start + offset);
        rank_peer_group(&mut drafts[start..end]);
        start = end;
    }

    for draft in drafts.iter_mut() {
        let score = compose_score(&draft.percentiles);
        draft.score = Some(score);
        draft.band = Some(BandLabel::from_score(Some(score)));
    }
}
