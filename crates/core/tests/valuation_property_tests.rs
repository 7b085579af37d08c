//! Property-based integration tests for peer ranking and scoring.

use filingscope_core::valuation::{
    compose_score, rank_percentiles, BandLabel, MetricPercentiles, RankedMetric,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

/// Ratio-like values with two decimals, including negatives.
fn arb_metric() -> impl Strategy<Value = Decimal> {
    (-100_000i64..100_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_column(max_len: usize) -> impl Strategy<Value = Vec<Option<Decimal>>> {
    proptest::collection::vec(proptest::option::of(arb_metric()), 0..=max_len)
}

fn arb_percentile() -> impl Strategy<Value = Decimal> {
    (0i64..=1000).prop_map(|tenths| Decimal::new(tenths, 1))
}

fn arb_percentiles() -> impl Strategy<Value = MetricPercentiles> {
    proptest::collection::vec(proptest::option::of(arb_percentile()), 5).prop_map(|values| {
        let mut percentiles = MetricPercentiles::default();
        for (metric, value) in RankedMetric::ALL.iter().zip(values) {
            percentiles.set(*metric, value);
        }
        percentiles
    })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Percentiles stay inside (0, 100] for plain metrics and [0, 100) for
    /// inverted ones, and only companies with a value receive one.
    #[test]
    fn prop_percentiles_are_bounded(values in arb_column(40), inverted in any::<bool>()) {
        let ranked = rank_percentiles(&values, inverted);
        prop_assert_eq!(ranked.len(), values.len());

        for (value, pct) in values.iter().zip(&ranked) {
            prop_assert_eq!(value.is_some(), pct.is_some());
            if let Some(pct) = pct {
                if inverted {
                    prop_assert!(*pct >= Decimal::ZERO && *pct < Decimal::ONE_HUNDRED);
                } else {
                    prop_assert!(*pct > Decimal::ZERO && *pct <= Decimal::ONE_HUNDRED);
                }
            }
        }
    }

    /// A company alone in its group with a value ranks at the top of a plain
    /// metric and at the bottom of an inverted one.
    #[test]
    fn prop_single_member_group(value in arb_metric(), inverted in any::<bool>()) {
        let ranked = rank_percentiles(&[Some(value)], inverted);
        let expected = if inverted { Decimal::ZERO } else { Decimal::ONE_HUNDRED };
        prop_assert_eq!(ranked, vec![Some(expected)]);
    }

    /// Strictly larger values never rank lower on a plain metric.
    #[test]
    fn prop_ranking_is_monotonic(values in proptest::collection::vec(arb_metric(), 1..30)) {
        let column: Vec<Option<Decimal>> = values.iter().copied().map(Some).collect();
        let ranked = rank_percentiles(&column, false);
        for i in 0..values.len() {
            for j in 0..values.len() {
                if values[i] > values[j] {
                    prop_assert!(ranked[i] > ranked[j]);
                }
            }
        }
    }

    /// Scores always land in 0..=100, and only scores of 80 and up read as
    /// the top band.
    #[test]
    fn prop_score_is_bounded(percentiles in arb_percentiles()) {
        let score = compose_score(&percentiles);
        prop_assert!((0..=100).contains(&score));
        prop_assert_eq!(BandLabel::from_score(Some(score)) == BandLabel::Top, score >= 80);
    }

    /// When every available percentile is the same value, the score is that
    /// value rounded, whatever subset of metrics is present.
    #[test]
    fn prop_uniform_percentiles_score_themselves(
        whole in 0i64..=100,
        present in proptest::collection::vec(any::<bool>(), 5),
    ) {
        let mut percentiles = MetricPercentiles::default();
        for (metric, keep) in RankedMetric::ALL.iter().zip(&present) {
            if *keep {
                percentiles.set(*metric, Some(Decimal::from(whole)));
            }
        }
        let expected = if present.iter().any(|p| *p) { whole as i32 } else { 50 };
        prop_assert_eq!(compose_score(&percentiles), expected);
    }
}
