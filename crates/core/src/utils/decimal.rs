use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero, the way published ratios are rounded.
///
/// `Decimal::round_dp` uses banker's rounding, which would turn 12.345
/// into 12.34.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_midpoints_away_from_zero() {
        assert_eq!(round_half_up(dec!(12.345), 2), dec!(12.35));
        assert_eq!(round_half_up(dec!(-12.345), 2), dec!(-12.35));
        assert_eq!(round_half_up(dec!(66.65), 1), dec!(66.7));
        assert_eq!(round_half_up(dec!(7), 2), dec!(7));
    }
}
