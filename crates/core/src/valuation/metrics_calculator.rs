use rust_decimal::Decimal;

use super::valuation_model::ValuationMetrics;
use crate::constants::METRIC_DECIMAL_PRECISION;
use crate::financials::TtmFinancial;
use crate::utils::decimal::round_half_up;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// `numerator / denominator`, only for a strictly positive denominator.
fn ratio(numerator: Option<Decimal>, denominator: Option<Decimal>) -> Option<Decimal> {
    let denominator = denominator.filter(|d| d.is_sign_positive() && !d.is_zero())?;
    numerator?
        .checked_div(denominator)
        .map(|v| round_half_up(v, METRIC_DECIMAL_PRECISION))
}

fn percentage(numerator: Option<Decimal>, denominator: Option<Decimal>) -> Option<Decimal> {
    let denominator = denominator.filter(|d| d.is_sign_positive() && !d.is_zero())?;
    numerator?
        .checked_div(denominator)
        .and_then(|v| v.checked_mul(HUNDRED))
        .map(|v| round_half_up(v, METRIC_DECIMAL_PRECISION))
}

/// Derives the six ratios. Any metric whose inputs are missing, or whose
/// denominator is not positive, is `None`.
pub fn compute_metrics(ttm: &TtmFinancial, market_cap: Option<Decimal>) -> ValuationMetrics {
    ValuationMetrics {
        per: ratio(market_cap, ttm.net_profit_ttm),
        pbr: ratio(market_cap, ttm.total_equity),
        psr: ratio(market_cap, ttm.revenue_ttm),
        roe: percentage(ttm.net_profit_ttm, ttm.total_equity),
        opm: percentage(ttm.op_profit_ttm, ttm.revenue_ttm),
        debt_ratio: percentage(ttm.total_debt, ttm.total_equity),
    }
}
