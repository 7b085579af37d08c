use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::financials_model::{QuarterlyFinancial, TtmFinancial};
use crate::constants::TTM_QUARTERS;

/// Sums a flow field. `None` unless at least one quarter reports it; missing
/// quarters then count as zero.
fn sum_reported<F>(quarters: &[&QuarterlyFinancial], field: F) -> Option<Decimal>
where
    F: Fn(&QuarterlyFinancial) -> Option<Decimal>,
{
    quarters
        .iter()
        .filter_map(|q| field(q))
        .fold(None, |acc, v| Some(acc.unwrap_or(Decimal::ZERO) + v))
}

/// Rolls the latest four quarters into a TTM row.
///
/// Balance-sheet fields come from the most recent quarter only. Returns
/// `None` when there are no quarters, in which case any stored TTM row must
/// be left alone.
pub fn aggregate_ttm(
    company_id: &str,
    quarters: &[QuarterlyFinancial],
    now: DateTime<Utc>,
) -> Option<TtmFinancial> {
    let mut recent: Vec<&QuarterlyFinancial> = quarters.iter().collect();
    recent.sort_by(|a, b| (b.year, b.quarter).cmp(&(a.year, a.quarter)));
    recent.truncate(TTM_QUARTERS);

    let latest = *recent.first()?;
    Some(TtmFinancial {
        company_id: company_id.to_string(),
        revenue_ttm: sum_reported(&recent, |q| q.revenue),
        op_profit_ttm: sum_reported(&recent, |q| q.operating_profit),
        net_profit_ttm: sum_reported(&recent, |q| q.net_profit),
        total_equity: latest.total_equity,
        total_debt: latest.total_debt,
        shares_outstanding: latest.shares_outstanding,
        last_quarter_year: latest.year,
        last_quarter: latest.quarter,
        calculated_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::financials::financials_model::quarter_id;
    use rust_decimal_macros::dec;

    fn quarter(year: i32, q: i32, revenue: Option<Decimal>, equity: Option<Decimal>) -> QuarterlyFinancial {
        QuarterlyFinancial {
            id: quarter_id("c1", year, q),
            company_id: "c1".to_string(),
            year,
            quarter: q,
            revenue,
            operating_profit: None,
            net_profit: None,
            total_equity: equity,
            total_debt: None,
            total_assets: None,
            shares_outstanding: None,
            source_filing_id: None,
            source_priority: 2,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn sums_latest_four_quarters_only() {
        let quarters = vec![
            quarter(2023, 3, Some(dec!(1000)), None),
            quarter(2024, 2, Some(dec!(40)), None),
            quarter(2023, 4, Some(dec!(10)), None),
            quarter(2024, 3, Some(dec!(50)), Some(dec!(900))),
            quarter(2024, 1, Some(dec!(30)), Some(dec!(700))),
        ];
        let ttm = aggregate_ttm("c1", &quarters, Utc::now()).unwrap();

        assert_eq!(ttm.revenue_ttm, Some(dec!(130)));
        assert_eq!(ttm.total_equity, Some(dec!(900)));
        assert_eq!((ttm.last_quarter_year, ttm.last_quarter), (2024, 3));
    }

    #[test]
    fn unreported_quarters_count_as_zero_only_when_something_is_reported() {
        let quarters = vec![
            quarter(2024, 1, Some(dec!(30)), None),
            quarter(2024, 2, None, None),
        ];
        let ttm = aggregate_ttm("c1", &quarters, Utc::now()).unwrap();
        assert_eq!(ttm.revenue_ttm, Some(dec!(30)));
        assert_eq!(ttm.net_profit_ttm, None);
        // latest quarter has no equity; older values are not carried forward
        assert_eq!(ttm.total_equity, None);
    }

    #[test]
    fn no_quarters_no_row() {
        assert!(aggregate_ttm("c1", &[], Utc::now()).is_none());
    }
}
