//! Resolves which company-quarter a performance filing reports on.

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use super::financials_model::{
    ReportPeriod, PRIORITY_ANNUAL, PRIORITY_INTERIM, PRIORITY_PRELIMINARY,
};

lazy_static! {
    static ref YEAR: Regex = Regex::new(r"(20\d{2})").unwrap();
    static ref QUARTER_DIGIT: Regex = Regex::new(r"(\d)분기").unwrap();
}

/// Returns `None` for titles that name no recognizable period.
///
/// Productions are tried in order; the first match decides both the quarter
/// and the source priority.
pub fn resolve_report_period(title: &str, filed_at: NaiveDate) -> Option<ReportPeriod> {
    let year = YEAR
        .captures(title)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .unwrap_or_else(|| filed_at.year());

    let (quarter, priority) = if title.contains("1분기") {
        (1, PRIORITY_INTERIM)
    } else if title.contains("반기") || title.contains("2분기") {
        (2, PRIORITY_INTERIM)
    } else if title.contains("3분기") {
        (3, PRIORITY_INTERIM)
    } else if title.contains("사업보고서") {
        (4, PRIORITY_ANNUAL)
    } else if title.contains("잠정실적") || title.contains("(잠정)실적") {
        let quarter = QUARTER_DIGIT
            .captures(title)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<i32>().ok())
            .filter(|q| (1..=4).contains(q))
            .unwrap_or(4);
        (quarter, PRIORITY_PRELIMINARY)
    } else {
        return None;
    };

    Some(ReportPeriod {
        year,
        quarter,
        priority,
    })
}
