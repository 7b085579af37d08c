//! Valuation snapshot models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// The six ratios computed from price and TTM financials.
///
/// `roe`, `opm` and `debt_ratio` are percentages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationMetrics {
    pub per: Option<Decimal>,
    pub pbr: Option<Decimal>,
    pub psr: Option<Decimal>,
    pub roe: Option<Decimal>,
    pub opm: Option<Decimal>,
    pub debt_ratio: Option<Decimal>,
}

/// Metrics that take part in peer ranking and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankedMetric {
    Per,
    Pbr,
    Psr,
    Roe,
    Opm,
}

impl RankedMetric {
    pub const ALL: [RankedMetric; 5] = [
        RankedMetric::Per,
        RankedMetric::Pbr,
        RankedMetric::Psr,
        RankedMetric::Roe,
        RankedMetric::Opm,
    ];

    /// Lower raw values rank higher for price multiples.
    pub const fn is_inverted(&self) -> bool {
        matches!(self, RankedMetric::Per | RankedMetric::Pbr | RankedMetric::Psr)
    }

    pub fn weight(&self) -> Decimal {
        match self {
            RankedMetric::Per => dec!(0.25),
            RankedMetric::Pbr => dec!(0.20),
            RankedMetric::Psr => dec!(0.15),
            RankedMetric::Roe => dec!(0.20),
            RankedMetric::Opm => dec!(0.20),
        }
    }

    pub fn value(&self, metrics: &ValuationMetrics) -> Option<Decimal> {
        match self {
            RankedMetric::Per => metrics.per,
            RankedMetric::Pbr => metrics.pbr,
            RankedMetric::Psr => metrics.psr,
            RankedMetric::Roe => metrics.roe,
            RankedMetric::Opm => metrics.opm,
        }
    }
}

/// Peer-relative percentiles, already inverted where lower is better.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricPercentiles {
    pub per: Option<Decimal>,
    pub pbr: Option<Decimal>,
    pub psr: Option<Decimal>,
    pub roe: Option<Decimal>,
    pub opm: Option<Decimal>,
}

impl MetricPercentiles {
    pub fn get(&self, metric: RankedMetric) -> Option<Decimal> {
        match metric {
            RankedMetric::Per => self.per,
            RankedMetric::Pbr => self.pbr,
            RankedMetric::Psr => self.psr,
            RankedMetric::Roe => self.roe,
            RankedMetric::Opm => self.opm,
        }
    }

    pub fn set(&mut self, metric: RankedMetric, value: Option<Decimal>) {
        let slot = match metric {
            RankedMetric::Per => &mut self.per,
            RankedMetric::Pbr => &mut self.pbr,
            RankedMetric::Psr => &mut self.psr,
            RankedMetric::Roe => &mut self.roe,
            RankedMetric::Opm => &mut self.opm,
        };
        *slot = value;
    }
}

/// Five-step ladder over the 0-100 score. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BandLabel {
    Top,
    Good,
    Neutral,
    Low,
    VeryLow,
}

impl BandLabel {
    /// A missing score reads as neutral.
    pub fn from_score(score: Option<i32>) -> Self {
        match score {
            None => BandLabel::Neutral,
            Some(s) if s >= 80 => BandLabel::Top,
            Some(s) if s >= 60 => BandLabel::Good,
            Some(s) if s >= 40 => BandLabel::Neutral,
            Some(s) if s >= 20 => BandLabel::Low,
            Some(_) => BandLabel::VeryLow,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            BandLabel::Top => "TOP",
            BandLabel::Good => "GOOD",
            BandLabel::Neutral => "NEUTRAL",
            BandLabel::Low => "LOW",
            BandLabel::VeryLow => "VERY_LOW",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            BandLabel::Top => "상단",
            BandLabel::Good => "양호",
            BandLabel::Neutral => "중립",
            BandLabel::Low => "하단",
            BandLabel::VeryLow => "매우하단",
        }
    }
}

impl fmt::Display for BandLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BandLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TOP" => Ok(BandLabel::Top),
            "GOOD" => Ok(BandLabel::Good),
            "NEUTRAL" => Ok(BandLabel::Neutral),
            "LOW" => Ok(BandLabel::Low),
            "VERY_LOW" => Ok(BandLabel::VeryLow),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown band label '{}'",
                other
            )))),
        }
    }
}

/// One company's valuation for one day. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationSnapshot {
    pub id: String,
    pub company_id: String,
    pub snap_date: NaiveDate,
    pub price: Decimal,
    pub market_cap: Option<Decimal>,
    pub metrics: ValuationMetrics,
    pub peer_code: Option<String>,
    pub percentiles: MetricPercentiles,
    pub score: Option<i32>,
    pub band: Option<BandLabel>,
    pub created_at: DateTime<Utc>,
}

/// `{company_id}_{snap_date}`
pub fn snapshot_id(company_id: &str, snap_date: NaiveDate) -> String {
    format!("{}_{}", company_id, snap_date.format("%Y-%m-%d"))
}

/// Company to peer group assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerMapping {
    pub company_id: String,
    pub peer_code: String,
    /// Manual mappings are never replaced by automatic ones.
    pub is_manual: bool,
    pub mapped_at: DateTime<Utc>,
}
