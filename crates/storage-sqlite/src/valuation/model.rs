//! Database models for valuation snapshots and peer mappings.

use diesel::prelude::*;
use filingscope_core::valuation::{
    BandLabel, MetricPercentiles, PeerMapping, ValuationMetrics, ValuationSnapshot,
};

use crate::errors::StorageError;
use crate::utils::{
    corrupt, date_to_text, decimal_to_text, opt_decimal_to_text, opt_text_to_decimal,
    text_to_date, text_to_decimal, text_to_timestamp, timestamp_to_text,
};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::valuation_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ValuationSnapshotDB {
    pub id: String,
    pub company_id: String,
    pub snap_date: String,
    pub price: String,
    pub market_cap: Option<String>,
    pub per: Option<String>,
    pub pbr: Option<String>,
    pub psr: Option<String>,
    pub roe: Option<String>,
    pub opm: Option<String>,
    pub debt_ratio: Option<String>,
    pub peer_code: Option<String>,
    pub per_pct: Option<String>,
    pub pbr_pct: Option<String>,
    pub psr_pct: Option<String>,
    pub roe_pct: Option<String>,
    pub opm_pct: Option<String>,
    pub score: Option<i32>,
    pub band: Option<String>,
    pub created_at: String,
}

impl From<ValuationSnapshot> for ValuationSnapshotDB {
    fn from(s: ValuationSnapshot) -> Self {
        Self {
            id: s.id,
            company_id: s.company_id,
            snap_date: date_to_text(s.snap_date),
            price: decimal_to_text(s.price),
            market_cap: opt_decimal_to_text(s.market_cap),
            per: opt_decimal_to_text(s.metrics.per),
            pbr: opt_decimal_to_text(s.metrics.pbr),
            psr: opt_decimal_to_text(s.metrics.psr),
            roe: opt_decimal_to_text(s.metrics.roe),
            opm: opt_decimal_to_text(s.metrics.opm),
            debt_ratio: opt_decimal_to_text(s.metrics.debt_ratio),
            peer_code: s.peer_code,
            per_pct: opt_decimal_to_text(s.percentiles.per),
            pbr_pct: opt_decimal_to_text(s.percentiles.pbr),
            psr_pct: opt_decimal_to_text(s.percentiles.psr),
            roe_pct: opt_decimal_to_text(s.percentiles.roe),
            opm_pct: opt_decimal_to_text(s.percentiles.opm),
            score: s.score,
            band: s.band.map(|b| b.as_str().to_string()),
            created_at: timestamp_to_text(s.created_at),
        }
    }
}

impl TryFrom<ValuationSnapshotDB> for ValuationSnapshot {
    type Error = StorageError;

    fn try_from(db: ValuationSnapshotDB) -> Result<Self, Self::Error> {
        let metrics = ValuationMetrics {
            per: opt_text_to_decimal("per", db.per.as_deref())?,
            pbr: opt_text_to_decimal("pbr", db.pbr.as_deref())?,
            psr: opt_text_to_decimal("psr", db.psr.as_deref())?,
            roe: opt_text_to_decimal("roe", db.roe.as_deref())?,
            opm: opt_text_to_decimal("opm", db.opm.as_deref())?,
            debt_ratio: opt_text_to_decimal("debt_ratio", db.debt_ratio.as_deref())?,
        };
        let percentiles = MetricPercentiles {
            per: opt_text_to_decimal("per_pct", db.per_pct.as_deref())?,
            pbr: opt_text_to_decimal("pbr_pct", db.pbr_pct.as_deref())?,
            psr: opt_text_to_decimal("psr_pct", db.psr_pct.as_deref())?,
            roe: opt_text_to_decimal("roe_pct", db.roe_pct.as_deref())?,
            opm: opt_text_to_decimal("opm_pct", db.opm_pct.as_deref())?,
        };
        let band = db
            .band
            .as_deref()
            .map(|b| b.parse::<BandLabel>().map_err(|_| corrupt("band", b)))
            .transpose()?;
        Ok(Self {
            snap_date: text_to_date("snap_date", &db.snap_date)?,
            price: text_to_decimal("price", &db.price)?,
            market_cap: opt_text_to_decimal("market_cap", db.market_cap.as_deref())?,
            created_at: text_to_timestamp("created_at", &db.created_at)?,
            id: db.id,
            company_id: db.company_id,
            metrics,
            peer_code: db.peer_code,
            percentiles,
            score: db.score,
            band,
        })
    }
}

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::company_peer_map)]
#[diesel(primary_key(company_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PeerMappingDB {
    pub company_id: String,
    pub peer_code: String,
    pub is_manual: bool,
    pub mapped_at: String,
}

impl From<PeerMapping> for PeerMappingDB {
    fn from(m: PeerMapping) -> Self {
        Self {
            company_id: m.company_id,
            peer_code: m.peer_code,
            is_manual: m.is_manual,
            mapped_at: timestamp_to_text(m.mapped_at),
        }
    }
}

impl TryFrom<PeerMappingDB> for PeerMapping {
    type Error = StorageError;

    fn try_from(db: PeerMappingDB) -> Result<Self, Self::Error> {
        Ok(Self {
            mapped_at: text_to_timestamp("mapped_at", &db.mapped_at)?,
            company_id: db.company_id,
            peer_code: db.peer_code,
            is_manual: db.is_manual,
        })
    }
}
