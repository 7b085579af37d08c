use async_trait::async_trait;
use chrono::NaiveDate;

use super::valuation_model::{PeerMapping, ValuationSnapshot};
use crate::companies::ListedCompany;
use crate::errors::Result;

/// Trait for valuation snapshot storage
#[async_trait]
pub trait ValuationRepositoryTrait: Send + Sync {
    fn snapshot_exists_for(&self, snap_date: NaiveDate) -> Result<bool>;

    /// Inserts all snapshots in one transaction. Rows whose id already
    /// exists are left as they are. Returns the number inserted.
    async fn save_snapshots(&self, snapshots: Vec<ValuationSnapshot>) -> Result<usize>;

    fn latest_snapshot_date(&self) -> Result<Option<NaiveDate>>;

    /// Highest score first.
    fn list_for_date(
        &self,
        snap_date: NaiveDate,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ValuationSnapshot>>;

    /// Newest first.
    fn list_for_company(&self, company_id: &str, limit: i64) -> Result<Vec<ValuationSnapshot>>;

    fn count(&self) -> Result<i64>;
}

/// Trait for company to peer group mappings
#[async_trait]
pub trait PeerMapRepositoryTrait: Send + Sync {
    fn get_mapping(&self, company_id: &str) -> Result<Option<PeerMapping>>;

    /// Insert-if-absent for each mapping. Existing rows, manual or not, are
    /// kept. Returns the number inserted.
    async fn insert_auto_mappings(&self, mappings: Vec<PeerMapping>) -> Result<usize>;

    /// Inserts or replaces the company's mapping with a manual one.
    async fn upsert_manual_mapping(&self, mapping: PeerMapping) -> Result<()>;
}

/// Trait for the daily valuation pipeline and its read side
#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    fn snapshot_exists_for(&self, snap_date: NaiveDate) -> Result<bool>;

    /// Maps every active listed company that has no mapping yet.
    async fn ensure_peer_mappings(&self) -> Result<usize>;

    async fn set_manual_peer(&self, company_id: &str, peer_code: &str) -> Result<()>;

    /// Active listed companies to score, capped at `max_companies`.
    fn scoring_universe(&self, max_companies: usize) -> Result<Vec<ListedCompany>>;

    /// Unranked snapshot for one company, or `None` without a price row.
    fn build_draft(
        &self,
        company: &ListedCompany,
        snap_date: NaiveDate,
    ) -> Result<Option<ValuationSnapshot>>;

    /// Ranks, scores and persists a full day of drafts.
    async fn finalize_snapshots(&self, drafts: Vec<ValuationSnapshot>) -> Result<usize>;

    fn latest_snapshot_date(&self) -> Result<Option<NaiveDate>>;

    fn list_snapshots(
        &self,
        snap_date: NaiveDate,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ValuationSnapshot>>;

    fn company_snapshots(&self, company_id: &str, limit: i64) -> Result<Vec<ValuationSnapshot>>;

    fn count_snapshots(&self) -> Result<i64>;
}
