use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::{debug, info};

use super::metrics_calculator::compute_metrics;
use super::peer_groups::{find_peer_group, resolve_auto_peer};
use super::score_composer::score_snapshots;
use super::valuation_model::{snapshot_id, PeerMapping, ValuationMetrics, ValuationSnapshot};
use super::valuation_traits::{
    PeerMapRepositoryTrait, ValuationRepositoryTrait, ValuationServiceTrait,
};
use crate::companies::{CompanyRepositoryTrait, ListedCompany};
use crate::constants::UNCLASSIFIED_PEER_CODE;
use crate::errors::{Error, Result, ValidationError};
use crate::financials::FinancialServiceTrait;
use crate::prices::PriceServiceTrait;

pub struct ValuationService {
    valuation_repository: Arc<dyn ValuationRepositoryTrait>,
    peer_repository: Arc<dyn PeerMapRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
    price_service: Arc<dyn PriceServiceTrait>,
    financial_service: Arc<dyn FinancialServiceTrait>,
}

impl ValuationService {
    pub fn new(
        valuation_repository: Arc<dyn ValuationRepositoryTrait>,
        peer_repository: Arc<dyn PeerMapRepositoryTrait>,
        company_repository: Arc<dyn CompanyRepositoryTrait>,
        price_service: Arc<dyn PriceServiceTrait>,
        financial_service: Arc<dyn FinancialServiceTrait>,
    ) -> Self {
        Self {
            valuation_repository,
            peer_repository,
            company_repository,
            price_service,
            financial_service,
        }
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    fn snapshot_exists_for(&self, snap_date: NaiveDate) -> Result<bool> {
        self.valuation_repository.snapshot_exists_for(snap_date)
    }

    async fn ensure_peer_mappings(&self) -> Result<usize> {
        let now = Utc::now();
        let missing: Vec<PeerMapping> = self
            .company_repository
            .list_active_listed()?
            .into_iter()
            .filter(|c| c.peer_code.is_none())
            .map(|c| PeerMapping {
                peer_code: resolve_auto_peer(&c.ticker, c.industry_code.as_deref()).to_string(),
                company_id: c.company_id,
                is_manual: false,
                mapped_at: now,
            })
            .collect();
        if missing.is_empty() {
            return Ok(0);
        }
        let inserted = self.peer_repository.insert_auto_mappings(missing).await?;
        debug!("Added {} automatic peer mappings", inserted);
        Ok(inserted)
    }

    async fn set_manual_peer(&self, company_id: &str, peer_code: &str) -> Result<()> {
        if find_peer_group(peer_code).is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown peer group '{}'",
                peer_code
            ))));
        }
        self.peer_repository
            .upsert_manual_mapping(PeerMapping {
                company_id: company_id.to_string(),
                peer_code: peer_code.to_string(),
                is_manual: true,
                mapped_at: Utc::now(),
            })
            .await
    }

    fn scoring_universe(&self, max_companies: usize) -> Result<Vec<ListedCompany>> {
        let mut companies = self.company_repository.list_active_listed()?;
        companies.truncate(max_companies);
        Ok(companies)
    }

    fn build_draft(
        &self,
        company: &ListedCompany,
        snap_date: NaiveDate,
    ) -> Result<Option<ValuationSnapshot>> {
        let Some(price) = self.price_service.get_latest_price(&company.ticker)? else {
            return Ok(None);
        };

        // Without TTM the snapshot still carries the price.
        let metrics = match self.financial_service.get_ttm(&company.company_id)? {
            Some(ttm) => compute_metrics(&ttm, price.market_cap),
            None => ValuationMetrics::default(),
        };

        Ok(Some(ValuationSnapshot {
            id: snapshot_id(&company.company_id, snap_date),
            company_id: company.company_id.clone(),
            snap_date,
            price: price.close,
            market_cap: price.market_cap,
            metrics,
            peer_code: Some(
                company
                    .peer_code
                    .clone()
                    .unwrap_or_else(|| UNCLASSIFIED_PEER_CODE.to_string()),
            ),
            percentiles: Default::default(),
            score: None,
            band: None,
            created_at: Utc::now(),
        }))
    }

    async fn finalize_snapshots(&self, mut drafts: Vec<ValuationSnapshot>) -> Result<usize> {
        if drafts.is_empty() {
            return Ok(0);
        }
        score_snapshots(&mut drafts);
        let saved = self.valuation_repository.save_snapshots(drafts).await?;
        info!("Saved {} valuation snapshots", saved);
        Ok(saved)
    }

    fn latest_snapshot_date(&self) -> Result<Option<NaiveDate>> {
        self.valuation_repository.latest_snapshot_date()
    }

    fn list_snapshots(
        &self,
        snap_date: NaiveDate,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ValuationSnapshot>> {
        self.valuation_repository.list_for_date(snap_date, limit, offset)
    }

    fn company_snapshots(&self, company_id: &str, limit: i64) -> Result<Vec<ValuationSnapshot>> {
        self.valuation_repository.list_for_company(company_id, limit)
    }

    fn count_snapshots(&self) -> Result<i64> {
        self.valuation_repository.count()
    }
}
