use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};

use super::financials_model::{MergeOutcome, QuarterlyFinancial, TtmFinancial};
use super::financials_traits::{FinancialRepositoryTrait, FinancialServiceTrait};
use super::merger::build_quarter_update;
use super::period_resolver::resolve_report_period;
use super::ttm::aggregate_ttm;
use crate::constants::TTM_QUARTERS;
use crate::errors::Result;
use crate::filings::Filing;

pub struct FinancialService {
    repository: Arc<dyn FinancialRepositoryTrait>,
}

impl FinancialService {
    pub fn new(repository: Arc<dyn FinancialRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl FinancialServiceTrait for FinancialService {
    async fn merge_performance_filing(&self, filing: &Filing) -> Result<MergeOutcome> {
        let Some(period) = resolve_report_period(&filing.title, filing.filed_at) else {
            debug!(
                "Filing {} names no reporting period, skipping merge",
                filing.id
            );
            return Ok(MergeOutcome::NotMergeable);
        };

        let figures = filing.key_numbers.as_ref().and_then(|k| k.performance());
        let row = build_quarter_update(&filing.company_id, &filing.id, period, figures, Utc::now());
        let outcome = self.repository.save_if_not_outranked(row).await?;

        match &outcome {
            MergeOutcome::Written {
                key,
                source_priority,
            } => {
                debug!(
                    "Merged filing {} into {} at priority {}",
                    filing.id,
                    key.id(),
                    source_priority
                );
                self.recompute_ttm(&filing.company_id).await?;
            }
            MergeOutcome::Outranked {
                key,
                stored_priority,
                incoming_priority,
            } => {
                info!(
                    "Filing {} (priority {}) outranked by stored {} (priority {})",
                    filing.id,
                    incoming_priority,
                    key.id(),
                    stored_priority
                );
            }
            MergeOutcome::NotMergeable => {}
        }
        Ok(outcome)
    }

    async fn recompute_ttm(&self, company_id: &str) -> Result<Option<TtmFinancial>> {
        let quarters = self
            .repository
            .get_recent_quarters(company_id, TTM_QUARTERS as i64)?;
        let Some(ttm) = aggregate_ttm(company_id, &quarters, Utc::now()) else {
            debug!("No quarters for {}, TTM left untouched", company_id);
            return Ok(None);
        };
        self.repository.replace_ttm(ttm.clone()).await?;
        Ok(Some(ttm))
    }

    fn get_ttm(&self, company_id: &str) -> Result<Option<TtmFinancial>> {
        self.repository.get_ttm(company_id)
    }

    fn get_quarters(&self, company_id: &str, limit: i64) -> Result<Vec<QuarterlyFinancial>> {
        self.repository.get_recent_quarters(company_id, limit)
    }
}
