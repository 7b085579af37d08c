use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use filingscope_feeds::FilingRecord;
use log::{debug, warn};

use super::classifier::classify;
use super::extraction::extract_key_numbers;
use super::filings_model::{
    market_for_exchange_class, Filing, FilingCategory, IngestOutcome, MergeStep,
};
use super::filings_traits::{FilingRepositoryTrait, FilingServiceTrait};
use crate::companies::{CompanyRepositoryTrait, NewCompany};
use crate::constants::FILING_VIEWER_URL;
use crate::errors::{Result, ValidationError};
use crate::financials::FinancialServiceTrait;
use crate::utils::time_utils::parse_compact_date;

/// Filing ledger writer.
pub struct FilingService {
    filing_repository: Arc<dyn FilingRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
    financial_service: Arc<dyn FinancialServiceTrait>,
}

impl FilingService {
    pub fn new(
        filing_repository: Arc<dyn FilingRepositoryTrait>,
        company_repository: Arc<dyn CompanyRepositoryTrait>,
        financial_service: Arc<dyn FinancialServiceTrait>,
    ) -> Self {
        Self {
            filing_repository,
            company_repository,
            financial_service,
        }
    }

    fn build_filing(record: &FilingRecord) -> Result<Filing> {
        let filed_at = parse_compact_date(&record.filed_at).ok_or_else(|| {
            ValidationError::InvalidInput(format!("invalid filing date '{}'", record.filed_at))
        })?;
        let classification = classify(&record.title, record.remark.as_deref());
        let key_numbers = extract_key_numbers(classification.category, &record.title);

        Ok(Filing {
            id: record.filing_id.clone(),
            company_id: record.company_id.clone(),
            ticker: record.ticker.clone().filter(|t| !t.trim().is_empty()),
            company_name: record.company_name.clone(),
            filed_at,
            category: classification.category,
            subtype: classification.subtype,
            title: record.title.clone(),
            key_numbers,
            source_url: format!("{}{}", FILING_VIEWER_URL, record.filing_id),
            is_correction: classification.is_correction,
            created_at: Utc::now(),
        })
    }

    async fn merge(&self, filing: &Filing) -> MergeStep {
        if filing.category != FilingCategory::Performance {
            return MergeStep::NotApplicable;
        }
        match self.financial_service.merge_performance_filing(filing).await {
            Ok(outcome) => MergeStep::Merged(outcome),
            Err(e) => {
                warn!("Filing {} stored but not merged: {}", filing.id, e);
                MergeStep::Failed(e.to_string())
            }
        }
    }
}

#[async_trait]
impl FilingServiceTrait for FilingService {
    async fn ingest(&self, record: FilingRecord) -> Result<IngestOutcome> {
        if self.filing_repository.exists(&record.filing_id)? {
            debug!("Filing {} already stored", record.filing_id);
            return Ok(IngestOutcome::Duplicate);
        }

        let filing = Self::build_filing(&record)?;

        self.company_repository
            .insert_if_absent(NewCompany {
                id: filing.company_id.clone(),
                ticker: filing.ticker.clone(),
                name: filing.company_name.clone(),
                market: market_for_exchange_class(&record.exchange_class).map(str::to_string),
                industry_code: None,
            })
            .await?;

        // A concurrent run may have stored the same id after the pre-check.
        if !self.filing_repository.insert_filing(filing.clone()).await? {
            debug!("Filing {} inserted concurrently", filing.id);
            return Ok(IngestOutcome::Duplicate);
        }

        Ok(IngestOutcome::Inserted(self.merge(&filing).await))
    }

    fn get_filing(&self, filing_id: &str) -> Result<Option<Filing>> {
        self.filing_repository.get_filing(filing_id)
    }

    fn list_company_filings(&self, company_id: &str, limit: i64) -> Result<Vec<Filing>> {
        self.filing_repository.list_for_company(company_id, limit)
    }

    fn list_filings_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        limit: i64,
    ) -> Result<Vec<Filing>> {
        self.filing_repository.list_between(from, to, limit)
    }

    fn count_filings(&self) -> Result<i64> {
        self.filing_repository.count()
    }
}
