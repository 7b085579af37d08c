use std::sync::Arc;

use async_trait::async_trait;
use filingscope_feeds::{FilingSource, PriceSource};

use super::batch_model::{BatchHealth, BatchResult, BatchType};
use super::batch_traits::{BatchRunRepositoryTrait, BatchServiceTrait};
use super::budget::RuntimeBudget;
use super::filing_batch::run_filing_items;
use super::orchestrator::BatchOrchestrator;
use super::valuation_batch::{run_valuation_items, ValuationBatchContext};
use crate::companies::CompanyRepositoryTrait;
use crate::constants::{DEFAULT_MAX_COMPANIES, DEFAULT_RUNTIME_BUDGET_MS};
use crate::errors::Result;
use crate::filings::FilingServiceTrait;
use crate::prices::PriceServiceTrait;
use crate::utils::time_utils::market_date_today;
use crate::valuation::ValuationServiceTrait;

/// Runs kept in the health report.
const HEALTH_RECENT_RUNS: i64 = 10;

/// Tunables for batch invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSettings {
    pub runtime_budget_ms: u64,
    pub max_companies: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            runtime_budget_ms: DEFAULT_RUNTIME_BUDGET_MS,
            max_companies: DEFAULT_MAX_COMPANIES,
        }
    }
}

pub struct BatchService {
    orchestrator: BatchOrchestrator,
    batch_repository: Arc<dyn BatchRunRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
    filing_service: Arc<dyn FilingServiceTrait>,
    price_service: Arc<dyn PriceServiceTrait>,
    valuation_service: Arc<dyn ValuationServiceTrait>,
    filing_source: Option<Arc<dyn FilingSource>>,
    price_source: Arc<dyn PriceSource>,
    settings: BatchSettings,
}

impl BatchService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        batch_repository: Arc<dyn BatchRunRepositoryTrait>,
        company_repository: Arc<dyn CompanyRepositoryTrait>,
        filing_service: Arc<dyn FilingServiceTrait>,
        price_service: Arc<dyn PriceServiceTrait>,
        valuation_service: Arc<dyn ValuationServiceTrait>,
        filing_source: Option<Arc<dyn FilingSource>>,
        price_source: Arc<dyn PriceSource>,
        settings: BatchSettings,
    ) -> Self {
        Self {
            orchestrator: BatchOrchestrator::new(batch_repository.clone()),
            batch_repository,
            company_repository,
            filing_service,
            price_service,
            valuation_service,
            filing_source,
            price_source,
            settings,
        }
    }

    fn budget(&self, override_ms: Option<u64>) -> RuntimeBudget {
        RuntimeBudget::start(override_ms.unwrap_or(self.settings.runtime_budget_ms))
    }
}

#[async_trait]
impl BatchServiceTrait for BatchService {
    async fn run_filing_batch(&self, budget_ms: Option<u64>) -> Result<BatchResult> {
        let run = self.orchestrator.begin(BatchType::Filing).await?;
        let budget = self.budget(budget_ms);
        let outcome = run_filing_items(
            self.filing_source.as_deref(),
            self.filing_service.as_ref(),
            &budget,
        )
        .await;
        Ok(self.orchestrator.complete(&run, outcome).await)
    }

    async fn run_valuation_batch(&self, budget_ms: Option<u64>) -> Result<BatchResult> {
        let run = self.orchestrator.begin(BatchType::Valuation).await?;
        let budget = self.budget(budget_ms);
        let ctx = ValuationBatchContext {
            price_source: self.price_source.as_ref(),
            price_service: self.price_service.as_ref(),
            valuation_service: self.valuation_service.as_ref(),
            max_companies: self.settings.max_companies,
            snap_date: market_date_today(),
        };
        let outcome = run_valuation_items(ctx, &budget).await;
        Ok(self.orchestrator.complete(&run, outcome).await)
    }

    fn get_health(&self) -> Result<BatchHealth> {
        Ok(BatchHealth {
            recent_runs: self.batch_repository.get_recent_runs(HEALTH_RECENT_RUNS)?,
            last_filing_success: self.batch_repository.get_last_success(BatchType::Filing)?,
            last_valuation_success: self
                .batch_repository
                .get_last_success(BatchType::Valuation)?,
            filing_count: self.filing_service.count_filings()?,
            snapshot_count: self.valuation_service.count_snapshots()?,
            active_company_count: self.company_repository.count_active()?,
            latest_snapshot_date: self.valuation_service.latest_snapshot_date()?,
        })
    }
}
