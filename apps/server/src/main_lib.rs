use std::sync::Arc;

use filingscope_core::{
    batch::{BatchService, BatchServiceTrait},
    filings::FilingService,
    financials::FinancialService,
    prices::PriceService,
    valuation::ValuationService,
};
use filingscope_feeds::{FileFilingSource, FilePriceSource, FilingSource, MockPriceSource, PriceSource};
use filingscope_storage_sqlite::{
    batch::BatchRunRepository,
    companies::CompanyRepository,
    db,
    filings::FilingRepository,
    financials::FinancialRepository,
    prices::PriceRepository,
    valuation::{PeerMapRepository, ValuationRepository},
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat, PriceSourceConfig};

pub struct AppState {
    pub batch_service: Arc<dyn BatchServiceTrait>,
    pub internal_secret: Option<String>,
}

/// Installs the global subscriber. `log` records from the library crates are
/// forwarded through the subscriber's `tracing-log` bridge.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

fn build_price_source(config: &Config) -> Arc<dyn PriceSource> {
    match &config.price_source {
        PriceSourceConfig::Mock => {
            tracing::warn!("Using generated mock prices; set FS_PRICE_SOURCE=file for real data");
            Arc::new(MockPriceSource::default())
        }
        PriceSourceConfig::File { dir } => Arc::new(FilePriceSource::new(dir.clone())),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let (pool, writer) = db::open(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let company_repository = Arc::new(CompanyRepository::new(pool.clone(), writer.clone()));
    let filing_repository = Arc::new(FilingRepository::new(pool.clone(), writer.clone()));
    let financial_repository = Arc::new(FinancialRepository::new(pool.clone(), writer.clone()));
    let price_repository = Arc::new(PriceRepository::new(pool.clone(), writer.clone()));
    let valuation_repository = Arc::new(ValuationRepository::new(pool.clone(), writer.clone()));
    let peer_repository = Arc::new(PeerMapRepository::new(pool.clone(), writer.clone()));
    let batch_repository = Arc::new(BatchRunRepository::new(pool.clone(), writer.clone()));

    let financial_service = Arc::new(FinancialService::new(financial_repository));
    let filing_service = Arc::new(FilingService::new(
        filing_repository,
        company_repository.clone(),
        financial_service.clone(),
    ));
    let price_service = Arc::new(PriceService::new(
        price_repository,
        company_repository.clone(),
    ));
    let valuation_service = Arc::new(ValuationService::new(
        valuation_repository,
        peer_repository,
        company_repository.clone(),
        price_service.clone(),
        financial_service,
    ));

    let filing_source: Option<Arc<dyn FilingSource>> = match &config.filing_source_path {
        Some(path) => Some(Arc::new(FileFilingSource::new(path.clone()))),
        None => {
            tracing::warn!("FS_FILING_SOURCE_PATH is not set; filing runs will fail");
            None
        }
    };

    let batch_service: Arc<dyn BatchServiceTrait> = Arc::new(BatchService::new(
        batch_repository,
        company_repository,
        filing_service,
        price_service,
        valuation_service,
        filing_source,
        build_price_source(config),
        config.batch,
    ));

    Ok(Arc::new(AppState {
        batch_service,
        internal_secret: config.internal_secret.clone(),
    }))
}
