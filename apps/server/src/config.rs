use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{anyhow, bail, Context};
use filingscope_core::batch::BatchSettings;
use filingscope_core::constants::{DEFAULT_MAX_COMPANIES, DEFAULT_RUNTIME_BUDGET_MS};

const DEFAULT_DB_PATH: &str = "./db/filingscope.db";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8088";
const DEFAULT_FILING_INTERVAL_SECS: u64 = 60 * 60;
const DEFAULT_VALUATION_INTERVAL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Where daily prices come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceSourceConfig {
    /// Deterministic generated prices for local runs.
    Mock,
    /// One `<YYYYMMDD>.json` or `.csv` exchange download per trading day.
    File { dir: PathBuf },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Filing-list JSON file. Filing runs fail with a configuration error when unset.
    pub filing_source_path: Option<PathBuf>,
    pub price_source: PriceSourceConfig,
    pub batch: BatchSettings,
    /// Zero disables the scheduled run.
    pub filing_interval: Duration,
    pub valuation_interval: Duration,
    /// Manual triggers are refused when no secret is configured.
    pub internal_secret: Option<String>,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads `.env` (if any) and the `FS_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let listen_addr = var("FS_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("Invalid FS_LISTEN_ADDR")?;
        let db_path = var("FS_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.into());
        let cors_allow = var("FS_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms = parse_number(&var, "FS_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?;

        let price_source = match var("FS_PRICE_SOURCE").as_deref() {
            None | Some("mock") => PriceSourceConfig::Mock,
            Some("file") => PriceSourceConfig::File {
                dir: var("FS_PRICE_SOURCE_DIR")
                    .map(PathBuf::from)
                    .ok_or_else(|| anyhow!("FS_PRICE_SOURCE=file requires FS_PRICE_SOURCE_DIR"))?,
            },
            Some(other) => bail!("Invalid FS_PRICE_SOURCE '{}': expected 'file' or 'mock'", other),
        };

        let log_format = match var("FS_LOG_FORMAT").map(|v| v.to_ascii_lowercase()).as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => bail!("Invalid FS_LOG_FORMAT '{}': expected 'text' or 'json'", other),
        };

        let runtime_budget_ms =
            parse_number(&var, "FS_RUNTIME_BUDGET_MS", DEFAULT_RUNTIME_BUDGET_MS)?;
        let max_companies = parse_number(&var, "FS_MAX_COMPANIES", DEFAULT_MAX_COMPANIES)?;
        let filing_secs =
            parse_number(&var, "FS_FILING_INTERVAL_SECS", DEFAULT_FILING_INTERVAL_SECS)?;
        let valuation_secs = parse_number(
            &var,
            "FS_VALUATION_INTERVAL_SECS",
            DEFAULT_VALUATION_INTERVAL_SECS,
        )?;

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            filing_source_path: var("FS_FILING_SOURCE_PATH").map(PathBuf::from),
            price_source,
            batch: BatchSettings {
                runtime_budget_ms,
                max_companies,
            },
            filing_interval: Duration::from_secs(filing_secs),
            valuation_interval: Duration::from_secs(valuation_secs),
            internal_secret: var("FS_INTERNAL_SECRET"),
            log_format,
        })
    }
}

fn parse_number<T, F>(var: &F, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("Invalid {} '{}'", key, raw)),
        None => Ok(default),
    }
}
