//! Sources backed by files on local disk.
//!
//! Used by scheduled deployments that receive upstream dumps through a
//! separate fetcher, and by local runs.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};

use super::traits::{FilingSource, PriceSource};
use super::{dart, krx_api, krx_csv};
use crate::errors::FeedError;
use crate::models::{FilingRecord, PriceRecord};

/// Reads a filing-list JSON page from a single file.
pub struct FileFilingSource {
    path: PathBuf,
}

impl FileFilingSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FilingSource for FileFilingSource {
    fn id(&self) -> &'static str {
        "DART_FILE"
    }

    async fn fetch_recent_filings(&self) -> Result<Vec<FilingRecord>, FeedError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FeedError::unavailable(self.id(), format!("{}: {}", self.path.display(), e)))?;
        let records = dart::parse_list_response(&body)?;
        info!(
            "Read {} filings from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

/// Reads one price file per trade date from a directory.
///
/// For a date `2025-03-14` the source looks for `20250314.json` (OpenAPI
/// shape) and then `20250314.csv` (public download shape).
pub struct FilePriceSource {
    dir: PathBuf,
}

impl FilePriceSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn candidate(&self, trade_date: NaiveDate, ext: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", trade_date.format("%Y%m%d"), ext))
    }
}

async fn read_if_exists(path: &Path) -> Result<Option<String>, FeedError> {
    match tokio::fs::read_to_string(path).await {
        Ok(body) => Ok(Some(body)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FeedError::Io(e)),
    }
}

#[async_trait]
impl PriceSource for FilePriceSource {
    fn id(&self) -> &'static str {
        "KRX_FILE"
    }

    async fn fetch_daily_prices(
        &self,
        trade_date: NaiveDate,
    ) -> Result<Vec<PriceRecord>, FeedError> {
        let json_path = self.candidate(trade_date, "json");
        if let Some(body) = read_if_exists(&json_path).await? {
            return krx_api::parse_api_response(&body, trade_date);
        }

        let csv_path = self.candidate(trade_date, "csv");
        if let Some(body) = read_if_exists(&csv_path).await? {
            return krx_csv::parse_public_csv(&body, trade_date);
        }

        debug!(
            "No price file for {} in {}",
            trade_date,
            self.dir.display()
        );
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[tokio::test]
    async fn prefers_json_over_csv() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("20250314.json"),
            r#"{"OutBlock_1":[{"ISU_SRT_CD":"005930","TDD_CLSPRC":"55,900"}]}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("20250314.csv"), "종목코드,종가\n000660,1\n").unwrap();

        let source = FilePriceSource::new(dir.path());
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let rows = source.fetch_daily_prices(date).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticker, "005930");
        assert_eq!(rows[0].close, Some(dec!(55900)));
    }

    #[tokio::test]
    async fn missing_files_yield_no_rows() {
        let dir = tempdir().unwrap();
        let source = FilePriceSource::new(dir.path());
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert!(source.fetch_daily_prices(date).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_filing_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let source = FileFilingSource::new(dir.path().join("list.json"));
        let err = source.fetch_recent_filings().await.unwrap_err();
        assert!(matches!(err, FeedError::Unavailable { .. }));
    }
}
