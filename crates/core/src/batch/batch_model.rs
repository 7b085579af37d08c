//! Batch run log models and per-run reporting.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Written into runs closed by the stale sweep.
pub const STALE_RUN_MESSAGE: &str = "stale run: marked failed by next invocation";

/// Appended when a run stops early on its runtime budget.
pub const BUDGET_EXCEEDED_MESSAGE: &str =
    "time_budget_exceeded: stopping early to avoid scheduler timeout";

/// Issues stored in `error_message`, at most.
pub const MAX_LOGGED_ISSUES: usize = 10;
/// Character cap on the stored `error_message`.
pub const MAX_ERROR_MESSAGE_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchType {
    Filing,
    Valuation,
}

impl BatchType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BatchType::Filing => "filing",
            BatchType::Valuation => "valuation",
        }
    }

    /// A run still `running` after this long is presumed dead.
    pub fn stale_after(&self) -> Duration {
        match self {
            BatchType::Filing => Duration::minutes(15),
            BatchType::Valuation => Duration::hours(2),
        }
    }
}

impl fmt::Display for BatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BatchType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "filing" => Ok(BatchType::Filing),
            "valuation" => Ok(BatchType::Valuation),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown batch type '{}'",
                other
            )))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Running,
    Success,
    Partial,
    Failed,
}

impl BatchStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Running => "running",
            BatchStatus::Success => "success",
            BatchStatus::Partial => "partial",
            BatchStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BatchStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(BatchStatus::Running),
            "success" => Ok(BatchStatus::Success),
            "partial" => Ok(BatchStatus::Partial),
            "failed" => Ok(BatchStatus::Failed),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown batch status '{}'",
                other
            )))),
        }
    }
}

/// One row of the batch log. Created `running`, closed exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRun {
    pub id: String,
    pub batch_type: BatchType,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub status: BatchStatus,
    pub items_processed: i64,
    pub items_failed: i64,
    pub error_message: Option<String>,
}

impl BatchRun {
    pub fn start(batch_type: BatchType, started_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            batch_type,
            started_at,
            finished_at: None,
            status: BatchStatus::Running,
            items_processed: 0,
            items_failed: 0,
            error_message: None,
        }
    }
}

/// Terminal values written when a run is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct RunClose {
    pub status: BatchStatus,
    pub items_processed: i64,
    pub items_failed: i64,
    pub error_message: Option<String>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Upstream feed unreachable or malformed
    Source,
    /// One filing or company failed
    Item,
    /// Cooperative early stop
    BudgetExceeded,
    /// Informational only, never degrades the status
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchIssue {
    pub kind: IssueKind,
    pub message: String,
}

impl BatchIssue {
    pub fn source(detail: impl fmt::Display) -> Self {
        Self {
            kind: IssueKind::Source,
            message: format!("source error: {}", detail),
        }
    }

    pub fn item(id: &str, detail: impl fmt::Display) -> Self {
        Self {
            kind: IssueKind::Item,
            message: format!("{}: {}", id, detail),
        }
    }

    pub fn budget_exceeded() -> Self {
        Self {
            kind: IssueKind::BudgetExceeded,
            message: BUDGET_EXCEEDED_MESSAGE.to_string(),
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::Notice,
            message: message.into(),
        }
    }
}

/// What a batch body accomplished. Turned into the run's terminal row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub issues: Vec<BatchIssue>,
}

impl BatchReport {
    pub fn push(&mut self, issue: BatchIssue) {
        self.issues.push(issue);
    }

    fn has(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }

    /// A source error with nothing processed fails the run; any other
    /// non-notice issue makes it partial.
    pub fn status(&self) -> BatchStatus {
        if self.has(IssueKind::Source) && self.processed == 0 {
            BatchStatus::Failed
        } else if self.issues.iter().any(|i| i.kind != IssueKind::Notice) {
            BatchStatus::Partial
        } else {
            BatchStatus::Success
        }
    }

    pub fn items_failed(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.kind == IssueKind::Item)
            .count()
    }

    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.message.clone()).collect()
    }

    pub fn error_message(&self) -> Option<String> {
        if self.issues.is_empty() {
            return None;
        }
        let joined = self
            .issues
            .iter()
            .take(MAX_LOGGED_ISSUES)
            .map(|i| i.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Some(truncate_chars(&joined, MAX_ERROR_MESSAGE_CHARS))
    }
}

pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// Returned to whoever triggered the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub run_id: String,
    pub batch_type: BatchType,
    pub status: BatchStatus,
    pub processed: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

/// Batch log summary for health reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchHealth {
    pub recent_runs: Vec<BatchRun>,
    pub last_filing_success: Option<BatchRun>,
    pub last_valuation_success: Option<BatchRun>,
    pub filing_count: i64,
    pub snapshot_count: i64,
    pub active_company_count: i64,
    pub latest_snapshot_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_rules() {
        let mut report = BatchReport::default();
        assert_eq!(report.status(), BatchStatus::Success);

        report.push(BatchIssue::notice("snapshot for 2025-03-14 already exists"));
        assert_eq!(report.status(), BatchStatus::Success);

        report.push(BatchIssue::source("connection refused"));
        assert_eq!(report.status(), BatchStatus::Failed);

        report.processed = 3;
        assert_eq!(report.status(), BatchStatus::Partial);

        let mut budget = BatchReport::default();
        budget.push(BatchIssue::budget_exceeded());
        assert_eq!(budget.status(), BatchStatus::Partial);
    }

    #[test]
    fn issue_messages() {
        assert_eq!(
            BatchIssue::source("timeout").message,
            "source error: timeout"
        );
        assert_eq!(
            BatchIssue::item("20240515000001", "bad date").message,
            "20240515000001: bad date"
        );
    }

    #[test]
    fn error_message_is_capped() {
        let mut report = BatchReport::default();
        for i in 0..12 {
            report.push(BatchIssue::item(&format!("f{}", i), "x"));
        }
        let message = report.error_message().unwrap();
        assert_eq!(message.split("; ").count(), MAX_LOGGED_ISSUES);
        assert_eq!(report.items_failed(), 12);

        let mut long = BatchReport::default();
        long.push(BatchIssue::item("f1", "가".repeat(600)));
        assert_eq!(
            long.error_message().unwrap().chars().count(),
            MAX_ERROR_MESSAGE_CHARS
        );
    }

    #[test]
    fn stale_thresholds_differ_per_type() {
        assert_eq!(BatchType::Filing.stale_after(), Duration::minutes(15));
        assert_eq!(BatchType::Valuation.stale_after(), Duration::hours(2));
    }
}
