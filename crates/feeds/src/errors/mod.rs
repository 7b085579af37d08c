//! Error types for feed sources and normalizers.

use thiserror::Error;

/// Errors raised while fetching or decoding an upstream feed.
///
/// All variants are source-level: the batch that asked for the feed records
/// them once and does not retry inside the same run.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The source could not be reached or read.
    #[error("Source unavailable: {source_id} - {message}")]
    Unavailable {
        /// Identifier of the failing source
        source_id: String,
        /// Underlying reason
        message: String,
    },

    /// The source answered but the payload did not have the expected shape.
    #[error("Malformed payload from {source_id}: {message}")]
    Malformed { source_id: String, message: String },

    /// The upstream API reported an application-level error status.
    #[error("Upstream status {status}: {message}")]
    UpstreamStatus { status: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV decode error: {0}")]
    Csv(#[from] csv::Error),
}

impl FeedError {
    pub fn malformed(source_id: &str, message: impl Into<String>) -> Self {
        FeedError::Malformed {
            source_id: source_id.to_string(),
            message: message.into(),
        }
    }

    pub fn unavailable(source_id: &str, message: impl Into<String>) -> Self {
        FeedError::Unavailable {
            source_id: source_id.to_string(),
            message: message.into(),
        }
    }
}
