//! Errors callers may want to match on
//!
//! Transport and decode failures are plain `anyhow` errors with context.

use crate::models::BatchStatus;

/// The batch did not reach `finished` within the polling budget
#[derive(Debug, Clone, thiserror::Error)]
#[error("Batch {batch_id} did not finish in due time, last status: {status}")]
pub struct BatchTimeoutError {
    pub batch_id: String,
    pub status: BatchStatus,
}

/// Invalid or missing client configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("List ID must not be empty")]
    MissingListId,
    #[error("API key must not be empty")]
    MissingApiKey,
    #[error("API key has no datacenter suffix (expected `<key>-<dc>`)")]
    MissingDatacenter,
    #[error("Page size must be positive")]
    InvalidPageSize,
}

/// Non-success response from the Mailchimp API
///
/// Mailchimp answers errors with a problem document (`title`, `detail`).
#[derive(Debug, Clone, thiserror::Error)]
#[error("Mailchimp API error {status} on {method} {path}: {title} {detail}")]
pub struct ApiError {
    pub status: u16,
    pub method: &'static str,
    pub path: String,
    pub title: String,
    pub detail: String,
}
