//! Batch operation and batch job models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// HTTP method of a batched operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation inside a batch request
///
/// `path` is relative to the API root and always scoped under a list.
/// `body` is already serialized JSON, which is what the batches endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOperation {
    pub method: HttpMethod,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl fmt::Display for BatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        if let Some(body) = &self.body {
            write!(f, " {}", body)?;
        }
        Ok(())
    }
}

/// Processing state of a remote batch job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BatchStatus {
    Pending,
    Preprocessing,
    Started,
    Finalizing,
    Finished,
    Other(String),
}

impl BatchStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Preprocessing => "preprocessing",
            Self::Started => "started",
            Self::Finalizing => "finalizing",
            Self::Finished => "finished",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for BatchStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "preprocessing" => Self::Preprocessing,
            "started" => Self::Started,
            "finalizing" => Self::Finalizing,
            "finished" => Self::Finished,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for BatchStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<BatchStatus> for String {
    fn from(status: BatchStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A batch job as reported by `POST batches` and `GET batches/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct BatchJob {
    pub id: String,
    pub status: BatchStatus,
    #[serde(default)]
    pub total_operations: u64,
    #[serde(default)]
    pub finished_operations: u64,
    #[serde(default)]
    pub errored_operations: u64,
    /// Archive with the per-operation responses, once finished
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub response_body_url: Option<String>,
    #[serde(default, deserialize_with = "timestamp_or_empty")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp_or_empty")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl BatchJob {
    /// One-line description of when the batch ran and where its responses are
    pub fn completion_details(&self) -> String {
        let format = |ts: Option<DateTime<Utc>>| {
            ts.map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".to_string())
        };
        format!(
            "submitted_at: {}, completed_at: {}, response_body_url: {}",
            format(self.submitted_at),
            format(self.completed_at),
            self.response_body_url.as_deref().unwrap_or("-")
        )
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            total_operations: self.total_operations,
            finished_operations: self.finished_operations,
            errored_operations: self.errored_operations,
        }
    }
}

/// Outcome counts of a finished batch
///
/// Errored operations are reported here, not raised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total_operations: u64,
    pub finished_operations: u64,
    pub errored_operations: u64,
}

impl BatchSummary {
    pub fn has_errors(&self) -> bool {
        self.errored_operations > 0
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total_operations: {}, finished_operations: {}, errored_operations: {}",
            self.total_operations, self.finished_operations, self.errored_operations
        )
    }
}

// Mailchimp reports unset strings as "" rather than omitting them
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

// Unparseable timestamps are dropped rather than failing the whole poll
fn timestamp_or_empty<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = empty_string_as_none(deserializer)?;
    Ok(value
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_without_body_omits_field() {
        let op = BatchOperation {
            method: HttpMethod::Delete,
            path: "lists/abc/members/123".to_string(),
            body: None,
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"method": "DELETE", "path": "lists/abc/members/123"})
        );
    }

    #[test]
    fn test_parse_running_batch() {
        let json = r#"{
            "id": "123abc",
            "status": "started",
            "total_operations": 10,
            "finished_operations": 4,
            "errored_operations": 0,
            "submitted_at": "2024-03-01T10:00:00+00:00",
            "completed_at": "",
            "response_body_url": "",
            "_links": []
        }"#;

        let job: BatchJob = serde_json::from_str(json).unwrap();
        assert_eq!(job.id, "123abc");
        assert_eq!(job.status, BatchStatus::Started);
        assert!(job.submitted_at.is_some());
        assert!(job.completed_at.is_none());
        assert!(job.response_body_url.is_none());
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let status = BatchStatus::from("queued");
        assert_eq!(status, BatchStatus::Other("queued".to_string()));
        assert_eq!(status.to_string(), "queued");
        assert!(!status.is_finished());
    }

    #[test]
    fn test_summary_reports_errors() {
        let summary = BatchSummary {
            total_operations: 3,
            finished_operations: 3,
            errored_operations: 1,
        };
        assert!(summary.has_errors());
        assert!(!BatchSummary::default().has_errors());
    }

    #[test]
    fn test_bad_timestamp_is_dropped() {
        let json = r#"{
            "id": "b1",
            "status": "finished",
            "submitted_at": "yesterday",
            "completed_at": "2024-03-01T10:05:00+00:00",
            "response_body_url": "https://example.com/b1.tar.gz"
        }"#;

        let job: BatchJob = serde_json::from_str(json).unwrap();
        assert!(job.submitted_at.is_none());
        assert!(job.completed_at.is_some());
        assert_eq!(
            job.completion_details(),
            "submitted_at: -, completed_at: 2024-03-01T10:05:00+00:00, response_body_url: https://example.com/b1.tar.gz"
        );
    }
}
