//! Mailchimp Marketing API integration
//!
//! This module provides:
//! - The [`MailchimpApi`] seam every remote call goes through
//! - A blocking HTTP implementation over ureq
//! - Response types for the endpoints the sync client reads

mod http;

pub use http::HttpApi;

use anyhow::Result;
use serde_json::Value;

/// Raw access to the Mailchimp API
///
/// Paths are relative to the API root (`lists/{id}/members`, `batches`).
/// Non-success responses are returned as errors; an empty response body
/// decodes to `Value::Null`.
pub trait MailchimpApi: Send + Sync {
    /// Issue a GET with the given query parameters
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value>;

    /// Issue a POST with a JSON body
    fn post(&self, path: &str, body: &Value) -> Result<Value>;
}

/// Mailchimp API response types
pub mod types {
    use serde::{Deserialize, Serialize};

    use crate::models::{BatchOperation, MemberStatus};

    /// One page of `GET lists/{id}/members`
    #[derive(Debug, Deserialize)]
    pub struct MembersPage {
        #[serde(default)]
        pub members: Vec<MemberEntry>,
        pub total_items: u64,
    }

    /// Member as returned by the API (only the fields sync reads)
    #[derive(Debug, Deserialize)]
    pub struct MemberEntry {
        pub email_address: String,
        pub status: MemberStatus,
        #[serde(default)]
        pub tags: Vec<TagEntry>,
    }

    /// Tag reference attached to a member
    #[derive(Debug, Deserialize)]
    pub struct TagEntry {
        pub name: String,
    }

    /// One page of `GET lists/{id}/segments`
    #[derive(Debug, Deserialize)]
    pub struct SegmentsPage {
        #[serde(default)]
        pub segments: Vec<SegmentEntry>,
        pub total_items: u64,
    }

    /// Segment as returned by the API
    #[derive(Debug, Deserialize)]
    pub struct SegmentEntry {
        pub id: RemoteId,
        pub name: String,
        #[serde(default)]
        pub member_count: u64,
    }

    /// Identifier the API may send as a number or a string
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum RemoteId {
        Number(u64),
        Text(String),
    }

    impl std::fmt::Display for RemoteId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Number(n) => write!(f, "{}", n),
                Self::Text(s) => f.write_str(s),
            }
        }
    }

    /// Body of `POST batches`
    #[derive(Debug, Serialize)]
    pub struct CreateBatchRequest<'a> {
        pub operations: &'a [BatchOperation],
    }

    /// Problem document returned with error responses
    #[derive(Debug, Default, Deserialize)]
    pub struct ProblemDocument {
        #[serde(default)]
        pub title: String,
        #[serde(default)]
        pub detail: String,
    }
}
