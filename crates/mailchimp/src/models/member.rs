//! Audience member models

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Subscription status of an audience member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Subscribed,
    Unsubscribed,
    Cleaned,
    Pending,
    Transactional,
    Archived,
    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subscribed => "subscribed",
            Self::Unsubscribed => "unsubscribed",
            Self::Cleaned => "cleaned",
            Self::Pending => "pending",
            Self::Transactional => "transactional",
            Self::Archived => "archived",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A member of the remote audience, reduced to the fields sync cares about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberRecord {
    pub email_address: String,
    pub status: MemberStatus,
    /// Tag names attached to the member
    pub tags: BTreeSet<String>,
}

impl MemberRecord {
    pub fn new(email_address: impl Into<String>, status: MemberStatus) -> Self {
        Self {
            email_address: email_address.into(),
            status,
            tags: BTreeSet::new(),
        }
    }

    /// Builder method to set tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A local person to subscribe to the audience
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Person {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            first_name: None,
            last_name: None,
        }
    }

    /// Builder method to set first and last name
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }
}

/// Whether a tag is attached to or detached from a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagStatus {
    Active,
    Inactive,
}

impl TagStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// A single tag change sent with a member tag update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagUpdate {
    pub name: String,
    pub status: TagStatus,
}

impl TagUpdate {
    /// Attach the tag
    pub fn active(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TagStatus::Active,
        }
    }

    /// Detach the tag
    pub fn inactive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TagStatus::Inactive,
        }
    }
}
