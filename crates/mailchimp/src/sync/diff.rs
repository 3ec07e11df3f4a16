//! Diffing remote audience state against local desired state
//!
//! Emails are compared case-insensitively, matching how Mailchimp keys members.

use std::collections::HashSet;

use crate::models::{MemberRecord, Person, SegmentRecord};

/// Member changes needed to make the audience match the local list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipDiff {
    /// People present locally but not remotely
    pub to_subscribe: Vec<Person>,
    /// Remote emails with no local counterpart
    pub to_delete: Vec<String>,
}

impl MembershipDiff {
    /// Compute the diff, keeping input order and dropping duplicate emails
    pub fn compute(remote: &[MemberRecord], desired: &[Person]) -> Self {
        let remote_emails: HashSet<String> = remote
            .iter()
            .map(|m| m.email_address.to_lowercase())
            .collect();
        let desired_emails: HashSet<String> =
            desired.iter().map(|p| p.email.to_lowercase()).collect();

        let mut seen = HashSet::new();
        let to_subscribe = desired
            .iter()
            .filter(|p| {
                let email = p.email.to_lowercase();
                !remote_emails.contains(&email) && seen.insert(email)
            })
            .cloned()
            .collect();

        let mut seen = HashSet::new();
        let to_delete = remote
            .iter()
            .filter(|m| {
                let email = m.email_address.to_lowercase();
                !desired_emails.contains(&email) && seen.insert(email)
            })
            .map(|m| m.email_address.clone())
            .collect();

        Self {
            to_subscribe,
            to_delete,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_subscribe.is_empty() && self.to_delete.is_empty()
    }
}

/// Segments that must be created so every desired segment exists remotely
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentDiff {
    pub to_create: Vec<String>,
}

impl SegmentDiff {
    pub fn compute(remote: &[SegmentRecord], desired: &[String]) -> Self {
        let existing: HashSet<&str> = remote.iter().map(|s| s.name.as_str()).collect();

        let mut seen = HashSet::new();
        let to_create = desired
            .iter()
            .filter(|name| !existing.contains(name.as_str()) && seen.insert(name.as_str()))
            .cloned()
            .collect();

        Self { to_create }
    }

    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty()
    }
}
