//! Builders for list-scoped batch operations
//!
//! Pure functions: no I/O, same input gives the same operation.

use serde_json::json;

use crate::models::{BatchOperation, HttpMethod, Person, SubscriberId};

/// Builds batch operations scoped under one list
#[derive(Debug, Clone)]
pub struct OperationBuilder {
    list_id: String,
}

impl OperationBuilder {
    pub fn new(list_id: impl Into<String>) -> Self {
        Self {
            list_id: list_id.into(),
        }
    }

    /// Create an empty static segment
    pub fn create_segment_operation(&self, name: &str) -> BatchOperation {
        BatchOperation {
            method: HttpMethod::Post,
            path: format!("lists/{}/segments", self.list_id),
            body: Some(json!({ "name": name, "static_segment": [] }).to_string()),
        }
    }

    /// Add members to an existing static segment
    pub fn update_segment_operation(&self, segment_id: &str, emails: &[String]) -> BatchOperation {
        BatchOperation {
            method: HttpMethod::Post,
            path: format!("lists/{}/segments/{}", self.list_id, segment_id),
            body: Some(json!({ "members_to_add": emails }).to_string()),
        }
    }

    /// Remove a member from the list
    pub fn delete_operation(&self, email: &str) -> BatchOperation {
        BatchOperation {
            method: HttpMethod::Delete,
            path: format!(
                "lists/{}/members/{}",
                self.list_id,
                SubscriberId::from_email(email)
            ),
            body: None,
        }
    }

    /// Add a person to the list as subscribed
    pub fn subscribe_operation(&self, person: &Person) -> BatchOperation {
        let body = json!({
            "email_address": person.email,
            "status": "subscribed",
            "merge_fields": {
                "FNAME": person.first_name.as_deref().unwrap_or_default(),
                "LNAME": person.last_name.as_deref().unwrap_or_default(),
            }
        });

        BatchOperation {
            method: HttpMethod::Post,
            path: format!("lists/{}/members", self.list_id),
            body: Some(body.to_string()),
        }
    }
}
