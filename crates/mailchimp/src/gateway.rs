//! Typed access to one audience's members and segments

use anyhow::{Context, Result};
use serde_json::json;
use std::sync::Arc;

use crate::api::MailchimpApi;
use crate::api::types::{MembersPage, SegmentsPage};
use crate::models::{MemberRecord, SegmentRecord, SubscriberId, TagUpdate};
use crate::sync::Pager;

/// Gateway to the list-scoped endpoints of one audience
pub struct RemoteListGateway {
    api: Arc<dyn MailchimpApi>,
    list_id: String,
    pager: Pager,
}

impl RemoteListGateway {
    pub fn new(api: Arc<dyn MailchimpApi>, list_id: impl Into<String>, pager: Pager) -> Self {
        Self {
            api,
            list_id: list_id.into(),
            pager,
        }
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    /// Fetch every member of the audience
    pub fn fetch_members(&self) -> Result<Vec<MemberRecord>> {
        let path = format!("lists/{}/members", self.list_id);

        self.pager.page(|list, window| {
            let body = self.api.get(&path, &window.query())?;
            let page: MembersPage = serde_json::from_value(body)
                .with_context(|| format!("Failed to parse members page at offset {}", window.offset))?;

            list.extend(page.members.into_iter().map(|entry| MemberRecord {
                email_address: entry.email_address,
                status: entry.status,
                tags: entry.tags.into_iter().map(|tag| tag.name).collect(),
            }));

            Ok(page.total_items)
        })
    }

    /// Fetch every segment of the audience
    pub fn fetch_segments(&self) -> Result<Vec<SegmentRecord>> {
        let path = format!("lists/{}/segments", self.list_id);

        self.pager.page(|list, window| {
            let body = self.api.get(&path, &window.query())?;
            let page: SegmentsPage = serde_json::from_value(body)
                .with_context(|| format!("Failed to parse segments page at offset {}", window.offset))?;

            list.extend(page.segments.into_iter().map(|entry| SegmentRecord {
                id: entry.id.to_string(),
                name: entry.name,
                member_count: entry.member_count,
            }));

            Ok(page.total_items)
        })
    }

    /// Add or remove tags on a single member
    pub fn create_member_tags(&self, subscriber_id: &SubscriberId, tags: &[TagUpdate]) -> Result<()> {
        let path = format!("lists/{}/members/{}/tags", self.list_id, subscriber_id);
        self.api
            .post(&path, &json!({ "tags": tags }))
            .with_context(|| format!("Failed to update tags of member {}", subscriber_id))?;
        Ok(())
    }
}
