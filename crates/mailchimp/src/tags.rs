//! Direct (non-batched) member tag updates

use anyhow::Result;
use std::sync::Arc;

use crate::gateway::RemoteListGateway;
use crate::logging::SyncLogger;
use crate::models::{SubscriberId, TagUpdate};

/// Attaches or detaches tags on a single member
///
/// The member is addressed by its [`SubscriberId`], so the raw email never
/// appears in the request path. The remote side applies tags synchronously.
pub struct TagUpdater {
    gateway: Arc<RemoteListGateway>,
    logger: Arc<dyn SyncLogger>,
}

impl TagUpdater {
    pub fn new(gateway: Arc<RemoteListGateway>, logger: Arc<dyn SyncLogger>) -> Self {
        Self { gateway, logger }
    }

    pub fn update_tags(&self, email: &str, tags: &[TagUpdate]) -> Result<()> {
        let subscriber_id = SubscriberId::from_email(email);

        let names: Vec<String> = tags
            .iter()
            .map(|tag| format!("{} ({})", tag.name, tag.status.as_str()))
            .collect();
        self.logger.info(&format!(
            "mailchimp: {}, tags of member {}: {}",
            self.gateway.list_id(),
            subscriber_id,
            names.join(", ")
        ));

        self.gateway.create_member_tags(&subscriber_id, tags)
    }
}
