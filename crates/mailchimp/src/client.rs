//! Mailchimp synchronization client
//!
//! Entry point for callers: fetches the audience, submits batched changes
//! and updates member tags. All calls block until the remote side is done.

use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::{HttpApi, MailchimpApi};
use crate::batch::{BatchCompletionPoller, BatchExecutor, OperationBuilder, Sleeper, ThreadSleeper};
use crate::config::MailchimpConfig;
use crate::error::ConfigError;
use crate::gateway::RemoteListGateway;
use crate::logging::{LogSyncLogger, SyncLogger};
use crate::models::{BatchSummary, MemberRecord, Person, SegmentRecord, TagUpdate};
use crate::sync::Pager;
use crate::tags::TagUpdater;

/// Client bound to one Mailchimp audience
pub struct MailchimpClient {
    gateway: Arc<RemoteListGateway>,
    operations: OperationBuilder,
    executor: BatchExecutor,
    tags: TagUpdater,
}

impl MailchimpClient {
    /// Create a client talking HTTP to the datacenter in the config's API key
    pub fn new(config: &MailchimpConfig) -> Result<Self> {
        config.validate()?;
        let api = Arc::new(HttpApi::new(config)?);
        Self::with_parts(config, api, Arc::new(LogSyncLogger), Arc::new(ThreadSleeper))
    }

    /// Create a client over explicit collaborators
    pub fn with_parts(
        config: &MailchimpConfig,
        api: Arc<dyn MailchimpApi>,
        logger: Arc<dyn SyncLogger>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Result<Self> {
        if config.list_id.trim().is_empty() {
            return Err(ConfigError::MissingListId.into());
        }
        let pager = Pager::new(config.page_size)?;

        let gateway = Arc::new(RemoteListGateway::new(api.clone(), &config.list_id, pager));
        let poller =
            BatchCompletionPoller::new(api.clone(), sleeper, logger.clone(), config.poll_interval);
        let executor = BatchExecutor::new(api, &config.list_id, logger.clone(), poller);
        let tags = TagUpdater::new(gateway.clone(), logger);

        Ok(Self {
            gateway,
            operations: OperationBuilder::new(&config.list_id),
            executor,
            tags,
        })
    }

    pub fn list_id(&self) -> &str {
        self.gateway.list_id()
    }

    /// All members of the audience
    pub fn fetch_members(&self) -> Result<Vec<MemberRecord>> {
        self.gateway.fetch_members()
    }

    /// All segments of the audience
    pub fn fetch_segments(&self) -> Result<Vec<SegmentRecord>> {
        self.gateway.fetch_segments()
    }

    /// Create one empty static segment per name
    pub fn create_segments(&self, names: &[String]) -> Result<Option<BatchSummary>> {
        self.executor
            .execute(names, |name| self.operations.create_segment_operation(name))
    }

    /// Add members to segments, keyed by segment ID
    pub fn update_segments(
        &self,
        segments: &BTreeMap<String, Vec<String>>,
    ) -> Result<Option<BatchSummary>> {
        self.executor.execute(segments, |(segment_id, emails)| {
            self.operations.update_segment_operation(segment_id, emails)
        })
    }

    /// Remove members from the audience
    pub fn delete(&self, emails: &[String]) -> Result<Option<BatchSummary>> {
        self.executor
            .execute(emails, |email| self.operations.delete_operation(email))
    }

    /// Subscribe people to the audience
    pub fn subscribe(&self, people: &[Person]) -> Result<Option<BatchSummary>> {
        self.executor
            .execute(people, |person| self.operations.subscribe_operation(person))
    }

    /// Attach or detach tags on one member (not batched)
    pub fn update_tags(&self, email: &str, tags: &[TagUpdate]) -> Result<()> {
        self.tags.update_tags(email, tags)
    }
}
