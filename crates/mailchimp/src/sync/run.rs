//! Full audience sync run

use anyhow::Result;
use log::{info, warn};
use serde::Deserialize;

use super::{MembershipDiff, SegmentDiff};
use crate::client::MailchimpClient;
use crate::models::{BatchSummary, Person};

/// Local state the audience should end up matching
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DesiredState {
    #[serde(default)]
    pub people: Vec<Person>,
    /// Segment names that must exist
    #[serde(default)]
    pub segments: Vec<String>,
}

/// Statistics from a sync run
#[derive(Debug, Default, Clone)]
pub struct SyncStats {
    /// Number of members fetched from Mailchimp
    pub members_fetched: usize,
    /// Number of people submitted for subscription
    pub subscribed: usize,
    /// Number of members submitted for deletion
    pub deleted: usize,
    /// Number of segments submitted for creation
    pub segments_created: usize,
    /// Summaries of the batches that were submitted
    pub batches: Vec<BatchSummary>,
    /// Duration of the sync run
    pub duration_ms: u64,
}

impl SyncStats {
    /// Operations that failed on the remote side across all batches
    pub fn errored_operations(&self) -> u64 {
        self.batches.iter().map(|b| b.errored_operations).sum()
    }
}

/// Make the audience match the desired state
///
/// Subscribes missing people, deletes members with no local counterpart and
/// creates missing segments, one batch each. A batch timeout or transport
/// error aborts the run; errored operations are only counted.
pub fn synchronize(client: &MailchimpClient, desired: &DesiredState) -> Result<SyncStats> {
    let start = std::time::Instant::now();
    let mut stats = SyncStats::default();

    // 1. Diff members
    let members = client.fetch_members()?;
    stats.members_fetched = members.len();
    let diff = MembershipDiff::compute(&members, &desired.people);

    // 2. Subscribe and delete
    if let Some(summary) = client.subscribe(&diff.to_subscribe)? {
        stats.subscribed = diff.to_subscribe.len();
        stats.batches.push(summary);
    }
    if let Some(summary) = client.delete(&diff.to_delete)? {
        stats.deleted = diff.to_delete.len();
        stats.batches.push(summary);
    }

    // 3. Create missing segments
    if !desired.segments.is_empty() {
        let segments = client.fetch_segments()?;
        let segment_diff = SegmentDiff::compute(&segments, &desired.segments);
        if let Some(summary) = client.create_segments(&segment_diff.to_create)? {
            stats.segments_created = segment_diff.to_create.len();
            stats.batches.push(summary);
        }
    }

    stats.duration_ms = start.elapsed().as_millis() as u64;

    info!(
        "Synced list {}: {} fetched, {} subscribed, {} deleted, {} segments created in {}ms",
        client.list_id(),
        stats.members_fetched,
        stats.subscribed,
        stats.deleted,
        stats.segments_created,
        stats.duration_ms
    );
    if stats.errored_operations() > 0 {
        warn!(
            "Sync of list {} finished with {} errored operations",
            client.list_id(),
            stats.errored_operations()
        );
    }

    Ok(stats)
}
