//! Mailchimp crate - Audience synchronization client
//!
//! This crate reconciles a local membership list with a Mailchimp audience:
//! - Remote API seam and the blocking ureq implementation
//! - Offset/count paging over members and segments
//! - Batch operation builders, submission and completion polling
//! - Direct member tag updates
//! - Membership diffing and a full sync run
//!
//! Everything is synchronous; callers run it on a worker thread of their own.

pub mod api;
pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod sync;
pub mod tags;

pub use api::{HttpApi, MailchimpApi};
pub use batch::{BatchCompletionPoller, BatchExecutor, OperationBuilder, Sleeper, ThreadSleeper};
pub use client::MailchimpClient;
pub use self::config::MailchimpConfig;
pub use error::{ApiError, BatchTimeoutError, ConfigError};
pub use gateway::RemoteListGateway;
pub use logging::{LogSyncLogger, MemorySyncLogger, SyncLogger};
pub use models::{
    BatchJob, BatchOperation, BatchStatus, BatchSummary, HttpMethod, MemberRecord, MemberStatus,
    Person, SegmentRecord, SubscriberId, TagStatus, TagUpdate,
};
pub use sync::{DesiredState, MembershipDiff, PageWindow, Pager, SegmentDiff, SyncStats, synchronize};
pub use tags::TagUpdater;
