//! Domain models for audience entities

mod batch;
mod member;
mod segment;
mod subscriber;

pub use batch::{BatchJob, BatchOperation, BatchStatus, BatchSummary, HttpMethod};
pub use member::{MemberRecord, MemberStatus, Person, TagStatus, TagUpdate};
pub use segment::SegmentRecord;
pub use subscriber::SubscriberId;
