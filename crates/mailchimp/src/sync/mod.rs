//! Sync engine for reconciling the audience with local state
//!
//! Paging over remote collections, diffing against desired state, and the
//! full sync run that submits the resulting batches.

mod diff;
mod pager;
mod run;

pub use diff::{MembershipDiff, SegmentDiff};
pub use pager::{PageWindow, Pager};
pub use run::{DesiredState, SyncStats, synchronize};
