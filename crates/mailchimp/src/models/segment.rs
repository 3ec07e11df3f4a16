//! Audience segment model

use serde::Serialize;

/// A named segment of the audience
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentRecord {
    /// Segment ID, normalized to a string
    pub id: String,
    pub name: String,
    pub member_count: u64,
}

impl SegmentRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, member_count: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            member_count,
        }
    }
}
