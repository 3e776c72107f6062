//! Core data models for Keepsake.
//!
//! A user-authored memory is stored as one or more [`SegmentRow`]s sharing a
//! `group_id`. At read time the rows are folded back into a single
//! [`Memory`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One bounded slice of an original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Shared by every segment produced from one text.
    pub group_id: String,
    /// 1-based position within the group.
    pub position: u32,
    /// Total number of segments in the group.
    pub segment_count: u32,
    pub content: String,
}

/// A persisted segment row.
///
/// Every row of a group carries its own full copy of the memory's metadata.
/// The duplication is intentional: reads never need a join against a
/// group-level table. Only `content`, `position` and (for positions after
/// the first) the `" (Part i/n)"` title suffix differ between rows of one
/// group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRow {
    pub id: String,
    pub group_id: String,
    pub position: u32,
    pub segment_count: u32,
    pub content: String,
    pub title: String,
    pub tags: Vec<String>,
    pub date: Option<String>,
    pub place: Option<String>,
    pub owner_id: String,
    pub visibility: String,
    pub media: Option<Vec<String>>,
    /// Unix seconds.
    pub created_at: i64,
    /// Unix seconds.
    pub updated_at: i64,
}

impl SegmentRow {
    /// Project this row onto the segment it stores.
    pub fn to_segment(&self) -> Segment {
        Segment {
            group_id: self.group_id.clone(),
            position: self.position,
            segment_count: self.segment_count,
            content: self.content.clone(),
        }
    }
}

/// A memory reassembled from all rows of one group.
///
/// Synthesized fresh on every read; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Memory {
    pub group_id: String,
    /// Title with any part suffix removed.
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub date: Option<String>,
    pub place: Option<String>,
    pub owner_id: String,
    pub visibility: String,
    pub media: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    /// Latest `updated_at` across the group's rows.
    pub updated_at: DateTime<Utc>,
    pub segment_count: u32,
    /// Integrity problems found while reassembling. Empty for a healthy group.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub integrity_issues: Vec<String>,
}

impl Memory {
    /// Whether this memory was rebuilt from an incomplete or inconsistent group.
    pub fn is_degraded(&self) -> bool {
        !self.integrity_issues.is_empty()
    }
}

/// Input to [`MemoryService::save_memory`](crate::service::MemoryService::save_memory).
#[derive(Debug, Clone, Default)]
pub struct MemoryDraft {
    pub owner_id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub date: Option<String>,
    pub place: Option<String>,
    pub visibility: String,
    pub media: Option<Vec<String>>,
    /// Generated when absent.
    pub group_id: Option<String>,
}
