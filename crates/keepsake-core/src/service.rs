//! Memory retrieval service.
//!
//! Ties persisted segment rows back into logical [`Memory`] values for read
//! and delete, and owns the write path that splits a draft into rows.
//!
//! # Reads
//!
//! 1. Fetch every row for the owner (ordered by group, then position).
//! 2. Bucket rows by `group_id`.
//! 3. Per group: sort by position, validate (log, never fail), reconstruct,
//!    strip the part suffix from the title, take shared metadata from the
//!    first row and `updated_at` as the latest across rows.
//! 4. Sort memories by `created_at`, newest first.
//!
//! A group that cannot be assembled, including one holding a row the store
//! could not decode, is logged and skipped so one bad group never hides the
//! rest of the list.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{GroupError, ServiceError};
use crate::models::{Memory, MemoryDraft, Segment, SegmentRow};
use crate::reconstruct::reconstruct_checked;
use crate::split::{split_text_with, SplitLimits};
use crate::store::{FetchedRow, SegmentStore};
use crate::title::{logical_title, part_title};
use crate::validate::{validate, ValidationReport};

/// Read, write and delete memories stored as segment rows in `S`.
pub struct MemoryService<S> {
    store: S,
    limits: SplitLimits,
}

impl<S: SegmentStore> MemoryService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            limits: SplitLimits::default(),
        }
    }

    /// Use non-default split limits for [`save_memory`](Self::save_memory).
    pub fn with_limits(mut self, limits: SplitLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All memories of `owner_id`, newest first.
    pub async fn list_memories(&self, owner_id: &str) -> Result<Vec<Memory>, ServiceError> {
        let rows = self.store.fetch_segments(owner_id, None).await?;
        let row_count = rows.len();
        let groups = bucket_by_group(rows);

        let mut memories = Vec::with_capacity(groups.len());
        for (group_id, rows) in groups {
            match assemble(&group_id, rows) {
                Ok(memory) => memories.push(memory),
                Err(e) => {
                    tracing::error!(owner_id, group_id = %group_id, error = %e, "skipping memory");
                }
            }
        }

        memories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tracing::debug!(owner_id, rows = row_count, memories = memories.len(), "listed memories");
        Ok(memories)
    }

    /// One memory, or `None` when the group has no rows for this owner.
    pub async fn get_memory(
        &self,
        owner_id: &str,
        group_id: &str,
    ) -> Result<Option<Memory>, ServiceError> {
        let rows = self.store.fetch_segments(owner_id, Some(group_id)).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(assemble(group_id, rows)?))
    }

    /// Delete every row of a group. Returns the number of rows removed.
    pub async fn delete_memory(&self, owner_id: &str, group_id: &str) -> Result<u64, ServiceError> {
        let removed = self.store.delete_group(owner_id, group_id).await?;
        tracing::info!(owner_id, group_id, removed, "deleted memory");
        Ok(removed)
    }

    /// Integrity report for the stored rows of one group.
    pub async fn check_memory(
        &self,
        owner_id: &str,
        group_id: &str,
    ) -> Result<Option<ValidationReport>, ServiceError> {
        let rows = self.store.fetch_segments(owner_id, Some(group_id)).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        let rows = rows
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(GroupError::from)?;
        let segments: Vec<Segment> = rows.iter().map(SegmentRow::to_segment).collect();
        Ok(Some(validate(&segments)))
    }

    /// Split a draft into rows and persist them in one store call.
    ///
    /// Rows after the first get a `" (Part i/n)"` title suffix. Returns the
    /// rows as written.
    pub async fn save_memory(&self, draft: MemoryDraft) -> Result<Vec<SegmentRow>, ServiceError> {
        let segments = split_text_with(&draft.content, draft.group_id.as_deref(), &self.limits);
        let now = Utc::now().timestamp();

        let rows: Vec<SegmentRow> = segments
            .into_iter()
            .map(|s| SegmentRow {
                id: Uuid::new_v4().to_string(),
                title: part_title(&draft.title, s.position, s.segment_count),
                group_id: s.group_id,
                position: s.position,
                segment_count: s.segment_count,
                content: s.content,
                tags: draft.tags.clone(),
                date: draft.date.clone(),
                place: draft.place.clone(),
                owner_id: draft.owner_id.clone(),
                visibility: draft.visibility.clone(),
                media: draft.media.clone(),
                created_at: now,
                updated_at: now,
            })
            .collect();

        self.store.insert_segments(&rows).await?;
        tracing::info!(
            owner_id = %draft.owner_id,
            group_id = %rows[0].group_id,
            segments = rows.len(),
            "saved memory"
        );
        Ok(rows)
    }
}

fn bucket_by_group(rows: Vec<FetchedRow>) -> BTreeMap<String, Vec<FetchedRow>> {
    let mut groups: BTreeMap<String, Vec<FetchedRow>> = BTreeMap::new();
    for row in rows {
        let group_id = match &row {
            Ok(r) => r.group_id.clone(),
            Err(e) => e.group_id.clone(),
        };
        groups.entry(group_id).or_default().push(row);
    }
    groups
}

/// Fold one group's rows into a [`Memory`].
fn assemble(group_id: &str, rows: Vec<FetchedRow>) -> Result<Memory, GroupError> {
    let mut rows = rows.into_iter().collect::<Result<Vec<_>, _>>()?;
    rows.sort_by_key(|r| r.position);
    let first = rows
        .first()
        .ok_or_else(|| GroupError::Empty(group_id.to_string()))?;

    let segments: Vec<Segment> = rows.iter().map(SegmentRow::to_segment).collect();
    let (content, issues) = reconstruct_checked(&segments).into_parts();
    if !issues.is_empty() {
        tracing::warn!(group_id, ?issues, "memory rebuilt from an incomplete segment group");
    }

    let latest_update = rows
        .iter()
        .map(|r| r.updated_at)
        .max()
        .unwrap_or(first.updated_at);

    Ok(Memory {
        group_id: group_id.to_string(),
        title: logical_title(&first.title, first.segment_count).to_string(),
        content,
        tags: first.tags.clone(),
        date: first.date.clone(),
        place: first.place.clone(),
        owner_id: first.owner_id.clone(),
        visibility: first.visibility.clone(),
        media: first.media.clone(),
        created_at: timestamp(group_id, first.created_at)?,
        updated_at: timestamp(group_id, latest_update)?,
        segment_count: first.segment_count,
        integrity_issues: issues,
    })
}

fn timestamp(group_id: &str, secs: i64) -> Result<DateTime<Utc>, GroupError> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| GroupError::TimestampOutOfRange {
        group_id: group_id.to_string(),
        value: secs,
    })
}
