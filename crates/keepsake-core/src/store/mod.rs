//! Storage abstraction for segment rows.
//!
//! The [`SegmentStore`] trait is the only seam between the retrieval
//! service and durable storage, enabling pluggable backends (SQLite in the
//! `keepsake` crate, in-memory for tests).
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use async_trait::async_trait;

use crate::error::{DecodeError, StoreError};
use crate::models::SegmentRow;

/// One fetched row, or the reason it could not be decoded.
pub type FetchedRow = Result<SegmentRow, DecodeError>;

/// Abstract storage backend for segment rows.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`insert_segments`](SegmentStore::insert_segments) | Persist the rows of one group |
/// | [`fetch_segments`](SegmentStore::fetch_segments) | Rows for an owner, optionally one group |
/// | [`delete_group`](SegmentStore::delete_group) | Remove every row of a group |
#[async_trait]
pub trait SegmentStore: Send + Sync {
    /// Persist rows. Backends should write them all or none.
    async fn insert_segments(&self, rows: &[SegmentRow]) -> Result<(), StoreError>;

    /// Fetch rows belonging to `owner_id`, restricted to `group_id` if given.
    ///
    /// Rows must come back ordered by `group_id`, then `position`. A row
    /// that cannot be decoded is returned as `Err` in its slot; the outer
    /// error is reserved for failures of the query itself.
    async fn fetch_segments(
        &self,
        owner_id: &str,
        group_id: Option<&str>,
    ) -> Result<Vec<FetchedRow>, StoreError>;

    /// Delete every row of `group_id` owned by `owner_id` in one operation.
    ///
    /// Returns the number of rows removed. Deleting an absent group
    /// removes nothing and is not an error.
    async fn delete_group(&self, owner_id: &str, group_id: &str) -> Result<u64, StoreError>;
}
