//! In-memory [`SegmentStore`] implementation for tests and embedding.
//!
//! Rows live in a `Vec` behind `std::sync::RwLock`.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::SegmentRow;

use super::{FetchedRow, SegmentStore};

/// In-memory segment store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rows: RwLock<Vec<SegmentRow>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows across all owners.
    pub fn len(&self) -> Result<usize, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl SegmentStore for InMemoryStore {
    async fn insert_segments(&self, rows: &[SegmentRow]) -> Result<(), StoreError> {
        let mut stored = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        stored.extend_from_slice(rows);
        Ok(())
    }

    async fn fetch_segments(
        &self,
        owner_id: &str,
        group_id: Option<&str>,
    ) -> Result<Vec<FetchedRow>, StoreError> {
        let stored = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        let mut rows: Vec<SegmentRow> = stored
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .filter(|r| group_id.map_or(true, |g| r.group_id == g))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.group_id
                .cmp(&b.group_id)
                .then(a.position.cmp(&b.position))
        });
        Ok(rows.into_iter().map(Ok).collect())
    }

    async fn delete_group(&self, owner_id: &str, group_id: &str) -> Result<u64, StoreError> {
        let mut stored = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        let before = stored.len();
        stored.retain(|r| !(r.owner_id == owner_id && r.group_id == group_id));
        Ok((before - stored.len()) as u64)
    }
}
