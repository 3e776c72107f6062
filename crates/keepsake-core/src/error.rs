//! Error types for Keepsake.

/// Failure reported by a [`SegmentStore`](crate::store::SegmentStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying storage engine failed.
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An in-process lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Wrap any backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// A stored row that could not be mapped back to a
/// [`SegmentRow`](crate::models::SegmentRow).
///
/// Reported per row so readers can drop only the group it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed segment row {id} in group {group_id}: {reason}")]
pub struct DecodeError {
    pub id: String,
    pub group_id: String,
    pub reason: String,
}

/// Failure while assembling a single group into a memory.
#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    #[error("group {0} has no segment rows")]
    Empty(String),

    #[error("group {group_id}: timestamp {value} is out of range")]
    TimestampOutOfRange { group_id: String, value: i64 },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Errors surfaced by [`MemoryService`](crate::service::MemoryService).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Group(#[from] GroupError),
}

/// Rejected [`SplitLimits`](crate::split::SplitLimits).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LimitsError {
    #[error("max_chars must be > 0")]
    ZeroMax,

    #[error("min_chars ({min_chars}) must be smaller than max_chars ({max_chars})")]
    MinNotBelowMax { min_chars: usize, max_chars: usize },
}
