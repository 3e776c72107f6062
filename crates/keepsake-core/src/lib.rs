//! # Keepsake Core
//!
//! Runtime-agnostic logic for Keepsake: the segment data model, the
//! boundary-preserving splitter, reconstruction, integrity validation,
//! the store abstraction, and the memory retrieval service.
//!
//! This crate contains no tokio, sqlx, or filesystem I/O. Storage
//! backends live behind the [`store::SegmentStore`] trait.
//!
//! ## Data Flow
//!
//! ```text
//! text ──▶ split ──▶ [Segment; N] ──▶ SegmentStore (one row per segment)
//!                                          │
//!   Memory ◀── reconstruct + validate ◀────┘  (grouped by group_id)
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | `Segment`, `SegmentRow`, `Memory`, `MemoryDraft` |
//! | [`split`] | Paragraph → sentence → word splitter |
//! | [`reconstruct`] | Position-ordered reassembly |
//! | [`validate`] | Advisory integrity checks over a segment set |
//! | [`title`] | `" (Part i/n)"` title suffix convention |
//! | [`store`] | `SegmentStore` trait and in-memory backend |
//! | [`service`] | List / get / delete / save of logical memories |
//! | [`error`] | Typed errors |

pub mod error;
pub mod models;
pub mod reconstruct;
pub mod service;
pub mod split;
pub mod store;
pub mod title;
pub mod validate;

pub use error::{DecodeError, GroupError, LimitsError, ServiceError, StoreError};
pub use models::{Memory, MemoryDraft, Segment, SegmentRow};
pub use reconstruct::{reconstruct, reconstruct_checked, Reconstruction};
pub use service::MemoryService;
pub use split::{split_text, split_text_with, SplitLimits};
pub use validate::{validate, ValidationReport};
