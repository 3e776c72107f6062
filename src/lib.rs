//! # Keepsake
//!
//! **A local-first journal store that keeps long memories as bounded,
//! reassemblable segments.**
//!
//! A memory body of any length is split into size-bounded segments on
//! paragraph, sentence, or word boundaries. Each segment is stored as its
//! own SQLite row carrying a full copy of the memory's metadata. Reads
//! regroup the rows, check them for gaps, and rebuild the original text.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌───────────┐
//! │ keep add │──▶│   Splitter    │──▶│  SQLite   │
//! └──────────┘   │ para/sent/word│   │ segments  │
//!                └──────────────┘   └─────┬─────┘
//!                                         │
//!                ┌────────────────────────┘
//!                ▼
//!        ┌───────────────────┐     ┌──────────────────┐
//!        │ validate + rebuild │──▶ │ keep list / get  │
//!        └───────────────────┘     └──────────────────┘
//! ```
//!
//! The splitting, reconstruction, validation and retrieval logic lives in
//! [`keepsake_core`]; this crate adds configuration, the SQLite backend,
//! logging, and the `keep` CLI.
//!
//! ## Quick Start
//!
//! ```bash
//! keep init
//! keep add --owner alice --title "Summer" --file summer.md
//! keep list --owner alice
//! keep get --owner alice <group-id>
//! keep check --owner alice <group-id>
//! keep delete --owner alice <group-id>
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`db`] | SQLite connection pool with WAL mode |
//! | [`migrate`] | Schema creation (idempotent) |
//! | [`sqlite_store`] | `SegmentStore` over the `segments` table |
//! | [`service`] | Service construction from config |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`add`] | `keep add` |
//! | [`list`] | `keep list` |
//! | [`get`] | `keep get` |
//! | [`delete`] | `keep delete` |
//! | [`check`] | `keep check` |

pub mod add;
pub mod check;
pub mod config;
pub mod db;
pub mod delete;
pub mod get;
pub mod list;
pub mod logging;
pub mod migrate;
pub mod service;
pub mod sqlite_store;

pub use keepsake_core::{models, store};
