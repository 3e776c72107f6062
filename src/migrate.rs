//! Database schema migrations (idempotent).
//!
//! One table, `segments`, holds one row per segment. Entity metadata is
//! repeated on every row of a group so reads never join.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;

/// Connect and create the schema. Safe to run repeatedly.
pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    apply_schema(&pool).await?;
    pool.close().await;
    Ok(())
}

/// Create tables and indexes on an open pool.
pub async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS segments (
            id TEXT PRIMARY KEY,
            group_id TEXT NOT NULL,
            position INTEGER NOT NULL,
            segment_count INTEGER NOT NULL,
            content TEXT NOT NULL,
            title TEXT NOT NULL,
            tags_json TEXT NOT NULL DEFAULT '[]',
            entry_date TEXT,
            place TEXT,
            owner_id TEXT NOT NULL,
            visibility TEXT NOT NULL DEFAULT 'private',
            media_json TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            UNIQUE(owner_id, group_id, position)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // The UNIQUE constraint already indexes (owner_id, group_id, position).
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_segments_created_at ON segments(created_at DESC)")
        .execute(pool)
        .await?;

    Ok(())
}
