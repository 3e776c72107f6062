//! Wiring of [`MemoryService`] onto the configured SQLite database.

use anyhow::Result;

use keepsake_core::MemoryService;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

/// Connect to the database and build a service using the configured limits.
pub async fn open_service(config: &Config) -> Result<MemoryService<SqliteStore>> {
    let limits = config.segmenting.limits()?;
    let pool = db::connect(config).await?;
    Ok(MemoryService::new(SqliteStore::new(pool)).with_limits(limits))
}

/// Close the pool behind `service`.
pub async fn close(service: MemoryService<SqliteStore>) {
    service.store().pool().close().await;
}
