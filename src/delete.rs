//! Memory deletion (`keep delete`).
//!
//! Removes every segment row of a group in a single statement. Deleting a
//! group that is already gone succeeds and reports zero rows.

use anyhow::Result;

use crate::config::Config;
use crate::service;

/// CLI entry point for `keep delete`.
pub async fn run_delete(config: &Config, owner_id: &str, group_id: &str) -> Result<()> {
    let service = service::open_service(config).await?;
    let result = service.delete_memory(owner_id, group_id).await;
    service::close(service).await;

    match result? {
        0 => println!("nothing to delete for {}", group_id),
        n => println!("deleted {} ({} segment row(s))", group_id, n),
    }
    Ok(())
}
