//! Memory listing (`keep list`).
//!
//! Shows every memory of an owner, newest first. Groups that fail integrity
//! checks are still listed and flagged; groups that cannot be assembled at
//! all are skipped with a logged error.

use anyhow::Result;

use keepsake_core::models::Memory;

use crate::config::Config;
use crate::get::format_ts_iso;
use crate::service;

/// All memories of `owner_id`, newest first.
pub async fn list_memories(config: &Config, owner_id: &str) -> Result<Vec<Memory>> {
    let service = service::open_service(config).await?;
    let result = service.list_memories(owner_id).await;
    service::close(service).await;
    Ok(result?)
}

/// CLI entry point for `keep list`.
pub async fn run_list(config: &Config, owner_id: &str, json: bool) -> Result<()> {
    let memories = list_memories(config, owner_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&memories)?);
        return Ok(());
    }

    if memories.is_empty() {
        println!("No memories.");
        return Ok(());
    }

    for memory in &memories {
        let flag = if memory.is_degraded() {
            "  [degraded]"
        } else {
            ""
        };
        println!(
            "{}  {}  {} ({} segment{}){}",
            format_ts_iso(&memory.created_at),
            memory.group_id,
            memory.title,
            memory.segment_count,
            if memory.segment_count == 1 { "" } else { "s" },
            flag
        );
    }

    Ok(())
}
