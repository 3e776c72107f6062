//! Memory retrieval by group id (`keep get`).
//!
//! Reassembles every segment row of one group into a single memory and
//! prints it, either as text or as JSON.
//!
//! # Usage
//!
//! ```bash
//! keep get --owner alice 550e8400-e29b-41d4-a716-446655440000
//! keep get --owner alice 550e8400-e29b-41d4-a716-446655440000 --json
//! ```

use anyhow::{bail, Result};

use keepsake_core::models::Memory;

use crate::config::Config;
use crate::service;

/// Fetch one memory; a missing group is an error at this level.
pub async fn get_memory(config: &Config, owner_id: &str, group_id: &str) -> Result<Memory> {
    let service = service::open_service(config).await?;
    let result = service.get_memory(owner_id, group_id).await;
    service::close(service).await;

    match result? {
        Some(memory) => Ok(memory),
        None => bail!("memory not found: {}", group_id),
    }
}

/// CLI entry point for `keep get`.
pub async fn run_get(config: &Config, owner_id: &str, group_id: &str, json: bool) -> Result<()> {
    let memory = get_memory(config, owner_id, group_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&memory)?);
        return Ok(());
    }

    println!("--- Memory ---");
    println!("group_id:     {}", memory.group_id);
    println!("title:        {}", memory.title);
    println!("owner:        {}", memory.owner_id);
    println!("visibility:   {}", memory.visibility);
    if !memory.tags.is_empty() {
        println!("tags:         {}", memory.tags.join(", "));
    }
    if let Some(ref date) = memory.date {
        println!("date:         {}", date);
    }
    if let Some(ref place) = memory.place {
        println!("place:        {}", place);
    }
    if let Some(ref media) = memory.media {
        println!("media:        {}", media.join(", "));
    }
    println!("created_at:   {}", format_ts_iso(&memory.created_at));
    println!("updated_at:   {}", format_ts_iso(&memory.updated_at));
    println!("segments:     {}", memory.segment_count);
    if memory.is_degraded() {
        println!("integrity:    DEGRADED");
        for issue in &memory.integrity_issues {
            println!("  - {}", issue);
        }
    }
    println!();

    println!("--- Content ---");
    println!("{}", memory.content);

    Ok(())
}

pub(crate) fn format_ts_iso(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
