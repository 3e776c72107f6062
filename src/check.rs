//! Integrity check of one stored group (`keep check`).
//!
//! Runs the validator over the raw rows of a group without reassembling it.
//! Exits non-zero when any issue is found.

use anyhow::{bail, Result};

use crate::config::Config;
use crate::service;

/// CLI entry point for `keep check`.
pub async fn run_check(config: &Config, owner_id: &str, group_id: &str) -> Result<()> {
    let service = service::open_service(config).await?;
    let result = service.check_memory(owner_id, group_id).await;
    service::close(service).await;

    let Some(report) = result? else {
        bail!("memory not found: {}", group_id);
    };

    if report.ok {
        println!("{}: ok", group_id);
        return Ok(());
    }

    println!("{}: {} issue(s)", group_id, report.issues.len());
    for issue in &report.issues {
        println!("  - {}", issue);
    }
    bail!("integrity check failed for {}", group_id)
}
