//! Memory creation (`keep add`).
//!
//! Reads the body from a file or stdin, splits it into segments and
//! persists one row per segment.
//!
//! # Usage
//!
//! ```bash
//! keep add --owner alice --title "Summer in Porto" --tag travel --file porto.md
//! cat letter.txt | keep add --owner alice --title "Letter to Sam" --dry-run
//! ```

use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;

use keepsake_core::models::MemoryDraft;
use keepsake_core::split::split_text_with;

use crate::config::Config;
use crate::service;

/// Arguments for `keep add`, collected by the CLI.
#[derive(Debug, Clone)]
pub struct AddArgs {
    pub owner: String,
    pub title: String,
    pub file: Option<PathBuf>,
    pub tags: Vec<String>,
    pub date: Option<String>,
    pub place: Option<String>,
    pub visibility: String,
    pub media: Vec<String>,
    pub group_id: Option<String>,
    pub dry_run: bool,
}

fn read_body(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read memory body from stdin")?;
            Ok(body)
        }
    }
}

/// CLI entry point for `keep add`.
pub async fn run_add(config: &Config, args: AddArgs) -> Result<()> {
    let body = read_body(args.file.as_ref())?;

    if args.dry_run {
        let limits = config.segmenting.limits()?;
        let segments = split_text_with(&body, args.group_id.as_deref(), &limits);
        println!("dry run: {} segment(s)", segments.len());
        for s in &segments {
            println!(
                "  [{}/{}] {} chars",
                s.position,
                s.segment_count,
                s.content.chars().count()
            );
        }
        return Ok(());
    }

    let draft = MemoryDraft {
        owner_id: args.owner,
        title: args.title,
        content: body,
        tags: args.tags,
        date: args.date,
        place: args.place,
        visibility: args.visibility,
        media: if args.media.is_empty() {
            None
        } else {
            Some(args.media)
        },
        group_id: args.group_id,
    };

    let service = service::open_service(config).await?;
    let result = service.save_memory(draft).await;
    service::close(service).await;
    let rows = result?;

    println!("saved {} ({} segment(s))", rows[0].group_id, rows.len());
    Ok(())
}
