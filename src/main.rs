//! # Keepsake CLI (`keep`)
//!
//! ## Usage
//!
//! ```bash
//! keep --config ./config/keepsake.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `keep init` | Create the SQLite database and schema |
//! | `keep add` | Split a memory body into segments and store them |
//! | `keep list` | List an owner's memories, newest first |
//! | `keep get <group-id>` | Print one reassembled memory |
//! | `keep delete <group-id>` | Delete every segment of a memory |
//! | `keep check <group-id>` | Run integrity checks over a stored group |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use keepsake::add::{self, AddArgs};
use keepsake::{check, config, delete, get, list, logging, migrate};

/// Keepsake CLI: store long journal memories as bounded segments.
#[derive(Parser)]
#[command(
    name = "keep",
    about = "Keepsake: a local-first journal store that keeps long memories as bounded segments",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/keepsake.toml")]
    config: PathBuf,

    /// Log filter (e.g. `debug`, `keepsake_core=trace`). Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Running it again on an existing database is a no-op.
    Init,

    /// Store a new memory.
    ///
    /// The body is read from `--file`, or from stdin when omitted.
    Add {
        /// Owning user id.
        #[arg(long)]
        owner: String,

        /// Memory title.
        #[arg(long)]
        title: String,

        /// Read the body from this file instead of stdin.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Free-form tag (repeatable).
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Date the memory refers to (e.g. `2024-06-01`).
        #[arg(long)]
        date: Option<String>,

        /// Where it happened.
        #[arg(long)]
        place: Option<String>,

        /// Visibility or recipient marker.
        #[arg(long, default_value = "private")]
        visibility: String,

        /// Attached media reference (repeatable).
        #[arg(long)]
        media: Vec<String>,

        /// Use this group id instead of generating one.
        #[arg(long)]
        group_id: Option<String>,

        /// Show how the body would be split without writing anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// List memories of an owner, newest first.
    List {
        #[arg(long)]
        owner: String,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print one memory.
    Get {
        #[arg(long)]
        owner: String,

        group_id: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Delete a memory and all of its segments.
    Delete {
        #[arg(long)]
        owner: String,

        group_id: String,
    },

    /// Check a stored memory for missing, duplicate or mislabelled segments.
    Check {
        #[arg(long)]
        owner: String,

        group_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref())?;

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Add {
            owner,
            title,
            file,
            tags,
            date,
            place,
            visibility,
            media,
            group_id,
            dry_run,
        } => {
            let args = AddArgs {
                owner,
                title,
                file,
                tags,
                date,
                place,
                visibility,
                media,
                group_id,
                dry_run,
            };
            add::run_add(&cfg, args).await?;
        }
        Commands::List { owner, json } => {
            list::run_list(&cfg, &owner, json).await?;
        }
        Commands::Get {
            owner,
            group_id,
            json,
        } => {
            get::run_get(&cfg, &owner, &group_id, json).await?;
        }
        Commands::Delete { owner, group_id } => {
            delete::run_delete(&cfg, &owner, &group_id).await?;
        }
        Commands::Check { owner, group_id } => {
            check::run_check(&cfg, &owner, &group_id).await?;
        }
    }

    Ok(())
}
