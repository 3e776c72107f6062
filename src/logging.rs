//! Logging setup for the `keep` binary.
//!
//! Initializes a `tracing` subscriber writing to stderr so stdout stays
//! reserved for command output.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// The filter comes from `level` when given, otherwise `RUST_LOG`,
/// otherwise `info`.
pub fn init_logging(level: Option<&str>) -> Result<()> {
    let default_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter = level.unwrap_or(&default_level);

    let env_filter =
        EnvFilter::try_new(filter).map_err(|e| anyhow!("Invalid log filter '{}': {}", filter, e))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(std::env::var_os("NO_COLOR").is_none());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to init logging: {}", e))?;

    Ok(())
}
