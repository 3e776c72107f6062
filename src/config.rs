//! Configuration parsing and validation.
//!
//! Keepsake is configured via a TOML file (default `./config/keepsake.toml`).
//!
//! ```toml
//! [db]
//! path = "./data/keepsake.sqlite"
//! busy_timeout_ms = 5000
//!
//! [segmenting]
//! max_chars = 8000
//! min_chars = 2000
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use keepsake_core::error::LimitsError;
use keepsake_core::split::{SplitLimits, DEFAULT_MAX_CHARS, DEFAULT_MIN_CHARS};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub segmenting: SegmentingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
    /// How long a connection waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

/// Splitter thresholds, in characters.
#[derive(Debug, Deserialize, Clone)]
pub struct SegmentingConfig {
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

impl Default for SegmentingConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}
fn default_min_chars() -> usize {
    DEFAULT_MIN_CHARS
}

impl SegmentingConfig {
    pub fn limits(&self) -> Result<SplitLimits, LimitsError> {
        SplitLimits::new(self.max_chars, self.min_chars)
    }
}

/// Read, parse and validate the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if let Err(e) = config.segmenting.limits() {
        anyhow::bail!("Invalid [segmenting] section: {}", e);
    }

    Ok(config)
}
