//! User configuration for the command-line front end.
//!
//! Stored as JSON at `$TAPWIRE_CONFIG_PATH` or `<config_dir>/tapwire/config.json`.
//! A missing file means defaults; command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tapwire_util::resolve_config_path;

pub const CONFIG_PATH_VAR: &str = "TAPWIRE_CONFIG_PATH";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Records grouped under their display group
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct CliConfig {
    /// Output format when `--format` is not given.
    pub format: OutputFormat,
    /// Whether hidden bookkeeping records are printed.
    pub show_hidden: bool,
    /// Tracing filter used when `RUST_LOG` is unset (e.g. "debug").
    pub log_filter: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    resolve_config_path(CONFIG_PATH_VAR, "tapwire", "config.json")
}

pub fn load_config_from_path(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        return Ok(CliConfig::default());
    }

    let content = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}
