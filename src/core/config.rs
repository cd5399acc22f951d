//! Configuration — where the SQLite database lives.
//!
//! A `krusty.toml` next to the working directory is optional; a missing file
//! yields the defaults, a malformed one is an error. The CLI's `--db` flag
//! overrides whatever the file says.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::{Error, Result};

/// Database file used when neither the config file nor `--db` names one.
pub const DEFAULT_DB_PATH: &str = "krusty.sqlite";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the SQLite database file.
    pub db_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

/// Load configuration from a TOML file. Returns the defaults if the file
/// does not exist.
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(|e| Error::Config(format!("config parse error: {e}")))
}
