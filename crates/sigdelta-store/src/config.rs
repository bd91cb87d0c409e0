//! Workspace configuration from `sigdelta.toml`
//!
//! ```toml
//! baseline = "tables/8.4.json"
//! baseline_version = "8.4"
//! deltas = "deltas"
//! log_format = "pretty"
//! ```
//!
//! Every key is optional. Relative paths are resolved against the directory
//! holding the config file, so the file can be used from any working
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sigdelta_core::Version;

use crate::errors::{config_error, io_error, Result};

/// Default config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "sigdelta.toml";

/// Log output style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Parsed `sigdelta.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SigDeltaConfig {
    /// Full table of the newest version
    pub baseline: Option<PathBuf>,
    /// Version of the baseline table
    pub baseline_version: Option<Version>,
    /// Directory of delta files
    pub deltas: Option<PathBuf>,
    pub log_format: Option<LogFormat>,
}

impl SigDeltaConfig {
    fn resolve_relative_to(mut self, base: &Path) -> Self {
        self.baseline = self.baseline.map(|p| base.join(p));
        self.deltas = self.deltas.map(|p| base.join(p));
        self
    }
}

/// Load a config file
///
/// # Errors
///
/// Returns an `Io` error if the file cannot be read and a `Config` error if
/// it is not valid TOML or has unknown keys or a malformed version.
pub fn load_config(path: &Path) -> Result<SigDeltaConfig> {
    let content = fs::read_to_string(path).map_err(|e| io_error("load_config", path, e))?;
    let config: SigDeltaConfig =
        toml::from_str(&content).map_err(|e| config_error(path, &e.to_string()))?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config.resolve_relative_to(base))
}

/// Load `sigdelta.toml` from `dir` if it exists
///
/// # Errors
///
/// Same as [`load_config`] when the file is present.
pub fn load_default_config(dir: &Path) -> Result<Option<SigDeltaConfig>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        load_config(&path).map(Some)
    } else {
        Ok(None)
    }
}
