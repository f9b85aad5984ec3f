//! TOML run settings.
//!
//! Settings control how provcheck runs, never what it checks (that is the
//! baseline).  Example:
//!
//! ```toml
//! log_level = "info"
//! command_timeout_secs = 30
//! format = "json"
//! ```
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! Command-line flags override whatever the file says.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::console::ReportFormat;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A file system I/O error other than "not found".
    #[error("I/O error reading settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSettings {
    /// `tracing` level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Upper bound for each external command.
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,
    #[serde(default)]
    pub format: ReportFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}
fn default_command_timeout_secs() -> u64 {
    10
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            command_timeout_secs: default_command_timeout_secs(),
            format: ReportFormat::default(),
        }
    }
}

impl RunSettings {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }
}

/// Loads settings from `path`, returning defaults if the file does not exist.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system errors other than "not found",
/// and [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings(path: &Path) -> Result<RunSettings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(content) => RunSettings::from_toml_str(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RunSettings::default()),
        Err(e) => Err(SettingsError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
