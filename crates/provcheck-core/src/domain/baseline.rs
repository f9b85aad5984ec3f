//! The expected configuration baseline.
//!
//! [`ExpectedBaseline::default()`] carries the values the provisioning scripts
//! are meant to apply.  It is built once at startup and passed by reference to
//! the validator; nothing mutates it afterwards.
//!
//! A baseline may also be loaded from a TOML file with the same fixed schema.
//! Sections left out of the file keep their built-in values, and unknown keys
//! are rejected:
//!
//! ```toml
//! [firewall]
//! services = ["http", "https", "ssh", "cockpit"]
//!
//! [php_tuning]
//! "date.timezone" = "Europe/Lisbon"
//! memory_limit = "512M"
//! ```
//!
//! Tuning tables are replaced as a whole, not merged key by key.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for loading a baseline file.
#[derive(Debug, Error)]
pub enum BaselineError {
    /// The baseline file could not be read.
    #[error("I/O error reading baseline at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed or does not match the schema.
    #[error("failed to parse baseline TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Category → key → expected value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpectedBaseline {
    pub essentials: EssentialsBaseline,
    pub firewall: FirewallBaseline,
    pub security: SecurityBaseline,
    /// Keys expected in the MariaDB server configuration.
    pub mariadb_tuning: BTreeMap<String, String>,
    /// Keys expected in `php.ini`.
    pub php_tuning: BTreeMap<String, String>,
}

/// Packages that must be installed and services that must be active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EssentialsBaseline {
    pub packages: Vec<String>,
    pub active_services: Vec<String>,
}

/// Services that must be permitted by the firewall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FirewallBaseline {
    pub services: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecurityBaseline {
    /// Expected `getenforce` output.
    pub selinux_mode: String,
    /// Expected `SecRuleEngine` value in the ModSecurity configuration.
    pub modsec_engine: String,
}

impl Default for ExpectedBaseline {
    fn default() -> Self {
        Self {
            essentials: EssentialsBaseline::default(),
            firewall: FirewallBaseline::default(),
            security: SecurityBaseline::default(),
            mariadb_tuning: table(&[
                ("innodb_log_file_size", "256M"),
                ("max_connections", "100"),
                ("query_cache_size", "32M"),
            ]),
            php_tuning: table(&[
                ("date.timezone", "Europe/Lisbon"),
                ("upload_max_filesize", "20M"),
                ("post_max_size", "25M"),
                ("memory_limit", "256M"),
            ]),
        }
    }
}

impl Default for EssentialsBaseline {
    fn default() -> Self {
        Self {
            packages: strings(&["httpd", "mariadb-server", "php", "git", "fail2ban", "mod_security"]),
            active_services: strings(&["httpd", "mariadb", "fail2ban"]),
        }
    }
}

impl Default for FirewallBaseline {
    fn default() -> Self {
        Self {
            services: strings(&["http", "https", "ssh"]),
        }
    }
}

impl Default for SecurityBaseline {
    fn default() -> Self {
        Self {
            selinux_mode: "Enforcing".to_string(),
            modsec_engine: "On".to_string(),
        }
    }
}

impl ExpectedBaseline {
    /// Parses a baseline from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`BaselineError::Parse`] if the TOML is malformed or contains
    /// keys outside the schema.
    pub fn from_toml_str(content: &str) -> Result<Self, BaselineError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a baseline from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BaselineError::Io`] if the file cannot be read (including when
    /// it does not exist) and [`BaselineError::Parse`] if it is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BaselineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| BaselineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Total number of individual comparisons this baseline describes when every
    /// file is present and every query answers.
    pub fn check_count(&self) -> usize {
        self.essentials.packages.len()
            + self.essentials.active_services.len()
            + self.firewall.services.len()
            + 2
            + self.mariadb_tuning.len()
            + self.php_tuning.len()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn table(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
