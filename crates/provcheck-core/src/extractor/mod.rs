//! Config value extractor.
//!
//! Reads a text file written in a simplified INI / Apache-directive dialect and
//! yields a flat [`ConfigMapping`] from key to value.  Both `key = value` and
//! `key value` lines may appear in the same file; comments, blank lines, and
//! `[section]` headers are skipped.
//!
//! # Missing files are normal
//!
//! During a partial provisioning run the database or PHP tuning file may not
//! exist yet.  [`extract_config`] therefore never fails: it returns an
//! [`Extraction`] that is either a parsed mapping or an absence signal.  An
//! existing file with nothing extractable is a parsed, *empty* mapping.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::check::Observed;

pub mod line;

pub use line::classify_line;
use line::LineKind;

/// Flat key → value mapping extracted from one configuration file.
///
/// Keys are unique; when a key appears more than once the last occurrence in
/// the file wins.  The mapping is read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMapping {
    entries: HashMap<String, String>,
}

impl ConfigMapping {
    /// Returns the value stored for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Looks up `key` for comparison.  An absent key becomes
    /// [`Observed::KeyNotFound`], which never equals an expected value.
    pub fn lookup(&self, key: &str) -> Observed {
        match self.get(key) {
            Some(value) => Observed::Value(value.to_string()),
            None => Observed::KeyNotFound,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of reading one configuration file.
#[derive(Debug)]
pub enum Extraction {
    /// The file was read; the mapping may be empty.
    Parsed(ConfigMapping),
    /// The path does not exist.
    NotFound,
    /// The path exists but could not be opened or read.
    Unreadable(io::Error),
}

impl Extraction {
    /// Returns the mapping, or `None` for both absence causes.
    ///
    /// Callers treat "not found" and "unreadable" identically as
    /// "could not validate"; the distinction is kept only for diagnostics.
    pub fn mapping(&self) -> Option<&ConfigMapping> {
        match self {
            Extraction::Parsed(mapping) => Some(mapping),
            Extraction::NotFound | Extraction::Unreadable(_) => None,
        }
    }

    /// Consumes the extraction and returns the mapping, if any.
    pub fn into_mapping(self) -> Option<ConfigMapping> {
        match self {
            Extraction::Parsed(mapping) => Some(mapping),
            Extraction::NotFound | Extraction::Unreadable(_) => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.mapping().is_none()
    }
}

/// Parses configuration text into a mapping in a single pass.
pub fn parse_config(text: &str) -> ConfigMapping {
    let mut entries = HashMap::new();
    for raw in text.lines() {
        if let LineKind::Entry { key, value, .. } = classify_line(raw) {
            entries.insert(key.to_string(), value.to_string());
        }
    }
    ConfigMapping { entries }
}

/// Reads and parses the file at `path`.
///
/// A file that is not valid UTF-8 is still parsed: invalid sequences are
/// replaced with U+FFFD and every other line is extracted as usual.  Such a file
/// is deliberately not reported as unreadable, because a stray Latin-1 comment
/// in `php.ini` should not hide its ASCII keys from the audit.
///
/// Read failures other than "not found" are logged at `warn` level; the audit
/// run continues either way.
pub fn extract_config(path: &Path) -> Extraction {
    match std::fs::read(path) {
        Ok(bytes) => {
            let mapping = parse_config(&String::from_utf8_lossy(&bytes));
            debug!(path = %path.display(), entries = mapping.len(), "parsed config file");
            Extraction::Parsed(mapping)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found");
            Extraction::NotFound
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read config file");
            Extraction::Unreadable(e)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
