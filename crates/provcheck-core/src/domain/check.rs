//! Check results and comparison rules.
//!
//! Every comparison is exact string equality on already-trimmed values.  There
//! is no numeric or unit coercion (`"256M"` is not `"268435456"`) and no case
//! folding.

use std::fmt;

use serde::Serialize;

/// What a check actually observed.
///
/// The three sentinel variants never compare equal to an expected value.
/// `KeyNotFound` and `FileNotFound` stay distinct so reports can say which one
/// happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Observed {
    /// A concrete value from a file or a query.
    Value(String),
    /// The file was read but does not define the key.
    KeyNotFound,
    /// The file could not be found or read.
    FileNotFound,
    /// A collaborator query failed or returned nothing.
    Undetermined,
}

impl Observed {
    /// Wraps collaborator output.  Missing or blank output is
    /// [`Observed::Undetermined`].
    pub fn from_query(output: Option<String>) -> Self {
        match output {
            Some(text) if !text.trim().is_empty() => Observed::Value(text.trim().to_string()),
            _ => Observed::Undetermined,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Observed::Value(v) => Some(v),
            Observed::KeyNotFound | Observed::FileNotFound | Observed::Undetermined => None,
        }
    }
}

impl fmt::Display for Observed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observed::Value(v) => f.write_str(v),
            Observed::KeyNotFound => f.write_str("not found"),
            Observed::FileNotFound => f.write_str("file not found"),
            Observed::Undetermined => f.write_str("could not determine"),
        }
    }
}

/// Result of one atomic comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub passed: bool,
    /// Human-readable line naming the item checked.
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<Observed>,
}

impl CheckResult {
    pub fn new(passed: bool, description: impl Into<String>) -> Self {
        Self {
            passed,
            description: description.into(),
            expected: None,
            observed: None,
        }
    }

    pub fn pass(description: impl Into<String>) -> Self {
        Self::new(true, description)
    }

    pub fn fail(description: impl Into<String>) -> Self {
        Self::new(false, description)
    }

    /// Attaches the expected and observed values without changing the verdict.
    pub fn with_values(mut self, expected: impl Into<String>, observed: Observed) -> Self {
        self.expected = Some(expected.into());
        self.observed = Some(observed);
        self
    }

    /// Compares `observed` against `expected` and describes the result as
    /// `"<subject> = '<expected>'. (actual: <observed>)"`.
    pub fn value_check(subject: &str, expected: &str, observed: Observed) -> Self {
        let passed = matches_expected(expected, &observed);
        let description = format!("{subject} = '{expected}'. (actual: {observed})");
        Self::new(passed, description).with_values(expected, observed)
    }
}

/// Exact equality between an expected string and an observed value.
pub fn matches_expected(expected: &str, observed: &Observed) -> bool {
    observed.value() == Some(expected)
}

/// Interprets package-manager output.
///
/// Installed iff the query produced output and that output does not contain
/// `"not installed"`.
pub fn package_installed(output: Option<&str>) -> bool {
    match output {
        Some(text) => !text.trim().is_empty() && !text.contains("not installed"),
        None => false,
    }
}

/// Interprets service-manager output: the literal token `active` only.
pub fn service_active(output: Option<&str>) -> bool {
    output.map(str::trim) == Some("active")
}

/// Membership of `service` in a whitespace-separated firewall listing.
pub fn firewall_allows(listing: &str, service: &str) -> bool {
    listing.split_whitespace().any(|s| s == service)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
