//! # provcheck-core
//!
//! Shared library for provcheck containing the config value extractor, the
//! expected provisioning baseline, and the check comparison rules.
//!
//! This crate has no dependencies on process spawning, the console, or any
//! particular package or service manager.  Everything in here can be unit-tested
//! with plain strings and temporary files.
//!
//! # Architecture overview
//!
//! provcheck audits a freshly provisioned server: it asks the package manager,
//! service manager, firewall, and SELinux for their state, reads a handful of
//! tuning files, and compares everything against a fixed baseline.
//!
//! - **`extractor`** – Turns loosely structured `key = value` / `key value`
//!   configuration text into a flat [`ConfigMapping`].
//!
//! - **`targets`** – The configuration files the audit reads, and the single
//!   fallback rule used when the primary MariaDB file is absent.
//!
//! - **`domain`** – The [`ExpectedBaseline`] and the [`CheckResult`] /
//!   [`Observed`] types that comparisons produce.

pub mod domain;
pub mod extractor;
pub mod targets;

pub use domain::baseline::{
    BaselineError, EssentialsBaseline, ExpectedBaseline, FirewallBaseline, SecurityBaseline,
};
pub use domain::check::{
    firewall_allows, matches_expected, package_installed, service_active, CheckResult, Observed,
};
pub use extractor::{classify_line, extract_config, parse_config, ConfigMapping, Extraction};
pub use extractor::line::{LineKind, Separator};
pub use targets::ConfigTarget;
