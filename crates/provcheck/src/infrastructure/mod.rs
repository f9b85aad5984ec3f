//! Infrastructure layer for provcheck.
//!
//! Contains the OS-facing adapters: the command-backed system probe, console
//! rendering of the report, and the optional TOML run settings.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `provcheck_core`, but MUST NOT be imported by the `application` layer or the
//! core crate.
//!
//! # Sub-modules
//!
//! - **`probe`** – [`CommandProbe`](probe::CommandProbe) runs `rpm`,
//!   `systemctl`, `firewall-cmd`, and `getenforce` with a per-command timeout.
//!   A [`MockProbe`](probe::mock::MockProbe) with canned answers is always
//!   compiled for tests and dry runs.
//!
//! - **`console`** – Text and JSON rendering of an
//!   [`AuditReport`](crate::application::report::AuditReport).
//!
//! - **`settings`** – Log level, command timeout, and output format loaded from
//!   an optional TOML file.

pub mod console;
pub mod probe;
pub mod settings;
