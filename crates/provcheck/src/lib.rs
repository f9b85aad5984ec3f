//! provcheck library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does provcheck do?
//!
//! After a server has been provisioned by a series of scripts, provcheck makes
//! one read-only confirmation pass:
//!
//! 1. Refuses to run unless it has root privileges.
//! 2. Checks that the essential packages are installed and services active.
//! 3. Checks that the firewall permits the expected services.
//! 4. Checks the SELinux mode and the ModSecurity rule engine.
//! 5. Reads the MariaDB and PHP tuning files and compares selected keys.
//! 6. Prints a pass/fail line per check and exits `0` only if all passed.

/// Application layer: the validation phases and the report they build.
pub mod application;

/// Infrastructure layer: system queries, console rendering, run settings.
pub mod infrastructure;
