//! Command-backed implementation of [`SystemProbe`].
//!
//! Each query spawns one external command and captures its stdout:
//!
//! | Query               | Command                          |
//! |---------------------|----------------------------------|
//! | `package_query`     | `rpm -q <package>`               |
//! | `service_state`     | `systemctl is-active <service>`  |
//! | `firewall_services` | `firewall-cmd --list-services`   |
//! | `selinux_mode`      | `getenforce`                     |
//!
//! Commands run one at a time on a current-thread Tokio runtime so each can be
//! bounded by a timeout; the child is killed if the timeout elapses.  Spawn
//! failures, timeouts, non-zero exit codes, and empty output all map to `None`.

use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

use crate::application::validate::SystemProbe;

pub mod mock;

/// Default upper bound for a single external command.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for probe construction.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The runtime used to drive child processes could not be built.
    #[error("failed to build command runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Production [`SystemProbe`] that shells out to the system tools.
pub struct CommandProbe {
    runtime: Runtime,
    timeout: Duration,
}

impl CommandProbe {
    /// Creates a probe whose commands are each bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Runtime`] if the Tokio runtime cannot be created.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProbeError::Runtime)?;
        Ok(Self { runtime, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `program args...` and returns trimmed stdout on success.
    pub(crate) fn run(&self, program: &str, args: &[&str]) -> Option<String> {
        let rendered = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let outcome = self
            .runtime
            .block_on(async { tokio::time::timeout(self.timeout, command.output()).await });

        let output = match outcome {
            Err(_) => {
                warn!(command = %rendered, timeout = ?self.timeout, "command timed out");
                return None;
            }
            Ok(Err(e)) => {
                warn!(command = %rendered, error = %e, "failed to run command");
                return None;
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            debug!(command = %rendered, status = ?output.status.code(), "command exited unsuccessfully");
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            debug!(command = %rendered, "command produced no output");
            return None;
        }
        Some(stdout)
    }
}

impl SystemProbe for CommandProbe {
    fn package_query(&self, package: &str) -> Option<String> {
        self.run("rpm", &["-q", package])
    }

    fn service_state(&self, service: &str) -> Option<String> {
        self.run("systemctl", &["is-active", service])
    }

    fn firewall_services(&self) -> Option<String> {
        self.run("firewall-cmd", &["--list-services"])
    }

    fn selinux_mode(&self) -> Option<String> {
        self.run("getenforce", &[])
    }

    fn is_privileged(&self) -> bool {
        effective_uid_is_root()
    }
}

#[cfg(unix)]
fn effective_uid_is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn effective_uid_is_root() -> bool {
    false
}

// ── Tests ─────────────────────────────────────────────────────────────────────
