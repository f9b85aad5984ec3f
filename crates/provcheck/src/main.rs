//! provcheck: post-provisioning configuration audit.
//!
//! Confirms that a server provisioned by the setup scripts ended up with the
//! expected packages, services, firewall rules, SELinux mode, and tuning values.
//! The report goes to stdout; diagnostics go to stderr through `tracing`.
//!
//! # Usage
//!
//! ```text
//! provcheck [OPTIONS]
//!
//! Options:
//!   --baseline <PATH>         TOML baseline override
//!   --settings <PATH>         TOML run settings
//!   --format <text|json>      Report format
//!   --command-timeout <SECS>  Upper bound per external command
//!   --log-level <LEVEL>       Diagnostic level (RUST_LOG wins when set)
//! ```
//!
//! # Exit status
//!
//! `0` when every check passed; `1` when any check failed, when not running as
//! root, or when the settings or baseline file is invalid.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use provcheck::application::validate::{ensure_privileged, AuditError, Validator};
use provcheck::infrastructure::console::{self, ReportFormat, NOT_PRIVILEGED_LINE};
use provcheck::infrastructure::probe::CommandProbe;
use provcheck::infrastructure::settings::{load_settings, RunSettings};
use provcheck_core::ExpectedBaseline;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Audit a freshly provisioned server against the expected baseline.
#[derive(Debug, Parser)]
#[command(
    name = "provcheck",
    about = "Post-provisioning audit of packages, services, firewall, SELinux, and tuning files",
    version
)]
struct Cli {
    /// TOML file replacing sections of the built-in baseline.
    #[arg(long, env = "PROVCHECK_BASELINE")]
    baseline: Option<PathBuf>,

    /// TOML run settings (log level, command timeout, format).
    #[arg(long, env = "PROVCHECK_SETTINGS")]
    settings: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Upper bound in seconds for each external command.
    #[arg(long)]
    command_timeout: Option<u64>,

    /// Diagnostic log level.  Overridden by `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => RunSettings::default(),
    };

    let log_level = cli.log_level.as_deref().unwrap_or(settings.log_level.as_str());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let baseline = match &cli.baseline {
        Some(path) => ExpectedBaseline::from_file(path)
            .with_context(|| format!("failed to load baseline from {}", path.display()))?,
        None => ExpectedBaseline::default(),
    };
    debug!(checks = baseline.check_count(), "baseline loaded");

    let timeout = cli
        .command_timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| settings.command_timeout());
    let format = cli.format.unwrap_or(settings.format);

    let probe = CommandProbe::new(timeout).context("failed to initialise command probe")?;

    if let Err(AuditError::NotPrivileged) = ensure_privileged(&probe) {
        println!("{NOT_PRIVILEGED_LINE}");
        return Ok(ExitCode::FAILURE);
    }
    if let Some(line) = console::preamble(format) {
        println!("{line}");
    }

    let report = Validator::new(&probe, &baseline).run();

    let rendered = console::render(&report, format).context("failed to render report")?;
    println!("{rendered}");

    info!(
        passed = report.passed(),
        failed = report.failed_count(),
        "provcheck finished"
    );
    Ok(ExitCode::from(report.exit_status()))
}
