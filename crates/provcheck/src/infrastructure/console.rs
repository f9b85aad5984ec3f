//! Console rendering of an audit report.
//!
//! The text format groups checks under banner headers, one line per check:
//!
//! ```text
//! ==================================================
//!   Script 8: MariaDB tuning
//! ==================================================
//! ✅ MariaDB 'max_connections' = '100'. (actual: 100)
//! ❌ MariaDB 'query_cache_size' = '32M'. (actual: not found)
//! ```
//!
//! The start line is not part of the rendered report: it is printed through
//! [`preamble`] before the phases run, so the operator sees progress while
//! slow commands execute.
//!
//! The JSON format carries the same data for scripts and CI pipelines.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::application::report::{AuditReport, PhaseReport};

pub const PASS_GLYPH: &str = "✅";
pub const FAIL_GLYPH: &str = "❌";

pub const START_LINE: &str = "🚀 Starting full server configuration validation 🚀";
pub const SUCCESS_LINE: &str = "🎉 SUCCESS: all key configuration settings were validated!";
pub const FAILURE_LINE: &str =
    "⚠️ FAILURE: some settings do not match the baseline. Review the report above.";
pub const NOT_PRIVILEGED_LINE: &str =
    "❌ ERROR: provcheck must run as root to inspect the system configuration.";

const BANNER_WIDTH: usize = 50;

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Renders `report` in the requested format.
///
/// # Errors
///
/// Only JSON rendering can fail, and only if serialization fails.
pub fn render(report: &AuditReport, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Json => render_json(report),
    }
}

/// Line printed before the phases start, if the format has one.
pub fn preamble(format: ReportFormat) -> Option<&'static str> {
    match format {
        ReportFormat::Text => Some(START_LINE),
        ReportFormat::Json => None,
    }
}

/// `=` rule, title, `=` rule, preceded by a blank line.
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!("\n{rule}\n  {title}\n{rule}")
}

pub fn render_text(report: &AuditReport) -> String {
    let mut out = String::new();
    for phase in &report.phases {
        render_phase(&mut out, phase);
    }

    let rule = "=".repeat(BANNER_WIDTH);
    let verdict = if report.passed() {
        SUCCESS_LINE
    } else {
        FAILURE_LINE
    };
    let _ = writeln!(out, "\n{rule}\n{verdict}\n{rule}");
    out
}

fn render_phase(out: &mut String, phase: &PhaseReport) {
    let _ = writeln!(out, "{}", banner(&phase.title));
    for check in &phase.checks {
        let glyph = if check.passed { PASS_GLYPH } else { FAIL_GLYPH };
        let _ = writeln!(out, "{glyph} {}", check.description);
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    passed: bool,
    total: usize,
    failed: usize,
    phases: &'a [PhaseReport],
}

pub fn render_json(report: &AuditReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        passed: report.passed(),
        total: report.total(),
        failed: report.failed_count(),
        phases: &report.phases,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use provcheck_core::{CheckResult, Observed};

    fn sample_report(all_pass: bool) -> AuditReport {
        let mut phase = PhaseReport::new("Script 8: MariaDB tuning");
        phase.push(CheckResult::value_check(
            "MariaDB 'max_connections'",
            "100",
            Observed::Value("100".to_string()),
        ));
        let observed = if all_pass {
            Observed::Value("32M".to_string())
        } else {
            Observed::KeyNotFound
        };
        phase.push(CheckResult::value_check(
            "MariaDB 'query_cache_size'",
            "32M",
            observed,
        ));
        AuditReport::new(vec![phase])
    }

    #[test]
    fn test_banner_layout() {
        let text = banner("Title");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1].len(), 50);
        assert_eq!(lines[2], "  Title");
        assert_eq!(lines[1], lines[3]);
    }

    #[test]
    fn test_text_render_uses_glyph_per_check() {
        // Arrange
        let report = sample_report(false);

        // Act
        let text = render_text(&report);

        // Assert
        assert!(!text.contains(START_LINE));
        assert!(text.contains("✅ MariaDB 'max_connections' = '100'. (actual: 100)"));
        assert!(text.contains("❌ MariaDB 'query_cache_size' = '32M'. (actual: not found)"));
        assert!(text.contains(FAILURE_LINE));
        assert!(!text.contains(SUCCESS_LINE));
    }

    #[test]
    fn test_preamble_only_for_text() {
        assert_eq!(preamble(ReportFormat::Text), Some(START_LINE));
        assert_eq!(preamble(ReportFormat::Json), None);
    }

    #[test]
    fn test_text_render_success_banner() {
        let text = render_text(&sample_report(true));
        assert!(text.contains(SUCCESS_LINE));
        assert!(!text.contains(FAIL_GLYPH));
    }

    #[test]
    fn test_json_render_carries_verdict_and_observed() {
        let json = render_json(&sample_report(false)).expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["passed"], false);
        assert_eq!(value["total"], 2);
        assert_eq!(value["failed"], 1);
        let check = &value["phases"][0]["checks"][1];
        assert_eq!(check["expected"], "32M");
        assert_eq!(check["observed"]["status"], "key_not_found");
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let report = sample_report(true);
        let text = render(&report, ReportFormat::Text).unwrap();
        let json = render(&report, ReportFormat::Json).unwrap();
        assert!(text.contains(SUCCESS_LINE));
        assert!(json.trim_start().starts_with('{'));
    }

    #[test]
    fn test_report_format_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: ReportFormat,
        }
        let w: Wrapper = toml::from_str("format = \"json\"").unwrap();
        assert_eq!(w.format, ReportFormat::Json);
    }
}
