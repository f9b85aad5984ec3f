//! Audit report: checks grouped by provisioning phase.

use provcheck_core::CheckResult;
use serde::Serialize;

/// Checks belonging to one provisioning phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    /// Banner title naming the phase.
    pub title: String,
    pub checks: Vec<CheckResult>,
}

impl PhaseReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            checks: Vec::new(),
        }
    }

    pub fn push(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    /// `true` when every check in this phase passed.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

/// The whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub phases: Vec<PhaseReport>,
}

impl AuditReport {
    pub fn new(phases: Vec<PhaseReport>) -> Self {
        Self { phases }
    }

    /// Boolean AND of every individual check.
    pub fn passed(&self) -> bool {
        self.phases.iter().all(PhaseReport::passed)
    }

    pub fn checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.phases.iter().flat_map(|p| p.checks.iter())
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks().filter(|c| !c.passed)
    }

    pub fn total(&self) -> usize {
        self.checks().count()
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// Process exit status: `0` if everything passed, `1` otherwise.
    pub fn exit_status(&self) -> u8 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
