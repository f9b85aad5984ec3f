//! ValidateUseCase: runs every provisioning check against the baseline.
//!
//! Phases run one after another in a fixed order.  A failing check never stops
//! later checks; the only thing that propagates is the overall verdict.
//!
//! ```text
//! audit()
//!  └─ is_privileged()?            -- precondition, nothing else runs if false
//!  └─ Validator::run()
//!       ├─ essentials  (packages, services)
//!       ├─ firewall    (permitted services)
//!       ├─ security    (SELinux, ModSecurity engine)
//!       ├─ mariadb     (tuning keys, with /etc/my.cnf fallback)
//!       └─ php         (tuning keys)
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use provcheck_core::{
    extract_config, firewall_allows, package_installed, service_active, CheckResult,
    ConfigTarget, ExpectedBaseline, Extraction, Observed,
};
use thiserror::Error;
use tracing::{debug, info};

use super::report::{AuditReport, PhaseReport};

pub const ESSENTIALS_TITLE: &str = "Scripts 1 & 5: Essential packages and services";
pub const FIREWALL_TITLE: &str = "Script 3: Firewall configuration";
pub const SECURITY_TITLE: &str = "Scripts 4 & 6: Security settings";
pub const MARIADB_TITLE: &str = "Script 8: MariaDB tuning";
pub const PHP_TITLE: &str = "Script 9: PHP settings";

/// Key carrying the ModSecurity rule engine state.
pub const MODSEC_ENGINE_KEY: &str = "SecRuleEngine";

/// Errors that abort an audit before any check runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuditError {
    #[error("provcheck must run as root to read protected configuration files")]
    NotPrivileged,
}

/// Opaque system queries the audit depends on.
///
/// Every query returns `None` when the underlying command fails, exits
/// non-zero, or prints nothing.  The production implementation lives in
/// `infrastructure::probe`; tests use
/// [`MockProbe`](crate::infrastructure::probe::mock::MockProbe).
#[cfg_attr(test, mockall::automock)]
pub trait SystemProbe {
    /// Package-manager output for `package`.
    fn package_query(&self, package: &str) -> Option<String>;

    /// Activity state of `service`, e.g. `active` or `inactive`.
    fn service_state(&self, service: &str) -> Option<String>;

    /// Whitespace-separated list of services permitted by the firewall.
    fn firewall_services(&self) -> Option<String>;

    /// SELinux enforcement mode, e.g. `Enforcing`.
    fn selinux_mode(&self) -> Option<String>;

    /// `true` if the process runs with the identity needed to read protected files.
    fn is_privileged(&self) -> bool;
}

/// The precondition alone, for callers that announce the run before the
/// phases start.
///
/// # Errors
///
/// Returns [`AuditError::NotPrivileged`] when the probe reports insufficient
/// privilege.
pub fn ensure_privileged(probe: &dyn SystemProbe) -> Result<(), AuditError> {
    if probe.is_privileged() {
        Ok(())
    } else {
        Err(AuditError::NotPrivileged)
    }
}

/// Checks the precondition, then runs every phase.
///
/// # Errors
///
/// Returns [`AuditError::NotPrivileged`] without running any query or reading
/// any file when the probe reports insufficient privilege.
pub fn audit(probe: &dyn SystemProbe, baseline: &ExpectedBaseline) -> Result<AuditReport, AuditError> {
    ensure_privileged(probe)?;
    Ok(Validator::new(probe, baseline).run())
}

/// Runs the validation phases.
pub struct Validator<'a> {
    probe: &'a dyn SystemProbe,
    baseline: &'a ExpectedBaseline,
    /// Directory the fixed configuration paths are rooted under (`/` in production).
    root: PathBuf,
}

impl<'a> Validator<'a> {
    pub fn new(probe: &'a dyn SystemProbe, baseline: &'a ExpectedBaseline) -> Self {
        Self {
            probe,
            baseline,
            root: PathBuf::from("/"),
        }
    }

    /// Re-roots the fixed configuration paths, e.g. at a mounted image or a
    /// test fixture directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Runs all phases in order.
    pub fn run(&self) -> AuditReport {
        let phases = vec![
            self.essentials_phase(),
            self.firewall_phase(),
            self.security_phase(),
            self.mariadb_phase(),
            self.php_phase(),
        ];
        let report = AuditReport::new(phases);
        info!(
            total = report.total(),
            failed = report.failed_count(),
            "audit complete"
        );
        report
    }

    /// Packages installed, services active.
    pub fn essentials_phase(&self) -> PhaseReport {
        let mut phase = PhaseReport::new(ESSENTIALS_TITLE);
        info!(phase = ESSENTIALS_TITLE, "validating");

        for package in &self.baseline.essentials.packages {
            let output = self.probe.package_query(package);
            let installed = package_installed(output.as_deref());
            debug!(%package, installed, "package query");
            phase.push(CheckResult::new(
                installed,
                format!("Package '{package}' is installed."),
            ));
        }

        for service in &self.baseline.essentials.active_services {
            let state = Observed::from_query(self.probe.service_state(service));
            let active = service_active(state.value());
            debug!(%service, %state, "service state");
            phase.push(
                CheckResult::new(active, format!("Service '{service}' is active."))
                    .with_values("active", state),
            );
        }

        phase
    }

    /// Every required service appears in the firewall listing.
    pub fn firewall_phase(&self) -> PhaseReport {
        let mut phase = PhaseReport::new(FIREWALL_TITLE);
        info!(phase = FIREWALL_TITLE, "validating");

        let Some(listing) = self.probe.firewall_services() else {
            phase.push(CheckResult::fail("Could not query firewalld services."));
            return phase;
        };

        for service in &self.baseline.firewall.services {
            phase.push(CheckResult::new(
                firewall_allows(&listing, service),
                format!("Service '{service}' is allowed through the firewall."),
            ));
        }

        phase
    }

    /// SELinux mode and ModSecurity rule engine.
    pub fn security_phase(&self) -> PhaseReport {
        let mut phase = PhaseReport::new(SECURITY_TITLE);
        info!(phase = SECURITY_TITLE, "validating");
        let security = &self.baseline.security;

        let selinux = Observed::from_query(self.probe.selinux_mode());
        phase.push(CheckResult::value_check(
            "SELinux mode",
            &security.selinux_mode,
            selinux,
        ));

        let (path, extraction) = self.read(ConfigTarget::ModSecurity);
        let engine = match extraction.mapping() {
            Some(mapping) => mapping.lookup(MODSEC_ENGINE_KEY),
            None => {
                phase.push(file_level_failure(ConfigTarget::ModSecurity, &path, &extraction));
                Observed::FileNotFound
            }
        };
        phase.push(CheckResult::value_check(
            "ModSecurity engine",
            &security.modsec_engine,
            engine,
        ));

        phase
    }

    pub fn mariadb_phase(&self) -> PhaseReport {
        self.tuning_phase(MARIADB_TITLE, ConfigTarget::MariaDb, &self.baseline.mariadb_tuning)
    }

    pub fn php_phase(&self) -> PhaseReport {
        self.tuning_phase(PHP_TITLE, ConfigTarget::Php, &self.baseline.php_tuning)
    }

    /// One file-level failure if the file is absent, else one check per key.
    fn tuning_phase(
        &self,
        title: &str,
        target: ConfigTarget,
        expected: &BTreeMap<String, String>,
    ) -> PhaseReport {
        let mut phase = PhaseReport::new(title);
        info!(phase = title, "validating");

        let (path, extraction) = self.read(target);
        let Some(mapping) = extraction.mapping() else {
            phase.push(file_level_failure(target, &path, &extraction));
            return phase;
        };

        for (key, value) in expected {
            let subject = format!("{} '{key}'", target.label());
            phase.push(CheckResult::value_check(&subject, value, mapping.lookup(key)));
        }

        phase
    }

    fn read(&self, target: ConfigTarget) -> (PathBuf, Extraction) {
        let path = target.resolve_under(&self.root, |p| p.exists());
        debug!(target = target.label(), path = %path.display(), "resolved config path");
        let extraction = extract_config(&path);
        (path, extraction)
    }
}

/// The single failed check reported when a configuration file is missing or
/// unreadable.
fn file_level_failure(target: ConfigTarget, path: &Path, extraction: &Extraction) -> CheckResult {
    let description = match extraction {
        Extraction::Unreadable(e) => format!(
            "{} configuration file {} could not be read: {e}",
            target.label(),
            path.display()
        ),
        _ => format!(
            "{} configuration file {} not found.",
            target.label(),
            path.display()
        ),
    };
    CheckResult::fail(description)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// A fixture root that does not exist, so every config file is absent.
    fn empty_root() -> PathBuf {
        PathBuf::from("/nonexistent/path/that/cannot/exist")
    }

    fn all_commands_fail() -> MockSystemProbe {
        let mut probe = MockSystemProbe::new();
        probe.expect_package_query().returning(|_| None);
        probe.expect_service_state().returning(|_| None);
        probe.expect_firewall_services().returning(|| None);
        probe.expect_selinux_mode().returning(|| None);
        probe.expect_is_privileged().return_const(true);
        probe
    }

    #[test]
    fn test_unprivileged_audit_runs_no_queries() {
        // Arrange: only is_privileged may be called.
        let mut probe = MockSystemProbe::new();
        probe.expect_is_privileged().times(1).return_const(false);
        probe.expect_package_query().never();
        probe.expect_service_state().never();
        probe.expect_firewall_services().never();
        probe.expect_selinux_mode().never();
        let baseline = ExpectedBaseline::default();

        // Act
        let result = audit(&probe, &baseline);

        // Assert
        assert_eq!(result, Err(AuditError::NotPrivileged));
    }

    #[test]
    fn test_ensure_privileged_only_asks_for_privilege() {
        let mut root = MockSystemProbe::new();
        root.expect_is_privileged().times(1).return_const(true);
        assert_eq!(ensure_privileged(&root), Ok(()));

        let mut user = MockSystemProbe::new();
        user.expect_is_privileged().times(1).return_const(false);
        assert_eq!(ensure_privileged(&user), Err(AuditError::NotPrivileged));
    }

    #[test]
    fn test_essentials_queries_every_package_and_service() {
        // Arrange
        let mut probe = MockSystemProbe::new();
        probe
            .expect_package_query()
            .times(6)
            .returning(|name| Some(format!("{name}-1.0-1.el9.x86_64")));
        probe
            .expect_service_state()
            .times(3)
            .returning(|name| Some(if name == "fail2ban" { "inactive" } else { "active" }.to_string()));
        let baseline = ExpectedBaseline::default();

        // Act
        let phase = Validator::new(&probe, &baseline).essentials_phase();

        // Assert
        assert_eq!(phase.checks.len(), 9);
        let failed: Vec<_> = phase.checks.iter().filter(|c| !c.passed).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].description, "Service 'fail2ban' is active.");
        assert_eq!(failed[0].observed, Some(Observed::Value("inactive".to_string())));
    }

    #[test]
    fn test_not_installed_output_fails_package_check() {
        let mut probe = MockSystemProbe::new();
        probe
            .expect_package_query()
            .returning(|name| Some(format!("package {name} is not installed")));
        probe.expect_service_state().returning(|_| Some("active".to_string()));
        let baseline = ExpectedBaseline::default();

        let phase = Validator::new(&probe, &baseline).essentials_phase();

        let package_failures = phase
            .checks
            .iter()
            .filter(|c| !c.passed && c.description.starts_with("Package"))
            .count();
        assert_eq!(package_failures, 6);
    }

    #[test]
    fn test_firewall_query_failure_is_single_failed_check() {
        let mut probe = MockSystemProbe::new();
        probe.expect_firewall_services().times(1).returning(|| None);
        let baseline = ExpectedBaseline::default();

        let phase = Validator::new(&probe, &baseline).firewall_phase();

        assert_eq!(phase.checks.len(), 1);
        assert!(!phase.checks[0].passed);
        assert_eq!(phase.checks[0].description, "Could not query firewalld services.");
    }

    #[test]
    fn test_firewall_membership_per_service() {
        let mut probe = MockSystemProbe::new();
        probe
            .expect_firewall_services()
            .returning(|| Some("http https".to_string()));
        let baseline = ExpectedBaseline::default();

        let phase = Validator::new(&probe, &baseline).firewall_phase();

        let verdicts: Vec<_> = phase.checks.iter().map(|c| c.passed).collect();
        assert_eq!(verdicts, [true, true, false]);
        assert!(phase.checks[2].description.contains("'ssh'"));
    }

    #[test]
    fn test_security_with_missing_modsecurity_file() {
        // Arrange
        let mut probe = MockSystemProbe::new();
        probe
            .expect_selinux_mode()
            .returning(|| Some("Enforcing".to_string()));
        let baseline = ExpectedBaseline::default();

        // Act
        let phase = Validator::new(&probe, &baseline)
            .with_root(empty_root())
            .security_phase();

        // Assert: SELinux passes, file-level failure, engine reports file not found.
        assert_eq!(phase.checks.len(), 3);
        assert!(phase.checks[0].passed);
        assert!(!phase.checks[1].passed);
        assert!(phase.checks[1].description.contains("not found"));
        assert!(!phase.checks[2].passed);
        assert_eq!(phase.checks[2].observed, Some(Observed::FileNotFound));
        assert_eq!(
            phase.checks[2].description,
            "ModSecurity engine = 'On'. (actual: file not found)"
        );
    }

    #[test]
    fn test_selinux_query_failure_reports_could_not_determine() {
        let probe = all_commands_fail();
        let baseline = ExpectedBaseline::default();

        let phase = Validator::new(&probe, &baseline)
            .with_root(empty_root())
            .security_phase();

        assert_eq!(
            phase.checks[0].description,
            "SELinux mode = 'Enforcing'. (actual: could not determine)"
        );
    }

    #[test]
    fn test_missing_tuning_file_is_reported_once() {
        let probe = all_commands_fail();
        let baseline = ExpectedBaseline::default();
        let validator = Validator::new(&probe, &baseline).with_root(empty_root());

        let mariadb = validator.mariadb_phase();
        let php = validator.php_phase();

        assert_eq!(mariadb.checks.len(), 1);
        assert!(!mariadb.checks[0].passed);
        // Fallback path is the one reported when neither exists.
        assert!(mariadb.checks[0]
            .description
            .contains("etc/my.cnf.d/mariadb-server.cnf"));
        assert_eq!(php.checks.len(), 1);
        assert!(php.checks[0].description.contains("etc/php.ini"));
    }

    #[test]
    fn test_every_phase_runs_even_when_all_queries_fail() {
        let probe = all_commands_fail();
        let baseline = ExpectedBaseline::default();

        let report = audit_at(&probe, &baseline, empty_root());

        assert_eq!(report.phases.len(), 5);
        let titles: Vec<_> = report.phases.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            [ESSENTIALS_TITLE, FIREWALL_TITLE, SECURITY_TITLE, MARIADB_TITLE, PHP_TITLE]
        );
        assert!(!report.passed());
        assert_eq!(report.exit_status(), 1);
    }

    fn audit_at(probe: &MockSystemProbe, baseline: &ExpectedBaseline, root: PathBuf) -> AuditReport {
        Validator::new(probe, baseline).with_root(root).run()
    }
}
