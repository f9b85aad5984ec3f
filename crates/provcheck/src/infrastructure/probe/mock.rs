//! Mock system probe for tests and dry runs.
//!
//! Answers every query from canned data instead of running commands, and
//! records which queries were made.

use std::cell::RefCell;
use std::collections::HashMap;

use provcheck_core::ExpectedBaseline;

use crate::application::validate::SystemProbe;

/// A [`SystemProbe`] with configurable answers.
///
/// Unknown packages and services answer `None`, as a failed command would.
#[derive(Debug, Default)]
pub struct MockProbe {
    packages: HashMap<String, String>,
    services: HashMap<String, String>,
    firewall: Option<String>,
    selinux: Option<String>,
    privileged: bool,
    queries: RefCell<Vec<String>>,
}

impl MockProbe {
    /// A privileged probe with nothing installed and every query failing.
    pub fn new() -> Self {
        Self {
            privileged: true,
            ..Self::default()
        }
    }

    /// A probe whose answers satisfy every non-file check in `baseline`.
    pub fn fully_provisioned(baseline: &ExpectedBaseline) -> Self {
        let mut probe = Self::new();
        for package in &baseline.essentials.packages {
            probe = probe.with_package(package);
        }
        for service in &baseline.essentials.active_services {
            probe = probe.with_service_state(service, "active");
        }
        probe
            .with_firewall(&baseline.firewall.services.join(" "))
            .with_selinux(&baseline.security.selinux_mode)
    }

    /// Marks `package` as installed.
    pub fn with_package(mut self, package: &str) -> Self {
        self.packages
            .insert(package.to_string(), format!("{package}-1.0-1.el9.x86_64"));
        self
    }

    pub fn with_service_state(mut self, service: &str, state: &str) -> Self {
        self.services.insert(service.to_string(), state.to_string());
        self
    }

    /// Sets the firewall listing (space-separated service names).
    pub fn with_firewall(mut self, listing: &str) -> Self {
        self.firewall = Some(listing.to_string());
        self
    }

    /// Makes the firewall query fail.
    pub fn without_firewall(mut self) -> Self {
        self.firewall = None;
        self
    }

    pub fn with_selinux(mut self, mode: &str) -> Self {
        self.selinux = Some(mode.to_string());
        self
    }

    pub fn unprivileged(mut self) -> Self {
        self.privileged = false;
        self
    }

    /// Queries made so far, in order, e.g. `"service_state httpd"`.
    pub fn query_log(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }

    fn record(&self, query: String) {
        self.queries.borrow_mut().push(query);
    }
}

impl SystemProbe for MockProbe {
    fn package_query(&self, package: &str) -> Option<String> {
        self.record(format!("package_query {package}"));
        self.packages.get(package).cloned()
    }

    fn service_state(&self, service: &str) -> Option<String> {
        self.record(format!("service_state {service}"));
        self.services.get(service).cloned()
    }

    fn firewall_services(&self) -> Option<String> {
        self.record("firewall_services".to_string());
        self.firewall.clone()
    }

    fn selinux_mode(&self) -> Option<String> {
        self.record("selinux_mode".to_string());
        self.selinux.clone()
    }

    fn is_privileged(&self) -> bool {
        self.privileged
    }
}
