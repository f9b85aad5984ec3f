//! Configuration files consumed by the audit and how their paths resolve.
//!
//! Paths are fixed constants for the target distribution.  There is exactly one
//! fallback: when `/etc/my.cnf` is absent, MariaDB tuning is read from
//! `/etc/my.cnf.d/mariadb-server.cnf` instead.  No other candidates are tried.

use std::path::{Path, PathBuf};

pub const MODSECURITY_CONF: &str = "/etc/httpd/conf.d/mod_security.conf";
pub const MARIADB_CONF: &str = "/etc/my.cnf";
pub const MARIADB_FALLBACK_CONF: &str = "/etc/my.cnf.d/mariadb-server.cnf";
pub const PHP_INI: &str = "/etc/php.ini";

/// A logical configuration file the audit reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigTarget {
    /// Web-server security module (`SecRuleEngine`).
    ModSecurity,
    /// Database server tuning.
    MariaDb,
    /// Language runtime settings.
    Php,
}

impl ConfigTarget {
    pub const ALL: [ConfigTarget; 3] = [
        ConfigTarget::ModSecurity,
        ConfigTarget::MariaDb,
        ConfigTarget::Php,
    ];

    /// Human-readable name used in report lines.
    pub fn label(self) -> &'static str {
        match self {
            ConfigTarget::ModSecurity => "ModSecurity",
            ConfigTarget::MariaDb => "MariaDB",
            ConfigTarget::Php => "PHP",
        }
    }

    pub fn primary_path(self) -> &'static Path {
        match self {
            ConfigTarget::ModSecurity => Path::new(MODSECURITY_CONF),
            ConfigTarget::MariaDb => Path::new(MARIADB_CONF),
            ConfigTarget::Php => Path::new(PHP_INI),
        }
    }

    /// The single alternate location, if this target has one.
    pub fn fallback_path(self) -> Option<&'static Path> {
        match self {
            ConfigTarget::MariaDb => Some(Path::new(MARIADB_FALLBACK_CONF)),
            ConfigTarget::ModSecurity | ConfigTarget::Php => None,
        }
    }

    /// Resolves the path to read, given an existence predicate.
    ///
    /// Returns the primary path when it exists.  Otherwise the fallback path is
    /// returned whether or not it exists, so when neither exists the fallback is
    /// the path reported as not found.  Targets without a fallback always
    /// resolve to their primary path.
    pub fn resolve_with(self, exists: impl Fn(&Path) -> bool) -> PathBuf {
        self.resolve_under(Path::new("/"), exists)
    }

    /// Like [`resolve_with`](Self::resolve_with) but with the fixed paths
    /// re-rooted under `root`.  Production uses `/`.
    pub fn resolve_under(self, root: &Path, exists: impl Fn(&Path) -> bool) -> PathBuf {
        let primary = rooted(root, self.primary_path());
        if exists(&primary) {
            return primary;
        }
        match self.fallback_path() {
            Some(fallback) => rooted(root, fallback),
            None => primary,
        }
    }
}

fn rooted(root: &Path, path: &Path) -> PathBuf {
    root.join(path.strip_prefix("/").unwrap_or(path))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
