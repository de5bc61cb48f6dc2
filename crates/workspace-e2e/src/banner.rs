//! Operator-facing configuration banner.
//!
//! The banner summarizes the resolved run: mode, effective URL, credential
//! availability and which test categories run or are skipped. It is written
//! through a [`SetupReporter`] so the output can be captured in tests.

use crate::config::{RunConfiguration, RunMode, TestCategories};
use common::secret::{mask, ExposeSecret};
use std::cell::RefCell;
use std::io::Write;

/// Sink for banner lines.
pub trait SetupReporter {
    fn line(&self, text: &str);
}

/// Writes banner lines to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutReporter;

impl SetupReporter for StdoutReporter {
    fn line(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{text}");
    }
}

/// Records banner lines in memory.
#[derive(Debug, Default)]
pub struct CapturingReporter {
    lines: RefCell<Vec<String>>,
}

impl CapturingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines recorded so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// All recorded lines joined with newlines.
    pub fn output(&self) -> String {
        self.lines.borrow().join("\n")
    }
}

impl SetupReporter for CapturingReporter {
    fn line(&self, text: &str) {
        self.lines.borrow_mut().push(text.to_string());
    }
}

const RULE: &str = "============================================================";

/// Render the banner for a resolved configuration.
pub fn render_banner(config: &RunConfiguration) -> Vec<String> {
    let owner = config.owner_credentials();
    let categories = TestCategories::for_config(config);

    let (mode_detail, owner_password) = match &config.mode {
        RunMode::Ci { .. } => (
            "full suite with database verification",
            owner.password.expose_secret().to_string(),
        ),
        RunMode::Tester { .. } => (
            "UI/API only, existing workspace",
            mask(&owner.password),
        ),
    };

    let mut lines = vec![
        RULE.to_string(),
        "Kompot workspace E2E - global setup".to_string(),
        RULE.to_string(),
        format!("Mode:              {} ({mode_detail})", config.mode.name()),
        format!("Base URL:          {}", config.base_url),
        format!("Workspace:         {}", config.workspace_id),
        format!("Owner email:       {}", owner.email),
        format!("Owner password:    {owner_password}"),
        format!(
            "Database access:   {}",
            availability(config.has_database_access())
        ),
        format!(
            "Super admin:       {}",
            availability(config.has_super_admin_credentials())
        ),
        String::new(),
        "Test categories:".to_string(),
    ];

    for (label, enabled) in categories.entries() {
        let status = if enabled { "run" } else { "skip" };
        lines.push(format!("  [{status:>4}] {label}"));
    }

    lines.push(String::new());
    lines.push("Worker environment:".to_string());
    for (name, value) in config.worker_env() {
        lines.push(format!("  {name}={value}"));
    }
    lines.push(RULE.to_string());

    lines
}

/// Write the banner for `config` to `reporter`.
pub fn report_configuration(config: &RunConfiguration, reporter: &dyn SetupReporter) {
    for line in render_banner(config) {
        reporter.line(&line);
    }
}

fn availability(present: bool) -> &'static str {
    if present {
        "available"
    } else {
        "not available"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        BASE_URL, MONGODB_URI, SUPER_ADMIN_EMAIL, SUPER_ADMIN_PASSWORD, WS_ID, WS_OWNER_EMAIL,
        WS_OWNER_PASSWORD,
    };
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> RunConfiguration {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RunConfiguration::from_vars(&vars).expect("config should load")
    }

    #[test]
    fn test_ci_banner_shows_mode_url_and_derived_owner() {
        let config = config(&[
            (BASE_URL, "https://megatest.kompot.ai"),
            (WS_ID, "megatest"),
            (MONGODB_URI, "mongodb://secret-host/db"),
        ]);
        let reporter = CapturingReporter::new();

        report_configuration(&config, &reporter);
        let output = reporter.output();

        assert!(output.contains("Mode:              CI"));
        assert!(output.contains("https://megatest.kompot.ai"));
        assert!(output.contains("megatest-owner@kompot.ai"));
        assert!(output.contains("megatestOwner123!"));
        assert!(output.contains("[ run] Database verification"));
        assert!(output.contains("[skip] Super-admin tests"));
        assert!(output.contains("TEST_WSID=megatest"));
        assert!(
            !output.contains("secret-host"),
            "MONGODB_URI must not be printed"
        );
    }

    #[test]
    fn test_tester_banner_masks_owner_password() {
        let config = config(&[
            (BASE_URL, "https://acme.kompot.ai"),
            (WS_ID, "acme"),
            (WS_OWNER_EMAIL, "owner@acme.test"),
            (WS_OWNER_PASSWORD, "s3cret-pass"),
            (SUPER_ADMIN_EMAIL, "root@kompot.ai"),
            (SUPER_ADMIN_PASSWORD, "root-pass"),
        ]);
        let reporter = CapturingReporter::new();

        report_configuration(&config, &reporter);
        let output = reporter.output();

        assert!(output.contains("Mode:              Tester"));
        assert!(output.contains("owner@acme.test"));
        assert!(!output.contains("s3cret-pass"));
        assert!(!output.contains("root-pass"));
        assert!(output.contains("[skip] Database verification"));
        assert!(output.contains("[ run] Super-admin tests"));
    }

    #[test]
    fn test_banner_is_framed() {
        let config = config(&[
            (BASE_URL, "http://localhost:3000"),
            (WS_ID, "local"),
            (MONGODB_URI, "mongodb://localhost"),
        ]);

        let reporter = CapturingReporter::new();
        report_configuration(&config, &reporter);

        let lines = reporter.lines();
        assert_eq!(lines, render_banner(&config));
        assert_eq!(lines.first().map(String::as_str), Some(RULE));
        assert_eq!(lines.last().map(String::as_str), Some(RULE));
    }
}
