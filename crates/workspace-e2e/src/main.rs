//! Global setup for the workspace E2E suite.
//!
//! Validates the environment once before any test runs, prints the
//! configuration banner to stdout and exits `0`. Any missing required
//! variable exits `1` with remediation instructions on stderr.

use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workspace_e2e::banner::{report_configuration, StdoutReporter};
use workspace_e2e::config::RunConfiguration;

fn main() -> ExitCode {
    // Logs go to stderr so the banner on stdout stays clean.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workspace_e2e=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match RunConfiguration::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(target: "workspace_e2e.global_setup", "Global setup failed: {}", e);
            eprintln!();
            eprintln!("ERROR: {e}");
            eprintln!();
            return ExitCode::FAILURE;
        }
    };

    info!(
        target: "workspace_e2e.global_setup",
        mode = config.mode.name(),
        workspace = %config.workspace_id,
        "Configuration resolved"
    );

    report_configuration(&config, &StdoutReporter);

    ExitCode::SUCCESS
}
