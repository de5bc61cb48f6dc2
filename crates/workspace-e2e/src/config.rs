//! Run configuration resolved from the process environment.
//!
//! The resolver decides once, before any test executes, whether the run is a
//! CI run (database access, full suite) or a Tester run (UI/API only, logging
//! into a pre-existing workspace). Every validation failure is returned as a
//! [`ConfigError`] whose message names the variable and how to set it; the
//! `global-setup` binary turns any error into a non-zero exit.

use common::secret::SecretString;
use common::types::{InvalidWorkspaceId, WorkspaceId};
use std::collections::HashMap;
use std::env;
use thiserror::Error;

pub const WS_ID: &str = "WS_ID";
pub const BASE_URL: &str = "BASE_URL";
pub const MONGODB_URI: &str = "MONGODB_URI";
pub const SUPER_ADMIN_EMAIL: &str = "SUPER_ADMIN_EMAIL";
pub const SUPER_ADMIN_PASSWORD: &str = "SUPER_ADMIN_PASSWORD";
pub const WS_OWNER_EMAIL: &str = "WS_OWNER_EMAIL";
pub const WS_OWNER_PASSWORD: &str = "WS_OWNER_PASSWORD";
pub const TEST_BASE_URL: &str = "TEST_BASE_URL";
pub const TEST_WSID: &str = "TEST_WSID";

/// Mail domain of the owner accounts seeded into ephemeral CI workspaces.
pub const CI_OWNER_EMAIL_DOMAIN: &str = "kompot.ai";

/// Configuration errors. All of them are fatal for the run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "BASE_URL is not set. Export the URL of the application under test, \
         e.g. `export BASE_URL=https://megatest.kompot.ai`"
    )]
    MissingBaseUrl,

    #[error(
        "WS_ID is not set. Export the identifier of the workspace to test, \
         e.g. `export WS_ID=megatest`"
    )]
    MissingWorkspaceId,

    #[error("WS_ID is invalid: {0}. Use the bare workspace identifier, e.g. `megatest`")]
    InvalidWorkspaceId(#[from] InvalidWorkspaceId),

    #[error(
        "Tester mode (no MONGODB_URI) needs the credentials of an existing workspace owner, \
         but these variables are not set: {}. Ask the owner of workspace '{workspace_id}' for an owner login \
         and export WS_OWNER_EMAIL and WS_OWNER_PASSWORD, or set MONGODB_URI to run in CI mode",
        .missing.join(", ")
    )]
    MissingOwnerCredentials {
        workspace_id: String,
        missing: Vec<&'static str>,
    },
}

/// Login of a workspace owner account.
#[derive(Debug, Clone)]
pub struct OwnerCredentials {
    pub email: String,
    pub password: SecretString,
}

impl OwnerCredentials {
    /// Deterministic owner login of an ephemeral CI workspace.
    ///
    /// Not a secret: CI workspaces are seeded with exactly this account.
    pub fn derived_for(workspace_id: &WorkspaceId) -> Self {
        Self {
            email: format!("{workspace_id}-owner@{CI_OWNER_EMAIL_DOMAIN}"),
            password: SecretString::from(format!("{workspace_id}Owner123!")),
        }
    }
}

/// Login of the platform super admin, used by admin-only tests.
#[derive(Debug, Clone)]
pub struct SuperAdminCredentials {
    pub email: String,
    pub password: SecretString,
}

/// How the suite runs. The mode is a pure function of `MONGODB_URI` presence.
#[derive(Debug, Clone)]
pub enum RunMode {
    /// Full suite with database-backed verification.
    Ci { mongodb_uri: SecretString },

    /// UI/API-only run against a pre-existing workspace.
    Tester { owner: OwnerCredentials },
}

impl RunMode {
    /// Short operator-facing name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            RunMode::Ci { .. } => "CI",
            RunMode::Tester { .. } => "Tester",
        }
    }
}

/// Configuration of one suite run, derived once per process.
#[derive(Debug, Clone)]
pub struct RunConfiguration {
    pub workspace_id: WorkspaceId,
    pub base_url: String,
    pub super_admin: Option<SuperAdminCredentials>,
    pub mode: RunMode,
}

impl RunConfiguration {
    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Resolve the configuration from a map of variables (for testing).
    ///
    /// Empty or whitespace-only values are treated as unset. Owner and
    /// super-admin credentials are kept exactly as given.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let base_url = lookup(vars, BASE_URL)
            .ok_or(ConfigError::MissingBaseUrl)?
            .to_string();

        let workspace_id = WorkspaceId::parse(
            lookup(vars, WS_ID).ok_or(ConfigError::MissingWorkspaceId)?,
        )?;

        let super_admin = match (
            lookup_verbatim(vars, SUPER_ADMIN_EMAIL),
            lookup_verbatim(vars, SUPER_ADMIN_PASSWORD),
        ) {
            (Some(email), Some(password)) => Some(SuperAdminCredentials {
                email: email.to_string(),
                password: SecretString::from(password.to_string()),
            }),
            _ => None,
        };

        let mode = match lookup(vars, MONGODB_URI) {
            Some(uri) => RunMode::Ci {
                mongodb_uri: SecretString::from(uri.to_string()),
            },
            None => {
                let email = lookup_verbatim(vars, WS_OWNER_EMAIL);
                let password = lookup_verbatim(vars, WS_OWNER_PASSWORD);

                match (email, password) {
                    (Some(email), Some(password)) => RunMode::Tester {
                        owner: OwnerCredentials {
                            email: email.to_string(),
                            password: SecretString::from(password.to_string()),
                        },
                    },
                    _ => {
                        let missing = [(WS_OWNER_EMAIL, email), (WS_OWNER_PASSWORD, password)]
                            .into_iter()
                            .filter(|(_, value)| value.is_none())
                            .map(|(name, _)| name)
                            .collect();

                        return Err(ConfigError::MissingOwnerCredentials {
                            workspace_id: workspace_id.to_string(),
                            missing,
                        });
                    }
                }
            }
        };

        Ok(Self {
            workspace_id,
            base_url,
            super_admin,
            mode,
        })
    }

    pub fn has_database_access(&self) -> bool {
        matches!(self.mode, RunMode::Ci { .. })
    }

    pub fn has_super_admin_credentials(&self) -> bool {
        self.super_admin.is_some()
    }

    /// Owner login used by the suite: derived in CI mode, verbatim in Tester mode.
    pub fn owner_credentials(&self) -> OwnerCredentials {
        match &self.mode {
            RunMode::Ci { .. } => OwnerCredentials::derived_for(&self.workspace_id),
            RunMode::Tester { owner } => owner.clone(),
        }
    }

    /// Variables that worker processes inherit to reach the same deployment.
    pub fn worker_env(&self) -> Vec<(&'static str, String)> {
        vec![
            (TEST_BASE_URL, self.base_url.clone()),
            (TEST_WSID, self.workspace_id.to_string()),
        ]
    }
}

/// Test categories enabled for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCategories {
    pub ui_flows: bool,
    pub api_flows: bool,
    pub database_verification: bool,
    pub super_admin: bool,
}

impl TestCategories {
    pub fn for_config(config: &RunConfiguration) -> Self {
        Self {
            ui_flows: true,
            api_flows: true,
            database_verification: config.has_database_access(),
            super_admin: config.has_super_admin_credentials(),
        }
    }

    /// Categories with their display label, in banner order.
    pub fn entries(&self) -> [(&'static str, bool); 4] {
        [
            ("UI flows", self.ui_flows),
            ("API flows", self.api_flows),
            ("Database verification", self.database_verification),
            ("Super-admin tests", self.super_admin),
        ]
    }
}

/// Look up a variable, treating empty values as unset.
pub(crate) fn lookup<'a>(vars: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    vars.get(name)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

/// Look up a credential. Blank values count as unset, but a present value is
/// returned untrimmed.
fn lookup_verbatim<'a>(vars: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    vars.get(name)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}
