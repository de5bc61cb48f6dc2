//! Persisted browser authentication state.
//!
//! A prior login step saves the browser storage state as JSON. Only the
//! `cookies` array is read here, and only the `auth_session` cookie matters
//! for authenticated API requests.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the session cookie issued by the application on login.
pub const SESSION_COOKIE_NAME: &str = "auth_session";

/// Errors reading the auth state artifact.
#[derive(Debug, Error)]
pub enum AuthStateError {
    #[error("Failed to read auth state file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid auth state JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Browser storage state snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct PersistedAuthState {
    pub cookies: Vec<StoredCookie>,
}

/// A cookie record from the storage state.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub expires: Option<f64>,
    #[serde(default)]
    pub http_only: Option<bool>,
    #[serde(default)]
    pub secure: Option<bool>,
    #[serde(default)]
    pub same_site: Option<String>,
}

impl std::fmt::Debug for StoredCookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCookie")
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .field("domain", &self.domain)
            .field("path", &self.path)
            .field("expires", &self.expires)
            .field("http_only", &self.http_only)
            .field("secure", &self.secure)
            .field("same_site", &self.same_site)
            .finish()
    }
}

impl PersistedAuthState {
    /// Read and parse the artifact at `path`.
    pub async fn load(path: &Path) -> Result<Self, AuthStateError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| AuthStateError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        serde_json::from_str(&raw).map_err(|source| AuthStateError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// First cookie with the given name.
    pub fn cookie(&self, name: &str) -> Option<&StoredCookie> {
        self.cookies.iter().find(|cookie| cookie.name == name)
    }

    /// Value of the `auth_session` cookie, if present.
    pub fn session_token(&self) -> Option<&str> {
        self.cookie(SESSION_COOKIE_NAME)
            .map(|cookie| cookie.value.as_str())
    }
}
