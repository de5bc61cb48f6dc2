//! Authenticated API client fixture.
//!
//! Issues requests against the application's API as the user whose browser
//! session was persisted by the login step. The session cookie is read from
//! the auth state artifact the first time a request needs it and reused for
//! the lifetime of the client.

use crate::auth_state::{PersistedAuthState, SESSION_COOKIE_NAME};
use crate::config::{lookup, ConfigError, BASE_URL, TEST_BASE_URL, TEST_WSID, WS_ID};
use common::secret::{ExposeSecret, SecretString};
use common::types::WorkspaceId;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, instrument, warn};

/// Location of the storage state written by the login step, relative to the
/// working directory of the test run.
pub const DEFAULT_AUTH_STATE_PATH: &str = ".auth/storage-state.json";

/// Default HTTP request timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Name of the workspace-scope cookie.
pub const WORKSPACE_COOKIE_NAME: &str = "WORKSPACE_ID";

/// API client errors.
#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("JSON serialization failed: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub workspace_id: WorkspaceId,
    pub auth_state_path: PathBuf,
    pub http_timeout: Duration,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>, workspace_id: WorkspaceId) -> Self {
        Self {
            base_url: base_url.into(),
            workspace_id,
            auth_state_path: PathBuf::from(DEFAULT_AUTH_STATE_PATH),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }

    pub fn with_auth_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.auth_state_path = path.into();
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Load settings from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load settings from a map of variables (for testing).
    ///
    /// Worker variables exported by global setup (`TEST_BASE_URL`,
    /// `TEST_WSID`) take precedence over `BASE_URL` and `WS_ID`.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let base_url = lookup(vars, TEST_BASE_URL)
            .or_else(|| lookup(vars, BASE_URL))
            .ok_or(ConfigError::MissingBaseUrl)?;

        let workspace_id = lookup(vars, TEST_WSID)
            .or_else(|| lookup(vars, WS_ID))
            .ok_or(ConfigError::MissingWorkspaceId)?;

        Ok(Self::new(base_url, WorkspaceId::parse(workspace_id)?))
    }
}

/// Session cookie pair (`auth_session=<token>`), or nothing when no session
/// could be loaded.
#[derive(Clone, Default)]
pub struct SessionCredential(Option<SecretString>);

impl SessionCredential {
    pub fn from_token(token: &str) -> Self {
        Self(Some(SecretString::from(format!(
            "{SESSION_COOKIE_NAME}={token}"
        ))))
    }

    /// The formatted cookie pair, if a session is available.
    pub fn cookie_pair(&self) -> Option<&str> {
        self.0.as_ref().map(|pair| pair.expose_secret())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl std::fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.is_empty() { "[EMPTY]" } else { "[REDACTED]" };
        f.debug_tuple("SessionCredential").field(&state).finish()
    }
}

/// Per-request options. Defaults to a `GET` without body or extra headers.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add a header. Overrides the client's default header of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the request body.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(value)?;
        Ok(self.body(body))
    }
}

/// Client for authenticated requests against the application API.
pub struct ApiClient {
    config: ApiClientConfig,
    http_client: Client,
    credential: OnceCell<SessionCredential>,
}

impl ApiClient {
    /// Create a new client. No I/O happens until the first request.
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiClientError> {
        let http_client = Client::builder().timeout(config.http_timeout).build()?;

        Ok(Self {
            config,
            http_client,
            credential: OnceCell::new(),
        })
    }

    /// Resolve the session credential, reading the auth state at most once.
    ///
    /// Never fails: an unusable artifact is logged and yields an empty
    /// credential, so subsequent requests go out unauthenticated.
    pub async fn ensure_credential(&self) -> &SessionCredential {
        self.credential
            .get_or_init(|| load_session_credential(&self.config.auth_state_path))
            .await
    }

    /// Value of the `Cookie` header sent with every request.
    pub fn cookie_header(&self, credential: &SessionCredential) -> String {
        let workspace = format!("{WORKSPACE_COOKIE_NAME}={}", self.config.workspace_id);

        match credential.cookie_pair() {
            Some(session) => format!("{workspace}; {session}"),
            None => workspace,
        }
    }

    /// Issue an authenticated request to `{base_url}{path}` and return the raw
    /// response. Status codes are not checked.
    #[instrument(skip_all, fields(path = %path))]
    pub async fn fetch(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, ApiClientError> {
        let credential = self.ensure_credential().await;

        let url = format!("{}{}", self.config.base_url, path);
        let method = options.method.unwrap_or(Method::GET);

        let defaults = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Cookie".to_string(), self.cookie_header(credential)),
        ];
        let headers = to_header_map(merge_headers(defaults, &options.headers))?;

        debug!(
            target: "workspace_e2e.api_client",
            method = %method,
            url = %url,
            authenticated = !credential.is_empty(),
            "Sending API request"
        );

        let mut request = self.http_client.request(method, &url).headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        Ok(request.send().await?)
    }

    pub async fn get(&self, path: &str) -> Result<Response, ApiClientError> {
        self.fetch(path, RequestOptions::new()).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, ApiClientError> {
        let options = RequestOptions::new().method(Method::POST).json(body)?;
        self.fetch(path, options).await
    }

    pub async fn put_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, ApiClientError> {
        let options = RequestOptions::new().method(Method::PUT).json(body)?;
        self.fetch(path, options).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, ApiClientError> {
        self.fetch(path, RequestOptions::new().method(Method::DELETE))
            .await
    }
}

async fn load_session_credential(path: &Path) -> SessionCredential {
    let state = match PersistedAuthState::load(path).await {
        Ok(state) => state,
        Err(e) => {
            warn!(
                target: "workspace_e2e.api_client",
                error = %e,
                "Auth state unavailable, API requests will be unauthenticated"
            );
            return SessionCredential::default();
        }
    };

    match state.session_token() {
        Some(token) => {
            debug!(
                target: "workspace_e2e.api_client",
                path = %path.display(),
                "Loaded session cookie from auth state"
            );
            SessionCredential::from_token(token)
        }
        None => {
            warn!(
                target: "workspace_e2e.api_client",
                path = %path.display(),
                cookie = SESSION_COOKIE_NAME,
                "Session cookie not found in auth state, API requests will be unauthenticated"
            );
            SessionCredential::default()
        }
    }
}

/// Merge caller headers over defaults. Names compare case-insensitively and
/// the caller wins on collision.
fn merge_headers(
    defaults: Vec<(String, String)>,
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = defaults
        .into_iter()
        .filter(|(name, _)| {
            !overrides
                .iter()
                .any(|(override_name, _)| override_name.eq_ignore_ascii_case(name))
        })
        .collect();

    merged.extend(overrides.iter().cloned());
    merged
}

fn to_header_map(headers: Vec<(String, String)>) -> Result<HeaderMap, ApiClientError> {
    let mut map = HeaderMap::with_capacity(headers.len());

    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ApiClientError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(&value).map_err(|e| ApiClientError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;

        map.insert(header_name, header_value);
    }

    Ok(map)
}
