//! Smoke tests: authenticated API access against a live deployment.
//!
//! Requires `TEST_BASE_URL`/`BASE_URL`, `TEST_WSID`/`WS_ID` and an auth state
//! written by the login step at `.auth/storage-state.json`.

#![cfg(feature = "smoke")]

use workspace_e2e::fixtures::api_client::DEFAULT_AUTH_STATE_PATH;
use workspace_e2e::fixtures::test_data::{NewContact, NewTask};
use workspace_e2e::fixtures::{ApiClient, ApiClientConfig};

/// Helper to create an authenticated client for tests.
fn api_client() -> ApiClient {
    let config = ApiClientConfig::from_env()
        .expect("Set BASE_URL and WS_ID (or run global-setup and export TEST_BASE_URL/TEST_WSID)");
    ApiClient::new(config).expect("Failed to build API client")
}

/// Client pointing at an auth state that does not exist.
fn anonymous_client() -> ApiClient {
    let config = ApiClientConfig::from_env()
        .expect("Set BASE_URL and WS_ID")
        .with_auth_state_path("/nonexistent/storage-state.json");
    ApiClient::new(config).expect("Failed to build API client")
}

#[tokio::test]
async fn test_persisted_session_is_present() {
    let client = api_client();

    assert!(
        !client.ensure_credential().await.is_empty(),
        "No auth_session cookie in {DEFAULT_AUTH_STATE_PATH} - run the login step first"
    );
}

#[tokio::test]
async fn test_contacts_list_is_authorized() {
    let client = api_client();

    let response = client
        .get("/api/contacts")
        .await
        .expect("Contacts request should reach the server");

    assert!(
        response.status().is_success(),
        "Authenticated contacts request returned {}",
        response.status()
    );
}

#[tokio::test]
async fn test_request_without_session_is_rejected() {
    let client = anonymous_client();

    let response = client
        .get("/api/contacts")
        .await
        .expect("Contacts request should reach the server");

    assert!(
        response.status() == 401 || response.status() == 403,
        "Unauthenticated request should be rejected, got {}",
        response.status()
    );
}

#[tokio::test]
async fn test_create_contact_and_task() {
    let client = api_client();

    let response = client
        .post_json("/api/contacts", &NewContact::unique())
        .await
        .expect("Create contact request should reach the server");
    assert!(
        response.status().is_success(),
        "Create contact returned {}",
        response.status()
    );

    let response = client
        .post_json("/api/tasks", &NewTask::unique())
        .await
        .expect("Create task request should reach the server");
    assert!(
        response.status().is_success(),
        "Create task returned {}",
        response.status()
    );
}
