//! Test fixtures for interacting with the application under test.

pub mod api_client;
pub mod test_data;

pub use api_client::{ApiClient, ApiClientConfig, RequestOptions};
