//! Kompot Workspace E2E Harness
//!
//! Core of the end-to-end suite for the Kompot multi-tenant workspace
//! application (contacts, invoices, payments, tasks, agreements, chat,
//! knowledge base). The browser-driven UI tests live outside this crate;
//! this crate provides what they share:
//!
//! - [`config`]: resolves the run configuration (CI or Tester mode) from the
//!   environment and fails fast on missing variables
//! - [`banner`]: the operator-facing configuration banner
//! - [`auth_state`]: the persisted browser auth state written by the login step
//! - [`fixtures`]: the authenticated API client and unique test data
//!
//! # Modes
//!
//! - **CI**: `MONGODB_URI` is set. Full suite with database verification,
//!   owner login derived from `WS_ID`.
//! - **Tester**: no `MONGODB_URI`. UI/API tests against an existing
//!   workspace using `WS_OWNER_EMAIL` / `WS_OWNER_PASSWORD`.
//!
//! # Usage
//!
//! ```bash
//! # Validate the environment and print the banner
//! BASE_URL=https://megatest.kompot.ai WS_ID=megatest MONGODB_URI=... \
//!     cargo run -p workspace-e2e --bin global-setup
//!
//! # Offline tests only
//! cargo test -p workspace-e2e
//!
//! # API smoke tests against a live deployment
//! cargo test -p workspace-e2e --features smoke
//! ```

pub mod auth_state;
pub mod banner;
pub mod config;
pub mod fixtures;
