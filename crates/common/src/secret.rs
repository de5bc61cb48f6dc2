//! Secret types for protecting credentials from accidental logging.
//!
//! Re-exports the [`secrecy`] types used for workspace owner passwords,
//! super-admin passwords, database URIs and session cookies. `SecretString`
//! implements `Debug` with redaction, so deriving `Debug` on a struct that
//! holds one is safe for `{:?}` and tracing fields.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct OwnerLogin {
//!     email: String,
//!     password: SecretString,
//! }
//!
//! let login = OwnerLogin {
//!     email: "megatest-owner@kompot.ai".to_string(),
//!     password: SecretString::from("megatestOwner123!"),
//! };
//!
//! assert!(!format!("{login:?}").contains("megatestOwner123!"));
//! assert_eq!(login.password.expose_secret(), "megatestOwner123!");
//! ```

pub use secrecy::{ExposeSecret, SecretString};

/// Mask a secret for operator-facing output, keeping only its length visible.
#[must_use]
pub fn mask(secret: &SecretString) -> String {
    "*".repeat(secret.expose_secret().chars().count().min(12))
}
