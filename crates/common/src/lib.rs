//! Common types shared across the Kompot workspace E2E harness.

#![warn(clippy::pedantic)]

/// Module for tenant-scoped identifier types
pub mod types;

/// Module for secret types that prevent accidental logging
pub mod secret;
