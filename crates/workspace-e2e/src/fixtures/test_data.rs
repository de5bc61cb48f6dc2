//! Unique test data for entities created by tests.
//!
//! Every generator embeds a short random suffix so that parallel workers and
//! repeated runs against the same workspace never collide.

use serde::Serialize;
use uuid::Uuid;

/// Mail domain for addresses generated by tests.
pub const TEST_EMAIL_DOMAIN: &str = "e2e.kompot.test";

/// Short random suffix (12 hex characters).
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string().chars().take(12).collect()
}

/// `"{prefix} {suffix}"`, e.g. `"Invoice 3f2a9c01be44"`.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix} {}", unique_suffix())
}

/// `"{local}-{suffix}@e2e.kompot.test"`.
pub fn unique_email(local: &str) -> String {
    format!("{local}-{}@{TEST_EMAIL_DOMAIN}", unique_suffix())
}

/// Contact payload for the contacts API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewContact {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            first_name: "Test".to_string(),
            last_name: format!("Contact {suffix}"),
            email: format!("contact-{suffix}@{TEST_EMAIL_DOMAIN}"),
        }
    }
}

/// Task payload for the tasks API.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
}

impl NewTask {
    pub fn unique() -> Self {
        Self {
            title: unique_name("Task"),
            description: "Created by the E2E suite".to_string(),
        }
    }
}

/// Invoice payload for the invoices API. Amounts are in minor units.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub number: String,
    pub description: String,
    pub amount_cents: u64,
    pub currency: String,
}

impl NewInvoice {
    pub fn unique(amount_cents: u64) -> Self {
        Self {
            number: format!("E2E-{}", unique_suffix().to_uppercase()),
            description: unique_name("Invoice"),
            amount_cents,
            currency: "USD".to_string(),
        }
    }
}
