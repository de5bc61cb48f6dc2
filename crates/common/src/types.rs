//! Tenant-scoped identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reasons a workspace identifier is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidWorkspaceId {
    /// The identifier is empty or only whitespace.
    #[error("workspace identifier is empty")]
    Empty,

    /// The identifier contains a character that cannot appear in a cookie value.
    #[error("workspace identifier {id:?} contains forbidden character {ch:?}")]
    ForbiddenCharacter { id: String, ch: char },
}

/// Identifier of a workspace (tenant) in the application under test.
///
/// The identifier is sent verbatim as the `WORKSPACE_ID` cookie and is used to
/// derive CI owner credentials, so it is restricted to characters that are
/// valid inside a cookie value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkspaceId(String);

impl WorkspaceId {
    /// Parse a workspace identifier, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidWorkspaceId`] if the identifier is empty or contains
    /// whitespace, control characters, `;`, `,`, `=` or `"`.
    pub fn parse(raw: &str) -> Result<Self, InvalidWorkspaceId> {
        let id = raw.trim();
        if id.is_empty() {
            return Err(InvalidWorkspaceId::Empty);
        }

        if let Some(ch) = id
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || matches!(c, ';' | ',' | '=' | '"'))
        {
            return Err(InvalidWorkspaceId::ForbiddenCharacter {
                id: id.to_string(),
                ch,
            });
        }

        Ok(Self(id.to_string()))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for WorkspaceId {
    type Error = InvalidWorkspaceId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WorkspaceId> for String {
    fn from(id: WorkspaceId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_plain_identifier() {
        let id = WorkspaceId::parse("megatest").unwrap();
        assert_eq!(id.as_str(), "megatest");
        assert_eq!(id.to_string(), "megatest");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id = WorkspaceId::parse("  ci-run-42\n").unwrap();
        assert_eq!(id.as_str(), "ci-run-42");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(WorkspaceId::parse(""), Err(InvalidWorkspaceId::Empty));
        assert_eq!(WorkspaceId::parse("   "), Err(InvalidWorkspaceId::Empty));
    }

    #[test]
    fn test_parse_rejects_cookie_separators() {
        for raw in ["mega;test", "mega test", "mega=test", "mega,test"] {
            let result = WorkspaceId::parse(raw);
            assert!(
                matches!(result, Err(InvalidWorkspaceId::ForbiddenCharacter { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_serde_validates() {
        let id: WorkspaceId = serde_json::from_str(r#""megatest""#).expect("deserialize");
        assert_eq!(id.as_str(), "megatest");

        let result: Result<WorkspaceId, _> = serde_json::from_str(r#""bad;id""#);
        assert!(result.is_err());

        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, r#""megatest""#);
    }
}
