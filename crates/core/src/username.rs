//! Username value object.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A validated login name: at most 30 alphanumeric characters, non-empty.
///
/// Validation happens on construction so every `Username` in the system is
/// known-good; storage and display code never re-check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub const MAX_LEN: usize = 30;

    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::validation("username must not be empty"));
        }
        if raw.chars().count() > Self::MAX_LEN {
            return Err(DomainError::validation(format!(
                "username must be {} characters or less",
                Self::MAX_LEN
            )));
        }
        if !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::validation(
                "username must be alphanumeric, no special characters",
            ));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Username {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::str::FromStr for Username {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
