//! Auth failure taxonomy.
//!
//! Every variant collapses to one of two fixed user-visible messages, but the
//! variants stay distinguishable for callers and tests.

use thiserror::Error;

use crate::role::Role;

/// Fixed denial message for every unauthenticated outcome.
pub const MSG_AUTHENTICATION_REQUIRED: &str = "authentication required";

/// Fixed denial message for every authorization outcome.
pub const MSG_UNAUTHORIZED_ACTION: &str = "unauthorized action";

/// Why a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFault {
    BadSignature,
    Malformed,
    Expired,
}

impl core::fmt::Display for TokenFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            TokenFault::BadSignature => "bad signature",
            TokenFault::Malformed => "malformed",
            TokenFault::Expired => "expired",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown username or wrong password. Callers must not reveal which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No token is persisted locally (logged out).
    #[error("no local session token")]
    TokenMissing,

    /// A token was found but rejected.
    #[error("session token rejected: {0}")]
    TokenInvalid(TokenFault),

    /// The token verified but its subject no longer resolves to a live
    /// identity record.
    #[error("token subject no longer resolves")]
    UnknownSubject,

    /// The resolved identity's role is outside the operation's allow-set.
    #[error("role '{role}' is not permitted for this action")]
    RoleDenied { role: Role },

    /// Object-level denial raised inside an operation body (e.g. a record
    /// not assigned to the acting employee).
    #[error("record is not owned by the acting employee")]
    OwnershipDenied,

    /// Token persistence or encoding failed; reported as an authentication
    /// failure because no identity could be established.
    #[error("authentication infrastructure failure: {0}")]
    Infrastructure(String),
}

impl AuthError {
    /// The fixed message shown to the user for this denial.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials
            | AuthError::TokenMissing
            | AuthError::TokenInvalid(_)
            | AuthError::UnknownSubject
            | AuthError::Infrastructure(_) => MSG_AUTHENTICATION_REQUIRED,
            AuthError::RoleDenied { .. } | AuthError::OwnershipDenied => MSG_UNAUTHORIZED_ACTION,
        }
    }

    pub fn is_authentication_failure(&self) -> bool {
        self.user_message() == MSG_AUTHENTICATION_REQUIRED
    }
}

impl From<crate::token::TokenParseError> for AuthError {
    fn from(value: crate::token::TokenParseError) -> Self {
        match value {
            crate::token::TokenParseError::BadSignature => {
                AuthError::TokenInvalid(TokenFault::BadSignature)
            }
            crate::token::TokenParseError::Malformed => {
                AuthError::TokenInvalid(TokenFault::Malformed)
            }
        }
    }
}

impl From<crate::claims::TokenValidationError> for AuthError {
    fn from(value: crate::claims::TokenValidationError) -> Self {
        match value {
            crate::claims::TokenValidationError::Expired => {
                AuthError::TokenInvalid(TokenFault::Expired)
            }
            // A broken time window means the payload itself is nonsense.
            crate::claims::TokenValidationError::NotYetValid
            | crate::claims::TokenValidationError::InvalidTimeWindow => {
                AuthError::TokenInvalid(TokenFault::Malformed)
            }
        }
    }
}
