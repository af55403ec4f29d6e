//! Token claims model and deterministic claim validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use eventcrm_core::EmployeeId;

/// The claims carried by a session token.
///
/// This is the minimal set the command surface expects once a token has been
/// decoded and its signature verified by [`crate::TokenCodec`]. Immutable
/// once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the employee this token asserts.
    pub sub: EmployeeId,

    /// Subject's username at issue time (re-checked against current state
    /// on every use).
    pub username: String,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate token claims against `now`.
///
/// Note: this validates the *claims* only. Signature verification and
/// decoding live in the codec; expiry policy belongs to the caller, which is
/// why `now` is a parameter. A token is valid strictly before `expires_at`.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> TokenClaims {
        TokenClaims {
            sub: EmployeeId::new(7),
            username: "homer".to_string(),
            issued_at,
            expires_at,
        }
    }

    #[test]
    fn valid_strictly_before_expiry() {
        let now = Utc::now();
        let c = claims(now, now + Duration::hours(24));
        assert_eq!(validate_claims(&c, now), Ok(()));
        assert_eq!(
            validate_claims(&c, now + Duration::hours(24) - Duration::seconds(1)),
            Ok(())
        );
    }

    #[test]
    fn expired_at_and_after_boundary() {
        let now = Utc::now();
        let c = claims(now, now + Duration::hours(24));
        assert_eq!(
            validate_claims(&c, now + Duration::hours(24)),
            Err(TokenValidationError::Expired)
        );
        assert_eq!(
            validate_claims(&c, now + Duration::hours(25)),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn rejects_future_issue_and_inverted_window() {
        let now = Utc::now();
        let c = claims(now + Duration::hours(1), now + Duration::hours(2));
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::NotYetValid));

        let c = claims(now, now - Duration::hours(1));
        assert_eq!(
            validate_claims(&c, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }
}
