//! Signed token codec.
//!
//! Tokens are compact signed strings (HS256 JWS). The codec pins the
//! algorithm on the decoding side: whatever `alg` a presented token claims
//! in its header, only the configured algorithm is ever used for
//! verification, so a forged header cannot downgrade the check.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use thiserror::Error;

use crate::claims::TokenClaims;
use crate::employee::Employee;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenParseError {
    /// The signature did not verify under the installation secret, or the
    /// token demanded a different algorithm.
    #[error("token signature verification failed")]
    BadSignature,

    /// The token structure could not be decoded.
    #[error("token is malformed")]
    Malformed,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("token encoding failed: {0}")]
pub struct TokenIssueError(pub String);

/// Encodes and decodes session tokens under one installation secret.
///
/// Expiry is *not* checked here — callers apply [`crate::validate_claims`]
/// with their own notion of `now`, so expiry policy stays at the call site.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    validity: Duration,
}

impl TokenCodec {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    pub fn new(secret: &[u8], validity: Duration) -> Self {
        let mut validation = Validation::new(Self::ALGORITHM);
        // Expiry is the caller's concern, and claims use structured
        // timestamps rather than the registered `exp` claim.
        validation.validate_exp = false;
        validation.set_required_spec_claims::<&str>(&[]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            validity,
        }
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Issue a token asserting `employee`, valid from `now` for the
    /// configured duration.
    pub fn issue(&self, employee: &Employee, now: DateTime<Utc>) -> Result<String, TokenIssueError> {
        let claims = TokenClaims {
            sub: employee.id,
            username: employee.username.as_str().to_string(),
            issued_at: now,
            expires_at: now + self.validity,
        };

        jsonwebtoken::encode(&Header::new(Self::ALGORITHM), &claims, &self.encoding)
            .map_err(|e| TokenIssueError(e.to_string()))
    }

    /// Decode a token and verify its signature. No field is trusted before
    /// the signature check passes.
    pub fn parse(&self, token: &str) -> Result<TokenClaims, TokenParseError> {
        jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName => TokenParseError::BadSignature,
                _ => TokenParseError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventcrm_core::{EmployeeId, Username};

    use crate::claims::{TokenValidationError, validate_claims};
    use crate::role::Role;

    fn employee() -> Employee {
        Employee {
            id: EmployeeId::new(12),
            username: Username::parse("lisa").unwrap(),
            password_hash: "unused".to_string(),
            role: Role::Commercial,
        }
    }

    fn codec() -> TokenCodec {
        TokenCodec::new(b"installation-secret", Duration::hours(24))
    }

    #[test]
    fn round_trip_preserves_subject_and_expiry() {
        let codec = codec();
        let now = Utc::now();
        let token = codec.issue(&employee(), now).unwrap();

        let claims = codec.parse(&token).unwrap();
        assert_eq!(claims.sub, EmployeeId::new(12));
        assert_eq!(claims.username, "lisa");
        assert_eq!(claims.issued_at, now);
        assert_eq!(claims.expires_at, now + Duration::hours(24));
    }

    #[test]
    fn wrong_secret_is_a_signature_failure() {
        let now = Utc::now();
        let token = codec().issue(&employee(), now).unwrap();

        let other = TokenCodec::new(b"someone-elses-secret", Duration::hours(24));
        assert_eq!(other.parse(&token), Err(TokenParseError::BadSignature));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(codec().parse("not-a-token"), Err(TokenParseError::Malformed));
        assert_eq!(codec().parse(""), Err(TokenParseError::Malformed));
    }

    #[test]
    fn foreign_algorithm_header_is_rejected() {
        // A token minted under a different algorithm never reaches claim
        // decoding, even though the signing secret matches.
        let claims = TokenClaims {
            sub: EmployeeId::new(12),
            username: "lisa".to_string(),
            issued_at: Utc::now(),
            expires_at: Utc::now() + Duration::hours(1),
        };
        let foreign = jsonwebtoken::encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"installation-secret"),
        )
        .unwrap();

        assert_eq!(codec().parse(&foreign), Err(TokenParseError::BadSignature));
    }

    #[test]
    fn codec_does_not_enforce_expiry() {
        // Parsing succeeds on an expired token; the caller's claim
        // validation is what rejects it.
        let codec = codec();
        let issued = Utc::now() - Duration::hours(48);
        let token = codec.issue(&employee(), issued).unwrap();

        let claims = codec.parse(&token).unwrap();
        assert_eq!(
            validate_claims(&claims, Utc::now()),
            Err(TokenValidationError::Expired)
        );
    }
}
