//! Credential verification against stored password hashes.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

use crate::employee::{Employee, IdentityRepository};

/// A username/password pair supplied explicitly with an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("password hashing failed: {0}")]
pub struct CredentialError(pub String);

/// Verifies plaintext passwords against Argon2id PHC strings and produces
/// fresh hashes for provisioning.
///
/// Hashes carry a per-record random salt; parameters (memory, iterations)
/// travel inside the PHC string, so they can be tuned without invalidating
/// existing records.
#[derive(Debug, Default, Clone, Copy)]
pub struct CredentialStore;

impl CredentialStore {
    /// Hash a plaintext password with a fresh random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, CredentialError> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes).map_err(|e| CredentialError(e.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| CredentialError(e.to_string()))?;

        let phc = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError(e.to_string()))?
            .to_string();
        Ok(phc)
    }

    /// Verify a plaintext password against a stored PHC string.
    ///
    /// An empty or unparseable stored hash (deactivated employee) verifies
    /// false, never errors.
    pub fn verify_password(&self, stored_hash: &str, password: &str) -> bool {
        match PasswordHash::new(stored_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Resolve an identity from a username/password pair.
    ///
    /// Unknown username and wrong password are indistinguishable to the
    /// caller: both return `None`.
    pub fn verify(
        &self,
        repo: &dyn IdentityRepository,
        username: &str,
        password: &str,
    ) -> Option<Employee> {
        let employee = repo.find_by_username(username)?;
        if self.verify_password(&employee.password_hash, password) {
            Some(employee)
        } else {
            None
        }
    }
}
