//! Composable guards around command execution.
//!
//! A command invocation runs through an ordered chain of guards before its
//! body executes. Each guard inspects the shared [`GuardContext`] and either
//! lets the chain continue or denies the invocation. A denial is final for
//! that invocation; there are no retries at this layer.
//!
//! Ordering is fixed by construction: the authentication gate must precede
//! the authorization gate, because the latter reads the resolved identity.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::claims::validate_claims;
use crate::credentials::{CredentialStore, Credentials};
use crate::employee::{Employee, IdentityRepository};
use crate::error::AuthError;
use crate::role::RoleSet;
use crate::telemetry::TelemetrySink;
use crate::token::TokenCodec;
use crate::token_store::TokenStore;

/// Per-invocation state shared along the guard chain.
pub struct GuardContext<'a> {
    repo: &'a dyn IdentityRepository,
    credentials: Option<Credentials>,
    now: DateTime<Utc>,
    identity: Option<Employee>,
}

impl<'a> GuardContext<'a> {
    pub fn new(
        repo: &'a dyn IdentityRepository,
        credentials: Option<Credentials>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            repo,
            credentials,
            now,
            identity: None,
        }
    }

    pub fn repo(&self) -> &dyn IdentityRepository {
        self.repo
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// The resolved identity, once the authentication gate has run.
    pub fn identity(&self) -> Option<&Employee> {
        self.identity.as_ref()
    }

    pub fn set_identity(&mut self, employee: Employee) {
        self.identity = Some(employee);
    }

    pub fn into_identity(self) -> Option<Employee> {
        self.identity
    }
}

/// One stage of the chain.
pub trait Guard {
    fn check(&self, ctx: &mut GuardContext<'_>) -> Result<(), AuthError>;
}

/// Ordered list of guards, run with short-circuit on the first denial.
#[derive(Default)]
pub struct GuardChain {
    guards: Vec<Box<dyn Guard>>,
}

impl GuardChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, guard: impl Guard + 'static) -> Self {
        self.guards.push(Box::new(guard));
        self
    }

    pub fn run(&self, ctx: &mut GuardContext<'_>) -> Result<(), AuthError> {
        for guard in &self.guards {
            guard.check(ctx)?;
        }
        Ok(())
    }
}

/// Resolves the acting identity, from explicit credentials or the persisted
/// token.
///
/// Supplying credentials to *any* guarded operation performs a full login:
/// on success a fresh token is issued and persisted, replacing the previous
/// one. The explicit `login` command goes through the same path, so the two
/// cannot drift apart.
pub struct AuthenticationGate {
    codec: Arc<TokenCodec>,
    credentials: CredentialStore,
    tokens: Arc<dyn TokenStore>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl AuthenticationGate {
    pub fn new(
        codec: Arc<TokenCodec>,
        tokens: Arc<dyn TokenStore>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            codec,
            credentials: CredentialStore,
            tokens,
            telemetry,
        }
    }

    /// Verify credentials and, on success, persist a fresh token.
    pub fn login(
        &self,
        repo: &dyn IdentityRepository,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Employee, AuthError> {
        let employee = self
            .credentials
            .verify(repo, username, password)
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self
            .codec
            .issue(&employee, now)
            .map_err(|e| AuthError::Infrastructure(e.to_string()))?;
        self.tokens
            .save(&token)
            .map_err(|e| AuthError::Infrastructure(e.to_string()))?;

        tracing::debug!(employee = %employee.id, "login: token issued and persisted");
        Ok(employee)
    }

    /// Resolve the identity from the persisted token.
    fn resolve_from_token(
        &self,
        repo: &dyn IdentityRepository,
        now: DateTime<Utc>,
    ) -> Result<Employee, AuthError> {
        let raw = self
            .tokens
            .load()
            .map_err(|e| AuthError::Infrastructure(e.to_string()))?
            .ok_or(AuthError::TokenMissing)?;

        let claims = self.codec.parse(&raw)?;
        validate_claims(&claims, now)?;

        // Re-resolve against current state; claims are not trusted for role
        // data, and id + username must still match one live record.
        repo.find_by_id_and_username(claims.sub, &claims.username)
            .ok_or(AuthError::UnknownSubject)
    }
}

impl Guard for AuthenticationGate {
    fn check(&self, ctx: &mut GuardContext<'_>) -> Result<(), AuthError> {
        let employee = match ctx.credentials() {
            Some(creds) => self.login(ctx.repo(), &creds.username, &creds.password, ctx.now())?,
            None => self.resolve_from_token(ctx.repo(), ctx.now())?,
        };

        self.telemetry
            .attach_identity(employee.id, employee.username.as_str());
        ctx.set_identity(employee);
        Ok(())
    }
}

/// Permits the invocation only if the resolved identity's role is in the
/// operation's allow-set.
pub struct AuthorizationGate {
    allow: RoleSet,
}

impl AuthorizationGate {
    pub const fn new(allow: RoleSet) -> Self {
        Self { allow }
    }

    /// The static allow-set this gate enforces.
    pub fn allow(&self) -> RoleSet {
        self.allow
    }
}

impl Guard for AuthorizationGate {
    fn check(&self, ctx: &mut GuardContext<'_>) -> Result<(), AuthError> {
        // Running without a resolved identity means the chain was assembled
        // out of order; report it as the unauthenticated denial.
        let identity = ctx.identity().ok_or(AuthError::TokenMissing)?;

        if self.allow.contains(identity.role) {
            Ok(())
        } else {
            Err(AuthError::RoleDenied {
                role: identity.role,
            })
        }
    }
}
