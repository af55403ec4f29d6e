//! Guarded command runner: the one place where gates, session and command
//! bodies are wired together.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use eventcrm_auth::{
    AuthError, AuthenticationGate, AuthorizationGate, CredentialError, Employee, GuardChain,
    GuardContext, RoleSet, TelemetrySink, TokenCodec,
};
use eventcrm_core::DomainError;
use eventcrm_store::{FileTokenStore, JsonStore, Session};

use crate::cli::AuthArgs;
use crate::config::AppConfig;
use crate::console::{MessageSink, Severity};
use crate::telemetry::TracingTelemetry;

/// Long-lived pieces shared by every invocation: the store handle, the token
/// codec, the token slot and the telemetry sink.
pub struct CommandEnv {
    store: JsonStore,
    codec: Arc<TokenCodec>,
    tokens: Arc<FileTokenStore>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl CommandEnv {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: JsonStore::open(&config.data_path),
            codec: Arc::new(TokenCodec::new(
                config.secret.as_bytes(),
                config.token_validity,
            )),
            tokens: Arc::new(FileTokenStore::new(&config.token_path)),
            telemetry: Arc::new(TracingTelemetry),
        }
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    pub fn tokens(&self) -> &FileTokenStore {
        &self.tokens
    }

    pub fn authentication_gate(&self) -> AuthenticationGate {
        AuthenticationGate::new(
            self.codec.clone(),
            self.tokens.clone(),
            self.telemetry.clone(),
        )
    }
}

/// Failure of a guarded operation body.
#[derive(Debug, Error)]
pub enum BodyError {
    /// Object-level denial (ownership checks).
    #[error(transparent)]
    Denied(#[from] AuthError),

    /// Validation failure or missing record.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Password hashing failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

pub type BodyResult = Result<(), BodyError>;

/// Run a command body behind the authentication and authorization gates.
///
/// One session spans the whole invocation. Denials report their fixed
/// message and release the session without writing; only a body that
/// returns `Ok` commits. Infrastructure failures bubble up as hard errors.
pub fn run_guarded<F>(
    env: &CommandEnv,
    messages: &dyn MessageSink,
    allow: RoleSet,
    auth: &AuthArgs,
    body: F,
) -> anyhow::Result<()>
where
    F: FnOnce(&mut Session, &Employee, &dyn MessageSink) -> BodyResult,
{
    let mut session = Session::begin(env.store())?;
    let span = tracing::debug_span!("invocation", id = %session.correlation_id());
    let _span = span.enter();

    let chain = GuardChain::new()
        .with(env.authentication_gate())
        .with(AuthorizationGate::new(allow));

    let mut ctx = GuardContext::new(session.unit_of_work_ref(), auth.credentials(), Utc::now());
    let verdict = chain.run(&mut ctx);
    let identity = ctx.into_identity();

    if let Err(denial) = verdict {
        tracing::debug!(%denial, "invocation denied by guard chain");
        messages.report(denial.user_message(), Severity::Warning);
        session.close();
        return Ok(());
    }

    let Some(identity) = identity else {
        anyhow::bail!("guard chain passed without resolving an identity");
    };
    session.attach_identity(identity.clone());

    match body(&mut session, &identity, messages) {
        Ok(()) => {
            session.commit()?;
            Ok(())
        }
        Err(BodyError::Denied(denial)) => {
            tracing::debug!(%denial, "operation body denied");
            messages.report(denial.user_message(), Severity::Warning);
            session.close();
            Ok(())
        }
        Err(BodyError::Domain(DomainError::NotFound)) => {
            messages.report("not found", Severity::Warning);
            session.close();
            Ok(())
        }
        Err(BodyError::Domain(e)) => {
            messages.report(&e.to_string(), Severity::Alert);
            session.close();
            Ok(())
        }
        Err(BodyError::Credential(e)) => {
            messages.report(&e.to_string(), Severity::Alert);
            session.close();
            Ok(())
        }
    }
}
