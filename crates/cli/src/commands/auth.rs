//! Session commands: login and logoff.

use chrono::Utc;

use eventcrm_auth::{AuthError, TokenStore};
use eventcrm_store::Session;

use crate::console::{MessageSink, Severity};
use crate::runner::CommandEnv;

/// Verify credentials and persist a local session token.
///
/// Unknown username and wrong password produce the same generic message.
pub fn login(
    env: &CommandEnv,
    messages: &dyn MessageSink,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    let session = Session::begin(env.store())?;
    let gate = env.authentication_gate();

    match gate.login(session.unit_of_work_ref(), username, password, Utc::now()) {
        Ok(employee) => {
            tracing::info!(employee = %employee.id, "login succeeded");
            messages.report("You are now logged in.", Severity::Confirm);
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::debug!("login failed");
            messages.report("Login failed. Try again.", Severity::Warning);
        }
        Err(other) => return Err(other.into()),
    }

    // Read-only invocation: nothing to commit.
    session.close();
    Ok(())
}

/// Delete the local session token.
pub fn logoff(env: &CommandEnv, messages: &dyn MessageSink) -> anyhow::Result<()> {
    if env.tokens().clear()? {
        messages.report("Logged off; local session token removed.", Severity::Confirm);
    } else {
        messages.report("No local session detected. Nothing changed.", Severity::Info);
    }
    Ok(())
}
