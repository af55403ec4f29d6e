//! Client commands. Commercial team only.

use chrono::Utc;

use eventcrm_auth::{Role, RoleSet};
use eventcrm_core::{ClientId, DomainError};
use eventcrm_records::{ClientPatch, ClientRepository, NewClient};

use crate::cli::{AuthArgs, ClientCommand};
use crate::console::{MessageSink, Severity};
use crate::runner::{CommandEnv, run_guarded};

const CLIENT_MANAGE: RoleSet = RoleSet::of(&[Role::Commercial]);

pub fn dispatch(
    command: ClientCommand,
    env: &CommandEnv,
    messages: &dyn MessageSink,
) -> anyhow::Result<()> {
    match command {
        ClientCommand::Create {
            auth,
            last_name,
            first_name,
            email,
            phone,
            company,
        } => create(env, messages, &auth, last_name, first_name, email, phone, company),
        ClientCommand::Update {
            auth,
            id,
            last_name,
            first_name,
            email,
            phone,
            company,
        } => update(env, messages, &auth, id, ClientPatch {
            last_name,
            first_name,
            email,
            phone,
            company,
        }),
    }
}

#[allow(clippy::too_many_arguments)]
fn create(
    env: &CommandEnv,
    messages: &dyn MessageSink,
    auth: &AuthArgs,
    last_name: String,
    first_name: Option<String>,
    email: Option<String>,
    phone: Option<u64>,
    company: Option<String>,
) -> anyhow::Result<()> {
    run_guarded(env, messages, CLIENT_MANAGE, auth, |session, identity, messages| {
        // The acting commercial becomes the client's follow-up contact.
        let client = session.unit_of_work().add_client(NewClient {
            last_name,
            first_name,
            email,
            phone,
            company,
            commercial_id: identity.id,
            created_at: Utc::now(),
        });

        messages.report(
            &format!("New client: id={}, name={}", client.id, client.full_name()),
            Severity::Confirm,
        );
        Ok(())
    })
}

fn update(
    env: &CommandEnv,
    messages: &dyn MessageSink,
    auth: &AuthArgs,
    id: ClientId,
    patch: ClientPatch,
) -> anyhow::Result<()> {
    run_guarded(env, messages, CLIENT_MANAGE, auth, |session, _identity, messages| {
        let uow = session.unit_of_work();
        let mut client = uow.client(id).ok_or(DomainError::NotFound)?;
        patch.apply(&mut client, Utc::now());
        uow.save_client(&client)?;

        messages.report(
            &format!("Client updated: id={}, name={}", client.id, client.full_name()),
            Severity::Confirm,
        );
        Ok(())
    })
}
