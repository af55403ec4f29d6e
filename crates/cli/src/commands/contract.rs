//! Contract commands.

use chrono::Utc;

use eventcrm_auth::{AuthError, Role, RoleSet};
use eventcrm_core::{ClientId, ContractId, DomainError};
use eventcrm_records::{ClientRepository, ContractPatch, ContractRepository, NewContract};

use crate::cli::{AuthArgs, ContractCommand};
use crate::console::{MessageSink, Severity};
use crate::runner::{CommandEnv, run_guarded};

const CONTRACT_CREATE: RoleSet = RoleSet::of(&[Role::Management]);
const CONTRACT_UPDATE: RoleSet = RoleSet::of(&[Role::Management, Role::Commercial]);
const CONTRACT_LIST: RoleSet = RoleSet::of(&[Role::Commercial]);

pub fn dispatch(
    command: ContractCommand,
    env: &CommandEnv,
    messages: &dyn MessageSink,
) -> anyhow::Result<()> {
    match command {
        ContractCommand::Create {
            auth,
            client,
            total_amount,
            remaining_amount,
        } => create(env, messages, &auth, client, total_amount, remaining_amount),
        ContractCommand::Update {
            auth,
            id,
            total_amount,
            remaining_amount,
            status,
        } => update(env, messages, &auth, id, ContractPatch {
            total_amount,
            amount_due: remaining_amount,
            status,
        }),
        ContractCommand::List { auth } => list(env, messages, &auth),
    }
}

fn create(
    env: &CommandEnv,
    messages: &dyn MessageSink,
    auth: &AuthArgs,
    client_id: ClientId,
    total_amount: f64,
    remaining_amount: Option<f64>,
) -> anyhow::Result<()> {
    run_guarded(env, messages, CONTRACT_CREATE, auth, |session, _identity, messages| {
        let uow = session.unit_of_work();
        uow.client(client_id).ok_or(DomainError::NotFound)?;

        let contract = uow.add_contract(NewContract {
            client_id,
            total_amount,
            amount_due: remaining_amount,
            created_at: Utc::now(),
        });

        messages.report(
            &format!("New contract: id={}, client={}", contract.id, contract.client_id),
            Severity::Confirm,
        );
        Ok(())
    })
}

fn update(
    env: &CommandEnv,
    messages: &dyn MessageSink,
    auth: &AuthArgs,
    id: ContractId,
    patch: ContractPatch,
) -> anyhow::Result<()> {
    run_guarded(env, messages, CONTRACT_UPDATE, auth, |session, identity, messages| {
        let uow = session.unit_of_work();
        let mut contract = uow.contract(id).ok_or(DomainError::NotFound)?;

        // A commercial may only touch contracts of clients they follow;
        // management may touch any. Record-level, so checked here and not
        // by the role gate.
        if identity.role == Role::Commercial {
            let client = uow.client(contract.client_id).ok_or(DomainError::NotFound)?;
            if client.commercial_id != identity.id {
                return Err(AuthError::OwnershipDenied.into());
            }
        }

        patch.apply(&mut contract);
        uow.save_contract(&contract)?;

        messages.report(
            &format!("Contract updated: id={}, status={}", contract.id, contract.status),
            Severity::Confirm,
        );
        Ok(())
    })
}

fn list(env: &CommandEnv, messages: &dyn MessageSink, auth: &AuthArgs) -> anyhow::Result<()> {
    run_guarded(env, messages, CONTRACT_LIST, auth, |session, _identity, messages| {
        let contracts = session.unit_of_work().contracts();
        if contracts.is_empty() {
            messages.report("List is empty", Severity::Warning);
            return Ok(());
        }

        for contract in contracts {
            messages.report(
                &format!(
                    "contract id={} client={} total={:.2} due={:.2} status={}",
                    contract.id,
                    contract.client_id,
                    contract.total_amount,
                    contract.amount_due,
                    contract.status
                ),
                Severity::Info,
            );
        }
        Ok(())
    })
}
