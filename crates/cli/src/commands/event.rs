//! Event commands.

use chrono::{DateTime, Utc};

use eventcrm_auth::{AuthError, EmployeeRepository, Role, RoleSet};
use eventcrm_core::{ContractId, DomainError, EmployeeId, EventId};
use eventcrm_records::{ContractRepository, EventPatch, EventRepository, NewEvent};

use crate::cli::{AuthArgs, EventCommand};
use crate::console::{MessageSink, Severity};
use crate::runner::{CommandEnv, run_guarded};

const EVENT_CREATE: RoleSet = RoleSet::of(&[Role::Commercial]);
const EVENT_UPDATE: RoleSet = RoleSet::of(&[Role::Support]);
const EVENT_ASSIGN: RoleSet = RoleSet::of(&[Role::Management]);
const EVENT_LIST: RoleSet = RoleSet::of(&[Role::Management, Role::Support]);

pub fn dispatch(
    command: EventCommand,
    env: &CommandEnv,
    messages: &dyn MessageSink,
) -> anyhow::Result<()> {
    match command {
        EventCommand::Create {
            auth,
            contract,
            starts_at,
            ends_at,
            location,
            attendees,
            notes,
        } => create(env, messages, &auth, contract, starts_at, ends_at, location, attendees, notes),
        EventCommand::Update {
            auth,
            id,
            starts_at,
            ends_at,
            location,
            attendees,
            notes,
        } => update(env, messages, &auth, id, EventPatch {
            starts_at,
            ends_at,
            location,
            attendees,
            notes,
        }),
        EventCommand::AssignSupport { auth, id, support } => {
            assign_support(env, messages, &auth, id, support)
        }
        EventCommand::List { auth } => list(env, messages, &auth),
    }
}

#[allow(clippy::too_many_arguments)]
fn create(
    env: &CommandEnv,
    messages: &dyn MessageSink,
    auth: &AuthArgs,
    contract_id: ContractId,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    location: String,
    attendees: u32,
    notes: String,
) -> anyhow::Result<()> {
    run_guarded(env, messages, EVENT_CREATE, auth, |session, _identity, messages| {
        let uow = session.unit_of_work();
        uow.contract(contract_id).ok_or(DomainError::NotFound)?;

        let event = uow.add_event(NewEvent {
            contract_id,
            starts_at,
            ends_at,
            location,
            attendees,
            notes,
        });

        messages.report(
            &format!("New event: id={}, contract={}", event.id, event.contract_id),
            Severity::Confirm,
        );
        Ok(())
    })
}

fn update(
    env: &CommandEnv,
    messages: &dyn MessageSink,
    auth: &AuthArgs,
    id: EventId,
    patch: EventPatch,
) -> anyhow::Result<()> {
    run_guarded(env, messages, EVENT_UPDATE, auth, |session, identity, messages| {
        let uow = session.unit_of_work();
        let mut event = uow.event(id).ok_or(DomainError::NotFound)?;

        // Support employees only edit events assigned to them. Record-level,
        // so checked here and not by the role gate.
        if !event.is_assigned_to(identity.id) {
            return Err(AuthError::OwnershipDenied.into());
        }

        patch.apply(&mut event);
        uow.save_event(&event)?;

        messages.report(&format!("Event updated: id={}", event.id), Severity::Confirm);
        Ok(())
    })
}

fn assign_support(
    env: &CommandEnv,
    messages: &dyn MessageSink,
    auth: &AuthArgs,
    id: EventId,
    support_id: EmployeeId,
) -> anyhow::Result<()> {
    run_guarded(env, messages, EVENT_ASSIGN, auth, |session, _identity, messages| {
        let uow = session.unit_of_work();
        let mut event = uow.event(id).ok_or(DomainError::NotFound)?;

        let support = uow.employee(support_id).ok_or(DomainError::NotFound)?;
        if support.role != Role::Support {
            return Err(DomainError::validation(format!(
                "employee {} is not on the support team",
                support.id
            ))
            .into());
        }

        event.support_id = Some(support.id);
        uow.save_event(&event)?;

        messages.report(
            &format!("Support employee {} assigned to event {}", support.id, event.id),
            Severity::Confirm,
        );
        Ok(())
    })
}

fn list(env: &CommandEnv, messages: &dyn MessageSink, auth: &AuthArgs) -> anyhow::Result<()> {
    run_guarded(env, messages, EVENT_LIST, auth, |session, _identity, messages| {
        let events = session.unit_of_work().events();
        if events.is_empty() {
            messages.report("List is empty", Severity::Warning);
            return Ok(());
        }

        for event in events {
            let support = event
                .support_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "unassigned".to_string());
            messages.report(
                &format!(
                    "event id={} contract={} starts={} location={} support={}",
                    event.id,
                    event.contract_id,
                    event.starts_at.format("%d/%m/%Y %H:%M"),
                    event.location,
                    support
                ),
                Severity::Info,
            );
        }
        Ok(())
    })
}
