//! Employee provisioning commands. Management only.

use eventcrm_auth::{CredentialStore, EmployeeRepository, IdentityRepository, NewEmployee, Role, RoleSet};
use eventcrm_core::{DomainError, EmployeeId, Username};

use crate::cli::{AuthArgs, EmployeeCommand};
use crate::console::{MessageSink, Severity};
use crate::runner::{CommandEnv, run_guarded};

const EMPLOYEE_ADMIN: RoleSet = RoleSet::of(&[Role::Management]);

pub fn dispatch(
    command: EmployeeCommand,
    env: &CommandEnv,
    messages: &dyn MessageSink,
) -> anyhow::Result<()> {
    match command {
        EmployeeCommand::Create {
            auth,
            new_username,
            new_password,
            role,
        } => create(env, messages, &auth, new_username, new_password, role),
        EmployeeCommand::Update {
            auth,
            id,
            new_username,
            new_password,
            role,
        } => update(env, messages, &auth, id, new_username, new_password, role),
        EmployeeCommand::Deactivate { auth, id } => deactivate(env, messages, &auth, id),
    }
}

fn create(
    env: &CommandEnv,
    messages: &dyn MessageSink,
    auth: &AuthArgs,
    new_username: Username,
    new_password: String,
    role: Role,
) -> anyhow::Result<()> {
    run_guarded(env, messages, EMPLOYEE_ADMIN, auth, |session, _identity, messages| {
        let password_hash = CredentialStore.hash_password(&new_password)?;
        let employee = session.unit_of_work().add_employee(NewEmployee {
            username: new_username,
            password_hash,
            role,
        })?;

        messages.report(
            &format!(
                "New employee: id={}, username={}, role={}",
                employee.id, employee.username, employee.role
            ),
            Severity::Confirm,
        );
        Ok(())
    })
}

fn update(
    env: &CommandEnv,
    messages: &dyn MessageSink,
    auth: &AuthArgs,
    id: EmployeeId,
    new_username: Option<Username>,
    new_password: Option<String>,
    role: Option<Role>,
) -> anyhow::Result<()> {
    run_guarded(env, messages, EMPLOYEE_ADMIN, auth, |session, _identity, messages| {
        let uow = session.unit_of_work();
        let mut employee = uow.employee(id).ok_or(DomainError::NotFound)?;

        if let Some(username) = new_username {
            let taken = uow
                .find_by_username(username.as_str())
                .is_some_and(|other| other.id != id);
            if taken {
                return Err(DomainError::validation(format!(
                    "username '{username}' is already taken"
                ))
                .into());
            }
            employee.username = username;
        }
        if let Some(password) = new_password {
            employee.password_hash = CredentialStore.hash_password(&password)?;
        }
        if let Some(role) = role {
            employee.role = role;
        }

        uow.save_employee(&employee)?;
        messages.report(
            &format!(
                "Employee updated: id={}, username={}, role={}",
                employee.id, employee.username, employee.role
            ),
            Severity::Confirm,
        );
        Ok(())
    })
}

fn deactivate(
    env: &CommandEnv,
    messages: &dyn MessageSink,
    auth: &AuthArgs,
    id: EmployeeId,
) -> anyhow::Result<()> {
    run_guarded(env, messages, EMPLOYEE_ADMIN, auth, |session, _identity, messages| {
        let uow = session.unit_of_work();
        let mut employee = uow.employee(id).ok_or(DomainError::NotFound)?;
        employee.deactivate();
        uow.save_employee(&employee)?;

        messages.report(
            &format!(
                "Employee deactivated: id={}, username={}",
                employee.id, employee.username
            ),
            Severity::Confirm,
        );
        Ok(())
    })
}
