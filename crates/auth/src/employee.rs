//! Employee identity record and the repository seams the gates consume.

use serde::{Deserialize, Serialize};

use eventcrm_core::{DomainResult, EmployeeId, Username};

use crate::Role;

/// The acting identity: an employee with a team role.
///
/// # Invariants
/// - `username` is unique across the store (enforced by the repository).
/// - Employees are never deleted. Deactivation clears `password_hash`, and
///   an empty hash can never verify, so no credential matches afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub username: Username,
    pub password_hash: String,
    pub role: Role,
}

impl Employee {
    pub fn is_deactivated(&self) -> bool {
        self.password_hash.is_empty()
    }

    /// Clear the stored hash so no password can ever match again.
    /// Reactivation is setting a new password through the update path.
    pub fn deactivate(&mut self) {
        self.password_hash.clear();
    }
}

/// A not-yet-persisted employee; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub username: Username,
    pub password_hash: String,
    pub role: Role,
}

/// Identity lookup as the authentication gate needs it.
///
/// Both lookups run against current state: token claims are never trusted
/// for role data, so a renamed or re-provisioned subject stops resolving.
pub trait IdentityRepository {
    fn find_by_username(&self, username: &str) -> Option<Employee>;

    /// Resolve a token subject. Id and username must match the same record.
    fn find_by_id_and_username(&self, id: EmployeeId, username: &str) -> Option<Employee>;
}

/// Full employee persistence, used by the provisioning commands.
pub trait EmployeeRepository: IdentityRepository {
    fn employee(&self, id: EmployeeId) -> Option<Employee>;

    fn employees(&self) -> Vec<Employee>;

    /// Insert a new employee, assigning the next id.
    ///
    /// Fails with a validation error when the username is already taken.
    fn add_employee(&mut self, new: NewEmployee) -> DomainResult<Employee>;

    /// Persist changes to an existing employee. `NotFound` if the id is unknown.
    fn save_employee(&mut self, employee: &Employee) -> DomainResult<()>;
}
