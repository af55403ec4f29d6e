//! Role model and static allow-sets.

use serde::{Deserialize, Serialize};

use eventcrm_core::DomainError;

/// Team role held by an employee.
///
/// The set is closed: authorization policy is declared per operation as a
/// [`RoleSet`] literal over these variants, never as a runtime string match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Commercial,
    Support,
    Management,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Commercial, Role::Support, Role::Management];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Commercial => "commercial",
            Role::Support => "support",
            Role::Management => "management",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "commercial" => Ok(Role::Commercial),
            "support" => Ok(Role::Support),
            "management" => Ok(Role::Management),
            other => Err(DomainError::validation(format!(
                "'{other}' isn't a known role"
            ))),
        }
    }
}

/// A fixed set of roles permitted to execute an operation.
///
/// `const`-constructible so each operation declares its policy as a literal:
///
/// ```
/// use eventcrm_auth::{Role, RoleSet};
///
/// const CREATE_EMPLOYEE: RoleSet = RoleSet::of(&[Role::Management]);
/// assert!(CREATE_EMPLOYEE.contains(Role::Management));
/// assert!(!CREATE_EMPLOYEE.contains(Role::Support));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);

    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < roles.len() {
            bits |= 1 << roles[i] as u8;
            i += 1;
        }
        Self(bits)
    }

    pub const fn contains(self, role: Role) -> bool {
        self.0 & (1 << role as u8) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl core::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for role in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(role.as_str())?;
            first = false;
        }
        Ok(())
    }
}
