//! `eventcrm-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from storage and terminal I/O.
//! It owns identity resolution (credentials or a locally persisted token),
//! the signed token codec, and the composable guard chain that gates every
//! command. Collaborators it needs — identity lookup, the token slot,
//! telemetry — are consumed through traits implemented elsewhere.

pub mod claims;
pub mod credentials;
pub mod employee;
pub mod error;
pub mod guard;
pub mod role;
pub mod telemetry;
pub mod token;
pub mod token_store;

pub use claims::{TokenClaims, TokenValidationError, validate_claims};
pub use credentials::{CredentialError, CredentialStore, Credentials};
pub use employee::{Employee, EmployeeRepository, IdentityRepository, NewEmployee};
pub use error::{AuthError, MSG_AUTHENTICATION_REQUIRED, MSG_UNAUTHORIZED_ACTION, TokenFault};
pub use guard::{AuthenticationGate, AuthorizationGate, Guard, GuardChain, GuardContext};
pub use role::{Role, RoleSet};
pub use telemetry::{NoopTelemetry, TelemetrySink};
pub use token::{TokenCodec, TokenIssueError, TokenParseError};
pub use token_store::{InMemoryTokenStore, TokenStore, TokenStoreError};
