//! Command-line surface.
//!
//! Guarded commands accept `--username`/`--password` to authenticate the
//! invocation with explicit credentials instead of the stored token. Note
//! that this is a full login: on success a fresh token is issued and
//! persisted, replacing any previous one.

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Args, Parser, Subcommand};

use eventcrm_auth::{Credentials, Role};
use eventcrm_core::{ClientId, ContractId, EmployeeId, EventId, Username};
use eventcrm_records::ContractStatus;

#[derive(Parser, Debug)]
#[command(name = "eventcrm")]
#[command(about = "Business-records CRM: employees, clients, contracts, events")]
#[command(version)]
pub struct Cli {
    /// Message verbosity: 1 shows alerts only, 2 adds warnings, 3 everything.
    #[arg(short, long)]
    pub verbosity: Option<u8>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and persist a local session token
    Login {
        username: String,
        password: String,
    },

    /// Log off by deleting the local session token
    Logoff,

    /// Manage employees (management team)
    #[command(subcommand)]
    Employee(EmployeeCommand),

    /// Manage clients (commercial team)
    #[command(subcommand)]
    Client(ClientCommand),

    /// Manage contracts
    #[command(subcommand)]
    Contract(ContractCommand),

    /// Manage events
    #[command(subcommand)]
    Event(EventCommand),
}

/// Explicit credentials for one invocation, instead of the stored token.
#[derive(Args, Debug, Clone, Default)]
pub struct AuthArgs {
    /// Authenticate as this user (also performs a login)
    #[arg(long, requires = "password")]
    pub username: Option<String>,

    /// Password for --username
    #[arg(long, requires = "username")]
    pub password: Option<String>,
}

impl AuthArgs {
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum EmployeeCommand {
    /// Create a new employee (management only)
    Create {
        #[command(flatten)]
        auth: AuthArgs,

        /// New employee's username: 30 alphanumeric characters or less
        #[arg(long)]
        new_username: Username,

        /// New employee's password
        #[arg(long)]
        new_password: String,

        /// New employee's role: commercial, support or management
        #[arg(long)]
        role: Role,
    },

    /// Update an existing employee (management only)
    Update {
        #[command(flatten)]
        auth: AuthArgs,

        /// Employee id
        #[arg(long)]
        id: EmployeeId,

        #[arg(long)]
        new_username: Option<Username>,

        #[arg(long)]
        new_password: Option<String>,

        #[arg(long)]
        role: Option<Role>,
    },

    /// Deactivate an employee so no credential can ever match again
    /// (management only). Reactivate by setting a new password with update.
    Deactivate {
        #[command(flatten)]
        auth: AuthArgs,

        /// Employee id
        #[arg(long)]
        id: EmployeeId,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    /// Register a new client, followed by the acting commercial employee
    Create {
        #[command(flatten)]
        auth: AuthArgs,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Digits only, with country prefix but without '+'. Ex: 33123456789
        #[arg(long)]
        phone: Option<u64>,

        #[arg(long)]
        company: Option<String>,
    },

    /// Update an existing client
    Update {
        #[command(flatten)]
        auth: AuthArgs,

        /// Client id
        #[arg(long)]
        id: ClientId,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<u64>,

        #[arg(long)]
        company: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContractCommand {
    /// Create a contract for a client (management only)
    Create {
        #[command(flatten)]
        auth: AuthArgs,

        /// Client id
        #[arg(long)]
        client: ClientId,

        #[arg(long)]
        total_amount: f64,

        /// Defaults to the total amount
        #[arg(long)]
        remaining_amount: Option<f64>,
    },

    /// Update a contract (management, or the client's own commercial)
    Update {
        #[command(flatten)]
        auth: AuthArgs,

        /// Contract id
        #[arg(long)]
        id: ContractId,

        #[arg(long)]
        total_amount: Option<f64>,

        #[arg(long)]
        remaining_amount: Option<f64>,

        /// pending, signed or archived
        #[arg(long)]
        status: Option<ContractStatus>,
    },

    /// List contracts
    List {
        #[command(flatten)]
        auth: AuthArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum EventCommand {
    /// Create an event under a contract
    Create {
        #[command(flatten)]
        auth: AuthArgs,

        /// Contract id
        #[arg(long)]
        contract: ContractId,

        /// Format: '25/02/2030 16:50'
        #[arg(long, value_parser = parse_datetime)]
        starts_at: DateTime<Utc>,

        /// Format: '25/02/2030 16:50'
        #[arg(long, value_parser = parse_datetime)]
        ends_at: DateTime<Utc>,

        #[arg(long)]
        location: String,

        #[arg(long, default_value_t = 0)]
        attendees: u32,

        #[arg(long, default_value_t = String::new())]
        notes: String,
    },

    /// Update an event (the assigned support employee only)
    Update {
        #[command(flatten)]
        auth: AuthArgs,

        /// Event id
        #[arg(long)]
        id: EventId,

        #[arg(long, value_parser = parse_datetime)]
        starts_at: Option<DateTime<Utc>>,

        #[arg(long, value_parser = parse_datetime)]
        ends_at: Option<DateTime<Utc>>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        attendees: Option<u32>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Assign a support employee to an event (management only)
    AssignSupport {
        #[command(flatten)]
        auth: AuthArgs,

        /// Event id
        #[arg(long)]
        id: EventId,

        /// Id of an employee on the support team
        #[arg(long)]
        support: EmployeeId,
    },

    /// List events
    List {
        #[command(flatten)]
        auth: AuthArgs,
    },
}

fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(raw, "%d/%m/%Y %H:%M")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("expected 'DD/MM/YYYY HH:MM': {e}"))
}
