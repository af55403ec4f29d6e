//! End-to-end scenarios through the real command dispatcher, against a
//! tempdir-backed store and token slot.

use std::sync::Mutex;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use eventcrm_auth::{
    CredentialStore, EmployeeRepository, IdentityRepository, NewEmployee, Role, TokenCodec,
    TokenStore,
};
use eventcrm_core::{EmployeeId, Username};
use eventcrm_records::{
    ClientRepository, ContractRepository, EventRepository, NewClient, NewContract, NewEvent,
};
use eventcrm_store::{FileTokenStore, JsonStore};

use eventcrm_cli::cli::{
    AuthArgs, ClientCommand, Cli, Command, ContractCommand, EmployeeCommand, EventCommand,
};
use eventcrm_cli::{AppConfig, MessageSink, Severity};

/// Captures everything a command reports.
#[derive(Default)]
struct Recorder {
    lines: Mutex<Vec<(String, Severity)>>,
}

impl MessageSink for Recorder {
    fn report(&self, text: &str, severity: Severity) {
        self.lines.lock().unwrap().push((text.to_string(), severity));
    }
}

impl Recorder {
    fn contains(&self, needle: &str) -> bool {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .any(|(text, _)| text.contains(needle))
    }
}

struct Harness {
    _dir: TempDir,
    config: AppConfig,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            secret: "test-secret".to_string(),
            token_validity: Duration::hours(2),
            token_path: dir.path().join("token"),
            data_path: dir.path().join("records.json"),
            verbosity: 3,
        };
        Self { _dir: dir, config }
    }

    /// Provision an employee directly through the store, outside the guarded
    /// surface.
    fn seed_employee(&self, username: &str, password: &str, role: Role) -> EmployeeId {
        let store = JsonStore::open(&self.config.data_path);
        let mut uow = store.begin().unwrap();
        let employee = uow
            .add_employee(NewEmployee {
                username: Username::parse(username).unwrap(),
                password_hash: CredentialStore.hash_password(password).unwrap(),
                role,
            })
            .unwrap();
        uow.commit().unwrap();
        employee.id
    }

    fn exec(&self, command: Command) -> Recorder {
        let recorder = Recorder::default();
        let cli = Cli {
            verbosity: None,
            command,
        };
        eventcrm_cli::run(cli, &self.config, &recorder).unwrap();
        recorder
    }

    fn store(&self) -> JsonStore {
        JsonStore::open(&self.config.data_path)
    }

    fn token_slot(&self) -> FileTokenStore {
        FileTokenStore::new(&self.config.token_path)
    }

    fn has_token(&self) -> bool {
        self.token_slot().load().unwrap().is_some()
    }
}

fn no_auth() -> AuthArgs {
    AuthArgs::default()
}

fn creds(username: &str, password: &str) -> AuthArgs {
    AuthArgs {
        username: Some(username.to_string()),
        password: Some(password.to_string()),
    }
}

#[test]
fn scenario_login_then_role_gated_command() {
    let h = Harness::new();
    h.seed_employee("marge", "mgmt-pw", Role::Management);
    h.seed_employee("lisa", "comm-pw", Role::Commercial);

    // Management logs in: token persisted, management-only command works.
    let rec = h.exec(Command::Login {
        username: "marge".to_string(),
        password: "mgmt-pw".to_string(),
    });
    assert!(rec.contains("You are now logged in."));
    assert!(h.has_token());

    let rec = h.exec(Command::Employee(EmployeeCommand::Create {
        auth: no_auth(),
        new_username: Username::parse("newbie").unwrap(),
        new_password: "pw".to_string(),
        role: Role::Support,
    }));
    assert!(rec.contains("New employee"));
    assert!(h.store().begin().unwrap().find_by_username("newbie").is_some());

    // Commercial logs in: same command is denied and nothing is written.
    let rec = h.exec(Command::Login {
        username: "lisa".to_string(),
        password: "comm-pw".to_string(),
    });
    assert!(rec.contains("You are now logged in."));

    let rec = h.exec(Command::Employee(EmployeeCommand::Create {
        auth: no_auth(),
        new_username: Username::parse("intruder").unwrap(),
        new_password: "pw".to_string(),
        role: Role::Management,
    }));
    assert!(rec.contains("unauthorized action"));
    assert!(h.store().begin().unwrap().find_by_username("intruder").is_none());
}

#[test]
fn scenario_no_token_no_credentials_denies() {
    let h = Harness::new();
    h.seed_employee("lisa", "comm-pw", Role::Commercial);

    let rec = h.exec(Command::Client(ClientCommand::Create {
        auth: no_auth(),
        last_name: "Szyslak".to_string(),
        first_name: None,
        email: None,
        phone: None,
        company: None,
    }));
    assert!(rec.contains("authentication required"));
    assert!(h.store().begin().unwrap().clients().is_empty());
}

#[test]
fn scenario_expired_token_denies_with_same_message() {
    let h = Harness::new();
    let id = h.seed_employee("lisa", "comm-pw", Role::Commercial);

    // Mint a token whose validity window already closed and plant it in the
    // slot.
    let codec = TokenCodec::new(h.config.secret.as_bytes(), Duration::hours(1));
    let uow = h.store().begin().unwrap();
    let employee = uow.employee(id).unwrap();
    let stale = codec.issue(&employee, Utc::now() - Duration::hours(3)).unwrap();
    h.token_slot().save(&stale).unwrap();

    let rec = h.exec(Command::Client(ClientCommand::Create {
        auth: no_auth(),
        last_name: "Szyslak".to_string(),
        first_name: None,
        email: None,
        phone: None,
        company: None,
    }));
    assert!(rec.contains("authentication required"));
    assert!(h.store().begin().unwrap().clients().is_empty());
}

#[test]
fn scenario_logoff_lifecycle() {
    let h = Harness::new();
    h.seed_employee("marge", "mgmt-pw", Role::Management);

    // Nothing to clear.
    let rec = h.exec(Command::Logoff);
    assert!(rec.contains("Nothing changed"));

    // Login, then logoff removes the slot.
    h.exec(Command::Login {
        username: "marge".to_string(),
        password: "mgmt-pw".to_string(),
    });
    assert!(h.has_token());

    let rec = h.exec(Command::Logoff);
    assert!(rec.contains("Logged off"));
    assert!(!h.has_token());

    // Guarded commands are back to unauthenticated.
    let rec = h.exec(Command::Employee(EmployeeCommand::Create {
        auth: no_auth(),
        new_username: Username::parse("nobody").unwrap(),
        new_password: "pw".to_string(),
        role: Role::Support,
    }));
    assert!(rec.contains("authentication required"));
}

#[test]
fn inline_credentials_perform_an_implicit_login() {
    let h = Harness::new();
    h.seed_employee("lisa", "comm-pw", Role::Commercial);
    assert!(!h.has_token());

    let rec = h.exec(Command::Client(ClientCommand::Create {
        auth: creds("lisa", "comm-pw"),
        last_name: "Szyslak".to_string(),
        first_name: Some("Moe".to_string()),
        email: None,
        phone: None,
        company: None,
    }));
    assert!(rec.contains("New client"));

    // The credentialed invocation also persisted a fresh token.
    assert!(h.has_token());
}

#[test]
fn login_failure_is_generic() {
    let h = Harness::new();
    h.seed_employee("marge", "mgmt-pw", Role::Management);

    let wrong_password = h.exec(Command::Login {
        username: "marge".to_string(),
        password: "nope".to_string(),
    });
    let unknown_user = h.exec(Command::Login {
        username: "stranger".to_string(),
        password: "nope".to_string(),
    });

    assert!(wrong_password.contains("Login failed"));
    assert!(unknown_user.contains("Login failed"));
    assert!(!h.has_token());
}

#[test]
fn deactivated_employee_cannot_log_in() {
    let h = Harness::new();
    let mgmt = h.seed_employee("marge", "mgmt-pw", Role::Management);
    let victim = h.seed_employee("homer", "old-pw", Role::Support);

    h.exec(Command::Login {
        username: "marge".to_string(),
        password: "mgmt-pw".to_string(),
    });
    let rec = h.exec(Command::Employee(EmployeeCommand::Deactivate {
        auth: no_auth(),
        id: victim,
    }));
    assert!(rec.contains("Employee deactivated"));
    assert_ne!(mgmt, victim);

    let rec = h.exec(Command::Login {
        username: "homer".to_string(),
        password: "old-pw".to_string(),
    });
    assert!(rec.contains("Login failed"));
}

#[test]
fn support_can_only_update_their_own_events() {
    let h = Harness::new();
    let commercial = h.seed_employee("lisa", "comm-pw", Role::Commercial);
    let assigned = h.seed_employee("bart", "sup-pw", Role::Support);
    h.seed_employee("nelson", "sup-pw", Role::Support);

    // Seed a client, contract and an event assigned to bart.
    let store = h.store();
    let mut uow = store.begin().unwrap();
    let client = uow.add_client(NewClient {
        last_name: "Szyslak".to_string(),
        first_name: None,
        email: None,
        phone: None,
        company: None,
        commercial_id: commercial,
        created_at: Utc::now(),
    });
    let contract = uow.add_contract(NewContract {
        client_id: client.id,
        total_amount: 500.0,
        amount_due: None,
        created_at: Utc::now(),
    });
    let mut event = uow.add_event(NewEvent {
        contract_id: contract.id,
        starts_at: Utc::now(),
        ends_at: Utc::now() + Duration::hours(4),
        location: "Springfield".to_string(),
        attendees: 10,
        notes: String::new(),
    });
    event.support_id = Some(assigned);
    uow.save_event(&event).unwrap();
    uow.commit().unwrap();

    // The other support employee is denied at the record level.
    let rec = h.exec(Command::Event(EventCommand::Update {
        auth: creds("nelson", "sup-pw"),
        id: event.id,
        starts_at: None,
        ends_at: None,
        location: Some("Shelbyville".to_string()),
        attendees: None,
        notes: None,
    }));
    assert!(rec.contains("unauthorized action"));
    let unchanged = h.store().begin().unwrap().event(event.id).unwrap();
    assert_eq!(unchanged.location, "Springfield");

    // The assigned one succeeds.
    let rec = h.exec(Command::Event(EventCommand::Update {
        auth: creds("bart", "sup-pw"),
        id: event.id,
        starts_at: None,
        ends_at: None,
        location: Some("Shelbyville".to_string()),
        attendees: None,
        notes: None,
    }));
    assert!(rec.contains("Event updated"));
    let updated = h.store().begin().unwrap().event(event.id).unwrap();
    assert_eq!(updated.location, "Shelbyville");
}

#[test]
fn commercial_can_only_update_contracts_of_their_clients() {
    let h = Harness::new();
    let owner = h.seed_employee("lisa", "comm-pw", Role::Commercial);
    h.seed_employee("gil", "comm-pw", Role::Commercial);
    h.seed_employee("marge", "mgmt-pw", Role::Management);

    let store = h.store();
    let mut uow = store.begin().unwrap();
    let client = uow.add_client(NewClient {
        last_name: "Szyslak".to_string(),
        first_name: None,
        email: None,
        phone: None,
        company: None,
        commercial_id: owner,
        created_at: Utc::now(),
    });
    let contract = uow.add_contract(NewContract {
        client_id: client.id,
        total_amount: 500.0,
        amount_due: None,
        created_at: Utc::now(),
    });
    uow.commit().unwrap();

    // A commercial who does not follow the client is denied.
    let rec = h.exec(Command::Contract(ContractCommand::Update {
        auth: creds("gil", "comm-pw"),
        id: contract.id,
        total_amount: None,
        remaining_amount: Some(0.0),
        status: None,
    }));
    assert!(rec.contains("unauthorized action"));

    // The client's own commercial and management both may update.
    let rec = h.exec(Command::Contract(ContractCommand::Update {
        auth: creds("lisa", "comm-pw"),
        id: contract.id,
        total_amount: None,
        remaining_amount: Some(100.0),
        status: None,
    }));
    assert!(rec.contains("Contract updated"));

    let rec = h.exec(Command::Contract(ContractCommand::Update {
        auth: creds("marge", "mgmt-pw"),
        id: contract.id,
        total_amount: None,
        remaining_amount: None,
        status: Some(eventcrm_records::ContractStatus::Signed),
    }));
    assert!(rec.contains("status=signed"));
}

#[test]
fn assigning_a_non_support_employee_is_rejected() {
    let h = Harness::new();
    let commercial = h.seed_employee("lisa", "comm-pw", Role::Commercial);
    h.seed_employee("marge", "mgmt-pw", Role::Management);

    let store = h.store();
    let mut uow = store.begin().unwrap();
    let client = uow.add_client(NewClient {
        last_name: "Szyslak".to_string(),
        first_name: None,
        email: None,
        phone: None,
        company: None,
        commercial_id: commercial,
        created_at: Utc::now(),
    });
    let contract = uow.add_contract(NewContract {
        client_id: client.id,
        total_amount: 500.0,
        amount_due: None,
        created_at: Utc::now(),
    });
    let event = uow.add_event(NewEvent {
        contract_id: contract.id,
        starts_at: Utc::now(),
        ends_at: Utc::now() + Duration::hours(4),
        location: "Springfield".to_string(),
        attendees: 10,
        notes: String::new(),
    });
    uow.commit().unwrap();

    let rec = h.exec(Command::Event(EventCommand::AssignSupport {
        auth: creds("marge", "mgmt-pw"),
        id: event.id,
        support: commercial,
    }));
    assert!(rec.contains("not on the support team"));
    let unchanged = h.store().begin().unwrap().event(event.id).unwrap();
    assert_eq!(unchanged.support_id, None);
}

#[test]
fn unknown_record_reports_not_found() {
    let h = Harness::new();
    h.seed_employee("marge", "mgmt-pw", Role::Management);

    let rec = h.exec(Command::Employee(EmployeeCommand::Update {
        auth: creds("marge", "mgmt-pw"),
        id: EmployeeId::new(999),
        new_username: None,
        new_password: None,
        role: None,
    }));
    assert!(rec.contains("not found"));
}
