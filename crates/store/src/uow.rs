//! Unit of work: one transactional scope per invocation.

use std::fs;
use std::path::PathBuf;

use eventcrm_auth::{Employee, EmployeeRepository, IdentityRepository, NewEmployee};
use eventcrm_core::{ClientId, ContractId, DomainError, DomainResult, EmployeeId, EventId};
use eventcrm_records::{
    Client, ClientRepository, Contract, ContractRepository, Event, EventRepository, NewClient,
    NewContract, NewEvent,
};

use crate::dataset::DataSet;
use crate::error::StoreResult;

/// In-memory view of the data set, written back only on [`UnitOfWork::commit`].
///
/// Dropping an uncommitted unit of work discards every buffered mutation;
/// the data file is never touched on denial or error paths.
pub struct UnitOfWork {
    path: PathBuf,
    data: DataSet,
    committed: bool,
}

impl UnitOfWork {
    pub(crate) fn new(path: PathBuf, data: DataSet) -> Self {
        Self {
            path,
            data,
            committed: false,
        }
    }

    /// Atomically rewrite the data file with the buffered state.
    ///
    /// Writes to a sibling temp file first and renames it over the data
    /// file, so an interrupted commit leaves the previous state intact.
    pub fn commit(mut self) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        self.committed = true;
        tracing::debug!(path = %self.path.display(), "unit of work committed");
        Ok(())
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        if !self.committed {
            tracing::debug!(path = %self.path.display(), "unit of work released without commit");
        }
    }
}

impl IdentityRepository for UnitOfWork {
    fn find_by_username(&self, username: &str) -> Option<Employee> {
        self.data
            .employees
            .iter()
            .find(|e| e.username.as_str() == username)
            .cloned()
    }

    fn find_by_id_and_username(&self, id: EmployeeId, username: &str) -> Option<Employee> {
        self.data
            .employees
            .iter()
            .find(|e| e.id == id && e.username.as_str() == username)
            .cloned()
    }
}

impl EmployeeRepository for UnitOfWork {
    fn employee(&self, id: EmployeeId) -> Option<Employee> {
        self.data.employees.iter().find(|e| e.id == id).cloned()
    }

    fn employees(&self) -> Vec<Employee> {
        self.data.employees.clone()
    }

    fn add_employee(&mut self, new: NewEmployee) -> DomainResult<Employee> {
        if self.find_by_username(new.username.as_str()).is_some() {
            return Err(DomainError::validation(format!(
                "username '{}' is already taken",
                new.username
            )));
        }

        let employee = Employee {
            id: self.data.counters.next_employee(),
            username: new.username,
            password_hash: new.password_hash,
            role: new.role,
        };
        self.data.employees.push(employee.clone());
        Ok(employee)
    }

    fn save_employee(&mut self, employee: &Employee) -> DomainResult<()> {
        let slot = self
            .data
            .employees
            .iter_mut()
            .find(|e| e.id == employee.id)
            .ok_or(DomainError::NotFound)?;
        *slot = employee.clone();
        Ok(())
    }
}

impl ClientRepository for UnitOfWork {
    fn client(&self, id: ClientId) -> Option<Client> {
        self.data.clients.iter().find(|c| c.id == id).cloned()
    }

    fn clients(&self) -> Vec<Client> {
        self.data.clients.clone()
    }

    fn add_client(&mut self, new: NewClient) -> Client {
        let client = Client {
            id: self.data.counters.next_client(),
            last_name: new.last_name,
            first_name: new.first_name,
            email: new.email,
            phone: new.phone,
            company: new.company,
            created_at: new.created_at,
            updated_at: new.created_at,
            commercial_id: new.commercial_id,
        };
        self.data.clients.push(client.clone());
        client
    }

    fn save_client(&mut self, client: &Client) -> DomainResult<()> {
        let slot = self
            .data
            .clients
            .iter_mut()
            .find(|c| c.id == client.id)
            .ok_or(DomainError::NotFound)?;
        *slot = client.clone();
        Ok(())
    }
}

impl ContractRepository for UnitOfWork {
    fn contract(&self, id: ContractId) -> Option<Contract> {
        self.data.contracts.iter().find(|c| c.id == id).cloned()
    }

    fn contracts(&self) -> Vec<Contract> {
        self.data.contracts.clone()
    }

    fn add_contract(&mut self, new: NewContract) -> Contract {
        let contract = Contract {
            id: self.data.counters.next_contract(),
            client_id: new.client_id,
            total_amount: new.total_amount,
            amount_due: new.amount_due.unwrap_or(new.total_amount),
            created_at: new.created_at,
            status: eventcrm_records::ContractStatus::Pending,
        };
        self.data.contracts.push(contract.clone());
        contract
    }

    fn save_contract(&mut self, contract: &Contract) -> DomainResult<()> {
        let slot = self
            .data
            .contracts
            .iter_mut()
            .find(|c| c.id == contract.id)
            .ok_or(DomainError::NotFound)?;
        *slot = contract.clone();
        Ok(())
    }
}

impl EventRepository for UnitOfWork {
    fn event(&self, id: EventId) -> Option<Event> {
        self.data.events.iter().find(|e| e.id == id).cloned()
    }

    fn events(&self) -> Vec<Event> {
        self.data.events.clone()
    }

    fn add_event(&mut self, new: NewEvent) -> Event {
        let event = Event {
            id: self.data.counters.next_event(),
            contract_id: new.contract_id,
            starts_at: new.starts_at,
            ends_at: new.ends_at,
            location: new.location,
            attendees: new.attendees,
            notes: new.notes,
            support_id: None,
        };
        self.data.events.push(event.clone());
        event
    }

    fn save_event(&mut self, event: &Event) -> DomainResult<()> {
        let slot = self
            .data
            .events
            .iter_mut()
            .find(|e| e.id == event.id)
            .ok_or(DomainError::NotFound)?;
        *slot = event.clone();
        Ok(())
    }
}
