//! On-disk data set: every table plus the id counters, serialized as one
//! JSON document.

use serde::{Deserialize, Serialize};

use eventcrm_auth::Employee;
use eventcrm_core::{ClientId, ContractId, EmployeeId, EventId};
use eventcrm_records::{Client, Contract, Event};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DataSet {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub counters: Counters,
}

/// Monotonic per-table id counters. Ids are never reused: records are only
/// ever deactivated, not deleted.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Counters {
    #[serde(default)]
    pub employees: i64,
    #[serde(default)]
    pub clients: i64,
    #[serde(default)]
    pub contracts: i64,
    #[serde(default)]
    pub events: i64,
}

impl Counters {
    pub fn next_employee(&mut self) -> EmployeeId {
        self.employees += 1;
        EmployeeId::new(self.employees)
    }

    pub fn next_client(&mut self) -> ClientId {
        self.clients += 1;
        ClientId::new(self.clients)
    }

    pub fn next_contract(&mut self) -> ContractId {
        self.contracts += 1;
        ContractId::new(self.contracts)
    }

    pub fn next_event(&mut self) -> EventId {
        self.events += 1;
        EventId::new(self.events)
    }
}
