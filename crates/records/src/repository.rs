//! Repository interfaces over the record store.
//!
//! Implemented by the store's unit of work; command bodies call these, so a
//! whole invocation shares one transactional scope.

use eventcrm_core::{ClientId, ContractId, DomainResult, EventId};

use crate::client::{Client, NewClient};
use crate::contract::{Contract, NewContract};
use crate::event::{Event, NewEvent};

pub trait ClientRepository {
    fn client(&self, id: ClientId) -> Option<Client>;

    fn clients(&self) -> Vec<Client>;

    /// Insert a new client, assigning the next id.
    fn add_client(&mut self, new: NewClient) -> Client;

    /// Persist changes to an existing client. `NotFound` if the id is unknown.
    fn save_client(&mut self, client: &Client) -> DomainResult<()>;
}

pub trait ContractRepository {
    fn contract(&self, id: ContractId) -> Option<Contract>;

    fn contracts(&self) -> Vec<Contract>;

    /// Insert a new contract, assigning the next id. The amount due falls
    /// back to the total amount when not supplied.
    fn add_contract(&mut self, new: NewContract) -> Contract;

    /// Persist changes to an existing contract. `NotFound` if the id is unknown.
    fn save_contract(&mut self, contract: &Contract) -> DomainResult<()>;
}

pub trait EventRepository {
    fn event(&self, id: EventId) -> Option<Event>;

    fn events(&self) -> Vec<Event>;

    /// Insert a new event, assigning the next id.
    fn add_event(&mut self, new: NewEvent) -> Event;

    /// Persist changes to an existing event. `NotFound` if the id is unknown.
    fn save_event(&mut self, event: &Event) -> DomainResult<()>;
}
