//! `eventcrm-records` — client, contract, and event record types plus the
//! repository interfaces guarded command bodies consume.
//!
//! The auth layer never sees these types; record access always goes through
//! the invocation's unit of work.

pub mod client;
pub mod contract;
pub mod event;
pub mod repository;

pub use client::{Client, ClientPatch, NewClient};
pub use contract::{Contract, ContractPatch, ContractStatus, NewContract};
pub use event::{Event, EventPatch, NewEvent};
pub use repository::{ClientRepository, ContractRepository, EventRepository};
