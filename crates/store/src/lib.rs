//! `eventcrm-store` — file-backed persistence for records and the token slot.
//!
//! The store keeps all records in one JSON data file. A [`UnitOfWork`] loads
//! the data set at the start of an invocation, buffers every mutation in
//! memory, and rewrites the file atomically on commit — any other exit path
//! releases without writing, so a command's effects are all-or-nothing.

pub mod dataset;
pub mod error;
pub mod session;
pub mod store;
pub mod token_slot;
pub mod uow;

pub use error::{StoreError, StoreResult};
pub use session::Session;
pub use store::JsonStore;
pub use token_slot::FileTokenStore;
pub use uow::UnitOfWork;
