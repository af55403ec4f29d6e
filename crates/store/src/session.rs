//! Per-invocation session: the resolved identity plus the unit of work.

use uuid::Uuid;

use eventcrm_auth::Employee;

use crate::error::StoreResult;
use crate::store::JsonStore;
use crate::uow::UnitOfWork;

/// Binds one invocation's identity (once resolved) and its single unit of
/// work. Exactly one session exists per command invocation.
///
/// Every exit path releases the unit of work: [`Session::commit`] writes it
/// out, [`Session::close`] and plain drop discard it. Nested repository
/// calls during the invocation all go through [`Session::unit_of_work`],
/// never a second transactional scope.
pub struct Session {
    correlation_id: Uuid,
    uow: UnitOfWork,
    identity: Option<Employee>,
}

impl Session {
    pub fn begin(store: &JsonStore) -> StoreResult<Self> {
        let uow = store.begin()?;
        let correlation_id = Uuid::now_v7();
        tracing::debug!(invocation = %correlation_id, "session opened");
        Ok(Self {
            correlation_id,
            uow,
            identity: None,
        })
    }

    /// Correlation id for this invocation's logs.
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    pub fn identity(&self) -> Option<&Employee> {
        self.identity.as_ref()
    }

    pub fn attach_identity(&mut self, employee: Employee) {
        self.identity = Some(employee);
    }

    pub fn unit_of_work(&mut self) -> &mut UnitOfWork {
        &mut self.uow
    }

    /// Read-only view, e.g. for identity lookups during guard evaluation.
    pub fn unit_of_work_ref(&self) -> &UnitOfWork {
        &self.uow
    }

    /// Commit the invocation's effects and end the session.
    pub fn commit(self) -> StoreResult<()> {
        tracing::debug!(invocation = %self.correlation_id, "session committing");
        self.uow.commit()
    }

    /// End the session without writing anything.
    pub fn close(self) {
        tracing::debug!(invocation = %self.correlation_id, "session closed without commit");
    }
}
