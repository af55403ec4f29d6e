//! Event records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eventcrm_core::{ContractId, EmployeeId, EventId};

/// An event organized under a signed contract. A support employee is
/// assigned by management after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub contract_id: ContractId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub location: String,
    pub attendees: u32,
    pub notes: String,
    pub support_id: Option<EmployeeId>,
}

impl Event {
    /// Whether `employee` is the support employee assigned to this event.
    pub fn is_assigned_to(&self, employee: EmployeeId) -> bool {
        self.support_id == Some(employee)
    }
}

/// A not-yet-persisted event; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub contract_id: ContractId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub location: String,
    pub attendees: u32,
    pub notes: String,
}

/// Partial update: absent fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub attendees: Option<u32>,
    pub notes: Option<String>,
}

impl EventPatch {
    pub fn apply(self, event: &mut Event) {
        if let Some(v) = self.starts_at {
            event.starts_at = v;
        }
        if let Some(v) = self.ends_at {
            event.ends_at = v;
        }
        if let Some(v) = self.location {
            event.location = v;
        }
        if let Some(v) = self.attendees {
            event.attendees = v;
        }
        if let Some(v) = self.notes {
            event.notes = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_check() {
        let event = Event {
            id: EventId::new(1),
            contract_id: ContractId::new(1),
            starts_at: Utc::now(),
            ends_at: Utc::now(),
            location: "Springfield".to_string(),
            attendees: 50,
            notes: String::new(),
            support_id: Some(EmployeeId::new(7)),
        };

        assert!(event.is_assigned_to(EmployeeId::new(7)));
        assert!(!event.is_assigned_to(EmployeeId::new(8)));

        let unassigned = Event {
            support_id: None,
            ..event
        };
        assert!(!unassigned.is_assigned_to(EmployeeId::new(7)));
    }
}
