//! Contract records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eventcrm_core::{ClientId, ContractId};

/// Payment status of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Pending,
    Signed,
    Archived,
}

impl core::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ContractStatus::Pending => "pending",
            ContractStatus::Signed => "signed",
            ContractStatus::Archived => "archived",
        })
    }
}

impl core::str::FromStr for ContractStatus {
    type Err = eventcrm_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(ContractStatus::Pending),
            "signed" => Ok(ContractStatus::Signed),
            "archived" => Ok(ContractStatus::Archived),
            other => Err(eventcrm_core::DomainError::validation(format!(
                "'{other}' isn't a known contract status"
            ))),
        }
    }
}

/// A contract between the business and a client. The responsible commercial
/// employee is reached through the client record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub client_id: ClientId,
    pub total_amount: f64,
    pub amount_due: f64,
    pub created_at: DateTime<Utc>,
    pub status: ContractStatus,
}

/// A not-yet-persisted contract; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewContract {
    pub client_id: ClientId,
    pub total_amount: f64,
    /// Defaults to the total amount when not supplied.
    pub amount_due: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Partial update: absent fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ContractPatch {
    pub total_amount: Option<f64>,
    pub amount_due: Option<f64>,
    pub status: Option<ContractStatus>,
}

impl ContractPatch {
    pub fn apply(self, contract: &mut Contract) {
        if let Some(v) = self.total_amount {
            contract.total_amount = v;
        }
        if let Some(v) = self.amount_due {
            contract.amount_due = v;
        }
        if let Some(v) = self.status {
            contract.status = v;
        }
    }
}
