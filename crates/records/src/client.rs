//! Client records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eventcrm_core::{ClientId, EmployeeId};

/// A client of the business, registered and followed by one commercial
/// employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub last_name: String,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<u64>,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// The commercial employee following this client.
    pub commercial_id: EmployeeId,
}

impl Client {
    pub fn full_name(&self) -> String {
        match &self.first_name {
            Some(first) => format!("{} {}", first, self.last_name),
            None => self.last_name.clone(),
        }
    }
}

/// A not-yet-persisted client; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub last_name: String,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<u64>,
    pub company: Option<String>,
    pub commercial_id: EmployeeId,
    pub created_at: DateTime<Utc>,
}

/// Partial update: absent fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ClientPatch {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<u64>,
    pub company: Option<String>,
}

impl ClientPatch {
    pub fn apply(self, client: &mut Client, now: DateTime<Utc>) {
        if let Some(v) = self.last_name {
            client.last_name = v;
        }
        if let Some(v) = self.first_name {
            client.first_name = Some(v);
        }
        if let Some(v) = self.email {
            client.email = Some(v);
        }
        if let Some(v) = self.phone {
            client.phone = Some(v);
        }
        if let Some(v) = self.company {
            client.company = Some(v);
        }
        client.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        let now = Utc::now();
        Client {
            id: ClientId::new(1),
            last_name: "Szyslak".to_string(),
            first_name: Some("Moe".to_string()),
            email: None,
            phone: None,
            company: Some("Moe's Tavern".to_string()),
            created_at: now,
            updated_at: now,
            commercial_id: EmployeeId::new(2),
        }
    }

    #[test]
    fn patch_keeps_absent_fields() {
        let mut c = client();
        let before = c.created_at;
        let later = before + chrono::Duration::hours(1);

        ClientPatch {
            email: Some("moe@tavern.example".to_string()),
            ..Default::default()
        }
        .apply(&mut c, later);

        assert_eq!(c.email.as_deref(), Some("moe@tavern.example"));
        assert_eq!(c.last_name, "Szyslak");
        assert_eq!(c.created_at, before);
        assert_eq!(c.updated_at, later);
    }

    #[test]
    fn full_name_with_and_without_first_name() {
        let mut c = client();
        assert_eq!(c.full_name(), "Moe Szyslak");
        c.first_name = None;
        assert_eq!(c.full_name(), "Szyslak");
    }
}
