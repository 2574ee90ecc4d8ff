use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::collection::{Filterable, SortValue};
use crate::domain::invoice::PaymentStatus;

/// Engagement state of a coaching client.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
    Paused,
    Completed,
}

impl ClientStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ClientStatus::Active => "active",
            ClientStatus::Inactive => "inactive",
            ClientStatus::Paused => "paused",
            ClientStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(ClientStatus::Active),
            "inactive" => Some(ClientStatus::Inactive),
            "paused" => Some(ClientStatus::Paused),
            "completed" => Some(ClientStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub coaching_type: String,
    pub status: ClientStatus,
    pub last_session: Option<NaiveDateTime>,
    pub session_count: u32,
    /// Goal progress shown in the table, 0..=100.
    pub progress: u8,
    pub payment_status: PaymentStatus,
    pub total_revenue_cents: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Filterable for Client {
    fn id(&self) -> i32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.coaching_type.as_str()];
        if let Some(email) = &self.email {
            fields.push(email.as_str());
        }
        fields
    }

    fn facet_value(&self, facet: &str) -> Option<String> {
        match facet {
            "status" => Some(self.status.as_str().to_string()),
            "payment" => Some(self.payment_status.as_str().to_string()),
            "type" => Some(self.coaching_type.clone()),
            _ => None,
        }
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "status" => SortValue::Text(self.status.as_str().to_string()),
            "payment" => SortValue::Text(self.payment_status.as_str().to_string()),
            "last_session" => self
                .last_session
                .map_or(SortValue::Missing, SortValue::Timestamp),
            "sessions" => SortValue::Number(i64::from(self.session_count)),
            "progress" => SortValue::Number(i64::from(self.progress)),
            "revenue" => SortValue::Number(self.total_revenue_cents),
            _ => SortValue::Text(self.name.clone()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub coaching_type: String,
    pub status: ClientStatus,
}

impl NewClient {
    #[must_use]
    pub fn new(
        name: String,
        email: Option<String>,
        phone: Option<String>,
        coaching_type: String,
        status: ClientStatus,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            coaching_type: coaching_type.trim().to_string(),
            status,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateClient {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub coaching_type: String,
    pub status: ClientStatus,
    pub progress: u8,
}

impl UpdateClient {
    #[must_use]
    pub fn new(
        name: String,
        email: Option<String>,
        phone: Option<String>,
        coaching_type: String,
        status: ClientStatus,
        progress: u8,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            coaching_type: coaching_type.trim().to_string(),
            status,
            progress: progress.min(100),
        }
    }
}
