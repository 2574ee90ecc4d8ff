use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::collection::{Filterable, SortValue};

/// Kind of booked session.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    #[default]
    Coaching,
    Consultation,
    Workshop,
}

impl SessionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Coaching => "coaching",
            SessionKind::Consultation => "consultation",
            SessionKind::Workshop => "workshop",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "coaching" => Some(SessionKind::Coaching),
            "consultation" => Some(SessionKind::Consultation),
            "workshop" => Some(SessionKind::Workshop),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Confirmed,
    #[default]
    Pending,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Confirmed => "confirmed",
            SessionStatus::Pending => "pending",
            SessionStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "confirmed" => Some(SessionStatus::Confirmed),
            "pending" => Some(SessionStatus::Pending),
            "cancelled" => Some(SessionStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: i32,
    pub client_id: i32,
    /// Denormalized for list rendering; sessions outlive client renames.
    pub client_name: String,
    pub starts_at: NaiveDateTime,
    pub kind: SessionKind,
    pub status: SessionStatus,
    pub location: String,
    pub duration_minutes: u32,
    pub has_reminder: bool,
    pub is_recurring: bool,
    pub notes: Option<String>,
}

impl Filterable for Session {
    fn id(&self) -> i32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.client_name.as_str(), self.location.as_str()];
        if let Some(notes) = &self.notes {
            fields.push(notes.as_str());
        }
        fields
    }

    fn facet_value(&self, facet: &str) -> Option<String> {
        match facet {
            "kind" => Some(self.kind.as_str().to_string()),
            "status" => Some(self.status.as_str().to_string()),
            "client" => Some(self.client_id.to_string()),
            _ => None,
        }
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "client" => SortValue::Text(self.client_name.clone()),
            "duration" => SortValue::Number(i64::from(self.duration_minutes)),
            _ => SortValue::Timestamp(self.starts_at),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewSession {
    pub client_id: i32,
    pub starts_at: NaiveDateTime,
    pub kind: SessionKind,
    pub location: String,
    pub duration_minutes: u32,
    pub has_reminder: bool,
    pub is_recurring: bool,
    pub notes: Option<String>,
}

impl NewSession {
    #[must_use]
    pub fn new(
        client_id: i32,
        starts_at: NaiveDateTime,
        kind: SessionKind,
        location: String,
        duration_minutes: u32,
        has_reminder: bool,
        is_recurring: bool,
        notes: Option<String>,
    ) -> Self {
        Self {
            client_id,
            starts_at,
            kind,
            location: location.trim().to_string(),
            duration_minutes,
            has_reminder,
            is_recurring,
            notes: notes
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}
