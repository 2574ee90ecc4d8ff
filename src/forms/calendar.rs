use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use validator::Validate;

use crate::domain::session::{NewSession, SessionKind};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for booking a session from the calendar.
pub struct ScheduleSessionForm {
    pub client_id: i32,
    /// Session date, `YYYY-MM-DD`.
    pub date: String,
    /// Session start time, `HH:MM`.
    pub time: String,
    pub kind: SessionKind,
    /// Minutes; falls back to the visitor's default when absent.
    pub duration_minutes: Option<u32>,
    #[validate(length(min = 1))]
    pub location: String,
    /// Checkbox, present when checked.
    #[serde(default)]
    pub send_reminder: Option<String>,
    #[serde(default)]
    pub recurring: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl ScheduleSessionForm {
    /// Builds the domain payload, resolving the start instant and the
    /// duration default.
    pub fn into_new_session(self, default_duration: u32) -> Result<NewSession, FormError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDateTime)?;
        let time = NaiveTime::parse_from_str(self.time.trim(), "%H:%M")
            .map_err(|_| FormError::InvalidDateTime)?;
        let starts_at = NaiveDateTime::new(date, time);

        Ok(NewSession::new(
            self.client_id,
            starts_at,
            self.kind,
            self.location,
            self.duration_minutes.unwrap_or(default_duration),
            self.send_reminder.is_some(),
            self.recurring.is_some(),
            Some(self.notes),
        ))
    }
}
