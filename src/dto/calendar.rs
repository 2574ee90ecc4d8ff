//! DTOs shaped for the calendar and scheduling templates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::collection::ListEmptyState;
use crate::domain::client::Client;
use crate::domain::session::Session;

/// Query parameters accepted by the calendar page.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CalendarQuery {
    pub q: Option<String>,
    pub kind: Option<String>,
    pub status: Option<String>,
    /// Client id as a string facet value.
    pub client: Option<String>,
}

/// Sessions of one day, in start order.
#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub sessions: Vec<Session>,
}

/// Data required to render the calendar template.
#[derive(Debug, Serialize)]
pub struct CalendarPageData {
    pub days: Vec<CalendarDay>,
    pub upcoming: Vec<Session>,
    pub clients: Vec<Client>,
    pub empty_state: Option<ListEmptyState>,
    pub search_query: Option<String>,
    pub kind_filter: Option<String>,
    pub status_filter: Option<String>,
    pub client_filter: Option<String>,
}
