//! DTOs shaped for the client table and client detail templates.

use serde::{Deserialize, Serialize};

use crate::collection::{ListEmptyState, SortDirection};
use crate::domain::client::Client;
use crate::domain::invoice::Invoice;
use crate::domain::session::Session;

/// Query parameters accepted by the client list page.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ClientListQuery {
    /// Free-text search over name, email, and coaching type.
    pub q: Option<String>,
    pub status: Option<String>,
    pub payment: Option<String>,
    #[serde(rename = "type")]
    pub coaching_type: Option<String>,
    /// Column to order by; repeating the active column toggles direction.
    pub sort: Option<String>,
    pub dir: Option<String>,
}

/// Data required to render the client table.
#[derive(Debug, Serialize)]
pub struct ClientListPageData {
    pub clients: Vec<Client>,
    pub total_count: usize,
    pub empty_state: Option<ListEmptyState>,
    pub search_query: Option<String>,
    pub status_filter: Option<String>,
    pub payment_filter: Option<String>,
    pub type_filter: Option<String>,
    pub sort_key: String,
    pub sort_direction: SortDirection,
}

/// Aggregated data required to render the client details page.
#[derive(Debug, Serialize)]
pub struct ClientPageData {
    pub client: Client,
    pub sessions: Vec<Session>,
    pub invoices: Vec<Invoice>,
}
