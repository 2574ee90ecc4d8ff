//! DTOs shaped for the assistant chat templates.

use serde::{Deserialize, Serialize};

use crate::collection::ListEmptyState;
use crate::domain::conversation::Conversation;

/// Query parameters accepted by the chat page.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ChatQuery {
    /// Free-text search over conversation titles and previews.
    pub q: Option<String>,
    /// Public id of the conversation to open.
    pub c: Option<String>,
}

/// One quick-action card above the message input.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct QuickAction {
    pub title: &'static str,
    pub prompt: &'static str,
    pub category: &'static str,
}

/// Data required to render the chat page.
#[derive(Debug, Serialize)]
pub struct ChatPageData {
    pub conversations: Vec<Conversation>,
    pub active: Option<Conversation>,
    pub quick_actions: Vec<QuickAction>,
    pub empty_state: Option<ListEmptyState>,
    pub search_query: Option<String>,
}
