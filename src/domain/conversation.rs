use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::collection::{Filterable, SortValue};
use crate::domain::types::PublicId;

const PREVIEW_LEN: usize = 72;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    /// Sanitized before construction; see `MessageBody`.
    pub body: String,
    pub sent_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    pub id: i32,
    /// Addressed in URLs by this id, never the internal one.
    pub public_id: PublicId,
    pub title: String,
    pub preview: String,
    pub last_message_at: NaiveDateTime,
    pub unread_count: u32,
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Appends a message and refreshes the sidebar preview fields.
    pub fn push_message(&mut self, message: Message) {
        self.preview = preview_of(&message.body);
        self.last_message_at = message.sent_at;
        self.messages.push(message);
    }
}

/// First line of the body, truncated on a char boundary for the sidebar.
fn preview_of(body: &str) -> String {
    let first_line = body.lines().next().unwrap_or("");
    let mut preview: String = first_line.chars().take(PREVIEW_LEN).collect();
    if first_line.chars().count() > PREVIEW_LEN {
        preview.push('…');
    }
    preview
}

impl Filterable for Conversation {
    fn id(&self) -> i32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.preview.as_str()]
    }

    fn facet_value(&self, _facet: &str) -> Option<String> {
        None
    }

    fn sort_value(&self, _key: &str) -> SortValue {
        SortValue::Timestamp(self.last_message_at)
    }
}

#[derive(Clone, Debug)]
pub struct NewConversation {
    pub title: String,
    pub greeting: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 30)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn push_message_updates_preview_and_timestamp() {
        let mut conversation = Conversation {
            id: 1,
            public_id: PublicId::new(),
            title: "Session Analysis".to_string(),
            preview: String::new(),
            last_message_at: at(9),
            unread_count: 0,
            messages: vec![],
        };

        conversation.push_message(Message {
            role: MessageRole::User,
            body: "How should I handle resistance?\nSecond line".to_string(),
            sent_at: at(10),
        });

        assert_eq!(conversation.preview, "How should I handle resistance?");
        assert_eq!(conversation.last_message_at, at(10));
        assert_eq!(conversation.messages.len(), 1);
    }

    #[test]
    fn long_previews_are_truncated() {
        let mut conversation = Conversation {
            id: 1,
            public_id: PublicId::new(),
            title: "t".to_string(),
            preview: String::new(),
            last_message_at: at(9),
            unread_count: 0,
            messages: vec![],
        };

        conversation.push_message(Message {
            role: MessageRole::Assistant,
            body: "x".repeat(200),
            sent_at: at(10),
        });

        assert!(conversation.preview.chars().count() <= PREVIEW_LEN + 1);
        assert!(conversation.preview.ends_with('…'));
    }
}
