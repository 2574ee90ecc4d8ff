//! Assistant chat workflows.

use chrono::NaiveDateTime;

use crate::assistant::{CoachingAssistantClient, GREETING};
use crate::collection::{FilterableCollection, SortDirection};
use crate::domain::conversation::{Conversation, Message, MessageRole, NewConversation};
use crate::domain::types::{MessageBody, PublicId};
use crate::dto::chat::{ChatPageData, ChatQuery, QuickAction};
use crate::repository::{ConversationReader, ConversationWriter};
use crate::services::{ServiceError, ServiceResult};

const DEFAULT_TITLE: &str = "New Conversation";

/// Prompt starters shown above the message input.
pub const QUICK_ACTIONS: [QuickAction; 5] = [
    QuickAction {
        title: "Analyze Recent Session",
        prompt: "Can you analyze my most recent coaching session and point out what worked?",
        category: "analysis",
    },
    QuickAction {
        title: "Suggest Coaching Techniques",
        prompt: "Suggest coaching techniques for a client who is resistant to change.",
        category: "techniques",
    },
    QuickAction {
        title: "Review Client Progress",
        prompt: "Review the progress of my active clients and flag anyone who needs support.",
        category: "progress",
    },
    QuickAction {
        title: "Prepare for Next Session",
        prompt: "Help me prepare an agenda for my next client session.",
        category: "preparation",
    },
    QuickAction {
        title: "Goal Setting Strategies",
        prompt: "What goal setting strategies work best for executive clients?",
        category: "strategies",
    },
];

/// Loads the sidebar and the active conversation.
///
/// Opening a conversation clears its unread badge.
pub fn load_chat<R>(repo: &R, query: ChatQuery) -> ServiceResult<ChatPageData>
where
    R: ConversationReader + ConversationWriter + ?Sized,
{
    let mut collection = FilterableCollection::new(repo.list_conversations()?);
    if let Some(q) = query.q.as_deref() {
        collection.set_query(q);
    }
    collection.set_sort("last_message_at", SortDirection::Desc);

    let conversations: Vec<Conversation> = collection.visible().into_iter().cloned().collect();
    let empty_state = collection.empty_state();

    let requested: Option<PublicId> = query.c.as_deref().and_then(|raw| raw.parse().ok());
    let active = match requested {
        Some(public_id) => repo.get_conversation(&public_id)?,
        None => conversations.first().cloned(),
    };

    if let Some(conversation) = &active {
        if conversation.unread_count > 0 {
            repo.mark_conversation_read(&conversation.public_id)?;
        }
    }

    Ok(ChatPageData {
        conversations,
        active,
        quick_actions: QUICK_ACTIONS.to_vec(),
        empty_state,
        search_query: query.q.clone().filter(|q| !q.trim().is_empty()),
    })
}

/// Appends the visitor's message, asks the assistant, and appends the
/// reply. Both writes go through the repository so the sidebar preview
/// and timestamps stay consistent.
pub async fn send_message<R, A>(
    repo: &R,
    assistant: &A,
    public_id: PublicId,
    raw_message: String,
    now: NaiveDateTime,
) -> ServiceResult<Conversation>
where
    R: ConversationReader + ConversationWriter + ?Sized,
    A: CoachingAssistantClient + ?Sized,
{
    let body = MessageBody::new(raw_message)
        .map_err(|_| ServiceError::Form("Message cannot be empty".to_string()))?;

    let conversation = repo.append_message(
        &public_id,
        &Message {
            role: MessageRole::User,
            body: body.as_str().to_string(),
            sent_at: now,
        },
    )?;

    let reply = assistant.respond(body.as_str(), &conversation.messages).await;

    let conversation = repo.append_message(
        &public_id,
        &Message {
            role: MessageRole::Assistant,
            body: reply,
            sent_at: now,
        },
    )?;

    Ok(conversation)
}

/// Opens a fresh conversation seeded with the assistant greeting.
pub fn start_conversation<R>(repo: &R, now: NaiveDateTime) -> ServiceResult<Conversation>
where
    R: ConversationWriter + ?Sized,
{
    let new_conversation = NewConversation {
        title: DEFAULT_TITLE.to_string(),
        greeting: GREETING.to_string(),
    };
    repo.create_conversation(&new_conversation, now)
        .map_err(ServiceError::from)
}

/// Serializes one conversation for download.
pub fn export_conversation<R>(repo: &R, public_id: PublicId) -> ServiceResult<String>
where
    R: ConversationReader + ?Sized,
{
    let conversation = repo
        .get_conversation(&public_id)?
        .ok_or(ServiceError::NotFound)?;

    serde_json::to_string_pretty(&conversation)
        .map_err(|err| ServiceError::Form(format!("export failed: {err}")))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::repository::seed;
    use chrono::NaiveDate;

    struct ScriptedAssistant;

    impl CoachingAssistantClient for ScriptedAssistant {
        async fn respond(&self, _prompt: &str, _history: &[Message]) -> String {
            "Scripted reply".to_string()
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 30)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn sidebar_sorts_by_recency_and_defaults_to_the_newest() {
        let mut repo = MockRepository::new();
        repo.expect_list_conversations()
            .returning(|| Ok(seed::conversations()));
        // The newest conversation has no unread messages, so no write happens.
        repo.expect_mark_conversation_read().times(0);

        let data = load_chat(&repo, ChatQuery::default()).expect("chat loads");
        let ids: Vec<i32> = data.conversations.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(data.active.as_ref().map(|c| c.id), Some(1));
        assert_eq!(data.quick_actions.len(), 5);
    }

    #[test]
    fn sidebar_search_filters_titles_and_previews() {
        let mut repo = MockRepository::new();
        repo.expect_list_conversations()
            .returning(|| Ok(seed::conversations()));
        repo.expect_mark_conversation_read().returning(|_| Ok(()));

        let mut query = ChatQuery::default();
        query.q = Some("progress".to_string());
        let data = load_chat(&repo, query).expect("chat loads");

        let ids: Vec<i32> = data.conversations.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[actix_web::test]
    async fn send_message_appends_user_then_assistant() {
        let conversations = seed::conversations();
        let target = conversations[0].clone();
        let public_id = target.public_id;

        let mut repo = MockRepository::new();
        let mut call = 0;
        repo.expect_append_message()
            .times(2)
            .returning(move |_, message| {
                call += 1;
                let mut conversation = target.clone();
                match call {
                    1 => assert_eq!(message.role, MessageRole::User),
                    _ => assert_eq!(message.role, MessageRole::Assistant),
                }
                conversation.push_message(message.clone());
                Ok(conversation)
            });

        let conversation = send_message(
            &repo,
            &ScriptedAssistant,
            public_id,
            "<b>How</b> do I start?".to_string(),
            now(),
        )
        .await
        .expect("message sent");

        assert_eq!(
            conversation.messages.last().map(|m| m.body.as_str()),
            Some("Scripted reply")
        );
    }

    #[actix_web::test]
    async fn blank_message_is_rejected_before_any_write() {
        let mut repo = MockRepository::new();
        repo.expect_append_message().times(0);

        let result = send_message(
            &repo,
            &ScriptedAssistant,
            PublicId::new(),
            "   ".to_string(),
            now(),
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
