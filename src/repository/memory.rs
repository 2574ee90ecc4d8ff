//! In-memory repository backing the whole application.
//!
//! The source of truth is seeded sample content held behind an `RwLock`;
//! there is no external persistence layer. Everything the services need
//! goes through the reader/writer traits so the storage medium stays
//! swappable.

use std::sync::{Arc, RwLock};

use chrono::{NaiveDateTime, Utc};

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::conversation::{Conversation, Message, NewConversation};
use crate::domain::invoice::Invoice;
use crate::domain::session::{NewSession, Session};
use crate::domain::types::PublicId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ClientReader, ClientWriter, ConversationReader, ConversationWriter, InvoiceReader,
    SessionReader, SessionWriter, seed,
};

#[derive(Default)]
struct Store {
    clients: Vec<Client>,
    sessions: Vec<Session>,
    conversations: Vec<Conversation>,
    invoices: Vec<Invoice>,
    next_client_id: i32,
    next_session_id: i32,
    next_conversation_id: i32,
}

impl Store {
    fn seeded() -> Self {
        let clients = seed::clients();
        let sessions = seed::sessions();
        let conversations = seed::conversations();
        let invoices = seed::invoices();

        let next_client_id = clients.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let next_session_id = sessions.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let next_conversation_id = conversations.iter().map(|c| c.id).max().unwrap_or(0) + 1;

        Self {
            clients,
            sessions,
            conversations,
            invoices,
            next_client_id,
            next_session_id,
            next_conversation_id,
        }
    }
}

/// Cloneable handle to the shared in-memory store.
#[derive(Clone)]
pub struct InMemoryRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryRepository {
    /// An empty store, used by tests.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
        }
    }

    /// A store populated with the sample practice data.
    pub fn seeded() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::seeded())),
        }
    }

    fn read(&self) -> RepositoryResult<std::sync::RwLockReadGuard<'_, Store>> {
        self.store
            .read()
            .map_err(|e| RepositoryError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> RepositoryResult<std::sync::RwLockWriteGuard<'_, Store>> {
        self.store
            .write()
            .map_err(|e| RepositoryError::LockPoisoned(e.to_string()))
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientReader for InMemoryRepository {
    fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<Client>> {
        let store = self.read()?;
        Ok(store.clients.iter().find(|c| c.id == id).cloned())
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        let store = self.read()?;
        Ok(store.clients.clone())
    }
}

impl ClientWriter for InMemoryRepository {
    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize> {
        let now = Utc::now().naive_utc();
        let mut store = self.write()?;
        for new_client in new_clients {
            let id = store.next_client_id;
            store.next_client_id += 1;
            store.clients.insert(
                0,
                Client {
                    id,
                    name: new_client.name.clone(),
                    email: new_client.email.clone(),
                    phone: new_client.phone.clone(),
                    coaching_type: new_client.coaching_type.clone(),
                    status: new_client.status,
                    last_session: None,
                    session_count: 0,
                    progress: 0,
                    payment_status: Default::default(),
                    total_revenue_cents: 0,
                    created_at: now,
                    updated_at: now,
                },
            );
        }
        Ok(new_clients.len())
    }

    fn update_client(&self, client_id: i32, updates: &UpdateClient) -> RepositoryResult<Client> {
        let now = Utc::now().naive_utc();
        let mut store = self.write()?;
        let client = store
            .clients
            .iter_mut()
            .find(|c| c.id == client_id)
            .ok_or(RepositoryError::NotFound)?;

        client.name = updates.name.clone();
        client.email = updates.email.clone();
        client.phone = updates.phone.clone();
        client.coaching_type = updates.coaching_type.clone();
        client.status = updates.status;
        client.progress = updates.progress;
        client.updated_at = now;

        Ok(client.clone())
    }

    fn delete_client(&self, client_id: i32) -> RepositoryResult<()> {
        let mut store = self.write()?;
        let before = store.clients.len();
        store.clients.retain(|c| c.id != client_id);
        if store.clients.len() == before {
            return Err(RepositoryError::NotFound);
        }
        store.sessions.retain(|s| s.client_id != client_id);
        Ok(())
    }
}

impl SessionReader for InMemoryRepository {
    fn get_session_by_id(&self, id: i32) -> RepositoryResult<Option<Session>> {
        let store = self.read()?;
        Ok(store.sessions.iter().find(|s| s.id == id).cloned())
    }

    fn list_sessions(&self) -> RepositoryResult<Vec<Session>> {
        let store = self.read()?;
        Ok(store.sessions.clone())
    }
}

impl SessionWriter for InMemoryRepository {
    fn create_session(&self, new_session: &NewSession) -> RepositoryResult<Session> {
        let mut store = self.write()?;
        let client_name = store
            .clients
            .iter()
            .find(|c| c.id == new_session.client_id)
            .map(|c| c.name.clone())
            .ok_or(RepositoryError::NotFound)?;

        let id = store.next_session_id;
        store.next_session_id += 1;

        let session = Session {
            id,
            client_id: new_session.client_id,
            client_name,
            starts_at: new_session.starts_at,
            kind: new_session.kind,
            status: crate::domain::session::SessionStatus::Confirmed,
            location: new_session.location.clone(),
            duration_minutes: new_session.duration_minutes,
            has_reminder: new_session.has_reminder,
            is_recurring: new_session.is_recurring,
            notes: new_session.notes.clone(),
        };
        store.sessions.push(session.clone());
        Ok(session)
    }
}

impl ConversationReader for InMemoryRepository {
    fn get_conversation(&self, public_id: &PublicId) -> RepositoryResult<Option<Conversation>> {
        let store = self.read()?;
        Ok(store
            .conversations
            .iter()
            .find(|c| &c.public_id == public_id)
            .cloned())
    }

    fn list_conversations(&self) -> RepositoryResult<Vec<Conversation>> {
        let store = self.read()?;
        Ok(store.conversations.clone())
    }
}

impl ConversationWriter for InMemoryRepository {
    fn create_conversation(
        &self,
        new_conversation: &NewConversation,
        now: NaiveDateTime,
    ) -> RepositoryResult<Conversation> {
        let mut store = self.write()?;
        let id = store.next_conversation_id;
        store.next_conversation_id += 1;

        let mut conversation = Conversation {
            id,
            public_id: PublicId::new(),
            title: new_conversation.title.clone(),
            preview: String::new(),
            last_message_at: now,
            unread_count: 0,
            messages: Vec::new(),
        };
        conversation.push_message(Message {
            role: crate::domain::conversation::MessageRole::Assistant,
            body: new_conversation.greeting.clone(),
            sent_at: now,
        });

        store.conversations.insert(0, conversation.clone());
        Ok(conversation)
    }

    fn append_message(
        &self,
        public_id: &PublicId,
        message: &Message,
    ) -> RepositoryResult<Conversation> {
        let mut store = self.write()?;
        let conversation = store
            .conversations
            .iter_mut()
            .find(|c| &c.public_id == public_id)
            .ok_or(RepositoryError::NotFound)?;

        conversation.push_message(message.clone());
        Ok(conversation.clone())
    }

    fn mark_conversation_read(&self, public_id: &PublicId) -> RepositoryResult<()> {
        let mut store = self.write()?;
        let conversation = store
            .conversations
            .iter_mut()
            .find(|c| &c.public_id == public_id)
            .ok_or(RepositoryError::NotFound)?;
        conversation.unread_count = 0;
        Ok(())
    }
}

impl InvoiceReader for InMemoryRepository {
    fn list_invoices(&self) -> RepositoryResult<Vec<Invoice>> {
        let store = self.read()?;
        Ok(store.invoices.clone())
    }

    fn list_invoices_for_client(&self, client_id: i32) -> RepositoryResult<Vec<Invoice>> {
        let store = self.read()?;
        Ok(store
            .invoices
            .iter()
            .filter(|i| i.client_id == client_id)
            .cloned()
            .collect())
    }
}
