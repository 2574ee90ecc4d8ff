use chrono::NaiveDateTime;

use crate::{
    domain::{
        client::{Client, NewClient, UpdateClient},
        conversation::{Conversation, Message, NewConversation},
        invoice::Invoice,
        session::{NewSession, Session},
        types::PublicId,
    },
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod memory;
pub mod seed;

#[cfg(feature = "test-mocks")]
pub mod mock;

pub trait ClientReader {
    fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
}

pub trait ClientWriter {
    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
    fn update_client(&self, client_id: i32, updates: &UpdateClient) -> RepositoryResult<Client>;
    fn delete_client(&self, client_id: i32) -> RepositoryResult<()>;
}

pub trait SessionReader {
    fn get_session_by_id(&self, id: i32) -> RepositoryResult<Option<Session>>;
    fn list_sessions(&self) -> RepositoryResult<Vec<Session>>;
}

pub trait SessionWriter {
    fn create_session(&self, new_session: &NewSession) -> RepositoryResult<Session>;
}

pub trait ConversationReader {
    fn get_conversation(&self, public_id: &PublicId) -> RepositoryResult<Option<Conversation>>;
    fn list_conversations(&self) -> RepositoryResult<Vec<Conversation>>;
}

pub trait ConversationWriter {
    fn create_conversation(
        &self,
        new_conversation: &NewConversation,
        now: NaiveDateTime,
    ) -> RepositoryResult<Conversation>;
    fn append_message(
        &self,
        public_id: &PublicId,
        message: &Message,
    ) -> RepositoryResult<Conversation>;
    fn mark_conversation_read(&self, public_id: &PublicId) -> RepositoryResult<()>;
}

pub trait InvoiceReader {
    fn list_invoices(&self) -> RepositoryResult<Vec<Invoice>>;
    fn list_invoices_for_client(&self, client_id: i32) -> RepositoryResult<Vec<Invoice>>;
}
