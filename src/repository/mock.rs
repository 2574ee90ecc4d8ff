//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDateTime;
use mockall::mock;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::conversation::{Conversation, Message, NewConversation};
use crate::domain::invoice::Invoice;
use crate::domain::session::{NewSession, Session};
use crate::domain::types::PublicId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientReader, ClientWriter, ConversationReader, ConversationWriter, InvoiceReader,
    SessionReader, SessionWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
        fn update_client(&self, client_id: i32, updates: &UpdateClient) -> RepositoryResult<Client>;
        fn delete_client(&self, client_id: i32) -> RepositoryResult<()>;
    }

    impl SessionReader for Repository {
        fn get_session_by_id(&self, id: i32) -> RepositoryResult<Option<Session>>;
        fn list_sessions(&self) -> RepositoryResult<Vec<Session>>;
    }

    impl SessionWriter for Repository {
        fn create_session(&self, new_session: &NewSession) -> RepositoryResult<Session>;
    }

    impl ConversationReader for Repository {
        fn get_conversation(&self, public_id: &PublicId) -> RepositoryResult<Option<Conversation>>;
        fn list_conversations(&self) -> RepositoryResult<Vec<Conversation>>;
    }

    impl ConversationWriter for Repository {
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

    impl InvoiceReader for Repository {
        fn list_invoices(&self) -> RepositoryResult<Vec<Invoice>>;
        fn list_invoices_for_client(&self, client_id: i32) -> RepositoryResult<Vec<Invoice>>;
    }
}
