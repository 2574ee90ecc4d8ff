use chrono::NaiveDate;
use rafiki_crm::domain::client::{ClientStatus, NewClient, UpdateClient};
use rafiki_crm::domain::conversation::{Message, MessageRole};
use rafiki_crm::domain::invoice::PaymentStatus;
use rafiki_crm::domain::session::{NewSession, SessionKind, SessionStatus};
use rafiki_crm::repository::memory::InMemoryRepository;
use rafiki_crm::repository::{
    ClientReader, ClientWriter, ConversationReader, ConversationWriter, InvoiceReader,
    SessionReader, SessionWriter,
};

fn at(day: u32, hour: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 2, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

#[test]
fn seeded_store_matches_the_sample_practice() {
    let repo = InMemoryRepository::seeded();

    let clients = repo.list_clients().unwrap();
    assert_eq!(clients.len(), 5);
    assert_eq!(clients[0].name, "Sarah Johnson");

    assert_eq!(repo.list_sessions().unwrap().len(), 5);
    assert_eq!(repo.list_conversations().unwrap().len(), 3);
    assert_eq!(repo.list_invoices().unwrap().len(), 3);
}

#[test]
fn created_clients_are_prepended_with_fresh_ids() {
    let repo = InMemoryRepository::seeded();

    let created = repo
        .create_clients(&[NewClient::new(
            "Alex Morgan".to_string(),
            Some("alex@example.com".to_string()),
            None,
            "Career Coaching".to_string(),
            ClientStatus::Active,
        )])
        .unwrap();
    assert_eq!(created, 1);

    let clients = repo.list_clients().unwrap();
    assert_eq!(clients.len(), 6);
    assert_eq!(clients[0].name, "Alex Morgan");
    assert_eq!(clients[0].id, 6);
    assert_eq!(clients[0].session_count, 0);
}

#[test]
fn update_round_trips_and_bumps_updated_at() {
    let repo = InMemoryRepository::seeded();

    let before = repo.get_client_by_id(1).unwrap().unwrap();
    let updated = repo
        .update_client(
            1,
            &UpdateClient::new(
                "Sarah Johnson-Lee".to_string(),
                before.email.clone(),
                before.phone.clone(),
                before.coaching_type.clone(),
                ClientStatus::Paused,
                80,
            ),
        )
        .unwrap();

    assert_eq!(updated.name, "Sarah Johnson-Lee");
    assert_eq!(updated.status, ClientStatus::Paused);
    assert_eq!(updated.progress, 80);
    assert!(updated.updated_at >= before.updated_at);

    let reloaded = repo.get_client_by_id(1).unwrap().unwrap();
    assert_eq!(reloaded, updated);
}

#[test]
fn deleting_a_client_takes_their_sessions_along() {
    let repo = InMemoryRepository::seeded();

    repo.delete_client(1).unwrap();

    assert!(repo.get_client_by_id(1).unwrap().is_none());
    assert!(
        repo.list_sessions()
            .unwrap()
            .iter()
            .all(|session| session.client_id != 1)
    );
}

#[test]
fn deleting_an_unknown_client_reports_not_found() {
    let repo = InMemoryRepository::seeded();
    assert!(repo.delete_client(999).is_err());
}

#[test]
fn scheduled_sessions_are_confirmed_and_carry_the_client_name() {
    let repo = InMemoryRepository::seeded();

    let session = repo
        .create_session(&NewSession::new(
            2,
            at(10, 14),
            SessionKind::Consultation,
            "Office".to_string(),
            45,
            true,
            false,
            None,
        ))
        .unwrap();

    assert_eq!(session.client_name, "Michael Chen");
    assert_eq!(session.status, SessionStatus::Confirmed);
    assert_eq!(repo.get_session_by_id(session.id).unwrap(), Some(session));
}

#[test]
fn scheduling_for_an_unknown_client_fails() {
    let repo = InMemoryRepository::seeded();
    let result = repo.create_session(&NewSession::new(
        999,
        at(10, 14),
        SessionKind::Coaching,
        "Online".to_string(),
        60,
        false,
        false,
        None,
    ));
    assert!(result.is_err());
}

#[test]
fn appending_messages_refreshes_the_sidebar_fields() {
    let repo = InMemoryRepository::seeded();
    let conversation = repo.list_conversations().unwrap().remove(0);

    let updated = repo
        .append_message(
            &conversation.public_id,
            &Message {
                role: MessageRole::User,
                body: "What should I focus on next week?".to_string(),
                sent_at: at(5, 9),
            },
        )
        .unwrap();

    assert_eq!(updated.messages.len(), conversation.messages.len() + 1);
    assert_eq!(updated.preview, "What should I focus on next week?");
    assert_eq!(updated.last_message_at, at(5, 9));
}

#[test]
fn marking_read_clears_the_unread_badge() {
    let repo = InMemoryRepository::seeded();
    let unread = repo
        .list_conversations()
        .unwrap()
        .into_iter()
        .find(|c| c.unread_count > 0)
        .expect("seed contains an unread conversation");

    repo.mark_conversation_read(&unread.public_id).unwrap();

    let reloaded = repo.get_conversation(&unread.public_id).unwrap().unwrap();
    assert_eq!(reloaded.unread_count, 0);
}

#[test]
fn invoices_filter_by_client_and_lines_sum_to_totals() {
    let repo = InMemoryRepository::seeded();

    let invoices = repo.list_invoices_for_client(4).unwrap();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0].line_total_cents(), invoices[0].amount_cents);
    assert_eq!(invoices[0].status, PaymentStatus::Paid);

    assert!(repo.list_invoices_for_client(999).unwrap().is_empty());
}
