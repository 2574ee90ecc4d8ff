//! Sample practice data loaded into the store at startup.
//!
//! Content mirrors what a small coaching practice looks like after a few
//! months of use: five clients at different stages, a week of sessions,
//! a handful of assistant conversations, and recent invoices.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::client::{Client, ClientStatus};
use crate::domain::conversation::{Conversation, Message, MessageRole};
use crate::domain::invoice::{Invoice, InvoiceLine, PaymentStatus};
use crate::domain::session::{Session, SessionKind, SessionStatus};
use crate::domain::types::PublicId;

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

fn on(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn clients() -> Vec<Client> {
    vec![
        Client {
            id: 1,
            name: "Sarah Johnson".to_string(),
            email: Some("sarah.johnson@email.com".to_string()),
            phone: Some("+15551234567".to_string()),
            coaching_type: "Life Coaching".to_string(),
            status: ClientStatus::Active,
            last_session: Some(at(2025, 1, 28, 10, 0)),
            session_count: 12,
            progress: 75,
            payment_status: PaymentStatus::Paid,
            total_revenue_cents: 240_000,
            created_at: at(2024, 8, 12, 9, 0),
            updated_at: at(2025, 1, 28, 10, 0),
        },
        Client {
            id: 2,
            name: "Michael Chen".to_string(),
            email: Some("michael.chen@email.com".to_string()),
            phone: Some("+15552345678".to_string()),
            coaching_type: "Business Coaching".to_string(),
            status: ClientStatus::Active,
            last_session: Some(at(2025, 1, 25, 14, 30)),
            session_count: 8,
            progress: 60,
            payment_status: PaymentStatus::Pending,
            total_revenue_cents: 160_000,
            created_at: at(2024, 10, 3, 11, 0),
            updated_at: at(2025, 1, 25, 14, 30),
        },
        Client {
            id: 3,
            name: "Emily Rodriguez".to_string(),
            email: Some("emily.rodriguez@email.com".to_string()),
            phone: Some("+15553456789".to_string()),
            coaching_type: "Career Coaching".to_string(),
            status: ClientStatus::Inactive,
            last_session: Some(at(2025, 1, 20, 9, 0)),
            session_count: 15,
            progress: 90,
            payment_status: PaymentStatus::Overdue,
            total_revenue_cents: 300_000,
            created_at: at(2024, 6, 24, 15, 0),
            updated_at: at(2025, 1, 20, 9, 0),
        },
        Client {
            id: 4,
            name: "David Thompson".to_string(),
            email: Some("david.thompson@email.com".to_string()),
            phone: Some("+15554567890".to_string()),
            coaching_type: "Executive Coaching".to_string(),
            status: ClientStatus::Active,
            last_session: Some(at(2025, 1, 29, 16, 0)),
            session_count: 20,
            progress: 85,
            payment_status: PaymentStatus::Paid,
            total_revenue_cents: 500_000,
            created_at: at(2024, 4, 18, 10, 0),
            updated_at: at(2025, 1, 29, 16, 0),
        },
        Client {
            id: 5,
            name: "Lisa Wang".to_string(),
            email: Some("lisa.wang@email.com".to_string()),
            phone: Some("+15555678901".to_string()),
            coaching_type: "Health & Wellness".to_string(),
            status: ClientStatus::Paused,
            last_session: Some(at(2025, 1, 15, 11, 30)),
            session_count: 6,
            progress: 40,
            payment_status: PaymentStatus::Paid,
            total_revenue_cents: 120_000,
            created_at: at(2024, 11, 7, 13, 0),
            updated_at: at(2025, 1, 15, 11, 30),
        },
    ]
}

pub fn sessions() -> Vec<Session> {
    vec![
        Session {
            id: 1,
            client_id: 1,
            client_name: "Sarah Johnson".to_string(),
            starts_at: at(2025, 1, 30, 10, 0),
            kind: SessionKind::Coaching,
            status: SessionStatus::Confirmed,
            location: "Online".to_string(),
            duration_minutes: 60,
            has_reminder: true,
            is_recurring: true,
            notes: Some("Focus on career transition goals".to_string()),
        },
        Session {
            id: 2,
            client_id: 2,
            client_name: "Michael Chen".to_string(),
            starts_at: at(2025, 1, 30, 14, 30),
            kind: SessionKind::Consultation,
            status: SessionStatus::Confirmed,
            location: "Office".to_string(),
            duration_minutes: 45,
            has_reminder: true,
            is_recurring: false,
            notes: Some("Initial consultation for leadership coaching".to_string()),
        },
        Session {
            id: 3,
            client_id: 3,
            client_name: "Emily Rodriguez".to_string(),
            starts_at: at(2025, 1, 31, 9, 30),
            kind: SessionKind::Coaching,
            status: SessionStatus::Pending,
            location: "Online".to_string(),
            duration_minutes: 60,
            has_reminder: false,
            is_recurring: true,
            notes: Some("Work-life balance strategies".to_string()),
        },
        Session {
            id: 4,
            client_id: 4,
            client_name: "David Thompson".to_string(),
            starts_at: at(2025, 2, 1, 11, 0),
            kind: SessionKind::Workshop,
            status: SessionStatus::Confirmed,
            location: "Conference Room".to_string(),
            duration_minutes: 120,
            has_reminder: true,
            is_recurring: false,
            notes: Some("Team building workshop for leadership team".to_string()),
        },
        Session {
            id: 5,
            client_id: 5,
            client_name: "Lisa Wang".to_string(),
            starts_at: at(2025, 2, 3, 15, 30),
            kind: SessionKind::Coaching,
            status: SessionStatus::Confirmed,
            location: "Online".to_string(),
            duration_minutes: 60,
            has_reminder: true,
            is_recurring: true,
            notes: Some("Executive presence and communication skills".to_string()),
        },
    ]
}

pub fn conversations() -> Vec<Conversation> {
    let mut list = vec![
        Conversation {
            id: 1,
            public_id: PublicId::new(),
            title: "Session Analysis - Sarah Johnson".to_string(),
            preview: String::new(),
            last_message_at: at(2025, 1, 29, 15, 0),
            unread_count: 0,
            messages: Vec::new(),
        },
        Conversation {
            id: 2,
            public_id: PublicId::new(),
            title: "Coaching Techniques Discussion".to_string(),
            preview: String::new(),
            last_message_at: at(2025, 1, 29, 14, 0),
            unread_count: 2,
            messages: Vec::new(),
        },
        Conversation {
            id: 3,
            public_id: PublicId::new(),
            title: "Client Progress Review".to_string(),
            preview: String::new(),
            last_message_at: at(2025, 1, 28, 16, 0),
            unread_count: 0,
            messages: Vec::new(),
        },
    ];

    list[0].push_message(Message {
        role: MessageRole::Assistant,
        body: "Hello! I'm your AI coaching assistant. I can help you with session \
               analysis, coaching strategies, client insights, and much more.\n\n\
               How can I assist you with your coaching practice today?"
            .to_string(),
        sent_at: at(2025, 1, 29, 15, 0),
    });

    list[1].push_message(Message {
        role: MessageRole::User,
        body: "I need help with coaching techniques for executive clients who are \
               resistant to change."
            .to_string(),
        sent_at: at(2025, 1, 29, 13, 55),
    });
    list[1].push_message(Message {
        role: MessageRole::Assistant,
        body: "Working with resistant executive clients requires a nuanced approach. \
               Start by asking powerful questions that lead them to their own \
               conclusions, treat resistance as information about what they are \
               protecting, and connect personal change to business outcomes they \
               already care about."
            .to_string(),
        sent_at: at(2025, 1, 29, 14, 0),
    });

    list[2].push_message(Message {
        role: MessageRole::User,
        body: "Can you help me review the progress of my active clients and identify \
               who might need additional support?"
            .to_string(),
        sent_at: at(2025, 1, 28, 15, 55),
    });
    list[2].push_message(Message {
        role: MessageRole::Assistant,
        body: "Based on your client data, three clients are consistently meeting \
               session goals, two are making moderate progress and may benefit from \
               more frequent check-ins, and one is missing sessions and likely needs \
               a motivation reassessment."
            .to_string(),
        sent_at: at(2025, 1, 28, 16, 0),
    });

    list
}

pub fn invoices() -> Vec<Invoice> {
    vec![
        Invoice {
            id: 1,
            client_id: 4,
            issued_on: on(2025, 1, 28),
            amount_cents: 160_000,
            status: PaymentStatus::Paid,
            lines: vec![
                InvoiceLine {
                    date: on(2025, 1, 7),
                    description: "Leadership Coaching Session".to_string(),
                    amount_cents: 40_000,
                },
                InvoiceLine {
                    date: on(2025, 1, 14),
                    description: "Goal Setting Workshop".to_string(),
                    amount_cents: 40_000,
                },
                InvoiceLine {
                    date: on(2025, 1, 21),
                    description: "Time Management Coaching".to_string(),
                    amount_cents: 40_000,
                },
                InvoiceLine {
                    date: on(2025, 1, 28),
                    description: "Progress Review Session".to_string(),
                    amount_cents: 40_000,
                },
            ],
        },
        Invoice {
            id: 2,
            client_id: 3,
            issued_on: on(2025, 1, 23),
            amount_cents: 30_000,
            status: PaymentStatus::Overdue,
            lines: vec![InvoiceLine {
                date: on(2025, 1, 20),
                description: "Career Strategy Session".to_string(),
                amount_cents: 30_000,
            }],
        },
        Invoice {
            id: 3,
            client_id: 2,
            issued_on: on(2025, 1, 25),
            amount_cents: 20_000,
            status: PaymentStatus::Pending,
            lines: vec![InvoiceLine {
                date: on(2025, 1, 25),
                description: "Leadership Consultation".to_string(),
                amount_cents: 20_000,
            }],
        },
    ]
}
