use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Payment state shared by invoices and the client table badge.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Overdue => "overdue",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "paid" => Some(PaymentStatus::Paid),
            "pending" => Some(PaymentStatus::Pending),
            "overdue" => Some(PaymentStatus::Overdue),
            _ => None,
        }
    }
}

/// One billed line item on an invoice.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InvoiceLine {
    pub date: NaiveDate,
    pub description: String,
    pub amount_cents: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: i32,
    pub client_id: i32,
    pub issued_on: NaiveDate,
    pub amount_cents: i64,
    pub status: PaymentStatus,
    pub lines: Vec<InvoiceLine>,
}

impl Invoice {
    /// Sum of the line amounts; equals `amount_cents` for well-formed invoices.
    pub fn line_total_cents(&self) -> i64 {
        self.lines.iter().map(|line| line.amount_cents).sum()
    }
}
