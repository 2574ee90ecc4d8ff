use serde::Serialize;

use crate::domain::invoice::PaymentStatus;
use crate::domain::session::Session;

/// Stat tiles across the top of the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total_clients: usize,
    pub active_clients: usize,
    pub monthly_revenue_cents: i64,
    pub average_rating: f64,
}

/// One row in the dashboard's payment alert list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentAlert {
    pub client_name: String,
    pub amount_cents: i64,
    pub status: PaymentStatus,
    pub description: String,
}

/// Data required to render the dashboard template.
#[derive(Debug, Serialize)]
pub struct DashboardPageData {
    pub stats: DashboardStats,
    pub upcoming_sessions: Vec<Session>,
    pub payment_alerts: Vec<PaymentAlert>,
}
