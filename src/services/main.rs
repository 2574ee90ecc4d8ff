//! Dashboard aggregation.

use chrono::{Datelike, NaiveDateTime};

use crate::domain::client::ClientStatus;
use crate::domain::invoice::PaymentStatus;
use crate::dto::main::{DashboardPageData, DashboardStats, PaymentAlert};
use crate::repository::{ClientReader, InvoiceReader, SessionReader};
use crate::services::ServiceResult;

/// There is no rating source yet; the tile shows this fixed value.
const AVERAGE_RATING: f64 = 4.8;

const UPCOMING_LIMIT: usize = 3;

/// Collects the stat tiles, next sessions, and payment alerts.
pub fn load_dashboard<R>(repo: &R, now: NaiveDateTime) -> ServiceResult<DashboardPageData>
where
    R: ClientReader + SessionReader + InvoiceReader + ?Sized,
{
    let clients = repo.list_clients()?;
    let invoices = repo.list_invoices()?;

    let monthly_revenue_cents = invoices
        .iter()
        .filter(|invoice| invoice.status == PaymentStatus::Paid)
        .filter(|invoice| {
            invoice.issued_on.year() == now.date().year()
                && invoice.issued_on.month() == now.date().month()
        })
        .map(|invoice| invoice.amount_cents)
        .sum();

    let stats = DashboardStats {
        total_clients: clients.len(),
        active_clients: clients
            .iter()
            .filter(|client| client.status == ClientStatus::Active)
            .count(),
        monthly_revenue_cents,
        average_rating: AVERAGE_RATING,
    };

    let mut upcoming_sessions: Vec<_> = repo
        .list_sessions()?
        .into_iter()
        .filter(|session| session.starts_at >= now)
        .collect();
    upcoming_sessions.sort_by_key(|session| session.starts_at);
    upcoming_sessions.truncate(UPCOMING_LIMIT);

    let payment_alerts = invoices
        .iter()
        .filter(|invoice| invoice.status != PaymentStatus::Paid)
        .map(|invoice| {
            let client_name = clients
                .iter()
                .find(|client| client.id == invoice.client_id)
                .map(|client| client.name.clone())
                .unwrap_or_else(|| format!("Client #{}", invoice.client_id));

            let description = match invoice.status {
                PaymentStatus::Overdue => {
                    let days = (now.date() - invoice.issued_on).num_days();
                    format!("Payment overdue by {days} days")
                }
                _ => {
                    let days = (now.date() - invoice.issued_on).num_days();
                    format!("Invoice sent {days} days ago")
                }
            };

            PaymentAlert {
                client_name,
                amount_cents: invoice.amount_cents,
                status: invoice.status,
                description,
            }
        })
        .collect();

    Ok(DashboardPageData {
        stats,
        upcoming_sessions,
        payment_alerts,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::repository::seed;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn dashboard_aggregates_seeded_data() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients().returning(|| Ok(seed::clients()));
        repo.expect_list_sessions()
            .returning(|| Ok(seed::sessions()));
        repo.expect_list_invoices()
            .returning(|| Ok(seed::invoices()));

        let data = load_dashboard(&repo, at(2025, 1, 30)).expect("dashboard loads");

        assert_eq!(data.stats.total_clients, 5);
        assert_eq!(data.stats.active_clients, 3);
        // Only the paid January invoice counts toward monthly revenue.
        assert_eq!(data.stats.monthly_revenue_cents, 160_000);

        // Next three sessions from Jan 30 onward, in start order.
        let ids: Vec<i32> = data.upcoming_sessions.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        assert_eq!(data.payment_alerts.len(), 2);
        assert_eq!(data.payment_alerts[0].client_name, "Emily Rodriguez");
        assert_eq!(data.payment_alerts[0].description, "Payment overdue by 7 days");
    }
}
