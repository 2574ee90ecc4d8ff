//! Client table workflows: filtering, CRUD, import/export, bulk actions.

use std::collections::HashSet;

use crate::collection::{FilterableCollection, SortDirection};
use crate::domain::client::{Client, ClientStatus};
use crate::domain::invoice::PaymentStatus;
use crate::dto::client::{ClientListPageData, ClientListQuery, ClientPageData};
use crate::forms::client::{AddClientForm, SaveClientForm, UploadClientsForm};
use crate::repository::{ClientReader, ClientWriter, InvoiceReader, SessionReader};
use crate::services::{ServiceError, ServiceResult};

const DEFAULT_SORT_KEY: &str = "name";

/// Bulk operations offered over the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulkAction {
    SendReminder,
    UpdateStatus,
    ExportData,
    Archive,
}

impl BulkAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "send-reminder" => Some(BulkAction::SendReminder),
            "update-status" => Some(BulkAction::UpdateStatus),
            "export-data" => Some(BulkAction::ExportData),
            "archive" => Some(BulkAction::Archive),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BulkAction::SendReminder => "send-reminder",
            BulkAction::UpdateStatus => "update-status",
            BulkAction::ExportData => "export-data",
            BulkAction::Archive => "archive",
        }
    }
}

/// Builds the filtered projection described by the URL parameters.
fn build_collection<R>(
    repo: &R,
    query: &ClientListQuery,
) -> ServiceResult<FilterableCollection<Client>>
where
    R: ClientReader + ?Sized,
{
    let mut collection = FilterableCollection::new(repo.list_clients()?);

    if let Some(status) = query.status.as_deref().and_then(ClientStatus::parse) {
        collection.set_facet("status", HashSet::from([status.as_str().to_string()]));
    }
    if let Some(payment) = query.payment.as_deref().and_then(PaymentStatus::parse) {
        collection.set_facet("payment", HashSet::from([payment.as_str().to_string()]));
    }
    if let Some(coaching_type) = query
        .coaching_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        collection.set_facet("type", HashSet::from([coaching_type.to_string()]));
    }
    if let Some(q) = query.q.as_deref() {
        collection.set_query(q);
    }

    let sort_key = query.sort.as_deref().unwrap_or(DEFAULT_SORT_KEY);
    let direction = query
        .dir
        .as_deref()
        .and_then(SortDirection::parse)
        .unwrap_or_default();
    collection.set_sort(sort_key, direction);

    Ok(collection)
}

/// Loads the client table for the management page.
pub fn load_client_list<R>(repo: &R, query: ClientListQuery) -> ServiceResult<ClientListPageData>
where
    R: ClientReader + ?Sized,
{
    let collection = build_collection(repo, &query)?;

    let clients: Vec<Client> = collection.visible().into_iter().cloned().collect();
    let empty_state = collection.empty_state();
    let (sort_key, sort_direction) = collection
        .sort()
        .map(|(key, direction)| (key.to_string(), direction))
        .unwrap_or_else(|| (DEFAULT_SORT_KEY.to_string(), SortDirection::Asc));

    Ok(ClientListPageData {
        total_count: collection.items().len(),
        clients,
        empty_state,
        search_query: query.q.clone().filter(|q| !q.trim().is_empty()),
        status_filter: query.status,
        payment_filter: query.payment,
        type_filter: query.coaching_type,
        sort_key,
        sort_direction,
    })
}

/// Loads one client with their sessions and invoices.
pub fn load_client_page<R>(repo: &R, client_id: i32) -> ServiceResult<ClientPageData>
where
    R: ClientReader + SessionReader + InvoiceReader + ?Sized,
{
    let client = repo
        .get_client_by_id(client_id)?
        .ok_or(ServiceError::NotFound)?;

    let mut sessions: Vec<_> = repo
        .list_sessions()?
        .into_iter()
        .filter(|session| session.client_id == client_id)
        .collect();
    sessions.sort_by_key(|session| std::cmp::Reverse(session.starts_at));

    let invoices = repo.list_invoices_for_client(client_id)?;

    Ok(ClientPageData {
        client,
        sessions,
        invoices,
    })
}

/// Validates the add-client form and stores the new record.
pub fn add_client<R>(repo: &R, form: AddClientForm) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    use validator::Validate;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate add-client form: {err}");
        return Err(ServiceError::Form("Please check the client details".to_string()));
    }

    let new_client = form.into_new_client()?;
    repo.create_clients(&[new_client]).map_err(|err| {
        log::error!("Failed to add a client: {err}");
        err
    })?;

    Ok(())
}

/// Applies edits from the client detail form.
pub fn save_client<R>(repo: &R, form: SaveClientForm) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    use validator::Validate;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate save-client form: {err}");
        return Err(ServiceError::Form("Please check the client details".to_string()));
    }

    let client_id = form.id;
    let updates = form.into_update()?;

    repo.update_client(client_id, &updates).map_err(|err| {
        log::error!("Failed to update client {client_id}: {err}");
        ServiceError::from(err)
    })
}

pub fn delete_client<R>(repo: &R, client_id: i32) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    repo.delete_client(client_id).map_err(|err| {
        log::error!("Failed to delete client {client_id}: {err}");
        ServiceError::from(err)
    })
}

/// Parses the uploaded CSV file and creates client records in bulk.
pub fn upload_clients<R>(repo: &R, form: &mut UploadClientsForm) -> ServiceResult<usize>
where
    R: ClientWriter + ?Sized,
{
    let clients = form.parse().map_err(|err| {
        log::error!("Failed to parse uploaded clients: {err}");
        ServiceError::from(err)
    })?;

    repo.create_clients(&clients).map_err(|err| {
        log::error!("Failed to add clients: {err}");
        ServiceError::from(err)
    })
}

/// Renders the current projection as a CSV download body.
pub fn export_clients_csv<R>(repo: &R, query: ClientListQuery) -> ServiceResult<String>
where
    R: ClientReader + ?Sized,
{
    let collection = build_collection(repo, &query)?;
    write_clients_csv(&collection.visible())
}

/// Applies a bulk action to the selected rows of the current projection.
///
/// Selection is scoped to visible rows: posted ids hidden by the active
/// filters are dropped before anything runs. Apart from `export-data`,
/// actions are fire-and-forget notifications with no stored effect.
pub fn bulk_clients<R>(
    repo: &R,
    query: ClientListQuery,
    action: BulkAction,
    ids: &[i32],
) -> ServiceResult<BulkOutcome>
where
    R: ClientReader + ?Sized,
{
    let mut collection = build_collection(repo, &query)?;
    for id in ids {
        collection.toggle_selection(*id);
    }

    let selected = collection.selected_visible();
    if selected.is_empty() {
        return Ok(BulkOutcome {
            affected: 0,
            csv: None,
        });
    }

    log::info!(
        "Bulk action {} on {} clients: {:?}",
        action.as_str(),
        selected.len(),
        selected.iter().map(|client| client.id).collect::<Vec<_>>()
    );

    let csv = match action {
        BulkAction::ExportData => Some(write_clients_csv(&selected)?),
        _ => None,
    };

    Ok(BulkOutcome {
        affected: selected.len(),
        csv,
    })
}

/// Result of a bulk action; `csv` is set for `export-data`.
#[derive(Debug)]
pub struct BulkOutcome {
    pub affected: usize,
    pub csv: Option<String>,
}

fn write_clients_csv(clients: &[&Client]) -> ServiceResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([
            "name",
            "email",
            "phone",
            "type",
            "status",
            "last_session",
            "sessions",
            "progress",
            "payment",
            "revenue",
        ])
        .map_err(|err| ServiceError::Form(format!("csv write failed: {err}")))?;

    for client in clients {
        let record = [
            client.name.clone(),
            client.email.clone().unwrap_or_default(),
            client.phone.clone().unwrap_or_default(),
            client.coaching_type.clone(),
            client.status.as_str().to_string(),
            client
                .last_session
                .map(|at| at.to_string())
                .unwrap_or_default(),
            client.session_count.to_string(),
            client.progress.to_string(),
            client.payment_status.as_str().to_string(),
            format!("{:.2}", client.total_revenue_cents as f64 / 100.0),
        ];
        writer
            .write_record(&record)
            .map_err(|err| ServiceError::Form(format!("csv write failed: {err}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ServiceError::Form(format!("csv write failed: {err}")))?;
    String::from_utf8(bytes).map_err(|err| ServiceError::Form(format!("csv write failed: {err}")))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::collection::ListEmptyState;
    use crate::repository::mock::MockRepository;
    use crate::repository::seed;

    fn query() -> ClientListQuery {
        ClientListQuery::default()
    }

    #[test]
    fn list_defaults_to_name_ascending() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients().returning(|| Ok(seed::clients()));

        let data = load_client_list(&repo, query()).expect("list loads");
        let names: Vec<&str> = data.clients.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "David Thompson",
                "Emily Rodriguez",
                "Lisa Wang",
                "Michael Chen",
                "Sarah Johnson"
            ]
        );
        assert_eq!(data.empty_state, None);
    }

    #[test]
    fn status_facet_restricts_the_table() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients().returning(|| Ok(seed::clients()));

        let mut q = query();
        q.status = Some("active".to_string());
        let data = load_client_list(&repo, q).expect("list loads");

        assert_eq!(data.clients.len(), 3);
        assert!(
            data.clients
                .iter()
                .all(|c| c.status == ClientStatus::Active)
        );
    }

    #[test]
    fn unmatched_query_yields_the_no_matches_state() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients().returning(|| Ok(seed::clients()));

        let mut q = query();
        q.q = Some("zzzzz".to_string());
        let data = load_client_list(&repo, q).expect("list loads");

        assert!(data.clients.is_empty());
        assert_eq!(data.empty_state, Some(ListEmptyState::NoMatches));
    }

    #[test]
    fn empty_store_yields_the_no_items_state() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients().returning(|| Ok(vec![]));

        let data = load_client_list(&repo, query()).expect("list loads");
        assert_eq!(data.empty_state, Some(ListEmptyState::NoItems));
    }

    #[test]
    fn bulk_action_ignores_ids_hidden_by_filters() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients().returning(|| Ok(seed::clients()));

        let mut q = query();
        q.status = Some("active".to_string());
        // Client 3 is inactive, so only 1 and 4 survive the scope check.
        let outcome = bulk_clients(&repo, q, BulkAction::SendReminder, &[1, 3, 4])
            .expect("bulk runs");

        assert_eq!(outcome.affected, 2);
        assert!(outcome.csv.is_none());
    }

    #[test]
    fn export_data_produces_csv_for_the_selection() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients().returning(|| Ok(seed::clients()));

        let outcome =
            bulk_clients(&repo, query(), BulkAction::ExportData, &[1]).expect("bulk runs");
        let csv = outcome.csv.expect("export yields csv");
        assert!(csv.starts_with("name,email,phone"));
        assert!(csv.contains("Sarah Johnson"));
    }

    #[test]
    fn add_client_persists_through_the_writer() {
        let mut repo = MockRepository::new();
        repo.expect_create_clients()
            .withf(|clients| clients.len() == 1 && clients[0].name == "Alex Morgan")
            .times(1)
            .returning(|clients| Ok(clients.len()));

        let form = AddClientForm {
            name: "Alex Morgan".to_string(),
            email: "alex@example.com".to_string(),
            phone: String::new(),
            coaching_type: "Career Coaching".to_string(),
            status: ClientStatus::Active,
        };

        add_client(&repo, form).expect("client added");
    }
}
