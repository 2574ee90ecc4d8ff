use actix_multipart::form::MultipartForm;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, http::header, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::settings::SettingsStore;
use crate::dto::client::ClientListQuery;
use crate::forms::client::{
    AddClientForm, BulkActionForm, ClientIdForm, SaveClientForm, UploadClientsForm,
};
use crate::models::settings::SessionSettingsStore;
use crate::repository::memory::InMemoryRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::client::{self as client_service, BulkAction};

#[get("/clients")]
pub async fn show_clients(
    params: web::Query<ClientListQuery>,
    session: Session,
    repo: web::Data<InMemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match client_service::load_client_list(repo.get_ref(), params.into_inner()) {
        Ok(data) => data,
        Err(err) => {
            log::error!("Failed to load client list: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let ui_settings = SessionSettingsStore::new(session).load();
    let mut context = base_context(&flash_messages, "clients", &ui_settings);
    context.insert("clients", &data.clients);
    context.insert("total_count", &data.total_count);
    context.insert("empty_state", &data.empty_state);
    context.insert("search_query", &data.search_query);
    context.insert("status_filter", &data.status_filter);
    context.insert("payment_filter", &data.payment_filter);
    context.insert("type_filter", &data.type_filter);
    context.insert("sort_key", &data.sort_key);
    context.insert("sort_direction", &data.sort_direction);

    render_template(&tera, "client/index.html", &context)
}

#[get("/client/{client_id}")]
pub async fn show_client(
    client_id: web::Path<i32>,
    session: Session,
    repo: web::Data<InMemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match client_service::load_client_page(repo.get_ref(), client_id.into_inner()) {
        Ok(data) => data,
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Client not found.").send();
            return redirect("/clients");
        }
        Err(err) => {
            log::error!("Failed to load client: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let ui_settings = SessionSettingsStore::new(session).load();
    let mut context = base_context(&flash_messages, "clients", &ui_settings);
    context.insert("client", &data.client);
    context.insert("sessions", &data.sessions);
    context.insert("invoices", &data.invoices);

    render_template(&tera, "client/show.html", &context)
}

#[post("/clients/add")]
pub async fn add_client(
    repo: web::Data<InMemoryRepository>,
    web::Form(form): web::Form<AddClientForm>,
) -> impl Responder {
    match client_service::add_client(repo.get_ref(), form) {
        Ok(()) => {
            FlashMessage::success("Client added.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add a client: {err}");
            FlashMessage::error("Could not add the client.").send();
        }
    }
    redirect("/clients")
}

#[post("/client/save")]
pub async fn save_client(
    repo: web::Data<InMemoryRepository>,
    web::Form(form): web::Form<SaveClientForm>,
) -> impl Responder {
    let client_id = form.id;
    match client_service::save_client(repo.get_ref(), form) {
        Ok(_) => {
            FlashMessage::success("Client updated.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Client not found.").send();
            return redirect("/clients");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to update client: {err}");
            FlashMessage::error("Could not update the client.").send();
        }
    }
    redirect(&format!("/client/{client_id}"))
}

#[post("/client/delete")]
pub async fn delete_client(
    repo: web::Data<InMemoryRepository>,
    web::Form(form): web::Form<ClientIdForm>,
) -> impl Responder {
    match client_service::delete_client(repo.get_ref(), form.id) {
        Ok(()) => {
            FlashMessage::success("Client removed.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Client not found.").send();
        }
        Err(err) => {
            log::error!("Failed to delete client: {err}");
            FlashMessage::error("Could not remove the client.").send();
        }
    }
    redirect("/clients")
}

/// Bulk actions post `ids` once per checked row, which the default form
/// extractor cannot decode; the body is parsed with `serde_html_form`.
#[post("/clients/bulk")]
pub async fn bulk_clients(
    repo: web::Data<InMemoryRepository>,
    body: web::Bytes,
) -> impl Responder {
    let raw = match std::str::from_utf8(&body) {
        Ok(raw) => raw,
        Err(_) => return HttpResponse::BadRequest().finish(),
    };
    let form: BulkActionForm = match serde_html_form::from_str(raw) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to decode bulk action form: {err}");
            return HttpResponse::BadRequest().finish();
        }
    };

    let Some(action) = BulkAction::parse(&form.action) else {
        FlashMessage::error("Unknown bulk action.").send();
        return redirect("/clients");
    };

    let outcome =
        match client_service::bulk_clients(repo.get_ref(), form.list_query(), action, &form.ids) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("Failed to run bulk action: {err}");
                FlashMessage::error("Bulk action failed.").send();
                return redirect("/clients");
            }
        };

    if let Some(csv) = outcome.csv {
        return csv_download(csv, "clients-selection.csv");
    }

    if outcome.affected == 0 {
        FlashMessage::warning("No visible clients were selected.").send();
    } else {
        FlashMessage::success(format!(
            "{} applied to {} clients.",
            form.action, outcome.affected
        ))
        .send();
    }
    redirect("/clients")
}

#[get("/clients/export")]
pub async fn export_clients(
    params: web::Query<ClientListQuery>,
    repo: web::Data<InMemoryRepository>,
) -> impl Responder {
    match client_service::export_clients_csv(repo.get_ref(), params.into_inner()) {
        Ok(csv) => csv_download(csv, "clients.csv"),
        Err(err) => {
            log::error!("Failed to export clients: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/clients/upload")]
pub async fn upload_clients(
    repo: web::Data<InMemoryRepository>,
    MultipartForm(mut form): MultipartForm<UploadClientsForm>,
) -> impl Responder {
    match client_service::upload_clients(repo.get_ref(), &mut form) {
        Ok(count) => {
            FlashMessage::success(format!("{count} clients imported.")).send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to import clients: {err}");
            FlashMessage::error("Could not import clients.").send();
        }
    }
    redirect("/clients")
}

fn csv_download(csv: String, filename: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(csv)
}
