use actix_session::Session;
use actix_web::{HttpRequest, Responder, get, http::StatusCode, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Utc;
use tera::Tera;

use crate::domain::settings::SettingsStore;
use crate::models::settings::SessionSettingsStore;
use crate::repository::memory::InMemoryRepository;
use crate::routes::{base_context, render_template, render_template_with_status};
use crate::services::main as main_service;

#[get("/")]
pub async fn show_landing(
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let ui_settings = SessionSettingsStore::new(session).load();
    let context = base_context(&flash_messages, "landing", &ui_settings);
    render_template(&tera, "main/landing.html", &context)
}

#[get("/dashboard")]
pub async fn show_dashboard(
    session: Session,
    repo: web::Data<InMemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match main_service::load_dashboard(repo.get_ref(), Utc::now().naive_utc()) {
        Ok(data) => data,
        Err(err) => {
            log::error!("Failed to load dashboard: {err}");
            return actix_web::HttpResponse::InternalServerError().finish();
        }
    };

    let ui_settings = SessionSettingsStore::new(session).load();
    let mut context = base_context(&flash_messages, "dashboard", &ui_settings);
    context.insert("stats", &data.stats);
    context.insert("upcoming_sessions", &data.upcoming_sessions);
    context.insert("payment_alerts", &data.payment_alerts);

    render_template(&tera, "main/dashboard.html", &context)
}

/// Default service for unmatched routes.
pub async fn not_found(
    request: HttpRequest,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    log::warn!("No route matches {}", request.path());
    let ui_settings = SessionSettingsStore::new(session).load();
    let context = base_context(&flash_messages, "not_found", &ui_settings);
    render_template_with_status(&tera, "main/not_found.html", &context, StatusCode::NOT_FOUND)
}
