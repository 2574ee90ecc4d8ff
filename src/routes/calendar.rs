use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use tera::Tera;

use crate::domain::settings::SettingsStore;
use crate::dto::calendar::CalendarQuery;
use crate::forms::calendar::ScheduleSessionForm;
use crate::models::settings::SessionSettingsStore;
use crate::repository::memory::InMemoryRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::calendar as calendar_service;

#[get("/calendar")]
pub async fn show_calendar(
    params: web::Query<CalendarQuery>,
    session: Session,
    repo: web::Data<InMemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match calendar_service::load_calendar(
        repo.get_ref(),
        params.into_inner(),
        Utc::now().naive_utc(),
    ) {
        Ok(data) => data,
        Err(err) => {
            log::error!("Failed to load calendar: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let ui_settings = SessionSettingsStore::new(session).load();
    let mut context = base_context(&flash_messages, "calendar", &ui_settings);
    context.insert("days", &data.days);
    context.insert("upcoming", &data.upcoming);
    context.insert("clients", &data.clients);
    context.insert("empty_state", &data.empty_state);
    context.insert("search_query", &data.search_query);
    context.insert("kind_filter", &data.kind_filter);
    context.insert("status_filter", &data.status_filter);
    context.insert("client_filter", &data.client_filter);
    context.insert("default_duration", &ui_settings.default_session_duration);

    render_template(&tera, "calendar/index.html", &context)
}

#[post("/calendar/schedule")]
pub async fn schedule_session(
    session: Session,
    repo: web::Data<InMemoryRepository>,
    web::Form(form): web::Form<ScheduleSessionForm>,
) -> impl Responder {
    let default_duration = SessionSettingsStore::new(session)
        .load()
        .default_session_duration;

    match calendar_service::schedule_session(repo.get_ref(), form, default_duration) {
        Ok(scheduled) => {
            FlashMessage::success(format!(
                "Session with {} scheduled.",
                scheduled.client_name
            ))
            .send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Client not found.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to schedule session: {err}");
            FlashMessage::error("Could not schedule the session.").send();
        }
    }
    redirect("/calendar")
}
