use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::settings::SettingsForm;
use crate::models::settings::SessionSettingsStore;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::settings as settings_service;

#[get("/settings")]
pub async fn show_settings(
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let store = SessionSettingsStore::new(session);
    let ui_settings = settings_service::load_settings(&store);

    let context = base_context(&flash_messages, "settings", &ui_settings);
    render_template(&tera, "settings/index.html", &context)
}

#[post("/settings")]
pub async fn save_settings(
    session: Session,
    web::Form(form): web::Form<SettingsForm>,
) -> impl Responder {
    let store = SessionSettingsStore::new(session);
    match settings_service::save_settings(&store, form) {
        Ok(_) => {
            FlashMessage::success("Settings saved.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to save settings: {err}");
            FlashMessage::error("Could not save settings.").send();
        }
    }
    redirect("/settings")
}
