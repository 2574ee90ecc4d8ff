use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, http::header, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use tera::Tera;

use crate::assistant::CannedAssistant;
use crate::domain::settings::SettingsStore;
use crate::domain::types::PublicId;
use crate::dto::chat::ChatQuery;
use crate::forms::chat::SendMessageForm;
use crate::models::settings::SessionSettingsStore;
use crate::repository::memory::InMemoryRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::chat as chat_service;

#[get("/chat")]
pub async fn show_chat(
    params: web::Query<ChatQuery>,
    session: Session,
    repo: web::Data<InMemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match chat_service::load_chat(repo.get_ref(), params.into_inner()) {
        Ok(data) => data,
        Err(err) => {
            log::error!("Failed to load chat: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let ui_settings = SessionSettingsStore::new(session).load();
    let mut context = base_context(&flash_messages, "chat", &ui_settings);
    context.insert("conversations", &data.conversations);
    context.insert("active", &data.active);
    context.insert("quick_actions", &data.quick_actions);
    context.insert("empty_state", &data.empty_state);
    context.insert("search_query", &data.search_query);

    render_template(&tera, "chat/index.html", &context)
}

#[post("/chat/new")]
pub async fn new_conversation(repo: web::Data<InMemoryRepository>) -> impl Responder {
    match chat_service::start_conversation(repo.get_ref(), Utc::now().naive_utc()) {
        Ok(conversation) => redirect(&format!("/chat?c={}", conversation.public_id)),
        Err(err) => {
            log::error!("Failed to start conversation: {err}");
            FlashMessage::error("Could not start a conversation.").send();
            redirect("/chat")
        }
    }
}

#[post("/chat/{public_id}/send")]
pub async fn send_message(
    public_id: web::Path<String>,
    repo: web::Data<InMemoryRepository>,
    assistant: web::Data<CannedAssistant>,
    web::Form(form): web::Form<SendMessageForm>,
) -> impl Responder {
    let Ok(public_id) = public_id.parse::<PublicId>() else {
        FlashMessage::error("Conversation not found.").send();
        return redirect("/chat");
    };

    let result = chat_service::send_message(
        repo.get_ref(),
        assistant.get_ref(),
        public_id,
        form.message,
        Utc::now().naive_utc(),
    )
    .await;

    match result {
        Ok(_) => {}
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Conversation not found.").send();
            return redirect("/chat");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to send message: {err}");
            FlashMessage::error("Could not send the message.").send();
        }
    }

    redirect(&format!("/chat?c={public_id}"))
}

#[get("/chat/{public_id}/export")]
pub async fn export_conversation(
    public_id: web::Path<String>,
    repo: web::Data<InMemoryRepository>,
) -> impl Responder {
    let Ok(public_id) = public_id.parse::<PublicId>() else {
        return HttpResponse::NotFound().finish();
    };

    match chat_service::export_conversation(repo.get_ref(), public_id) {
        Ok(json) => HttpResponse::Ok()
            .content_type("application/json")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"conversation-{public_id}.json\""),
            ))
            .body(json),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to export conversation: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
