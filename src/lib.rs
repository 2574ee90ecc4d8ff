use std::time::Duration;

use actix_cors::Cors;
use actix_files::Files;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::assistant::CannedAssistant;
use crate::models::config::ServerConfig;
use crate::repository::memory::InMemoryRepository;
use crate::routes::calendar::{schedule_session, show_calendar};
use crate::routes::chat::{export_conversation, new_conversation, send_message, show_chat};
use crate::routes::client::{
    add_client, bulk_clients, delete_client, export_clients, save_client, show_client,
    show_clients, upload_clients,
};
use crate::routes::main::{not_found, show_dashboard, show_landing};
use crate::routes::register::{
    previous_step, resend_code, show_register, show_verification, submit_step, verify_code,
};
use crate::routes::settings::{save_settings, show_settings};

pub mod assistant;
pub mod collection;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod wizard;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Everything lives in memory, seeded with the sample practice data.
    let repo = InMemoryRepository::seeded();

    let assistant = CannedAssistant::new(Duration::from_millis(
        server_config.simulated_latency_ms,
    ));

    // Keys and stores for sessions and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    let assets_dir = server_config.assets_dir.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", assets_dir.clone()))
            .service(show_landing)
            .service(show_dashboard)
            .service(show_clients)
            .service(show_client)
            .service(add_client)
            .service(save_client)
            .service(delete_client)
            .service(bulk_clients)
            .service(export_clients)
            .service(upload_clients)
            .service(show_calendar)
            .service(schedule_session)
            .service(show_chat)
            .service(new_conversation)
            .service(send_message)
            .service(export_conversation)
            .service(show_register)
            .service(submit_step)
            .service(previous_step)
            .service(show_verification)
            .service(verify_code)
            .service(resend_code)
            .service(show_settings)
            .service(save_settings)
            .default_service(web::route().to(not_found))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(assistant.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
