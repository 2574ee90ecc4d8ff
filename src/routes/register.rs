use std::time::Duration;

use actix_session::Session;
use actix_web::rt::time::sleep;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use tera::Tera;

use crate::domain::settings::SettingsStore;
use crate::forms::register::VerifyCodeForm;
use crate::models::config::ServerConfig;
use crate::models::settings::SessionSettingsStore;
use crate::routes::{base_context, redirect, render_template};
use crate::services::register as register_service;
use crate::wizard::password::password_strength;
use crate::wizard::verification::VerificationState;
use crate::wizard::{StepAdvance, WizardState, WizardStep};

const WIZARD_KEY: &str = "registration-wizard";
const VERIFICATION_KEY: &str = "registration-verification";

/// Delay applied after verification succeeds, before leaving the flow.
const COMPLETION_DELAY_MS: u64 = 1_000;

fn load_wizard(session: &Session) -> WizardState {
    session
        .get::<WizardState>(WIZARD_KEY)
        .ok()
        .flatten()
        .unwrap_or_default()
}

fn store_wizard(session: &Session, state: &WizardState) -> bool {
    if let Err(err) = session.insert(WIZARD_KEY, state) {
        log::error!("Failed to store wizard state: {err}");
        return false;
    }
    true
}

fn load_verification(session: &Session) -> Option<VerificationState> {
    session.get::<VerificationState>(VERIFICATION_KEY).ok().flatten()
}

fn store_verification(session: &Session, state: &VerificationState) -> bool {
    if let Err(err) = session.insert(VERIFICATION_KEY, state) {
        log::error!("Failed to store verification state: {err}");
        return false;
    }
    true
}

#[get("/register")]
pub async fn show_register(
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    // A pending verification takes over the whole flow.
    if load_verification(&session).is_some() {
        return redirect("/register/verify");
    }

    let state = load_wizard(&session);
    let ui_settings = SessionSettingsStore::new(session).load();

    let mut context = base_context(&flash_messages, "register", &ui_settings);
    context.insert("step", &state.current_step());
    context.insert("step_index", &state.current_step().index());
    context.insert("step_title", state.current_step().title());
    context.insert("total_steps", &WizardStep::ALL.len());
    context.insert(
        "step_titles",
        &WizardStep::ALL.map(WizardStep::title).to_vec(),
    );
    context.insert("fields", state.fields());
    context.insert("errors", state.errors());
    context.insert(
        "password_strength",
        &password_strength(state.fields().text("password")).label,
    );

    render_template(&tera, "register/index.html", &context)
}

/// One wizard step posts here; the body is decoded per the active step.
#[post("/register")]
pub async fn submit_step(
    session: Session,
    server_config: web::Data<ServerConfig>,
    body: web::Bytes,
) -> impl Responder {
    let Ok(raw) = std::str::from_utf8(&body) else {
        return HttpResponse::BadRequest().finish();
    };

    let mut state = load_wizard(&session);
    let outcome = match register_service::submit_step(&mut state, raw) {
        Ok(outcome) => outcome,
        Err(err) => {
            log::error!("Failed to apply wizard step: {err}");
            FlashMessage::error("Could not read the submitted form.").send();
            return redirect("/register");
        }
    };

    match outcome {
        StepAdvance::Rejected | StepAdvance::Advanced => {
            if !store_wizard(&session, &state) {
                return HttpResponse::InternalServerError().finish();
            }
            redirect("/register")
        }
        StepAdvance::Completed => {
            // Simulated account creation; always succeeds after the delay.
            sleep(Duration::from_millis(server_config.simulated_latency_ms)).await;

            let verification = register_service::begin_verification(&state);
            session.remove(WIZARD_KEY);
            if !store_verification(&session, &verification) {
                return HttpResponse::InternalServerError().finish();
            }
            redirect("/register/verify")
        }
    }
}

/// Back navigation never validates, but the in-flight edits are still
/// merged so nothing typed on the current step is lost.
#[post("/register/back")]
pub async fn previous_step(session: Session, body: web::Bytes) -> impl Responder {
    let mut state = load_wizard(&session);
    if let Ok(raw) = std::str::from_utf8(&body) {
        if let Err(err) =
            crate::forms::register::apply_step_body(state.current_step(), raw, &mut state)
        {
            log::warn!("Ignoring undecodable step body on back-navigation: {err}");
        }
    }
    state.go_previous();
    if !store_wizard(&session, &state) {
        return HttpResponse::InternalServerError().finish();
    }
    redirect("/register")
}

#[get("/register/verify")]
pub async fn show_verification(
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some(verification) = load_verification(&session) else {
        return redirect("/register");
    };

    let ui_settings = SessionSettingsStore::new(session).load();
    let mut context = base_context(&flash_messages, "register", &ui_settings);
    context.insert("email", &verification.email);
    context.insert(
        "resend_cooldown",
        &verification.resend_cooldown_remaining(Utc::now().naive_utc()),
    );

    render_template(&tera, "register/verify.html", &context)
}

#[post("/register/verify")]
pub async fn verify_code(
    session: Session,
    web::Form(form): web::Form<VerifyCodeForm>,
) -> impl Responder {
    let Some(mut verification) = load_verification(&session) else {
        return redirect("/register");
    };

    match register_service::verify_code(&mut verification, &form.code) {
        Ok(()) => {
            // Brief pause before leaving the flow, like the original
            // confirmation screen.
            sleep(Duration::from_millis(COMPLETION_DELAY_MS)).await;
            session.remove(VERIFICATION_KEY);
            FlashMessage::success("Welcome aboard! Your account is ready.").send();
            redirect("/dashboard")
        }
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            redirect("/register/verify")
        }
    }
}

#[post("/register/verify/resend")]
pub async fn resend_code(session: Session) -> impl Responder {
    let Some(mut verification) = load_verification(&session) else {
        return redirect("/register");
    };

    match register_service::resend_code(&mut verification, Utc::now().naive_utc()) {
        Ok(()) => {
            if !store_verification(&session, &verification) {
                return HttpResponse::InternalServerError().finish();
            }
            FlashMessage::success("A new verification code is on its way.").send();
        }
        Err(err) => {
            FlashMessage::warning(err.to_string()).send();
        }
    }
    redirect("/register/verify")
}
