use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::middleware::{SessionGate, SessionUser};
use crate::navigation::first_match;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::dashboard::load_summary;

#[derive(Deserialize)]
struct LandingParams {
    session: Option<String>,
}

#[get("/")]
pub async fn landing(
    params: web::Query<LandingParams>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, None, "landing");
    context.insert(
        "session_expired",
        &(params.session.as_deref() == Some("expired")),
    );
    render_template(&tera, "index.html", &context)
}

/// Clears the session cookie and returns to the landing page.
#[post("/logout")]
pub async fn logout(gate: web::Data<SessionGate>) -> impl Responder {
    HttpResponse::SeeOther()
        .insert_header((actix_web::http::header::LOCATION, "/"))
        .cookie(gate.removal_cookie())
        .finish()
}

#[get("/dashboard")]
pub async fn show_dashboard(
    user: SessionUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_summary(repo.get_ref()) {
        Ok(counts) => {
            let mut context = base_context(&flash_messages, Some(&user.0), "dashboard");
            context.insert("counts", &counts);
            render_template(&tera, "dashboard/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load dashboard summary: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Deserialize)]
struct JumpParams {
    q: Option<String>,
}

/// Quick-jump box: goes straight to the first section matching `q`.
#[get("/dashboard/buscar")]
pub async fn jump_to_section(params: web::Query<JumpParams>) -> impl Responder {
    let term = params.q.as_deref().unwrap_or("");
    match first_match(term) {
        Some(item) => redirect(item.href),
        None => {
            FlashMessage::warning(format!("No hay secciones que coincidan con «{}».", term.trim()))
                .send();
            redirect("/dashboard")
        }
    }
}
