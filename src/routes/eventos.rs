use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::domain::evento::EventType;
use crate::dto::eventos::EventosQuery;
use crate::middleware::SessionUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::ServiceError;
use crate::services::eventos as eventos_service;

#[get("/dashboard/eventos")]
pub async fn show_eventos(
    params: web::Query<EventosQuery>,
    user: SessionUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match eventos_service::list_eventos(
        repo.get_ref(),
        params.into_inner(),
        server_config.items_per_page,
    ) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user.0), "eventos");
            context.insert("eventos", &data.eventos);
            context.insert("filters", &data.filters);
            context.insert("empresas", &data.empresas);
            context.insert("event_types", &EventType::ALL);
            render_template(&tera, "eventos/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list eventos: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/dashboard/eventos/{evento_id}/modal")]
pub async fn evento_modal(
    evento_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match eventos_service::get_evento(repo.get_ref(), evento_id.into_inner()) {
        Ok(evento) => {
            let mut context = Context::new();
            context.insert("evento", &evento);
            render_template(&tera, "eventos/modal_body.html", &context)
        }
        Err(ServiceError::NotFound | ServiceError::TypeConstraint(_)) => {
            HttpResponse::NotFound().finish()
        }
        Err(err) => {
            log::error!("Failed to load evento: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
