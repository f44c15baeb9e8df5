use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::dto::ListQuery;
use crate::middleware::SessionUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, csv_attachment, flash_service_error, redirect, render_template};
use crate::services::ServiceError;
use crate::services::{descuentos as descuentos_service, export};

const DESCUENTOS_PATH: &str = "/dashboard/descuentos";

#[get("/dashboard/descuentos")]
pub async fn show_descuentos(
    params: web::Query<ListQuery>,
    user: SessionUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match descuentos_service::list_descuentos(
        repo.get_ref(),
        &params,
        server_config.items_per_page,
    ) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user.0), "descuentos");
            context.insert("descuentos", &data.descuentos);
            context.insert("search", &data.search);
            render_template(&tera, "descuentos/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list descuentos: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/dashboard/descuentos/{descuento_id}/modal")]
pub async fn descuento_modal(
    descuento_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match descuentos_service::get_descuento(repo.get_ref(), descuento_id.into_inner()) {
        Ok(details) => {
            let mut context = Context::new();
            context.insert("details", &details);
            render_template(&tera, "descuentos/modal_body.html", &context)
        }
        Err(ServiceError::NotFound | ServiceError::TypeConstraint(_)) => {
            HttpResponse::NotFound().finish()
        }
        Err(err) => {
            log::error!("Failed to load descuento: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/dashboard/descuentos/{descuento_id}/status")]
pub async fn toggle_descuento(
    descuento_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match descuentos_service::toggle_descuento_status(repo.get_ref(), descuento_id.into_inner()) {
        Ok(descuento) => {
            FlashMessage::success(format!(
                "Descuento #{} ahora está {}.",
                descuento.id,
                descuento.status.as_str().to_lowercase()
            ))
            .send();
        }
        Err(err) => flash_service_error(err, "toggle descuento status"),
    }
    redirect(DESCUENTOS_PATH)
}

#[get("/dashboard/descuentos/export.csv")]
pub async fn export_descuentos(
    params: web::Query<ListQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match export::export_descuentos(repo.get_ref(), params.search.as_deref()) {
        Ok(file) => csv_attachment(&file.filename, file.body),
        Err(err) => {
            flash_service_error(err, "export descuentos");
            redirect(DESCUENTOS_PATH)
        }
    }
}
