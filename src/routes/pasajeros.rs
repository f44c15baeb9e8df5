use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::pasajero::PassengerType;
use crate::dto::ListQuery;
use crate::forms::pasajero::AddPasajeroForm;
use crate::middleware::SessionUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{
    FormRetry, base_context, csv_attachment, flash_service_error, redirect, render_template,
    render_template_with_status,
};
use crate::services::{ServiceError, export, pasajeros as pasajeros_service};

const PASAJEROS_PATH: &str = "/dashboard/pasajeros";

const ADD_MODAL: &str = "addPasajeroModal";

fn pasajeros_page(
    repo: &DieselRepository,
    params: &ListQuery,
    user: &SessionUser,
    flash_messages: &IncomingFlashMessages,
    items_per_page: usize,
    tera: &Tera,
    retry: Option<FormRetry>,
) -> HttpResponse {
    match pasajeros_service::list_pasajeros(repo, params, items_per_page) {
        Ok(data) => {
            let passenger_types = PassengerType::ALL
                .iter()
                .map(|tipo| (tipo.as_str(), tipo.label()))
                .collect::<Vec<_>>();

            let mut context = base_context(flash_messages, Some(&user.0), "pasajeros");
            context.insert("pasajeros", &data.pasajeros);
            context.insert("search", &data.search);
            context.insert("empresas", &data.empresas);
            context.insert("passenger_types", &passenger_types);
            match retry {
                Some(retry) => {
                    retry.insert_into(&mut context);
                    render_template_with_status(
                        tera,
                        "pasajeros/index.html",
                        &context,
                        StatusCode::UNPROCESSABLE_ENTITY,
                    )
                }
                None => render_template(tera, "pasajeros/index.html", &context),
            }
        }
        Err(err) => {
            log::error!("Failed to list pasajeros: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/dashboard/pasajeros")]
pub async fn show_pasajeros(
    params: web::Query<ListQuery>,
    user: SessionUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    pasajeros_page(
        repo.get_ref(),
        &params,
        &user,
        &flash_messages,
        server_config.items_per_page,
        &tera,
        None,
    )
}

#[post("/dashboard/pasajeros")]
pub async fn add_pasajero(
    user: SessionUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<AddPasajeroForm>,
) -> HttpResponse {
    match pasajeros_service::create_pasajero(repo.get_ref(), form.clone()) {
        Ok(pasajero) => {
            FlashMessage::success(format!("Pasajero {} registrado.", pasajero.full_name())).send();
        }
        Err(ServiceError::Validation(errors)) => {
            return pasajeros_page(
                repo.get_ref(),
                &ListQuery::default(),
                &user,
                &flash_messages,
                server_config.items_per_page,
                &tera,
                Some(FormRetry::new(ADD_MODAL, &form, errors)),
            );
        }
        Err(err) => flash_service_error(err, "create pasajero"),
    }
    redirect(PASAJEROS_PATH)
}

#[post("/dashboard/pasajeros/{pasajero_id}/status")]
pub async fn toggle_pasajero(
    pasajero_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match pasajeros_service::toggle_pasajero_status(repo.get_ref(), pasajero_id.into_inner()) {
        Ok(pasajero) => {
            let verb = if pasajero.status.is_active() {
                "activado"
            } else {
                "desactivado"
            };
            FlashMessage::success(format!("Pasajero {} {verb}.", pasajero.full_name())).send();
        }
        Err(err) => flash_service_error(err, "toggle pasajero status"),
    }
    redirect(PASAJEROS_PATH)
}

#[get("/dashboard/pasajeros/export.csv")]
pub async fn export_pasajeros(
    params: web::Query<ListQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match export::export_pasajeros(repo.get_ref(), params.search.as_deref()) {
        Ok(file) => csv_attachment(&file.filename, file.body),
        Err(err) => {
            flash_service_error(err, "export pasajeros");
            redirect(PASAJEROS_PATH)
        }
    }
}
