use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::dto::ListQuery;
use crate::forms::empresa::EmpresaForm;
use crate::middleware::SessionUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{
    FormRetry, base_context, csv_attachment, flash_service_error, redirect, render_template,
    render_template_with_status,
};
use crate::services::ServiceError;
use crate::services::{empresas as empresas_service, export};

const EMPRESAS_PATH: &str = "/dashboard/empresas";

const ADD_MODAL: &str = "addEmpresaModal";

/// Renders the companies page, reopening the creation modal when `retry`
/// carries a rejected submission.
fn empresas_page(
    repo: &DieselRepository,
    params: &ListQuery,
    user: &SessionUser,
    flash_messages: &IncomingFlashMessages,
    items_per_page: usize,
    tera: &Tera,
    retry: Option<FormRetry>,
) -> HttpResponse {
    match empresas_service::list_empresas(repo, params, items_per_page) {
        Ok(data) => {
            let mut context = base_context(flash_messages, Some(&user.0), "empresas");
            context.insert("empresas", &data.empresas);
            context.insert("search", &data.search);
            match retry {
                Some(retry) => {
                    retry.insert_into(&mut context);
                    render_template_with_status(
                        tera,
                        "empresas/index.html",
                        &context,
                        StatusCode::UNPROCESSABLE_ENTITY,
                    )
                }
                None => render_template(tera, "empresas/index.html", &context),
            }
        }
        Err(err) => {
            log::error!("Failed to list empresas: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/dashboard/empresas")]
pub async fn show_empresas(
    params: web::Query<ListQuery>,
    user: SessionUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    empresas_page(
        repo.get_ref(),
        &params,
        &user,
        &flash_messages,
        server_config.items_per_page,
        &tera,
        None,
    )
}

/// Invalid input reopens the modal with inline errors; other failures
/// redirect back with a flash alert.
#[post("/dashboard/empresas")]
pub async fn add_empresa(
    user: SessionUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<EmpresaForm>,
) -> HttpResponse {
    match empresas_service::create_empresa(repo.get_ref(), form.clone()) {
        Ok(empresa) => {
            FlashMessage::success(format!("Empresa «{}» creada.", empresa.nombre)).send();
        }
        Err(ServiceError::Validation(errors)) => {
            return empresas_page(
                repo.get_ref(),
                &ListQuery::default(),
                &user,
                &flash_messages,
                server_config.items_per_page,
                &tera,
                Some(FormRetry::new(ADD_MODAL, &form, errors)),
            );
        }
        Err(err) => flash_service_error(err, "create empresa"),
    }
    redirect(EMPRESAS_PATH)
}

/// Details and edit form, loaded into the page's modal.
#[get("/dashboard/empresas/{empresa_id}/modal")]
pub async fn empresa_modal(
    empresa_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match empresas_service::get_empresa(repo.get_ref(), empresa_id.into_inner()) {
        Ok(empresa) => {
            let mut context = Context::new();
            context.insert("empresa", &empresa);
            render_template(&tera, "empresas/modal_body.html", &context)
        }
        Err(ServiceError::NotFound | ServiceError::TypeConstraint(_)) => {
            HttpResponse::NotFound().finish()
        }
        Err(err) => {
            log::error!("Failed to load empresa: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/dashboard/empresas/{empresa_id}")]
pub async fn save_empresa(
    empresa_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EmpresaForm>,
) -> impl Responder {
    match empresas_service::update_empresa(repo.get_ref(), empresa_id.into_inner(), form) {
        Ok(empresa) => {
            FlashMessage::success(format!("Empresa «{}» actualizada.", empresa.nombre)).send();
        }
        Err(err) => flash_service_error(err, "update empresa"),
    }
    redirect(EMPRESAS_PATH)
}

#[post("/dashboard/empresas/{empresa_id}/status")]
pub async fn toggle_empresa(
    empresa_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match empresas_service::toggle_empresa_status(repo.get_ref(), empresa_id.into_inner()) {
        Ok(empresa) => {
            let verb = if empresa.status.is_active() {
                "activada"
            } else {
                "desactivada"
            };
            FlashMessage::success(format!("Empresa «{}» {verb}.", empresa.nombre)).send();
        }
        Err(err) => flash_service_error(err, "toggle empresa status"),
    }
    redirect(EMPRESAS_PATH)
}

#[get("/dashboard/empresas/export.csv")]
pub async fn export_empresas(
    params: web::Query<ListQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match export::export_empresas(repo.get_ref(), params.search.as_deref()) {
        Ok(file) => csv_attachment(&file.filename, file.body),
        Err(err) => {
            flash_service_error(err, "export empresas");
            redirect(EMPRESAS_PATH)
        }
    }
}
