use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Local;
use tera::Tera;

use crate::dto::convenios::ConveniosQuery;
use crate::forms::codigo_descuento::AddCodigoDescuentoForm;
use crate::forms::convenio::AddConvenioForm;
use crate::middleware::SessionUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{
    FormRetry, base_context, flash_service_error, redirect, render_template,
    render_template_with_status,
};
use crate::services::{ServiceError, convenios as convenios_service};

const CONVENIOS_PATH: &str = "/dashboard/convenios";

fn selected_path(convenio_id: i32) -> String {
    format!("{CONVENIOS_PATH}?convenio_id={convenio_id}")
}

const ADD_CONVENIO_MODAL: &str = "addConvenioModal";
const ADD_CODIGO_MODAL: &str = "addCodigoModal";

/// Shared request state needed to draw the agreements page.
struct PageEnv<'a> {
    repo: &'a DieselRepository,
    user: &'a SessionUser,
    flash_messages: &'a IncomingFlashMessages,
    items_per_page: usize,
    tera: &'a Tera,
}

fn convenios_page(
    env: PageEnv<'_>,
    params: &ConveniosQuery,
    retry: Option<FormRetry>,
) -> HttpResponse {
    let today = Local::now().date_naive();

    match convenios_service::list_convenios(env.repo, params, env.items_per_page, today) {
        Ok(data) => {
            let mut context = base_context(env.flash_messages, Some(&env.user.0), "convenios");
            context.insert("convenios", &data.convenios);
            context.insert("search", &data.search);
            context.insert("empresas", &data.empresas);
            context.insert("selected", &data.selected);
            match retry {
                Some(retry) => {
                    retry.insert_into(&mut context);
                    render_template_with_status(
                        env.tera,
                        "convenios/index.html",
                        &context,
                        StatusCode::UNPROCESSABLE_ENTITY,
                    )
                }
                None => render_template(env.tera, "convenios/index.html", &context),
            }
        }
        Err(err) => {
            log::error!("Failed to list convenios: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/dashboard/convenios")]
pub async fn show_convenios(
    params: web::Query<ConveniosQuery>,
    user: SessionUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let env = PageEnv {
        repo: repo.get_ref(),
        user: &user,
        flash_messages: &flash_messages,
        items_per_page: server_config.items_per_page,
        tera: &tera,
    };
    convenios_page(env, &params, None)
}

#[post("/dashboard/convenios")]
pub async fn add_convenio(
    user: SessionUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<AddConvenioForm>,
) -> HttpResponse {
    match convenios_service::create_convenio(repo.get_ref(), form.clone()) {
        Ok(convenio) => {
            FlashMessage::success(format!("Convenio «{}» creado.", convenio.nombre)).send();
            redirect(&selected_path(convenio.id.get()))
        }
        Err(ServiceError::Validation(errors)) => {
            let env = PageEnv {
                repo: repo.get_ref(),
                user: &user,
                flash_messages: &flash_messages,
                items_per_page: server_config.items_per_page,
                tera: &tera,
            };
            let retry = FormRetry::new(ADD_CONVENIO_MODAL, &form, errors);
            convenios_page(env, &ConveniosQuery::default(), Some(retry))
        }
        Err(err) => {
            flash_service_error(err, "create convenio");
            redirect(CONVENIOS_PATH)
        }
    }
}

#[post("/dashboard/convenios/{convenio_id}/status")]
pub async fn toggle_convenio(
    convenio_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match convenios_service::toggle_convenio_status(repo.get_ref(), convenio_id.into_inner()) {
        Ok(convenio) => {
            let verb = if convenio.status.is_active() {
                "activado"
            } else {
                "desactivado"
            };
            FlashMessage::success(format!("Convenio «{}» {verb}.", convenio.nombre)).send();
        }
        Err(err) => flash_service_error(err, "toggle convenio status"),
    }
    redirect(CONVENIOS_PATH)
}

/// Issues a discount code; the agreement comes from the path.
#[post("/dashboard/convenios/{convenio_id}/codigos")]
pub async fn add_codigo(
    convenio_id: web::Path<i32>,
    user: SessionUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(mut form): web::Form<AddCodigoDescuentoForm>,
) -> HttpResponse {
    let convenio_id = convenio_id.into_inner();
    form.convenio_id = convenio_id;

    match convenios_service::create_codigo(repo.get_ref(), form.clone()) {
        Ok(codigo) => {
            FlashMessage::success(format!("Código {} creado.", codigo.codigo)).send();
        }
        Err(ServiceError::Validation(errors)) if !errors.contains("convenio_id") => {
            let env = PageEnv {
                repo: repo.get_ref(),
                user: &user,
                flash_messages: &flash_messages,
                items_per_page: server_config.items_per_page,
                tera: &tera,
            };
            let params = ConveniosQuery {
                convenio_id: Some(convenio_id),
                ..ConveniosQuery::default()
            };
            let retry = FormRetry::new(ADD_CODIGO_MODAL, &form, errors);
            return convenios_page(env, &params, Some(retry));
        }
        Err(err) => flash_service_error(err, "create codigo de descuento"),
    }
    redirect(&selected_path(convenio_id))
}

#[post("/dashboard/codigos/{codigo_id}/status")]
pub async fn toggle_codigo(
    codigo_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match convenios_service::toggle_codigo_status(repo.get_ref(), codigo_id.into_inner()) {
        Ok(codigo) => {
            let verb = if codigo.status.is_active() {
                "activado"
            } else {
                "desactivado"
            };
            FlashMessage::success(format!("Código {} {verb}.", codigo.codigo)).send();
            redirect(&selected_path(codigo.convenio_id.get()))
        }
        Err(err) => {
            flash_service_error(err, "toggle codigo status");
            redirect(CONVENIOS_PATH)
        }
    }
}
