//! Read-only JSON listings mirroring the dashboard pages.

use actix_web::{HttpResponse, Responder, get, web};
use chrono::Local;
use serde::Deserialize;

use crate::dto::ListQuery;
use crate::dto::api::{ApiError, ApiPage};
use crate::dto::eventos::EventosQuery;
use crate::models::config::ServerConfig;
use crate::navigation::search_navigation;
use crate::repository::DieselRepository;
use crate::routes::api_error;
use crate::services::{
    convenios as convenios_service, descuentos as descuentos_service,
    empresas as empresas_service, eventos as eventos_service, pasajeros as pasajeros_service,
};

#[get("/v1/empresas")]
pub async fn api_v1_empresas(
    params: web::Query<ListQuery>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match empresas_service::list_empresas(repo.get_ref(), &params, server_config.items_per_page)
    {
        Ok(data) => HttpResponse::Ok().json(ApiPage::from(data.empresas)),
        Err(err) => api_error(err),
    }
}

#[get("/v1/convenios")]
pub async fn api_v1_convenios(
    params: web::Query<ListQuery>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match convenios_service::page_convenios(repo.get_ref(), &params, server_config.items_per_page)
    {
        Ok(page) => HttpResponse::Ok().json(ApiPage::from(page)),
        Err(err) => api_error(err),
    }
}

#[derive(Deserialize)]
struct CodigosParams {
    convenio_id: Option<i32>,
    search: Option<String>,
    page: Option<i64>,
    limit: Option<usize>,
}

#[get("/v1/codigos-descuento")]
pub async fn api_v1_codigos(
    params: web::Query<CodigosParams>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let params = params.into_inner();
    let Some(convenio_id) = params.convenio_id else {
        return HttpResponse::BadRequest().json(ApiError::new("convenio_id is required"));
    };
    let query = ListQuery {
        search: params.search,
        page: params.page,
        limit: params.limit,
    };

    match convenios_service::page_codigos(
        repo.get_ref(),
        convenio_id,
        &query,
        server_config.items_per_page,
        Local::now().date_naive(),
    ) {
        Ok(page) => HttpResponse::Ok().json(ApiPage::from(page)),
        Err(err) => api_error(err),
    }
}

#[get("/v1/descuentos")]
pub async fn api_v1_descuentos(
    params: web::Query<ListQuery>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match descuentos_service::list_descuentos(
        repo.get_ref(),
        &params,
        server_config.items_per_page,
    ) {
        Ok(data) => HttpResponse::Ok().json(ApiPage::from(data.descuentos)),
        Err(err) => api_error(err),
    }
}

#[get("/v1/pasajeros")]
pub async fn api_v1_pasajeros(
    params: web::Query<ListQuery>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match pasajeros_service::list_pasajeros(repo.get_ref(), &params, server_config.items_per_page)
    {
        Ok(data) => HttpResponse::Ok().json(ApiPage::from(data.pasajeros)),
        Err(err) => api_error(err),
    }
}

#[get("/v1/eventos")]
pub async fn api_v1_eventos(
    params: web::Query<EventosQuery>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match eventos_service::page_eventos(repo.get_ref(), &params, server_config.items_per_page) {
        Ok(page) => HttpResponse::Ok().json(ApiPage::from(page)),
        Err(err) => api_error(err),
    }
}

#[derive(Deserialize)]
struct NavigationParams {
    q: Option<String>,
}

#[get("/v1/navigation")]
pub async fn api_v1_navigation(params: web::Query<NavigationParams>) -> impl Responder {
    HttpResponse::Ok().json(search_navigation(params.q.as_deref().unwrap_or("")))
}
