//! Back-office dashboard for corporate agreements, discount codes and the
//! passengers and ticketing events tied to them.

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::middleware::{Compress, Logger};
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::middleware::{RequireSessionToken, SessionGate};
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::token::TokenExpiryGate;

pub mod db;
pub mod domain;
mod error_conversions;
pub mod list_query;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod formatting;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod navigation;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod token;

/// Builds the Tera environment with the dashboard's custom filters.
#[cfg(feature = "server")]
pub fn build_templates(templates_dir: &str) -> Result<Tera, tera::Error> {
    let mut tera = Tera::new(templates_dir)?;
    formatting::register_filters(&mut tera);
    Ok(tera)
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    use crate::routes::api::{
        api_v1_codigos, api_v1_convenios, api_v1_descuentos, api_v1_empresas, api_v1_eventos,
        api_v1_navigation, api_v1_pasajeros,
    };
    use crate::routes::convenios::{
        add_codigo, add_convenio, show_convenios, toggle_codigo, toggle_convenio,
    };
    use crate::routes::descuentos::{
        descuento_modal, export_descuentos, show_descuentos, toggle_descuento,
    };
    use crate::routes::empresas::{
        add_empresa, empresa_modal, export_empresas, save_empresa, show_empresas, toggle_empresa,
    };
    use crate::routes::eventos::{evento_modal, show_eventos};
    use crate::routes::main::{jump_to_section, landing, logout, show_dashboard};
    use crate::routes::pasajeros::{add_pasajero, export_pasajeros, show_pasajeros, toggle_pasajero};

    let pool = db::establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    let secret_key = Key::try_from(server_config.secret.as_bytes()).map_err(|e| {
        std::io::Error::other(format!("Flash message secret must be at least 64 bytes: {e}"))
    })?;
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = build_templates(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let gate = SessionGate::new(
        server_config.protected_prefix.clone(),
        server_config.token_cookie.clone(),
        TokenExpiryGate::new(server_config.missing_expiry_policy()),
    );

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting dashboard on {}:{} (protected prefix {})",
        bind_address.0,
        bind_address.1,
        server_config.protected_prefix
    );

    HttpServer::new(move || {
        App::new()
            .wrap(RequireSessionToken::new(gate.clone()))
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(landing)
            .service(logout)
            .service(
                web::scope("/dashboard/api")
                    .service(api_v1_empresas)
                    .service(api_v1_convenios)
                    .service(api_v1_codigos)
                    .service(api_v1_descuentos)
                    .service(api_v1_pasajeros)
                    .service(api_v1_eventos)
                    .service(api_v1_navigation),
            )
            .service(show_dashboard)
            .service(jump_to_section)
            .service(export_empresas)
            .service(show_empresas)
            .service(add_empresa)
            .service(empresa_modal)
            .service(save_empresa)
            .service(toggle_empresa)
            .service(show_convenios)
            .service(add_convenio)
            .service(toggle_convenio)
            .service(add_codigo)
            .service(toggle_codigo)
            .service(export_descuentos)
            .service(show_descuentos)
            .service(descuento_modal)
            .service(toggle_descuento)
            .service(export_pasajeros)
            .service(show_pasajeros)
            .service(add_pasajero)
            .service(toggle_pasajero)
            .service(show_eventos)
            .service(evento_modal)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(gate.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
