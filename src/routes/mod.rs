//! HTTP handlers and the helpers they share.

use actix_web::HttpResponse;
use actix_web::http::{StatusCode, header};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

use crate::dto::api::ApiError;
use crate::forms::FieldErrors;
use crate::navigation::NAVIGATION;
use crate::services::ServiceError;
use crate::token::SessionClaims;

pub mod api;
pub mod convenios;
pub mod descuentos;
pub mod empresas;
pub mod eventos;
pub mod main;
pub mod pasajeros;

/// Maps a flash message level to the Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// `303 See Other` to `location`, so the browser follows up with a GET.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_template_with_status(tera, template, context, StatusCode::OK)
}

pub fn render_template_with_status(
    tera: &Tera,
    template: &str,
    context: &Context,
    status: StatusCode,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context every full page starts from: alerts, the signed-in user and the
/// sidebar entries.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&SessionClaims>,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert("navigation", NAVIGATION);
    context.insert("form_modal", "");
    context.insert("form_errors", &FieldErrors::new());
    context.insert("form_values", &tera::Map::new());
    if let Some(user) = user {
        context.insert("current_user", user);
        context.insert("user_name", user.display_name());
    }
    context
}

/// A rejected creation form, shown again inside its modal with the values
/// the user typed and one message under each offending input.
#[derive(Debug, Clone)]
pub struct FormRetry {
    modal: &'static str,
    values: tera::Value,
    errors: FieldErrors,
}

impl FormRetry {
    pub fn new(modal: &'static str, values: &impl Serialize, errors: FieldErrors) -> Self {
        let values = tera::to_value(values).unwrap_or_else(|err| {
            log::warn!("Failed to keep submitted values for #{modal}: {err}");
            tera::Value::Null
        });
        Self {
            modal,
            values,
            errors,
        }
    }

    pub fn insert_into(&self, context: &mut Context) {
        context.insert("form_modal", self.modal);
        context.insert("form_errors", &self.errors);
        context.insert("form_values", &self.values);
    }
}

/// Human label for a form field, used when its message ends up in a flash
/// alert instead of next to the input.
pub fn field_label(field: &str) -> &str {
    match field {
        "nombre" => "Nombre",
        "rut" => "RUT",
        "empresa_id" => "Empresa",
        "convenio_id" => "Convenio",
        "tope_monto_ventas" => "Tope de ventas",
        "codigo" => "Código",
        "fecha_inicio" => "Fecha de inicio",
        "fecha_termino" => "Fecha de término",
        "max_usos" => "Máximo de usos",
        "nombres" => "Nombres",
        "apellidos" => "Apellidos",
        "correo" => "Correo",
        "telefono" => "Teléfono",
        "fecha_nacimiento" => "Fecha de nacimiento",
        "tipo_pasajero" => "Tipo de pasajero",
        other => other,
    }
}

/// Reports a failed form submission or action through flash messages.
///
/// Validation failures produce one message per field, prefixed with the
/// field's label. Storage failures are logged and shown as a generic,
/// retryable notice.
pub fn flash_service_error(err: ServiceError, action: &str) {
    match err {
        ServiceError::Validation(fields) => {
            for (field, message) in fields.iter() {
                FlashMessage::error(format!("{}: {message}", field_label(field))).send();
            }
        }
        ServiceError::Form(message) | ServiceError::Conflict(message) => {
            FlashMessage::error(message).send();
        }
        ServiceError::NotFound => {
            FlashMessage::error("El registro solicitado no existe.").send();
        }
        ServiceError::TypeConstraint(detail) => {
            log::warn!("Rejected request while trying to {action}: {detail}");
            FlashMessage::error("Identificador inválido.").send();
        }
        err @ (ServiceError::Repository(_) | ServiceError::Internal(_)) => {
            log::error!("Failed to {action}: {err}");
            FlashMessage::error("Ocurrió un error inesperado. Intente nuevamente.").send();
        }
    }
}

/// JSON error response for the listing API.
pub fn api_error(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(ApiError::new("Not found")),
        ServiceError::Validation(fields) => {
            HttpResponse::BadRequest().json(ApiError::new(fields.to_string()))
        }
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(ApiError::new(message))
        }
        ServiceError::Conflict(message) => HttpResponse::Conflict().json(ApiError::new(message)),
        err @ (ServiceError::Repository(_) | ServiceError::Internal(_)) => {
            log::error!("API request failed: {err}");
            HttpResponse::InternalServerError().json(ApiError::new("Internal server error"))
        }
    }
}

/// Sends `body` as a downloadable CSV file.
pub fn csv_attachment(filename: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(body)
}
