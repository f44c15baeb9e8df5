//! Diesel models and their conversions to and from the domain layer.

pub mod codigo_descuento;
#[cfg(feature = "server")]
pub mod config;
pub mod convenio;
pub mod descuento;
pub mod empresa;
pub mod evento;
pub mod pasajero;
