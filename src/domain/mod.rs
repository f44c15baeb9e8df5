//! Domain aggregates exposed by the dashboard service layer.

pub mod codigo_descuento;
pub mod convenio;
pub mod descuento;
pub mod empresa;
pub mod evento;
pub mod pasajero;
pub mod types;
