use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CityName, ConvenioId, EmpresaId, EventoId, PasajeroId, Percentage, TypeConstraintError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Compra,
    Cambio,
    Devolucion,
}

impl EventType {
    pub const ALL: [EventType; 3] = [EventType::Compra, EventType::Cambio, EventType::Devolucion];

    pub const fn as_str(self) -> &'static str {
        match self {
            EventType::Compra => "COMPRA",
            EventType::Cambio => "CAMBIO",
            EventType::Devolucion => "DEVOLUCION",
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COMPRA" => Ok(EventType::Compra),
            "CAMBIO" => Ok(EventType::Cambio),
            "DEVOLUCION" => Ok(EventType::Devolucion),
            other => Err(TypeConstraintError::InvalidValue(format!("event type {other}"))),
        }
    }
}

/// Ticket purchase, change or refund recorded by the sales system.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Evento {
    pub id: EventoId,
    pub tipo_evento: EventType,
    pub ciudad_origen: CityName,
    pub ciudad_destino: CityName,
    pub fecha_viaje: NaiveDateTime,
    pub tarifa_base: i64,
    pub monto_pagado: i64,
    pub porcentaje_descuento_aplicado: Percentage,
    pub pasajero_id: PasajeroId,
    pub empresa_id: EmpresaId,
    pub convenio_id: Option<ConvenioId>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewEvento {
    pub tipo_evento: EventType,
    pub ciudad_origen: CityName,
    pub ciudad_destino: CityName,
    pub fecha_viaje: NaiveDateTime,
    pub tarifa_base: i64,
    pub monto_pagado: i64,
    pub porcentaje_descuento_aplicado: Percentage,
    pub pasajero_id: PasajeroId,
    pub empresa_id: EmpresaId,
    pub convenio_id: Option<ConvenioId>,
}
