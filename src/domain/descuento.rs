use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::pasajero::PassengerType;
use crate::domain::types::{
    CodigoDescuentoId, ConvenioId, DescuentoId, DiscountStatus, EventoId, PasajeroId, Percentage,
};

/// Discount granted to a passenger under an agreement.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Descuento {
    pub id: DescuentoId,
    pub pasajero_id: PasajeroId,
    pub convenio_id: ConvenioId,
    pub codigo_descuento_id: Option<CodigoDescuentoId>,
    pub tipo_pasajero: PassengerType,
    pub porcentaje: Percentage,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub status: DiscountStatus,
    /// Ticketing event where the discount was applied, if any.
    pub evento_id: Option<EventoId>,
    pub created_at: NaiveDateTime,
}

impl Descuento {
    pub fn is_applied(&self) -> bool {
        self.evento_id.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct NewDescuento {
    pub pasajero_id: PasajeroId,
    pub convenio_id: ConvenioId,
    pub codigo_descuento_id: Option<CodigoDescuentoId>,
    pub tipo_pasajero: PassengerType,
    pub porcentaje: Percentage,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub status: DiscountStatus,
    pub evento_id: Option<EventoId>,
}
