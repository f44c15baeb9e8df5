use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::evento::{Evento as DomainEvento, NewEvento as DomainNewEvento};
use crate::domain::types::{
    CityName, ConvenioId, EmpresaId, EventoId, PasajeroId, Percentage, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::eventos)]
pub struct Evento {
    pub id: i32,
    pub tipo_evento: String,
    pub ciudad_origen: String,
    pub ciudad_destino: String,
    pub fecha_viaje: NaiveDateTime,
    pub tarifa_base: i64,
    pub monto_pagado: i64,
    pub porcentaje_descuento_aplicado: i32,
    pub pasajero_id: i32,
    pub empresa_id: i32,
    pub convenio_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::eventos)]
pub struct NewEvento<'a> {
    pub tipo_evento: &'a str,
    pub ciudad_origen: &'a str,
    pub ciudad_destino: &'a str,
    pub fecha_viaje: NaiveDateTime,
    pub tarifa_base: i64,
    pub monto_pagado: i64,
    pub porcentaje_descuento_aplicado: i32,
    pub pasajero_id: i32,
    pub empresa_id: i32,
    pub convenio_id: Option<i32>,
}

impl TryFrom<Evento> for DomainEvento {
    type Error = TypeConstraintError;

    fn try_from(evento: Evento) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EventoId::new(evento.id)?,
            tipo_evento: evento.tipo_evento.parse()?,
            ciudad_origen: CityName::new(evento.ciudad_origen)?,
            ciudad_destino: CityName::new(evento.ciudad_destino)?,
            fecha_viaje: evento.fecha_viaje,
            tarifa_base: evento.tarifa_base,
            monto_pagado: evento.monto_pagado,
            porcentaje_descuento_aplicado: Percentage::new(evento.porcentaje_descuento_aplicado)?,
            pasajero_id: PasajeroId::new(evento.pasajero_id)?,
            empresa_id: EmpresaId::new(evento.empresa_id)?,
            convenio_id: evento.convenio_id.map(ConvenioId::new).transpose()?,
            created_at: evento.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewEvento> for NewEvento<'a> {
    fn from(evento: &'a DomainNewEvento) -> Self {
        Self {
            tipo_evento: evento.tipo_evento.as_str(),
            ciudad_origen: evento.ciudad_origen.as_str(),
            ciudad_destino: evento.ciudad_destino.as_str(),
            fecha_viaje: evento.fecha_viaje,
            tarifa_base: evento.tarifa_base,
            monto_pagado: evento.monto_pagado,
            porcentaje_descuento_aplicado: evento.porcentaje_descuento_aplicado.get(),
            pasajero_id: evento.pasajero_id.get(),
            empresa_id: evento.empresa_id.get(),
            convenio_id: evento.convenio_id.map(ConvenioId::get),
        }
    }
}
