use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::descuento::{Descuento as DomainDescuento, NewDescuento as DomainNewDescuento};
use crate::domain::types::{
    CodigoDescuentoId, ConvenioId, DescuentoId, EventoId, PasajeroId, Percentage,
    TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::descuentos)]
pub struct Descuento {
    pub id: i32,
    pub pasajero_id: i32,
    pub convenio_id: i32,
    pub codigo_descuento_id: Option<i32>,
    pub tipo_pasajero: String,
    pub porcentaje: i32,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub status: String,
    pub evento_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::descuentos)]
pub struct NewDescuento<'a> {
    pub pasajero_id: i32,
    pub convenio_id: i32,
    pub codigo_descuento_id: Option<i32>,
    pub tipo_pasajero: &'a str,
    pub porcentaje: i32,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub status: &'a str,
    pub evento_id: Option<i32>,
}

impl TryFrom<Descuento> for DomainDescuento {
    type Error = TypeConstraintError;

    fn try_from(descuento: Descuento) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DescuentoId::new(descuento.id)?,
            pasajero_id: PasajeroId::new(descuento.pasajero_id)?,
            convenio_id: ConvenioId::new(descuento.convenio_id)?,
            codigo_descuento_id: descuento
                .codigo_descuento_id
                .map(CodigoDescuentoId::new)
                .transpose()?,
            tipo_pasajero: descuento.tipo_pasajero.parse()?,
            porcentaje: Percentage::new(descuento.porcentaje)?,
            fecha_inicio: descuento.fecha_inicio,
            fecha_fin: descuento.fecha_fin,
            status: descuento.status.parse()?,
            evento_id: descuento.evento_id.map(EventoId::new).transpose()?,
            created_at: descuento.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewDescuento> for NewDescuento<'a> {
    fn from(descuento: &'a DomainNewDescuento) -> Self {
        Self {
            pasajero_id: descuento.pasajero_id.get(),
            convenio_id: descuento.convenio_id.get(),
            codigo_descuento_id: descuento.codigo_descuento_id.map(CodigoDescuentoId::get),
            tipo_pasajero: descuento.tipo_pasajero.as_str(),
            porcentaje: descuento.porcentaje.get(),
            fecha_inicio: descuento.fecha_inicio,
            fecha_fin: descuento.fecha_fin,
            status: descuento.status.as_str(),
            evento_id: descuento.evento_id.map(EventoId::get),
        }
    }
}
