use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::codigo_descuento::{
    CodigoDescuento as DomainCodigoDescuento, NewCodigoDescuento as DomainNewCodigoDescuento,
};
use crate::domain::types::{
    CodigoDescuentoId, ConvenioId, DiscountCode, MaxUses, TypeConstraintError,
};
use crate::models::convenio::Convenio;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Convenio, foreign_key = convenio_id))]
#[diesel(table_name = crate::schema::codigos_descuento)]
pub struct CodigoDescuento {
    pub id: i32,
    pub convenio_id: i32,
    pub codigo: String,
    pub fecha_inicio: NaiveDate,
    pub fecha_termino: NaiveDate,
    pub max_usos: i32,
    pub usos_realizados: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::codigos_descuento)]
pub struct NewCodigoDescuento<'a> {
    pub convenio_id: i32,
    pub codigo: &'a str,
    pub fecha_inicio: NaiveDate,
    pub fecha_termino: NaiveDate,
    pub max_usos: i32,
    pub status: &'a str,
}

impl TryFrom<CodigoDescuento> for DomainCodigoDescuento {
    type Error = TypeConstraintError;

    fn try_from(codigo: CodigoDescuento) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CodigoDescuentoId::new(codigo.id)?,
            convenio_id: ConvenioId::new(codigo.convenio_id)?,
            codigo: DiscountCode::new(codigo.codigo)?,
            fecha_inicio: codigo.fecha_inicio,
            fecha_termino: codigo.fecha_termino,
            max_usos: MaxUses::new(codigo.max_usos)?,
            usos_realizados: codigo.usos_realizados,
            status: codigo.status.parse()?,
            created_at: codigo.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewCodigoDescuento> for NewCodigoDescuento<'a> {
    fn from(codigo: &'a DomainNewCodigoDescuento) -> Self {
        Self {
            convenio_id: codigo.convenio_id.get(),
            codigo: codigo.codigo.as_str(),
            fecha_inicio: codigo.fecha_inicio,
            fecha_termino: codigo.fecha_termino,
            max_usos: codigo.max_usos.get(),
            status: codigo.status.as_str(),
        }
    }
}
