use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::convenio::{
    ConsultationType, Convenio as DomainConvenio, NewConvenio as DomainNewConvenio,
};
use crate::domain::types::{ConvenioId, ConvenioNombre, EmpresaId, TypeConstraintError};
use crate::models::empresa::Empresa;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Empresa, foreign_key = empresa_id))]
#[diesel(table_name = crate::schema::convenios)]
/// Diesel model for [`crate::domain::convenio::Convenio`].
pub struct Convenio {
    pub id: i32,
    pub empresa_id: i32,
    pub nombre: String,
    pub tipo_consulta: String,
    pub tope_monto_ventas: Option<i64>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::convenios)]
pub struct NewConvenio<'a> {
    pub empresa_id: i32,
    pub nombre: &'a str,
    pub tipo_consulta: &'a str,
    pub tope_monto_ventas: Option<i64>,
    pub status: &'a str,
}

impl TryFrom<Convenio> for DomainConvenio {
    type Error = TypeConstraintError;

    fn try_from(convenio: Convenio) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ConvenioId::new(convenio.id)?,
            empresa_id: EmpresaId::new(convenio.empresa_id)?,
            nombre: ConvenioNombre::new(convenio.nombre)?,
            tipo_consulta: ConsultationType::from(convenio.tipo_consulta),
            tope_monto_ventas: convenio.tope_monto_ventas,
            status: convenio.status.parse()?,
            created_at: convenio.created_at,
            updated_at: convenio.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewConvenio> for NewConvenio<'a> {
    fn from(convenio: &'a DomainNewConvenio) -> Self {
        Self {
            empresa_id: convenio.empresa_id.get(),
            nombre: convenio.nombre.as_str(),
            tipo_consulta: convenio.tipo_consulta.as_str(),
            tope_monto_ventas: convenio.tope_monto_ventas,
            status: convenio.status.as_str(),
        }
    }
}
