use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::empresa::{
    Empresa as DomainEmpresa, NewEmpresa as DomainNewEmpresa, UpdateEmpresa as DomainUpdateEmpresa,
};
use crate::domain::types::{EmpresaId, EmpresaNombre, Rut, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::empresas)]
/// Diesel model for [`crate::domain::empresa::Empresa`].
pub struct Empresa {
    pub id: i32,
    pub nombre: String,
    pub rut: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::empresas)]
/// Insertable form of [`Empresa`].
pub struct NewEmpresa<'a> {
    pub nombre: &'a str,
    pub rut: &'a str,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::empresas)]
pub struct UpdateEmpresa<'a> {
    pub nombre: &'a str,
    pub rut: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Empresa> for DomainEmpresa {
    type Error = TypeConstraintError;

    fn try_from(empresa: Empresa) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EmpresaId::new(empresa.id)?,
            nombre: EmpresaNombre::new(empresa.nombre)?,
            rut: Rut::new(&empresa.rut)?,
            status: empresa.status.parse()?,
            created_at: empresa.created_at,
            updated_at: empresa.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewEmpresa> for NewEmpresa<'a> {
    fn from(empresa: &'a DomainNewEmpresa) -> Self {
        Self {
            nombre: empresa.nombre.as_str(),
            rut: empresa.rut.as_str(),
            status: empresa.status.as_str(),
        }
    }
}

impl<'a> UpdateEmpresa<'a> {
    pub fn new(update: &'a DomainUpdateEmpresa, updated_at: NaiveDateTime) -> Self {
        Self {
            nombre: update.nombre.as_str(),
            rut: update.rut.as_str(),
            updated_at,
        }
    }
}
