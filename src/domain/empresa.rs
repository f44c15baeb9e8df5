use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{EmpresaId, EmpresaNombre, Rut, Status, TypeConstraintError};

/// Company that signs agreements for its passengers.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Empresa {
    pub id: EmpresaId,
    pub nombre: EmpresaNombre,
    pub rut: Rut,
    pub status: Status,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewEmpresa {
    pub nombre: EmpresaNombre,
    pub rut: Rut,
    pub status: Status,
}

impl NewEmpresa {
    /// New companies start out active.
    #[must_use]
    pub fn new(nombre: EmpresaNombre, rut: Rut) -> Self {
        Self {
            nombre,
            rut,
            status: Status::Activo,
        }
    }

    /// Validates raw strings before building the payload.
    pub fn try_new(nombre: &str, rut: &str) -> Result<Self, TypeConstraintError> {
        Ok(Self::new(EmpresaNombre::new(nombre)?, Rut::new(rut)?))
    }
}

/// Editable attributes of an existing company.
#[derive(Clone, Debug)]
pub struct UpdateEmpresa {
    pub nombre: EmpresaNombre,
    pub rut: Rut,
}
