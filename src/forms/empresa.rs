use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::empresa::{NewEmpresa, UpdateEmpresa};
use crate::domain::types::{EmpresaNombre, Rut};
use crate::forms::{FieldErrors, FormError};

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
/// Form data for registering or editing a company.
pub struct EmpresaForm {
    #[validate(length(max = 255, message = "El nombre es demasiado largo"))]
    pub nombre: String,
    pub rut: String,
}

/// Validated company attributes.
#[derive(Debug, Clone)]
pub struct EmpresaPayload {
    pub nombre: EmpresaNombre,
    pub rut: Rut,
}

impl TryFrom<EmpresaForm> for EmpresaPayload {
    type Error = FormError;

    fn try_from(form: EmpresaForm) -> Result<Self, Self::Error> {
        let mut errors = match form.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => FieldErrors::from(&err),
        };

        let nombre = errors.check(
            "nombre",
            EmpresaNombre::new(form.nombre),
            "El nombre es obligatorio",
        );
        let rut = errors.check("rut", Rut::new(&form.rut), "RUT inválido");

        errors.finish()?;
        match (nombre, rut) {
            (Some(nombre), Some(rut)) => Ok(Self { nombre, rut }),
            _ => Err(FormError::Fields(FieldErrors::new())),
        }
    }
}

impl EmpresaPayload {
    pub fn into_new(self) -> NewEmpresa {
        NewEmpresa::new(self.nombre, self.rut)
    }

    pub fn into_update(self) -> UpdateEmpresa {
        UpdateEmpresa {
            nombre: self.nombre,
            rut: self.rut,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_form_normalizes_rut() {
        let payload = EmpresaPayload::try_from(EmpresaForm {
            nombre: "  Transportes Andinos ".into(),
            rut: "76.086.428-5".into(),
        })
        .unwrap();

        assert_eq!(payload.nombre.as_str(), "Transportes Andinos");
        assert_eq!(payload.rut.as_str(), "76086428-5");
    }

    #[test]
    fn every_invalid_field_is_reported() {
        let err = EmpresaPayload::try_from(EmpresaForm {
            nombre: "   ".into(),
            rut: "76.086.428-0".into(),
        })
        .unwrap_err();

        let fields = err.into_field_errors();
        assert!(fields.contains("nombre"));
        assert_eq!(fields.get("rut"), Some("RUT inválido"));
    }
}
