use serde::{Deserialize, Serialize};

use crate::domain::convenio::{ConsultationType, NewConvenio};
use crate::domain::types::{ConvenioNombre, EmpresaId};
use crate::forms::{FieldErrors, FormError, non_blank, parse_amount};

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Form data for creating an agreement.
pub struct AddConvenioForm {
    pub empresa_id: i32,
    pub nombre: String,
    #[serde(default)]
    pub tipo_consulta: Option<String>,
    /// Optional sales cap; blank means no cap.
    #[serde(default)]
    pub tope_monto_ventas: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AddConvenioPayload {
    pub empresa_id: EmpresaId,
    pub nombre: ConvenioNombre,
    pub tipo_consulta: ConsultationType,
    pub tope_monto_ventas: Option<i64>,
}

impl TryFrom<AddConvenioForm> for AddConvenioPayload {
    type Error = FormError;

    fn try_from(form: AddConvenioForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();

        let empresa_id = errors.check(
            "empresa_id",
            EmpresaId::new(form.empresa_id),
            "Seleccione una empresa",
        );
        let nombre = errors.check(
            "nombre",
            ConvenioNombre::new(form.nombre),
            "El nombre es obligatorio",
        );
        let tipo_consulta = non_blank(&form.tipo_consulta)
            .map(ConsultationType::from)
            .unwrap_or(ConsultationType::CodigoDescuento);

        let tope_monto_ventas = match non_blank(&form.tope_monto_ventas) {
            None => None,
            Some(raw) => match parse_amount(raw) {
                Some(amount) => Some(amount),
                None => {
                    errors.add("tope_monto_ventas", "El tope debe ser un monto positivo");
                    None
                }
            },
        };

        errors.finish()?;
        match (empresa_id, nombre) {
            (Some(empresa_id), Some(nombre)) => Ok(Self {
                empresa_id,
                nombre,
                tipo_consulta,
                tope_monto_ventas,
            }),
            _ => Err(FormError::Fields(FieldErrors::new())),
        }
    }
}

impl AddConvenioPayload {
    pub fn into_domain(self) -> NewConvenio {
        NewConvenio::new(
            self.empresa_id,
            self.nombre,
            self.tipo_consulta,
            self.tope_monto_ventas,
        )
    }
}
