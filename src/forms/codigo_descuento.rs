use serde::{Deserialize, Serialize};

use crate::domain::codigo_descuento::NewCodigoDescuento;
use crate::domain::types::{ConvenioId, DiscountCode, MaxUses, TypeConstraintError};
use crate::forms::{FieldErrors, FormError, non_blank, parse_date};

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Form data for issuing a discount code under an agreement.
pub struct AddCodigoDescuentoForm {
    pub convenio_id: i32,
    pub codigo: String,
    pub fecha_inicio: String,
    pub fecha_termino: String,
    #[serde(default)]
    pub max_usos: Option<String>,
}

impl TryFrom<AddCodigoDescuentoForm> for NewCodigoDescuento {
    type Error = FormError;

    fn try_from(form: AddCodigoDescuentoForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();

        let convenio_id = errors.check(
            "convenio_id",
            ConvenioId::new(form.convenio_id),
            "Seleccione un convenio",
        );
        let codigo = errors.check(
            "codigo",
            DiscountCode::new(form.codigo),
            "El código debe tener entre 3 y 50 caracteres (A-Z, 0-9, _)",
        );
        let fecha_inicio = parse_date(
            &mut errors,
            "fecha_inicio",
            &form.fecha_inicio,
            "Fecha de inicio inválida",
        );
        let fecha_termino = parse_date(
            &mut errors,
            "fecha_termino",
            &form.fecha_termino,
            "Fecha de término inválida",
        );
        if matches!((fecha_inicio, fecha_termino), (Some(inicio), Some(termino)) if termino <= inicio) {
            errors.add(
                "fecha_termino",
                "La fecha de término debe ser posterior a la de inicio",
            );
        }

        let max_usos = match non_blank(&form.max_usos) {
            None => Some(MaxUses::default()),
            Some(raw) => {
                let parsed = raw
                    .parse::<i32>()
                    .map_err(|_| TypeConstraintError::MaxUsesOutOfRange)
                    .and_then(MaxUses::new);
                errors.check(
                    "max_usos",
                    parsed,
                    "Los usos máximos deben estar entre 1 y 9.999.999",
                )
            }
        };

        errors.finish()?;
        match (convenio_id, codigo, fecha_inicio, fecha_termino, max_usos) {
            (Some(convenio_id), Some(codigo), Some(inicio), Some(termino), Some(max_usos)) => Ok(
                NewCodigoDescuento::new(convenio_id, codigo, inicio, termino, max_usos),
            ),
            _ => Err(FormError::Fields(FieldErrors::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn form() -> AddCodigoDescuentoForm {
        AddCodigoDescuentoForm {
            convenio_id: 4,
            codigo: "verano_2025".into(),
            fecha_inicio: "2025-01-01".into(),
            fecha_termino: "2025-03-31".into(),
            max_usos: None,
        }
    }

    #[test]
    fn code_is_uppercased_and_uses_default_to_100() {
        let codigo = NewCodigoDescuento::try_from(form()).unwrap();
        assert_eq!(codigo.codigo.as_str(), "VERANO_2025");
        assert_eq!(codigo.max_usos.get(), 100);
        assert_eq!(
            codigo.fecha_termino,
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
        );
    }

    #[test]
    fn end_date_must_follow_start_date() {
        let mut same_day = form();
        same_day.fecha_termino = same_day.fecha_inicio.clone();
        let fields = NewCodigoDescuento::try_from(same_day)
            .unwrap_err()
            .into_field_errors();
        assert!(fields.contains("fecha_termino"));
    }

    #[test]
    fn out_of_range_values_are_reported_per_field() {
        let bad = AddCodigoDescuentoForm {
            convenio_id: 0,
            codigo: "a!".into(),
            fecha_inicio: "mañana".into(),
            fecha_termino: "2025-03-31".into(),
            max_usos: Some("10000000".into()),
        };
        let fields = NewCodigoDescuento::try_from(bad)
            .unwrap_err()
            .into_field_errors();
        for field in ["convenio_id", "codigo", "fecha_inicio", "max_usos"] {
            assert!(fields.contains(field), "missing error for {field}");
        }
    }
}
