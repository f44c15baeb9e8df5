use serde::{Deserialize, Serialize};

use crate::domain::pasajero::{NewPasajero, PassengerType};
use crate::domain::types::{
    Email, EmpresaId, PersonName, PhoneNumber, Rut, Status, TypeConstraintError,
};
use crate::forms::{FieldErrors, FormError, non_blank, parse_date};

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Form data for registering a passenger.
pub struct AddPasajeroForm {
    pub rut: String,
    pub nombres: String,
    pub apellidos: String,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub fecha_nacimiento: Option<String>,
    #[serde(default)]
    pub tipo_pasajero: Option<String>,
    /// Selected company id; blank when the passenger has none.
    #[serde(default)]
    pub empresa_id: Option<String>,
}

impl TryFrom<AddPasajeroForm> for NewPasajero {
    type Error = FormError;

    fn try_from(form: AddPasajeroForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();

        let rut = errors.check("rut", Rut::new(&form.rut), "RUT inválido");
        let nombres = errors.check(
            "nombres",
            PersonName::new(form.nombres),
            "Los nombres son obligatorios",
        );
        let apellidos = errors.check(
            "apellidos",
            PersonName::new(form.apellidos),
            "Los apellidos son obligatorios",
        );

        let correo = non_blank(&form.correo)
            .and_then(|correo| errors.check("correo", Email::new(correo), "Correo inválido"));
        let telefono = non_blank(&form.telefono).and_then(|telefono| {
            errors.check(
                "telefono",
                PhoneNumber::new(telefono),
                "Teléfono inválido",
            )
        });
        let fecha_nacimiento = non_blank(&form.fecha_nacimiento).and_then(|fecha| {
            parse_date(
                &mut errors,
                "fecha_nacimiento",
                fecha,
                "Fecha de nacimiento inválida",
            )
        });
        let tipo_pasajero = match non_blank(&form.tipo_pasajero) {
            None => PassengerType::default(),
            Some(raw) => errors
                .check("tipo_pasajero", raw.parse(), "Tipo de pasajero inválido")
                .unwrap_or_default(),
        };
        let empresa_id = non_blank(&form.empresa_id).and_then(|raw| {
            let parsed = raw
                .parse::<i32>()
                .map_err(|_| TypeConstraintError::NonPositiveId)
                .and_then(EmpresaId::new);
            errors.check("empresa_id", parsed, "Empresa inválida")
        });

        errors.finish()?;
        match (rut, nombres, apellidos) {
            (Some(rut), Some(nombres), Some(apellidos)) => Ok(NewPasajero {
                rut,
                nombres,
                apellidos,
                correo,
                telefono,
                fecha_nacimiento,
                tipo_pasajero,
                empresa_id,
                convenio_id: None,
                status: Status::Activo,
            }),
            _ => Err(FormError::Fields(FieldErrors::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AddPasajeroForm {
        AddPasajeroForm {
            rut: "12.345.678-5".into(),
            nombres: "María José".into(),
            apellidos: "González Pérez".into(),
            correo: Some("".into()),
            telefono: None,
            fecha_nacimiento: Some("1990-04-12".into()),
            tipo_pasajero: Some("ESTUDIANTE".into()),
            empresa_id: Some("".into()),
        }
    }

    #[test]
    fn blank_optional_fields_are_absent() {
        let pasajero = NewPasajero::try_from(form()).unwrap();
        assert_eq!(pasajero.rut.as_str(), "12345678-5");
        assert!(pasajero.correo.is_none());
        assert!(pasajero.empresa_id.is_none());
        assert_eq!(pasajero.tipo_pasajero, PassengerType::Estudiante);
        assert_eq!(pasajero.status, Status::Activo);
    }

    #[test]
    fn optional_fields_are_validated_when_present() {
        let mut bad = form();
        bad.correo = Some("no-es-correo".into());
        bad.telefono = Some("abc".into());
        bad.empresa_id = Some("-3".into());
        let fields = NewPasajero::try_from(bad).unwrap_err().into_field_errors();
        assert!(fields.contains("correo"));
        assert!(fields.contains("telefono"));
        assert!(fields.contains("empresa_id"));
        assert!(!fields.contains("rut"));
    }
}
