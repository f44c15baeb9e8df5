use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::pasajero::{NewPasajero as DomainNewPasajero, Pasajero as DomainPasajero};
use crate::domain::types::{
    ConvenioId, Email, EmpresaId, PasajeroId, PersonName, PhoneNumber, Rut, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::pasajeros)]
pub struct Pasajero {
    pub id: i32,
    pub rut: String,
    pub nombres: String,
    pub apellidos: String,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub tipo_pasajero: String,
    pub empresa_id: Option<i32>,
    pub convenio_id: Option<i32>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::pasajeros)]
pub struct NewPasajero<'a> {
    pub rut: &'a str,
    pub nombres: &'a str,
    pub apellidos: &'a str,
    pub correo: Option<&'a str>,
    pub telefono: Option<&'a str>,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub tipo_pasajero: &'a str,
    pub empresa_id: Option<i32>,
    pub convenio_id: Option<i32>,
    pub status: &'a str,
}

impl TryFrom<Pasajero> for DomainPasajero {
    type Error = TypeConstraintError;

    fn try_from(pasajero: Pasajero) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PasajeroId::new(pasajero.id)?,
            rut: Rut::new(&pasajero.rut)?,
            nombres: PersonName::new(pasajero.nombres)?,
            apellidos: PersonName::new(pasajero.apellidos)?,
            correo: pasajero.correo.map(Email::new).transpose()?,
            telefono: pasajero.telefono.map(PhoneNumber::new).transpose()?,
            fecha_nacimiento: pasajero.fecha_nacimiento,
            tipo_pasajero: pasajero.tipo_pasajero.parse()?,
            empresa_id: pasajero.empresa_id.map(EmpresaId::new).transpose()?,
            convenio_id: pasajero.convenio_id.map(ConvenioId::new).transpose()?,
            status: pasajero.status.parse()?,
            created_at: pasajero.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewPasajero> for NewPasajero<'a> {
    fn from(pasajero: &'a DomainNewPasajero) -> Self {
        Self {
            rut: pasajero.rut.as_str(),
            nombres: pasajero.nombres.as_str(),
            apellidos: pasajero.apellidos.as_str(),
            correo: pasajero.correo.as_ref().map(Email::as_str),
            telefono: pasajero.telefono.as_ref().map(PhoneNumber::as_str),
            fecha_nacimiento: pasajero.fecha_nacimiento,
            tipo_pasajero: pasajero.tipo_pasajero.as_str(),
            empresa_id: pasajero.empresa_id.map(EmpresaId::get),
            convenio_id: pasajero.convenio_id.map(ConvenioId::get),
            status: pasajero.status.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::pasajero::PassengerType;

    #[test]
    fn pasajero_into_domain_with_optional_fields() {
        let db = Pasajero {
            id: 9,
            rut: "12.345.678-5".into(),
            nombres: "Ana María".into(),
            apellidos: "Rojas".into(),
            correo: Some("ANA@correo.cl".into()),
            telefono: None,
            fecha_nacimiento: NaiveDate::from_ymd_opt(2001, 4, 12),
            tipo_pasajero: "ESTUDIANTE".into(),
            empresa_id: Some(1),
            convenio_id: None,
            status: "ACTIVO".into(),
            created_at: Utc::now().naive_utc(),
        };

        let domain = DomainPasajero::try_from(db).expect("valid pasajero");
        assert_eq!(domain.rut.as_str(), "12345678-5");
        assert_eq!(domain.correo.as_ref().map(Email::as_str), Some("ana@correo.cl"));
        assert_eq!(domain.tipo_pasajero, PassengerType::Estudiante);
        assert_eq!(domain.full_name(), "Ana María Rojas");
        assert!(domain.convenio_id.is_none());
    }
}
