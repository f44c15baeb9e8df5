use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ConvenioId, Email, EmpresaId, PasajeroId, PersonName, PhoneNumber, Rut, Status,
    TypeConstraintError,
};

/// Fare category of a passenger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassengerType {
    Estudiante,
    #[default]
    Adulto,
    AdultoMayor,
}

impl PassengerType {
    pub const ALL: [PassengerType; 3] = [
        PassengerType::Estudiante,
        PassengerType::Adulto,
        PassengerType::AdultoMayor,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PassengerType::Estudiante => "ESTUDIANTE",
            PassengerType::Adulto => "ADULTO",
            PassengerType::AdultoMayor => "ADULTO_MAYOR",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PassengerType::Estudiante => "Estudiante",
            PassengerType::Adulto => "Adulto",
            PassengerType::AdultoMayor => "Adulto Mayor",
        }
    }
}

impl Display for PassengerType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PassengerType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace(' ', "_").as_str() {
            "ESTUDIANTE" => Ok(PassengerType::Estudiante),
            "ADULTO" => Ok(PassengerType::Adulto),
            "ADULTO_MAYOR" => Ok(PassengerType::AdultoMayor),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "passenger type {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Pasajero {
    pub id: PasajeroId,
    pub rut: Rut,
    pub nombres: PersonName,
    pub apellidos: PersonName,
    pub correo: Option<Email>,
    pub telefono: Option<PhoneNumber>,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub tipo_pasajero: PassengerType,
    pub empresa_id: Option<EmpresaId>,
    pub convenio_id: Option<ConvenioId>,
    pub status: Status,
    pub created_at: NaiveDateTime,
}

impl Pasajero {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombres, self.apellidos)
    }
}

#[derive(Clone, Debug)]
pub struct NewPasajero {
    pub rut: Rut,
    pub nombres: PersonName,
    pub apellidos: PersonName,
    pub correo: Option<Email>,
    pub telefono: Option<PhoneNumber>,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub tipo_pasajero: PassengerType,
    pub empresa_id: Option<EmpresaId>,
    pub convenio_id: Option<ConvenioId>,
    pub status: Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passenger_type_parses_labels_and_codes() {
        assert_eq!("adulto mayor".parse(), Ok(PassengerType::AdultoMayor));
        assert_eq!("ESTUDIANTE".parse(), Ok(PassengerType::Estudiante));
        assert!("niño".parse::<PassengerType>().is_err());
        assert_eq!(PassengerType::AdultoMayor.label(), "Adulto Mayor");
    }
}
