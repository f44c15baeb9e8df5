use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ConvenioId, ConvenioNombre, EmpresaId, Status};

/// How passengers prove they belong to an agreement.
///
/// Only discount-code agreements are handled by the dashboard; any other
/// value coming from storage is kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ConsultationType {
    CodigoDescuento,
    Other(String),
}

impl ConsultationType {
    pub fn as_str(&self) -> &str {
        match self {
            ConsultationType::CodigoDescuento => "CODIGO_DESCUENTO",
            ConsultationType::Other(value) => value.as_str(),
        }
    }
}

impl Display for ConsultationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ConsultationType {
    fn from(value: &str) -> Self {
        match value.trim() {
            "CODIGO_DESCUENTO" => ConsultationType::CodigoDescuento,
            other => ConsultationType::Other(other.to_string()),
        }
    }
}

impl From<String> for ConsultationType {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl From<ConsultationType> for String {
    fn from(value: ConsultationType) -> Self {
        value.as_str().to_string()
    }
}

/// Commercial agreement between the operator and a company.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Convenio {
    pub id: ConvenioId,
    pub empresa_id: EmpresaId,
    pub nombre: ConvenioNombre,
    pub tipo_consulta: ConsultationType,
    /// Sales cap in pesos, when the agreement has one.
    pub tope_monto_ventas: Option<i64>,
    pub status: Status,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Convenio {
    /// Whether discount codes may be issued under this agreement.
    pub fn accepts_codes(&self) -> bool {
        self.status.is_active() && self.tipo_consulta == ConsultationType::CodigoDescuento
    }
}

#[derive(Clone, Debug)]
pub struct NewConvenio {
    pub empresa_id: EmpresaId,
    pub nombre: ConvenioNombre,
    pub tipo_consulta: ConsultationType,
    pub tope_monto_ventas: Option<i64>,
    pub status: Status,
}

impl NewConvenio {
    #[must_use]
    pub fn new(
        empresa_id: EmpresaId,
        nombre: ConvenioNombre,
        tipo_consulta: ConsultationType,
        tope_monto_ventas: Option<i64>,
    ) -> Self {
        Self {
            empresa_id,
            nombre,
            tipo_consulta,
            tope_monto_ventas,
            status: Status::Activo,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn convenio(tipo: ConsultationType, status: Status) -> Convenio {
        let now = Utc::now().naive_utc();
        Convenio {
            id: ConvenioId::new(1).unwrap(),
            empresa_id: EmpresaId::new(1).unwrap(),
            nombre: ConvenioNombre::new("Convenio 1").unwrap(),
            tipo_consulta: tipo,
            tope_monto_ventas: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn unknown_consultation_types_are_preserved() {
        let tipo = ConsultationType::from("API_EXTERNA");
        assert_eq!(tipo, ConsultationType::Other("API_EXTERNA".to_string()));
        assert_eq!(String::from(tipo), "API_EXTERNA");
        assert_eq!(
            ConsultationType::from("CODIGO_DESCUENTO"),
            ConsultationType::CodigoDescuento
        );
    }

    #[test]
    fn only_active_code_agreements_accept_codes() {
        assert!(convenio(ConsultationType::CodigoDescuento, Status::Activo).accepts_codes());
        assert!(!convenio(ConsultationType::CodigoDescuento, Status::Inactivo).accepts_codes());
        assert!(!convenio(ConsultationType::from("RUT"), Status::Activo).accepts_codes());
    }
}
