use serde::Serialize;

use crate::domain::empresa::Empresa;
use crate::domain::pasajero::Pasajero;
use crate::list_query::Searchable;
use crate::pagination::Page;

/// Passenger row with the names of the company and agreement it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct PasajeroRow {
    #[serde(flatten)]
    pub pasajero: Pasajero,
    pub rut_formatted: String,
    pub empresa_nombre: Option<String>,
    pub convenio_nombre: Option<String>,
}

impl Searchable for PasajeroRow {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(5);
        if let Some(correo) = &self.pasajero.correo {
            fields.push(correo.as_str());
        }
        fields.extend([
            self.pasajero.nombres.as_str(),
            self.pasajero.apellidos.as_str(),
            self.pasajero.rut.as_str(),
            self.rut_formatted.as_str(),
        ]);
        fields
    }
}

#[derive(Debug, Serialize)]
pub struct PasajerosPageData {
    pub pasajeros: Page<PasajeroRow>,
    pub search: String,
    /// Active companies offered in the creation modal.
    pub empresas: Vec<Empresa>,
}
