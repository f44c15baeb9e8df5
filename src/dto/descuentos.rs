use serde::Serialize;

use crate::domain::convenio::Convenio;
use crate::domain::descuento::Descuento;
use crate::domain::pasajero::Pasajero;
use crate::list_query::Searchable;
use crate::pagination::Page;

#[derive(Debug, Clone, Serialize)]
pub struct DescuentoRow {
    #[serde(flatten)]
    pub descuento: Descuento,
    pub pasajero_nombres: String,
    pub pasajero_apellidos: String,
    pub pasajero_rut: String,
    pub pasajero_rut_formatted: String,
}

impl DescuentoRow {
    pub fn new(descuento: Descuento, pasajero: &Pasajero) -> Self {
        Self {
            descuento,
            pasajero_nombres: pasajero.nombres.to_string(),
            pasajero_apellidos: pasajero.apellidos.to_string(),
            pasajero_rut: pasajero.rut.to_string(),
            pasajero_rut_formatted: pasajero.rut.formatted(),
        }
    }
}

impl Searchable for DescuentoRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.pasajero_nombres,
            &self.pasajero_apellidos,
            &self.pasajero_rut,
            &self.pasajero_rut_formatted,
        ]
    }
}

#[derive(Debug, Serialize)]
pub struct DescuentosPageData {
    pub descuentos: Page<DescuentoRow>,
    pub search: String,
}

/// Everything shown in the discount details modal.
#[derive(Debug, Serialize)]
pub struct DescuentoDetails {
    pub descuento: Descuento,
    pub pasajero: Pasajero,
    pub convenio: Option<Convenio>,
}
