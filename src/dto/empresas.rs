use serde::Serialize;

use crate::domain::empresa::Empresa;
use crate::list_query::Searchable;
use crate::pagination::Page;

/// Company row with its RUT pre-formatted for display.
#[derive(Debug, Clone, Serialize)]
pub struct EmpresaRow {
    #[serde(flatten)]
    pub empresa: Empresa,
    pub rut_formatted: String,
}

impl From<Empresa> for EmpresaRow {
    fn from(empresa: Empresa) -> Self {
        let rut_formatted = empresa.rut.formatted();
        Self {
            empresa,
            rut_formatted,
        }
    }
}

impl Searchable for EmpresaRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.empresa.nombre.as_str(),
            self.empresa.rut.as_str(),
            &self.rut_formatted,
        ]
    }
}

/// Data required to render the companies page.
#[derive(Debug, Serialize)]
pub struct EmpresasPageData {
    pub empresas: Page<EmpresaRow>,
    pub search: String,
}
