use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::codigo_descuento::CodigoDescuento;
use crate::domain::convenio::Convenio;
use crate::domain::empresa::Empresa;
use crate::dto::ListQuery;
use crate::list_query::Searchable;
use crate::pagination::Page;

/// Query string of the agreements page.
///
/// The agreements table and the selected agreement's codes panel paginate
/// independently.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ConveniosQuery {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<usize>,
    /// Agreement whose codes are shown in the side panel.
    pub convenio_id: Option<i32>,
    pub codigo_search: Option<String>,
    pub codigo_page: Option<i64>,
}

impl ConveniosQuery {
    pub fn convenios(&self) -> ListQuery {
        ListQuery {
            search: self.search.clone(),
            page: self.page,
            limit: self.limit,
        }
    }

    pub fn codigos(&self) -> ListQuery {
        ListQuery {
            search: self.codigo_search.clone(),
            page: self.codigo_page,
            limit: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConvenioRow {
    #[serde(flatten)]
    pub convenio: Convenio,
    pub empresa_nombre: String,
    pub accepts_codes: bool,
}

impl ConvenioRow {
    pub fn new(convenio: Convenio, empresa: &Empresa) -> Self {
        Self {
            accepts_codes: convenio.accepts_codes(),
            empresa_nombre: empresa.nombre.to_string(),
            convenio,
        }
    }
}

impl Searchable for ConvenioRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.convenio.nombre.as_str(), &self.empresa_nombre]
    }
}

/// Discount code with its usage figures resolved for display.
#[derive(Debug, Clone, Serialize)]
pub struct CodigoRow {
    #[serde(flatten)]
    pub codigo: CodigoDescuento,
    pub usage_percentage: i64,
    pub usage_class: &'static str,
    pub vigente: bool,
}

impl CodigoRow {
    pub fn new(codigo: CodigoDescuento, today: NaiveDate) -> Self {
        Self {
            usage_percentage: codigo.usage_percentage(),
            usage_class: codigo.usage_level().css_class(),
            vigente: codigo.is_current(today),
            codigo,
        }
    }
}

impl Searchable for CodigoRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.codigo.codigo.as_str()]
    }
}

/// The agreement opened in the codes panel.
#[derive(Debug, Serialize)]
pub struct SelectedConvenio {
    pub convenio: ConvenioRow,
    pub codigos: Page<CodigoRow>,
    pub codigo_search: String,
}

/// Data required to render the agreements page.
#[derive(Debug, Serialize)]
pub struct ConveniosPageData {
    pub convenios: Page<ConvenioRow>,
    pub search: String,
    /// Active companies offered in the creation modal.
    pub empresas: Vec<Empresa>,
    pub selected: Option<SelectedConvenio>,
}
