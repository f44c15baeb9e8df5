use serde::{Deserialize, Serialize};

use crate::domain::empresa::Empresa;
use crate::pagination::Page;
use crate::repository::EventoWithRelations;

/// Raw filters of the events page, as typed in the filter bar.
///
/// Every value is kept as text so blank selects deserialize cleanly; the
/// service parses them and drops the ones that do not make sense.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct EventosQuery {
    pub tipo_evento: Option<String>,
    pub empresa_id: Option<String>,
    pub pasajero_id: Option<String>,
    pub convenio_id: Option<String>,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct EventosPageData {
    pub eventos: Page<EventoWithRelations>,
    /// Filters echoed back to the filter bar and pagination links.
    pub filters: EventosQuery,
    pub empresas: Vec<Empresa>,
}
