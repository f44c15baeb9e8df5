//! Data transfer objects exchanged between routes, services and templates.

use serde::Deserialize;

use crate::list_query::{ListQueryState, Searchable};
use crate::pagination::clamp_limit;

pub mod api;
pub mod convenios;
pub mod descuentos;
pub mod empresas;
pub mod eventos;
pub mod pasajeros;

/// Query string shared by every client-side paginated listing.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListQuery {
    /// Free-text filter entered in the search box.
    pub search: Option<String>,
    /// Requested page; out-of-range values are clamped.
    pub page: Option<i64>,
    /// Requested page size.
    pub limit: Option<usize>,
}

impl ListQuery {
    pub fn new(search: Option<&str>, page: Option<i64>) -> Self {
        Self {
            search: search.map(str::to_string),
            page,
            limit: None,
        }
    }

    /// Builds the list state for `records`: search first, then page size,
    /// then page, so the page is validated against the filtered total.
    pub fn apply<T: Searchable>(&self, records: Vec<T>, default_limit: usize) -> ListQueryState<T> {
        let mut state = ListQueryState::new(records, clamp_limit(None, default_limit));
        state.set_search_term(self.search.as_deref());
        state.set_limit(clamp_limit(self.limit, default_limit));
        state.set_page(self.page.unwrap_or(1));
        state
    }

    /// Search term echoed back to the page.
    pub fn search_term(&self) -> String {
        self.search.as_deref().unwrap_or_default().trim().to_string()
    }
}
