//! Search-filter-paginate state shared by every list page.
//!
//! [`ListQueryState`] owns a full in-memory collection together with the
//! active search term and the pagination parameters. The filtered view, the
//! visible slice and the pagination metadata are derived from those inputs
//! and recomputed whenever one of them changes, so the consumer can never
//! observe a page number that is out of range for the current filter.

use serde::Serialize;

use crate::pagination::Page;

/// Selects the string fields of a record that take part in search matching.
pub type FieldSelector<T> = fn(&T) -> Vec<&str>;

/// Records that expose a default set of searchable fields.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Pagination metadata derived from the filtered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_prev_page: bool,
    pub has_next_page: bool,
}

impl PaginationState {
    /// Derives the metadata for `total` matching records.
    ///
    /// `page` is clamped into `[1, max(total_pages, 1)]` and `limit` is
    /// raised to at least one.
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit);
        let page = page.clamp(1, total_pages.max(1));

        Self {
            page,
            limit,
            total,
            total_pages,
            has_prev_page: page > 1,
            has_next_page: page < total_pages,
        }
    }

    /// Offset of the first record of the current page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.limit
    }
}

/// Client-side search and pagination over a fully loaded collection.
pub struct ListQueryState<T> {
    records: Vec<T>,
    selector: FieldSelector<T>,
    search_term: String,
    /// Indices into `records` of the rows matching `search_term`, in order.
    filtered: Vec<usize>,
    pagination: PaginationState,
}

impl<T: Searchable> ListQueryState<T> {
    /// Builds a state that searches the fields given by [`Searchable`].
    pub fn new(records: Vec<T>, limit: usize) -> Self {
        Self::with_selector(records, limit, T::search_fields)
    }
}

impl<T> ListQueryState<T> {
    /// Builds a state that searches the fields returned by `selector`.
    pub fn with_selector(records: Vec<T>, limit: usize, selector: FieldSelector<T>) -> Self {
        let mut state = Self {
            records: Vec::new(),
            selector,
            search_term: String::new(),
            filtered: Vec::new(),
            pagination: PaginationState::new(1, limit, 0),
        };
        state.set_records(records);
        state
    }

    /// Replaces the whole collection and goes back to the first page.
    pub fn set_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.refilter();
    }

    /// Updates the search term and goes back to the first page.
    ///
    /// `None` is treated as the empty term.
    pub fn set_search_term(&mut self, term: Option<&str>) {
        self.search_term = term.unwrap_or_default().to_string();
        self.refilter();
    }

    /// Moves to `page`, clamped into the valid range.
    pub fn set_page(&mut self, page: i64) {
        let page = usize::try_from(page).unwrap_or(0);
        self.pagination = PaginationState::new(page, self.pagination.limit, self.filtered.len());
    }

    /// Changes the page size, keeping the search term and clamping the page.
    pub fn set_limit(&mut self, limit: usize) {
        self.pagination = PaginationState::new(self.pagination.page, limit, self.filtered.len());
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn pagination_state(&self) -> PaginationState {
        self.pagination
    }

    /// Number of records in the unfiltered collection.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record matching the search term, in original order.
    pub fn filtered(&self) -> impl Iterator<Item = &T> {
        self.filtered.iter().map(|&index| &self.records[index])
    }

    /// Records of the current page.
    pub fn visible_page(&self) -> Vec<&T> {
        self.visible_indices()
            .iter()
            .map(|&index| &self.records[index])
            .collect()
    }

    /// Consumes the state, keeping only the current page.
    pub fn into_page(self) -> Page<T> {
        let pagination = self.pagination;
        let visible = self.visible_indices().to_vec();
        let mut keep = visible.into_iter().peekable();

        let items = self
            .records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                if keep.next_if_eq(&index).is_some() {
                    Some(record)
                } else {
                    None
                }
            })
            .collect();

        Page::new(items, pagination)
    }

    fn visible_indices(&self) -> &[usize] {
        let start = self.pagination.offset().min(self.filtered.len());
        let end = (start + self.pagination.limit).min(self.filtered.len());
        &self.filtered[start..end]
    }

    fn refilter(&mut self) {
        let needle = self.search_term.trim().to_lowercase();
        let selector = self.selector;

        self.filtered = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                needle.is_empty()
                    || selector(record)
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
            })
            .map(|(index, _)| index)
            .collect();

        self.pagination = PaginationState::new(1, self.pagination.limit, self.filtered.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: usize,
        empresa: String,
        nombre: String,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.empresa.as_str(), self.nombre.as_str()]
        }
    }

    fn rows(count: usize) -> Vec<Row> {
        (1..=count)
            .map(|id| Row {
                id,
                empresa: format!("Empresa {id}"),
                nombre: format!("Nombre {id}"),
            })
            .collect()
    }

    fn ids(page: &[&Row]) -> Vec<usize> {
        page.iter().map(|row| row.id).collect()
    }

    #[test]
    fn hundred_records_span_ten_pages() {
        let mut state = ListQueryState::new(rows(100), 10);

        let first = state.pagination_state();
        assert_eq!(first.total, 100);
        assert_eq!(first.total_pages, 10);
        assert!(first.has_next_page);
        assert!(!first.has_prev_page);

        state.set_page(10);
        let last = state.pagination_state();
        assert_eq!(last.page, 10);
        assert!(!last.has_next_page);
        assert!(last.has_prev_page);
        assert_eq!(ids(&state.visible_page()), (91..=100).collect::<Vec<_>>());
    }

    #[test]
    fn search_counts_every_substring_match_and_resets_page() {
        let mut state = ListQueryState::new(rows(100), 10);
        state.set_page(4);

        state.set_search_term(Some("empresa 1"));

        let pagination = state.pagination_state();
        // "Empresa 1", "Empresa 10".."Empresa 19" and "Empresa 100".
        assert_eq!(pagination.total, 12);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.total_pages, 2);
        assert_eq!(
            ids(&state.visible_page()),
            vec![1, 10, 11, 12, 13, 14, 15, 16, 17, 18]
        );
    }

    #[test]
    fn search_matches_any_field_case_insensitively() {
        let mut state = ListQueryState::new(rows(30), 10);

        state.set_search_term(Some("  NOMBRE 2  "));

        let matched: Vec<usize> = state.filtered().map(|row| row.id).collect();
        assert_eq!(matched, vec![2, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29]);
    }

    #[test]
    fn blank_or_missing_term_is_identity() {
        let mut state = ListQueryState::new(rows(15), 10);

        state.set_search_term(Some("   "));
        assert_eq!(state.filtered().count(), 15);

        state.set_search_term(None);
        assert_eq!(state.search_term(), "");
        assert_eq!(state.pagination_state().total, 15);
    }

    #[test]
    fn empty_collection_is_page_one_of_zero() {
        let state = ListQueryState::new(Vec::<Row>::new(), 10);

        let pagination = state.pagination_state();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.total, 0);
        assert_eq!(pagination.total_pages, 0);
        assert!(!pagination.has_prev_page);
        assert!(!pagination.has_next_page);
        assert!(state.visible_page().is_empty());
    }

    #[test]
    fn no_match_renders_empty_page() {
        let mut state = ListQueryState::new(rows(20), 10);
        state.set_page(2);

        state.set_search_term(Some("zzz"));

        let pagination = state.pagination_state();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.total_pages, 0);
        assert!(state.visible_page().is_empty());
    }

    #[test]
    fn replacing_records_resets_page() {
        let mut state = ListQueryState::new(rows(50), 10);
        state.set_page(5);

        state.set_records(rows(12));

        let pagination = state.pagination_state();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.total, 12);
        assert_eq!(pagination.total_pages, 2);
    }

    #[test]
    fn replacing_records_keeps_search_term() {
        let mut state = ListQueryState::new(rows(50), 10);
        state.set_search_term(Some("empresa 4"));

        state.set_records(rows(45));

        assert_eq!(state.search_term(), "empresa 4");
        // "Empresa 4" and "Empresa 40".."Empresa 45".
        assert_eq!(state.pagination_state().total, 7);
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let mut state = ListQueryState::new(rows(25), 10);

        state.set_page(0);
        assert_eq!(state.pagination_state().page, 1);

        state.set_page(-3);
        assert_eq!(state.pagination_state().page, 1);

        state.set_page(99);
        let pagination = state.pagination_state();
        assert_eq!(pagination.page, 3);
        assert_eq!(ids(&state.visible_page()), (21..=25).collect::<Vec<_>>());
    }

    #[test]
    fn changing_limit_clamps_page_and_keeps_search() {
        let mut state = ListQueryState::new(rows(100), 10);
        state.set_search_term(Some("nombre"));
        state.set_page(10);

        state.set_limit(50);

        let pagination = state.pagination_state();
        assert_eq!(state.search_term(), "nombre");
        assert_eq!(pagination.limit, 50);
        assert_eq!(pagination.total_pages, 2);
        assert_eq!(pagination.page, 2);
        assert!(!pagination.has_next_page);
    }

    #[test]
    fn zero_limit_is_raised_to_one() {
        let mut state = ListQueryState::new(rows(3), 0);
        assert_eq!(state.pagination_state().limit, 1);
        assert_eq!(state.pagination_state().total_pages, 3);

        state.set_limit(0);
        assert_eq!(state.pagination_state().limit, 1);
    }

    #[test]
    fn visible_page_is_contiguous_ordered_slice_of_filter() {
        let mut state = ListQueryState::new(rows(100), 7);
        state.set_search_term(Some("5"));

        let filtered: Vec<usize> = state.filtered().map(|row| row.id).collect();
        for page in 1..=state.pagination_state().total_pages {
            state.set_page(page as i64);
            let visible = ids(&state.visible_page());
            let offset = (page - 1) * 7;
            assert!(visible.len() <= 7);
            assert_eq!(visible.as_slice(), &filtered[offset..offset + visible.len()]);
        }
    }

    fn nombre_only(row: &Row) -> Vec<&str> {
        vec![row.nombre.as_str()]
    }

    #[test]
    fn custom_selector_limits_searched_fields() {
        let mut state = ListQueryState::with_selector(rows(20), 10, nombre_only);

        state.set_search_term(Some("empresa"));

        assert_eq!(state.pagination_state().total, 0);
    }

    #[test]
    fn into_page_keeps_visible_records_and_metadata() {
        let mut state = ListQueryState::new(rows(23), 10);
        state.set_page(3);

        let page = state.into_page();

        assert_eq!(
            page.items.iter().map(|row| row.id).collect::<Vec<_>>(),
            vec![21, 22, 23]
        );
        assert_eq!(page.pagination.page, 3);
        assert_eq!(page.pagination.total, 23);
    }

    #[test]
    fn pagination_state_serializes_camel_case() {
        let value = serde_json::to_value(PaginationState::new(2, 10, 35)).unwrap();

        assert_eq!(value["totalPages"], 4);
        assert_eq!(value["hasPrevPage"], true);
        assert_eq!(value["hasNextPage"], true);
    }
}
