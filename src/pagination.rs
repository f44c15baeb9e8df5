use serde::Serialize;

use crate::list_query::PaginationState;

/// Page size used when the request does not ask for one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Largest page size a request may ask for.
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// Clamps a requested page size into `[1, MAX_ITEMS_PER_PAGE]`.
pub fn clamp_limit(limit: Option<usize>, default: usize) -> usize {
    limit.unwrap_or(default).clamp(1, MAX_ITEMS_PER_PAGE)
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of records ready to be rendered or serialized.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationState,
    /// Page numbers for the pagination control, `None` marking a gap.
    pub pages: Vec<Option<usize>>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: PaginationState) -> Self {
        let pages = get_pages(pagination.total_pages, pagination.page, 2, 2, 4, 2);

        Self {
            items,
            pagination,
            pages,
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pages_for_empty_result() {
        assert!(get_pages(0, 1, 2, 2, 4, 2).is_empty());
    }

    #[test]
    fn short_ranges_have_no_gaps() {
        let pages = get_pages(5, 3, 2, 2, 4, 2);
        assert_eq!(pages, (1..=5).map(Some).collect::<Vec<_>>());
    }

    #[test]
    fn long_ranges_collapse_into_gaps() {
        let pages = get_pages(20, 10, 2, 2, 4, 2);
        assert_eq!(
            pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
    }

    #[test]
    fn first_page_window() {
        let pages = get_pages(10, 1, 2, 2, 4, 2);
        assert_eq!(
            pages,
            vec![
                Some(1),
                Some(2),
                Some(3),
                Some(4),
                Some(5),
                None,
                Some(9),
                Some(10)
            ]
        );
    }

    #[test]
    fn clamp_limit_bounds_requested_size() {
        assert_eq!(clamp_limit(None, 10), 10);
        assert_eq!(clamp_limit(Some(0), 10), 1);
        assert_eq!(clamp_limit(Some(500), 10), MAX_ITEMS_PER_PAGE);
    }

    #[test]
    fn page_map_keeps_metadata() {
        let page = Page::new(vec![1, 2, 3], PaginationState::new(2, 3, 9));
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20, 30]);
        assert_eq!(mapped.pagination.page, 2);
        assert_eq!(mapped.pages, vec![Some(1), Some(2), Some(3)]);
    }
}
