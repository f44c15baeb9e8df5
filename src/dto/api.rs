//! Payloads of the JSON listing API.

use serde::Serialize;

use crate::list_query::PaginationState;
use crate::pagination::Page;

/// Envelope shared by every `/dashboard/api/v1` listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPage<T> {
    pub rows: Vec<T>,
    pub total_items: usize,
    pub pagination: PaginationState,
}

impl<T> From<Page<T>> for ApiPage<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            total_items: page.pagination.total,
            pagination: page.pagination,
            rows: page.items,
        }
    }
}

/// Body of every API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
