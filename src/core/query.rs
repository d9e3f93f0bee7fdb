//! Query parameters and pagination utilities

use serde::{Deserialize, Serialize};

/// Default number of items per page when no configuration overrides it
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Query parameters for paginated, filtered invoice listings
///
/// # Example
/// ```text
/// GET /api/clients/{id}/invoices?currentPage=2
/// GET /api/clients/{id}/invoices?filter=paid&currentPage=1
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Status filter (`all`, `paid`, `unpaid`)
    pub filter: Option<String>,

    /// Page number (starts at 1)
    pub current_page: Option<u64>,
}

/// A resolved page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number (starts at 1)
    pub page: u64,

    /// Number of items per page
    pub page_size: u64,
}

impl PageRequest {
    /// Build a page request, clamping the page to 1 and the size to at least 1
    pub fn new(page: Option<u64>, page_size: u64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size.max(1),
        }
    }

    /// Number of items to skip
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// One page of results plus the total number of matching items
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page_size: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: &PageRequest) -> Self {
        Self {
            items,
            total,
            page_size: request.page_size,
        }
    }

    /// Total number of pages; zero when nothing matched
    pub fn total_pages(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            self.total.div_ceil(self.page_size.max(1))
        }
    }
}

/// Slice an already filtered and ordered collection into one page
pub fn paginate<T>(items: Vec<T>, request: &PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let window = items
        .into_iter()
        .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(request.page_size).unwrap_or(usize::MAX))
        .collect();

    Page::new(window, total, request)
}
