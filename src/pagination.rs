//! Pagination primitives shared by the repository and the HTTP layer.

use serde::Serialize;

/// Page size applied when a request does not specify one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 9;

/// Pagination parameters accepted by repository list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Pagination block rendered next to a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
}

/// One page of items together with its pagination block.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> Paginated<T> {
    /// Wrap `items` as the page `page` out of `total_items` matches,
    /// `per_page` items to a page.
    pub fn new(items: Vec<T>, total_items: usize, page: usize, per_page: usize) -> Self {
        let total_pages = match per_page {
            0 => 0,
            per_page => total_items.div_ceil(per_page),
        };
        Self {
            items,
            pagination: PageInfo {
                current_page: page,
                total_pages,
                total_items,
                items_per_page: per_page,
            },
        }
    }
}
