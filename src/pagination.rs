//! This module defines the common functionality for paging data.

use maud::{Markup, html};

/// The config for pagination.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The maximum rows to display per page.
    pub page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { page_size: 20 }
    }
}

/// The number of pages needed to show `row_count` rows.
///
/// Always at least one, so an empty result set still renders as page 1 of 1.
pub fn page_count(row_count: u64, page_size: u64) -> u64 {
    row_count.div_ceil(page_size).max(1)
}

/// The number of rows to skip to reach 1-indexed `page`.
pub fn offset(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1) * page_size
}

/// Clamp a requested page number to the valid range `1..=page_count`.
pub fn clamp_page(page: u64, page_count: u64) -> u64 {
    page.clamp(1, page_count)
}

/// Render previous/next links and a page indicator for a list page.
///
/// `make_href` builds the URL for a given page number, so callers can carry
/// their search query through the links.
pub fn render_pager(curr_page: u64, page_count: u64, make_href: impl Fn(u64) -> String) -> Markup {
    html! {
        nav class="mt-4 flex items-center justify-center gap-4" aria-label="pagination" {
            @if curr_page > 1 {
                a class="text-blue-500 hover:text-blue-600" href=(make_href(curr_page - 1)) {
                    "Previous"
                }
            }

            span class="text-gray-600" { "Page " (curr_page) " of " (page_count) }

            @if curr_page < page_count {
                a class="text-blue-500 hover:text-blue-600" href=(make_href(curr_page + 1)) {
                    "Next"
                }
            }
        }
    }
}
