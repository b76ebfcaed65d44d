//! Page arithmetic for the filtered name listing.

use serde::Serialize;

use crate::{DEFAULT_PER_PAGE, MAX_PER_PAGE};

/// Optional case-insensitive substring filters for the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub name: Option<String>,
    pub origin: Option<String>,
}

impl ListFilter {
    /// Blank filters are treated as absent.
    pub fn new(name: Option<&str>, origin: Option<&str>) -> Self {
        Self { name: non_blank(name), origin: non_blank(origin) }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.origin.is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned)
}

/// A page request after clamping: `page >= 1`, `per_page` in `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    pub fn new(page: i64, per_page: i64) -> Self {
        let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
        let per_page = u32::try_from(per_page.clamp(1, i64::from(MAX_PER_PAGE))).unwrap_or(MAX_PER_PAGE);
        Self { page, per_page }
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn per_page(&self) -> u32 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, per_page: DEFAULT_PER_PAGE }
    }
}

/// The page actually served, resolved against the matching row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// Resolve a request against `total` matching rows.
    ///
    /// A page past the end is pulled back to the last page. With no rows the
    /// page is 1 and there are zero pages.
    pub fn resolve(request: PageRequest, total: u64) -> Self {
        let per_page = request.per_page();
        let total_pages = total.div_ceil(u64::from(per_page));
        let page = if total == 0 {
            1
        } else if u64::from(request.page()) > total_pages {
            u32::try_from(total_pages).unwrap_or(u32::MAX)
        } else {
            request.page()
        };
        Self { page, per_page, total, total_pages }
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }
}
