use serde::Serialize;

/// Page size used by list endpoints when the caller does not pick one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Page selection applied to list queries. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Number of rows to skip for this page.
    ///
    /// Saturates for absurd page numbers instead of overflowing.
    pub fn offset(&self) -> i64 {
        let skipped = self.page.saturating_sub(1).saturating_mul(self.per_page);
        i64::try_from(skipped).unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

/// One page of results together with the paging position.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total_pages: usize) -> Self {
        Self {
            items,
            page,
            total_pages,
        }
    }

    /// Build a page from the total row count reported by the repository.
    pub fn from_total(items: Vec<T>, page: usize, total: usize, per_page: usize) -> Self {
        Self::new(items, page, total.div_ceil(per_page.max(1)))
    }
}
