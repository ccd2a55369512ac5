//! # Pagination
//!
//! Page cursor over a server-side list of known total size.

use thiserror::Error;

/// Page size used by the product and transaction lists
pub const DEFAULT_PAGE_SIZE: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("Page {requested} is out of range (1..={last})")]
    OutOfRange { requested: u32, last: u32 },

    #[error("Page size must be greater than 0")]
    InvalidPageSize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: u32,
    total: u64,
    initial_page: u32,
    initial_page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Start at page 1 with no known items. A zero page size is treated as 1.
    pub fn new(page_size: u32) -> Self {
        let page_size = page_size.max(1);
        Self {
            page: 1,
            page_size,
            total: 0,
            initial_page: 1,
            initial_page_size: page_size,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// `ceil(total / page_size)`; 0 when there are no items.
    pub fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Highest selectable page. An empty list still has its one empty page.
    pub fn last_page(&self) -> u32 {
        self.total_pages().max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page()
    }

    /// Controls are only worth showing with more than one page
    pub fn is_visible(&self) -> bool {
        self.total_pages() > 1
    }

    /// Zero-based index of the first item on the current page
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// Move to `page`. Out-of-range requests leave the current page as is.
    pub fn set_page(&mut self, page: u32) -> Result<(), PaginationError> {
        let last = self.last_page();
        if page == 0 || page > last {
            return Err(PaginationError::OutOfRange {
                requested: page,
                last,
            });
        }
        self.page = page;
        Ok(())
    }

    pub fn next_page(&mut self) -> Result<(), PaginationError> {
        self.set_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Result<(), PaginationError> {
        self.set_page(self.page.saturating_sub(1))
    }

    /// Change the page size and go back to page 1.
    pub fn set_page_size(&mut self, page_size: u32) -> Result<(), PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::InvalidPageSize);
        }
        self.page_size = page_size;
        self.page = 1;
        Ok(())
    }

    /// Record the server's total. If the current page no longer exists
    /// (items were deleted) the cursor moves to the last page.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
        self.page = self.page.min(self.last_page());
    }

    pub fn reset(&mut self) {
        self.page = self.initial_page;
        self.page_size = self.initial_page_size;
    }
}
