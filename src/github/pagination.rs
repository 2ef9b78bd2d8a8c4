//! Page cursor for draining search results.
//!
//! The search API returns at most [`PER_PAGE`] items per request. A result set
//! is drained page by page until a short page arrives or [`MAX_PAGES`] pages
//! have been read, which bounds a single query at 1000 items.

/// Items requested per page.
pub const PER_PAGE: u8 = 100;

/// Hard cap on pages fetched for one query.
pub const MAX_PAGES: u32 = 10;

/// Position within a paginated search.
///
/// # Example
///
/// ```
/// use prsweep::github::pagination::PageCursor;
///
/// let mut cursor = PageCursor::new(100, 10);
/// assert_eq!(cursor.current_page(), 1);
/// assert!(cursor.advance(100));
/// assert_eq!(cursor.current_page(), 2);
/// assert!(!cursor.advance(42));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Current page number (1-based).
    current_page: u32,
    /// Items per page.
    per_page: u8,
    /// Last page that may be requested.
    max_pages: u32,
}

impl PageCursor {
    /// Creates a cursor positioned at page 1.
    #[must_use]
    pub const fn new(per_page: u8, max_pages: u32) -> Self {
        Self {
            current_page: 1,
            per_page,
            max_pages,
        }
    }

    /// Returns the current page number (1-based).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> u8 {
        self.per_page
    }

    /// Records that the current page returned `item_count` items.
    ///
    /// Moves to the next page and returns `true` when the page was full and
    /// the cap has not been reached; otherwise the cursor stays put and
    /// `false` is returned.
    pub fn advance(&mut self, item_count: usize) -> bool {
        let page_was_full = item_count >= usize::from(self.per_page);
        if !page_was_full || self.current_page >= self.max_pages {
            return false;
        }

        self.current_page += 1;
        true
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(PER_PAGE, MAX_PAGES)
    }
}
