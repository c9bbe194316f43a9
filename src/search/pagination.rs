//! Page bookkeeping for a paged result set

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::PageError;

/// Page sizes offered in the "Items per page" selector
pub const ALLOWED_PAGE_SIZES: [u32; 12] = [5, 10, 15, 20, 30, 40, 50, 60, 70, 80, 90, 100];

/// A page size from [`ALLOWED_PAGE_SIZES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(u32);

impl PageSize {
    pub fn new(size: u32) -> Result<Self, PageError> {
        if ALLOWED_PAGE_SIZES.contains(&size) {
            Ok(Self(size))
        } else {
            Err(PageError::UnsupportedPageSize(size))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = PageSize> {
        ALLOWED_PAGE_SIZES.into_iter().map(PageSize)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(ALLOWED_PAGE_SIZES[0])
    }
}

impl TryFrom<u32> for PageSize {
    type Error = PageError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

impl FromStr for PageSize {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let size = s.trim().parse::<u32>().map_err(|_| PageError::NotANumber)?;
        Self::new(size)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current page, page size and the server's page count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    page: u32,
    limit: PageSize,
    total_pages: u32,
}

impl PaginationState {
    pub fn new(limit: PageSize) -> Self {
        Self {
            page: 1,
            limit,
            total_pages: 1,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> PageSize {
        self.limit
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Move to `page`; only pages in `1..=total_pages` are accepted
    pub fn set_page(&mut self, page: u32) -> Result<(), PageError> {
        if page == 0 || page > self.total_pages {
            return Err(PageError::OutOfRange {
                page,
                total_pages: self.total_pages,
            });
        }
        self.page = page;
        Ok(())
    }

    /// Change the page size. The current page is kept as is.
    pub fn set_limit(&mut self, limit: PageSize) {
        self.limit = limit;
    }

    /// Record the page count from a server response; a missing value means 1
    pub fn apply_total_pages(&mut self, total_pages: Option<u32>) {
        self.total_pages = total_pages.unwrap_or(1);
    }

    /// Previous/next/jump controls are only shown for multi-page results
    pub fn controls_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// Page the Previous control leads to. After a page-size change the
    /// current page can lie past the last one; Previous then lands on the
    /// last page.
    pub fn previous_page(&self) -> Option<u32> {
        (self.page > 1).then(|| (self.page - 1).min(self.total_pages))
    }

    /// Page the Next control leads to
    pub fn next_page(&self) -> Option<u32> {
        (self.page < self.total_pages).then(|| self.page + 1)
    }

    pub fn has_previous(&self) -> bool {
        self.previous_page().is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next_page().is_some()
    }

    /// "Page X of Y"
    pub fn summary(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

/// Validation applied while the jump-to-page box is being edited. An empty
/// box is fine; anything other than digits is not a number.
pub fn validate_jump_input(input: &str) -> Result<(), PageError> {
    if input.is_empty() || is_digits(input) {
        Ok(())
    } else {
        Err(PageError::NotANumber)
    }
}

/// Parse a committed jump-to-page input against the current page count
pub fn parse_jump_target(input: &str, total_pages: u32) -> Result<u32, PageError> {
    if !is_digits(input) {
        return Err(PageError::NotANumber);
    }

    // digits that overflow u32 are necessarily past the last page
    let page = input.parse::<u32>().map_err(|_| PageError::NotAPage)?;
    if page == 0 || page > total_pages {
        return Err(PageError::NotAPage);
    }
    Ok(page)
}

fn is_digits(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
}
