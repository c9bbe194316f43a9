//! Error types for pagination and jump-to-page input

use crate::error::FoiError;

/// Errors raised when page, page size or jump input is rejected.
///
/// The `Display` text of the jump variants is the message shown under the
/// jump-to-page box.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// Jump input is not a run of digits
    #[error("Not a number")]
    NotANumber,

    /// Jump input is a number but no such page exists
    #[error("Not a page")]
    NotAPage,

    /// Page outside `1..=total_pages`
    #[error("Page {page} is outside 1..={total_pages}")]
    OutOfRange { page: u32, total_pages: u32 },

    /// Page size outside the offered set
    #[error("Unsupported page size: {0}")]
    UnsupportedPageSize(u32),
}

impl From<PageError> for FoiError {
    fn from(err: PageError) -> Self {
        FoiError::Pagination(err.to_string())
    }
}
