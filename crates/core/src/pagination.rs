//! Page/limit handling for event listings.
//!
//! Pages are 1-based. The page size is capped at [`MAX_PAGE_SIZE`].

use serde::Serialize;

/// Hard cap on events returned per page.
pub const MAX_PAGE_SIZE: i64 = 50;

/// Page size used when the caller does not pass one.
pub const DEFAULT_PAGE_SIZE: i64 = MAX_PAGE_SIZE;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    /// 1-based page index.
    pub page: i64,
    /// Events per page, `1..=MAX_PAGE_SIZE`.
    pub limit: i64,
}

impl PageRequest {
    /// Validate raw query values. Missing values fall back to page 1 and
    /// [`DEFAULT_PAGE_SIZE`]; out-of-range values are rejected, not clamped.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, String> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(format!("page must be a positive integer, got {page}"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}, got {limit}"
            ));
        }
        Ok(Self { page, limit })
    }

    /// Number of matching rows to skip before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}
