//! Offset pagination for list endpoints
//!
//! Page and limit arrive as loosely-typed query parameters; `PageRequest`
//! coerces them into a valid window and `PaginationMeta` describes the result.
//!
//! # Example
//!
//! ```
//! use movie_catalog_core::pagination::{PageRequest, PaginationMeta};
//!
//! let page = PageRequest::new(Some(2), Some(10));
//! assert_eq!(page.offset(), 10);
//!
//! let meta = PaginationMeta::new(&page, 35);
//! assert_eq!(meta.total_pages, 4);
//! assert!(meta.has_next);
//! ```

use serde::{Deserialize, Serialize};

/// Default number of items per page
pub const DEFAULT_LIMIT: i64 = 20;

/// Maximum number of items per page
pub const MAX_LIMIT: i64 = 100;

/// First page number
pub const DEFAULT_PAGE: i64 = 1;

/// Validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Coerce raw parameters into a valid window
    ///
    /// Pages below 1 become 1. Limits below 1 fall back to [`DEFAULT_LIMIT`],
    /// limits above [`MAX_LIMIT`] are clamped to it.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.unwrap_or(DEFAULT_PAGE).max(DEFAULT_PAGE);

        let limit = match limit.unwrap_or(DEFAULT_LIMIT) {
            l if l < 1 => DEFAULT_LIMIT,
            l if l > MAX_LIMIT => MAX_LIMIT,
            l => l,
        };

        Self { page, limit }
    }

    /// Number of rows to skip
    ///
    /// Saturates at `i64::MAX` so far-out pages come back empty.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationMeta {
    /// Build metadata for a page of a result set of `total` rows
    ///
    /// `total_pages` is never below 1, so an empty catalog still reports a
    /// single (empty) page.
    pub fn new(page: &PageRequest, total: i64) -> Self {
        let total_pages = ((total + page.limit - 1) / page.limit).max(1);

        Self {
            page: page.page,
            limit: page.limit,
            total,
            total_pages,
            has_next: page.page < total_pages,
            has_previous: page.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageRequest::new(None, None);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, DEFAULT_LIMIT);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_page_below_one_is_coerced() {
        assert_eq!(PageRequest::new(Some(0), None).page, 1);
        assert_eq!(PageRequest::new(Some(-5), None).page, 1);
    }

    #[test]
    fn test_limit_clamping() {
        assert_eq!(PageRequest::new(None, Some(0)).limit, DEFAULT_LIMIT);
        assert_eq!(PageRequest::new(None, Some(-1)).limit, DEFAULT_LIMIT);
        assert_eq!(PageRequest::new(None, Some(101)).limit, MAX_LIMIT);
        assert_eq!(PageRequest::new(None, Some(1)).limit, 1);
        assert_eq!(PageRequest::new(None, Some(100)).limit, 100);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(Some(3), Some(25)).offset(), 50);
    }

    #[test]
    fn test_offset_saturates_for_huge_page() {
        assert_eq!(PageRequest::new(Some(i64::MAX), Some(20)).offset(), i64::MAX);
    }

    #[test]
    fn test_meta_middle_page() {
        let meta = PaginationMeta::new(&PageRequest::new(Some(2), Some(10)), 35);
        assert_eq!(meta.total_pages, 4);
        assert!(meta.has_next);
        assert!(meta.has_previous);
    }

    #[test]
    fn test_meta_last_page() {
        let meta = PaginationMeta::new(&PageRequest::new(Some(4), Some(10)), 35);
        assert!(!meta.has_next);
        assert!(meta.has_previous);
    }

    #[test]
    fn test_meta_empty_result_has_one_page() {
        let meta = PaginationMeta::new(&PageRequest::default(), 0);
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_next);
        assert!(!meta.has_previous);
    }

    #[test]
    fn test_meta_exact_multiple() {
        let meta = PaginationMeta::new(&PageRequest::new(Some(1), Some(20)), 40);
        assert_eq!(meta.total_pages, 2);
    }
}
