use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<PaginationMeta>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<PaginationMeta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

/// An uploaded file collected from a multipart field
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub original_filename: String,
    pub content_type: String,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Pagination metadata for list responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Current page (1-indexed)
    pub page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: i64, page_size: i64, total_items: i64) -> Self {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let total_pages = (total_items + page_size - 1) / page_size;
        Self {
            page,
            page_size,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1 && total_pages > 0,
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Standard pagination query parameters for list endpoints
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 12, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

impl PaginationQuery {
    /// Calculate SQL OFFSET from page number
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    /// Get clamped page_size (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_first_of_many_pages() {
        let meta = PaginationMeta::new(1, 12, 30);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn meta_middle_page() {
        let meta = PaginationMeta::new(2, 12, 30);
        assert!(meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn meta_last_page() {
        let meta = PaginationMeta::new(3, 12, 30);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn meta_empty_result_set() {
        let meta = PaginationMeta::new(1, 12, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn meta_clamps_page_size() {
        let meta = PaginationMeta::new(1, 10_000, 500);
        assert_eq!(meta.page_size, MAX_PAGE_SIZE);
        assert_eq!(meta.total_pages, 5);
    }

    #[test]
    fn query_offset_is_zero_based() {
        let q = PaginationQuery {
            page: 3,
            page_size: 12,
        };
        assert_eq!(q.offset(), 24);
        assert_eq!(q.limit(), 12);
    }

    #[test]
    fn query_negative_page_treated_as_first() {
        let q = PaginationQuery {
            page: -5,
            page_size: 12,
        };
        assert_eq!(q.offset(), 0);
    }
}
