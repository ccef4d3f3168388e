//! Page-number based pagination primitives shared by all listing ports.

use serde::{Deserialize, Serialize};

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Hard ceiling on the requested page size. Larger requests are clamped,
/// never rejected.
pub const MAX_PAGE_SIZE: u64 = 10_000;

/// A validated page request. Page numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Build a request from raw query parameters, applying the default size
    /// and clamping into `1..=MAX_PAGE_SIZE`.
    pub fn from_params(page: Option<u64>, page_size: Option<u64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        Self { page, page_size }
    }

    /// Zero-based page index, as consumed by the store.
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::from_params(None, None)
    }
}

/// One page of results plus the total row count across all pages.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    /// Map the items of the page, keeping the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_params_absent() {
        let page = PageRequest::from_params(None, None);

        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn oversized_page_size_is_clamped_not_rejected() {
        let page = PageRequest::from_params(Some(1), Some(999_999));

        assert_eq!(page.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn zero_values_are_normalized() {
        let page = PageRequest::from_params(Some(0), Some(0));

        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
    }

    #[test]
    fn index_is_zero_based() {
        assert_eq!(PageRequest::from_params(Some(3), None).index(), 2);
    }
}
