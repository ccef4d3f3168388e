//! The pagination envelope returned by every list endpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The requested page number lies past the last page.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid page.")]
pub struct InvalidPage;

/// Page-number envelope: total row count, the neighbouring page numbers
/// (null at the boundaries) and the page's results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<u64>,
    pub previous: Option<u64>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Build the envelope for `page` (1-based) of `page_size` items out of
    /// `count` total rows. Page 1 of an empty collection is valid; any page
    /// past the end is not.
    pub fn new(
        results: Vec<T>,
        count: u64,
        page: u64,
        page_size: u64,
    ) -> Result<Self, InvalidPage> {
        let last_page = if count == 0 {
            1
        } else {
            count.div_ceil(page_size)
        };
        if page > last_page {
            return Err(InvalidPage);
        }

        Ok(Self {
            count,
            next: (page < last_page).then(|| page + 1),
            previous: (page > 1).then(|| page - 1),
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page_has_no_neighbours() {
        let envelope = Paginated::new(vec![1, 2, 3], 3, 1, 10).unwrap();

        assert_eq!(envelope.count, 3);
        assert_eq!(envelope.next, None);
        assert_eq!(envelope.previous, None);
    }

    #[test]
    fn middle_page_links_both_ways() {
        let envelope = Paginated::new(vec![0; 10], 25, 2, 10).unwrap();

        assert_eq!(envelope.next, Some(3));
        assert_eq!(envelope.previous, Some(1));
    }

    #[test]
    fn last_page_has_no_next() {
        let envelope = Paginated::new(vec![0; 5], 25, 3, 10).unwrap();

        assert_eq!(envelope.next, None);
        assert_eq!(envelope.previous, Some(2));
    }

    #[test]
    fn first_page_of_empty_collection_is_valid() {
        let envelope = Paginated::<i32>::new(vec![], 0, 1, 10).unwrap();

        assert_eq!(envelope.count, 0);
        assert!(envelope.results.is_empty());
    }

    #[test]
    fn page_past_the_end_is_invalid() {
        assert!(matches!(
            Paginated::<i32>::new(vec![], 3, 2, 10),
            Err(InvalidPage)
        ));
        assert!(matches!(
            Paginated::<i32>::new(vec![], 0, 2, 10),
            Err(InvalidPage)
        ));
    }
}
