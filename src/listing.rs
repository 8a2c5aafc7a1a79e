//! Paginated Lists
//!
//! State behind "load more" grids: a 1-based page cursor, the filter the
//! pages were fetched with, and the accumulated items.
//!
//! Every `reset` bumps a generation number carried by the request, so a
//! response for an old filter that arrives late is dropped instead of being
//! mixed into the new list.

use std::collections::HashSet;

use crate::models::{Artwork, BlogPost, Page};

/// Items with a stable backend id
pub trait Keyed {
    fn key(&self) -> i64;
}

impl Keyed for Artwork {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for BlogPost {
    fn key(&self) -> i64 {
        self.id
    }
}

/// Parameters for one page fetch
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest<F> {
    pub filter: F,
    /// 1-based
    pub page: u32,
    pub size: u32,
    generation: u64,
}

impl<F> PageRequest<F> {
    /// Zero-based index sent to the server
    pub fn page_index(&self) -> u32 {
        self.page.saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T, F> {
    items: Vec<T>,
    filter: F,
    page: u32,
    page_size: u32,
    has_more: bool,
    loading: bool,
    generation: u64,
}

impl<T: Keyed + Clone, F: Clone + PartialEq> Listing<T, F> {
    pub fn new(filter: F, page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            filter,
            page: 0,
            page_size,
            has_more: false,
            loading: false,
            generation: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Nothing loaded yet for the current filter
    pub fn is_initial(&self) -> bool {
        self.page == 0
    }

    /// Start over with `filter` from page 1
    pub fn reset(&mut self, filter: F) -> PageRequest<F> {
        self.generation += 1;
        self.filter = filter;
        self.items.clear();
        self.page = 0;
        self.has_more = false;
        self.loading = true;
        self.request(1)
    }

    /// Request for the page after the last applied one
    pub fn next_page(&mut self) -> Option<PageRequest<F>> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        Some(self.request(self.page + 1))
    }

    fn request(&self, page: u32) -> PageRequest<F> {
        PageRequest {
            filter: self.filter.clone(),
            page,
            size: self.page_size,
            generation: self.generation,
        }
    }

    fn is_current(&self, request: &PageRequest<F>) -> bool {
        request.generation == self.generation && request.filter == self.filter
    }

    /// Merge a fetched page. Returns false when the response is stale.
    pub fn apply(&mut self, request: &PageRequest<F>, page: Page<T>) -> bool {
        if !self.is_current(request) {
            return false;
        }
        self.has_more = page.has_more(request.size);
        if request.page <= 1 {
            self.items = page.content;
        } else {
            let mut seen: HashSet<i64> = self.items.iter().map(|item| item.key()).collect();
            self.items.extend(page.content.into_iter().filter(|item| seen.insert(item.key())));
        }
        self.page = request.page;
        self.loading = false;
        true
    }

    pub fn fail(&mut self, request: &PageRequest<F>) {
        if self.is_current(request) {
            self.loading = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(i64);

    impl Keyed for Row {
        fn key(&self) -> i64 {
            self.0
        }
    }

    fn page(ids: &[i64], last: bool) -> Page<Row> {
        Page {
            content: ids.iter().copied().map(Row).collect(),
            page: 0,
            size: 3,
            total_elements: 0,
            total_pages: 0,
            last: Some(last),
        }
    }

    fn ids(listing: &Listing<Row, &'static str>) -> Vec<i64> {
        listing.items().iter().map(|r| r.0).collect()
    }

    #[test]
    fn test_load_more_appends_in_order() {
        let mut listing = Listing::new("all", 3);
        let first = listing.reset("all");
        assert_eq!(first.page, 1);
        assert_eq!(first.page_index(), 0);
        assert!(listing.apply(&first, page(&[1, 2, 3], false)));

        let second = listing.next_page().unwrap();
        assert_eq!(second.page, 2);
        assert!(listing.apply(&second, page(&[4, 5, 6], true)));

        assert_eq!(ids(&listing), vec![1, 2, 3, 4, 5, 6]);
        assert!(!listing.has_more());
        assert!(listing.next_page().is_none());
    }

    #[test]
    fn test_load_more_skips_duplicates() {
        let mut listing = Listing::new("all", 3);
        let first = listing.reset("all");
        listing.apply(&first, page(&[1, 2, 3], false));
        // an insert on the server shifted item 3 onto page 2
        let second = listing.next_page().unwrap();
        listing.apply(&second, page(&[3, 4, 5], false));
        assert_eq!(ids(&listing), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_filter_change_replaces_items() {
        let mut listing = Listing::new("BLOG", 3);
        let first = listing.reset("BLOG");
        listing.apply(&first, page(&[1, 2, 3], false));

        let news = listing.reset("NEWS");
        assert!(listing.items().is_empty());
        listing.apply(&news, page(&[10, 11], true));
        assert_eq!(ids(&listing), vec![10, 11]);
        assert_eq!(*listing.filter(), "NEWS");
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut listing = Listing::new("BLOG", 3);
        let old = listing.reset("BLOG");
        let new = listing.reset("NEWS");

        assert!(!listing.apply(&old, page(&[1, 2, 3], false)));
        assert!(listing.items().is_empty());
        assert!(listing.is_loading());

        assert!(listing.apply(&new, page(&[7], true)));
        assert_eq!(ids(&listing), vec![7]);
    }

    #[test]
    fn test_next_page_blocked_while_loading() {
        let mut listing = Listing::new("all", 3);
        let first = listing.reset("all");
        assert!(listing.next_page().is_none());
        listing.apply(&first, page(&[1, 2, 3], false));
        let second = listing.next_page().unwrap();
        assert!(listing.next_page().is_none());

        listing.fail(&second);
        assert!(!listing.is_loading());
        assert_eq!(listing.next_page().map(|r| r.page), Some(2));
    }

    #[test]
    fn test_reset_without_fetch_discards_later_pages() {
        // owner pages through the journal, then signs out mid-request
        let mut listing = Listing::new("STUDIO", 3);
        let first = listing.reset("STUDIO");
        listing.apply(&first, page(&[1, 2, 3], false));
        let second = listing.next_page().unwrap();

        let cleared = listing.reset("STUDIO");
        listing.fail(&cleared);

        assert!(!listing.apply(&second, page(&[4, 5, 6], false)));
        assert!(listing.items().is_empty());
        assert!(!listing.has_more());
        assert!(!listing.is_loading());
    }
}
