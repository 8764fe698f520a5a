//! Key listing page state

use vephar_rpc::{KeyPage, PageSize};

/// Keys loaded so far for the current search, plus where to continue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPageState {
    /// Keys in the order the server returned them.
    pub keys: Vec<String>,
    /// Continuation cursor; empty when there are no further pages.
    pub next_cursor: String,
    pub page_size: PageSize,
}

impl KeyPageState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Whether `load_more` has anything to fetch.
    pub fn has_more(&self) -> bool {
        !self.next_cursor.is_empty()
    }

    /// Result of a fresh search: replace the keys.
    pub fn replace(&mut self, page: KeyPage, requested: PageSize) {
        self.keys = page.keys;
        self.take_paging(page.next_key, page.page_size, requested);
    }

    /// Result of a continuation: append after the existing keys.
    pub fn append(&mut self, page: KeyPage, requested: PageSize) {
        self.keys.extend(page.keys);
        self.take_paging(page.next_key, page.page_size, requested);
    }

    fn take_paging(&mut self, next_cursor: String, served: u16, requested: PageSize) {
        self.next_cursor = next_cursor;
        self.page_size = PageSize::try_from(served).unwrap_or_else(|e| {
            log::warn!("Server returned {e}, keeping {requested}");
            requested
        });
    }

    /// Remove the first occurrence of `key`, keeping the order of the rest.
    pub fn remove_key(&mut self, key: &str) -> bool {
        if let Some(pos) = self.keys.iter().position(|k| k == key) {
            self.keys.remove(pos);
            true
        } else {
            false
        }
    }
}
