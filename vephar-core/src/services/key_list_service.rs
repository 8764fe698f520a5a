//! Key listing service

use std::sync::Arc;

use vephar_rpc::routes::{KV_DEL, KV_LIST};

use crate::error::CoreResult;
use crate::services::{surface_failure, ServiceContext};
use crate::store::Store;
use crate::types::{KeyPageState, PageSize};

/// Search term plus the keys loaded for it
pub struct KeyListService {
    ctx: Arc<ServiceContext>,
    search_term: String,
    page: KeyPageState,
}

impl KeyListService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, page_size: PageSize) -> Self {
        Self {
            ctx,
            search_term: String::new(),
            page: KeyPageState::new(page_size),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn page(&self) -> &KeyPageState {
        &self.page
    }

    /// Fetch one page of keys under `prefix`.
    ///
    /// An empty `cursor` replaces the loaded keys, a non-empty one appends to
    /// them. On failure the page is left as it was.
    pub async fn search(
        &mut self,
        store: &mut Store,
        prefix: &str,
        cursor: &str,
        page_size: PageSize,
    ) -> CoreResult<()> {
        store.lock_ui(true);

        let result = self
            .ctx
            .rpc
            .list_keys(prefix, cursor, page_size)
            .await
            .and_then(|resp| resp.into_data(KV_LIST));

        let result = result.map(|served| {
            log::debug!(
                "Listed {} keys under {prefix:?} (cursor {cursor:?}), next {:?}",
                served.keys.len(),
                served.next_key
            );
            if cursor.is_empty() {
                self.page.replace(served, page_size);
            } else {
                self.page.append(served, page_size);
            }
        });

        store.lock_ui(false);
        result.map_err(|e| surface_failure(store, "List keys", e))
    }

    /// Keystroke in the search box; no request.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Start a fresh search for `term` from the first matching key.
    pub async fn commit_search_term(
        &mut self,
        store: &mut Store,
        term: impl Into<String>,
    ) -> CoreResult<()> {
        self.search_term = term.into();
        self.page.keys.clear();
        self.page.next_cursor.clear();

        let term = self.search_term.clone();
        let page_size = self.page.page_size;
        self.search(store, &term, "", page_size).await
    }

    /// Page size for the next request; takes effect on the next search.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.page.page_size = size;
    }

    /// Fetch the continuation of the current search.
    ///
    /// Returns `Ok(false)` without touching the lock or the network when the
    /// last page has been reached.
    pub async fn load_more(&mut self, store: &mut Store) -> CoreResult<bool> {
        if !self.page.has_more() {
            log::debug!("No further keys for {:?}", self.search_term);
            return Ok(false);
        }

        let term = self.search_term.clone();
        let cursor = self.page.next_cursor.clone();
        let page_size = self.page.page_size;
        self.search(store, &term, &cursor, page_size).await?;
        Ok(true)
    }

    /// Delete `key` after confirmation.
    ///
    /// Returns `Ok(false)` when the user declines. On success the first
    /// occurrence of `key` is removed from the loaded keys.
    pub async fn delete_key(&mut self, store: &mut Store, key: &str) -> CoreResult<bool> {
        let prompt = format!("Delete this key and its data?\n[{key}]");
        if !self.ctx.confirm.confirm(&prompt).await {
            log::debug!("Delete of {key:?} declined");
            return Ok(false);
        }

        store.lock_ui(true);

        let result = self
            .ctx
            .rpc
            .delete_key(key)
            .await
            .and_then(|resp| resp.into_ack(KV_DEL));

        let result = result.map(|()| {
            if !self.page.remove_key(key) {
                log::debug!("Deleted key {key:?} was not in the loaded page");
            }
        });

        store.lock_ui(false);
        result.map_err(|e| surface_failure(store, "Delete key", e))?;
        log::info!("Deleted key {key:?}");
        Ok(true)
    }
}
