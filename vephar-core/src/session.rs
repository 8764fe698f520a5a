//! Session: the single entry point of the presentation layer
//!
//! Owns the store and the controllers. Intents that would start a request
//! are refused while the UI lock is held; local intents always apply.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::{CoreError, CoreResult};
use crate::message::{EditIntent, Intent, ListIntent, StatusIntent};
use crate::services::{KeyEditService, KeyListService, ServiceContext, StatusRow, StatusService};
use crate::store::{AppState, Store};
use crate::traits::{Confirm, KvRpc};
use crate::types::PageSize;

pub struct Session {
    store: Store,
    listing: KeyListService,
    editor: KeyEditService,
    status: StatusService,
}

impl Session {
    /// Session with the default page size.
    pub fn new(rpc: Arc<dyn KvRpc>, confirm: Arc<dyn Confirm>) -> Self {
        Self::with_page_size(rpc, confirm, PageSize::default())
    }

    pub fn with_page_size(
        rpc: Arc<dyn KvRpc>,
        confirm: Arc<dyn Confirm>,
        page_size: PageSize,
    ) -> Self {
        let ctx = Arc::new(ServiceContext::new(rpc, confirm));
        Self {
            store: Store::new(),
            listing: KeyListService::new(Arc::clone(&ctx), page_size),
            editor: KeyEditService::new(Arc::clone(&ctx)),
            status: StatusService::new(ctx),
        }
    }

    /// Session talking to the node named in `config`.
    pub fn from_config(config: &ClientConfig, confirm: Arc<dyn Confirm>) -> CoreResult<Self> {
        let client = config.connect()?;
        log::info!("Connecting to {}", config.base_url);
        Ok(Self::with_page_size(
            Arc::new(client),
            confirm,
            config.default_page_size,
        ))
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Store access for subscribing observers.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn listing(&self) -> &KeyListService {
        &self.listing
    }

    pub fn editor(&self) -> &KeyEditService {
        &self.editor
    }

    /// Rows of the status table for the current snapshot, if any.
    pub fn status_rows(&self) -> Option<Vec<StatusRow>> {
        self.store
            .state()
            .status_snapshot
            .as_ref()
            .map(StatusService::rows)
    }

    /// Pending message for display; clears it.
    pub fn take_message(&mut self) -> Option<String> {
        self.store.take_message()
    }

    /// Apply one intent.
    pub async fn handle(&mut self, intent: Intent) -> CoreResult<()> {
        if intent.is_remote() && self.store.is_locked() {
            log::warn!("Ignoring {intent:?}: a request is already in flight");
            return Err(CoreError::UiLocked);
        }

        match intent {
            Intent::List(intent) => self.handle_list(intent).await,
            Intent::Edit(intent) => self.handle_edit(intent).await,
            Intent::Status(intent) => self.handle_status(intent).await,
            Intent::DismissMessage => {
                self.store.clear_message();
                Ok(())
            }
        }
    }

    async fn handle_list(&mut self, intent: ListIntent) -> CoreResult<()> {
        let store = &mut self.store;
        match intent {
            ListIntent::SetSearchTerm(term) => self.listing.set_search_term(term),
            ListIntent::CommitSearch(term) => {
                self.listing.commit_search_term(store, term).await?;
            }
            ListIntent::SetPageSize(size) => self.listing.set_page_size(size),
            ListIntent::LoadMore => {
                self.listing.load_more(store).await?;
            }
            ListIntent::DeleteKey(key) => {
                self.listing.delete_key(store, &key).await?;
            }
        }
        Ok(())
    }

    async fn handle_edit(&mut self, intent: EditIntent) -> CoreResult<()> {
        match intent {
            EditIntent::BeginCreate => self.editor.begin_create(),
            EditIntent::BeginEdit(name) => self.editor.begin_edit(name),
            EditIntent::SetName(name) => self.editor.set_name(name),
            EditIntent::SetContentKind(kind) => self.editor.set_content_kind(kind),
            EditIntent::SetText(text) => self.editor.set_text(text),
            EditIntent::SetFile(file) => self.editor.set_file(file),
            EditIntent::Save => self.editor.save(&mut self.store).await.map(|_| ()),
            EditIntent::Cancel => {
                self.editor.cancel();
                Ok(())
            }
        }
    }

    async fn handle_status(&mut self, intent: StatusIntent) -> CoreResult<()> {
        let store = &mut self.store;
        match intent {
            StatusIntent::Open => self.status.activate(store).await,
            StatusIntent::JoinPeer(peer_id) => self.status.join_peer(store, &peer_id).await,
            StatusIntent::LeavePeer(peer_id) => self.status.leave_peer(store, &peer_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use vephar_rpc::{KeyPage, RpcResponse};

    use super::*;
    use crate::test_utils::{MockKvRpc, RpcCall, StaticConfirm};
    use crate::types::EditState;

    fn session() -> (Arc<MockKvRpc>, Session) {
        let rpc = Arc::new(MockKvRpc::new());
        let session = Session::new(rpc.clone(), Arc::new(StaticConfirm::new(true)));
        (rpc, session)
    }

    fn page(keys: &[&str], next: &str) -> RpcResponse<KeyPage> {
        RpcResponse::success(KeyPage {
            keys: keys.iter().map(ToString::to_string).collect(),
            next_key: next.to_string(),
            page_size: 10,
        })
    }

    #[tokio::test]
    async fn browse_then_delete() {
        let (rpc, mut session) = session();
        rpc.push_list(Ok(page(&["user-1", "user-2"], "user-3"))).await;
        rpc.push_list(Ok(page(&["user-3"], ""))).await;
        rpc.push_delete(Ok(RpcResponse::success("user-2".to_string())))
            .await;

        session
            .handle(ListIntent::CommitSearch("user-".to_string()).into())
            .await
            .unwrap();
        session.handle(ListIntent::LoadMore.into()).await.unwrap();
        session.handle(ListIntent::LoadMore.into()).await.unwrap();
        session
            .handle(ListIntent::DeleteKey("user-2".to_string()).into())
            .await
            .unwrap();

        assert_eq!(session.listing().page().keys, vec!["user-1", "user-3"]);
        assert_eq!(rpc.calls().await.len(), 3);
        assert!(!session.state().ui_locked);
    }

    #[tokio::test]
    async fn remote_intents_refused_while_locked() {
        let (rpc, mut session) = session();
        session.store_mut().lock_ui(true);

        let intents: [Intent; 4] = [
            ListIntent::CommitSearch("a".to_string()).into(),
            ListIntent::DeleteKey("a".to_string()).into(),
            EditIntent::Save.into(),
            StatusIntent::Open.into(),
        ];
        for intent in intents {
            let result = session.handle(intent).await;
            assert!(matches!(result, Err(CoreError::UiLocked)));
        }
        assert!(rpc.calls().await.is_empty());
    }

    #[tokio::test]
    async fn local_intents_apply_while_locked() {
        let (_, mut session) = session();
        session.store_mut().lock_ui(true);

        session
            .handle(ListIntent::SetSearchTerm("us".to_string()).into())
            .await
            .unwrap();
        session
            .handle(ListIntent::SetPageSize(PageSize::Hundred).into())
            .await
            .unwrap();
        session.handle(EditIntent::BeginCreate.into()).await.unwrap();
        session
            .handle(EditIntent::SetText("draft".to_string()).into())
            .await
            .unwrap();

        assert_eq!(session.listing().search_term(), "us");
        assert_eq!(session.listing().page().page_size, PageSize::Hundred);
        assert!(session.editor().can_save());
    }

    #[tokio::test]
    async fn create_and_save_key() {
        let (rpc, mut session) = session();
        rpc.push_set(Ok(RpcResponse::success("app/config".to_string())))
            .await;

        session.handle(EditIntent::BeginCreate.into()).await.unwrap();
        session
            .handle(EditIntent::SetName("app/config".to_string()).into())
            .await
            .unwrap();
        session
            .handle(EditIntent::SetText("{}".to_string()).into())
            .await
            .unwrap();
        session.handle(EditIntent::Save.into()).await.unwrap();

        assert_eq!(session.editor().state(), EditState::Closed);
        assert_eq!(
            session.take_message().as_deref(),
            Some("Key saved: [app/config]")
        );
        assert!(session.state().last_message.is_none());
        assert_eq!(
            rpc.calls().await,
            vec![RpcCall::SetText {
                key: "app/config".to_string(),
                text: "{}".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn empty_name_closes_editor() {
        let (_, mut session) = session();
        session
            .handle(EditIntent::BeginEdit("user-1".to_string()).into())
            .await
            .unwrap();
        session
            .handle(EditIntent::SetName(String::new()).into())
            .await
            .unwrap();
        assert_eq!(session.editor().state(), EditState::Closed);
    }

    #[tokio::test]
    async fn status_rows_after_open() {
        let (rpc, mut session) = session();
        assert!(session.status_rows().is_none());
        rpc.push_status(Ok(RpcResponse::success(
            [("state", "Follower"), ("term", "9")].into_iter().collect(),
        )))
        .await;

        session.handle(StatusIntent::Open.into()).await.unwrap();

        let rows = session.status_rows().unwrap();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[6].value, "Follower");
    }

    #[tokio::test]
    async fn dismiss_clears_message() {
        let (_, mut session) = session();
        session.store_mut().post_message("hello");
        session.handle(Intent::DismissMessage).await.unwrap();
        assert!(session.state().last_message.is_none());
    }

    #[tokio::test]
    async fn from_config_uses_default_page_size() {
        let config = ClientConfig {
            default_page_size: PageSize::TwentyFive,
            ..ClientConfig::default()
        };
        let session = Session::from_config(&config, Arc::new(StaticConfirm::new(true))).unwrap();
        assert_eq!(session.listing().page().page_size, PageSize::TwentyFive);
    }
}
