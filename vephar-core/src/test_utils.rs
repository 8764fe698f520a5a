//! Test helpers
//!
//! Scripted transport, fixed confirmation answers and a lock recorder.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::RwLock;
use vephar_rpc::{FileBlob, KeyPage, PageSize, Result, RpcError, RpcResponse, StatusRecord};

use crate::store::Store;
use crate::traits::{Confirm, KvRpc};

// ===== MockKvRpc =====

/// One call received by [`MockKvRpc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcCall {
    Status,
    ListKeys {
        prefix: String,
        offset: String,
        page_size: PageSize,
    },
    SetText {
        key: String,
        text: String,
    },
    SetBinary {
        key: String,
        file: FileBlob,
    },
    DeleteKey {
        key: String,
    },
    GetValue {
        key: String,
    },
    RaftJoin {
        peer_id: String,
    },
    RaftLeave {
        peer_id: String,
    },
}

type Script<T> = RwLock<VecDeque<Result<T>>>;

/// Transport answering from per-operation queues. An exhausted queue
/// answers with a network error.
pub struct MockKvRpc {
    calls: RwLock<Vec<RpcCall>>,
    status: Script<RpcResponse<StatusRecord>>,
    list: Script<RpcResponse<KeyPage>>,
    set: Script<RpcResponse<String>>,
    delete: Script<RpcResponse<String>>,
    get: Script<Vec<u8>>,
    membership: Script<RpcResponse<StatusRecord>>,
}

impl MockKvRpc {
    pub fn new() -> Self {
        Self {
            calls: RwLock::new(Vec::new()),
            status: RwLock::new(VecDeque::new()),
            list: RwLock::new(VecDeque::new()),
            set: RwLock::new(VecDeque::new()),
            delete: RwLock::new(VecDeque::new()),
            get: RwLock::new(VecDeque::new()),
            membership: RwLock::new(VecDeque::new()),
        }
    }

    pub async fn calls(&self) -> Vec<RpcCall> {
        self.calls.read().await.clone()
    }

    pub async fn push_status(&self, response: Result<RpcResponse<StatusRecord>>) {
        self.status.write().await.push_back(response);
    }

    pub async fn push_list(&self, response: Result<RpcResponse<KeyPage>>) {
        self.list.write().await.push_back(response);
    }

    /// Answer for the next `set_text` or `set_binary`.
    pub async fn push_set(&self, response: Result<RpcResponse<String>>) {
        self.set.write().await.push_back(response);
    }

    pub async fn push_delete(&self, response: Result<RpcResponse<String>>) {
        self.delete.write().await.push_back(response);
    }

    pub async fn push_get(&self, response: Result<Vec<u8>>) {
        self.get.write().await.push_back(response);
    }

    /// Answer for the next `raft_join` or `raft_leave`.
    pub async fn push_membership(&self, response: Result<RpcResponse<StatusRecord>>) {
        self.membership.write().await.push_back(response);
    }

    async fn answer<T>(&self, call: RpcCall, script: &Script<T>) -> Result<T> {
        let endpoint = format!("{call:?}");
        self.calls.write().await.push(call);
        script
            .write()
            .await
            .pop_front()
            .unwrap_or_else(|| {
                Err(RpcError::NetworkError {
                    endpoint,
                    detail: "no scripted response".to_string(),
                })
            })
    }
}

#[async_trait]
impl KvRpc for MockKvRpc {
    async fn status(&self) -> Result<RpcResponse<StatusRecord>> {
        self.answer(RpcCall::Status, &self.status).await
    }

    async fn list_keys(
        &self,
        prefix: &str,
        offset: &str,
        page_size: PageSize,
    ) -> Result<RpcResponse<KeyPage>> {
        let call = RpcCall::ListKeys {
            prefix: prefix.to_string(),
            offset: offset.to_string(),
            page_size,
        };
        self.answer(call, &self.list).await
    }

    async fn set_text(&self, key: &str, text: &str) -> Result<RpcResponse<String>> {
        let call = RpcCall::SetText {
            key: key.to_string(),
            text: text.to_string(),
        };
        self.answer(call, &self.set).await
    }

    async fn set_binary(&self, key: &str, file: &FileBlob) -> Result<RpcResponse<String>> {
        let call = RpcCall::SetBinary {
            key: key.to_string(),
            file: file.clone(),
        };
        self.answer(call, &self.set).await
    }

    async fn delete_key(&self, key: &str) -> Result<RpcResponse<String>> {
        let call = RpcCall::DeleteKey {
            key: key.to_string(),
        };
        self.answer(call, &self.delete).await
    }

    async fn get_value(&self, key: &str) -> Result<Vec<u8>> {
        let call = RpcCall::GetValue {
            key: key.to_string(),
        };
        self.answer(call, &self.get).await
    }

    async fn raft_join(&self, peer_id: &str) -> Result<RpcResponse<StatusRecord>> {
        let call = RpcCall::RaftJoin {
            peer_id: peer_id.to_string(),
        };
        self.answer(call, &self.membership).await
    }

    async fn raft_leave(&self, peer_id: &str) -> Result<RpcResponse<StatusRecord>> {
        let call = RpcCall::RaftLeave {
            peer_id: peer_id.to_string(),
        };
        self.answer(call, &self.membership).await
    }
}

// ===== StaticConfirm =====

/// Confirmation dialog that always gives the same answer.
pub struct StaticConfirm {
    answer: bool,
}

impl StaticConfirm {
    pub fn new(answer: bool) -> Self {
        Self { answer }
    }
}

#[async_trait]
impl Confirm for StaticConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.answer
    }
}

// ===== Lock recorder =====

/// Record every change of `ui_locked` from now on.
pub fn record_locks(store: &mut Store) -> Arc<Mutex<Vec<bool>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut last = store.is_locked();
    store.subscribe(move |state| {
        if state.ui_locked != last {
            last = state.ui_locked;
            sink.lock().unwrap().push(last);
        }
    });
    seen
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_in_order_then_fails() {
        let rpc = MockKvRpc::new();
        rpc.push_get(Ok(b"v1".to_vec())).await;

        assert_eq!(rpc.get_value("k").await.unwrap(), b"v1");
        assert!(matches!(
            rpc.get_value("k").await,
            Err(RpcError::NetworkError { .. })
        ));
        assert_eq!(
            rpc.calls().await,
            vec![
                RpcCall::GetValue {
                    key: "k".to_string()
                };
                2
            ]
        );
    }
}
