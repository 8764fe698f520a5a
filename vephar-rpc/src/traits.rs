use async_trait::async_trait;

use crate::error::Result;
use crate::types::{FileBlob, KeyPage, PageSize, RpcResponse, StatusRecord};

/// Typed RPC surface of a Vephar node.
///
/// Envelope-returning methods hand back the decoded `{Data, Error}` envelope
/// untouched: an `Err` means the call itself failed (network, non-2xx,
/// undecodable body), while a server-side rejection arrives as `Ok` with
/// `error` set. Use [`RpcResponse::into_data`] to fold both into one `Result`.
#[async_trait]
pub trait KvRpc: Send + Sync {
    /// Point-in-time Raft statistics.
    async fn status(&self) -> Result<RpcResponse<StatusRecord>>;

    /// One page of keys starting with `prefix`.
    ///
    /// An empty `offset` starts from the first matching key; otherwise it is
    /// the `next_key` of the previous page.
    async fn list_keys(
        &self,
        prefix: &str,
        offset: &str,
        page_size: PageSize,
    ) -> Result<RpcResponse<KeyPage>>;

    /// Store `text` under `key` as `text/plain`.
    async fn set_text(&self, key: &str, text: &str) -> Result<RpcResponse<String>>;

    /// Store the file bytes under `key` with the file's media type.
    async fn set_binary(&self, key: &str, file: &FileBlob) -> Result<RpcResponse<String>>;

    /// Delete `key`.
    async fn delete_key(&self, key: &str) -> Result<RpcResponse<String>>;

    /// Raw stored value of `key` (not enveloped).
    async fn get_value(&self, key: &str) -> Result<Vec<u8>>;

    /// Ask the node to add `peer_id` as a voter.
    async fn raft_join(&self, peer_id: &str) -> Result<RpcResponse<StatusRecord>>;

    /// Ask the node to remove `peer_id` from the cluster.
    async fn raft_leave(&self, peer_id: &str) -> Result<RpcResponse<StatusRecord>>;
}
