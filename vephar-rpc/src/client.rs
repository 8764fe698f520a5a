//! reqwest-backed [`KvRpc`] implementation.

use async_trait::async_trait;
use reqwest::Method;

use crate::error::Result;
use crate::http_client::{HttpTransport, RequestBody, TransportSettings};
use crate::routes::{
    KV_DEL, KV_GET, KV_LIST, KV_SET, P_KEY, P_OFFSET, P_PAGE_SIZE, P_PEER_ID, P_PREFIX,
    RAFT_JOIN, RAFT_LEAVE, RAFT_STATUS,
};
use crate::traits::KvRpc;
use crate::types::{FileBlob, KeyPage, PageSize, RpcResponse, StatusRecord};
use crate::utils::query::QueryParams;

/// A successful leave is answered with `410 Gone`.
const LEAVE_OK_STATUS: u16 = 410;

/// Client for one Vephar node.
#[derive(Debug, Clone)]
pub struct VepharClient {
    transport: HttpTransport,
}

impl VepharClient {
    /// Connect to `base_url` (e.g. `http://127.0.0.1:8080`) with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_settings(base_url, TransportSettings::default())
    }

    pub fn with_settings(base_url: impl Into<String>, settings: TransportSettings) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(base_url, settings)?,
        })
    }

    pub fn from_transport(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    fn key_params(key: &str) -> QueryParams {
        QueryParams::new().with(P_KEY, key)
    }

    async fn set(&self, key: &str, body: RequestBody) -> Result<RpcResponse<String>> {
        self.transport
            .request(KV_SET, &Self::key_params(key), Method::POST, body)
            .await
    }
}

#[async_trait]
impl KvRpc for VepharClient {
    async fn status(&self) -> Result<RpcResponse<StatusRecord>> {
        self.transport
            .request(RAFT_STATUS, &QueryParams::new(), Method::GET, RequestBody::None)
            .await
    }

    async fn list_keys(
        &self,
        prefix: &str,
        offset: &str,
        page_size: PageSize,
    ) -> Result<RpcResponse<KeyPage>> {
        let params = QueryParams::new()
            .with(P_PREFIX, prefix)
            .with(P_OFFSET, offset)
            .with(P_PAGE_SIZE, page_size);
        self.transport
            .request(KV_LIST, &params, Method::GET, RequestBody::None)
            .await
    }

    async fn set_text(&self, key: &str, text: &str) -> Result<RpcResponse<String>> {
        self.set(key, RequestBody::text(text)).await
    }

    async fn set_binary(&self, key: &str, file: &FileBlob) -> Result<RpcResponse<String>> {
        let body = RequestBody::raw(file.bytes.clone(), file.content_type());
        self.set(key, body).await
    }

    async fn delete_key(&self, key: &str) -> Result<RpcResponse<String>> {
        self.transport
            .request(KV_DEL, &Self::key_params(key), Method::GET, RequestBody::None)
            .await
    }

    async fn get_value(&self, key: &str) -> Result<Vec<u8>> {
        self.transport
            .request_raw(KV_GET, &Self::key_params(key), Method::GET)
            .await
    }

    async fn raft_join(&self, peer_id: &str) -> Result<RpcResponse<StatusRecord>> {
        let params = QueryParams::new().with(P_PEER_ID, peer_id);
        self.transport
            .request(RAFT_JOIN, &params, Method::GET, RequestBody::None)
            .await
    }

    async fn raft_leave(&self, peer_id: &str) -> Result<RpcResponse<StatusRecord>> {
        let params = QueryParams::new().with(P_PEER_ID, peer_id);
        self.transport
            .request_accepting(
                RAFT_LEAVE,
                &params,
                Method::GET,
                RequestBody::None,
                &[LEAVE_OK_STATUS],
            )
            .await
    }
}
