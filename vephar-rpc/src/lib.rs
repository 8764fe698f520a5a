//! # vephar-rpc
//!
//! Typed client for the JSON/HTTP RPC surface of a Vephar node (a Raft-backed
//! key/value store).
//!
//! ## Endpoints
//!
//! | Operation | Method | Path | Body | Data |
//! |-----------|--------|------|------|------|
//! | [`status`](KvRpc::status) | GET | `/raft/status` | - | [`StatusRecord`] |
//! | [`list_keys`](KvRpc::list_keys) | GET | `/kv/list?prefix=&offset=&pageSize=` | - | [`KeyPage`] |
//! | [`set_text`](KvRpc::set_text) | POST | `/kv/set?key=` | `text/plain` | key echo |
//! | [`set_binary`](KvRpc::set_binary) | POST | `/kv/set?key=` | file media type | key echo |
//! | [`delete_key`](KvRpc::delete_key) | GET | `/kv/del?key=` | - | key echo |
//! | [`get_value`](KvRpc::get_value) | GET | `/kv/get?key=` | - | raw bytes |
//! | [`raft_join`](KvRpc::raft_join) | GET | `/raft/join?peerId=` | - | [`StatusRecord`] |
//! | [`raft_leave`](KvRpc::raft_leave) | GET | `/raft/leave?peerId=` | - | [`StatusRecord`] |
//!
//! Every JSON endpoint answers with a `{"Data": ..., "Error": "..."}`
//! envelope, decoded into [`RpcResponse`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vephar_rpc::{KvRpc, PageSize, VepharClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VepharClient::new("http://127.0.0.1:8080")?;
//!
//!     let page = client
//!         .list_keys("user-", "", PageSize::Ten)
//!         .await?
//!         .into_data(vephar_rpc::routes::KV_LIST)?;
//!     for key in &page.keys {
//!         println!("{key}");
//!     }
//!     if page.has_more() {
//!         println!("next page starts at {}", page.next_key);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Transport failures (network, timeout, non-2xx, undecodable body) are
//! returned as `Err(`[`RpcError`]`)`. A decoded envelope whose `Error` is set
//! is returned as `Ok`; [`RpcResponse::into_data`] turns it into
//! [`RpcError::Remote`]. Nothing is retried.

mod client;
mod error;
mod http_client;
pub mod routes;
mod traits;
mod types;
mod utils;

#[cfg(test)]
mod test_utils;

pub use client::VepharClient;
pub use error::{Result, RpcError};
pub use http_client::{
    APPLICATION_JSON, HttpTransport, RequestBody, TEXT_PLAIN, TransportSettings, parse_json,
};
pub use traits::KvRpc;
pub use types::{DEFAULT_MEDIA_TYPE, FileBlob, KeyPage, PageSize, RpcResponse, StatusRecord};
pub use utils::log_sanitizer;
pub use utils::query::{QueryParams, build_url};

// Re-exported so callers can name request methods without depending on reqwest.
pub use reqwest::Method;
