//! Server routes and their query parameter names.

use crate::utils::query::{QueryParams, build_url};

pub const RAFT_STATUS: &str = "/raft/status";
pub const RAFT_JOIN: &str = "/raft/join";
pub const RAFT_LEAVE: &str = "/raft/leave";
pub const KV_LIST: &str = "/kv/list";
pub const KV_GET: &str = "/kv/get";
pub const KV_SET: &str = "/kv/set";
pub const KV_DEL: &str = "/kv/del";

pub const P_KEY: &str = "key";
pub const P_PREFIX: &str = "prefix";
pub const P_OFFSET: &str = "offset";
pub const P_PAGE_SIZE: &str = "pageSize";
pub const P_PEER_ID: &str = "peerId";

/// Relative link to the detail view of `key`, e.g. `/kv/get?key=a%20b`.
pub fn detail_link(key: &str) -> String {
    build_url(KV_GET, &QueryParams::new().with(P_KEY, key))
}
