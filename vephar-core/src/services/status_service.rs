//! Raft status service

use std::sync::Arc;

use vephar_rpc::routes::{RAFT_JOIN, RAFT_LEAVE, RAFT_STATUS};
use vephar_rpc::RpcResponse;

use crate::error::{CoreResult, RpcError};
use crate::services::{surface_failure, ServiceContext};
use crate::store::Store;
use crate::types::StatusRecord;

/// Label and record field of each row of the status table, in display order.
pub const STATUS_ROWS: [(&str, &str); 8] = [
    ("Applied index", "applied_index"),
    ("Commit index", "commit_index"),
    ("Last contact", "last_contact"),
    ("Latest configuration", "latest_configuration"),
    ("Peers", "num_peers"),
    ("Protocol version", "protocol_version"),
    ("State", "state"),
    ("Term", "term"),
];

/// One rendered row of the status table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub label: &'static str,
    /// Empty when the node did not report the field.
    pub value: String,
}

/// Loads node status into the store and manages cluster membership
pub struct StatusService {
    ctx: Arc<ServiceContext>,
}

impl StatusService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Fetch the node status into the store snapshot.
    ///
    /// On failure the previous snapshot is kept.
    pub async fn activate(&self, store: &mut Store) -> CoreResult<()> {
        let result = self.locked_status_call(store, RAFT_STATUS, async {
            self.ctx.rpc.status().await
        });
        result.await.map_err(|e| surface_failure(store, "Load status", e))
    }

    /// Add `peer_id` as a voter; the reply's status replaces the snapshot.
    pub async fn join_peer(&self, store: &mut Store, peer_id: &str) -> CoreResult<()> {
        log::info!("Requesting join of peer {peer_id:?}");
        let result = self.locked_status_call(store, RAFT_JOIN, async {
            self.ctx.rpc.raft_join(peer_id).await
        });
        result.await.map_err(|e| surface_failure(store, "Join peer", e))
    }

    /// Remove `peer_id` from the cluster; the reply's status replaces the snapshot.
    pub async fn leave_peer(&self, store: &mut Store, peer_id: &str) -> CoreResult<()> {
        log::info!("Requesting removal of peer {peer_id:?}");
        let result = self.locked_status_call(store, RAFT_LEAVE, async {
            self.ctx.rpc.raft_leave(peer_id).await
        });
        result.await.map_err(|e| surface_failure(store, "Leave peer", e))
    }

    /// Rows of the status table for `record`, in display order.
    pub fn rows(record: &StatusRecord) -> Vec<StatusRow> {
        STATUS_ROWS
            .iter()
            .map(|&(label, field)| StatusRow {
                label,
                value: record.get(field).unwrap_or_default(),
            })
            .collect()
    }

    async fn locked_status_call(
        &self,
        store: &mut Store,
        endpoint: &str,
        call: impl Future<Output = Result<RpcResponse<StatusRecord>, RpcError>>,
    ) -> Result<(), RpcError> {
        store.lock_ui(true);
        let result = call.await.and_then(|resp| resp.into_data(endpoint));
        let result = result.map(|record| {
            log::debug!("Status from {endpoint}: {} fields", record.len());
            store.status_loaded(record);
        });
        store.lock_ui(false);
        result
    }
}
