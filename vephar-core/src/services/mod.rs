//! Controllers driving the remote store
//!
//! Every controller operation that talks to the node follows the same shape:
//! raise the UI lock, await the transport, apply the result to local state,
//! release the lock. Failures are logged, surfaced to the user as a message
//! and returned to the caller; the lock is released on every path.

mod key_edit_service;
mod key_list_service;
mod status_service;

pub use key_edit_service::KeyEditService;
pub use key_list_service::KeyListService;
pub use status_service::{StatusRow, StatusService, STATUS_ROWS};

use std::sync::Arc;

use crate::error::CoreError;
use crate::store::Store;
use crate::traits::{Confirm, KvRpc};

/// Service context - holds the collaborators shared by all controllers
///
/// The presentation layer creates it with a transport and a confirmation
/// dialog implementation.
pub struct ServiceContext {
    /// Transport to the node
    pub rpc: Arc<dyn KvRpc>,
    /// Yes/no prompt shown before destructive or persisting operations
    pub confirm: Arc<dyn Confirm>,
}

impl ServiceContext {
    #[must_use]
    pub fn new(rpc: Arc<dyn KvRpc>, confirm: Arc<dyn Confirm>) -> Self {
        Self { rpc, confirm }
    }
}

/// Log a failed operation at a level matching its cause and post it as the
/// user-facing message.
pub(crate) fn surface_failure(
    store: &mut Store,
    operation: &str,
    err: impl Into<CoreError>,
) -> CoreError {
    let err = err.into();
    if err.is_expected() {
        log::warn!("{operation} failed: {err}");
    } else {
        log::error!("{operation} failed: {err}");
    }
    store.post_message(err.to_string());
    err
}
