//! Vephar Core Library
//!
//! Client-side state and controllers for browsing and editing a Vephar
//! key/value node:
//! - Global store with an advisory UI lock and user-facing messages
//! - Key listing with prefix search and cursor pagination
//! - Key editor for text and binary values
//! - Raft status and cluster membership
//!
//! The transport and the confirmation dialog are injected through traits, so
//! any presentation layer can drive a [`Session`].

pub mod config;
pub mod error;
pub mod message;
pub mod services;
pub mod session;
pub mod store;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::ClientConfig;
pub use error::{CoreError, CoreResult};
pub use message::{EditIntent, Intent, ListIntent, StatusIntent};
pub use services::ServiceContext;
pub use session::Session;
pub use store::{Action, AppState, Store};
pub use traits::{Confirm, KvRpc};
