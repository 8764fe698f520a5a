//! Trait definitions for collaborators supplied by the presentation layer

mod confirm;

pub use confirm::Confirm;
pub use vephar_rpc::KvRpc;
