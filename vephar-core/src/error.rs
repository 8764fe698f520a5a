//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use vephar_rpc::RpcError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Transport failure or server-side rejection
    #[error("{0}")]
    Rpc(#[from] RpcError),

    /// An edit operation was issued in a state that does not allow it
    #[error("Cannot {action} while the editor is {state}")]
    InvalidTransition { action: String, state: String },

    /// Rename attempted on a key whose name is locked
    #[error("Key name is locked: {0}")]
    NameLocked(String),

    /// Save attempted without a text or file value
    #[error("Nothing to save for key: {0}")]
    NothingToSave(String),

    /// A remote operation was requested while the UI lock is held
    #[error("UI is locked, request ignored")]
    UiLocked,

    /// Configuration could not be read or written
    #[error("Config error: {0}")]
    ConfigError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, server-side rejection), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidTransition { .. }
            | Self::NameLocked(_)
            | Self::NothingToSave(_)
            | Self::UiLocked => true,
            Self::Rpc(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
