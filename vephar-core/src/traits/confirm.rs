//! User confirmation trait

use async_trait::async_trait;

/// Yes/no question put to the user before a destructive or persistent action.
///
/// Implemented by the presentation layer (a modal dialog, a terminal prompt).
#[async_trait]
pub trait Confirm: Send + Sync {
    /// Ask `prompt`; `true` means the user agreed.
    async fn confirm(&self, prompt: &str) -> bool;
}
