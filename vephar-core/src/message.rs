//! User intents
//!
//! Everything the presentation layer can ask of a [`Session`](crate::Session)
//! is one of these. Intents are grouped by the controller that handles them,
//! the same way the view groups its widgets.

use crate::types::{ContentKind, FileBlob, PageSize};

/// Top-level intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Key listing
    List(ListIntent),
    /// Key editor
    Edit(EditIntent),
    /// Status page
    Status(StatusIntent),
    /// The pending message has been shown; clear it
    DismissMessage,
}

/// Key listing intents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListIntent {
    /// Keystroke in the search box
    SetSearchTerm(String),
    /// Search submitted
    CommitSearch(String),
    /// Page size selector changed
    SetPageSize(PageSize),
    /// Fetch the next page
    LoadMore,
    /// Delete a key (asks for confirmation)
    DeleteKey(String),
}

/// Key editor intents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditIntent {
    BeginCreate,
    BeginEdit(String),
    SetName(String),
    SetContentKind(ContentKind),
    SetText(String),
    SetFile(FileBlob),
    /// Store the buffer (asks for confirmation)
    Save,
    Cancel,
}

/// Status page intents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusIntent {
    /// Page opened; fetch the status
    Open,
    JoinPeer(String),
    LeavePeer(String),
}

impl Intent {
    /// Whether handling the intent starts a request to the node.
    pub fn is_remote(&self) -> bool {
        match self {
            Self::List(intent) => matches!(
                intent,
                ListIntent::CommitSearch(_) | ListIntent::LoadMore | ListIntent::DeleteKey(_)
            ),
            Self::Edit(intent) => matches!(intent, EditIntent::Save),
            Self::Status(_) => true,
            Self::DismissMessage => false,
        }
    }
}

impl From<ListIntent> for Intent {
    fn from(intent: ListIntent) -> Self {
        Self::List(intent)
    }
}

impl From<EditIntent> for Intent {
    fn from(intent: EditIntent) -> Self {
        Self::Edit(intent)
    }
}

impl From<StatusIntent> for Intent {
    fn from(intent: StatusIntent) -> Self {
        Self::Status(intent)
    }
}
