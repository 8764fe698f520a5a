//! Key edit buffer types

use std::fmt;

use serde::{Deserialize, Serialize};
use vephar_rpc::FileBlob;

/// Name pre-filled when creating a key.
pub const DEFAULT_NEW_KEY_NAME: &str = "New-key";

/// Which input the editor shows. Purely presentational: what gets saved is
/// decided by [`EditValue`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    #[default]
    Text,
    Binary,
}

impl ContentKind {
    pub const ALL: [Self; 2] = [Self::Text, Self::Binary];
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "Text"),
            Self::Binary => write!(f, "Binary"),
        }
    }
}

/// Pending content of the buffer; text and file can never coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditValue {
    #[default]
    Empty,
    Text(String),
    File(FileBlob),
}

/// Unsaved metadata and content of one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEditBuffer {
    key_name: String,
    name_editable: bool,
    content_kind: ContentKind,
    value: EditValue,
}

impl KeyEditBuffer {
    /// Buffer for a key that does not exist yet.
    pub fn for_new_key() -> Self {
        Self {
            key_name: DEFAULT_NEW_KEY_NAME.to_string(),
            name_editable: true,
            content_kind: ContentKind::Text,
            value: EditValue::Empty,
        }
    }

    /// Buffer for an existing key; the name is locked and content starts empty.
    pub fn for_existing_key(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            name_editable: false,
            content_kind: ContentKind::Text,
            value: EditValue::Empty,
        }
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn name_editable(&self) -> bool {
        self.name_editable
    }

    pub fn content_kind(&self) -> ContentKind {
        self.content_kind
    }

    pub fn value(&self) -> &EditValue {
        &self.value
    }

    pub fn text_value(&self) -> Option<&str> {
        match &self.value {
            EditValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn file_value(&self) -> Option<&FileBlob> {
        match &self.value {
            EditValue::File(file) => Some(file),
            _ => None,
        }
    }

    pub(crate) fn set_key_name(&mut self, name: String) {
        self.key_name = name;
    }

    /// Switch the selector, dropping any value of the other kind.
    pub fn set_content_kind(&mut self, kind: ContentKind) {
        self.content_kind = kind;
        let keep = matches!(
            (&self.value, kind),
            (EditValue::Empty, _)
                | (EditValue::Text(_), ContentKind::Text)
                | (EditValue::File(_), ContentKind::Binary)
        );
        if !keep {
            self.value = EditValue::Empty;
        }
    }

    /// Replace the value with text, whatever the selected kind.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.value = EditValue::Text(text.into());
    }

    /// Replace the value with a file, whatever the selected kind.
    pub fn set_file(&mut self, file: FileBlob) {
        self.value = EditValue::File(file);
    }

    /// A non-empty text or a file is present.
    pub fn can_save(&self) -> bool {
        match &self.value {
            EditValue::Empty => false,
            EditValue::Text(text) => !text.is_empty(),
            EditValue::File(_) => true,
        }
    }
}

/// Lifecycle of the key editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EditState {
    #[default]
    Closed,
    /// New key, name editable.
    Creating,
    /// Existing key, name locked.
    Editing,
    /// Save request in flight.
    Saving,
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Creating => write!(f, "creating"),
            Self::Editing => write!(f, "editing"),
            Self::Saving => write!(f, "saving"),
        }
    }
}
