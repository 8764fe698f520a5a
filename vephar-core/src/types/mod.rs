//! Type definitions module

mod key_edit;
mod key_page;

pub use key_edit::{ContentKind, DEFAULT_NEW_KEY_NAME, EditState, EditValue, KeyEditBuffer};
pub use key_page::KeyPageState;

// Re-export wire types from the rpc crate
pub use vephar_rpc::{FileBlob, KeyPage, PageSize, StatusRecord};
