//! Key edit service

use std::sync::Arc;

use vephar_rpc::routes::KV_SET;

use crate::error::{CoreError, CoreResult};
use crate::services::{surface_failure, ServiceContext};
use crate::store::Store;
use crate::types::{ContentKind, EditState, FileBlob, KeyEditBuffer};

/// Editor for creating a key or replacing the value of an existing one
///
/// `Closed -> Creating | Editing -> Saving -> Closed`, with `cancel` returning
/// to `Closed` from any open state.
pub struct KeyEditService {
    ctx: Arc<ServiceContext>,
    state: EditState,
    buffer: Option<KeyEditBuffer>,
}

impl KeyEditService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            state: EditState::Closed,
            buffer: None,
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// Buffer being edited, `None` when closed.
    pub fn buffer(&self) -> Option<&KeyEditBuffer> {
        self.buffer.as_ref()
    }

    /// Open an empty buffer for a new key.
    pub fn begin_create(&mut self) -> CoreResult<()> {
        self.require_closed("create a key")?;
        self.buffer = Some(KeyEditBuffer::for_new_key());
        self.state = EditState::Creating;
        Ok(())
    }

    /// Open a buffer for the existing key `name`; the name cannot be changed.
    pub fn begin_edit(&mut self, name: impl Into<String>) -> CoreResult<()> {
        self.require_closed("edit a key")?;
        self.buffer = Some(KeyEditBuffer::for_existing_key(name));
        self.state = EditState::Editing;
        Ok(())
    }

    /// Rename the key being created. Clearing the name discards the buffer.
    pub fn set_name(&mut self, name: impl Into<String>) -> CoreResult<()> {
        let name = name.into();
        let buffer = self.open_buffer("rename the key")?;

        if name.is_empty() {
            log::debug!("Key name cleared, closing editor");
            self.cancel();
            return Ok(());
        }
        if !buffer.name_editable() {
            if buffer.key_name() == name {
                return Ok(());
            }
            return Err(CoreError::NameLocked(buffer.key_name().to_string()));
        }

        buffer.set_key_name(name);
        Ok(())
    }

    pub fn set_content_kind(&mut self, kind: ContentKind) -> CoreResult<()> {
        self.open_buffer("change the content kind")?
            .set_content_kind(kind);
        Ok(())
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> CoreResult<()> {
        self.open_buffer("set text")?.set_text(text);
        Ok(())
    }

    pub fn set_file(&mut self, file: FileBlob) -> CoreResult<()> {
        log::debug!("Attached {file:?}");
        self.open_buffer("attach a file")?.set_file(file);
        Ok(())
    }

    /// Whether an open buffer holds something to store.
    pub fn can_save(&self) -> bool {
        self.is_open() && self.buffer.as_ref().is_some_and(KeyEditBuffer::can_save)
    }

    /// Store the buffer after confirmation.
    ///
    /// Returns `Ok(false)` when the user declines. On success the editor is
    /// closed and `Key saved: [<name>]` is posted; on failure it returns to
    /// the state it was in before the save.
    pub async fn save(&mut self, store: &mut Store) -> CoreResult<bool> {
        let prior = self.state;
        let buffer = self.open_buffer("save")?;
        let key = buffer.key_name().to_string();
        if !buffer.can_save() {
            return Err(CoreError::NothingToSave(key));
        }

        let prompt = format!("Save this key and its data?\n[{key}]");
        if !self.ctx.confirm.confirm(&prompt).await {
            log::debug!("Save of {key:?} declined");
            return Ok(false);
        }

        self.state = EditState::Saving;
        store.lock_ui(true);

        let result = match self.buffer.as_ref() {
            Some(buffer) => match buffer.file_value() {
                Some(file) => self.ctx.rpc.set_binary(&key, file).await,
                None => {
                    let text = buffer.text_value().unwrap_or_default();
                    self.ctx.rpc.set_text(&key, text).await
                }
            },
            None => {
                store.lock_ui(false);
                self.state = prior;
                return Err(CoreError::NothingToSave(key));
            }
        }
        .and_then(|resp| resp.into_ack(KV_SET));

        match result {
            Ok(()) => {
                self.cancel();
                store.lock_ui(false);
                log::info!("Saved key {key:?}");
                store.post_message(format!("Key saved: [{key}]"));
                Ok(true)
            }
            Err(e) => {
                store.lock_ui(false);
                self.state = prior;
                Err(surface_failure(store, "Save key", e))
            }
        }
    }

    /// Discard the buffer.
    pub fn cancel(&mut self) {
        self.buffer = None;
        self.state = EditState::Closed;
    }

    fn is_open(&self) -> bool {
        matches!(self.state, EditState::Creating | EditState::Editing)
    }

    fn require_closed(&self, action: &str) -> CoreResult<()> {
        if self.state == EditState::Closed {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn open_buffer(&mut self, action: &str) -> CoreResult<&mut KeyEditBuffer> {
        if !self.is_open() {
            return Err(self.invalid(action));
        }
        let err = self.invalid(action);
        self.buffer.as_mut().ok_or(err)
    }

    fn invalid(&self, action: &str) -> CoreError {
        CoreError::InvalidTransition {
            action: action.to_string(),
            state: self.state.to_string(),
        }
    }
}
