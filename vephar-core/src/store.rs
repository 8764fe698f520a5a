//! Global store
//!
//! The single piece of process-wide state: the advisory UI lock, the last
//! user-facing message and the last status snapshot. State changes only
//! through [`Store::dispatch`], which runs the pure [`reduce`] function and
//! then notifies observers. Actions are applied synchronously in the order
//! they are dispatched; nothing is batched or reordered.

use std::fmt;

use vephar_rpc::StatusRecord;

/// Application-wide state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// A request is in flight; user-triggered remote operations must be refused.
    pub ui_locked: bool,
    /// Message waiting to be shown to the user.
    pub last_message: Option<String>,
    /// Last fetched status of the remote node.
    pub status_snapshot: Option<StatusRecord>,
}

/// State transitions understood by [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LockUi(bool),
    Message(String),
    ClearMessage,
    StatusLoaded(StatusRecord),
}

/// Pure reducer: the state that results from applying `action` to `state`.
#[must_use]
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        Action::LockUi(locked) => AppState {
            ui_locked: locked,
            ..state
        },
        Action::Message(message) => AppState {
            last_message: Some(message),
            ..state
        },
        Action::ClearMessage => AppState {
            last_message: None,
            ..state
        },
        Action::StatusLoaded(record) => AppState {
            status_snapshot: Some(record),
            ..state
        },
    }
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&AppState) + Send>;

/// State container with synchronous dispatch and change observers.
#[derive(Default)]
pub struct Store {
    state: AppState,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing state instead of the default.
    pub fn with_state(state: AppState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Latest state, reflecting every action dispatched so far.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state.ui_locked
    }

    /// Apply `action`, then notify observers in registration order.
    pub fn dispatch(&mut self, action: Action) {
        log::trace!("dispatch {action:?}");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        for (_, observer) in &mut self.observers {
            observer(&self.state);
        }
    }

    /// Register an observer called with the new state after each dispatch.
    pub fn subscribe(&mut self, observer: impl FnMut(&AppState) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer; returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    // ===== Action helpers =====

    pub fn lock_ui(&mut self, locked: bool) {
        self.dispatch(Action::LockUi(locked));
    }

    pub fn post_message(&mut self, message: impl Into<String>) {
        self.dispatch(Action::Message(message.into()));
    }

    pub fn clear_message(&mut self) {
        self.dispatch(Action::ClearMessage);
    }

    pub fn status_loaded(&mut self, record: StatusRecord) {
        self.dispatch(Action::StatusLoaded(record));
    }

    /// Hand the pending message to the caller for display and clear it.
    pub fn take_message(&mut self) -> Option<String> {
        let message = self.state.last_message.clone()?;
        self.clear_message();
        Some(message)
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}
