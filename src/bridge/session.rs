//! Session state shared by the bridge components
//!
//! One instance per edited document, lifecycle = session lifetime. All of
//! the bridge's mutable state lives here so activation, highlighting, and
//! teardown reasoning stay local.

use crate::dom::{ListenerId, NodeId};
use tokio::task::JoinHandle;

/// The single active scroll tracker: a document-side listener feeding a
/// debouncing task. Replaced wholesale, never stacked.
#[derive(Debug)]
pub struct ScrollTracker {
    /// The scroll listener registered on the document
    pub listener: ListenerId,
    /// The debouncing reposition task
    pub task: JoinHandle<()>,
}

/// Mutable bridge state for one session
#[derive(Debug, Default)]
pub struct SessionState {
    /// Whether edit mode is on
    pub edit_mode_active: bool,
    /// Whether the interaction suppressors are installed. Equals
    /// `edit_mode_active` after any completed activate/deactivate call.
    pub listeners_attached: bool,
    /// Suppressors installed by the last activate, removed exactly on
    /// deactivate
    pub suppressor_ids: Vec<ListenerId>,
    /// Body cursor value saved across activation
    pub saved_cursor: Option<String>,
    /// Body user-select value saved across activation
    pub saved_user_select: Option<String>,
    /// Non-owning reference to the currently highlighted element; must be
    /// liveness-checked before every use
    pub highlighted: Option<NodeId>,
    /// The single overlay node, created lazily and retained until document
    /// teardown
    pub overlay: Option<NodeId>,
    /// At most one scroll tracker at a time
    pub scroll_tracker: Option<ScrollTracker>,
}

impl SessionState {
    /// Whether the listener/mode invariant holds
    pub fn is_consistent(&self) -> bool {
        self.listeners_attached == self.edit_mode_active
    }
}
