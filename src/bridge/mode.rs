//! Edit-mode interaction lockdown
//!
//! While edit mode is active, capturing suppressors make essentially all
//! normal interaction with the document inert, the cursor becomes a
//! crosshair, and text selection is disabled. Activation and deactivation
//! are idempotent: repeated calls never stack or leak listeners.

use super::session::SessionState;
use crate::dom::{Document, EventKind};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Event kinds suppressed while edit mode is active
const SUPPRESSED_EVENTS: [EventKind; 5] = [
    EventKind::PointerDown,
    EventKind::PointerUp,
    EventKind::Click,
    EventKind::Submit,
    EventKind::DragStart,
];

/// Controls the session's interaction-blocking state
pub struct ModeController {
    document: Arc<RwLock<Document>>,
    state: Arc<RwLock<SessionState>>,
}

impl ModeController {
    /// Create a new mode controller
    pub fn new(document: Arc<RwLock<Document>>, state: Arc<RwLock<SessionState>>) -> Self {
        Self { document, state }
    }

    /// Enter edit mode. No-op if already active.
    pub async fn activate(&self) {
        let mut doc = self.document.write().await;
        let mut state = self.state.write().await;

        if state.listeners_attached {
            debug!("edit mode already active");
            return;
        }

        state.edit_mode_active = true;

        for kind in SUPPRESSED_EVENTS {
            state.suppressor_ids.push(doc.add_suppressor(kind));
        }

        let body = doc.body();
        state.saved_cursor = doc.inline_style(body, "cursor").map(str::to_string);
        state.saved_user_select = doc.inline_style(body, "user-select").map(str::to_string);
        doc.set_inline_style(body, "cursor", "crosshair");
        doc.set_inline_style(body, "user-select", "none");

        state.listeners_attached = true;
        info!("edit mode activated, page interaction blocked");
    }

    /// Leave edit mode. No-op if already inactive.
    pub async fn deactivate(&self) {
        let mut doc = self.document.write().await;
        let mut state = self.state.write().await;

        if !state.listeners_attached {
            debug!("edit mode already inactive");
            return;
        }

        state.edit_mode_active = false;

        for id in state.suppressor_ids.drain(..) {
            doc.remove_suppressor(id);
        }

        let body = doc.body();
        let cursor = state.saved_cursor.take().unwrap_or_default();
        let user_select = state.saved_user_select.take().unwrap_or_default();
        doc.set_inline_style(body, "cursor", &cursor);
        doc.set_inline_style(body, "user-select", &user_select);

        state.listeners_attached = false;
        info!("edit mode deactivated, page interaction restored");
    }
}
