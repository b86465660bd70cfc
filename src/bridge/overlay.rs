//! Highlight overlay
//!
//! A single non-interactive, maximally stacked indicator node with a dimmed
//! page scrim, positioned to exactly cover the tracked element's box. The
//! node is created lazily once and then only has its visibility and
//! geometry mutated. While a target is tracked for scrolling, one debounced
//! scroll handler keeps the overlay aligned; re-tracking replaces the
//! handler instead of stacking listeners.

use super::session::{ScrollTracker, SessionState};
use crate::dom::{Document, NodeId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

const OVERLAY_BORDER: &str = "2px solid #3b82f6";
const OVERLAY_BACKGROUND: &str = "rgba(59, 130, 246, 0.15)";
const OVERLAY_SCRIM: &str = "0 0 0 9999px rgba(0, 0, 0, 0.1)";
const OVERLAY_Z_INDEX: &str = "2147483647";

/// Maintains the highlight indicator synced to a target's screen geometry
pub struct HighlightOverlay {
    document: Arc<RwLock<Document>>,
    state: Arc<RwLock<SessionState>>,
    debounce: Duration,
}

impl HighlightOverlay {
    /// Create a new overlay manager
    pub fn new(
        document: Arc<RwLock<Document>>,
        state: Arc<RwLock<SessionState>>,
        debounce: Duration,
    ) -> Self {
        Self {
            document,
            state,
            debounce,
        }
    }

    /// Show the overlay on an element: create the indicator node if needed,
    /// track the element, and align the geometry.
    pub async fn show(&self, element: NodeId) {
        let mut doc = self.document.write().await;
        let mut state = self.state.write().await;
        ensure_overlay(&mut doc, &mut state);
        state.highlighted = Some(element);
        reposition_locked(&mut doc, &mut state);
    }

    /// Recompute and re-apply the overlay geometry from the tracked
    /// element. No-op if nothing is tracked.
    pub async fn reposition(&self) {
        let mut doc = self.document.write().await;
        let mut state = self.state.write().await;
        reposition_locked(&mut doc, &mut state);
    }

    /// Hide the overlay (the node is retained), clear the tracked element,
    /// and detach any scroll tracking. Safe to call when nothing is shown.
    pub async fn hide(&self) {
        let mut doc = self.document.write().await;
        let mut state = self.state.write().await;
        set_visible(&mut doc, &mut state, false);
        state.highlighted = None;
        stop_tracking(&mut doc, &mut state);
    }

    /// Start scroll tracking for the currently highlighted element,
    /// replacing any prior tracker. Scroll notifications within one
    /// debounce window coalesce into a single reposition.
    pub async fn begin_tracking(&self) {
        let mut doc = self.document.write().await;
        let mut state = self.state.write().await;

        stop_tracking(&mut doc, &mut state);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let listener = doc.add_scroll_listener(tx);

        let document = self.document.clone();
        let session = self.state.clone();
        let debounce = self.debounce;
        let task = tokio::spawn(async move {
            while rx.recv().await.is_some() {
                tokio::time::sleep(debounce).await;
                // Coalesce the burst that arrived during the window
                while rx.try_recv().is_ok() {}
                let mut doc = document.write().await;
                let mut state = session.write().await;
                reposition_locked(&mut doc, &mut state);
            }
        });

        state.scroll_tracker = Some(ScrollTracker { listener, task });
    }
}

/// Create the overlay node if the session does not own a live one yet
pub(crate) fn ensure_overlay(doc: &mut Document, state: &mut SessionState) -> NodeId {
    if let Some(overlay) = state.overlay {
        if doc.is_attached(overlay) {
            return overlay;
        }
    }

    let overlay = doc.create_element("div");
    doc.set_attribute(overlay, "data-pickframe-overlay", "");
    doc.set_inline_style(overlay, "position", "fixed");
    doc.set_inline_style(overlay, "pointer-events", "none");
    doc.set_inline_style(overlay, "border", OVERLAY_BORDER);
    doc.set_inline_style(overlay, "background", OVERLAY_BACKGROUND);
    doc.set_inline_style(overlay, "box-shadow", OVERLAY_SCRIM);
    doc.set_inline_style(overlay, "z-index", OVERLAY_Z_INDEX);
    doc.set_inline_style(overlay, "transition", "all 0.1s ease");
    doc.set_inline_style(overlay, "display", "none");
    doc.computed_style_mut(overlay).position = "fixed".to_string();
    let body = doc.body();
    doc.append_child(body, overlay);

    state.overlay = Some(overlay);
    debug!(%overlay, "created highlight overlay node");
    overlay
}

/// Align the overlay to the tracked element's current box and make it
/// visible. A stale tracked element hides the overlay instead.
pub(crate) fn reposition_locked(doc: &mut Document, state: &mut SessionState) {
    let (Some(element), Some(overlay)) = (state.highlighted, state.overlay) else {
        return;
    };

    if !doc.is_attached(element) {
        debug!(%element, "highlighted element detached, hiding overlay");
        doc.set_inline_style(overlay, "display", "none");
        state.highlighted = None;
        return;
    }

    let rect = doc.bounding_box(element);
    doc.set_bounding_box(overlay, rect);
    doc.set_inline_style(overlay, "display", "block");
}

/// Toggle overlay visibility without touching geometry or tracking
pub(crate) fn set_visible(doc: &mut Document, state: &SessionState, visible: bool) {
    if let Some(overlay) = state.overlay {
        let display = if visible { "block" } else { "none" };
        doc.set_inline_style(overlay, "display", display);
    }
}

/// Retire the active scroll tracker, if any
pub(crate) fn stop_tracking(doc: &mut Document, state: &mut SessionState) {
    if let Some(tracker) = state.scroll_tracker.take() {
        doc.remove_scroll_listener(tracker.listener);
        tracker.task.abort();
    }
}
