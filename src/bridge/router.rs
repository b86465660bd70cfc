//! Protocol router
//!
//! Receives inbound bridge commands, dispatches to the mode controller,
//! locator, generator, overlay, and inspector, and posts reply events back
//! to the host. Owns the session state shared by all of them. Commands are
//! processed in arrival order; resolution failures become "no element" /
//! null-info events, never errors, and unexpected faults are converted into
//! error-carrying replies at this boundary.

use super::mode::ModeController;
use super::overlay::{self, HighlightOverlay};
use super::session::SessionState;
use super::{generator, inspector, locator};
use crate::dom::{Document, DocumentSnapshot};
use crate::protocol::{HostPort, InboundMessage, OutboundMessage, PickAction};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, instrument, warn};

/// Routes bridge commands for one edited document
pub struct ProtocolRouter {
    document: Arc<RwLock<Document>>,
    state: Arc<RwLock<SessionState>>,
    mode: ModeController,
    overlay: HighlightOverlay,
    host: Arc<dyn HostPort>,
}

impl ProtocolRouter {
    /// Create a router around a document, posting events to `host`
    pub fn new(document: Document, scroll_debounce: Duration, host: Arc<dyn HostPort>) -> Self {
        let document = Arc::new(RwLock::new(document));
        let state = Arc::new(RwLock::new(SessionState::default()));
        Self {
            mode: ModeController::new(document.clone(), state.clone()),
            overlay: HighlightOverlay::new(document.clone(), state.clone(), scroll_debounce),
            document,
            state,
            host,
        }
    }

    /// Shared handle to the session's document
    pub fn document(&self) -> Arc<RwLock<Document>> {
        self.document.clone()
    }

    /// Shared handle to the session state
    pub fn state(&self) -> Arc<RwLock<SessionState>> {
        self.state.clone()
    }

    /// Handle one inbound command to completion
    #[instrument(skip(self, message))]
    pub async fn handle(&self, message: InboundMessage) {
        match message {
            InboundMessage::ModeActivate => self.mode.activate().await,
            InboundMessage::ModeDeactivate => {
                self.mode.deactivate().await;
                self.overlay.hide().await;
            }
            InboundMessage::DetectElement { x, y, action } => {
                self.handle_detect(x, y, action).await;
            }
            InboundMessage::Highlight { selector } => self.handle_highlight(&selector).await,
            InboundMessage::ClearHighlight => self.overlay.hide().await,
            InboundMessage::RequestInfo { selector } => self.handle_request_info(&selector).await,
            InboundMessage::Unknown => debug!("ignoring unrecognized command"),
        }
    }

    /// Replace the session's document with a snapshot and reset all state.
    /// Used by the transport when the host installs the edited document.
    pub async fn load_document(&self, snapshot: &DocumentSnapshot) {
        let mut doc = self.document.write().await;
        let mut state = self.state.write().await;
        overlay::stop_tracking(&mut doc, &mut state);
        *doc = Document::from_snapshot(snapshot);
        *state = SessionState::default();
        debug!("installed new document");
    }

    /// Tear the session down: restore interaction and hide the overlay
    pub async fn shutdown(&self) {
        self.mode.deactivate().await;
        self.overlay.hide().await;
    }

    async fn handle_detect(&self, x: f64, y: f64, action: PickAction) {
        debug!(x, y, ?action, "detecting element");

        let found = {
            let mut doc = self.document.write().await;
            let mut state = self.state.write().await;

            // A visible overlay would be hit-tested itself and corrupt the
            // result, so it goes dark for the probe.
            overlay::set_visible(&mut doc, &state, false);

            let hit = doc.element_from_point(x, y);
            let resolved = hit.and_then(|raw| locator::resolve(&doc, raw, x, y));

            if action == PickAction::Hover && resolved.is_some() {
                overlay::set_visible(&mut doc, &state, true);
            }

            match resolved {
                Some(element) => match generator::generate(&doc, element) {
                    Some(selector) => {
                        // Hover retargets the overlay but never creates it;
                        // the node comes into existence on the first
                        // highlight command only.
                        if action == PickAction::Hover {
                            state.highlighted = Some(element);
                            overlay::reposition_locked(&mut doc, &mut state);
                        }
                        Some((element, selector))
                    }
                    None => {
                        debug!(%element, "no selector for resolved element");
                        None
                    }
                },
                None => None,
            }
        };

        match found {
            Some((_, selector)) => match action {
                PickAction::Hover => {
                    self.post(OutboundMessage::ElementHovered { selector }).await;
                }
                PickAction::Click => {
                    self.post(OutboundMessage::ElementClicked { selector }).await;
                }
            },
            None => {
                debug!("no valid element detected");
                self.post(OutboundMessage::NoElementDetected { action }).await;
            }
        }
    }

    async fn handle_highlight(&self, selector: &str) {
        let element = {
            let doc = self.document.read().await;
            match doc.query_selector(selector) {
                Ok(Some(element)) => Some(element),
                Ok(None) => {
                    warn!(selector, "cannot highlight: no matching element");
                    None
                }
                Err(e) => {
                    error!(selector, error = %e, "cannot highlight");
                    None
                }
            }
        };

        if let Some(element) = element {
            self.overlay.show(element).await;
            self.overlay.begin_tracking().await;
        }
    }

    async fn handle_request_info(&self, selector: &str) {
        let result = {
            let doc = self.document.read().await;
            doc.query_selector(selector)
                .map(|found| found.and_then(|element| inspector::snapshot(&doc, element)))
        };

        let reply = match result {
            Ok(info) => OutboundMessage::ElementInfo { info, error: None },
            Err(e) => {
                error!(selector, error = %e, "failed to inspect element");
                OutboundMessage::ElementInfo {
                    info: None,
                    error: Some(e.to_string()),
                }
            }
        };
        self.post(reply).await;
    }

    async fn post(&self, event: OutboundMessage) {
        self.host.post(event).await;
    }
}
