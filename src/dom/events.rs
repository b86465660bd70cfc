//! Capture-phase event registry
//!
//! The bridge locks down page interaction by installing capturing
//! suppressors for a fixed set of event kinds, and keeps the highlight
//! overlay aligned through scroll notifications. Both registries live on
//! the document so registration and teardown stay local to the session.

use super::document::Document;
use super::node::NodeId;
use tokio::sync::mpsc;

/// Page event kinds the bridge can suppress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PointerDown,
    PointerUp,
    Click,
    Submit,
    DragStart,
}

/// Handle to a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// What a dispatched event experienced on its way through the tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

/// Listener registries for a document
#[derive(Debug, Default)]
pub(crate) struct EventListeners {
    next_id: u64,
    suppressors: Vec<(ListenerId, EventKind)>,
    scroll: Vec<(ListenerId, mpsc::UnboundedSender<()>)>,
}

impl EventListeners {
    fn next(&mut self) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }
}

impl Document {
    /// Install a capturing suppressor for an event kind. While registered,
    /// every dispatched event of that kind has its default behavior and
    /// propagation cancelled.
    pub fn add_suppressor(&mut self, kind: EventKind) -> ListenerId {
        let id = self.listeners.next();
        self.listeners.suppressors.push((id, kind));
        id
    }

    /// Remove a previously installed suppressor. Removing an unknown id is
    /// a no-op.
    pub fn remove_suppressor(&mut self, id: ListenerId) {
        self.listeners.suppressors.retain(|(l, _)| *l != id);
    }

    /// Whether any suppressor is registered for an event kind
    pub fn has_suppressor(&self, kind: EventKind) -> bool {
        self.listeners.suppressors.iter().any(|(_, k)| *k == kind)
    }

    /// Number of registered suppressors
    pub fn suppressor_count(&self) -> usize {
        self.listeners.suppressors.len()
    }

    /// Dispatch an event at a target and report what happened to it
    pub fn dispatch(&self, kind: EventKind, _target: NodeId) -> DispatchOutcome {
        if self.has_suppressor(kind) {
            DispatchOutcome {
                default_prevented: true,
                propagation_stopped: true,
            }
        } else {
            DispatchOutcome::default()
        }
    }

    /// Register a scroll listener. Each viewport scroll notification sends
    /// one unit on the channel.
    pub fn add_scroll_listener(&mut self, tx: mpsc::UnboundedSender<()>) -> ListenerId {
        let id = self.listeners.next();
        self.listeners.scroll.push((id, tx));
        id
    }

    /// Remove a scroll listener. Removing an unknown id is a no-op.
    pub fn remove_scroll_listener(&mut self, id: ListenerId) {
        self.listeners.scroll.retain(|(l, _)| *l != id);
    }

    /// Number of registered scroll listeners
    pub fn scroll_listener_count(&self) -> usize {
        self.listeners.scroll.len()
    }

    /// Notify all scroll listeners of a viewport scroll
    pub fn notify_scroll(&self) {
        for (_, tx) in &self.listeners.scroll {
            // A closed receiver just means the tracker is gone
            let _ = tx.send(());
        }
    }
}
