//! Outbound event seam
//!
//! The router posts events through a trait object so the transport can be
//! a WebSocket writer in production and a plain channel in tests. Replies
//! are posted to whatever sender the session belongs to, with no origin
//! restriction (trust-all, inherited from the original design).

use super::messages::OutboundMessage;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

/// Sink for events addressed to the hosting frame
#[async_trait]
pub trait HostPort: Send + Sync {
    /// Post an event to the host. Delivery is best-effort; a departed host
    /// is not an error.
    async fn post(&self, event: OutboundMessage);
}

/// [`HostPort`] backed by an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelHost {
    tx: mpsc::UnboundedSender<OutboundMessage>,
}

impl ChannelHost {
    /// Create a host port and the receiver its events arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutboundMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl HostPort for ChannelHost {
    async fn post(&self, event: OutboundMessage) {
        if self.tx.send(event).is_err() {
            debug!("host channel closed, dropping event");
        }
    }
}
