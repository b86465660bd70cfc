//! Per-connection bridge session
//!
//! Each WebSocket connection hosts one bridge session over its own
//! document. Text frames carry JSON messages: session-level control
//! messages (`load-document`, `scroll`) are handled here; everything else
//! is forwarded to the protocol router, which ignores unrecognized tags.

use crate::bridge::ProtocolRouter;
use crate::config::Config;
use crate::dom::Document;
use crate::protocol::{ChannelHost, ControlMessage, InboundMessage};
use crate::{Error, Result};
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Serve one editor connection to completion
pub async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    config: Arc<Config>,
) -> Result<()> {
    let ws = tokio_tungstenite::accept_async(stream)
        .await
        .map_err(|e| Error::websocket(e.to_string()))?;
    let (mut sink, mut source) = ws.split();

    let session_id = Uuid::new_v4();
    info!(%peer, %session_id, "bridge session opened");

    let (host, mut events) = ChannelHost::new();
    let document = Document::with_viewport(config.viewport_width, config.viewport_height);
    let router = ProtocolRouter::new(
        document,
        Duration::from_millis(config.scroll_debounce_ms),
        Arc::new(host),
    );

    // Writer: outbound events, serialized in post order
    let writer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    error!(error = %e, "failed to serialize outbound event");
                    continue;
                }
            };
            if sink.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = source.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                warn!(%session_id, error = %e, "websocket error");
                break;
            }
        };

        match frame {
            Message::Text(text) => dispatch_frame(&router, &text).await,
            Message::Close(_) => break,
            Message::Ping(_) | Message::Pong(_) | Message::Binary(_) | Message::Frame(_) => {}
        }
    }

    router.shutdown().await;
    writer.abort();
    info!(%session_id, "bridge session closed");
    Ok(())
}

async fn dispatch_frame(router: &ProtocolRouter, text: &str) {
    // Session-level control first; the bridge protocol never sees these
    if let Ok(control) = serde_json::from_str::<ControlMessage>(text) {
        match control {
            ControlMessage::LoadDocument { document } => {
                router.load_document(&document).await;
            }
            ControlMessage::Scroll { dx, dy } => {
                let document = router.document();
                let mut doc = document.write().await;
                doc.scroll_by(dx, dy);
                doc.notify_scroll();
            }
        }
        return;
    }

    match serde_json::from_str::<InboundMessage>(text) {
        Ok(message) => router.handle(message).await,
        Err(e) => debug!(error = %e, "ignoring malformed frame"),
    }
}
