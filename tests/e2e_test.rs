//! End-to-end test over a real WebSocket connection
//!
//! Boots the server on an ephemeral port, connects as an editor would,
//! loads a document snapshot, and walks through a full picking session.

use futures_util::{SinkExt, StreamExt};
use pickframe::config::Config;
use pickframe::server::Server;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start_server() -> (SocketAddr, oneshot::Sender<()>) {
    let config = Config {
        port: 0,
        ..Config::default()
    };
    let server = Server::bind(config).await.expect("bind");
    let addr = server.local_addr().expect("local addr");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = server.run(shutdown_rx).await;
    });

    (addr, shutdown_tx)
}

fn demo_document() -> Value {
    json!({
        "type": "load-document",
        "document": {
            "viewport_width": 1280,
            "viewport_height": 720,
            "body": [
                {
                    "tag": "section",
                    "attributes": {"class": "hero"},
                    "rect": {"top": 0, "left": 0, "width": 1280, "height": 300},
                    "children": [
                        {
                            "tag": "h1",
                            "attributes": {"id": "headline"},
                            "text": "Everything your pet needs",
                            "rect": {"top": 60, "left": 40, "width": 600, "height": 50}
                        },
                        {
                            "tag": "button",
                            "attributes": {"data-testid": "shop-now", "class": "cta"},
                            "text": "Shop now",
                            "rect": {"top": 60, "left": 120, "width": 160, "height": 48}
                        }
                    ]
                }
            ]
        }
    })
}

async fn send(ws: &mut Socket, value: Value) {
    ws.send(Message::Text(value.to_string())).await.expect("send");
}

async fn recv_json(ws: &mut Socket) -> Value {
    loop {
        let frame = ws.next().await.expect("stream open").expect("frame");
        if let Message::Text(text) = frame {
            return serde_json::from_str(&text).expect("valid json");
        }
    }
}

#[tokio::test]
async fn full_pick_flow_over_websocket() {
    let (addr, shutdown) = start_server().await;
    let url = format!("ws://{}", addr);
    let (mut ws, _) = tokio_tungstenite::connect_async(&url).await.expect("connect");

    send(&mut ws, demo_document()).await;
    send(&mut ws, json!({"type": "mode-activate"})).await;

    // Unknown commands are ignored without killing the session
    send(&mut ws, json!({"type": "telemetry-ping"})).await;

    // The headline button sits on top of the h1 where they overlap; probe
    // a point only the h1 covers.
    send(
        &mut ws,
        json!({"type": "detect-element", "x": 100.0, "y": 60.0, "action": "click"}),
    )
    .await;
    let reply = recv_json(&mut ws).await;
    assert_eq!(reply["type"], "element-clicked");
    assert_eq!(reply["selector"], "#headline");

    // A probe outside everything reports no element
    send(
        &mut ws,
        json!({"type": "detect-element", "x": 1200.0, "y": 700.0, "action": "hover"}),
    )
    .await;
    let reply = recv_json(&mut ws).await;
    assert_eq!(reply["type"], "no-element-detected");
    assert_eq!(reply["action"], "hover");

    send(
        &mut ws,
        json!({"type": "request-info", "selector": "[data-testid=\"shop-now\"]"}),
    )
    .await;
    let reply = recv_json(&mut ws).await;
    assert_eq!(reply["type"], "element-info");
    let info = &reply["info"];
    assert_eq!(info["tagName"], "button");
    assert_eq!(info["className"], "cta");
    assert_eq!(info["textContent"], "Shop now");
    assert_eq!(info["boundingRect"]["left"], 120.0);
    assert!(reply.get("error").is_none());

    // Highlight and clear produce no outbound traffic, only overlay state
    send(&mut ws, json!({"type": "highlight", "selector": ".cta"})).await;
    send(&mut ws, json!({"type": "clear-highlight"})).await;
    send(&mut ws, json!({"type": "mode-deactivate"})).await;

    ws.send(Message::Close(None)).await.expect("close");
    let _ = shutdown.send(());
}

#[tokio::test]
async fn highlight_of_missing_selector_keeps_the_session_alive() {
    let (addr, shutdown) = start_server().await;
    let url = format!("ws://{}", addr);
    let (mut ws, _) = tokio_tungstenite::connect_async(&url).await.expect("connect");

    send(&mut ws, demo_document()).await;
    send(
        &mut ws,
        json!({"type": "highlight", "selector": "#does-not-exist"}),
    )
    .await;

    // The session still answers afterwards
    send(
        &mut ws,
        json!({"type": "request-info", "selector": "#headline"}),
    )
    .await;
    let reply = recv_json(&mut ws).await;
    assert_eq!(reply["type"], "element-info");
    assert_eq!(reply["info"]["tagName"], "h1");

    ws.send(Message::Close(None)).await.expect("close");
    let _ = shutdown.send(());
}
