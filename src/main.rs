//! Pickframe server entry point
//!
//! Hosts the element-picking bridge behind a WebSocket endpoint: one bridge
//! session per editor connection, each with its own document and session
//! state.
//!
//! Environment variables:
//! - `PICKFRAME_HOST`: listen address (default: 127.0.0.1)
//! - `PICKFRAME_PORT`: listen port (default: 9570)
//! - `PICKFRAME_SCROLL_DEBOUNCE_MS`: overlay reposition debounce (default: 10)

use pickframe::{config::Config, server::Server};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing - respect RUST_LOG environment variable
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    info!("Pickframe Server v{}", pickframe::VERSION);

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: host={}, port={}, scroll_debounce={}ms",
        config.host, config.port, config.scroll_debounce_ms
    );

    let server = Server::bind(config).await?;

    // Graceful shutdown on SIGTERM / Ctrl+C
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = signal(SignalKind::terminate()).unwrap();
            let mut sigint = signal(SignalKind::interrupt()).unwrap();

            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT signal");
                }
            }
        }

        #[cfg(windows)]
        {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received Ctrl+C signal");
        }

        let _ = shutdown_tx.send(());
    });

    server.run(shutdown_rx).await?;

    info!("Server shutdown complete");
    Ok(())
}
