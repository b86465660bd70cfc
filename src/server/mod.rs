//! WebSocket transport
//!
//! Hosts one bridge session per editor connection. Replies go back on the
//! session's own socket with no origin restriction — the trust-all policy
//! inherited from the original design is kept, not hardened; tightening it
//! would change the external contract with the host.

pub mod connection;

use crate::config::Config;
use crate::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

/// Accepting server for editor connections
pub struct Server {
    listener: TcpListener,
    config: Arc<Config>,
}

impl Server {
    /// Bind to the configured address
    pub async fn bind(config: Config) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "listening for editor connections");
        Ok(Self {
            listener,
            config: Arc::new(config),
        })
    }

    /// The address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the shutdown signal fires
    pub async fn run(self, mut shutdown: oneshot::Receiver<()>) -> Result<()> {
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown signal received, stopping server");
                    return Ok(());
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            let config = self.config.clone();
                            tokio::spawn(async move {
                                if let Err(e) = connection::handle_connection(stream, peer, config).await {
                                    warn!(%peer, error = %e, "session ended with error");
                                }
                            });
                        }
                        Err(e) => warn!(error = %e, "failed to accept connection"),
                    }
                }
            }
        }
    }
}
