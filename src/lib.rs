//! Pickframe: element-picking bridge for visual page editors
//!
//! This library lets a hosting editor frame select, highlight, and inspect
//! DOM elements in an edited document over an asynchronous message-passing
//! protocol: coordinate-to-element resolution, durable selector synthesis,
//! a scroll-synced highlight overlay, and page-wide interaction lockdown.

pub mod config;
pub mod error;

pub mod bridge;
pub mod dom;
pub mod protocol;
pub mod server;

// Re-exports
pub use error::{Error, Result};

/// Pickframe library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
