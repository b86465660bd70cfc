//! Configuration management for Pickframe

use crate::{Error, Result};
use serde::Deserialize;
use std::env;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Debounce window for scroll-driven overlay repositioning, in milliseconds
    pub scroll_debounce_ms: u64,

    /// Default viewport width for documents that carry no explicit viewport
    pub viewport_width: f64,

    /// Default viewport height for documents that carry no explicit viewport
    pub viewport_height: f64,

    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9570,
            scroll_debounce_ms: 10,
            viewport_width: 1920.0,
            viewport_height: 1080.0,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(host) = env::var("PICKFRAME_HOST") {
            config.host = host;
        }

        if let Ok(port) = env::var("PICKFRAME_PORT") {
            config.port = port
                .parse()
                .map_err(|_| Error::configuration("Invalid PICKFRAME_PORT"))?;
        }

        if let Ok(debounce) = env::var("PICKFRAME_SCROLL_DEBOUNCE_MS") {
            config.scroll_debounce_ms = debounce
                .parse()
                .map_err(|_| Error::configuration("Invalid PICKFRAME_SCROLL_DEBOUNCE_MS"))?;
        }

        if let Ok(width) = env::var("PICKFRAME_VIEWPORT_WIDTH") {
            config.viewport_width = width
                .parse()
                .map_err(|_| Error::configuration("Invalid PICKFRAME_VIEWPORT_WIDTH"))?;
        }

        if let Ok(height) = env::var("PICKFRAME_VIEWPORT_HEIGHT") {
            config.viewport_height = height
                .parse()
                .map_err(|_| Error::configuration("Invalid PICKFRAME_VIEWPORT_HEIGHT"))?;
        }

        if let Ok(log_level) = env::var("PICKFRAME_LOG_LEVEL") {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }
}
