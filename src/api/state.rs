//! Application state for the tip distributor API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::ParseOptions;
use crate::config::ServerConfig;

/// Shared application state.
///
/// Holds the read-only server configuration and the timestamp parse options
/// derived from it once at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    parse_options: ParseOptions,
}

impl AppState {
    /// Creates a new application state from the loaded configuration.
    pub fn new(config: ServerConfig) -> Self {
        let parse_options = config.parse_options();
        Self {
            config: Arc::new(config),
            parse_options,
        }
    }

    /// Returns the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the options every distribution in this process parses with.
    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }
}
