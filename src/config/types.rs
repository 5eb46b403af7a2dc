//! Configuration types for the tip distributor service.
//!
//! This module contains the strongly-typed configuration structure that is
//! deserialized from the YAML server configuration file.

use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};

use crate::calculation::ParseOptions;

/// Default upload cap shared by both files in a request.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

fn default_bind_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT))
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

/// Settings for the HTTP service.
///
/// Every field has a default, so an empty YAML document is a valid
/// configuration.
///
/// # Example
///
/// ```
/// use tip_distributor::config::ServerConfig;
///
/// let config: ServerConfig = serde_yaml::from_str("max_upload_bytes: 2048").unwrap();
/// assert_eq!(config.max_upload_bytes, 2048);
/// assert_eq!(config.bind_address.port(), 3000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Address the listener binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,
    /// Largest accepted request body in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Year that anchors the century window for two-digit `yy` dates.
    ///
    /// The loader fills this with the current year when the file leaves it
    /// out.
    #[serde(default)]
    pub two_digit_year_reference: Option<i32>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            two_digit_year_reference: None,
        }
    }
}

impl ServerConfig {
    /// Builds the timestamp parse options handed to the engine.
    pub fn parse_options(&self) -> ParseOptions {
        match self.two_digit_year_reference {
            Some(year) => ParseOptions::with_reference_year(year),
            None => ParseOptions::default(),
        }
    }
}
