//! Configuration loading and management for the tip distributor service.
//!
//! This module loads the server settings (listen address, upload limit and
//! the two-digit year window) from a YAML file with environment overrides.
//!
//! # Example
//!
//! ```no_run
//! use tip_distributor::config::ConfigLoader;
//!
//! let config = ConfigLoader::from_env().unwrap().into_config();
//! println!("Binding {}", config.bind_address);
//! ```

mod loader;
mod types;

pub use loader::{
    BIND_ADDRESS_ENV, CONFIG_PATH_ENV, ConfigLoader, DEFAULT_CONFIG_PATH, MAX_UPLOAD_BYTES_ENV,
    YEAR_REFERENCE_ENV,
};
pub use types::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT, ServerConfig};
