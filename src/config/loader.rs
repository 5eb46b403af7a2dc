//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the server
//! configuration from a YAML file and the process environment.

use chrono::{Datelike, Local};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::ServerConfig;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "TIP_DISTRIBUTOR_CONFIG";
/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "./config/server.yaml";
/// Overrides `bind_address`.
pub const BIND_ADDRESS_ENV: &str = "TIP_DISTRIBUTOR_BIND";
/// Overrides `max_upload_bytes`.
pub const MAX_UPLOAD_BYTES_ENV: &str = "TIP_DISTRIBUTOR_MAX_UPLOAD_BYTES";
/// Overrides `two_digit_year_reference`.
pub const YEAR_REFERENCE_ENV: &str = "TIP_DISTRIBUTOR_YEAR_REFERENCE";

const MIN_REFERENCE_YEAR: i32 = 100;
const MAX_REFERENCE_YEAR: i32 = 9899;

/// Loads and provides access to the server configuration.
///
/// Values are layered: built-in defaults, then the YAML file (if present),
/// then environment overrides. A missing two-digit year reference is fixed to
/// the current year at load time.
///
/// # Example
///
/// ```no_run
/// use tip_distributor::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/server.yaml")?;
/// println!("Listening on {}", loader.config().bind_address);
/// # Ok::<(), tip_distributor::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ServerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the file named by `TIP_DISTRIBUTOR_CONFIG`,
    /// falling back to [`DEFAULT_CONFIG_PATH`].
    pub fn from_env() -> EngineResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// Loads configuration from `path` and applies process environment overrides.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file exists but cannot be read
    /// - The file contains invalid YAML or mistyped values
    /// - An environment override is malformed
    /// - A value is out of range
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Loads configuration from `path`, reading overrides through `lookup`.
    ///
    /// # Example
    ///
    /// ```
    /// use tip_distributor::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load_with_env("/nonexistent/server.yaml", |key| {
    ///     (key == "TIP_DISTRIBUTOR_YEAR_REFERENCE").then(|| "2030".to_string())
    /// })?;
    /// assert_eq!(loader.config().two_digit_year_reference, Some(2030));
    /// # Ok::<(), tip_distributor::error::EngineError>(())
    /// ```
    pub fn load_with_env<P, F>(path: P, lookup: F) -> EngineResult<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let config = Self::load_yaml(path)?;
            info!(path = %path.display(), "Loaded server configuration");
            config
        } else {
            info!(path = %path.display(), "No configuration file found, using defaults");
            ServerConfig::default()
        };

        Self::apply_overrides(&mut config, &lookup)?;

        let year = *config
            .two_digit_year_reference
            .get_or_insert_with(|| Local::now().year());
        if !(MIN_REFERENCE_YEAR..=MAX_REFERENCE_YEAR).contains(&year) {
            return Err(EngineError::InvalidConfig {
                key: "two_digit_year_reference".to_string(),
                message: format!("{year} is outside {MIN_REFERENCE_YEAR}..={MAX_REFERENCE_YEAR}"),
            });
        }
        if config.max_upload_bytes == 0 {
            return Err(EngineError::InvalidConfig {
                key: "max_upload_bytes".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml(path: &Path) -> EngineResult<ServerConfig> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        if content.trim().is_empty() {
            return Ok(ServerConfig::default());
        }

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn apply_overrides<F>(config: &mut ServerConfig, lookup: &F) -> EngineResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(BIND_ADDRESS_ENV) {
            config.bind_address = parse_override(BIND_ADDRESS_ENV, &value)?;
        }
        if let Some(value) = lookup(MAX_UPLOAD_BYTES_ENV) {
            config.max_upload_bytes = parse_override(MAX_UPLOAD_BYTES_ENV, &value)?;
        }
        if let Some(value) = lookup(YEAR_REFERENCE_ENV) {
            config.two_digit_year_reference = Some(parse_override(YEAR_REFERENCE_ENV, &value)?);
        }
        Ok(())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> ServerConfig {
        self.config
    }
}

fn parse_override<T>(key: &str, value: &str) -> EngineResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| EngineError::InvalidConfig {
        key: key.to_string(),
        message: format!("'{value}': {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "tip-distributor-{}-{name}.yaml",
            uuid::Uuid::new_v4()
        ));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let loader = ConfigLoader::load_with_env("/nonexistent/server.yaml", no_env).unwrap();
        let config = loader.config();
        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_missing_year_reference_is_fixed_to_current_year() {
        let loader = ConfigLoader::load_with_env("/nonexistent/server.yaml", no_env).unwrap();
        assert_eq!(loader.config().two_digit_year_reference, Some(Local::now().year()));
    }

    #[test]
    fn test_load_valid_file() {
        let path = write_temp_config(
            "valid",
            "bind_address: 127.0.0.1:4000\nmax_upload_bytes: 1024\ntwo_digit_year_reference: 2025\n",
        );
        let config = ConfigLoader::load_with_env(&path, no_env).unwrap().into_config();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.bind_address.to_string(), "127.0.0.1:4000");
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.two_digit_year_reference, Some(2025));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let path = write_temp_config("empty", "\n");
        let config = ConfigLoader::load_with_env(&path, no_env).unwrap().into_config();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let path = write_temp_config("invalid", "bind_address: [not, an, address\n");
        let result = ConfigLoader::load_with_env(&path, no_env);
        fs::remove_file(&path).unwrap();

        match result {
            Err(EngineError::ConfigParseError { path: p, .. }) => assert!(p.contains("invalid")),
            other => panic!("Expected ConfigParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_environment_overrides_file_values() {
        let path = write_temp_config("override", "max_upload_bytes: 1024\n");
        let env = env_of(&[
            (BIND_ADDRESS_ENV, "127.0.0.1:9999"),
            (MAX_UPLOAD_BYTES_ENV, "2048"),
            (YEAR_REFERENCE_ENV, "1990"),
        ]);
        let config = ConfigLoader::load_with_env(&path, env).unwrap().into_config();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.bind_address.port(), 9999);
        assert_eq!(config.max_upload_bytes, 2048);
        assert_eq!(config.two_digit_year_reference, Some(1990));
    }

    #[test]
    fn test_malformed_override_returns_invalid_config() {
        let env = env_of(&[(MAX_UPLOAD_BYTES_ENV, "lots")]);
        match ConfigLoader::load_with_env("/nonexistent/server.yaml", env) {
            Err(EngineError::InvalidConfig { key, .. }) => assert_eq!(key, MAX_UPLOAD_BYTES_ENV),
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_upload_limit_is_rejected() {
        let env = env_of(&[(MAX_UPLOAD_BYTES_ENV, "0")]);
        match ConfigLoader::load_with_env("/nonexistent/server.yaml", env) {
            Err(EngineError::InvalidConfig { key, .. }) => assert_eq!(key, "max_upload_bytes"),
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_year_is_rejected() {
        let env = env_of(&[(YEAR_REFERENCE_ENV, "12")]);
        match ConfigLoader::load_with_env("/nonexistent/server.yaml", env) {
            Err(EngineError::InvalidConfig { key, .. }) => {
                assert_eq!(key, "two_digit_year_reference")
            }
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_repository_config_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        let loader = ConfigLoader::load_with_env(path, no_env);
        assert!(loader.is_ok(), "Failed to load config: {:?}", loader.err());
    }
}
