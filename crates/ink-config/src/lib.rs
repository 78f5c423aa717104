//! # ink-config
//!
//! Layered configuration loading for Ink using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`INK_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.ink/config.toml`
//! 4. User-level `~/.config/ink/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `INK_SERVER__PORT` -> `server.port`,
//! `INK_EXTERNAL__ENDPOINT` -> `external.endpoint`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ink_config::InkConfig;
//!
//! let config = InkConfig::load_with_dotenv(None).expect("config");
//! println!("listening on {}", config.server.bind_address());
//! ```

mod cache;
mod database;
mod error;
mod external;
mod logging;
mod server;

pub use cache::{CacheBackend, CacheConfig};
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use external::ExternalApiConfig;
pub use logging::LoggingConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InkConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub external: ExternalApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl InkConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`InkConfig::load_with_dotenv`] if you
    /// need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is
    /// invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`InkConfig::load`].
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".ink/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("INK_").split("__"))
    }

    /// Reject values that would only fail later at startup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if !self.external.endpoint.starts_with("http://")
            && !self.external.endpoint.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                field: "external.endpoint".into(),
                reason: format!("'{}' is not an http(s) URL", self.external.endpoint),
            });
        }
        if self.external.post_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "external.post_timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ink").join("config.toml"))
    }
}
