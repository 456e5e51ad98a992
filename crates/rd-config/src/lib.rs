//! # rd-config
//!
//! Layered configuration loading for the research dashboard using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RDASH_*` prefix, `__` as separator)
//! 2. Project-level `.rdash/config.toml`
//! 3. User-level `~/.config/rdash/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RDASH_SERVER__BIND` -> `server.bind`,
//! `RDASH_SURVEY__CSV_PATH` -> `survey.csv_path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use rd_config::DashConfig;
//!
//! let config = DashConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.bind);
//! ```

mod auth;
mod database;
mod error;
mod server;
mod storage;
mod survey;

pub use auth::{AuthConfig, StaffToken};
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use server::ServerConfig;
pub use storage::StorageConfig;
pub use survey::SurveyConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub survey: SurveyConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl DashConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".rdash/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("RDASH_").split("__"))
    }

    /// Reject values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.bind_addr()?;
        if self.server.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.storage.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.max_upload_bytes".into(),
                reason: "must be at least 1".into(),
            });
        }
        if let Some(staff) = self
            .auth
            .staff
            .iter()
            .find(|s| s.username.trim().is_empty() || s.token.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "auth.staff".into(),
                reason: format!("entry '{}' needs both username and token", staff.username),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rdash").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) looking for a `.env`
    /// file, then falls back to the current directory.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
