//! Application configuration read from environment variables.
//!
//! A `.env` file is loaded by `main` before [`AppConfig::load`] runs.
//! Every setting has a default so the service starts with no environment.
//!
//! | variable | default |
//! |---|---|
//! | `SERVER_ADDR` | `0.0.0.0:3000` |
//! | `DATABASE_URL` | `sqlite::memory:` |
//! | `DATABASE_MAX_CONNECTIONS` | `5` |
//! | `DEFAULT_PAGE_SIZE` | `5` |
//! | `MAX_PAGE_SIZE` | `2000` |
//! | `SEED_MEMBERS` | `true` |
//! | `LOG_LEVEL` | `info` (`RUST_LOG` wins when set) |

use std::net::SocketAddr;

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, Environment};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const MAX_PAGE_SIZE: u32 = 2000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// A private in-memory database, used by tests and the default setup
    pub fn in_memory() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 1,
        }
    }

    /// Every connection to an in-memory SQLite database opens a new, empty
    /// database, so such URLs must be served by a single connection.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Page size defaults for listing endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Flat view of the environment, one field per variable
#[derive(Debug, Deserialize)]
#[serde(default)]
struct Settings {
    server_addr: SocketAddr,
    database_url: String,
    database_max_connections: u32,
    default_page_size: u32,
    max_page_size: u32,
    seed_members: bool,
    log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: 5,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            seed_members: true,
            log_level: "info".to_string(),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_addr: SocketAddr,
    pub database: DatabaseConfig,
    pub paging: PagingConfig,
    pub seed_members: bool,
    pub log_level: String,
}

impl AppConfig {
    /// Reads the configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder().add_source(Environment::default().try_parsing(true)),
        )
    }

    /// Builds the configuration from `builder`'s sources, falling back to
    /// defaults for missing keys
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;

        if settings.default_page_size == 0 || settings.default_page_size > settings.max_page_size {
            return Err(ConfigError::InvalidValue {
                key: "DEFAULT_PAGE_SIZE",
                value: settings.default_page_size.to_string(),
            });
        }

        Ok(Self {
            server_addr: settings.server_addr,
            database: DatabaseConfig {
                url: settings.database_url,
                max_connections: settings.database_max_connections,
            },
            paging: PagingConfig {
                default_page_size: settings.default_page_size,
                max_page_size: settings.max_page_size,
            },
            seed_members: settings.seed_members,
            log_level: settings.log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_with(overrides: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let mut builder = Config::builder();
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }
        AppConfig::from_builder(builder)
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = load_with(&[]).unwrap();

        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert!(config.database.is_in_memory());
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.paging.default_page_size, 5);
        assert_eq!(config.paging.max_page_size, 2000);
        assert!(config.seed_members);
        assert_eq!(config.server_addr.port(), 3000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn reads_overrides() {
        let config = load_with(&[
            ("database_url", "sqlite://members.db"),
            ("database_max_connections", "8"),
            ("default_page_size", "20"),
            ("seed_members", "false"),
            ("server_addr", "127.0.0.1:8080"),
        ])
        .unwrap();

        assert_eq!(config.database.url, "sqlite://members.db");
        assert_eq!(config.database.max_connections, 8);
        assert_eq!(config.paging.default_page_size, 20);
        assert!(!config.seed_members);
        assert_eq!(config.server_addr.port(), 8080);
    }

    #[test]
    fn rejects_unparsable_number() {
        let result = load_with(&[("default_page_size", "five")]);

        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn rejects_zero_default_page_size() {
        let result = load_with(&[("default_page_size", "0")]);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                key: "DEFAULT_PAGE_SIZE",
                ..
            })
        ));
    }

    #[test]
    fn rejects_default_above_max() {
        let result = load_with(&[("default_page_size", "50"), ("max_page_size", "10")]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_boolean() {
        let result = load_with(&[("seed_members", "maybe")]);
        assert!(result.is_err());
    }

    #[test]
    fn detects_in_memory_urls() {
        assert!(DatabaseConfig::in_memory().is_in_memory());
        assert!(DatabaseConfig {
            url: "sqlite:file:members?mode=memory&cache=shared".to_string(),
            max_connections: 4,
        }
        .is_in_memory());
        assert!(!DatabaseConfig {
            url: "sqlite://members.db".to_string(),
            max_connections: 4,
        }
        .is_in_memory());
    }
}
