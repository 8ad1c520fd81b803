//! Configuration module for filecat.

use serde::Deserialize;
use std::path::Path;

use crate::node::{CatalogPolicy, DeletePolicy, TreeMode, UpdateParentPolicy};
use crate::{CatalogError, Result};

/// How domain errors are reflected in HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMode {
    /// Validation failures use 4xx, unexpected failures use 5xx.
    #[default]
    Strict,
    /// Every response is 200; only the envelope's `success` flag signals failure.
    AlwaysOk,
}

/// Web API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number for the Web API.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// CORS allowed origins (empty = allow any).
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Status code policy for failure envelopes.
    #[serde(default)]
    pub status_mode: StatusMode,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    3000
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            cors_origins: vec![],
            status_mode: StatusMode::default(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/filecat.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/filecat.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Catalog business-rule configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// How folder-tree assembly treats dangling parent references.
    #[serde(default)]
    pub tree_mode: TreeMode,
    /// Whether a changed `parentId` is re-validated on update.
    #[serde(default)]
    pub update_parent: UpdateParentPolicy,
    /// What happens to descendants when a folder is deleted.
    #[serde(default)]
    pub delete: DeletePolicy,
    /// Default page size for child listings.
    #[serde(default = "default_children_page_size")]
    pub children_page_size: u32,
    /// Default result cap for searches.
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
    /// Upper bound for any requested page size.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

fn default_children_page_size() -> u32 {
    100
}

fn default_search_limit() -> u32 {
    50
}

fn default_max_page_size() -> u32 {
    1000
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            tree_mode: TreeMode::default(),
            update_parent: UpdateParentPolicy::default(),
            delete: DeletePolicy::default(),
            children_page_size: default_children_page_size(),
            search_limit: default_search_limit(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl CatalogConfig {
    /// Build the service policy from this configuration.
    pub fn policy(&self) -> CatalogPolicy {
        CatalogPolicy {
            tree_mode: self.tree_mode,
            update_parent: self.update_parent,
            delete: self.delete,
            children_page_size: self.children_page_size,
            search_limit: self.search_limit,
            max_page_size: self.max_page_size,
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the catalog API (including `/api/v1`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Quiet period before a search is issued, in milliseconds.
    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000/api/v1".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_search_debounce() -> u64 {
    300
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            search_debounce_ms: default_search_debounce(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Catalog configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Client configuration.
    #[serde(default)]
    pub client: ClientConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(CatalogError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| CatalogError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `FILECAT_DATABASE_PATH`: database file path
    /// - `FILECAT_LOG_LEVEL`: log level
    /// - `FILECAT_PORT`: Web API port
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("FILECAT_DATABASE_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }

        if let Ok(level) = std::env::var("FILECAT_LOG_LEVEL") {
            if !level.is_empty() {
                self.logging.level = level;
            }
        }

        if let Ok(port) = std::env::var("FILECAT_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.web.port = port;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let catalog = &self.catalog;

        if catalog.max_page_size == 0 {
            return Err(CatalogError::Config(
                "catalog.max_page_size must be greater than 0".to_string(),
            ));
        }

        for (name, value) in [
            ("children_page_size", catalog.children_page_size),
            ("search_limit", catalog.search_limit),
        ] {
            if value == 0 || value > catalog.max_page_size {
                return Err(CatalogError::Config(format!(
                    "catalog.{name} must be between 1 and max_page_size ({})",
                    catalog.max_page_size
                )));
            }
        }

        if self.client.timeout_secs == 0 {
            return Err(CatalogError::Config(
                "client.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
