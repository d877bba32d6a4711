//! Configuration management for bankweb
//!
//! This module handles loading, validation, and management of
//! bankweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub use error::{ConfigError, ConfigErrorCode, ConfigErrorSeverity, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Banking REST backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL the API paths are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Keys under which the auth collaborator stores credentials on the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_admin_token_key")]
    pub admin_token_key: String,
    #[serde(default = "default_user_token_key")]
    pub user_token_key: String,
    /// Account number of the signed-in user
    #[serde(default = "default_account_number_key")]
    pub account_number_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            admin_token_key: default_admin_token_key(),
            user_token_key: default_user_token_key(),
            account_number_key: default_account_number_key(),
        }
    }
}

fn default_admin_token_key() -> String {
    "adminAuthToken".to_string()
}

fn default_user_token_key() -> String {
    "authToken".to_string()
}

fn default_account_number_key() -> String {
    "accountNumber".to_string()
}

/// Paths of views owned by the surrounding application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_admin_login")]
    pub admin_login: String,
    #[serde(default = "default_admin_dashboard")]
    pub admin_dashboard: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            admin_login: default_admin_login(),
            admin_dashboard: default_admin_dashboard(),
        }
    }
}

fn default_admin_login() -> String {
    "/admin/login".to_string()
}

fn default_admin_dashboard() -> String {
    "/admin/dashboard".to_string()
}

/// Admin profile editor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Delay between a successful delete and the dashboard redirect
    #[serde(default = "default_delete_redirect_delay_ms")]
    pub delete_redirect_delay_ms: u64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            delete_redirect_delay_ms: default_delete_redirect_delay_ms(),
        }
    }
}

fn default_delete_redirect_delay_ms() -> u64 {
    2000
}

/// Currency and date formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// chrono format string for calendar dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            date_format: default_date_format(),
        }
    }
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%-m/%-d/%Y".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().into_owned(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(invalid("server.port", "Port must be greater than 0"));
        }

        if let Err(e) = url::Url::parse(&self.backend.base_url) {
            return Err(invalid("backend.base_url", &format!("Not a valid URL: {}", e)));
        }

        if self.backend.timeout_secs == 0 {
            return Err(invalid("backend.timeout_secs", "Timeout must be greater than 0"));
        }

        let keys = [
            ("session.admin_token_key", &self.session.admin_token_key),
            ("session.user_token_key", &self.session.user_token_key),
            ("session.account_number_key", &self.session.account_number_key),
            ("display.currency_symbol", &self.display.currency_symbol),
            ("display.date_format", &self.display.date_format),
        ];
        for (field, value) in keys {
            if value.trim().is_empty() {
                return Err(invalid(field, "Must not be empty"));
            }
        }

        let routes = [
            ("routes.admin_login", &self.routes.admin_login),
            ("routes.admin_dashboard", &self.routes.admin_dashboard),
        ];
        for (field, value) in routes {
            if !value.starts_with('/') {
                return Err(invalid(field, "Route must start with '/'"));
            }
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Backend request timeout
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }

    /// Delay before redirecting to the dashboard after a delete
    pub fn delete_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.profile.delete_redirect_delay_ms)
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
