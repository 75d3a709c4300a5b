//! Configuration management for `FitDash`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::FitDashError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FitDashConfig {
    /// Backend API settings
    pub api: ApiConfig,
    /// Dashboard fallbacks and join behavior
    pub dashboard: DashboardConfig,
    /// Toast timing
    pub notifications: NotificationConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Backend API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Request timeout in seconds, 0 disables it
    #[serde(default)]
    pub timeout_seconds: u32,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// How the dashboard treats a failure of one of its two fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinPolicy {
    /// Any failed fetch fails the whole refresh and discards the other result
    #[default]
    AllOrNothing,
    /// Each panel renders its own result or its own error state
    Independent,
}

/// Dashboard settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// City used when the city input is blank
    #[serde(default = "default_city")]
    pub default_city: String,
    /// Recipe category used when no category is selected
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default)]
    pub join_policy: JoinPolicy,
    /// Image shown for recipes whose own image is missing or fails to load
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

/// Notification timing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Time a notification stays fully visible
    #[serde(default = "default_dismiss_after_ms")]
    pub dismiss_after_ms: u64,
    /// Exit transition before the notification is removed
    #[serde(default = "default_exit_after_ms")]
    pub exit_after_ms: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_user_agent() -> String {
    format!("FitDash/{}", crate::VERSION)
}

fn default_city() -> String {
    "San Jose".to_string()
}

fn default_category() -> String {
    "Chicken".to_string()
}

fn default_placeholder_image() -> String {
    "https://via.placeholder.com/200x200?text=🍽️".to_string()
}

fn default_dismiss_after_ms() -> u64 {
    5000
}

fn default_exit_after_ms() -> u64 {
    300
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_seconds: 0,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            default_category: default_category(),
            join_policy: JoinPolicy::default(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: default_dismiss_after_ms(),
            exit_after_ms: default_exit_after_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ApiConfig {
    /// Request timeout, `None` when disabled
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds.into()))
    }
}

impl NotificationConfig {
    #[must_use]
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }

    #[must_use]
    pub fn exit_after(&self) -> Duration {
        Duration::from_millis(self.exit_after_ms)
    }
}

impl FitDashConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // FITDASH_API__BASE_URL=... overrides api.base_url
        builder = builder.add_source(
            Environment::with_prefix("FITDASH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: FitDashConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fitdash").join("config.toml"))
    }

    /// Apply default values to blank configuration fields
    pub fn apply_defaults(&mut self) {
        if self.api.base_url.trim().is_empty() {
            self.api.base_url = default_api_base_url();
        }
        if self.api.user_agent.trim().is_empty() {
            self.api.user_agent = default_user_agent();
        }
        if self.dashboard.default_city.trim().is_empty() {
            self.dashboard.default_city = default_city();
        }
        if self.dashboard.default_category.trim().is_empty() {
            self.dashboard.default_category = default_category();
        }
        if self.dashboard.placeholder_image.trim().is_empty() {
            self.dashboard.placeholder_image = default_placeholder_image();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        // Trailing slashes would double up with the endpoint paths
        let trimmed = self.api.base_url.trim_end_matches('/').len();
        self.api.base_url.truncate(trimmed);
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.api.timeout_seconds > 300 {
            return Err(FitDashError::config("API timeout cannot exceed 300 seconds").into());
        }

        if self.notifications.dismiss_after_ms == 0 {
            return Err(FitDashError::config(
                "Notification dismiss delay must be greater than zero",
            )
            .into());
        }

        if self.notifications.exit_after_ms > self.notifications.dismiss_after_ms {
            return Err(FitDashError::config(
                "Notification exit transition cannot outlast the dismiss delay",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(FitDashError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(FitDashError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(
                FitDashError::config("API base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        Ok(())
    }
}
