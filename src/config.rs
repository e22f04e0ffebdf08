//! Configuration management for the nearby finder
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::models::Coordinates;
use crate::FinderError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinderConfig {
    /// Where listings are loaded from
    #[serde(default)]
    pub listings: ListingsConfig,
    /// Search defaults and limits
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP API settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Listing source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsConfig {
    /// URL of a remote listing document, tried first
    pub url: Option<String>,
    /// Path of a local listing document, tried when no URL is set
    pub file: Option<String>,
    /// Request timeout in seconds for the remote document
    #[serde(default = "default_listings_timeout")]
    pub timeout_seconds: u32,
}

/// Search defaults and limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Latitude of the default center
    #[serde(default = "default_center_latitude")]
    pub center_latitude: f64,
    /// Longitude of the default center
    #[serde(default = "default_center_longitude")]
    pub center_longitude: f64,
    /// Largest radius accepted from users, in kilometers
    #[serde(default = "default_max_radius")]
    pub max_radius_km: f64,
    /// Maximum number of results shown
    #[serde(default = "default_max_results")]
    pub max_results: usize,
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

/// HTTP API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_port")]
    pub port: u16,
}

// Default value functions
fn default_listings_timeout() -> u32 {
    10
}

fn default_center_latitude() -> f64 {
    1.3048
}

fn default_center_longitude() -> f64 {
    103.8318
}

fn default_max_radius() -> f64 {
    50.0
}

fn default_max_results() -> usize {
    50
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_port() -> u16 {
    8080
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            url: None,
            file: None,
            timeout_seconds: default_listings_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            center_latitude: default_center_latitude(),
            center_longitude: default_center_longitude(),
            max_radius_km: default_max_radius(),
            max_results: default_max_results(),
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

impl ListingsConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }
}

impl SearchConfig {
    /// The configured default center
    #[must_use]
    pub fn default_center(&self) -> Coordinates {
        Coordinates::new(self.center_latitude, self.center_longitude)
    }
}

impl FinderConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. NEARBY__SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("NEARBY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: FinderConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nearby-finder").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.listings.url.as_deref().is_some_and(str::is_empty) {
            self.listings.url = None;
        }
        if self.listings.file.as_deref().is_some_and(str::is_empty) {
            self.listings.file = None;
        }
        if self.listings.timeout_seconds == 0 {
            self.listings.timeout_seconds = default_listings_timeout();
        }
        if self.search.max_results == 0 {
            self.search.max_results = default_max_results();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.listings.timeout_seconds > 300 {
            return Err(
                FinderError::config("Listing fetch timeout cannot exceed 300 seconds").into(),
            );
        }

        if !self.search.default_center().is_valid() {
            return Err(FinderError::config(format!(
                "Default center ({}, {}) is not a valid coordinate",
                self.search.center_latitude, self.search.center_longitude
            ))
            .into());
        }

        // Half the earth's circumference bounds every great-circle distance
        if !(self.search.max_radius_km > 0.0 && self.search.max_radius_km <= 20_000.0) {
            return Err(FinderError::config(
                "Maximum search radius must be between 0 and 20000 km",
            )
            .into());
        }

        if self.search.max_results > 1000 {
            return Err(FinderError::config("Maximum results cannot exceed 1000").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(FinderError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(FinderError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if let Some(url) = &self.listings.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(FinderError::config(
                    "Listing document URL must be a valid HTTP or HTTPS URL",
                )
                .into());
            }
        }

        Ok(())
    }
}
