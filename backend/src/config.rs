//! Configuration management for the Utzk'aslem dashboard server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with UTZ__ prefix

use std::path::PathBuf;
use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::ActivityType;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// SMS gateway transport configuration
    pub gateway: GatewaySettings,

    /// Messaging deep-link configuration
    pub deep_link: DeepLinkConfig,

    /// Dashboard behaviour
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key; empty means simulated data
    pub api_key: String,

    /// Language for condition text
    pub lang: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GatewaySettings {
    /// File holding the user-saved gateway configuration
    pub config_path: PathBuf,

    /// Path appended to each endpoint base URL
    pub send_path: String,

    /// Per-attempt timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeepLinkConfig {
    /// Messaging provider base URL
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Activity used before the user picks one
    pub default_activity: ActivityType,

    /// Fetch weather for every department at startup
    pub refresh_on_startup: bool,
}

impl WeatherConfig {
    pub fn is_live(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl GatewaySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("UTZ_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::builder(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (UTZ__ prefix)
            .add_source(
                Environment::with_prefix("UTZ")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Code defaults only
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder("development")?.build()?.try_deserialize()
    }

    fn builder(
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_endpoint", "https://api.weatherapi.com/v1")?
            .set_default("weather.api_key", "")?
            .set_default("weather.lang", "es")?
            .set_default("weather.timeout_secs", 10)?
            .set_default("gateway.config_path", "data/sms_gateway_config.json")?
            .set_default("gateway.send_path", "/send")?
            .set_default("gateway.timeout_secs", 10)?
            .set_default("deep_link.base_url", "https://api.whatsapp.com/send")?
            .set_default("dashboard.default_activity", "planting")?
            .set_default("dashboard.refresh_on_startup", true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::defaults().unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.weather.api_endpoint, "https://api.weatherapi.com/v1");
        assert!(!config.weather.is_live());
        assert_eq!(config.weather.timeout(), Duration::from_secs(10));
        assert_eq!(config.gateway.send_path, "/send");
        assert_eq!(config.deep_link.base_url, "https://api.whatsapp.com/send");
        assert_eq!(config.dashboard.default_activity, ActivityType::Planting);
        assert!(config.dashboard.refresh_on_startup);
    }
}
