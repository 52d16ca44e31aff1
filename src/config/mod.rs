//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CULTURE_INSIGHTS_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use culture_insights::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("k-anonymity threshold: {}", config.aggregation.k_anonymity_threshold);
//! ```

mod aggregation;
mod database;
mod error;
mod logging;

pub use aggregation::AggregationConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{Environment, LogFormat, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Aggregation engine configuration
    #[serde(default)]
    pub aggregation: AggregationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CULTURE_INSIGHTS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CULTURE_INSIGHTS__DATABASE__URL=...` -> `database.url = ...`
    /// - `CULTURE_INSIGHTS__AGGREGATION__K_ANONYMITY_THRESHOLD=10`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CULTURE_INSIGHTS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.aggregation.validate(&self.logging.environment)?;
        self.logging.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.logging.environment == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("CULTURE_INSIGHTS__DATABASE__URL", "postgresql://test@localhost/test");
    }

    fn clear_env() {
        env::remove_var("CULTURE_INSIGHTS__DATABASE__URL");
        env::remove_var("CULTURE_INSIGHTS__AGGREGATION__K_ANONYMITY_THRESHOLD");
        env::remove_var("CULTURE_INSIGHTS__LOGGING__ENVIRONMENT");
        env::remove_var("CULTURE_INSIGHTS__LOGGING__FORMAT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.aggregation.k_anonymity_threshold, 7);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CULTURE_INSIGHTS__AGGREGATION__K_ANONYMITY_THRESHOLD", "10");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.aggregation.threshold().unwrap().value(), 10);
    }

    #[test]
    fn test_production_rejects_lowered_threshold() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CULTURE_INSIGHTS__AGGREGATION__K_ANONYMITY_THRESHOLD", "3");
        env::set_var("CULTURE_INSIGHTS__LOGGING__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ThresholdBelowProductionMinimum(3, 7))
        ));
    }

    #[test]
    fn test_json_log_format() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CULTURE_INSIGHTS__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().logging.format, LogFormat::Json);
    }

    #[test]
    fn test_missing_database_url_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }
}
