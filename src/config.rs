//! # Configuration
//!
//! File and environment configuration for shipping operations.
//!
//! [`ShippingConfig`] is loaded from an optional TOML/YAML/JSON file
//! layered with `SHIPPING_*` environment variables (nested keys joined
//! with `__`, e.g. `SHIPPING_AGGREGATION__PER_METHOD_TIMEOUT_MS`).
//! Missing keys fall back to defaults.
//!
//! # Examples
//!
//! ```no_run
//! use commerce_shipping::config::ShippingConfig;
//!
//! let config = ShippingConfig::load("shipping").unwrap();
//! let aggregation = config.aggregation_config();
//! ```

use crate::application::services::rate_aggregation::AggregationConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Aggregation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AggregationSettings {
    /// Per-method timeout in milliseconds; absent disables the guard.
    pub per_method_timeout_ms: Option<u64>,
}

/// Top-level shipping configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShippingConfig {
    /// Rate aggregation settings.
    pub aggregation: AggregationSettings,
}

impl ShippingConfig {
    /// Loads configuration from the given file path (extension optional)
    /// layered with `SHIPPING_*` environment variables.
    ///
    /// The file is optional; missing keys fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file exists but cannot be parsed,
    /// or if a value has the wrong type.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("SHIPPING").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Loads configuration from `SHIPPING_*` environment variables only.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a value has the wrong type.
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("SHIPPING").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Converts the settings into an [`AggregationConfig`].
    #[must_use]
    pub fn aggregation_config(&self) -> AggregationConfig {
        AggregationConfig {
            per_method_timeout_ms: self.aggregation.per_method_timeout_ms,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_timeout() {
        let config = ShippingConfig::default();
        assert_eq!(config.aggregation.per_method_timeout_ms, None);
        assert_eq!(config.aggregation_config(), AggregationConfig::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ShippingConfig::load("/nonexistent/shipping").unwrap();
        assert_eq!(config, ShippingConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let path = std::env::temp_dir().join("commerce_shipping_config_test.toml");
        std::fs::write(
            &path,
            "[aggregation]\nper_method_timeout_ms = 2500\n",
        )
        .unwrap();

        let config = ShippingConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.aggregation.per_method_timeout_ms, Some(2500));
        assert_eq!(
            config.aggregation_config(),
            AggregationConfig::new().with_per_method_timeout(2500)
        );

        std::fs::remove_file(&path).unwrap();
    }
}
