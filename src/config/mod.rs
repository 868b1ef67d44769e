//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `NATION_BRIDGE` prefix and nested values use `__` as separators.
//!
//! # Example
//!
//! ```no_run
//! use nation_bridge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod nationbuilder;
mod reconciliation;
mod secrets;

pub use error::{ConfigError, ValidationError};
pub use nationbuilder::NationBuilderConfig;
pub use reconciliation::ReconciliationConfig;
pub use secrets::SharedSecret;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// NationBuilder connection (slug, API token)
    pub nationbuilder: NationBuilderConfig,

    /// Reconciliation policy (membership names, secrets, donation options)
    pub reconciliation: ReconciliationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads variables with the
    /// `NATION_BRIDGE` prefix, `__` separating nested values:
    ///
    /// - `NATION_BRIDGE__NATIONBUILDER__SLUG=myorg`
    /// - `NATION_BRIDGE__RECONCILIATION__MEMBERSHIP_NAME=Member`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when required variables are missing or
    /// values cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("NATION_BRIDGE")
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
        self.nationbuilder.validate()?;
        self.reconciliation.validate()?;
        Ok(())
    }
}
