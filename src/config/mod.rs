//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `MINDHAVEN` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use mindhaven::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server listening on {}", config.server.socket_addr());
//! ```

mod billing;
mod database;
mod error;
mod providers;
mod server;

pub use billing::BillingConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use providers::{ProviderConfig, PROVIDER_CALL_TIMEOUT_SECS};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the Mindhaven backend.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Payment gateway configuration (Razorpay)
    pub billing: BillingConfig,

    /// External provider configuration (language model, voice, video, speech)
    #[serde(default)]
    pub providers: ProviderConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads environment variables
    /// with the `MINDHAVEN` prefix, `__` separating nested values:
    ///
    /// - `MINDHAVEN__SERVER__PORT=4000` -> `server.port = 4000`
    /// - `MINDHAVEN__BILLING__KEY_ID=rzp_test_x` -> `billing.key_id`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MINDHAVEN")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Missing secrets and malformed URLs are fatal here, at startup,
    /// so request handlers never have to treat them as per-call errors.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.billing.validate()?;
        self.providers.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
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
        env::set_var(
            "MINDHAVEN__DATABASE__URL",
            "postgresql://test@localhost/mindhaven",
        );
        env::set_var("MINDHAVEN__BILLING__KEY_ID", "rzp_test_abc");
        env::set_var("MINDHAVEN__BILLING__KEY_SECRET", "secret");
        env::set_var("MINDHAVEN__BILLING__PLAN_ID", "plan_pro_monthly");
        env::set_var("MINDHAVEN__PROVIDERS__ANTHROPIC_API_KEY", "sk-ant-xxx");
    }

    fn clear_env() {
        env::remove_var("MINDHAVEN__DATABASE__URL");
        env::remove_var("MINDHAVEN__BILLING__KEY_ID");
        env::remove_var("MINDHAVEN__BILLING__KEY_SECRET");
        env::remove_var("MINDHAVEN__BILLING__PLAN_ID");
        env::remove_var("MINDHAVEN__PROVIDERS__ANTHROPIC_API_KEY");
        env::remove_var("MINDHAVEN__SERVER__PORT");
        env::remove_var("MINDHAVEN__SERVER__ENVIRONMENT");
    }

    #[test]
    fn loads_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/mindhaven");
        assert_eq!(config.billing.key_id, "rzp_test_abc");
    }

    #[test]
    fn full_config_validates() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn production_flag_follows_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MINDHAVEN__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }
}
