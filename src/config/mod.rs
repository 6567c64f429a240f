//! Application configuration module
//!
//! Configuration is read from environment variables with the `DEBT_PROPOSALS`
//! prefix, using `__` between nested keys. A `.env` file is honoured in
//! development.
//!
//! # Example
//!
//! ```no_run
//! use debt_proposals::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod proposals;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use proposals::ProposalsConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection. Without it the service keeps state in memory.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Default checklist channels
    #[serde(default)]
    pub proposals: ProposalsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `DEBT_PROPOSALS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `DEBT_PROPOSALS__DATABASE__URL=...` -> `database.url = ...`
    /// - `DEBT_PROPOSALS__PROPOSALS__PAYMENT_CHANNELS=pix,boleto` -> comma separated list
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DEBT_PROPOSALS")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("proposals.payment_channels")
                    .with_list_parse_key("proposals.communication_channels"),
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
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.proposals.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
