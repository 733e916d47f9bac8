//! Configuration management for the Contact Book API.
//!
//! This module handles loading and validating configuration from environment variables,
//! reading a `.env` file first when one is present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::fmt;

/// Deployment mode of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Configuration for the Contact Book API.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind (default: "0.0.0.0")
    pub host: String,

    /// TCP port (default: 5000)
    pub port: u16,

    /// Deployment mode (default: development)
    pub environment: Environment,

    /// Log level used when `RUST_LOG` is unset (default: "info")
    pub log_level: String,

    /// Insert the sample contacts at startup (default: false)
    pub seed_sample_data: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `HOST`: Interface to bind (default: "0.0.0.0")
    /// - `PORT`: TCP port (default: 5000)
    /// - `APP_ENV`: "development" or "production" (default: "development")
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `SEED_SAMPLE_DATA`: "true"/"false"/"1"/"0" (default: false)
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is not an error
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        if host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "HOST".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let port = Self::parse_env_u16("PORT", defaults.port)?;
        let environment = Self::parse_env_environment("APP_ENV", defaults.environment)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);
        let seed_sample_data = Self::parse_env_bool("SEED_SAMPLE_DATA", defaults.seed_sample_data)?;

        Ok(Config {
            host,
            port,
            environment,
            log_level,
            seed_sample_data,
        })
    }

    /// Address to bind the HTTP listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse an environment variable as u16 with a default value.
    fn parse_env_u16(var_name: &str, default: u16) -> ConfigResult<u16> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a number between 0-65535, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean flag with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" | "" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a deployment mode with a default value.
    fn parse_env_environment(var_name: &str, default: Environment) -> ConfigResult<Environment> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "production" | "prod" => Ok(Environment::Production),
                "development" | "dev" => Ok(Environment::Development),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be development or production, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: Environment::Development,
            log_level: "info".to_string(),
            seed_sample_data: false,
        }
    }
}
