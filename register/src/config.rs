//! Configuration module for TaskAgile registration.
//!
//! This module handles parsing configuration from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `TASKAGILE_API_URL` | No | `http://localhost:8080` | Origin of the TaskAgile backend |
//! | `TASKAGILE_REQUEST_TIMEOUT_SECS` | No | 30 | Registration request timeout |
//!
//! # Example
//!
//! ```no_run
//! use taskagile_register::config::Config;
//!
//! let config = Config::from_env().expect("Failed to load configuration");
//! println!("API URL: {}", config.api_url);
//! ```

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Default backend origin, where the development proxy forwards `/api/*`.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Configuration for the registration client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend origin without trailing slash (e.g., `https://taskagile.example`).
    pub api_url: String,

    /// Timeout applied to each registration request.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - `TASKAGILE_API_URL` is set but empty
    /// - `TASKAGILE_REQUEST_TIMEOUT_SECS` is set but is not a positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        // Optional: TASKAGILE_API_URL (default: http://localhost:8080)
        let api_url = match env::var("TASKAGILE_API_URL") {
            Ok(val) => {
                let trimmed = val.trim().trim_end_matches('/');
                if trimmed.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: "TASKAGILE_API_URL".to_string(),
                        message: "URL cannot be empty".to_string(),
                    });
                }
                trimmed.to_string()
            }
            Err(_) => DEFAULT_API_URL.to_string(),
        };

        // Optional: TASKAGILE_REQUEST_TIMEOUT_SECS (default: 30, must be > 0)
        let timeout_secs = match env::var("TASKAGILE_REQUEST_TIMEOUT_SECS") {
            Ok(val) => {
                let secs = val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "TASKAGILE_REQUEST_TIMEOUT_SECS".to_string(),
                    message: format!("expected positive integer, got '{val}'"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "TASKAGILE_REQUEST_TIMEOUT_SECS".to_string(),
                        message: "timeout must be at least 1 second".to_string(),
                    });
                }
                secs
            }
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
