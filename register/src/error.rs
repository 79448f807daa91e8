//! Error types for TaskAgile registration.
//!
//! Validation failures are not errors at this level: they block submission
//! locally and are reported through [`ValidationResult`](crate::validation::ValidationResult).

use thiserror::Error;

use crate::client::RegistrationError;
use crate::config::ConfigError;

/// Errors that can occur while setting up or talking to the registration service.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Registration service error.
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),
}

/// A specialized `Result` type for registration operations.
pub type Result<T> = std::result::Result<T, Error>;
