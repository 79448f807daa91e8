//! TaskAgile registration - account creation page logic.
//!
//! This crate implements the decision logic behind the TaskAgile
//! "create account" page: validating the username, email address and
//! password, submitting valid forms to the registration service, and routing
//! to the login view or revealing a failure message.
//!
//! # Modules
//!
//! - [`form`]: Registration form data model and render snapshot
//! - [`validation`]: Field rules and validation results
//! - [`client`]: Registration service trait and HTTP implementation
//! - [`router`]: View navigation trait
//! - [`controller`]: The registration page controller
//! - [`config`]: Configuration from environment variables
//! - [`error`]: Error types for registration operations

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod router;
pub mod validation;

pub use client::{HttpRegistrationClient, RegistrationClient, RegistrationError, SubmissionOutcome};
pub use config::{Config, ConfigError};
pub use controller::RegisterPage;
pub use error::{Error, Result};
pub use form::{Field, FormSnapshot, RegistrationForm};
pub use router::{Destination, Router, TracingRouter};
pub use validation::{validate, ValidationError, ValidationResult, Violation};
