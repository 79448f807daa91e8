//! Registration service client.
//!
//! The [`RegistrationClient`] trait is the seam between the page controller
//! and the backend. [`HttpRegistrationClient`] talks to a TaskAgile server:
//!
//! - `POST {api_url}/api/registrations` with the form as camelCase JSON
//! - `200`/`201` means the account was created
//! - `409` means the username or email address is already taken
//! - `400` means the server refused the payload
//!
//! # Example
//!
//! ```no_run
//! use taskagile_register::client::{HttpRegistrationClient, RegistrationClient, SubmissionOutcome};
//! use taskagile_register::config::Config;
//! use taskagile_register::form::RegistrationForm;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = HttpRegistrationClient::from_config(&Config::default()).unwrap();
//!     let form = RegistrationForm::new("sunny", "sunny@taskagile.com", "JestRocks!");
//!
//!     match client.register(&form).await.unwrap() {
//!         SubmissionOutcome::Success => println!("registered"),
//!         SubmissionOutcome::Conflict { message } => println!("taken: {message}"),
//!     }
//! }
//! ```

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::form::RegistrationForm;

/// Path of the registration endpoint, relative to the API origin.
const REGISTRATIONS_PATH: &str = "/api/registrations";

/// Message used when a conflict response carries no body.
const DEFAULT_CONFLICT_MESSAGE: &str = "user already exists";

/// Result of a registration attempt the service answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The account was created.
    Success,

    /// The requested identity already exists.
    Conflict { message: String },
}

/// Errors other than a conflict that stop a registration.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Transport failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server refused the payload (400).
    #[error("registration rejected: {message}")]
    Rejected { message: String },

    /// Any other unexpected status.
    #[error("server error: {status} - {message}")]
    Server { status: u16, message: String },
}

/// Capability that creates a new user identity.
///
/// Injected into [`RegisterPage`](crate::controller::RegisterPage) so tests
/// can substitute a double.
pub trait RegistrationClient {
    /// Attempts to register `form`.
    fn register(
        &self,
        form: &RegistrationForm,
    ) -> impl Future<Output = std::result::Result<SubmissionOutcome, RegistrationError>> + Send;
}

/// Error body returned by the TaskAgile API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// [`RegistrationClient`] backed by the TaskAgile HTTP API.
#[derive(Debug, Clone)]
pub struct HttpRegistrationClient {
    client: Client,
    url: String,
}

impl HttpRegistrationClient {
    /// Creates a client for the API at `api_url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RegistrationError::from)?;

        Ok(Self {
            client,
            url: format!("{}{}", api_url.trim_end_matches('/'), REGISTRATIONS_PATH),
        })
    }

    /// Creates a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, config.request_timeout)
    }

    /// Returns the full URL registrations are posted to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(
        &self,
        form: &RegistrationForm,
    ) -> std::result::Result<SubmissionOutcome, RegistrationError> {
        debug!(url = %self.url, username = %form.username, "Sending registration");

        let response = self.client.post(&self.url).json(form).send().await?;
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::CREATED => {
                info!(username = %form.username, "Registration accepted");
                Ok(SubmissionOutcome::Success)
            }
            StatusCode::CONFLICT => {
                let message = error_message(response)
                    .await
                    .unwrap_or_else(|| DEFAULT_CONFLICT_MESSAGE.to_string());
                info!(username = %form.username, message = %message, "Registration conflict");
                Ok(SubmissionOutcome::Conflict { message })
            }
            StatusCode::BAD_REQUEST => {
                let message = error_message(response)
                    .await
                    .unwrap_or_else(|| "bad request".to_string());
                warn!(message = %message, "Registration rejected by server");
                Err(RegistrationError::Rejected { message })
            }
            _ => {
                let message = response.text().await.unwrap_or_default();
                warn!(
                    status = status.as_u16(),
                    message = %message,
                    "Unexpected registration response"
                );
                Err(RegistrationError::Server {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

impl RegistrationClient for HttpRegistrationClient {
    fn register(
        &self,
        form: &RegistrationForm,
    ) -> impl Future<Output = std::result::Result<SubmissionOutcome, RegistrationError>> + Send
    {
        self.post(form)
    }
}

/// Reads the `message` field of a JSON error body, if any.
async fn error_message(response: reqwest::Response) -> Option<String> {
    let text = response.text().await.ok()?;
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.message.filter(|m| !m.is_empty()),
        Err(_) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Err(_) => None,
    }
}
