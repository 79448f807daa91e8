//! Registration page controller.
//!
//! [`RegisterPage`] owns the form for one registration attempt. It validates
//! on demand, submits through an injected [`RegistrationClient`] and reports
//! the outcome either as a navigation to the login view or as a visible
//! failure indicator.
//!
//! # Submission
//!
//! ```text
//! submit_form()
//!   ├─ any field invalid ──────────────▶ nothing happens
//!   └─ all fields valid ─▶ client.register(form)
//!                            ├─ Success ─▶ router.navigate(LoginPage)
//!                            ├─ Conflict ▶ failed = true
//!                            └─ Err ─────▶ failed = true
//! ```
//!
//! `submit_form` borrows the controller mutably, so a second submission can
//! only start once the first has resolved.
//!
//! # Observing state
//!
//! Every mutation publishes a [`FormSnapshot`] on a `tokio::sync::watch`
//! channel; a rendering layer holds the receiver returned by
//! [`RegisterPage::subscribe`].

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::{RegistrationClient, SubmissionOutcome};
use crate::form::{Field, FormSnapshot, RegistrationForm};
use crate::router::{Destination, Router};
use crate::validation::{self, ValidationResult};

/// Prefix of every message shown in the failure indicator.
const FAILURE_PREFIX: &str = "Failed to register user.";

/// Controller behind the "create account" page.
///
/// # Example
///
/// ```no_run
/// use taskagile_register::client::HttpRegistrationClient;
/// use taskagile_register::config::Config;
/// use taskagile_register::controller::RegisterPage;
/// use taskagile_register::form::Field;
/// use taskagile_register::router::TracingRouter;
///
/// #[tokio::main]
/// async fn main() {
///     let client = HttpRegistrationClient::from_config(&Config::default()).unwrap();
///     let mut page = RegisterPage::new(client, TracingRouter::new());
///
///     page.update_field(Field::Username, "sunny");
///     page.update_field(Field::EmailAddress, "sunny@taskagile.com");
///     page.update_field(Field::Password, "JestRocks!");
///     page.submit_form().await;
///
///     if page.is_failed() {
///         eprintln!("{}", page.error_message().unwrap_or_default());
///     }
/// }
/// ```
#[derive(Debug)]
pub struct RegisterPage<C, R> {
    client: C,
    router: R,
    form: RegistrationForm,
    failed: bool,
    error_message: Option<String>,
    submitting: bool,
    updates: watch::Sender<FormSnapshot>,
}

impl<C, R> RegisterPage<C, R>
where
    C: RegistrationClient,
    R: Router,
{
    /// Creates a page with an empty form.
    #[must_use]
    pub fn new(client: C, router: R) -> Self {
        let (updates, _) = watch::channel(FormSnapshot::default());
        Self {
            client,
            router,
            form: RegistrationForm::default(),
            failed: false,
            error_message: None,
            submitting: false,
            updates,
        }
    }

    /// Replaces the value of one field. Does not validate.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
        self.publish();
    }

    /// Validates the current field values.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        validation::validate(&self.form)
    }

    /// Submits the form if every field is valid.
    ///
    /// Invalid input makes this a no-op: the client is not called and the
    /// failure indicator is left untouched.
    pub async fn submit_form(&mut self) {
        let result = self.validate();
        if !result.is_valid() {
            let fields: Vec<&str> = result.violations().iter().map(|v| v.field.as_str()).collect();
            debug!(?fields, "Submission blocked by validation");
            return;
        }

        self.failed = false;
        self.error_message = None;
        self.submitting = true;
        self.publish();

        let outcome = self.client.register(&self.form).await;
        self.submitting = false;

        match outcome {
            Ok(SubmissionOutcome::Success) => {
                info!(username = %self.form.username, "Registered, redirecting to login");
                self.publish();
                self.router.navigate(Destination::login_page());
            }
            Ok(SubmissionOutcome::Conflict { message }) => {
                info!(username = %self.form.username, message = %message, "Registration conflict");
                self.fail(&message);
            }
            Err(e) => {
                warn!(error = %e, "Registration failed");
                self.fail(&e.to_string());
            }
        }
    }

    /// Returns `true` when the failure indicator is visible.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Returns the message shown in the failure indicator.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the current field values.
    #[must_use]
    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// Returns a copy of the current page state.
    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            form: self.form.clone(),
            failed: self.failed,
            error_message: self.error_message.clone(),
            submitting: self.submitting,
        }
    }

    /// Returns a receiver that observes every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.updates.subscribe()
    }

    fn fail(&mut self, reason: &str) {
        self.failed = true;
        self.error_message = Some(format!("{FAILURE_PREFIX} {reason}"));
        self.publish();
    }

    fn publish(&self) {
        self.updates.send_replace(self.snapshot());
    }
}
