//! Registration form data model.
//!
//! The form is the request body of the registration service, so all types
//! serialize to camelCase JSON (`username`, `emailAddress`, `password`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// One input of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Username,
    EmailAddress,
    Password,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 3] = [Field::Username, Field::EmailAddress, Field::Password];

    /// Returns the JSON name of the field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::EmailAddress => "emailAddress",
            Field::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values entered on the registration page.
///
/// All fields start empty.
///
/// # Example
///
/// ```
/// use taskagile_register::form::{Field, RegistrationForm};
///
/// let mut form = RegistrationForm::default();
/// form.set(Field::Username, "sunny");
/// assert_eq!(form.get(Field::Username), "sunny");
/// assert!(form.email_address.is_empty());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub username: String,
    pub email_address: String,
    pub password: String,
}

impl RegistrationForm {
    /// Creates a form with all three values filled in.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email_address: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email_address: email_address.into(),
            password: password.into(),
        }
    }

    /// Returns the current value of `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::EmailAddress => &self.email_address,
            Field::Password => &self.password,
        }
    }

    /// Replaces the value of `field`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Username => self.username = value,
            Field::EmailAddress => self.email_address = value,
            Field::Password => self.password = value,
        }
    }
}

// Hand-written so the password never ends up in logs.
impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("email_address", &self.email_address)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Read-only view of the page state for a rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    /// Current field values.
    pub form: RegistrationForm,

    /// Whether the failure indicator is visible.
    pub failed: bool,

    /// Message shown inside the failure indicator.
    pub error_message: Option<String>,

    /// Whether a registration call is in flight.
    pub submitting: bool,
}
