//! Validation rules for the registration form.
//!
//! Validation is a pure function of the current field values; it never
//! touches the network.
//!
//! # Rules
//!
//! | Field | Rules |
//! |-------|-------|
//! | `username` | required, 2-50 characters, letters and digits only |
//! | `emailAddress` | required, `local@domain` shape (local part 64 max), at most 100 characters |
//! | `password` | required, 6-30 characters |
//!
//! An empty field reports [`ValidationError::Required`] and nothing else.
//! Otherwise every rule the value breaks is reported.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::form::{Field, RegistrationForm};

/// Minimum username length in characters.
pub const USERNAME_MIN_LENGTH: usize = 2;

/// Maximum username length in characters.
pub const USERNAME_MAX_LENGTH: usize = 50;

/// Maximum email address length in characters.
pub const EMAIL_ADDRESS_MAX_LENGTH: usize = 100;

/// Maximum length of the part before `@` (RFC 5321).
pub const EMAIL_LOCAL_PART_MAX_LENGTH: usize = 64;

/// Minimum password length in characters.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Maximum password length in characters.
pub const PASSWORD_MAX_LENGTH: usize = 30;

/// WHATWG "valid e-mail address" grammar.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is a valid regex")
});

/// A single rule broken by a field value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The field is empty.
    #[error("is required")]
    Required,

    /// The value is shorter than the allowed minimum.
    #[error("must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// The value is longer than the allowed maximum.
    #[error("must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// The value contains something other than ASCII letters and digits.
    #[error("can only contain letters and numbers")]
    NotAlphanumeric,

    /// The value is not shaped like `local@domain`.
    #[error("is not a valid email address")]
    MalformedEmail,
}

/// A rule broken by one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: Field,
    pub error: ValidationError,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.error)
    }
}

/// Outcome of validating a whole form.
///
/// # Example
///
/// ```
/// use taskagile_register::form::{Field, RegistrationForm};
/// use taskagile_register::validation::validate;
///
/// let result = validate(&RegistrationForm::new("a", "sunny@taskagile.com", "JestRocks!"));
/// assert!(!result.is_valid());
/// assert!(!result.is_field_valid(Field::Username));
/// assert!(result.is_field_valid(Field::EmailAddress));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    violations: Vec<Violation>,
}

impl ValidationResult {
    /// Returns `true` when every field passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns `true` when `field` broke no rule.
    #[must_use]
    pub fn is_field_valid(&self, field: Field) -> bool {
        !self.violations.iter().any(|v| v.field == field)
    }

    /// Returns the rules broken by `field`.
    pub fn errors_for(&self, field: Field) -> impl Iterator<Item = &ValidationError> {
        self.violations
            .iter()
            .filter(move |v| v.field == field)
            .map(|v| &v.error)
    }

    /// Returns every violation in field order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns the number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns `true` when there are no violations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validates all three fields of `form`.
#[must_use]
pub fn validate(form: &RegistrationForm) -> ValidationResult {
    let mut violations = Vec::new();

    for field in Field::ALL {
        let value = form.get(field);
        let errors = match field {
            Field::Username => validate_username(value),
            Field::EmailAddress => validate_email_address(value),
            Field::Password => validate_password(value),
        };
        violations.extend(errors.into_iter().map(|error| Violation { field, error }));
    }

    ValidationResult { violations }
}

/// Checks a username against the username rules.
#[must_use]
pub fn validate_username(username: &str) -> Vec<ValidationError> {
    if username.is_empty() {
        return vec![ValidationError::Required];
    }

    let mut errors = check_length(username, Some(USERNAME_MIN_LENGTH), USERNAME_MAX_LENGTH);
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push(ValidationError::NotAlphanumeric);
    }
    errors
}

/// Checks an email address against the email rules.
#[must_use]
pub fn validate_email_address(email_address: &str) -> Vec<ValidationError> {
    if email_address.is_empty() {
        return vec![ValidationError::Required];
    }

    let local_part_too_long = email_address
        .split_once('@')
        .is_some_and(|(local, _)| local.chars().count() > EMAIL_LOCAL_PART_MAX_LENGTH);

    let mut errors = Vec::new();
    if local_part_too_long || !EMAIL_PATTERN.is_match(email_address) {
        errors.push(ValidationError::MalformedEmail);
    }
    errors.extend(check_length(email_address, None, EMAIL_ADDRESS_MAX_LENGTH));
    errors
}

/// Checks a password against the password rules.
#[must_use]
pub fn validate_password(password: &str) -> Vec<ValidationError> {
    if password.is_empty() {
        return vec![ValidationError::Required];
    }

    check_length(password, Some(PASSWORD_MIN_LENGTH), PASSWORD_MAX_LENGTH)
}

fn check_length(value: &str, min: Option<usize>, max: usize) -> Vec<ValidationError> {
    let actual = value.chars().count();
    match min {
        Some(min) if actual < min => vec![ValidationError::TooShort { min, actual }],
        _ if actual > max => vec![ValidationError::TooLong { max, actual }],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm::new("MyUsername", "sunny@taskagile.com", "MyPassword")
    }

    #[test]
    fn valid_form_has_no_violations() {
        let result = validate(&valid_form());
        assert!(result.is_valid());
        assert!(result.is_empty());
    }

    #[test]
    fn blank_form_reports_three_violations() {
        let result = validate(&RegistrationForm::default());
        assert_eq!(result.len(), 3);
        for field in Field::ALL {
            let errors: Vec<_> = result.errors_for(field).collect();
            assert_eq!(errors, vec![&ValidationError::Required]);
        }
    }

    #[test]
    fn single_character_username_fails() {
        let mut form = valid_form();
        form.username = "a".to_string();

        let result = validate(&form);
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.violations()[0],
            Violation {
                field: Field::Username,
                error: ValidationError::TooShort { min: 2, actual: 1 },
            }
        );
    }

    #[test]
    fn two_character_username_passes() {
        assert!(validate_username("ab").is_empty());
    }

    #[test]
    fn username_longer_than_50_fails() {
        let mut form = valid_form();
        form.username = "u".repeat(51);

        let result = validate(&form);
        assert_eq!(result.len(), 1);
        assert!(!result.is_field_valid(Field::Username));
        assert!(validate_username(&"u".repeat(50)).is_empty());
    }

    #[test]
    fn username_with_symbols_fails() {
        assert_eq!(
            validate_username("sunny!"),
            vec![ValidationError::NotAlphanumeric]
        );
        assert_eq!(
            validate_username("sunny day"),
            vec![ValidationError::NotAlphanumeric]
        );
    }

    #[test]
    fn username_length_counts_characters_not_bytes() {
        // Two characters, four bytes: long enough, but not ASCII alphanumeric.
        assert_eq!(validate_username("éé"), vec![ValidationError::NotAlphanumeric]);
    }

    #[test]
    fn email_without_at_sign_fails() {
        assert_eq!(
            validate_email_address("bad-email-address"),
            vec![ValidationError::MalformedEmail]
        );
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email_address("sunny@taskagile.com").is_empty());
        assert!(validate_email_address("sunny@local").is_empty());
        assert!(validate_email_address("first.last+tag@mail.example.org").is_empty());

        for bad in [
            "@taskagile.com",
            "sunny@",
            "sunny@@taskagile.com",
            "sun ny@taskagile.com",
            "sunny@-bad.com",
        ] {
            assert_eq!(
                validate_email_address(bad),
                vec![ValidationError::MalformedEmail],
                "{bad} should be malformed"
            );
        }
    }

    #[test]
    fn email_longer_than_100_fails_once() {
        let local_part = "l".repeat(64);
        let used = local_part.len() + "@".len() + ".com".len();
        let domain = "d".repeat(101 - used);
        let email = format!("{local_part}@{domain}.com");
        assert_eq!(email.len(), 101);

        let mut form = valid_form();
        form.email_address = email;

        let result = validate(&form);
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.errors_for(Field::EmailAddress).next(),
            Some(&ValidationError::TooLong { max: 100, actual: 101 })
        );
    }

    #[test]
    fn email_of_exactly_100_passes() {
        let local_part = "l".repeat(64);
        let used = local_part.len() + "@".len() + ".com".len();
        let domain = "d".repeat(100 - used);
        let email = format!("{local_part}@{domain}.com");
        assert_eq!(email.len(), 100);

        assert!(validate_email_address(&email).is_empty());
    }

    #[test]
    fn email_local_part_limited_to_64() {
        let at_limit = format!("{}@taskagile.com", "l".repeat(64));
        assert!(validate_email_address(&at_limit).is_empty());

        let over_limit = format!("{}@taskagile.com", "l".repeat(65));
        assert_eq!(
            validate_email_address(&over_limit),
            vec![ValidationError::MalformedEmail]
        );
    }

    #[test]
    fn short_password_fails() {
        assert_eq!(
            validate_password("bad!"),
            vec![ValidationError::TooShort { min: 6, actual: 4 }]
        );

        let mut form = valid_form();
        form.password = "p".repeat(5);
        assert_eq!(validate(&form).len(), 1);
    }

    #[test]
    fn long_password_fails() {
        let mut form = valid_form();
        form.password = "p".repeat(31);

        let result = validate(&form);
        assert_eq!(result.len(), 1);
        assert!(!result.is_field_valid(Field::Password));
    }

    #[test]
    fn password_boundaries_pass() {
        assert!(validate_password(&"p".repeat(6)).is_empty());
        assert!(validate_password(&"p".repeat(30)).is_empty());
        assert!(validate_password("JestRocks!").is_empty());
    }

    #[test]
    fn validate_is_idempotent() {
        let form = RegistrationForm::new("a", "bad-email-address", "bad!");
        let first = validate(&form);
        let second = validate(&form);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn violation_display() {
        let violation = Violation {
            field: Field::Password,
            error: ValidationError::TooShort { min: 6, actual: 4 },
        };
        assert_eq!(
            violation.to_string(),
            "password must be at least 6 characters (got 4)"
        );
    }
}
