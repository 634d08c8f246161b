use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::field::Field;
use super::values::FormValues;

/// Minimum accepted password length, in UTF-16 code units.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A failed submit-time check. The display text is the inline message shown under the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("First name is required")]
    FirstNameRequired,
    #[error("Valid email is required")]
    InvalidEmail,
    #[error("Password must be 6+ chars")]
    PasswordTooShort,
    #[error("You must agree to continue")]
    AgreementRequired,
    #[error("Pick a city")]
    CityRequired,
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid hardcoded regex"));

/// Errors from the most recent validation pass, keyed by field.
///
/// A field without an entry is currently valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, ValidationError>);

impl ValidationErrors {
    /// Returns `true` if no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the error recorded for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.0.get(&field)
    }

    /// Returns `true` if `field` failed.
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Iterates failing fields in document order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        self.0.iter().map(|(f, e)| (*f, e))
    }

    fn insert(&mut self, field: Field, error: ValidationError) {
        self.0.insert(field, error);
    }
}

/// Checks `email` against the permissive `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Checks that `password` has at least [`MIN_PASSWORD_LEN`] UTF-16 code units, the
/// length a browser input reports. Characters outside the BMP count twice.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        Err(ValidationError::PasswordTooShort)
    } else {
        Ok(())
    }
}

/// Runs all five submit-time rules independently.
///
/// The city rule checks presence only; a city not offered for the current state passes.
pub fn validate(values: &FormValues) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    if values.first_name.is_empty() {
        errors.insert(Field::FirstName, ValidationError::FirstNameRequired);
    }
    if let Err(e) = validate_email(&values.email) {
        errors.insert(Field::Email, e);
    }
    if let Err(e) = validate_password(&values.password) {
        errors.insert(Field::Password, e);
    }
    if !values.agree {
        errors.insert(Field::Agree, ValidationError::AgreementRequired);
    }
    if values.city.is_empty() {
        errors.insert(Field::City, ValidationError::CityRequired);
    }
    errors
}
