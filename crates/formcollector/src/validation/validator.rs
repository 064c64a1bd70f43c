//! Contact form validator.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

use super::patterns::{email_pattern, phone_pattern, FieldPattern};
use crate::form::ContactForm;
use crate::submission::{ContactPreference, NewSubmission};

/// Message for a missing or unknown contact preference.
pub const PREFERENCE_MESSAGE: &str = "Select a contact preference";

/// Message for a malformed email address.
pub const EMAIL_MESSAGE: &str = "Enter a valid email address";

/// Message for a malformed phone number.
pub const PHONE_MESSAGE: &str = "Enter a valid phone number";

/// A form field that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// The contact preference radios.
    ContactPreference,
    /// The email input.
    Email,
    /// The phone input.
    Phone,
}

impl Field {
    /// The form field name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContactPreference => "contact_preference",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level error messages. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    /// An empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field, replacing any earlier one.
    pub fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }

    /// The error for a field, if any.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Check if there are no errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

/// Validates contact form submissions.
///
/// Holds the compiled field patterns; build it once and share it.
#[derive(Debug)]
pub struct ContactValidator {
    email: FieldPattern,
    phone: FieldPattern,
}

impl Default for ContactValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactValidator {
    /// Create a validator with the built-in patterns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            email: email_pattern(),
            phone: phone_pattern(),
        }
    }

    /// Compute the field errors for a form.
    ///
    /// Only the detail for the selected channel is checked; with no valid
    /// preference neither detail is looked at.
    #[must_use]
    pub fn validate(&self, form: &ContactForm) -> FieldErrors {
        let mut errors = FieldErrors::new();

        match ContactPreference::parse(&form.contact_preference) {
            None => errors.insert(Field::ContactPreference, PREFERENCE_MESSAGE),
            Some(ContactPreference::Email) => {
                if !self.email.matches(&form.email) {
                    errors.insert(Field::Email, EMAIL_MESSAGE);
                }
            }
            Some(ContactPreference::Phone) => {
                if !self.phone.matches(&form.phone) {
                    errors.insert(Field::Phone, PHONE_MESSAGE);
                }
            }
        }

        trace!(error_count = errors.len(), "Validated contact form");
        errors
    }

    /// Validate a form and build the submission to store.
    ///
    /// # Errors
    ///
    /// Returns the field errors when the form is not valid.
    pub fn accept(&self, form: &ContactForm) -> Result<NewSubmission, FieldErrors> {
        let errors = self.validate(form);
        if !errors.is_empty() {
            return Err(errors);
        }

        match ContactPreference::parse(&form.contact_preference) {
            Some(ContactPreference::Email) => Ok(NewSubmission::email(form.email.clone())),
            Some(ContactPreference::Phone) => Ok(NewSubmission::phone(form.phone.clone())),
            // validate() already flagged this
            None => {
                let mut errors = FieldErrors::new();
                errors.insert(Field::ContactPreference, PREFERENCE_MESSAGE);
                Err(errors)
            }
        }
    }
}
