//! Validation of contact form submissions.
//!
//! The validator is a pure function from a normalized [`ContactForm`] to
//! field-level error messages:
//!
//! - **Contact preference**: must be exactly `email` or `phone`.
//! - **Email**: checked only when email is preferred, against a
//!   `local@domain.tld` shaped pattern.
//! - **Phone**: checked only when phone is preferred; seven or more digits,
//!   spaces, `+`, `(`, `)` or `-`.
//!
//! # Example
//!
//! ```
//! use formcollector::form::ContactForm;
//! use formcollector::validation::{ContactValidator, Field};
//!
//! let validator = ContactValidator::new();
//!
//! let errors = validator.validate(&ContactForm::new("email", "a@b", ""));
//! assert_eq!(errors.get(Field::Email), Some("Enter a valid email address"));
//!
//! let submission = validator
//!     .accept(&ContactForm::new("phone", "", "0123456"))
//!     .expect("valid phone");
//! assert_eq!(submission.contact(), "0123456");
//! ```
//!
//! [`ContactForm`]: crate::form::ContactForm

mod patterns;
mod validator;

pub use patterns::{email_pattern, phone_pattern, FieldPattern, EMAIL_PATTERN, PHONE_PATTERN};
pub use validator::{
    ContactValidator, Field, FieldErrors, EMAIL_MESSAGE, PHONE_MESSAGE, PREFERENCE_MESSAGE,
};
