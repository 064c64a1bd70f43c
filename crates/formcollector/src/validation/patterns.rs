//! Built-in field patterns.
//!
//! Regexes that decide whether a contact detail is well-formed enough to store.

use regex::Regex;
use tracing::trace;

/// A compiled field pattern.
#[derive(Debug)]
pub struct FieldPattern {
    /// Name of the field the pattern checks.
    pub name: &'static str,

    /// The compiled regex.
    regex: Regex,
}

impl FieldPattern {
    /// Create a new field pattern.
    ///
    /// # Panics
    ///
    /// Panics if the regex pattern is invalid.
    #[must_use]
    pub fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("Invalid regex pattern"),
        }
    }

    /// Check if the whole value is accepted by this pattern.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        let matched = self.regex.is_match(value);
        if !matched {
            trace!(pattern = self.name, "Value rejected");
        }
        matched
    }
}

/// Email shaped like `local@domain.tld`: one `@`, a dot after it, no whitespace.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Phone made of at least 7 digits, spaces, `+`, `(`, `)` or `-`.
pub const PHONE_PATTERN: &str = r"^[0-9 +()\-]{7,}$";

/// The email address pattern.
#[must_use]
pub fn email_pattern() -> FieldPattern {
    FieldPattern::new("email", EMAIL_PATTERN)
}

/// The phone number pattern.
#[must_use]
pub fn phone_pattern() -> FieldPattern {
    FieldPattern::new("phone", PHONE_PATTERN)
}
