//! Core submission types for formcollector.
//!
//! A [`NewSubmission`] is what a successful validation produces; the store turns
//! it into a [`Submission`] by assigning an id and a timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the user wants to be contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactPreference {
    /// Contact by email.
    Email,
    /// Contact by phone.
    Phone,
}

impl ContactPreference {
    /// Parse the raw form value. Matching is exact: `"Email"` is not a preference.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            _ => None,
        }
    }

    /// The form value for this preference.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl std::fmt::Display for ContactPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated submission that has not been stored yet.
///
/// Carries only the contact detail for the chosen channel, so a stored record can
/// never hold both an email address and a phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    preference: ContactPreference,
    contact: String,
}

impl NewSubmission {
    /// A submission preferring email.
    #[must_use]
    pub fn email(address: impl Into<String>) -> Self {
        Self {
            preference: ContactPreference::Email,
            contact: address.into(),
        }
    }

    /// A submission preferring phone.
    #[must_use]
    pub fn phone(number: impl Into<String>) -> Self {
        Self {
            preference: ContactPreference::Phone,
            contact: number.into(),
        }
    }

    /// The chosen contact preference.
    #[must_use]
    pub fn preference(&self) -> ContactPreference {
        self.preference
    }

    /// The email address or phone number, depending on the preference.
    #[must_use]
    pub fn contact(&self) -> &str {
        &self.contact
    }
}

/// A stored submission.
///
/// Immutable once created. Serializes with explicit `null` for the contact field
/// that was not chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Sequential identifier, starting at 1.
    pub id: u64,

    /// The chosen contact preference.
    pub preference: ContactPreference,

    /// Email address, present only when `preference` is email.
    pub email: Option<String>,

    /// Phone number, present only when `preference` is phone.
    pub phone: Option<String>,

    /// When the submission was stored.
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// Build a stored record from a validated submission.
    #[must_use]
    pub fn new(id: u64, submission: NewSubmission, created_at: DateTime<Utc>) -> Self {
        let (email, phone) = match submission.preference {
            ContactPreference::Email => (Some(submission.contact), None),
            ContactPreference::Phone => (None, Some(submission.contact)),
        };
        Self {
            id,
            preference: submission.preference,
            email,
            phone,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_parse_exact() {
        assert_eq!(ContactPreference::parse("email"), Some(ContactPreference::Email));
        assert_eq!(ContactPreference::parse("phone"), Some(ContactPreference::Phone));
        assert_eq!(ContactPreference::parse("Email"), None);
        assert_eq!(ContactPreference::parse(" phone"), None);
        assert_eq!(ContactPreference::parse("post"), None);
        assert_eq!(ContactPreference::parse(""), None);
    }

    #[test]
    fn test_preference_display() {
        assert_eq!(ContactPreference::Email.to_string(), "email");
        assert_eq!(ContactPreference::Phone.to_string(), "phone");
    }

    #[test]
    fn test_preference_serde() {
        let json = serde_json::to_string(&ContactPreference::Phone).unwrap();
        assert_eq!(json, "\"phone\"");

        let parsed: ContactPreference = serde_json::from_str("\"email\"").unwrap();
        assert_eq!(parsed, ContactPreference::Email);
    }

    #[test]
    fn test_new_submission_email() {
        let new = NewSubmission::email("test@example.com");
        assert_eq!(new.preference(), ContactPreference::Email);
        assert_eq!(new.contact(), "test@example.com");
    }

    #[test]
    fn test_submission_populates_only_chosen_channel() {
        let now = Utc::now();

        let email = Submission::new(1, NewSubmission::email("a@b.co"), now);
        assert_eq!(email.email.as_deref(), Some("a@b.co"));
        assert!(email.phone.is_none());

        let phone = Submission::new(2, NewSubmission::phone("0123456"), now);
        assert!(phone.email.is_none());
        assert_eq!(phone.phone.as_deref(), Some("0123456"));
    }

    #[test]
    fn test_submission_serializes_nulls() {
        let submission = Submission::new(1, NewSubmission::email("test@example.com"), Utc::now());
        let value = serde_json::to_value(&submission).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["preference"], "email");
        assert_eq!(value["email"], "test@example.com");
        assert!(value["phone"].is_null());
        assert!(value.get("phone").is_some());
        assert!(value["created_at"].is_string());
    }

    #[test]
    fn test_submission_roundtrip_timestamp() {
        let submission = Submission::new(3, NewSubmission::phone("+44 20 7946 0958"), Utc::now());
        let json = serde_json::to_string(&submission).unwrap();
        let parsed: Submission = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, submission);
    }
}
