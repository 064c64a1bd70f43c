//! Request body model for the contact form.

use serde::Serialize;

/// The form body as posted. Any field may be missing.
///
/// Collected from decoded `name=value` pairs. When a field is repeated the
/// first value wins; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawContactForm {
    /// Selected radio value.
    pub contact_preference: Option<String>,
    /// Email input.
    pub email: Option<String>,
    /// Phone input.
    pub phone: Option<String>,
}

/// The form with missing fields normalized to empty strings.
///
/// This is both the validator input and the `values` echoed back into the form
/// when validation fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    /// Selected radio value, or empty.
    pub contact_preference: String,
    /// Email input, or empty.
    pub email: String,
    /// Phone input, or empty.
    pub phone: String,
}

impl ContactForm {
    /// Build a normalized form from field values.
    #[must_use]
    pub fn new(
        contact_preference: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            contact_preference: contact_preference.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

impl FromIterator<(String, String)> for RawContactForm {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut form = Self::default();
        for (name, value) in pairs {
            let slot = match name.as_str() {
                "contact_preference" => &mut form.contact_preference,
                "email" => &mut form.email,
                "phone" => &mut form.phone,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        form
    }
}

impl From<RawContactForm> for ContactForm {
    fn from(raw: RawContactForm) -> Self {
        Self {
            contact_preference: raw.contact_preference.unwrap_or_default(),
            email: raw.email.unwrap_or_default(),
            phone: raw.phone.unwrap_or_default(),
        }
    }
}
