//! Request handlers.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::AppState;
use crate::error::Result;
use crate::form::{ContactForm, RawContactForm};
use crate::submission::Submission;
use crate::views::View;

/// Query string of the confirmation page.
#[derive(Debug, Default, Deserialize)]
pub struct SuccessQuery {
    /// Submission id, unparsed.
    pub id: Option<String>,
}

impl SuccessQuery {
    /// The id as a number, if it is one.
    ///
    /// Surrounding whitespace is ignored. Decimal (`1`, `1.0`, `+1`, `01`),
    /// exponent (`1e0`) and `0x`/`0o`/`0b` forms are accepted as long as they
    /// denote a whole, non-negative, exactly representable value.
    #[must_use]
    pub fn parsed_id(&self) -> Option<u64> {
        parse_whole_number(self.id.as_deref()?.trim())
    }
}

/// Largest integer an `f64` holds exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_whole_number(value: &str) -> Option<u64> {
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let digits = value
            .strip_prefix(prefix)
            .or_else(|| value.strip_prefix(&prefix.to_ascii_uppercase()));
        if let Some(digits) = digits {
            // No sign is allowed after the prefix
            if digits.starts_with('+') {
                return None;
            }
            return u64::from_str_radix(digits, radix).ok();
        }
    }

    // Only plain digits, signs, dots and exponents; rules out `inf` and `NaN`
    if !value
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }

    let number: f64 = value.parse().ok()?;
    if number.fract() != 0.0 || !(0.0..=MAX_EXACT_INTEGER).contains(&number) {
        return None;
    }
    Some(number as u64)
}

/// A `302 Found` redirect.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// `GET /`
pub(crate) async fn form_handler(State(state): State<AppState>) -> Result<Html<String>> {
    let html = state
        .renderer
        .render(View::Form, &json!({ "errors": {}, "values": {} }))?;
    Ok(Html(html))
}

/// `POST /submit`
pub(crate) async fn submit_handler(
    State(state): State<AppState>,
    body: std::result::Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Response> {
    let form: ContactForm = match body {
        Ok(Form(pairs)) => pairs.into_iter().collect::<RawContactForm>().into(),
        Err(rejection) => {
            debug!(%rejection, "Unreadable form body, treating every field as missing");
            ContactForm::default()
        }
    };

    match state.validator.accept(&form) {
        Ok(new_submission) => {
            let record = state.store.append(new_submission);
            info!(
                submission_id = record.id,
                preference = %record.preference,
                "Accepted submission"
            );
            Ok(found(&format!("/success?id={}", record.id)))
        }
        Err(errors) => {
            debug!(error_count = errors.len(), "Rejected submission");
            let html = state
                .renderer
                .render(View::Form, &json!({ "errors": errors, "values": form }))?;
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
    }
}

/// `GET /success?id=<n>`
pub(crate) async fn success_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<SuccessQuery>, QueryRejection>,
) -> Result<Response> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let Some(record) = query.parsed_id().and_then(|id| state.store.find_by_id(id)) else {
        debug!(id = ?query.id, "No submission for confirmation page");
        return Ok(found("/"));
    };

    let html = state
        .renderer
        .render(View::Success, &json!({ "record": record }))?;
    Ok(Html(html).into_response())
}

/// `GET /admin/submissions`
pub(crate) async fn submissions_handler(State(state): State<AppState>) -> Json<Vec<Submission>> {
    Json(state.store.list_all())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(id: Option<&str>) -> SuccessQuery {
        SuccessQuery {
            id: id.map(String::from),
        }
    }

    #[test]
    fn test_parsed_id() {
        assert_eq!(query(Some("1")).parsed_id(), Some(1));
        assert_eq!(query(Some(" 42 ")).parsed_id(), Some(42));
        assert_eq!(query(Some("abc")).parsed_id(), None);
        assert_eq!(query(Some("-1")).parsed_id(), None);
        assert_eq!(query(Some("1.5")).parsed_id(), None);
        assert_eq!(query(Some("")).parsed_id(), None);
        assert_eq!(query(None).parsed_id(), None);
    }

    #[test]
    fn test_parsed_id_numeric_forms() {
        for id in ["+1", "01", "1.0", "1.", "1e0", "0.1e1", "0x1", "0X1", "0o1", "0b1"] {
            assert_eq!(query(Some(id)).parsed_id(), Some(1), "{id}");
        }
        assert_eq!(query(Some("0x1f")).parsed_id(), Some(31));
        assert_eq!(query(Some("-0")).parsed_id(), Some(0));
    }

    #[test]
    fn test_parsed_id_rejects_non_whole_values() {
        for id in [
            "1e-1", "1e400", "Infinity", "inf", "NaN", "0x", "0x+1", "-0x1", "0xg", "1_0", "1 2",
            "9007199254740993",
        ] {
            assert_eq!(query(Some(id)).parsed_id(), None, "{id}");
        }
    }

    #[test]
    fn test_found_sets_location() {
        let response = found("/success?id=3");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/success?id=3"
        );
    }
}
