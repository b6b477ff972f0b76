//! Response error envelope detection
//!
//! The API reports application-level failures inside HTTP 200 bodies using
//! `Response`, `Type` and `Message` fields. Every decoded body passes through
//! [`check_response`] before a caller sees it.

use crate::{constants::ERROR_TYPE_THRESHOLD, error::ApiError};
use serde_json::Value;

/// Inspects a decoded body for the error envelope
///
/// Non-object bodies always pass. An object is an error when its `Response`
/// equals `"Error"`, or its `Type` is numeric and below
/// [`ERROR_TYPE_THRESHOLD`]. A missing `Type` counts as passing.
pub fn check_response(body: &Value) -> Result<(), ApiError> {
    let Some(map) = body.as_object() else {
        return Ok(());
    };

    let explicit_error = map.get("Response").and_then(Value::as_str) == Some("Error");
    let low_type = map
        .get("Type")
        .and_then(type_code)
        .is_some_and(|code| code < ERROR_TYPE_THRESHOLD as f64);

    if explicit_error || low_type {
        let message = map.get("Message").and_then(render_message);
        return Err(ApiError::new(message));
    }

    Ok(())
}

/// Strings are taken as is, other non-null values in their JSON form
fn render_message(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn type_code(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_passes() {
        assert!(check_response(&json!({})).is_ok());
    }

    #[test]
    fn test_sequences_never_raise() {
        assert!(check_response(&json!([])).is_ok());
        assert!(check_response(&json!([{"Response": "Error", "Type": 1}])).is_ok());
    }

    #[test]
    fn test_scalars_pass() {
        assert!(check_response(&json!("Error")).is_ok());
        assert!(check_response(&json!(null)).is_ok());
    }

    #[test]
    fn test_regular_data_passes() {
        assert!(check_response(&json!({"a": "b"})).is_ok());
        assert!(check_response(&json!({"BTC": {"USD": 50000.0}})).is_ok());
    }

    #[test]
    fn test_explicit_error_response() {
        let err = check_response(&json!({"Response": "Error"})).unwrap_err();
        assert_eq!(err.message, None);
    }

    #[test]
    fn test_error_has_message() {
        let err = check_response(&json!({
            "Response": "Error",
            "Message": "pair not found"
        }))
        .unwrap_err();
        assert_eq!(err.message(), Some("pair not found"));
        assert_eq!(err.to_string(), "pair not found");
    }

    #[test]
    fn test_type_under_threshold_raises() {
        let body = json!({"Type": ERROR_TYPE_THRESHOLD - 1});
        assert!(check_response(&body).is_err());

        let body = json!({"Response": "Success", "Type": 1, "Message": "no data"});
        let err = check_response(&body).unwrap_err();
        assert_eq!(err.message(), Some("no data"));
    }

    #[test]
    fn test_type_at_or_over_threshold_passes() {
        assert!(check_response(&json!({"Type": ERROR_TYPE_THRESHOLD})).is_ok());
        assert!(check_response(&json!({"Type": ERROR_TYPE_THRESHOLD + 1})).is_ok());
        assert!(check_response(&json!({"Type": 100, "Message": "anything", "Data": []})).is_ok());
    }

    #[test]
    fn test_non_error_response_without_type_passes() {
        assert!(check_response(&json!({"Response": "Success"})).is_ok());
        assert!(check_response(&json!({"Response": "error"})).is_ok());
    }

    #[test]
    fn test_string_type_code_is_compared_numerically() {
        assert!(check_response(&json!({"Type": "2"})).is_err());
        assert!(check_response(&json!({"Type": "100"})).is_ok());
        assert!(check_response(&json!({"Type": "n/a"})).is_ok());
    }

    #[test]
    fn test_non_string_message_is_rendered() {
        let err = check_response(&json!({"Response": "Error", "Message": 42})).unwrap_err();
        assert_eq!(err.message(), Some("42"));

        let err = check_response(&json!({"Type": 2, "Message": {"lang": "invalid"}})).unwrap_err();
        assert_eq!(err.message(), Some(r#"{"lang":"invalid"}"#));

        let err = check_response(&json!({"Response": "Error", "Message": null})).unwrap_err();
        assert_eq!(err.message(), None);
    }
}
