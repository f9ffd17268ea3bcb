//! The uniform `{success, message?, data?}` wrapper.
//!
//! The API is inconsistent across endpoint versions: some return this wrapper,
//! others return the payload bare. `Envelope::from_value` decides which by the
//! presence of the `success` discriminant and always yields an `Envelope`.
//!
//! Invariants:
//! - When `success` is false, `data()` returns `None` even if a payload was sent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Normalized API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// A successful envelope around `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Trusted payload: `None` when the call was not successful.
    pub fn data(&self) -> Option<&T> {
        if self.success { self.data.as_ref() } else { None }
    }

    /// Take the payload, turning an unsuccessful or empty envelope into an error.
    pub fn into_data(self) -> Result<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (_, _) => Err(ClientError::Service {
                status: None,
                message: self
                    .message
                    .unwrap_or_else(|| "Response did not contain data".to_string()),
                body: String::new(),
            }),
        }
    }

    /// Transform the payload while keeping `success` and `message`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
        }
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Parse a response body that may or may not already be wrapped.
    ///
    /// Objects carrying a `success` key are parsed as an envelope; anything
    /// else is treated as the bare payload of a successful call.
    pub fn from_value(value: Value) -> std::result::Result<Self, serde_json::Error> {
        let wrapped = value
            .as_object()
            .is_some_and(|obj| obj.contains_key("success"));

        if wrapped {
            serde_json::from_value(value)
        } else {
            serde_json::from_value(value).map(Self::ok)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Payload {
        domain: String,
        count: u32,
    }

    #[test]
    fn test_wrapped_and_bare_normalize_to_same_data() {
        let wrapped: Envelope<Payload> = Envelope::from_value(json!({
            "success": true,
            "message": "ok",
            "data": {"domain": "example.com", "count": 3}
        }))
        .unwrap();
        let bare: Envelope<Payload> =
            Envelope::from_value(json!({"domain": "example.com", "count": 3})).unwrap();

        assert!(wrapped.success && bare.success);
        assert_eq!(wrapped.data, bare.data);
        assert_eq!(wrapped.message.as_deref(), Some("ok"));
        assert_eq!(bare.message, None);
    }

    #[test]
    fn test_unsuccessful_envelope_hides_data() {
        let env: Envelope<Payload> = Envelope::from_value(json!({
            "success": false,
            "message": "no lookups left",
            "data": {"domain": "x", "count": 0}
        }))
        .unwrap();

        assert!(env.data().is_none());
        let err = env.into_data().unwrap_err();
        assert_eq!(err.to_string(), "no lookups left");
    }

    #[test]
    fn test_bare_array_is_wrapped() {
        let env: Envelope<Vec<String>> = Envelope::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(env.into_data().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_wrapped_with_bad_payload_is_error_not_rewrapped() {
        let result: std::result::Result<Envelope<Payload>, _> =
            Envelope::from_value(json!({"success": true, "data": {"domain": 5}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_without_absent_fields() {
        let env = Envelope::ok(json!({"a": 1}));
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({"success": true, "data": {"a": 1}})
        );
    }
}
