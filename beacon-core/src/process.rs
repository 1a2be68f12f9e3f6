//! Payload handling for the form-processing endpoint.
//!
//! A body is accepted only when it parses as a non-empty JSON object. The
//! resulting [`ProcessReport`] echoes the object back alongside a greeting
//! built from its `name` field and a count of its top-level keys.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Name used in the greeting when the payload has no `name` field.
pub const DEFAULT_NAME: &str = "Unknown";

/// Parse a raw request body into a JSON object.
///
/// # Errors
/// Returns [`CoreError::EmptyPayload`] if the body is empty, is not valid
/// JSON, or holds an empty value (`null`, `false`, `0`, `""`, `[]`, `{}`).
/// Returns [`CoreError::NotAnObject`] for any other non-object value.
pub fn parse_payload(body: &[u8]) -> Result<Map<String, Value>, CoreError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| CoreError::EmptyPayload)?;
    if is_empty_value(&value) {
        return Err(CoreError::EmptyPayload);
    }
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CoreError::NotAnObject {
            kind: kind_of(&other),
        }),
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Response body for a successfully processed payload.
///
/// `timestamp` carries the client address, not a time value; the field
/// name is part of the wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct ProcessReport {
    /// Always `true`.
    pub received: bool,
    /// Forwarded-for header value or the peer IP address.
    pub timestamp: String,
    /// The payload, unchanged.
    pub form_data: Map<String, Value>,
    /// `"Successfully processed data for <name>"`.
    pub message: String,
    /// Number of top-level keys in `form_data`.
    pub data_count: usize,
}

impl ProcessReport {
    /// Build a report for `form_data` received from `client`.
    #[must_use]
    pub fn new(form_data: Map<String, Value>, client: impl Into<String>) -> Self {
        let name = match form_data.get("name") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => DEFAULT_NAME.to_owned(),
        };
        Self {
            received: true,
            timestamp: client.into(),
            message: format!("Successfully processed data for {name}"),
            data_count: form_data.len(),
            form_data,
        }
    }
}
