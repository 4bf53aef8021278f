use crate::LoadError;
use ohno::EnrichableExt;
use serde_json::{Map, Value};

/// Field holding the series under the response root
const DATA_FIELD: &str = "data";

/// The `data` object of a metrics response, exactly as the server sent it.
///
/// Structural validation of the individual series happens in [`normalize`](super::normalize).
#[derive(Debug, Clone, PartialEq)]
pub struct RawMetricsPayload(Map<String, Value>);

impl RawMetricsPayload {
    #[must_use]
    pub const fn new(data: Map<String, Value>) -> Self {
        Self(data)
    }

    /// Parse a full metrics response body and keep its `data` object.
    pub fn from_response_body(body: &[u8]) -> Result<Self, LoadError> {
        let root: Value =
            serde_json::from_slice(body).map_err(|e| LoadError::DataShape(ohno::AppError::new(e).enrich("parsing metrics response")))?;

        match root {
            Value::Object(mut fields) => match fields.remove(DATA_FIELD) {
                Some(Value::Object(data)) => Ok(Self(data)),
                Some(other) => Err(LoadError::data_shape(format!(
                    "metrics response field '{DATA_FIELD}' is {}, expected an object",
                    describe(&other)
                ))),
                None => Err(LoadError::data_shape(format!("metrics response has no '{DATA_FIELD}' field"))),
            },
            other => Err(LoadError::data_shape(format!("metrics response is {}, expected an object", describe(&other)))),
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

/// Short human description of a JSON value's type for error messages.
pub(crate) const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_body_keeps_data_unchanged() {
        let body = br#"{"status": true, "data": {"invite_sent": [{"month": "Jan", "count": 5}], "extra": 1}}"#;
        let payload = RawMetricsPayload::from_response_body(body).unwrap();
        assert_eq!(payload.get("extra"), Some(&serde_json::json!(1)));
        assert!(payload.get("invite_sent").is_some_and(Value::is_array));
        assert_eq!(payload.get("status"), None);
    }

    #[test]
    fn test_from_response_body_missing_data() {
        let err = RawMetricsPayload::from_response_body(br#"{"status": true}"#).unwrap_err();
        assert!(matches!(err, LoadError::DataShape(_)));
    }

    #[test]
    fn test_from_response_body_null_data() {
        let err = RawMetricsPayload::from_response_body(br#"{"data": null}"#).unwrap_err();
        assert!(matches!(err, LoadError::DataShape(_)));
    }

    #[test]
    fn test_from_response_body_array_data() {
        let err = RawMetricsPayload::from_response_body(br#"{"data": []}"#).unwrap_err();
        assert!(err.to_string().contains("an array"), "got: {err}");
    }

    #[test]
    fn test_from_response_body_not_json() {
        let err = RawMetricsPayload::from_response_body(b"Internal error").unwrap_err();
        assert!(matches!(err, LoadError::DataShape(_)));
    }

    #[test]
    fn test_from_response_body_root_not_object() {
        let err = RawMetricsPayload::from_response_body(b"[1, 2]").unwrap_err();
        assert!(matches!(err, LoadError::DataShape(_)));
    }
}
