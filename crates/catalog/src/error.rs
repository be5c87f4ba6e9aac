use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, CORS, timeout).
    Network(String),
    /// The service answered with a non-success status. `body` holds the JSON
    /// payload when there was one, typically a field → messages map.
    Rejected { status: u16, body: Option<Value> },
    /// Success status but the body could not be decoded.
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Rejected { status, .. } => {
                write!(f, "request failed with status code {status}")
            }
            ApiError::Decode(msg) => write!(f, "invalid response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Build a rejection from a raw response body. Bodies that are not JSON
    /// (HTML error pages, empty bodies) carry no structured payload.
    pub fn rejected(status: u16, raw_body: &str) -> Self {
        let body = serde_json::from_str::<Value>(raw_body)
            .ok()
            .filter(|v| !v.is_null());
        ApiError::Rejected { status, body }
    }

    /// The service's validation payload flattened into one display line, or
    /// `None` when the failure carried no payload.
    pub fn field_messages(&self) -> Option<String> {
        match self {
            ApiError::Rejected {
                body: Some(body), ..
            } if !is_blank(body) => Some(flatten_messages(body)),
            _ => None,
        }
    }

    /// The `detail` member of the payload, used by single-message errors.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected {
                body: Some(body), ..
            } => body.get("detail").and_then(Value::as_str),
            _ => None,
        }
    }
}

fn is_blank(v: &Value) -> bool {
    matches!(v, Value::String(s) if s.is_empty())
}

/// Flatten `{"name": ["required"], "radius": ["must be positive"]}` into
/// `"required, must be positive"`. Field order follows the payload.
pub fn flatten_messages(body: &Value) -> String {
    let mut parts: Vec<String> = Vec::new();
    match body {
        Value::Object(map) => {
            for value in map.values() {
                push_flat(value, &mut parts);
            }
        }
        Value::Array(items) => {
            for value in items {
                push_flat(value, &mut parts);
            }
        }
        other => parts.push(scalar_text(other)),
    }
    parts.join(", ")
}

fn push_flat(value: &Value, parts: &mut Vec<String>) {
    match value {
        Value::Array(items) => parts.extend(items.iter().map(scalar_text)),
        other => parts.push(scalar_text(other)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_field_errors_in_payload_order() {
        let body = json!({
            "name": ["This field may not be blank."],
            "radius": ["A valid number is required.", "Ensure this value is positive."],
        });
        assert_eq!(
            flatten_messages(&body),
            "This field may not be blank., A valid number is required., Ensure this value is positive."
        );
    }

    #[test]
    fn flattens_scalar_members() {
        let body = json!({"detail": "Authentication credentials were not provided."});
        assert_eq!(
            flatten_messages(&body),
            "Authentication credentials were not provided."
        );
    }

    #[test]
    fn non_json_rejection_has_no_field_messages() {
        let err = ApiError::rejected(500, "<html>oops</html>");
        assert!(matches!(err, ApiError::Rejected { status: 500, .. }));
        assert_eq!(err.field_messages(), None);

        let err = ApiError::rejected(502, "");
        assert_eq!(err.field_messages(), None);
    }

    #[test]
    fn network_errors_have_no_payload() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.field_messages(), None);
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn detail_is_extracted() {
        let err = ApiError::rejected(404, r#"{"detail": "Not found."}"#);
        assert_eq!(err.detail(), Some("Not found."));
        assert_eq!(err.to_string(), "request failed with status code 404");
    }
}
