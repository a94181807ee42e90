//! Decoding of the `{Data, Success, Message}` wrapper every endpoint returns.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::actor_framework::RawResponse;
use crate::error::ApiError;

/// A decoded response wrapper. Paging fields are only sent by list endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope<T> {
    pub data: T,
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Body after the tolerant parse step: empty, JSON, or unparseable text.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    Text(String),
}

impl Body {
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Body::Empty;
        }
        match serde_json::from_str(text) {
            Ok(value) => Body::Json(value),
            Err(_) => Body::Text(text.to_string()),
        }
    }

    /// The JSON object, when it carries both `Data` and `Success`.
    fn envelope(&self) -> Option<&serde_json::Map<String, Value>> {
        match self {
            Body::Json(Value::Object(map)) if map.contains_key("Data") && map.contains_key("Success") => {
                Some(map)
            }
            _ => None,
        }
    }
}

/// Turn a raw response into a typed envelope, or the matching [`ApiError`].
pub fn decode<T: DeserializeOwned>(response: RawResponse) -> Result<Envelope<T>, ApiError> {
    let status = response.status;
    let body = Body::parse(&response.body);

    if !response.is_success() {
        let message = match (&body, body.envelope()) {
            (_, Some(map)) => non_empty_message(map),
            (Body::Text(text), None) if !text.trim().is_empty() => Some(text.clone()),
            _ => None,
        }
        .unwrap_or_else(|| format!("Request failed ({})", status));
        warn!(status, message = %message, "Request rejected");
        return Err(ApiError::Http { status, message });
    }

    let map = match body.envelope() {
        Some(map) => map,
        None => {
            warn!(status, "Response is missing Data/Success");
            return Err(ApiError::Shape);
        }
    };

    match map.get("Success") {
        Some(Value::Bool(true)) => {}
        Some(Value::Bool(false)) => {
            let message = non_empty_message(map).unwrap_or_else(|| "Request failed".to_string());
            warn!(status, message = %message, "Request reported failure");
            return Err(ApiError::Application(message));
        }
        _ => {
            warn!(status, "Success flag is not a boolean");
            return Err(ApiError::Shape);
        }
    }

    let value = match body {
        Body::Json(value) => value,
        _ => return Err(ApiError::Shape),
    };

    serde_json::from_value(value).map_err(|e| {
        warn!(status, error = %e, "Envelope payload did not match the expected record");
        ApiError::Shape
    })
}

fn non_empty_message(map: &serde_json::Map<String, Value>) -> Option<String> {
    match map.get("Message") {
        Some(Value::String(message)) if !message.is_empty() => Some(message.clone()),
        _ => None,
    }
}

/// Identifier-like `Data` values: strings pass through, numbers are printed.
pub fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "PascalCase")]
    struct Row {
        id: String,
    }

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse::new(status, body)
    }

    #[test]
    fn paged_envelope_decodes() {
        let body = r#"{"Data":[{"Id":"1"}],"Success":true,"Total":1,"Page":1,"PageSize":10}"#;
        let envelope: Envelope<Vec<Row>> = decode(response(200, body)).unwrap();
        assert_eq!(envelope.data, vec![Row { id: "1".into() }]);
        assert_eq!(envelope.total, Some(1));
        assert_eq!(envelope.page, Some(1));
        assert_eq!(envelope.page_size, Some(10));
        assert_eq!(envelope.message, None);
    }

    #[test]
    fn success_false_with_200_is_application_error() {
        let body = r#"{"Data":null,"Success":false,"Message":"bad"}"#;
        let result: Result<Envelope<Value>, _> = decode(response(200, body));
        assert_eq!(result, Err(ApiError::Application("bad".into())));
    }

    #[test]
    fn success_false_without_message_uses_fallback() {
        let body = r#"{"Data":null,"Success":false,"Message":null}"#;
        let result: Result<Envelope<Value>, _> = decode(response(200, body));
        assert_eq!(result, Err(ApiError::Application("Request failed".into())));
    }

    #[test]
    fn missing_success_key_is_shape_error() {
        let result: Result<Envelope<Value>, _> = decode(response(200, r#"{"Data":[]}"#));
        assert_eq!(result, Err(ApiError::Shape));

        let result: Result<Envelope<Value>, _> = decode(response(200, ""));
        assert_eq!(result, Err(ApiError::Shape));

        let result: Result<Envelope<Value>, _> = decode(response(200, "[1,2]"));
        assert_eq!(result, Err(ApiError::Shape));
    }

    #[test]
    fn mismatched_data_is_shape_error() {
        let body = json!({ "Data": [{ "Name": "no id" }], "Success": true }).to_string();
        let result: Result<Envelope<Vec<Row>>, _> = decode(response(200, &body));
        assert_eq!(result, Err(ApiError::Shape));
    }

    #[test]
    fn http_error_prefers_envelope_message() {
        let body = r#"{"Data":null,"Success":false,"Message":"Sku already exists"}"#;
        let result: Result<Envelope<Value>, _> = decode(response(409, body));
        assert_eq!(
            result,
            Err(ApiError::Http { status: 409, message: "Sku already exists".into() })
        );
    }

    #[test]
    fn http_error_falls_back_to_text_or_generic() {
        let result: Result<Envelope<Value>, _> = decode(response(502, "Bad Gateway"));
        assert_eq!(result, Err(ApiError::Http { status: 502, message: "Bad Gateway".into() }));

        let result: Result<Envelope<Value>, _> = decode(response(500, ""));
        assert_eq!(
            result,
            Err(ApiError::Http { status: 500, message: "Request failed (500)".into() })
        );

        let result: Result<Envelope<Value>, _> = decode(response(400, r#"{"error":"x"}"#));
        assert_eq!(
            result,
            Err(ApiError::Http { status: 400, message: "Request failed (400)".into() })
        );
    }

    #[test]
    fn body_parse_is_tolerant() {
        assert_eq!(Body::parse(""), Body::Empty);
        assert_eq!(Body::parse("oops"), Body::Text("oops".into()));
        assert_eq!(Body::parse("{}"), Body::Json(json!({})));
    }

    #[test]
    fn scalar_ids_are_stringified() {
        assert_eq!(scalar_to_string(json!("abc")), Some("abc".into()));
        assert_eq!(scalar_to_string(json!(42)), Some("42".into()));
        assert_eq!(scalar_to_string(Value::Null), None);
    }
}
