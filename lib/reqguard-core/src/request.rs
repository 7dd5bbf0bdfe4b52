use bytes::Bytes;
use http::Method;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::ReqguardError;
use crate::body::{BodyValue, MultipartForm};

/// Body of a request description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestBody {
    /// Structured JSON (object, array or scalar).
    Json(Value),
    /// Multipart form.
    Multipart(MultipartForm),
    /// Raw bytes.
    Raw(Bytes),
    /// Plain text.
    Text(String),
}

impl From<BodyValue> for RequestBody {
    fn from(value: BodyValue) -> Self {
        match value {
            BodyValue::Structured(map) | BodyValue::KeyValue(map) => Self::Json(Value::Object(map)),
            BodyValue::Multipart(form) => Self::Multipart(form),
        }
    }
}

/// An assembled outbound request, as handed to the transport layer.
///
/// Besides method, URL, headers and body, any other transport field (`auth`,
/// `qs`, `proxy`, ...) is kept as a JSON value in [`options`](Self::options).
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use reqguard_core::{RequestBody, RequestDescription};
/// use serde_json::json;
///
/// let request = RequestDescription::new(Method::POST, "https://api.example.com/users")
///     .with_header("Authorization", "Bearer token")
///     .with_body(RequestBody::Json(json!({ "name": "Alice" })))
///     .with_option("auth", json!({ "user": "alice", "pass": "secret" }));
///
/// assert_eq!(request.headers.get("Authorization").map(String::as_str), Some("Bearer token"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescription {
    /// HTTP method.
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    /// Target URL.
    pub url: String,
    /// Headers in insertion order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,
    /// Optional body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    /// Other transport fields.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl RequestDescription {
    /// Creates a request without headers, body or options.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: IndexMap::new(),
            body: None,
            options: Map::new(),
        }
    }

    /// Adds a header, replacing an existing header with the same name.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets another transport field.
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Converts the description to a JSON value, e.g. for display.
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails.
    pub fn to_json(&self) -> Result<Value, ReqguardError> {
        let result = serde_json::to_value(self)?;
        Ok(result)
    }
}

fn serialize_method<S>(method: &Method, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(method.as_str())
}
