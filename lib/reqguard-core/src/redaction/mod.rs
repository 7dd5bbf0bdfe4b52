//! Display-safe copies of request descriptions.
//!
//! [`sanitize`] produces a copy of a [`RequestDescription`] that can be shown in a
//! UI or written to a debug log:
//!
//! 1. raw bodies larger than [`BINARY_SIZE_THRESHOLD`] are replaced by a summary,
//! 2. keys listed in the [`SensitiveFieldIndex`] are masked, whatever their value,
//! 3. blocklisted headers ([`HEADER_BLOCKLIST`]) are masked,
//! 4. every remaining occurrence of a known secret in a string is masked.
//!
//! Every masked value becomes [`PLACEHOLDER`].
//!
//! [`BINARY_SIZE_THRESHOLD`]: crate::constants::BINARY_SIZE_THRESHOLD
//! [`HEADER_BLOCKLIST`]: crate::constants::HEADER_BLOCKLIST

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::body::FormValue;
use crate::constants::{
    BINARY_SIZE_THRESHOLD, PLACEHOLDER, binary_body_summary, is_blocklisted_header,
};
use crate::request::{RequestBody, RequestDescription};
use crate::secrets::SecretSet;

mod scrub;
use self::scrub::{scrub_str, scrub_value};

/// Request property holding the headers.
const HEADERS_PROPERTY: &str = "headers";

/// Request property holding the body.
const BODY_PROPERTY: &str = "body";

/// Keys to mask under each request property.
///
/// Typically derived from the credential in use, e.g. `auth → [user, pass]` for
/// basic authentication or `headers → [X-Custom-Token]` for header authentication.
///
/// # Example
///
/// ```rust
/// use reqguard_core::SensitiveFieldIndex;
///
/// let index = SensitiveFieldIndex::new()
///     .with_keys("auth", ["user", "pass"])
///     .with_keys("qs", ["api_key"]);
///
/// assert!(index.contains("auth", "pass"));
/// assert!(!index.contains("auth", "sendImmediately"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensitiveFieldIndex {
    properties: IndexMap<String, IndexSet<String>>,
}

impl SensitiveFieldIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds keys to mask under a request property.
    #[must_use]
    pub fn with_keys<K>(mut self, property: impl Into<String>, keys: impl IntoIterator<Item = K>) -> Self
    where
        K: Into<String>,
    {
        self.properties
            .entry(property.into())
            .or_default()
            .extend(keys.into_iter().map(Into::into));
        self
    }

    /// Checks if `key` must be masked under `property`.
    pub fn contains(&self, property: &str, key: &str) -> bool {
        self.properties
            .get(property)
            .is_some_and(|keys| keys.contains(key))
    }

    /// Checks if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterates over the properties and their keys.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.properties
            .iter()
            .map(|(property, keys)| (property.as_str(), keys))
    }
}

/// Produces a display-safe copy of a request.
///
/// The input is never modified. Redaction cannot fail: entries of the index
/// naming an absent property, or a property that is not an object, are ignored.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use reqguard_core::{RequestDescription, SecretSet, SensitiveFieldIndex, sanitize};
///
/// let request = RequestDescription::new(Method::GET, "https://example.com?key=SECRET123")
///     .with_header("Authorization", "Bearer SECRET123")
///     .with_header("X-Host", "example.com");
/// let secrets = ["SECRET123"].into_iter().collect::<SecretSet>();
///
/// let sanitized = sanitize(&request, &SensitiveFieldIndex::new(), &secrets);
///
/// assert_eq!(sanitized.url, "https://example.com?key=**hidden**");
/// assert_eq!(sanitized.headers["Authorization"], "**hidden**");
/// assert_eq!(sanitized.headers["X-Host"], "example.com");
/// ```
#[must_use]
pub fn sanitize(
    request: &RequestDescription,
    sensitive_fields: &SensitiveFieldIndex,
    secrets: &SecretSet,
) -> RequestDescription {
    let mut result = request.clone();

    let body_summarized = guard_binary_body(&mut result);

    for (property, keys) in sensitive_fields.iter() {
        mask_property(&mut result, property, keys, body_summarized);
    }

    mask_headers(&mut result);

    if !secrets.is_empty() {
        scrub_request(&mut result, secrets, body_summarized);
    }

    result
}

/// Replaces a raw body above the threshold by its summary.
fn guard_binary_body(request: &mut RequestDescription) -> bool {
    let Some(RequestBody::Raw(data)) = &request.body else {
        return false;
    };
    let len = data.len();
    if len <= BINARY_SIZE_THRESHOLD {
        return false;
    }

    debug!(size = len, "replacing large binary body with a summary");
    request.body = Some(RequestBody::Text(binary_body_summary(len)));
    true
}

fn mask_property(
    request: &mut RequestDescription,
    property: &str,
    keys: &IndexSet<String>,
    body_summarized: bool,
) {
    match property {
        HEADERS_PROPERTY => {
            for (name, value) in &mut request.headers {
                if keys.contains(name) {
                    *value = PLACEHOLDER.to_string();
                }
            }
        }
        BODY_PROPERTY if !body_summarized => match &mut request.body {
            Some(RequestBody::Json(Value::Object(map))) => mask_object(map, keys),
            Some(RequestBody::Multipart(form)) => {
                for field in form.fields_mut() {
                    if keys.contains(&field.name) {
                        field.value = FormValue::Text(PLACEHOLDER.to_string());
                    }
                }
            }
            _ => trace!(property, "body is not an object, nothing to mask"),
        },
        _ => {}
    }

    // options share the serialized namespace, including `headers` and `body`
    match request.options.get_mut(property) {
        Some(Value::Object(map)) => mask_object(map, keys),
        _ => trace!(property, "no option object to mask"),
    }
}

fn mask_object(map: &mut Map<String, Value>, keys: &IndexSet<String>) {
    for (key, value) in map.iter_mut() {
        if keys.contains(key) {
            *value = Value::String(PLACEHOLDER.to_string());
        }
    }
}

fn mask_headers(request: &mut RequestDescription) {
    let mut masked = 0_usize;
    for (name, value) in &mut request.headers {
        if is_blocklisted_header(name) {
            *value = PLACEHOLDER.to_string();
            masked += 1;
        }
    }
    if masked > 0 {
        debug!(masked, "masked blocklisted headers");
    }
}

fn scrub_request(request: &mut RequestDescription, secrets: &SecretSet, body_summarized: bool) {
    scrub_str(&mut request.url, secrets);

    for value in request.headers.values_mut() {
        scrub_str(value, secrets);
    }

    if !body_summarized {
        match &mut request.body {
            Some(RequestBody::Json(value)) => scrub_value(value, secrets),
            Some(RequestBody::Multipart(form)) => {
                for field in form.fields_mut() {
                    if let FormValue::Text(text) = &mut field.value {
                        scrub_str(text, secrets);
                    }
                }
            }
            Some(RequestBody::Text(text)) => scrub_str(text, secrets),
            Some(RequestBody::Raw(_)) | None => {}
        }
    }

    for value in request.options.values_mut() {
        scrub_value(value, secrets);
    }
}
