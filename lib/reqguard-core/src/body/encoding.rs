use serde::{Deserialize, Serialize};

/// Body type selecting the structured JSON encoding.
pub const JSON_BODY_TYPE: &str = "json";

/// Body type selecting the multipart encoding.
pub const MULTIPART_BODY_TYPE: &str = "multipart-form-data";

/// Minimum version for the structured JSON encoding.
pub const JSON_MIN_VERSION: f64 = 4.0;

/// Minimum version for the multipart encoding.
pub const MULTIPART_MIN_VERSION: f64 = 4.2;

/// Strategy used to turn body parameters into a body value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BodyEncoding {
    /// Parameter names are paths into a nested JSON object.
    #[display("structured-json")]
    StructuredJson,
    /// An ordered multipart form.
    #[display("multipart-form")]
    MultipartForm,
    /// A flat key/value mapping built from the resolver output.
    #[display("key-value")]
    DefaultKeyValue,
}

impl BodyEncoding {
    /// Selects the encoding for a declared body type and a node version.
    ///
    /// Version gates are inclusive; a body type below its gate falls back to
    /// [`BodyEncoding::DefaultKeyValue`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use reqguard_core::BodyEncoding;
    ///
    /// assert_eq!(BodyEncoding::select("json", 4.0), BodyEncoding::StructuredJson);
    /// assert_eq!(BodyEncoding::select("json", 3.0), BodyEncoding::DefaultKeyValue);
    /// assert_eq!(
    ///     BodyEncoding::select("multipart-form-data", 4.2),
    ///     BodyEncoding::MultipartForm
    /// );
    /// ```
    pub fn select(body_type: &str, version: f64) -> Self {
        match body_type {
            JSON_BODY_TYPE if version >= JSON_MIN_VERSION => Self::StructuredJson,
            MULTIPART_BODY_TYPE if version >= MULTIPART_MIN_VERSION => Self::MultipartForm,
            _ => Self::DefaultKeyValue,
        }
    }
}

/// The body selection declared by a node: its body type and version.
///
/// Deserializes from node parameters such as `{ "bodyType": "json", "version": 4.1 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySpec {
    /// Declared body type (`json`, `multipart-form-data`, `form-urlencoded`, ...).
    pub body_type: String,
    /// Node version used for the gates.
    pub version: f64,
}

impl BodySpec {
    /// Creates a body selection.
    pub fn new(body_type: impl Into<String>, version: f64) -> Self {
        Self {
            body_type: body_type.into(),
            version,
        }
    }

    /// Returns the selected encoding.
    pub fn encoding(&self) -> BodyEncoding {
        BodyEncoding::select(&self.body_type, self.version)
    }
}
