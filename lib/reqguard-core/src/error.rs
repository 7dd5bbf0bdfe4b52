/// Errors raised by the library's own fallible operations.
///
/// Failures of a caller-supplied [`ValueResolver`](crate::ValueResolver) are never
/// wrapped in this type: they are returned unchanged from
/// [`build_body`](crate::build_body).
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ReqguardError {
    /// JSON serialization error.
    ///
    /// Occurs when encoding a structured body or a request description as JSON.
    JsonValueError(serde_json::Error),

    /// Form-urlencoded serialization error.
    ///
    /// Occurs when a key/value body holds a value that cannot be flattened,
    /// like a nested object or an array.
    FormSerializationError(serde_urlencoded::ser::Error),

    /// The multipart content type could not be built.
    InvalidContentType(mime::FromStrError),

    /// A credential payload was not a JSON object.
    #[display("Credential data must be a JSON object, got: {value}")]
    #[from(skip)]
    InvalidCredentialData {
        /// The value that was provided.
        value: serde_json::Value,
    },
}
