use std::convert::Infallible;

use serde_json::Value;

use super::multipart::BinaryPart;
use super::parameter::BodyParameter;

/// A parameter resolved to a key and a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedValue {
    /// The key (a path for structured JSON bodies).
    pub key: String,
    /// The resolved value.
    pub value: Value,
}

impl ResolvedValue {
    /// Creates a resolved value.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<&BodyParameter> for ResolvedValue {
    fn from(parameter: &BodyParameter) -> Self {
        Self::new(parameter.name.clone(), parameter.value.clone())
    }
}

/// A binary parameter resolved to a field name and its data.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBinary {
    /// The multipart field name.
    pub key: String,
    /// The data with its transport options.
    pub part: BinaryPart,
}

impl ResolvedBinary {
    /// Creates a resolved binary.
    pub fn new(key: impl Into<String>, part: BinaryPart) -> Self {
        Self {
            key: key.into(),
            part,
        }
    }
}

/// Resolves declared body parameters into concrete values.
///
/// Resolution may be asynchronous (e.g. decrypting a value or loading binary
/// data). Errors are returned unchanged by [`build_body`](crate::build_body).
///
/// The default implementations use the declared name and value as-is; the
/// default binary resolution sends the declared value's bytes without options.
///
/// # Example
///
/// ```rust
/// use reqguard_core::{BodyParameter, ResolvedValue, ValueResolver};
///
/// struct Uppercase;
///
/// impl ValueResolver for Uppercase {
///     type Error = std::convert::Infallible;
///
///     async fn resolve(&self, parameter: &BodyParameter) -> Result<ResolvedValue, Self::Error> {
///         Ok(ResolvedValue::new(parameter.name.clone(), parameter.value.to_uppercase()))
///     }
/// }
/// ```
pub trait ValueResolver {
    /// The resolution error.
    type Error;

    /// Resolves a parameter into a key and a JSON value.
    fn resolve(
        &self,
        parameter: &BodyParameter,
    ) -> impl Future<Output = Result<ResolvedValue, Self::Error>> + Send {
        let resolved = ResolvedValue::from(parameter);
        async move { Ok(resolved) }
    }

    /// Resolves a [`FormBinary`](super::ParameterKind::FormBinary) parameter
    /// into a field name and binary data.
    fn resolve_binary(
        &self,
        parameter: &BodyParameter,
    ) -> impl Future<Output = Result<ResolvedBinary, Self::Error>> + Send {
        let resolved = ResolvedBinary::new(
            parameter.name.clone(),
            BinaryPart::new(parameter.value.clone().into_bytes()),
        );
        async move { Ok(resolved) }
    }
}

/// Resolver using the declared parameters verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainResolver;

impl ValueResolver for PlainResolver {
    type Error = Infallible;
}
