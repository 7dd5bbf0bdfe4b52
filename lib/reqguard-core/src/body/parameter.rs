use serde::{Deserialize, Serialize};

/// How a body parameter is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    /// A plain name/value field.
    #[default]
    #[serde(rename = "formData")]
    Plain,
    /// A binary field; the value names the binary property to upload.
    #[serde(rename = "formBinaryData")]
    FormBinary,
}

/// A declared body parameter.
///
/// Parameters are kept in declaration order: for structured JSON bodies the name
/// is a path and later parameters overwrite earlier ones, for multipart bodies
/// the field order follows the declaration order.
///
/// # Example
///
/// ```rust
/// use reqguard_core::{BodyParameter, ParameterKind};
///
/// let parameters: Vec<BodyParameter> = serde_json::from_str(r#"[
///     { "name": "user.name", "value": "Alice" },
///     { "name": "avatar", "value": "data", "parameterType": "formBinaryData" }
/// ]"#)?;
///
/// assert_eq!(parameters[0].kind, ParameterKind::Plain);
/// assert_eq!(parameters[1].kind, ParameterKind::FormBinary);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyParameter {
    /// The parameter name (a path for structured JSON bodies).
    pub name: String,
    /// The declared value.
    pub value: String,
    /// The parameter kind.
    #[serde(default, rename = "parameterType")]
    pub kind: ParameterKind,
}

impl BodyParameter {
    /// Creates a plain parameter.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: ParameterKind::Plain,
        }
    }

    /// Creates a binary parameter referring to the `property` holding the data.
    pub fn binary(name: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: property.into(),
            kind: ParameterKind::FormBinary,
        }
    }

    /// Returns `true` for [`ParameterKind::FormBinary`] parameters.
    pub fn is_binary(&self) -> bool {
        self.kind == ParameterKind::FormBinary
    }
}
