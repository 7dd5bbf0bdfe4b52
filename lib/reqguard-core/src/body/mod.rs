//! Request body construction from declared parameters.
//!
//! [`build_body`] folds an ordered list of [`BodyParameter`]s into a [`BodyValue`]
//! using the [`BodyEncoding`] selected for the node. Parameters are resolved one
//! after the other, in declaration order: a later parameter may overwrite what an
//! earlier one wrote.

use headers::ContentType;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::ReqguardError;

mod encoding;
pub use self::encoding::{
    BodyEncoding, BodySpec, JSON_BODY_TYPE, JSON_MIN_VERSION, MULTIPART_BODY_TYPE,
    MULTIPART_MIN_VERSION,
};

mod multipart;
pub use self::multipart::{BinaryPart, FormField, FormValue, MultipartForm, PartOptions};

mod parameter;
pub use self::parameter::{BodyParameter, ParameterKind};

mod path;

mod resolver;
pub use self::resolver::{PlainResolver, ResolvedBinary, ResolvedValue, ValueResolver};

/// A built request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BodyValue {
    /// Nested object built from parameter paths.
    Structured(Map<String, Value>),
    /// Ordered multipart form.
    Multipart(MultipartForm),
    /// Flat key/value mapping.
    KeyValue(Map<String, Value>),
}

impl BodyValue {
    /// Creates the empty body of an encoding.
    pub fn empty(encoding: BodyEncoding) -> Self {
        match encoding {
            BodyEncoding::StructuredJson => Self::Structured(Map::new()),
            BodyEncoding::MultipartForm => Self::Multipart(MultipartForm::new()),
            BodyEncoding::DefaultKeyValue => Self::KeyValue(Map::new()),
        }
    }

    /// Checks if the body has no entries.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Structured(map) | Self::KeyValue(map) => map.is_empty(),
            Self::Multipart(form) => form.is_empty(),
        }
    }

    /// Serializes the body to wire bytes.
    ///
    /// - structured bodies are sent as `application/json`,
    /// - key/value bodies as `application/x-www-form-urlencoded`,
    /// - multipart forms as `multipart/form-data` with a generated boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if a key/value body holds nested values, or if the
    /// serialization fails.
    pub fn encode(&self) -> Result<EncodedBody, ReqguardError> {
        match self {
            Self::Structured(map) => Ok(EncodedBody {
                content_type: ContentType::json(),
                data: serde_json::to_vec(map)?,
            }),
            Self::KeyValue(map) => Ok(EncodedBody {
                content_type: ContentType::form_url_encoded(),
                data: serde_urlencoded::to_string(map)?.into_bytes(),
            }),
            Self::Multipart(form) => form.encode(),
        }
    }
}

/// A body serialized for the wire, with its content type.
#[derive(Clone, derive_more::Debug)]
pub struct EncodedBody {
    /// The `Content-Type` to send.
    pub content_type: ContentType,
    /// The serialized body.
    #[debug(ignore)]
    pub data: Vec<u8>,
}

/// Builds a request body from declared parameters.
///
/// - [`BodyEncoding::StructuredJson`]: every parameter is resolved and its value
///   assigned at the resolved key, read as a path (`a.b[0]["c.d"]`).
/// - [`BodyEncoding::MultipartForm`]: binary parameters are resolved with
///   [`ValueResolver::resolve_binary`], plain parameters are appended verbatim.
/// - [`BodyEncoding::DefaultKeyValue`]: every parameter is resolved and merged
///   into a flat mapping.
///
/// Resolutions are awaited in order; later writes overwrite earlier ones.
///
/// # Errors
///
/// The first resolver error is returned unchanged and stops the build.
///
/// # Example
///
/// ```rust
/// use reqguard_core::{BodyEncoding, BodyParameter, BodyValue, PlainResolver, build_body};
/// use serde_json::json;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let parameters = [
///     BodyParameter::new("user.name", "Alice"),
///     BodyParameter::new("user.tags[0]", "admin"),
/// ];
///
/// let body = build_body(&parameters, BodyEncoding::StructuredJson, &PlainResolver).await?;
///
/// let BodyValue::Structured(map) = body else { unreachable!() };
/// assert_eq!(json!(map), json!({ "user": { "name": "Alice", "tags": ["admin"] } }));
/// # Ok(())
/// # }
/// ```
pub async fn build_body<R>(
    parameters: &[BodyParameter],
    encoding: BodyEncoding,
    resolver: &R,
) -> Result<BodyValue, R::Error>
where
    R: ValueResolver,
{
    debug!(%encoding, parameters = parameters.len(), "building request body");

    let body = match encoding {
        BodyEncoding::StructuredJson => {
            let mut result = Map::new();
            for parameter in parameters {
                let ResolvedValue { key, value } = resolver.resolve(parameter).await?;
                trace!(%key, "assign structured body parameter");
                path::assign_path(&mut result, &key, value);
            }
            BodyValue::Structured(result)
        }
        BodyEncoding::MultipartForm => {
            let mut form = MultipartForm::new();
            for parameter in parameters {
                match parameter.kind {
                    ParameterKind::FormBinary => {
                        let ResolvedBinary { key, part } =
                            resolver.resolve_binary(parameter).await?;
                        trace!(%key, size = part.data().len(), "append binary form field");
                        form.append_binary(key, part);
                    }
                    ParameterKind::Plain => {
                        trace!(name = %parameter.name, "append text form field");
                        form.append_text(parameter.name.clone(), parameter.value.clone());
                    }
                }
            }
            BodyValue::Multipart(form)
        }
        BodyEncoding::DefaultKeyValue => {
            let mut result = Map::new();
            for parameter in parameters {
                let ResolvedValue { key, value } = resolver.resolve(parameter).await?;
                trace!(%key, "merge key/value body parameter");
                result.insert(key, value);
            }
            BodyValue::KeyValue(result)
        }
    };

    Ok(body)
}
