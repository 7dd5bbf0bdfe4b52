//! # Reqguard Core
//!
//! Build HTTP request bodies from declared parameters, and show the requests you
//! build without leaking credentials.
//!
//! This crate provides two cooperating pieces:
//! - **[`build_body`]** - fold an ordered list of [`BodyParameter`]s into a
//!   structured JSON object, a multipart form or a flat key/value mapping
//! - **[`sanitize`]** - produce a display-safe copy of a [`RequestDescription`],
//!   masking credentials, security headers, known secrets and large binary bodies
//!
//! ## Quick Start
//!
//! ### Building a body
//!
//! ```rust
//! use reqguard_core::{BodyParameter, BodySpec, PlainResolver, build_body};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let spec = BodySpec::new("json", 4.2);
//! let parameters = [
//!     BodyParameter::new("user.name", "Alice"),
//!     BodyParameter::new("user.email", "alice@example.com"),
//! ];
//!
//! let body = build_body(&parameters, spec.encoding(), &PlainResolver).await?;
//! let encoded = body.encode()?;
//! assert_eq!(
//!     encoded.data,
//!     br#"{"user":{"name":"Alice","email":"alice@example.com"}}"#
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ### Sanitizing a request for display
//!
//! ```rust
//! use http::Method;
//! use reqguard_core::{
//!     CredentialData, PropertyDeclaration, RequestDescription, SensitiveFieldIndex,
//!     collect_secrets, sanitize,
//! };
//! use serde_json::json;
//!
//! # fn main() -> Result<(), reqguard_core::ReqguardError> {
//! let properties = [PropertyDeclaration::password("apiKey"), PropertyDeclaration::new("host")];
//! let credentials = CredentialData::try_from(json!({
//!     "apiKey": "SECRET123",
//!     "host": "example.com",
//! }))?;
//! let secrets = collect_secrets(&properties, &credentials);
//!
//! let request = RequestDescription::new(Method::GET, "https://example.com/items")
//!     .with_header("X-Api-Token", "SECRET123")
//!     .with_option("auth", json!({ "user": "alice", "pass": "hunter2" }));
//! let index = SensitiveFieldIndex::new().with_keys("auth", ["pass"]);
//!
//! let sanitized = sanitize(&request, &index, &secrets);
//! assert_eq!(sanitized.headers["X-Api-Token"], "**hidden**");
//! assert_eq!(sanitized.options["auth"]["pass"], "**hidden**");
//! # Ok(())
//! # }
//! ```
//!
//! ## Body encodings
//!
//! The [`BodyEncoding`] is selected from the declared body type and the node version:
//!
//! | Body type             | Version | Encoding                           |
//! |-----------------------|---------|------------------------------------|
//! | `json`                | `>= 4`  | [`BodyEncoding::StructuredJson`]   |
//! | `multipart-form-data` | `>= 4.2`| [`BodyEncoding::MultipartForm`]    |
//! | anything else         |         | [`BodyEncoding::DefaultKeyValue`]  |
//!
//! Parameters are resolved through a [`ValueResolver`], one after the other in
//! declaration order; resolver errors are returned unchanged.
//!
//! ## Request preparation
//!
//! [`set_agent_options`] fills the TLS agent options of a request from SSL
//! client-certificate credentials, and [`replace_null_values`] normalizes input
//! items whose JSON payload is `null`.
//!
//! ## Redaction
//!
//! See [`sanitize`] for the redaction steps. The placeholder, the binary size
//! threshold and the header blocklist are fixed, see [`constants`].

#![cfg_attr(docsrs, feature(doc_cfg))]

mod agent;
pub use self::agent::{
    AGENT_OPTIONS_PROPERTY, SslCredentials, format_private_key, set_agent_options,
};

mod body;
pub use self::body::{
    BinaryPart, BodyEncoding, BodyParameter, BodySpec, BodyValue, EncodedBody, FormField,
    FormValue, JSON_BODY_TYPE, JSON_MIN_VERSION, MULTIPART_BODY_TYPE, MULTIPART_MIN_VERSION,
    MultipartForm, ParameterKind, PartOptions, PlainResolver, ResolvedBinary, ResolvedValue,
    ValueResolver, build_body,
};

pub mod constants;

mod content_type;
pub use self::content_type::{is_binary_content_type, is_binary_mime};

mod error;
pub use self::error::ReqguardError;

mod item;
pub use self::item::{ExecutionItem, replace_null_values};

#[cfg(feature = "oauth2")]
pub mod oauth2;

mod redaction;
pub use self::redaction::{SensitiveFieldIndex, sanitize};

mod request;
pub use self::request::{RequestBody, RequestDescription};

mod secrets;
pub use self::secrets::{
    CredentialData, PropertyDeclaration, PropertyTypeOptions, Secret, SecretSet, collect_secrets,
};
