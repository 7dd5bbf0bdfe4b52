//! Secret extraction from decrypted credentials.
//!
//! The [`SecretSet`] produced here feeds the deep substring pass of
//! [`sanitize`](crate::sanitize): every literal secret found anywhere in a
//! sanitized request is replaced by the placeholder.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use jsonptr::Pointer;
use jsonptr::resolve::Resolve;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ReqguardError;

/// Location of the OAuth2 access token inside a credential object.
const OAUTH_ACCESS_TOKEN: &str = "/oauthTokenData/access_token";

/// A literal secret value, zeroed from memory on drop.
///
/// Secrets are ordered longest first, then lexicographically, so that a secret
/// containing another one is masked before the shorter one can split it.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret(String);

impl Secret {
    /// Returns the secret value.
    ///
    /// # Security Note
    /// The returned reference should not be stored for extended periods.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&"[REDACTED]").finish()
    }
}

impl Ord for Secret {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .len()
            .cmp(&self.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Secret {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Set of literal secret strings to scrub from a sanitized request.
///
/// Empty strings are never stored: they would match everywhere.
/// Iteration order is deterministic (see [`Secret`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretSet {
    secrets: BTreeSet<Secret>,
}

impl SecretSet {
    /// Creates an empty secret set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a secret, returning `false` if it was empty or already present.
    pub fn insert(&mut self, secret: impl Into<String>) -> bool {
        let secret = secret.into();
        if secret.is_empty() {
            return false;
        }
        self.secrets.insert(Secret(secret))
    }

    /// Checks if the set holds the given value.
    pub fn contains(&self, value: &str) -> bool {
        self.secrets.iter().any(|secret| secret.as_str() == value)
    }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Returns the number of secrets.
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Iterates over the secrets in replacement order.
    pub fn iter(&self) -> impl Iterator<Item = &Secret> {
        self.secrets.iter()
    }
}

impl<S> FromIterator<S> for SecretSet
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut result = Self::new();
        for secret in iter {
            result.insert(secret);
        }
        result
    }
}

impl<S> Extend<S> for SecretSet
where
    S: Into<String>,
{
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for secret in iter {
            self.insert(secret);
        }
    }
}

/// Type options of a credential property declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTypeOptions {
    /// The property holds a password-like value.
    #[serde(default)]
    pub password: bool,
}

/// Declaration of a credential property, as exposed by the node definition system.
///
/// Only the parts needed to find password-like values are modelled.
///
/// # Example
///
/// ```rust
/// use reqguard_core::PropertyDeclaration;
///
/// let declaration: PropertyDeclaration = serde_json::from_str(
///     r#"{ "name": "apiKey", "typeOptions": { "password": true } }"#,
/// )?;
/// assert!(declaration.is_password());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDeclaration {
    /// The property name, matching a key of the credential object.
    pub name: String,
    /// Optional type options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_options: Option<PropertyTypeOptions>,
}

impl PropertyDeclaration {
    /// Declares a plain property.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_options: None,
        }
    }

    /// Declares a password-like property.
    pub fn password(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_options: Some(PropertyTypeOptions { password: true }),
        }
    }

    /// Returns `true` if the property is flagged password-like.
    pub fn is_password(&self) -> bool {
        self.type_options
            .as_ref()
            .is_some_and(|options| options.password)
    }
}

/// A decrypted credential object.
///
/// Always a JSON object; use [`TryFrom<Value>`] or [`From<Map>`] to build one.
/// The [`Debug`] output lists the keys only.
#[derive(Clone, PartialEq, Default)]
pub struct CredentialData(Map<String, Value>);

impl CredentialData {
    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Iterates over the credential entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    fn oauth_access_token(&self) -> Option<&str> {
        let (head, tail) = Pointer::from_static(OAUTH_ACCESS_TOKEN).split_front()?;
        let token_data = self.0.get(&*head.decoded())?;
        token_data.resolve(tail).ok()?.as_str()
    }
}

impl fmt::Debug for CredentialData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CredentialData")
            .field(&self.0.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl From<Map<String, Value>> for CredentialData {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

impl TryFrom<Value> for CredentialData {
    type Error = ReqguardError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            value => Err(ReqguardError::InvalidCredentialData { value }),
        }
    }
}

/// Collects the literal secrets of a credential object.
///
/// A credential entry is a secret when its key is declared password-like in
/// `properties` and its value is a string. The OAuth2 access token found under
/// `oauthTokenData.access_token` is a secret too. Non-string values are skipped:
/// they cannot be matched as substrings.
///
/// # Example
///
/// ```rust
/// use reqguard_core::{CredentialData, PropertyDeclaration, collect_secrets};
/// use serde_json::json;
///
/// # fn main() -> Result<(), reqguard_core::ReqguardError> {
/// let properties = [PropertyDeclaration::password("apiKey"), PropertyDeclaration::new("host")];
/// let credentials = CredentialData::try_from(json!({
///     "apiKey": "SECRET123",
///     "host": "example.com",
/// }))?;
///
/// let secrets = collect_secrets(&properties, &credentials);
/// assert!(secrets.contains("SECRET123"));
/// assert!(!secrets.contains("example.com"));
/// # Ok(())
/// # }
/// ```
pub fn collect_secrets(
    properties: &[PropertyDeclaration],
    credentials: &CredentialData,
) -> SecretSet {
    let sensitive_names = properties
        .iter()
        .filter(|property| property.is_password())
        .map(|property| property.name.as_str())
        .collect::<HashSet<_>>();

    let mut secrets = credentials
        .iter()
        .filter(|(name, _)| sensitive_names.contains(name.as_str()))
        .filter_map(|(_, value)| value.as_str())
        .collect::<SecretSet>();

    secrets.extend(credentials.oauth_access_token());

    debug!(count = secrets.len(), "collected credential secrets");
    secrets
}
