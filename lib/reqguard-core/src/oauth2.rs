//! Per-provider OAuth2 quirks.
//!
//! Some OAuth2 providers deviate from the defaults: a specific token type, a
//! token found under a custom response property, credentials sent in the body
//! on refresh, ... The table is built once and never modified.

use std::collections::HashMap;
use std::sync::LazyLock;

use http::StatusCode;
use serde::{Serialize, Serializer};

/// OAuth2 options of a provider, keyed by credential type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(docsrs, doc(cfg(feature = "oauth2")))]
pub struct OAuth2ProviderOptions {
    /// Token type to send (e.g. `Bearer`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<&'static str>,
    /// Whether the `Bearer` prefix is kept in the authorization header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_bearer: Option<bool>,
    /// Send client credentials in the body when refreshing the token.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub include_credentials_on_refresh_on_body: bool,
    /// Status code signalling an expired token, when not `401`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_status"
    )]
    pub token_expired_status_code: Option<StatusCode>,
    /// Dotted path of the access token in the token response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<&'static str>,
    /// Header used to send the access token instead of `Authorization`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_to_include_in_access_token_header: Option<&'static str>,
}

impl OAuth2ProviderOptions {
    const NONE: Self = Self {
        token_type: None,
        keep_bearer: None,
        include_credentials_on_refresh_on_body: false,
        token_expired_status_code: None,
        property: None,
        key_to_include_in_access_token_header: None,
    };

    const BEARER: Self = Self {
        token_type: Some("Bearer"),
        ..Self::NONE
    };

    const CREDENTIALS_ON_REFRESH: Self = Self {
        include_credentials_on_refresh_on_body: true,
        ..Self::NONE
    };

    const TOKEN_EXPIRED_FORBIDDEN: Self = Self {
        token_expired_status_code: Some(StatusCode::FORBIDDEN),
        ..Self::NONE
    };
}

fn serialize_status<S>(status: &Option<StatusCode>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match status {
        Some(status) => serializer.serialize_u16(status.as_u16()),
        None => serializer.serialize_none(),
    }
}

static PROVIDERS: LazyLock<HashMap<&'static str, OAuth2ProviderOptions>> = LazyLock::new(|| {
    use OAuth2ProviderOptions as Options;

    HashMap::from([
        ("bitlyOAuth2Api", Options::BEARER),
        ("boxOAuth2Api", Options::CREDENTIALS_ON_REFRESH),
        ("ciscoWebexOAuth2Api", Options::BEARER),
        (
            "clickUpOAuth2Api",
            Options {
                keep_bearer: Some(false),
                ..Options::BEARER
            },
        ),
        ("goToWebinarOAuth2Api", Options::TOKEN_EXPIRED_FORBIDDEN),
        (
            "hubspotDeveloperApi",
            Options {
                include_credentials_on_refresh_on_body: true,
                ..Options::BEARER
            },
        ),
        (
            "hubspotOAuth2Api",
            Options {
                include_credentials_on_refresh_on_body: true,
                ..Options::BEARER
            },
        ),
        ("lineNotifyOAuth2Api", Options::BEARER),
        ("linkedInOAuth2Api", Options::BEARER),
        ("mailchimpOAuth2Api", Options::BEARER),
        ("mauticOAuth2Api", Options::CREDENTIALS_ON_REFRESH),
        (
            "microsoftAzureMonitorOAuth2Api",
            Options::TOKEN_EXPIRED_FORBIDDEN,
        ),
        (
            "microsoftDynamicsOAuth2Api",
            Options {
                property: Some("id_token"),
                ..Options::NONE
            },
        ),
        ("philipsHueOAuth2Api", Options::BEARER),
        ("raindropOAuth2Api", Options::CREDENTIALS_ON_REFRESH),
        (
            "shopifyOAuth2Api",
            Options {
                key_to_include_in_access_token_header: Some("X-Shopify-Access-Token"),
                ..Options::BEARER
            },
        ),
        (
            "slackOAuth2Api",
            Options {
                property: Some("authed_user.access_token"),
                ..Options::BEARER
            },
        ),
        ("stravaOAuth2Api", Options::CREDENTIALS_ON_REFRESH),
    ])
});

/// Returns the OAuth2 options of a credential type, if it has any.
///
/// # Example
///
/// ```rust
/// use reqguard_core::oauth2::oauth2_provider_options;
///
/// let slack = oauth2_provider_options("slackOAuth2Api").expect("known provider");
/// assert_eq!(slack.property, Some("authed_user.access_token"));
/// assert!(oauth2_provider_options("githubOAuth2Api").is_none());
/// ```
#[cfg_attr(docsrs, doc(cfg(feature = "oauth2")))]
pub fn oauth2_provider_options(credential_type: &str) -> Option<&'static OAuth2ProviderOptions> {
    PROVIDERS.get(credential_type)
}
