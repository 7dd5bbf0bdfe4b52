//! Fixed redaction configuration.
//!
//! These values are not user-configurable: every sanitized request uses the
//! same placeholder, the same binary size threshold and the same header blocklist.

/// Replacement for every masked value, whatever was masked.
pub const PLACEHOLDER: &str = "**hidden**";

/// Raw bodies strictly larger than this many bytes are summarized instead of copied.
pub const BINARY_SIZE_THRESHOLD: usize = 250_000;

/// Header names (lowercase) whose values are always masked.
pub const HEADER_BLOCKLIST: [&str; 6] = [
    "authorization",
    "x-api-key",
    "x-auth-token",
    "cookie",
    "proxy-authorization",
    "sslclientcert",
];

/// Returns `true` if the header name is blocklisted, ignoring ASCII case.
#[must_use]
pub fn is_blocklisted_header(name: &str) -> bool {
    HEADER_BLOCKLIST
        .iter()
        .any(|blocked| blocked.eq_ignore_ascii_case(name))
}

/// Text that replaces a raw body larger than [`BINARY_SIZE_THRESHOLD`].
pub(crate) fn binary_body_summary(len: usize) -> String {
    format!(
        "Binary data got replaced with this text. Original was a Buffer with a size of {len} bytes."
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("authorization")]
    #[case("Authorization")]
    #[case("AUTHORIZATION")]
    #[case("X-Api-Key")]
    #[case("x-auth-token")]
    #[case("Cookie")]
    #[case("Proxy-Authorization")]
    #[case("SslClientCert")]
    fn should_detect_blocklisted_headers(#[case] name: &str) {
        assert!(is_blocklisted_header(name));
    }

    #[rstest]
    #[case("content-type")]
    #[case("x-host")]
    #[case("set-cookie")]
    #[case("authorization2")]
    fn should_not_detect_other_headers(#[case] name: &str) {
        assert!(!is_blocklisted_header(name));
    }

    #[test]
    fn should_summarize_binary_body() {
        insta::assert_snapshot!(binary_body_summary(250_001), @"Binary data got replaced with this text. Original was a Buffer with a size of 250001 bytes.");
    }
}
