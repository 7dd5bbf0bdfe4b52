//! Binary content type detection.

use mime::Mime;

/// Top-level media types that are always binary.
const BINARY_TOP_LEVEL_TYPES: [&str; 3] = ["image", "audio", "video"];

/// Application media types known to be binary.
const BINARY_APPLICATION_TYPES: [&str; 19] = [
    "application/octet-stream",
    "application/gzip",
    "application/zip",
    "application/vnd.rar",
    "application/epub+zip",
    "application/x-bzip",
    "application/x-bzip2",
    "application/x-cdf",
    "application/vnd.amazon.ebook",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-fontobject",
    "application/vnd.oasis.opendocument.presentation",
    "application/pdf",
    "application/x-tar",
    "application/vnd.visio",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/x-7z-compressed",
];

/// Checks if a media type denotes binary content.
pub fn is_binary_mime(mime: &Mime) -> bool {
    BINARY_TOP_LEVEL_TYPES.contains(&mime.type_().as_str())
        || BINARY_APPLICATION_TYPES.contains(&mime.essence_str())
}

/// Checks if a `Content-Type` header value denotes binary content.
///
/// Parameters (`; charset=...`) are ignored; unparsable values are not binary.
///
/// # Example
///
/// ```rust
/// use reqguard_core::is_binary_content_type;
///
/// assert!(is_binary_content_type("image/png"));
/// assert!(is_binary_content_type("Application/PDF; name=report.pdf"));
/// assert!(!is_binary_content_type("application/json; charset=utf-8"));
/// ```
pub fn is_binary_content_type(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .parse::<Mime>()
        .is_ok_and(|mime| is_binary_mime(&mime))
}
