//! Text input detection and validation.
//!
//! The pipeline only accepts recognized text. Page images and PDFs are
//! decoded and recognized upstream, so raw bytes that still look like a
//! binary document are rejected before any stage runs.

use crate::error::{Error, Result};

/// Binary signatures of documents that must be recognized before normalization.
const BINARY_SIGNATURES: &[(&[u8], &str)] = &[
    (b"%PDF-", "PDF"),
    (b"\x89PNG\r\n\x1a\n", "PNG"),
    (b"\xFF\xD8\xFF", "JPEG"),
    (b"GIF87a", "GIF"),
    (b"GIF89a", "GIF"),
    (b"II*\x00", "TIFF"),
    (b"MM\x00*", "TIFF"),
];

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Kind of binary document detected in an input buffer.
///
/// # Returns
/// * `Some(name)` if the data starts with a known image/document signature
/// * `None` otherwise
pub fn binary_signature(data: &[u8]) -> Option<&'static str> {
    BINARY_SIGNATURES
        .iter()
        .find(|(magic, _)| data.starts_with(magic))
        .map(|(_, name)| *name)
}

/// Validate that bytes are recognized text and borrow them as `&str`.
///
/// A leading UTF-8 BOM is skipped.
///
/// # Returns
/// * `Ok(&str)` if the data is UTF-8 text
/// * `Err(Error::InputType)` for binary signatures, NUL bytes or invalid UTF-8
///
/// # Example
/// ```
/// use unocr::detect::detect_text;
///
/// assert_eq!(detect_text(b"Tender notice").unwrap(), "Tender notice");
/// assert!(detect_text(b"%PDF-1.7\n").is_err());
/// ```
pub fn detect_text(data: &[u8]) -> Result<&str> {
    if let Some(kind) = binary_signature(data) {
        return Err(Error::InputType(format!("{} data", kind)));
    }

    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    if let Some(pos) = data.iter().position(|&b| b == 0) {
        return Err(Error::InputType(format!("NUL byte at offset {}", pos)));
    }

    std::str::from_utf8(data).map_err(|e| Error::InputType(format!("invalid UTF-8: {}", e)))
}

/// Check if bytes are acceptable text input.
pub fn is_text_bytes(data: &[u8]) -> bool {
    detect_text(data).is_ok()
}
