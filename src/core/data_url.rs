//! Images embedded as `data:` URLs - company logos and signature captures.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::path::Path;
use tracing::warn;

/// Encodes raw bytes as a base64 `data:` URL.
#[must_use]
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Guesses an image MIME type from the file extension.
#[must_use]
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Reads an image file into a `data:` URL.
///
/// A file that cannot be read yields `None` and a warning; the caller keeps whatever
/// image it had before.
#[must_use]
pub fn load_data_url(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(encode_data_url(mime_for_path(path), &bytes)),
        Err(e) => {
            warn!("Could not read image {}: {e}", path.display());
            None
        }
    }
}
