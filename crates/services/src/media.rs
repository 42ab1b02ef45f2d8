//! Image encoding helpers shared by the puzzle source and the background loader.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Encodes bytes as a `data:` URI the webview can render directly.
#[must_use]
pub fn data_uri(mime: &str, data: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(data))
}

/// Decodes a base64 `data:` URI into its MIME type and bytes.
///
/// Returns `None` for anything that is not a base64 data URI.
#[must_use]
pub fn decode_data_uri(value: &str) -> Option<(String, Vec<u8>)> {
    let rest = value.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let mime = if mime.is_empty() { DEFAULT_IMAGE_MIME } else { mime };
    let data = decode_base64(payload)?;
    Some((mime.to_string(), data))
}

/// Decodes a bare base64 payload, tolerating embedded line breaks.
#[must_use]
pub fn decode_base64(payload: &str) -> Option<Vec<u8>> {
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }
    STANDARD.decode(compact).ok()
}

/// Recognizes the common raster formats by their leading magic bytes.
#[must_use]
pub fn sniff_image_mime(data: &[u8]) -> Option<&'static str> {
    match data {
        [0x89, b'P', b'N', b'G', ..] => Some("image/png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        _ => None,
    }
}

/// Picks the MIME type for downloaded image bytes.
///
/// The bytes win over the `Content-Type` header, which static hosts often
/// send as `application/octet-stream`. Returns `None` when neither says image.
#[must_use]
pub fn resolve_image_mime(content_type: Option<&str>, data: &[u8]) -> Option<String> {
    if let Some(mime) = sniff_image_mime(data) {
        return Some(mime.to_string());
    }
    let declared = content_type?
        .split(';')
        .next()
        .map(str::trim)
        .filter(|mime| mime.starts_with("image/"))?;
    Some(declared.to_string())
}

/// Guesses an image MIME type from a file extension.
#[must_use]
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => DEFAULT_IMAGE_MIME,
    }
}
