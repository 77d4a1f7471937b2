use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

use crate::error::{Result, SurveyError};
use crate::utils::constants::DEFAULT_IMAGE_MIME;

/// An image read from disk and encoded for an inline request part.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String,
}

/// Read an image file and base64-encode its bytes
pub fn encode_image(path: &Path) -> Result<EncodedImage> {
    if !path.exists() {
        return Err(SurveyError::ImageNotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    Ok(EncodedImage {
        mime_type: mime_type_for(path).to_string(),
        data: STANDARD.encode(bytes),
    })
}

/// Guess the MIME type from the file extension, falling back to JPEG
pub fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => DEFAULT_IMAGE_MIME,
    }
}
