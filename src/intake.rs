// Image intake - validates and encodes user-provided images

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use thiserror::Error;

/// A user-provided image, encoded for transport and preview
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Base64 payload, ready to embed in a request body
    pub data: String,
    pub mime_type: String,
    /// data: URI usable for display
    pub preview: String,
    /// Original file name, when known
    pub source_name: Option<String>,
}

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Not an image file: {0}")]
    NotAnImage(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Map a file extension to an image MIME type
fn image_mime_from_extension(ext: &str) -> Option<&'static str> {
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Ingest an image file from disk.
/// The declared content type comes from the file extension; anything
/// outside image/* is rejected before the file is read.
pub async fn ingest_file(path: impl AsRef<Path>) -> Result<UploadedImage, IntakeError> {
    let path = path.as_ref();

    let mime = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(image_mime_from_extension)
        .ok_or_else(|| IntakeError::NotAnImage(path.display().to_string()))?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| IntakeError::Io(e.to_string()))?;

    let mut image = ingest_bytes(&bytes, mime)?;
    image.source_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string);

    Ok(image)
}

/// Encode raw image bytes for transport and preview
pub fn ingest_bytes(bytes: &[u8], mime_type: &str) -> Result<UploadedImage, IntakeError> {
    if !mime_type.starts_with("image/") {
        return Err(IntakeError::NotAnImage(mime_type.to_string()));
    }

    let data = STANDARD.encode(bytes);
    let preview = format!("data:{};base64,{}", mime_type, data);

    Ok(UploadedImage {
        data,
        mime_type: mime_type.to_string(),
        preview,
        source_name: None,
    })
}
