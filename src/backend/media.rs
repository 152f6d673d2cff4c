use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::error::{Result, TagsmithError};

/// An image payload ready to be sent inline with the generation request:
/// base64-encoded bytes paired with their MIME type.
///
/// The input bytes are only read; callers keep ownership of their buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    data: String,
    mime_type: String,
}

impl InlineImage {
    /// Encode raw image bytes for inline transport.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        InlineImage {
            data: STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    /// Read an image file from disk and guess its MIME type from the
    /// extension. Unknown extensions fall back to `application/octet-stream`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).map_err(|e| TagsmithError::ImageRead(e.to_string()))?;
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        debug!(
            path = %path.display(),
            mime_type = %mime_type,
            bytes = bytes.len(),
            "loaded image file"
        );
        Ok(InlineImage::from_bytes(&bytes, mime_type))
    }

    /// The base64-encoded image bytes.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}
