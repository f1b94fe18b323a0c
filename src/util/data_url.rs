//! Data URL encoding for picked image files.

#[cfg(test)]
#[path = "data_url_test.rs"]
mod data_url_test;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// MIME type used when the file does not report one.
pub const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("file read failed: {0}")]
pub struct ReadError(pub String);

/// A user-selected file that can be read asynchronously.
#[async_trait::async_trait(?Send)]
pub trait ImageFile {
    fn name(&self) -> &str;

    /// Read the whole file as a `data:` URL.
    async fn read_as_data_url(&self) -> Result<String, ReadError>;
}

/// Encode `bytes` as `data:{mime};base64,{payload}`.
#[must_use]
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.trim().is_empty() { FALLBACK_MIME } else { mime.trim() };
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Guess an image MIME type from a file name extension.
#[must_use]
pub fn mime_from_name(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("ico") => "image/x-icon",
        _ => FALLBACK_MIME,
    }
}

/// File already held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl InMemoryFile {
    /// Build from bytes, guessing the MIME type from `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = mime_from_name(&name).to_owned();
        Self { name, mime, bytes }
    }
}

#[async_trait::async_trait(?Send)]
impl ImageFile for InMemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_as_data_url(&self) -> Result<String, ReadError> {
        Ok(encode(&self.mime, &self.bytes))
    }
}
