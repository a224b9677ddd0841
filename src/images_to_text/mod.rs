mod response;
mod vision;

pub use response::{parse_recipe_response, strip_code_fence};
pub use vision::VisionExtractor;

use crate::error::VisionError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, warn};

/// Represents the source of a recipe photo
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image from a file path
    Path(String),
    /// Image as base64-encoded data (without any `data:` URL prefix)
    Base64(String),
}

/// Base64 image data tagged with its MIME type, ready to send to a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub data: String,
    pub media_type: &'static str,
}

impl ImagePayload {
    pub fn from_base64(data: impl Into<String>) -> Self {
        let data = data.into();
        let media_type = sniff_media_type(&data);
        Self { data, media_type }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_base64(STANDARD.encode(bytes))
    }

    /// Load the payload, reading the file for path sources
    pub async fn from_source(source: &ImageSource) -> Result<Self, VisionError> {
        match source {
            ImageSource::Base64(data) => Ok(Self::from_base64(data.trim())),
            ImageSource::Path(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|e| {
                    warn!("Failed to read image {}: {}", path, e);
                    VisionError::ImageRead { path: path.clone() }
                })?;
                debug!("Read {} bytes from {}", bytes.len(), path);
                Ok(Self::from_bytes(&bytes))
            }
        }
    }
}

/// Guess the MIME type from the first decoded bytes; JPEG when unsure.
fn sniff_media_type(data: &str) -> &'static str {
    // 16 base64 characters decode to 12 bytes, enough for every signature below
    let header = data
        .get(..16)
        .and_then(|prefix| STANDARD.decode(prefix).ok())
        .unwrap_or_default();

    if header.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if header.starts_with(b"GIF8") {
        "image/gif"
    } else if header.starts_with(b"RIFF") && header.get(8..12) == Some(b"WEBP".as_slice()) {
        "image/webp"
    } else {
        "image/jpeg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_media_type() {
        let png = STANDARD.encode(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR");
        let gif = STANDARD.encode(b"GIF89a\x01\x00\x01\x00\x00\x00\x00");
        let webp = STANDARD.encode(b"RIFF\x24\x00\x00\x00WEBPVP8 ");
        let jpeg = STANDARD.encode(b"\xff\xd8\xff\xe0\x00\x10JFIF\x00\x01\x01");

        assert_eq!(ImagePayload::from_base64(png).media_type, "image/png");
        assert_eq!(ImagePayload::from_base64(gif).media_type, "image/gif");
        assert_eq!(ImagePayload::from_base64(webp).media_type, "image/webp");
        assert_eq!(ImagePayload::from_base64(jpeg).media_type, "image/jpeg");
    }

    #[test]
    fn test_unknown_or_short_data_defaults_to_jpeg() {
        assert_eq!(ImagePayload::from_base64("abc").media_type, "image/jpeg");
        assert_eq!(
            ImagePayload::from_base64("not base64 at all!!").media_type,
            "image/jpeg"
        );
    }

    #[test]
    fn test_from_bytes_encodes() {
        let payload = ImagePayload::from_bytes(b"test data");
        assert_eq!(payload.data, "dGVzdCBkYXRh");
    }

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let source = ImageSource::Path("/definitely/not/here.jpg".to_string());
        let result = ImagePayload::from_source(&source).await;
        assert_eq!(
            result,
            Err(VisionError::ImageRead {
                path: "/definitely/not/here.jpg".to_string()
            })
        );
    }
}
