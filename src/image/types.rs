//! Core image types.

use crate::error::{Result, SilkStudioError};
use base64::Engine;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG format (lossless).
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format (modern, efficient).
    WebP,
}

impl ImageFormat {
    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Attempts to detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Maps a MIME type back to a known format.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime.trim().to_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }
}

/// An encoded image payload plus its MIME type.
///
/// Used both for the uploaded source photo and for the generated result.
/// The MIME type is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mime_type: String,
    data: Vec<u8>,
}

impl EncodedImage {
    /// Creates an image from raw bytes.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Result<Self> {
        let mime_type = mime_type.into();
        if mime_type.trim().is_empty() {
            return Err(SilkStudioError::Decode("missing MIME type".into()));
        }
        Ok(Self { mime_type, data })
    }

    /// Creates an image from a base64 payload.
    pub fn from_base64(mime_type: impl Into<String>, payload: &str) -> Result<Self> {
        let data = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| SilkStudioError::Decode(e.to_string()))?;
        Self::new(mime_type, data)
    }

    /// Returns the MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the raw image bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the known format for this MIME type, if any.
    pub fn format(&self) -> Option<ImageFormat> {
        ImageFormat::from_mime_type(&self.mime_type)
    }

    /// Returns the size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Encodes the image data as base64.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// Returns the image as a displayable data URI.
    pub fn to_data_uri(&self) -> String {
        crate::image::data_uri::encode(&self.mime_type, &self.data)
    }
}
