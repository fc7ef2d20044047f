//! Image provider trait.

use crate::error::Result;
use crate::image::types::EncodedImage;
use async_trait::async_trait;

/// Image provider kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageProviderKind {
    /// Google Gemini image models.
    Gemini,
}

impl std::fmt::Display for ImageProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
        }
    }
}

/// A single image edit: one source image and one instruction.
#[derive(Debug, Clone)]
pub struct EditRequest {
    /// Instruction text sent alongside the image.
    pub prompt: String,
    /// The image to transform.
    pub image: EncodedImage,
}

impl EditRequest {
    /// Creates a new edit request.
    pub fn new(prompt: impl Into<String>, image: EncodedImage) -> Self {
        Self {
            prompt: prompt.into(),
            image,
        }
    }
}

/// Trait for image editing services.
///
/// Implementations issue exactly one outbound call per `edit` and never retry.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Sends the image and instruction, returning the first generated image.
    async fn edit(&self, request: &EditRequest) -> Result<EncodedImage>;

    /// Returns the kind of this provider.
    fn kind(&self) -> ImageProviderKind;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str {
        match self.kind() {
            ImageProviderKind::Gemini => "Gemini (Google)",
        }
    }

    /// Checks if the provider is reachable and authenticated.
    async fn health_check(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_display() {
        assert_eq!(ImageProviderKind::Gemini.to_string(), "gemini");
    }

    #[test]
    fn test_edit_request_new() {
        let image = EncodedImage::new("image/png", vec![1]).unwrap();
        let request = EditRequest::new("make it shine", image.clone());
        assert_eq!(request.prompt, "make it shine");
        assert_eq!(request.image, image);
    }
}
