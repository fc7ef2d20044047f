//! Gemini (Google) image editing provider.

use crate::config::DEFAULT_BASE_URL;
use crate::error::{
    parse_retry_after, sanitize_error_message, service_error_message, Result, SilkStudioError,
};
use crate::image::provider::{EditRequest, ImageProvider, ImageProviderKind};
use crate::image::types::EncodedImage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Gemini image model variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GeminiModel {
    /// Nano Banana - Gemini 2.5 Flash Image (fast, economical).
    #[default]
    NanoBanana,
    /// Nano Banana Pro - Gemini 3 Pro Image (highest quality).
    NanoBananaPro,
    /// Any other model identifier.
    Custom(String),
}

impl GeminiModel {
    /// Returns the API model identifier.
    pub fn as_str(&self) -> &str {
        match self {
            Self::NanoBanana => "gemini-2.5-flash-image",
            Self::NanoBananaPro => "gemini-3-pro-image-preview",
            Self::Custom(id) => id,
        }
    }

    /// Maps an identifier onto a known variant when possible.
    pub fn from_id(id: &str) -> Self {
        match id.trim() {
            "gemini-2.5-flash-image" | "nano-banana" => Self::NanoBanana,
            "gemini-3-pro-image-preview" | "nano-banana-pro" => Self::NanoBananaPro,
            other => Self::Custom(other.to_string()),
        }
    }
}

/// Builder for GeminiProvider.
#[derive(Debug, Clone, Default)]
pub struct GeminiProviderBuilder {
    api_key: Option<String>,
    model: GeminiModel,
    base_url: Option<String>,
    client: Option<reqwest::Client>,
}

impl GeminiProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    ///
    /// The environment is not consulted here; use
    /// [`StudioConfig::gemini_provider`](crate::StudioConfig::gemini_provider)
    /// to pick the key up from `GEMINI_API_KEY`/`GOOGLE_API_KEY`.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the Gemini model variant.
    pub fn model(mut self, model: GeminiModel) -> Self {
        self.model = model;
        self
    }

    /// Overrides the service base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Uses a preconfigured HTTP client.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the provider.
    ///
    /// A missing API key is not an error here; the first call fails with
    /// [`SilkStudioError::Auth`] instead.
    pub fn build(self) -> Result<GeminiProvider> {
        let api_key = self.api_key.filter(|k| !k.trim().is_empty());

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(GeminiProvider {
            client: self.client.unwrap_or_default(),
            api_key,
            model: self.model,
            base_url,
        })
    }
}

/// Gemini image editing provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    model: GeminiModel,
    base_url: String,
}

impl GeminiProvider {
    /// Creates a new `GeminiProviderBuilder`.
    pub fn builder() -> GeminiProviderBuilder {
        GeminiProviderBuilder::new()
    }

    /// Returns the configured model.
    pub fn model(&self) -> &GeminiModel {
        &self.model
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            SilkStudioError::Auth(format!(
                "{} (or {}) not set and no API key provided",
                crate::config::API_KEY_ENV,
                crate::config::FALLBACK_API_KEY_ENV
            ))
        })
    }

    async fn edit_impl(&self, request: &EditRequest) -> Result<EncodedImage> {
        let start = Instant::now();
        let api_key = self.api_key()?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url,
            self.model.as_str(),
        );

        let body = GeminiRequest::from_edit_request(request);

        tracing::debug!(
            model = self.model.as_str(),
            mime_type = request.image.mime_type(),
            size_bytes = request.image.size(),
            "sending Gemini generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error(status.as_u16(), &text, &headers));
        }

        let gemini_response: GeminiResponse = response.json().await?;
        let image = extract_image(gemini_response)?;

        tracing::debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            mime_type = image.mime_type(),
            size_bytes = image.size(),
            "Gemini returned an image"
        );

        Ok(image)
    }
}

/// Maps a non-success HTTP response onto an error carrying the service message.
fn parse_error(status: u16, text: &str, headers: &reqwest::header::HeaderMap) -> SilkStudioError {
    let message = service_error_message(text);
    match status {
        401 | 403 => SilkStudioError::Auth(message),
        429 => SilkStudioError::RateLimited {
            retry_after: parse_retry_after(headers).map(std::time::Duration::from_secs),
            message,
        },
        400 | 404 => SilkStudioError::InvalidRequest(message),
        _ => {
            let lower = message.to_lowercase();
            if lower.contains("safety") || lower.contains("blocked") || lower.contains("prohibited")
            {
                SilkStudioError::ContentBlocked(message)
            } else {
                SilkStudioError::Api { status, message }
            }
        }
    }
}

/// Interprets a successful response body.
fn extract_image(response: GeminiResponse) -> Result<EncodedImage> {
    if let Some(ref feedback) = response.prompt_feedback {
        if let Some(ref reason) = feedback.block_reason {
            let msg = feedback
                .block_reason_message
                .clone()
                .unwrap_or_else(|| format!("Prompt blocked: {}", reason));
            return Err(SilkStudioError::ContentBlocked(sanitize_error_message(&msg)));
        }
    }

    if let Some(reason) = response
        .candidates
        .first()
        .and_then(|c| c.finish_reason.as_deref())
    {
        tracing::debug!(finish_reason = reason, "Gemini candidate finished");
    }

    let inline = first_inline_image(&response).ok_or(SilkStudioError::NoImageGenerated)?;
    EncodedImage::from_base64(&inline.mime_type, &inline.data)
}

/// Returns the first inline image part of the first candidate, in part order.
fn first_inline_image(response: &GeminiResponse) -> Option<&InlineData> {
    let content = response.candidates.first()?.content.as_ref()?;
    content.parts.iter().find_map(|part| match part {
        GeminiPartResponse::InlineData { inline_data } => Some(inline_data),
        GeminiPartResponse::Text { .. } | GeminiPartResponse::Other(_) => None,
    })
}

#[async_trait]
impl ImageProvider for GeminiProvider {
    async fn edit(&self, request: &EditRequest) -> Result<EncodedImage> {
        self.edit_impl(request).await
    }

    fn kind(&self) -> ImageProviderKind {
        ImageProviderKind::Gemini
    }

    async fn health_check(&self) -> Result<()> {
        let api_key = self.api_key()?;
        let url = format!("{}/models/{}", self.base_url, self.model.as_str());

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", api_key)
            .send()
            .await?;

        match response.status().as_u16() {
            401 | 403 => Err(SilkStudioError::Auth("Invalid API key".into())),
            404 => Err(SilkStudioError::InvalidRequest(
                "Model not found. Verify the model name is correct.".into(),
            )),
            s if !(200..300).contains(&s) => Err(SilkStudioError::Api {
                status: s,
                message: "Health check failed".into(),
            }),
            _ => Ok(()),
        }
    }
}

// Request/Response types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiRequestPart>,
}

/// A part in a Gemini request - can be text or inline image data.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiRequestPart {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiConfig {
    response_modalities: Vec<String>,
}

impl GeminiRequest {
    fn from_edit_request(req: &EditRequest) -> Self {
        // Image first, then the instruction
        let parts = vec![
            GeminiRequestPart::InlineData {
                inline_data: InlineData {
                    mime_type: req.image.mime_type().to_string(),
                    data: req.image.to_base64(),
                },
            },
            GeminiRequestPart::Text {
                text: req.prompt.clone(),
            },
        ];

        Self {
            contents: vec![GeminiContent { parts }],
            generation_config: GeminiConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContentResponse>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
    #[serde(default)]
    block_reason_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

/// A response part. Anything without inline data or text lands in `Other`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeminiPartResponse {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        #[allow(dead_code)]
        text: String,
    },
    Other(#[allow(dead_code)] serde_json::Value),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}
