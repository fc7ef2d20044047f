//! Runtime configuration resolved from the process environment.

use std::path::PathBuf;

/// Primary API key variable.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Fallback API key variable.
pub const FALLBACK_API_KEY_ENV: &str = "GOOGLE_API_KEY";
/// Model override variable.
pub const MODEL_ENV: &str = "SILK_STUDIO_MODEL";
/// Endpoint override variable.
pub const BASE_URL_ENV: &str = "SILK_STUDIO_BASE_URL";
/// Download directory variable.
pub const OUTPUT_DIR_ENV: &str = "SILK_STUDIO_OUTPUT_DIR";

/// Default Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for one studio session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioConfig {
    /// API credential. A missing key surfaces as a failed generation, not here.
    pub api_key: Option<String>,
    /// Model identifier; `None` uses the provider default.
    pub model: Option<String>,
    /// Base URL of the generation service.
    pub base_url: String,
    /// Directory that downloads are written into.
    pub output_dir: PathBuf,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl StudioConfig {
    /// Reads configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_key: get(API_KEY_ENV).or_else(|| get(FALLBACK_API_KEY_ENV)),
            model: get(MODEL_ENV),
            base_url: get(BASE_URL_ENV).unwrap_or(defaults.base_url),
            output_dir: get(OUTPUT_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        }
    }

    /// Builds the Gemini provider described by this configuration.
    #[cfg(feature = "gemini")]
    pub fn gemini_provider(&self) -> crate::Result<crate::image::providers::GeminiProvider> {
        use crate::image::providers::{GeminiModel, GeminiProvider};

        let mut builder = GeminiProvider::builder().base_url(&self.base_url);
        if let Some(ref key) = self.api_key {
            builder = builder.api_key(key);
        }
        if let Some(ref model) = self.model {
            builder = builder.model(GeminiModel::from_id(model));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StudioConfig::from_lookup(lookup(&[]));
        assert_eq!(config, StudioConfig::default());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_primary_key_wins_over_fallback() {
        let config = StudioConfig::from_lookup(lookup(&[
            (API_KEY_ENV, "primary"),
            (FALLBACK_API_KEY_ENV, "fallback"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("primary"));

        let config = StudioConfig::from_lookup(lookup(&[
            (API_KEY_ENV, " "),
            (FALLBACK_API_KEY_ENV, "fallback"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("fallback"));
    }

    #[test]
    fn test_overrides() {
        let config = StudioConfig::from_lookup(lookup(&[
            (MODEL_ENV, "gemini-3-pro-image-preview"),
            (BASE_URL_ENV, "http://localhost:8080/v1beta"),
            (OUTPUT_DIR_ENV, "/tmp/renders"),
        ]));
        assert_eq!(config.model.as_deref(), Some("gemini-3-pro-image-preview"));
        assert_eq!(config.base_url, "http://localhost:8080/v1beta");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/renders"));
    }

    #[cfg(feature = "gemini")]
    #[test]
    fn test_gemini_provider_builds_without_key() {
        let config = StudioConfig::default();
        assert!(config.gemini_provider().is_ok());
    }
}
