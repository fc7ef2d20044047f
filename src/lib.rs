#![warn(missing_docs)]
//! Silk Studio - product photos to studio catalog shots.
//!
//! A [`StudioController`] holds one session: the uploaded photo, the
//! generated image, and the status of the single outstanding request. The
//! photo is sent with a fixed catalog instruction ([`CATALOG_PROMPT`]) to an
//! [`ImageProvider`], and the first image part of the reply becomes the result.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use silk_studio::{GenerateOutcome, SelectedFile, StudioConfig, StudioController};
//!
//! #[tokio::main]
//! async fn main() -> silk_studio::Result<()> {
//!     let provider = StudioConfig::from_env().gemini_provider()?;
//!     let studio = StudioController::new(Arc::new(provider));
//!
//!     studio.select_image(&SelectedFile::from_path("sneaker.jpg")?).await?;
//!     match studio.generate().await {
//!         GenerateOutcome::Succeeded => {
//!             studio.download_result(".").await?;
//!         }
//!         other => eprintln!("no result: {other:?} {:?}", studio.error_message()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `gemini`: Gemini (Google) provider
//! - `cli`: the `silk-studio` command-line front end

pub mod config;
mod error;
pub mod image;
pub mod prompt;
pub mod studio;

// Re-export error types at crate root
pub use error::{Result, SilkStudioError, FALLBACK_MESSAGE, NO_IMAGE_MESSAGE};

pub use config::StudioConfig;
pub use image::{
    EditRequest, EncodedImage, ImageFormat, ImageProvider, ImageProviderKind, SelectedFile,
};
pub use prompt::CATALOG_PROMPT;
pub use studio::{
    GenerateOutcome, GenerationStatus, SkipReason, StudioController, StudioState, RESULT_FILENAME,
};

#[cfg(feature = "gemini")]
pub use image::providers::{GeminiModel, GeminiProvider, GeminiProviderBuilder};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{Result, SilkStudioError};
    pub use crate::image::{EncodedImage, ImageProvider, SelectedFile};
    pub use crate::studio::{GenerateOutcome, GenerationStatus, StudioController};

    #[cfg(feature = "gemini")]
    pub use crate::image::providers::GeminiProvider;
}
