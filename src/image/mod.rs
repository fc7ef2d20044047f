//! Image payloads, file selection and the generation-service seam.

pub mod data_uri;
mod file;
mod provider;
pub mod providers;
mod types;

pub use file::{read_as_data_uri, SelectedFile};
pub use provider::{EditRequest, ImageProvider, ImageProviderKind};
pub use types::{EncodedImage, ImageFormat};
