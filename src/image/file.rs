//! User-selected image files.

use crate::error::{Result, SilkStudioError};
use crate::image::data_uri;
use crate::image::types::ImageFormat;
use std::path::{Path, PathBuf};

/// A file chosen by the user, with the content type the picker declared.
///
/// The declared type is trusted as-is; file contents are never sniffed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    path: PathBuf,
    mime_type: String,
}

impl SelectedFile {
    /// Creates a selection with an explicit MIME type.
    pub fn new(path: impl Into<PathBuf>, mime_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Creates a selection whose MIME type is declared by the file extension.
    ///
    /// Only image extensions are accepted, mirroring an `image/*` picker filter.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ImageFormat::from_extension)
            .ok_or_else(|| {
                SilkStudioError::InvalidRequest(format!(
                    "{} is not a supported image file (png, jpg, webp)",
                    path.display()
                ))
            })?;
        Ok(Self::new(path, format.mime_type()))
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the declared MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// Reads the whole file and returns it as a `data:<mime>;base64,...` string.
pub async fn read_as_data_uri(file: &SelectedFile) -> Result<String> {
    let bytes = tokio::fs::read(file.path()).await?;
    tracing::debug!(
        path = %file.path().display(),
        mime_type = file.mime_type(),
        size_bytes = bytes.len(),
        "read selected file"
    );
    Ok(data_uri::encode(file.mime_type(), &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_declares_mime_from_extension() {
        let file = SelectedFile::from_path("shots/bag.JPEG").unwrap();
        assert_eq!(file.mime_type(), "image/jpeg");
        assert_eq!(file.path(), Path::new("shots/bag.JPEG"));

        let file = SelectedFile::from_path("lamp.webp").unwrap();
        assert_eq!(file.mime_type(), "image/webp");
    }

    #[test]
    fn test_from_path_rejects_non_images() {
        assert!(SelectedFile::from_path("notes.txt").is_err());
        assert!(SelectedFile::from_path("no_extension").is_err());
    }

    #[tokio::test]
    async fn test_read_as_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shoe.png");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let uri = read_as_data_uri(&SelectedFile::new(&path, "image/png"))
            .await
            .unwrap();
        assert_eq!(uri, "data:image/png;base64,AQID");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = SelectedFile::new(dir.path().join("missing.png"), "image/png");
        let err = read_as_data_uri(&file).await.unwrap_err();
        assert!(matches!(err, SilkStudioError::Io(_)));
    }
}
