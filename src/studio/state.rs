//! Session state owned by the controller.

use crate::image::EncodedImage;

/// Where the current generation attempt stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenerationStatus {
    /// Nothing requested since the last upload.
    #[default]
    Idle,
    /// A request to the service is outstanding.
    InProgress,
    /// The last request produced an image.
    Succeeded,
    /// The last request or upload failed, with a user-facing message.
    Failed(String),
}

impl GenerationStatus {
    /// Returns true while a request is outstanding.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Returns the failure message, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Short machine-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::InProgress => "in_progress",
            Self::Succeeded => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

impl std::fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(message) => write!(f, "failed: {message}"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Snapshot of everything the controller owns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudioState {
    pub(crate) source: Option<EncodedImage>,
    pub(crate) result: Option<EncodedImage>,
    pub(crate) status: GenerationStatus,
}

impl StudioState {
    /// The uploaded photo.
    pub fn source(&self) -> Option<&EncodedImage> {
        self.source.as_ref()
    }

    /// The generated catalog image.
    pub fn result(&self) -> Option<&EncodedImage> {
        self.result.as_ref()
    }

    /// Current generation status.
    pub fn status(&self) -> &GenerationStatus {
        &self.status
    }

    /// The message to show the user, present only when the status is failed.
    pub fn error_message(&self) -> Option<&str> {
        self.status.error_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle_and_empty() {
        let state = StudioState::default();
        assert_eq!(state.status(), &GenerationStatus::Idle);
        assert!(state.source().is_none());
        assert!(state.result().is_none());
        assert!(state.error_message().is_none());
    }

    #[test]
    fn test_error_message_only_when_failed() {
        assert_eq!(
            GenerationStatus::Failed("quota exceeded".into()).error_message(),
            Some("quota exceeded")
        );
        assert!(GenerationStatus::Succeeded.error_message().is_none());
        assert!(GenerationStatus::InProgress.is_in_progress());
        assert!(!GenerationStatus::Idle.is_in_progress());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(GenerationStatus::InProgress.to_string(), "in_progress");
        assert_eq!(
            GenerationStatus::Failed("boom".into()).to_string(),
            "failed: boom"
        );
    }
}
