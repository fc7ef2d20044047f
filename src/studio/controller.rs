//! The studio controller: upload, generate, download, reset.

use crate::error::Result;
use crate::image::{
    data_uri, read_as_data_uri, EditRequest, EncodedImage, ImageProvider, SelectedFile,
};
use crate::prompt::CATALOG_PROMPT;
use crate::studio::state::{GenerationStatus, StudioState};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};
use tokio::task::JoinHandle;

/// Fixed filename used when downloading the result.
pub const RESULT_FILENAME: &str = "silk-studio-result.png";

/// Message recorded when an outstanding generation is abandoned mid-flight.
pub const INTERRUPTED_MESSAGE: &str = "Generation was interrupted. Please try again.";

/// Why a generation request was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No photo has been uploaded yet.
    NoSource,
    /// A request is already outstanding.
    InProgress,
}

/// What a call to [`StudioController::generate`] ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Preconditions failed; no request was sent.
    Skipped(SkipReason),
    /// A result image was stored.
    Succeeded,
    /// The request failed; the message is now the session's error message.
    Failed(String),
    /// The response arrived after every handle to the session was dropped.
    Discarded,
}

struct Shared {
    state: Mutex<StudioState>,
    provider: Arc<dyn ImageProvider>,
}

/// A request that passed the precondition check.
///
/// The guard is armed as soon as the status turns `InProgress`, so the status
/// is released even if the request is never polled.
struct Pending {
    request: EditRequest,
    guard: InFlight,
}

impl Shared {
    fn apply_selection(&self, image: EncodedImage) {
        let mut state = self.state.lock();
        tracing::info!(
            mime_type = image.mime_type(),
            size_bytes = image.size(),
            "source image selected"
        );
        state.source = Some(image);
        state.result = None;
        // An outstanding request keeps its status until it resolves.
        if !state.status.is_in_progress() {
            state.status = GenerationStatus::Idle;
        }
    }

    fn fail_selection(&self, message: String) {
        let mut state = self.state.lock();
        tracing::warn!(error = %message, "failed to read selected image");
        if !state.status.is_in_progress() {
            state.status = GenerationStatus::Failed(message);
        }
    }

    fn select_data_uri(&self, uri: &str) -> Result<()> {
        match data_uri::parse(uri) {
            Ok(image) => {
                self.apply_selection(image);
                Ok(())
            }
            Err(e) => {
                self.fail_selection(e.user_message());
                Err(e)
            }
        }
    }

    fn begin_generation(self: &Arc<Self>) -> std::result::Result<Pending, SkipReason> {
        let mut state = self.state.lock();
        if state.status.is_in_progress() {
            tracing::debug!("generation already in progress, ignoring request");
            return Err(SkipReason::InProgress);
        }
        let source = state.source.clone().ok_or_else(|| {
            tracing::debug!("no source image selected, ignoring request");
            SkipReason::NoSource
        })?;

        state.status = GenerationStatus::InProgress;
        tracing::info!(mime_type = source.mime_type(), "generation started");

        Ok(Pending {
            request: EditRequest::new(CATALOG_PROMPT, source),
            guard: InFlight {
                shared: Arc::downgrade(self),
                armed: true,
            },
        })
    }

    fn finish_generation(&self, result: Result<EncodedImage>) -> GenerateOutcome {
        let mut state = self.state.lock();

        match result {
            Ok(image) => {
                tracing::info!(
                    mime_type = image.mime_type(),
                    size_bytes = image.size(),
                    "generation succeeded"
                );
                state.result = Some(image);
                state.status = GenerationStatus::Succeeded;
                GenerateOutcome::Succeeded
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!(error = %e, "generation failed");
                state.result = None;
                state.status = GenerationStatus::Failed(message.clone());
                GenerateOutcome::Failed(message)
            }
        }
    }
}

/// Moves an abandoned request out of `InProgress` when its future is dropped.
struct InFlight {
    shared: Weak<Shared>,
    armed: bool,
}

impl InFlight {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(shared) = self.shared.upgrade() {
            let mut state = shared.state.lock();
            if !state.status.is_in_progress() {
                return;
            }
            tracing::warn!("generation abandoned before completion");
            state.status = GenerationStatus::Failed(INTERRUPTED_MESSAGE.to_string());
        }
    }
}

async fn run_generation(
    shared: Weak<Shared>,
    provider: Arc<dyn ImageProvider>,
    pending: Pending,
) -> GenerateOutcome {
    let Pending { request, guard } = pending;

    let result = provider.edit(&request).await;
    guard.disarm();

    match shared.upgrade() {
        Some(shared) => shared.finish_generation(result),
        None => {
            tracing::warn!("studio session closed before generation finished, discarding response");
            GenerateOutcome::Discarded
        }
    }
}

/// Owns one user session's images and generation status.
///
/// Clones are handles onto the same session. Background work holds only a
/// weak reference, so once every handle is dropped late results are discarded.
#[derive(Clone)]
pub struct StudioController {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for StudioController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudioController")
            .field("provider", &self.shared.provider.name())
            .field("status", &self.status())
            .finish()
    }
}

impl StudioController {
    /// Creates a controller for a fresh session.
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(StudioState::default()),
                provider,
            }),
        }
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> StudioState {
        self.shared.state.lock().clone()
    }

    /// Current generation status.
    pub fn status(&self) -> GenerationStatus {
        self.shared.state.lock().status.clone()
    }

    /// The current error message, if the last attempt failed.
    pub fn error_message(&self) -> Option<String> {
        self.shared
            .state
            .lock()
            .error_message()
            .map(str::to_string)
    }

    /// The uploaded photo.
    pub fn source(&self) -> Option<EncodedImage> {
        self.shared.state.lock().source.clone()
    }

    /// The generated image.
    pub fn result(&self) -> Option<EncodedImage> {
        self.shared.state.lock().result.clone()
    }

    /// Reads a user-selected file and makes it the source image.
    ///
    /// Clears any previous result and error message. If the read fails, the
    /// previous source is kept and the failure becomes the error message.
    /// Concurrent selections race; the last one to finish wins.
    pub async fn select_image(&self, file: &SelectedFile) -> Result<()> {
        match read_as_data_uri(file).await {
            Ok(uri) => self.shared.select_data_uri(&uri),
            Err(e) => {
                self.shared.fail_selection(e.user_message());
                Err(e)
            }
        }
    }

    /// Like [`select_image`](Self::select_image), but runs in the background.
    ///
    /// Resolves to `None` if the session ended before the read finished.
    pub fn spawn_select_image(&self, file: SelectedFile) -> JoinHandle<Option<Result<()>>> {
        let shared = Arc::downgrade(&self.shared);
        tokio::spawn(async move {
            let read = read_as_data_uri(&file).await;
            let Some(shared) = shared.upgrade() else {
                tracing::warn!("studio session closed before file read finished, discarding");
                return None;
            };
            Some(match read {
                Ok(uri) => shared.select_data_uri(&uri),
                Err(e) => {
                    shared.fail_selection(e.user_message());
                    Err(e)
                }
            })
        })
    }

    /// Makes an already-read `data:<mime>;base64,...` string the source image.
    pub fn select_data_uri(&self, uri: &str) -> Result<()> {
        self.shared.select_data_uri(uri)
    }

    /// Sends the source image with the catalog instruction to the provider.
    ///
    /// Does nothing without a source image or while a request is outstanding.
    /// Failures never escape; they become the session's error message. A prior
    /// result stays visible until this request resolves.
    pub async fn generate(&self) -> GenerateOutcome {
        let pending = match self.shared.begin_generation() {
            Ok(pending) => pending,
            Err(reason) => return GenerateOutcome::Skipped(reason),
        };
        run_generation(
            Arc::downgrade(&self.shared),
            Arc::clone(&self.shared.provider),
            pending,
        )
        .await
    }

    /// Like [`generate`](Self::generate), but runs the request on a tokio task.
    ///
    /// Preconditions are checked before returning, so a second call made
    /// right after this one is already skipped.
    pub fn spawn_generate(&self) -> JoinHandle<GenerateOutcome> {
        let begun = self.shared.begin_generation();
        let shared = Arc::downgrade(&self.shared);
        let provider = Arc::clone(&self.shared.provider);
        tokio::spawn(async move {
            match begun {
                Ok(pending) => run_generation(shared, provider, pending).await,
                Err(reason) => GenerateOutcome::Skipped(reason),
            }
        })
    }

    /// Saves the result as [`RESULT_FILENAME`] inside `dir`.
    ///
    /// Returns `None` without touching the filesystem when there is no result.
    pub async fn download_result(&self, dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
        let Some(result) = self.result() else {
            tracing::debug!("no result to download");
            return Ok(None);
        };

        let path = dir.as_ref().join(RESULT_FILENAME);
        tokio::fs::write(&path, result.data()).await?;
        tracing::info!(path = %path.display(), size_bytes = result.size(), "result saved");
        Ok(Some(path))
    }

    /// Clears the result so the upload panel shows again.
    ///
    /// The source image and any error message are left alone.
    pub fn reset_result(&self) {
        self.shared.state.lock().result = None;
    }
}
