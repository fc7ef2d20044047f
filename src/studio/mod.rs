//! Session state and the controller that drives it.

mod controller;
mod state;

pub use controller::{
    GenerateOutcome, SkipReason, StudioController, INTERRUPTED_MESSAGE, RESULT_FILENAME,
};
pub use state::{GenerationStatus, StudioState};
