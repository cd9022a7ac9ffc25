mod image;
mod progress;
mod service;

// Public API of the play subsystem.
pub use crate::error::PlayError;
pub use image::{DEFAULT_PLACEHOLDER_IMAGE, ImageSource, resolve_image, resolve_image_with};
pub use progress::{AnswerOutcome, PlayProgress, percentage_correct};
pub use service::{PlaySession, PlayState};
