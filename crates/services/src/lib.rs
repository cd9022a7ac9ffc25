#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod library_service;
pub mod quiz_editor;
pub mod registry;
pub mod sessions;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, EditorError, LibraryError, PlayError, RegistryPoisoned};
pub use library_service::QuizLibrary;
pub use quiz_editor::{QuizEditor, QuizSummary};
pub use registry::SharedRegistry;

pub use sessions::{
    AnswerOutcome, DEFAULT_PLACEHOLDER_IMAGE, ImageSource, PlayProgress, PlaySession, PlayState,
    percentage_correct, resolve_image, resolve_image_with,
};
