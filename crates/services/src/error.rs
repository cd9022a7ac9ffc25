//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::{QuizError, QuizId, ValidationError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// The shared registry lock was poisoned by a panicking holder.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("quiz registry lock poisoned")]
pub struct RegistryPoisoned;

/// Errors emitted by `PlaySession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayError {
    #[error("play session already completed")]
    Completed,
    #[error("answer index {index} is out of range (expected < {len})")]
    AnswerOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Errors emitted by `QuizEditor`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EditorError {
    #[error("quiz {0} not found")]
    QuizNotFound(QuizId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Play(#[from] PlayError),
    #[error(transparent)]
    Poisoned(#[from] RegistryPoisoned),
}

/// Errors emitted by `QuizLibrary`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LibraryError {
    /// Another load or save is still running.
    #[error("a load or save is already in progress")]
    Busy,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Poisoned(#[from] RegistryPoisoned),
}

impl LibraryError {
    /// True when the backend has no saved collection yet.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound))
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Library(#[from] LibraryError),
}
