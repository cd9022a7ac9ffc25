use std::sync::Arc;

use tokio::sync::Mutex;

use quiz_core::Quiz;
use storage::repository::QuizRepository;

use crate::error::LibraryError;
use crate::registry::SharedRegistry;

/// Loads and saves the shared registry through a repository.
///
/// Only one load or save runs at a time; a call made while another is in
/// flight fails fast with `LibraryError::Busy` instead of queueing.
#[derive(Clone)]
pub struct QuizLibrary {
    registry: SharedRegistry,
    quizzes: Arc<dyn QuizRepository>,
    in_flight: Arc<Mutex<()>>,
}

impl QuizLibrary {
    #[must_use]
    pub fn new(registry: SharedRegistry, quizzes: Arc<dyn QuizRepository>) -> Self {
        Self {
            registry,
            quizzes,
            in_flight: Arc::new(Mutex::new(())),
        }
    }

    /// Write every registered quiz, replacing what was stored. Returns the
    /// number of quizzes written.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Busy` if a load or save is running and
    /// `LibraryError::Storage` if the write fails. The registry is never
    /// modified.
    pub async fn save(&self) -> Result<usize, LibraryError> {
        let _guard = self.in_flight.try_lock().map_err(|_| LibraryError::Busy)?;

        let snapshot: Vec<Quiz> = self
            .registry
            .read(|registry| registry.quizzes().cloned().collect())?;

        if let Err(err) = self.quizzes.save_quizzes(&snapshot).await {
            tracing::warn!(error = %err, "saving quiz collection failed");
            return Err(err.into());
        }

        tracing::info!(count = snapshot.len(), "quiz collection saved");
        Ok(snapshot.len())
    }

    /// Replace the registry with the stored collection, then make sure the
    /// default quiz is present. Returns the registry size afterwards.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Busy` if a load or save is running and
    /// `LibraryError::Storage` if nothing was stored or any record is
    /// invalid. The registry is left untouched on error.
    pub async fn load(&self) -> Result<usize, LibraryError> {
        let _guard = self.in_flight.try_lock().map_err(|_| LibraryError::Busy)?;

        let quizzes = match self.quizzes.load_quizzes().await {
            Ok(quizzes) => quizzes,
            Err(err) => {
                tracing::debug!(error = %err, "loading quiz collection failed");
                return Err(err.into());
            }
        };
        let loaded = quizzes.len();

        let (len, seeded) = self.registry.write(|registry| {
            registry.replace_all(quizzes);
            let seeded = registry.ensure_default_seeded();
            (registry.len(), seeded)
        })?;

        if seeded.is_some() {
            tracing::info!("stored collection had no default quiz; seeded one");
        }
        tracing::info!(loaded, "quiz collection loaded");
        Ok(len)
    }

    #[must_use]
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }
}
