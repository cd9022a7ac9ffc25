use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::QuizRegistry;
use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::library_service::QuizLibrary;
use crate::quiz_editor::QuizEditor;
use crate::registry::SharedRegistry;

/// Assembles app-facing services around one shared registry.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    registry: SharedRegistry,
    editor: Arc<QuizEditor>,
    library: Arc<QuizLibrary>,
}

impl AppServices {
    /// Build services over `storage` and load the stored collection.
    ///
    /// The registry starts with the default quiz; when nothing was stored
    /// yet it stays that way.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Library` if a stored collection exists but
    /// cannot be read.
    pub async fn bootstrap(storage: Storage, clock: Clock) -> Result<Self, AppServicesError> {
        let mut seeded = QuizRegistry::new();
        seeded.ensure_default_seeded();
        let registry = SharedRegistry::new(seeded);

        let library = Arc::new(QuizLibrary::new(registry.clone(), storage.quizzes));
        match library.load().await {
            Ok(count) => tracing::info!(count, "quiz library ready"),
            Err(err) if err.is_not_found() => {
                tracing::info!("no saved quiz collection; starting with the default quiz");
            }
            Err(err) => return Err(err.into()),
        }

        let editor = Arc::new(QuizEditor::new(clock, registry.clone()));
        Ok(Self {
            clock,
            registry,
            editor,
            library,
        })
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or the initial
    /// load fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::bootstrap(storage, clock).await
    }

    /// Build services backed by a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the file exists but cannot be read.
    pub async fn new_json(path: impl Into<PathBuf>, clock: Clock) -> Result<Self, AppServicesError> {
        Self::bootstrap(Storage::json_file(path), clock).await
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn registry(&self) -> SharedRegistry {
        self.registry.clone()
    }

    #[must_use]
    pub fn editor(&self) -> Arc<QuizEditor> {
        Arc::clone(&self.editor)
    }

    #[must_use]
    pub fn library(&self) -> Arc<QuizLibrary> {
        Arc::clone(&self.library)
    }
}
