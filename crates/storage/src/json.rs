use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::Quiz;
use tokio::fs;

use crate::repository::{
    QuizRecord, QuizRepository, StorageError, quizzes_from_records, records_from_quizzes,
};

/// Quiz collection stored as one pretty-printed JSON array.
///
/// Saves go to a sibling temp file first and are renamed over the target, so
/// a failed write never truncates the existing collection.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl QuizRepository for JsonFileRepository {
    async fn save_quizzes(&self, quizzes: &[Quiz]) -> Result<(), StorageError> {
        let records = records_from_quizzes(quizzes);
        let body = serde_json::to_vec_pretty(&records)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let staging = self.staging_path();
        fs::write(&staging, &body).await?;
        if let Err(err) = fs::rename(&staging, &self.path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(err.into());
        }

        tracing::debug!(path = %self.path.display(), count = records.len(), "wrote quiz file");
        Ok(())
    }

    async fn load_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        let body = match fs::read(&self.path).await {
            Ok(body) => body,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(StorageError::NotFound),
            Err(err) => return Err(err.into()),
        };

        let records: Vec<QuizRecord> = serde_json::from_slice(&body).map_err(|e| {
            StorageError::Serialization(format!("{}: {e}", self.path.display()))
        })?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "read quiz file");
        quizzes_from_records(records)
    }
}
