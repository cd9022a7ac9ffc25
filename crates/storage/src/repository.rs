use async_trait::async_trait;
use quiz_core::{ANSWER_COUNT, Category, DEFAULT_QUIZ_TITLE, Question, Quiz};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::json::JsonFileRepository;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// No saved collection exists yet.
    #[error("no saved quiz collection found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

/// Persisted shape of a question.
///
/// Field names follow the save files written by earlier versions of the app,
/// so those files load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuestionRecord {
    pub statement: String,
    pub answers: Vec<String>,
    pub correct_answer_index: usize,
    #[serde(default)]
    pub image_path: Option<String>,
    pub category: Category,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            statement: question.statement().to_owned(),
            answers: question.answers().to_vec(),
            correct_answer_index: question.correct_answer_index(),
            image_path: Some(question.image_path().to_owned()),
            category: question.category(),
        }
    }

    /// Convert the record back into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the record does not describe
    /// a valid question.
    pub fn into_question(self) -> Result<Question, StorageError> {
        let len = self.answers.len();
        let answers = <[String; ANSWER_COUNT]>::try_from(self.answers).map_err(|_| {
            StorageError::Serialization(format!(
                "question {:?} has {len} answers, expected {ANSWER_COUNT}",
                self.statement
            ))
        })?;

        Question::new(
            self.statement,
            answers,
            self.correct_answer_index,
            self.image_path.unwrap_or_default(),
            self.category,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Persisted shape of a quiz. The draw pool is session state and is never
/// written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuizRecord {
    pub title: String,
    pub questions: Vec<QuestionRecord>,
    /// Absent in files written before the default marker existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl QuizRecord {
    #[must_use]
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self {
            title: quiz.title().to_owned(),
            questions: quiz
                .questions()
                .iter()
                .map(QuestionRecord::from_question)
                .collect(),
            is_default: Some(quiz.is_default()),
        }
    }

    /// Convert the record back into a domain `Quiz`.
    ///
    /// Records without a default marker count as the default quiz only when
    /// the title is exactly [`DEFAULT_QUIZ_TITLE`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if any question is invalid.
    pub fn into_quiz(self) -> Result<Quiz, StorageError> {
        let is_default = self
            .is_default
            .unwrap_or_else(|| self.title == DEFAULT_QUIZ_TITLE);
        let questions = self
            .questions
            .into_iter()
            .map(QuestionRecord::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Quiz::with_questions(self.title, questions).marked_default(is_default))
    }
}

#[must_use]
pub fn records_from_quizzes(quizzes: &[Quiz]) -> Vec<QuizRecord> {
    quizzes.iter().map(QuizRecord::from_quiz).collect()
}

/// Converts a full loaded collection, failing as a whole if any record is
/// invalid.
///
/// # Errors
///
/// Returns the first conversion error.
pub fn quizzes_from_records(records: Vec<QuizRecord>) -> Result<Vec<Quiz>, StorageError> {
    records.into_iter().map(QuizRecord::into_quiz).collect()
}

//
// ─── CONTRACT ──────────────────────────────────────────────────────────────────
//

/// Persistence contract for the quiz collection.
///
/// The collection is stored as a unit: a save overwrites everything that was
/// there before, and a load returns the complete set or an error.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Replace the stored collection with `quizzes`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the collection cannot be written. The
    /// previously stored collection is left intact in that case.
    async fn save_quizzes(&self, quizzes: &[Quiz]) -> Result<(), StorageError>;

    /// Read the stored collection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if nothing was saved yet, or
    /// `StorageError::Serialization` if the stored data is malformed.
    async fn load_quizzes(&self) -> Result<Vec<Quiz>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Quizzes pass through `QuizRecord` on the way in and out, so what comes
/// back is exactly what a real backend would return.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<Mutex<Option<Vec<QuizRecord>>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizRepository for InMemoryRepository {
    async fn save_quizzes(&self, quizzes: &[Quiz]) -> Result<(), StorageError> {
        let records = records_from_quizzes(quizzes);
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(records);
        Ok(())
    }

    async fn load_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        let records = {
            let guard = self
                .records
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            guard.clone().ok_or(StorageError::NotFound)?
        };
        quizzes_from_records(records)
    }
}

/// The persistence backend behind a trait object, for easy swapping.
#[derive(Clone)]
pub struct Storage {
    pub quizzes: Arc<dyn QuizRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            quizzes: Arc::new(InMemoryRepository::new()),
        }
    }

    /// Storage backed by a JSON file at `path`. The file does not need to
    /// exist yet.
    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self {
            quizzes: Arc::new(JsonFileRepository::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quiz() -> Quiz {
        let question = Question::new(
            "Largest ocean?",
            ["Atlantic".into(), "Pacific".into(), "Indian".into()],
            1,
            "images/ocean.png",
            Category::Geography,
        )
        .unwrap();
        Quiz::with_questions("Oceans", vec![question])
    }

    #[tokio::test]
    async fn load_before_save_is_not_found() {
        let repo = InMemoryRepository::new();
        assert!(matches!(
            repo.load_quizzes().await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn round_trips_quizzes() {
        let repo = InMemoryRepository::new();
        let quizzes = vec![sample_quiz(), Quiz::default_quiz()];
        repo.save_quizzes(&quizzes).await.unwrap();

        let loaded = repo.load_quizzes().await.unwrap();
        assert_eq!(loaded, quizzes);
        assert!(loaded[1].is_default());
    }

    #[tokio::test]
    async fn save_overwrites_previous_collection() {
        let repo = InMemoryRepository::new();
        repo.save_quizzes(&[sample_quiz(), sample_quiz()]).await.unwrap();
        repo.save_quizzes(&[sample_quiz()]).await.unwrap();
        assert_eq!(repo.load_quizzes().await.unwrap().len(), 1);
    }

    #[test]
    fn pool_state_is_not_persisted() {
        let mut quiz = sample_quiz();
        quiz.initialize_random_questions();
        let restored = QuizRecord::from_quiz(&quiz).into_quiz().unwrap();
        assert_eq!(restored.random_questions_remaining(), 0);
        assert_eq!(restored, quiz);
    }

    #[test]
    fn missing_marker_falls_back_to_exact_title() {
        let record = QuizRecord {
            title: DEFAULT_QUIZ_TITLE.to_owned(),
            questions: Vec::new(),
            is_default: None,
        };
        assert!(record.into_quiz().unwrap().is_default());

        let record = QuizRecord {
            title: format!("{DEFAULT_QUIZ_TITLE} (copy)"),
            questions: Vec::new(),
            is_default: None,
        };
        assert!(!record.into_quiz().unwrap().is_default());
    }

    #[test]
    fn rejects_wrong_answer_count() {
        let record = QuestionRecord {
            statement: "Q".into(),
            answers: vec!["a".into(), "b".into()],
            correct_answer_index: 0,
            image_path: None,
            category: Category::Other,
        };
        assert!(matches!(
            record.into_question(),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn one_bad_record_fails_the_whole_collection() {
        let good = QuizRecord::from_quiz(&sample_quiz());
        let mut bad = good.clone();
        bad.questions[0].correct_answer_index = 9;
        assert!(quizzes_from_records(vec![good, bad]).is_err());
    }
}
