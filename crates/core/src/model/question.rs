use crate::error::ValidationError;
use crate::model::Category;

/// Number of answers every question carries.
pub const ANSWER_COUNT: usize = 3;

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question with exactly one correct answer.
///
/// Questions are immutable once built. Editing a question means building a
/// replacement and handing it to the owning `Quiz`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    statement: String,
    answers: [String; ANSWER_COUNT],
    correct_answer_index: usize,
    image_path: String,
    category: Category,
}

impl Question {
    /// Creates a validated question.
    ///
    /// Statement and answers are trimmed. An empty `image_path` means the
    /// presentation layer should fall back to its placeholder image.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyStatement` or `ValidationError::EmptyAnswer`
    /// for blank text, and `ValidationError::CorrectAnswerOutOfRange` if the
    /// index does not point at one of the answers.
    pub fn new(
        statement: impl Into<String>,
        answers: [String; ANSWER_COUNT],
        correct_answer_index: usize,
        image_path: impl Into<String>,
        category: Category,
    ) -> Result<Self, ValidationError> {
        let statement = statement.into().trim().to_owned();
        if statement.is_empty() {
            return Err(ValidationError::EmptyStatement);
        }

        let answers = answers.map(|answer| answer.trim().to_owned());
        if let Some(index) = answers.iter().position(String::is_empty) {
            return Err(ValidationError::EmptyAnswer { index });
        }

        if correct_answer_index >= ANSWER_COUNT {
            return Err(ValidationError::CorrectAnswerOutOfRange {
                index: correct_answer_index,
                len: ANSWER_COUNT,
            });
        }

        Ok(Self {
            statement,
            answers,
            correct_answer_index,
            image_path: image_path.into().trim().to_owned(),
            category,
        })
    }

    /// Builds a question from static seed data.
    pub(crate) fn seeded(
        statement: &str,
        answers: [&str; ANSWER_COUNT],
        correct_answer_index: usize,
        category: Category,
    ) -> Self {
        debug_assert!(correct_answer_index < ANSWER_COUNT);
        Self {
            statement: statement.to_owned(),
            answers: answers.map(str::to_owned),
            correct_answer_index,
            image_path: String::new(),
            category,
        }
    }

    #[must_use]
    pub fn statement(&self) -> &str {
        &self.statement
    }

    #[must_use]
    pub fn answers(&self) -> &[String; ANSWER_COUNT] {
        &self.answers
    }

    #[must_use]
    pub fn correct_answer_index(&self) -> usize {
        self.correct_answer_index
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.answers[self.correct_answer_index]
    }

    #[must_use]
    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn is_correct(&self, answer_index: usize) -> bool {
        answer_index == self.correct_answer_index
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question fields as collected from an editor form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionDraft {
    pub statement: String,
    pub answers: [String; ANSWER_COUNT],
    pub correct_answer_index: usize,
    pub image_path: String,
    pub category: Category,
}

impl QuestionDraft {
    /// # Errors
    ///
    /// Same as [`Question::new`].
    pub fn validate(self) -> Result<Question, ValidationError> {
        Question::new(
            self.statement,
            self.answers,
            self.correct_answer_index,
            self.image_path,
            self.category,
        )
    }
}

impl From<&Question> for QuestionDraft {
    fn from(question: &Question) -> Self {
        Self {
            statement: question.statement.clone(),
            answers: question.answers.clone(),
            correct_answer_index: question.correct_answer_index,
            image_path: question.image_path.clone(),
            category: question.category,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
