use thiserror::Error as ThisError;

use crate::model::{ParseCategoryError, QuizError};

/// Caller-facing rejections. Returning one of these never mutates state.
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("quiz title cannot be empty")]
    EmptyTitle,

    #[error("a quiz needs at least one question")]
    NoQuestions,

    #[error("question statement cannot be empty")]
    EmptyStatement,

    #[error("answer {index} cannot be empty")]
    EmptyAnswer { index: usize },

    #[error("correct answer index {index} is out of range (expected < {len})")]
    CorrectAnswerOutOfRange { index: usize, len: usize },

    #[error("select at least one category")]
    NoCategoriesSelected,

    #[error("no quiz selected")]
    NoQuizSelected,
}

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Category(#[from] ParseCategoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_domain_errors() {
        let err: Error = ValidationError::EmptyTitle.into();
        assert_eq!(err.to_string(), "quiz title cannot be empty");

        let err: Error = QuizError::EmptyPool.into();
        assert!(matches!(err, Error::Quiz(QuizError::EmptyPool)));

        let err: Error = "astrology".parse::<crate::model::Category>().unwrap_err().into();
        assert_eq!(err.to_string(), "unknown category: astrology");
    }
}
