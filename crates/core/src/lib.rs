#![forbid(unsafe_code)]

//! Domain model for the quiz engine.
//!
//! Questions and quizzes, the no-repeat random draw, the in-memory quiz
//! registry, and category-based quiz composition. Nothing in this crate
//! performs I/O.

pub mod composer;
pub mod error;
pub mod model;
pub mod registry;
pub mod seed;
pub mod time;

pub use composer::{CATEGORY_QUIZ_TITLE, compose_by_categories, count_in_categories};
pub use error::{Error, ValidationError};
pub use model::{
    ANSWER_COUNT, Category, ParseCategoryError, Question, QuestionDraft, Quiz, QuizDraft,
    QuizError, QuizId,
};
pub use registry::QuizRegistry;
pub use seed::DEFAULT_QUIZ_TITLE;
pub use time::Clock;
