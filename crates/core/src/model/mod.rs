mod category;
mod ids;
mod question;
mod quiz;

pub use category::{Category, ParseCategoryError};
pub use ids::QuizId;
pub use question::{ANSWER_COUNT, Question, QuestionDraft};
pub use quiz::{Quiz, QuizDraft, QuizError};
