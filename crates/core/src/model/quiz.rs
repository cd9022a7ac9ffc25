use rand::Rng;
use thiserror::Error;

use crate::error::ValidationError;
use crate::model::{ANSWER_COUNT, Category, Question};
use crate::seed;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    /// Drawing from an exhausted pool. Callers must check
    /// `random_questions_remaining()` first.
    #[error("no questions remain in the pool")]
    EmptyPool,

    #[error("question index {index} is out of range (quiz has {len} questions)")]
    QuestionIndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// A titled, ordered collection of questions.
///
/// Besides the authoritative question list, a quiz owns the pool of questions
/// not yet drawn in the current play-through. The pool holds clones, so
/// drawing from it never touches `questions`. It is rebuilt by
/// [`Quiz::initialize_random_questions`] and is never persisted.
#[derive(Debug, Clone, Default)]
pub struct Quiz {
    title: String,
    questions: Vec<Question>,
    remaining: Vec<Question>,
    is_default: bool,
}

impl Quiz {
    /// Creates an empty quiz.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_questions(title, Vec::new())
    }

    #[must_use]
    pub fn with_questions(title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            title: title.into(),
            questions,
            remaining: Vec::new(),
            is_default: false,
        }
    }

    /// The built-in quiz the registry seeds when no default quiz is present.
    #[must_use]
    pub fn default_quiz() -> Self {
        Self::with_questions(seed::DEFAULT_QUIZ_TITLE, seed::default_questions())
            .marked_default(true)
    }

    /// Sets the seeded-default marker.
    #[must_use]
    pub fn marked_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Appends a question. An in-progress pool is left untouched.
    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
    }

    /// Validates the fields and appends the resulting question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Validation` if the fields do not form a valid
    /// question; the quiz is unchanged in that case.
    pub fn add_question_fields(
        &mut self,
        statement: impl Into<String>,
        answers: [String; ANSWER_COUNT],
        correct_answer_index: usize,
        image_path: impl Into<String>,
        category: Category,
    ) -> Result<(), QuizError> {
        let question = Question::new(
            statement,
            answers,
            correct_answer_index,
            image_path,
            category,
        )?;
        self.add_question(question);
        Ok(())
    }

    /// Replaces the question at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::QuestionIndexOutOfRange` for a bad index.
    pub fn update_question(
        &mut self,
        index: usize,
        question: Question,
    ) -> Result<Question, QuizError> {
        let len = self.questions.len();
        let slot = self
            .questions
            .get_mut(index)
            .ok_or(QuizError::QuestionIndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, question))
    }

    /// Removes the question at `index` from the authoritative list.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::QuestionIndexOutOfRange` for a bad index.
    pub fn remove_question(&mut self, index: usize) -> Result<Question, QuizError> {
        if index >= self.questions.len() {
            return Err(QuizError::QuestionIndexOutOfRange {
                index,
                len: self.questions.len(),
            });
        }
        Ok(self.questions.remove(index))
    }

    /// Refills the pool with a fresh copy of every question.
    ///
    /// Call once before a play-through; calling it again restarts the draw.
    pub fn initialize_random_questions(&mut self) {
        self.remaining = self.questions.clone();
    }

    #[must_use]
    pub fn random_questions_remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Removes and returns a uniformly random question from the pool.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyPool` when nothing is left to draw.
    pub fn draw_random_question<R>(&mut self, rng: &mut R) -> Result<Question, QuizError>
    where
        R: Rng + ?Sized,
    {
        if self.remaining.is_empty() {
            return Err(QuizError::EmptyPool);
        }
        let index = rng.random_range(0..self.remaining.len());
        Ok(self.remaining.swap_remove(index))
    }
}

/// Equality covers title, questions and the default marker. The draw pool is
/// session state and is ignored.
impl PartialEq for Quiz {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.questions == other.questions
            && self.is_default == other.is_default
    }
}

impl Eq for Quiz {}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// A quiz being assembled in an editor, validated before it is registered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizDraft {
    pub title: String,
    pub questions: Vec<Question>,
}

impl QuizDraft {
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyTitle` for a blank title and
    /// `ValidationError::NoQuestions` when no question was added.
    pub fn validate(self) -> Result<Quiz, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.questions.is_empty() {
            return Err(ValidationError::NoQuestions);
        }
        Ok(Quiz::with_questions(title, self.questions))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn question(statement: &str, category: Category) -> Question {
        Question::new(
            statement,
            ["a".to_owned(), "b".to_owned(), "c".to_owned()],
            0,
            "",
            category,
        )
        .unwrap()
    }

    fn quiz_of(n: usize) -> Quiz {
        let questions = (0..n)
            .map(|i| question(&format!("Q{i}"), Category::Other))
            .collect();
        Quiz::with_questions("Numbers", questions)
    }

    #[test]
    fn draws_every_question_exactly_once() {
        let mut quiz = quiz_of(8);
        let mut rng = StdRng::seed_from_u64(7);
        quiz.initialize_random_questions();

        let mut seen = HashSet::new();
        for expected_remaining in (0..8).rev() {
            let drawn = quiz.draw_random_question(&mut rng).unwrap();
            assert!(seen.insert(drawn.statement().to_owned()));
            assert_eq!(quiz.random_questions_remaining(), expected_remaining);
        }

        assert_eq!(seen.len(), 8);
        assert_eq!(
            quiz.draw_random_question(&mut rng).unwrap_err(),
            QuizError::EmptyPool
        );
        assert_eq!(quiz.random_questions_remaining(), 0);
    }

    #[test]
    fn draw_before_initialize_is_empty_pool() {
        let mut quiz = quiz_of(2);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(quiz.random_questions_remaining(), 0);
        assert!(matches!(
            quiz.draw_random_question(&mut rng),
            Err(QuizError::EmptyPool)
        ));
    }

    #[test]
    fn draw_leaves_questions_untouched() {
        let mut quiz = quiz_of(3);
        let before = quiz.questions().to_vec();
        let mut rng = StdRng::seed_from_u64(3);
        quiz.initialize_random_questions();
        quiz.draw_random_question(&mut rng).unwrap();
        assert_eq!(quiz.questions(), before.as_slice());
    }

    #[test]
    fn reinitialize_restarts_the_pool() {
        let mut quiz = quiz_of(3);
        let mut rng = StdRng::seed_from_u64(11);
        quiz.initialize_random_questions();
        quiz.draw_random_question(&mut rng).unwrap();
        quiz.draw_random_question(&mut rng).unwrap();
        assert_eq!(quiz.random_questions_remaining(), 1);

        quiz.initialize_random_questions();
        assert_eq!(quiz.random_questions_remaining(), 3);
    }

    #[test]
    fn adding_mid_session_does_not_grow_pool() {
        let mut quiz = quiz_of(2);
        quiz.initialize_random_questions();
        quiz.add_question(question("late", Category::Math));
        assert_eq!(quiz.len(), 3);
        assert_eq!(quiz.random_questions_remaining(), 2);
    }

    #[test]
    fn draw_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut first_counts = [0_u32; 4];
        for _ in 0..4_000 {
            let mut quiz = quiz_of(4);
            quiz.initialize_random_questions();
            let drawn = quiz.draw_random_question(&mut rng).unwrap();
            let index: usize = drawn.statement()[1..].parse().unwrap();
            first_counts[index] += 1;
        }
        for count in first_counts {
            assert!((800..1_200).contains(&count), "skewed draw: {first_counts:?}");
        }
    }

    #[test]
    fn remove_question_checks_bounds() {
        let mut quiz = quiz_of(2);
        let removed = quiz.remove_question(0).unwrap();
        assert_eq!(removed.statement(), "Q0");
        assert_eq!(quiz.len(), 1);

        let err = quiz.remove_question(5).unwrap_err();
        assert_eq!(err, QuizError::QuestionIndexOutOfRange { index: 5, len: 1 });
        assert_eq!(quiz.len(), 1);
    }

    #[test]
    fn update_question_replaces_in_place() {
        let mut quiz = quiz_of(2);
        let previous = quiz
            .update_question(1, question("edited", Category::Food))
            .unwrap();
        assert_eq!(previous.statement(), "Q1");
        assert_eq!(quiz.questions()[1].statement(), "edited");
        assert!(quiz.update_question(2, question("x", Category::Food)).is_err());
    }

    #[test]
    fn add_question_fields_validates() {
        let mut quiz = Quiz::new("Fields");
        let err = quiz
            .add_question_fields(
                "",
                ["a".into(), "b".into(), "c".into()],
                0,
                "",
                Category::Other,
            )
            .unwrap_err();
        assert_eq!(err, QuizError::Validation(ValidationError::EmptyStatement));
        assert!(quiz.is_empty());

        quiz.add_question_fields(
            "2 + 2?",
            ["3".into(), "4".into(), "5".into()],
            1,
            "",
            Category::Math,
        )
        .unwrap();
        assert_eq!(quiz.len(), 1);
    }

    #[test]
    fn equality_ignores_pool() {
        let mut played = quiz_of(3);
        played.initialize_random_questions();
        assert_eq!(played, quiz_of(3));
    }

    #[test]
    fn draft_requires_title_and_questions() {
        let err = QuizDraft {
            title: "  ".into(),
            questions: vec![question("Q", Category::Other)],
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ValidationError::EmptyTitle);

        let err = QuizDraft {
            title: "Empty".into(),
            questions: Vec::new(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ValidationError::NoQuestions);

        let quiz = QuizDraft {
            title: " Trivia ".into(),
            questions: vec![question("Q", Category::Other)],
        }
        .validate()
        .unwrap();
        assert_eq!(quiz.title(), "Trivia");
        assert!(!quiz.is_default());
    }

    #[test]
    fn default_quiz_is_marked() {
        let quiz = Quiz::default_quiz();
        assert!(quiz.is_default());
        assert!(!quiz.is_empty());
    }
}
