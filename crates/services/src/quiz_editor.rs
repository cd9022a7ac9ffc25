use std::collections::HashSet;

use rand::rngs::StdRng;

use quiz_core::{
    Category, Question, QuestionDraft, Quiz, QuizDraft, QuizId, ValidationError,
    compose_by_categories, count_in_categories,
};

use crate::Clock;
use crate::error::EditorError;
use crate::registry::SharedRegistry;
use crate::sessions::PlaySession;

/// One row of the quiz list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub id: QuizId,
    pub title: String,
    pub question_count: usize,
    pub is_default: bool,
}

impl QuizSummary {
    fn new(id: QuizId, quiz: &Quiz) -> Self {
        Self {
            id,
            title: quiz.title().to_owned(),
            question_count: quiz.len(),
            is_default: quiz.is_default(),
        }
    }
}

/// Creates and edits quizzes in the shared registry and starts play
/// sessions from it.
///
/// Every operation validates first and touches the registry only on
/// success, so a rejected edit leaves everything as it was.
#[derive(Debug, Clone)]
pub struct QuizEditor {
    clock: Clock,
    registry: SharedRegistry,
}

impl QuizEditor {
    #[must_use]
    pub fn new(clock: Clock, registry: SharedRegistry) -> Self {
        Self { clock, registry }
    }

    /// Validate `draft` and register the resulting quiz.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::Validation` for a blank title or a draft without
    /// questions.
    pub fn create_quiz(&self, draft: QuizDraft) -> Result<QuizId, EditorError> {
        let quiz = draft.validate()?;
        let title = quiz.title().to_owned();
        let id = self.registry.write(|registry| registry.add(quiz))?;
        tracing::info!(quiz_id = %id, %title, "quiz created");
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns `EditorError::Validation` for a blank title and
    /// `EditorError::QuizNotFound` for an unknown id.
    pub fn rename_quiz(&self, id: QuizId, title: &str) -> Result<(), EditorError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        self.with_quiz_mut(id, |quiz| {
            quiz.set_title(title);
            Ok(())
        })
    }

    /// Validate `draft` and append it to the quiz. Returns the new question's
    /// index.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::Validation` if the draft is invalid and
    /// `EditorError::QuizNotFound` for an unknown id.
    pub fn add_question(&self, id: QuizId, draft: QuestionDraft) -> Result<usize, EditorError> {
        let question = draft.validate()?;
        self.with_quiz_mut(id, |quiz| {
            quiz.add_question(question);
            Ok(quiz.len() - 1)
        })
    }

    /// Replace the question at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::Validation` if the draft is invalid,
    /// `EditorError::QuizNotFound` for an unknown id and `EditorError::Quiz`
    /// for a bad index.
    pub fn update_question(
        &self,
        id: QuizId,
        index: usize,
        draft: QuestionDraft,
    ) -> Result<Question, EditorError> {
        let question = draft.validate()?;
        self.with_quiz_mut(id, |quiz| Ok(quiz.update_question(index, question)?))
    }

    /// Remove the question at `index`. A quiz keeps at least one question.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::QuizNotFound` for an unknown id,
    /// `EditorError::Quiz` for a bad index and `ValidationError::NoQuestions`
    /// when `index` is the quiz's last question.
    pub fn remove_question(&self, id: QuizId, index: usize) -> Result<Question, EditorError> {
        self.with_quiz_mut(id, |quiz| {
            if quiz.len() == 1 && index == 0 {
                return Err(ValidationError::NoQuestions.into());
            }
            Ok(quiz.remove_question(index)?)
        })
    }

    /// Remove the selected quiz from the registry.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NoQuizSelected` when `selected` is `None`
    /// and `EditorError::QuizNotFound` for an unknown id.
    pub fn remove_quiz(&self, selected: Option<QuizId>) -> Result<Quiz, EditorError> {
        let id = selected.ok_or(ValidationError::NoQuizSelected)?;
        let removed = self
            .registry
            .write(|registry| registry.remove(id))?
            .ok_or(EditorError::QuizNotFound(id))?;
        tracing::info!(quiz_id = %id, title = removed.title(), "quiz removed");
        Ok(removed)
    }

    /// # Errors
    ///
    /// Returns `EditorError::Poisoned` if the registry lock is poisoned.
    pub fn list_quizzes(&self) -> Result<Vec<QuizSummary>, EditorError> {
        let summaries = self.registry.read(|registry| {
            registry
                .list()
                .map(|(id, quiz)| QuizSummary::new(id, quiz))
                .collect()
        })?;
        Ok(summaries)
    }

    /// A copy of the quiz with the given id.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::QuizNotFound` for an unknown id.
    pub fn quiz(&self, id: QuizId) -> Result<Quiz, EditorError> {
        self.registry
            .read(|registry| registry.get(id).cloned())?
            .ok_or(EditorError::QuizNotFound(id))
    }

    /// # Errors
    ///
    /// Returns `EditorError::Poisoned` if the registry lock is poisoned.
    pub fn available_categories(&self) -> Result<Vec<Category>, EditorError> {
        Ok(self.registry.read(quiz_core::QuizRegistry::available_categories)?)
    }

    /// # Errors
    ///
    /// Returns `EditorError::Poisoned` if the registry lock is poisoned.
    pub fn count_in_categories(&self, categories: &HashSet<Category>) -> Result<usize, EditorError> {
        Ok(self
            .registry
            .read(|registry| count_in_categories(registry, categories))?)
    }

    //
    // ─── PLAY ──────────────────────────────────────────────────────────────────
    //

    /// Start playing the selected quiz.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NoQuizSelected` when `selected` is `None`,
    /// `EditorError::QuizNotFound` for an unknown id and `EditorError::Play`
    /// if the first draw fails.
    pub fn start_play(&self, selected: Option<QuizId>) -> Result<PlaySession, EditorError> {
        let quiz = self.selected_quiz(selected)?;
        Ok(PlaySession::start(quiz, self.clock)?)
    }

    /// Like [`QuizEditor::start_play`], drawing with `rng`.
    ///
    /// # Errors
    ///
    /// Same as [`QuizEditor::start_play`].
    pub fn start_play_with_rng(
        &self,
        selected: Option<QuizId>,
        rng: StdRng,
    ) -> Result<PlaySession, EditorError> {
        let quiz = self.selected_quiz(selected)?;
        Ok(PlaySession::start_with_rng(quiz, self.clock, rng)?)
    }

    /// Start playing every registered question in `categories`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NoCategoriesSelected` for an empty set.
    pub fn start_category_play(
        &self,
        categories: &HashSet<Category>,
    ) -> Result<PlaySession, EditorError> {
        let quiz = self.category_quiz(categories)?;
        Ok(PlaySession::start(quiz, self.clock)?)
    }

    /// Like [`QuizEditor::start_category_play`], drawing with `rng`.
    ///
    /// # Errors
    ///
    /// Same as [`QuizEditor::start_category_play`].
    pub fn start_category_play_with_rng(
        &self,
        categories: &HashSet<Category>,
        rng: StdRng,
    ) -> Result<PlaySession, EditorError> {
        let quiz = self.category_quiz(categories)?;
        Ok(PlaySession::start_with_rng(quiz, self.clock, rng)?)
    }

    fn selected_quiz(&self, selected: Option<QuizId>) -> Result<Quiz, EditorError> {
        let id = selected.ok_or(ValidationError::NoQuizSelected)?;
        self.quiz(id)
    }

    fn category_quiz(&self, categories: &HashSet<Category>) -> Result<Quiz, EditorError> {
        let quiz = self
            .registry
            .read(|registry| compose_by_categories(registry, categories))??;
        tracing::debug!(
            categories = categories.len(),
            questions = quiz.len(),
            "composed category quiz"
        );
        Ok(quiz)
    }

    fn with_quiz_mut<T>(
        &self,
        id: QuizId,
        f: impl FnOnce(&mut Quiz) -> Result<T, EditorError>,
    ) -> Result<T, EditorError> {
        self.registry
            .write(|registry| registry.get_mut(id).map(f))?
            .ok_or(EditorError::QuizNotFound(id))?
    }
}
