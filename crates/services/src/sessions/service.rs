use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

use quiz_core::{ANSWER_COUNT, Clock, Question, Quiz, QuizError};

use super::image::{ImageSource, resolve_image};
use super::progress::{AnswerOutcome, PlayProgress, percentage_correct};
use crate::error::PlayError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayState {
    /// Waiting for an answer to the contained question.
    AwaitingAnswer(Question),
    /// Every question was answered. Terminal.
    Complete,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One play-through of a quiz.
///
/// The session owns its quiz (a clone of the registered one, or a transient
/// category quiz) and draws questions from it without repetition. It is
/// driven by a single owner through `&mut self`.
pub struct PlaySession {
    quiz: Quiz,
    state: PlayState,
    rng: StdRng,
    clock: Clock,
    answered: usize,
    correct: usize,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl PlaySession {
    /// Start a session with an OS-seeded random generator.
    ///
    /// # Errors
    ///
    /// See [`PlaySession::start_with_rng`].
    pub fn start(quiz: Quiz, clock: Clock) -> Result<Self, PlayError> {
        Self::start_with_rng(quiz, clock, StdRng::from_os_rng())
    }

    /// Start a session whose draw order is reproducible from `seed`.
    ///
    /// # Errors
    ///
    /// See [`PlaySession::start_with_rng`].
    pub fn start_seeded(quiz: Quiz, clock: Clock, seed: u64) -> Result<Self, PlayError> {
        Self::start_with_rng(quiz, clock, StdRng::seed_from_u64(seed))
    }

    /// Start a session drawing with `rng`.
    ///
    /// The pool is refilled and the first question drawn immediately. A quiz
    /// without questions yields a session that is already complete.
    ///
    /// # Errors
    ///
    /// Returns `PlayError::Quiz` if the first draw fails for any reason other
    /// than an empty pool.
    pub fn start_with_rng(mut quiz: Quiz, clock: Clock, rng: StdRng) -> Result<Self, PlayError> {
        quiz.initialize_random_questions();
        let started_at = clock.now();

        let mut session = Self {
            quiz,
            state: PlayState::Complete,
            rng,
            clock,
            answered: 0,
            correct: 0,
            started_at,
            completed_at: None,
        };
        session.advance(started_at)?;

        tracing::info!(
            quiz = session.quiz.title(),
            questions = session.quiz.len(),
            "play session started"
        );
        Ok(session)
    }

    /// Draw the next question. An exhausted pool completes the session; any
    /// other draw failure leaves the state as it was.
    fn advance(&mut self, now: DateTime<Utc>) -> Result<(), PlayError> {
        self.state = match self.quiz.draw_random_question(&mut self.rng) {
            Ok(question) => PlayState::AwaitingAnswer(question),
            Err(QuizError::EmptyPool) => {
                self.completed_at = Some(now);
                PlayState::Complete
            }
            Err(err) => return Err(err.into()),
        };
        Ok(())
    }

    /// Score `answer_index` against the current question and move on.
    ///
    /// # Errors
    ///
    /// Returns `PlayError::Completed` once the session is finished, and
    /// `PlayError::AnswerOutOfRange` for an index that does not name an
    /// answer. The session is unchanged in both cases, and when drawing the
    /// next question fails with `PlayError::Quiz`.
    pub fn submit_answer(&mut self, answer_index: usize) -> Result<AnswerOutcome, PlayError> {
        let PlayState::AwaitingAnswer(question) = &self.state else {
            return Err(PlayError::Completed);
        };
        if answer_index >= ANSWER_COUNT {
            return Err(PlayError::AnswerOutOfRange {
                index: answer_index,
                len: ANSWER_COUNT,
            });
        }

        let was_correct = question.is_correct(answer_index);
        let correct_answer_index = question.correct_answer_index();

        let now = self.clock.now();
        self.advance(now)?;

        self.answered += 1;
        if was_correct {
            self.correct += 1;
        }

        let progress = self.progress();
        tracing::debug!(
            answered = progress.answered,
            correct = progress.correct,
            was_correct,
            "answer recorded"
        );
        if progress.is_complete {
            tracing::info!(
                quiz = self.quiz.title(),
                answered = progress.answered,
                correct = progress.correct,
                percentage = progress.percentage_correct,
                "play session complete"
            );
        }

        Ok(AnswerOutcome {
            submitted_index: answer_index,
            correct_answer_index,
            was_correct,
            progress,
        })
    }

    #[must_use]
    pub fn state(&self) -> &PlayState {
        &self.state
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match &self.state {
            PlayState::AwaitingAnswer(question) => Some(question),
            PlayState::Complete => None,
        }
    }

    /// Image for the current question, if one is being asked.
    #[must_use]
    pub fn current_image(&self) -> Option<ImageSource> {
        self.current_question().map(resolve_image)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.state, PlayState::Complete)
    }

    #[must_use]
    pub fn quiz_title(&self) -> &str {
        self.quiz.title()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.quiz.len()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answered
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn percentage_correct(&self) -> f64 {
        percentage_correct(self.correct, self.answered)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn progress(&self) -> PlayProgress {
        let current = usize::from(!self.is_complete());
        PlayProgress {
            total: self.quiz.len(),
            answered: self.answered,
            correct: self.correct,
            remaining: self.quiz.random_questions_remaining() + current,
            percentage_correct: self.percentage_correct(),
            is_complete: self.is_complete(),
        }
    }
}

impl fmt::Debug for PlaySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaySession")
            .field("quiz", &self.quiz.title())
            .field("state", &self.state)
            .field("answered", &self.answered)
            .field("correct", &self.correct)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
