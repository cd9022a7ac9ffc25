//! Ad-hoc quizzes built from every registered question in a set of
//! categories.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::model::{Category, Question, Quiz};
use crate::registry::QuizRegistry;

/// Title of the transient quiz built by [`compose_by_categories`].
pub const CATEGORY_QUIZ_TITLE: &str = "Questions by category";

fn matching<'a>(
    registry: &'a QuizRegistry,
    categories: &'a HashSet<Category>,
) -> impl Iterator<Item = &'a Question> + 'a {
    registry
        .quizzes()
        .flat_map(Quiz::questions)
        .filter(|question| categories.contains(&question.category()))
}

/// Builds a transient quiz of every registered question whose category is in
/// `categories`.
///
/// Questions keep registry order, then per-quiz order. They are cloned, so
/// the result shares nothing with the registry. The returned quiz is never
/// registered.
///
/// # Errors
///
/// Returns `ValidationError::NoCategoriesSelected` for an empty set.
pub fn compose_by_categories(
    registry: &QuizRegistry,
    categories: &HashSet<Category>,
) -> Result<Quiz, ValidationError> {
    if categories.is_empty() {
        return Err(ValidationError::NoCategoriesSelected);
    }
    let questions = matching(registry, categories).cloned().collect();
    Ok(Quiz::with_questions(CATEGORY_QUIZ_TITLE, questions))
}

/// Number of registered questions whose category is in `categories`.
#[must_use]
pub fn count_in_categories(registry: &QuizRegistry, categories: &HashSet<Category>) -> usize {
    matching(registry, categories).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(statement: &str, category: Category) -> Question {
        Question::new(
            statement,
            ["a".into(), "b".into(), "c".into()],
            0,
            "",
            category,
        )
        .unwrap()
    }

    fn registry() -> QuizRegistry {
        let mut registry = QuizRegistry::new();
        registry.add(Quiz::with_questions(
            "First",
            vec![
                question("atoms", Category::Science),
                question("romans", Category::History),
            ],
        ));
        registry.add(Quiz::with_questions(
            "Second",
            vec![question("gravity", Category::Science)],
        ));
        registry
    }

    #[test]
    fn selects_matching_questions_in_registry_order() {
        let registry = registry();
        let quiz = compose_by_categories(&registry, &HashSet::from([Category::Science])).unwrap();

        assert_eq!(quiz.title(), CATEGORY_QUIZ_TITLE);
        let statements: Vec<_> = quiz.questions().iter().map(Question::statement).collect();
        assert_eq!(statements, ["atoms", "gravity"]);
        assert!(!quiz.is_default());
    }

    #[test]
    fn rejects_empty_selection() {
        let err = compose_by_categories(&registry(), &HashSet::new()).unwrap_err();
        assert_eq!(err, ValidationError::NoCategoriesSelected);
    }

    #[test]
    fn leaves_registry_untouched() {
        let registry = registry();
        let before = registry.clone();
        let mut quiz =
            compose_by_categories(&registry, &HashSet::from([Category::History])).unwrap();
        quiz.remove_question(0).unwrap();

        assert_eq!(registry.len(), before.len());
        assert!(
            registry
                .quizzes()
                .zip(before.quizzes())
                .all(|(after, before)| after == before)
        );
    }

    #[test]
    fn unmatched_categories_compose_an_empty_quiz() {
        let quiz = compose_by_categories(&registry(), &HashSet::from([Category::Sport])).unwrap();
        assert!(quiz.is_empty());
    }

    #[test]
    fn counts_matching_questions() {
        let registry = registry();
        assert_eq!(
            count_in_categories(&registry, &HashSet::from([Category::Science])),
            2
        );
        assert_eq!(
            count_in_categories(
                &registry,
                &HashSet::from([Category::Science, Category::History])
            ),
            3
        );
        assert_eq!(count_in_categories(&registry, &HashSet::new()), 0);
    }
}
