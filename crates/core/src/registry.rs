use crate::model::{Category, Quiz, QuizId};

/// The set of known quizzes, in insertion (display) order.
///
/// The registry is plain owned data. Whoever owns the application state owns
/// the registry and hands it to the composer and to play sessions; sharing it
/// across threads requires wrapping it in a lock.
#[derive(Debug, Clone)]
pub struct QuizRegistry {
    entries: Vec<(QuizId, Quiz)>,
    next_id: u64,
}

impl Default for QuizRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Appends a quiz and returns its handle. Titles are not checked for
    /// uniqueness.
    pub fn add(&mut self, quiz: Quiz) -> QuizId {
        let id = QuizId::new(self.next_id);
        self.next_id += 1;
        self.entries.push((id, quiz));
        id
    }

    /// Removes the quiz with the given handle. Unknown handles are a no-op.
    pub fn remove(&mut self, id: QuizId) -> Option<Quiz> {
        let position = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        Some(self.entries.remove(position).1)
    }

    #[must_use]
    pub fn get(&self, id: QuizId) -> Option<&Quiz> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, quiz)| quiz)
    }

    pub fn get_mut(&mut self, id: QuizId) -> Option<&mut Quiz> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, quiz)| quiz)
    }

    #[must_use]
    pub fn contains(&self, id: QuizId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Quizzes with their handles, in display order.
    pub fn list(&self) -> impl Iterator<Item = (QuizId, &Quiz)> + '_ {
        self.entries.iter().map(|(id, quiz)| (*id, quiz))
    }

    pub fn quizzes(&self) -> impl Iterator<Item = &Quiz> + '_ {
        self.entries.iter().map(|(_, quiz)| quiz)
    }

    /// Drops every quiz and installs `quizzes` in order.
    ///
    /// Handles issued before the call are invalidated; new handles never
    /// collide with old ones.
    pub fn replace_all(&mut self, quizzes: impl IntoIterator<Item = Quiz>) {
        self.entries.clear();
        for quiz in quizzes {
            self.add(quiz);
        }
    }

    /// Appends the built-in default quiz unless one is already registered.
    ///
    /// Returns the handle of the newly added quiz, or `None` if nothing was
    /// added.
    pub fn ensure_default_seeded(&mut self) -> Option<QuizId> {
        if self.quizzes().any(Quiz::is_default) {
            return None;
        }
        Some(self.add(Quiz::default_quiz()))
    }

    /// Distinct categories used by any registered question, in first-seen
    /// order.
    #[must_use]
    pub fn available_categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for question in self.quizzes().flat_map(Quiz::questions) {
            if !seen.contains(&question.category()) {
                seen.push(question.category());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;
    use crate::seed::DEFAULT_QUIZ_TITLE;

    fn question(category: Category) -> Question {
        Question::new(
            format!("{category} question"),
            ["a".into(), "b".into(), "c".into()],
            0,
            "",
            category,
        )
        .unwrap()
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut registry = QuizRegistry::new();
        let a = registry.add(Quiz::new("A"));
        let b = registry.add(Quiz::new("B"));
        assert_ne!(a, b);

        let titles: Vec<_> = registry.quizzes().map(Quiz::title).collect();
        assert_eq!(titles, ["A", "B"]);
    }

    #[test]
    fn duplicate_titles_are_distinct_entries() {
        let mut registry = QuizRegistry::new();
        let first = registry.add(Quiz::new("Same"));
        registry.add(Quiz::new("Same"));

        assert_eq!(registry.len(), 2);
        registry.remove(first);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.quizzes().next().unwrap().title(), "Same");
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut registry = QuizRegistry::new();
        let id = registry.add(Quiz::new("A"));
        assert!(registry.remove(id).is_some());
        assert!(registry.remove(id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn seeding_empty_registry_adds_one_default() {
        let mut registry = QuizRegistry::new();
        let seeded = registry.ensure_default_seeded();
        assert!(seeded.is_some());
        assert_eq!(registry.len(), 1);

        let defaults: Vec<_> = registry
            .quizzes()
            .filter(|q| q.title() == DEFAULT_QUIZ_TITLE)
            .collect();
        assert_eq!(defaults.len(), 1);

        assert!(registry.ensure_default_seeded().is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn seeding_ignores_lookalike_titles() {
        let mut registry = QuizRegistry::new();
        registry.add(Quiz::new(format!("My {DEFAULT_QUIZ_TITLE} copy")));

        assert!(registry.ensure_default_seeded().is_some());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn seeding_runs_again_after_default_removed() {
        let mut registry = QuizRegistry::new();
        let id = registry.ensure_default_seeded().unwrap();
        registry.remove(id);

        assert!(registry.ensure_default_seeded().is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn replace_all_issues_fresh_handles() {
        let mut registry = QuizRegistry::new();
        let old = registry.add(Quiz::new("Old"));
        registry.replace_all(vec![Quiz::new("X"), Quiz::new("Y")]);

        assert!(!registry.contains(old));
        let titles: Vec<_> = registry.quizzes().map(Quiz::title).collect();
        assert_eq!(titles, ["X", "Y"]);
    }

    #[test]
    fn available_categories_are_distinct_in_first_seen_order() {
        let mut registry = QuizRegistry::new();
        registry.add(Quiz::with_questions(
            "A",
            vec![question(Category::Science), question(Category::History)],
        ));
        registry.add(Quiz::with_questions(
            "B",
            vec![question(Category::Science), question(Category::Food)],
        ));

        assert_eq!(
            registry.available_categories(),
            vec![Category::Science, Category::History, Category::Food]
        );
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut registry = QuizRegistry::new();
        let id = registry.add(Quiz::new("Draft"));
        registry.get_mut(id).unwrap().set_title("Final");
        assert_eq!(registry.get(id).unwrap().title(), "Final");
    }
}
