//! Built-in question set for the default quiz.

use crate::model::{Category, Question};

/// Title given to the seeded default quiz.
pub const DEFAULT_QUIZ_TITLE: &str = "Default Quiz";

#[must_use]
pub fn default_questions() -> Vec<Question> {
    vec![
        Question::seeded(
            "What is the capital of Australia?",
            ["Sydney", "Canberra", "Melbourne"],
            1,
            Category::Geography,
        ),
        Question::seeded(
            "In which year did the Berlin Wall fall?",
            ["1989", "1991", "1985"],
            0,
            Category::History,
        ),
        Question::seeded(
            "What is 7 multiplied by 8?",
            ["54", "64", "56"],
            2,
            Category::Math,
        ),
        Question::seeded(
            "Which planet is closest to the sun?",
            ["Mercury", "Venus", "Mars"],
            0,
            Category::Science,
        ),
        Question::seeded(
            "How many strings does a standard guitar have?",
            ["Four", "Six", "Eight"],
            1,
            Category::Music,
        ),
        Question::seeded(
            "What gas do plants absorb from the air for photosynthesis?",
            ["Oxygen", "Nitrogen", "Carbon dioxide"],
            2,
            Category::Botany,
        ),
        Question::seeded(
            "Which organ pumps blood through the human body?",
            ["Heart", "Liver", "Lungs"],
            0,
            Category::Biology,
        ),
        Question::seeded(
            "Which animal is the largest mammal on Earth?",
            ["African elephant", "Blue whale", "Giraffe"],
            1,
            Category::Animal,
        ),
        Question::seeded(
            "What is the chemical symbol for gold?",
            ["Gd", "Go", "Au"],
            2,
            Category::Chemistry,
        ),
        Question::seeded(
            "Who wrote \"Pride and Prejudice\"?",
            ["Jane Austen", "Charlotte Brontë", "Mary Shelley"],
            0,
            Category::Literature,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ANSWER_COUNT;

    #[test]
    fn seed_questions_are_well_formed() {
        let questions = default_questions();
        assert!(!questions.is_empty());
        for q in &questions {
            assert!(!q.statement().is_empty());
            assert!(q.correct_answer_index() < ANSWER_COUNT);
            assert!(q.answers().iter().all(|a| !a.is_empty()));
        }
    }
}
