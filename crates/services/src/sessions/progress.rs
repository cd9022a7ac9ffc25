/// Aggregated view of play progress, pulled by the presentation layer after
/// each step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayProgress {
    /// Questions in the quiz being played.
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    /// Questions still to be answered, the current one included.
    pub remaining: usize,
    pub percentage_correct: f64,
    pub is_complete: bool,
}

/// Result of submitting one answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerOutcome {
    pub submitted_index: usize,
    pub correct_answer_index: usize,
    pub was_correct: bool,
    pub progress: PlayProgress,
}

/// Share of correct answers as a percentage rounded to two decimals, with
/// midpoints going to the even neighbour.
///
/// Zero answers yields `0.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage_correct(correct: usize, answered: usize) -> f64 {
    if answered == 0 {
        return 0.0;
    }
    let ratio = correct as f64 / answered as f64;
    (ratio * 100.0 * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert!((percentage_correct(2, 3) - 66.67).abs() < f64::EPSILON);
        assert!((percentage_correct(1, 3) - 33.33).abs() < f64::EPSILON);
        assert!((percentage_correct(3, 3) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn midpoints_round_to_even() {
        assert!((percentage_correct(1, 32) - 3.12).abs() < f64::EPSILON);
        assert!((percentage_correct(3, 32) - 9.38).abs() < f64::EPSILON);
    }

    #[test]
    fn nothing_answered_is_zero() {
        assert!(percentage_correct(0, 0).abs() < f64::EPSILON);
    }
}
