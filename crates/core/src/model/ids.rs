use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Handle for a quiz held by a `QuizRegistry`.
///
/// Ids are assigned by the registry on insertion and are only meaningful for
/// the registry that issued them. They are not persisted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuizId(u64);

impl QuizId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuizId({})", self.0)
    }
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseQuizIdError {
    raw: String,
}

impl fmt::Display for ParseQuizIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse QuizId from {:?}", self.raw)
    }
}

impl std::error::Error for ParseQuizIdError {}

impl FromStr for QuizId {
    type Err = ParseQuizIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(QuizId::new)
            .map_err(|_| ParseQuizIdError { raw: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_id_display_and_parse() {
        let id = QuizId::new(7);
        assert_eq!(id.to_string(), "7");
        assert_eq!(" 7 ".parse::<QuizId>().unwrap(), id);
    }

    #[test]
    fn quiz_id_rejects_garbage() {
        assert!("seven".parse::<QuizId>().is_err());
    }
}
