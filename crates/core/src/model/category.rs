use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Topic tag attached to every question.
///
/// The declaration order is significant: a category's numeric code is its
/// position in `Category::ALL`, and save files written with numeric codes
/// rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Other,
    Geography,
    History,
    Math,
    Science,
    Psychology,
    Music,
    Botany,
    Biology,
    Food,
    Animal,
    Sport,
    Movie,
    Religion,
    Game,
    Chemistry,
    Literature,
}

const NAMES: &[&str] = &[
    "Other",
    "Geography",
    "History",
    "Math",
    "Science",
    "Psychology",
    "Music",
    "Botany",
    "Biology",
    "Food",
    "Animal",
    "Sport",
    "Movie",
    "Religion",
    "Game",
    "Chemistry",
    "Literature",
];

impl Category {
    pub const ALL: [Category; 17] = [
        Category::Other,
        Category::Geography,
        Category::History,
        Category::Math,
        Category::Science,
        Category::Psychology,
        Category::Music,
        Category::Botany,
        Category::Biology,
        Category::Food,
        Category::Animal,
        Category::Sport,
        Category::Movie,
        Category::Religion,
        Category::Game,
        Category::Chemistry,
        Category::Literature,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        NAMES[self.code()]
    }

    #[must_use]
    pub fn code(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_code(code: u64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown category: {raw}")]
pub struct ParseCategoryError {
    raw: String,
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseCategoryError {
                raw: trimmed.to_owned(),
            })
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Code(u64),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Code(code) => Category::from_code(code).ok_or_else(|| {
                de::Error::invalid_value(
                    Unexpected::Unsigned(code),
                    &"a category code between 0 and 16",
                )
            }),
            Repr::Name(name) => name
                .parse()
                .map_err(|_| de::Error::unknown_variant(&name, NAMES)),
        }
    }
}
