//! Built-in reference texts keyed by practice level and game difficulty.

mod corpus;

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

pub fn practice_text(level: Level) -> &'static str {
    match level {
        Level::Beginner => corpus::BEGINNER,
        Level::Intermediate => corpus::INTERMEDIATE,
        Level::Advanced => corpus::ADVANCED,
    }
}

pub fn word_themes() -> &'static [&'static str] {
    corpus::WORD_THEMES
}

/// Vocabulary for one theme; unknown themes fall back to animals
pub fn words(theme: &str, difficulty: Difficulty) -> &'static [&'static str] {
    let table = match theme {
        "colors" => &corpus::COLORS,
        "food" => &corpus::FOOD,
        _ => &corpus::ANIMALS,
    };
    table[difficulty.index()]
}

pub fn sentences(difficulty: Difficulty) -> &'static [&'static str] {
    corpus::SENTENCES[difficulty.index()]
}

/// Bomb codes exist only for medium and hard
pub fn bomb_codes(difficulty: Difficulty) -> Option<&'static [&'static str]> {
    match difficulty {
        Difficulty::Easy => None,
        Difficulty::Medium => Some(corpus::BOMB_CODES_MEDIUM),
        Difficulty::Hard => Some(corpus::BOMB_CODES_HARD),
    }
}

pub fn punctuation_lines(difficulty: Difficulty) -> &'static [&'static str] {
    corpus::PUNCTUATION[difficulty.index()]
}

/// Characters worth a bonus in Punctuation Pro
pub fn is_special_char(c: char) -> bool {
    matches!(
        c,
        '!' | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '&'
            | '*'
            | '('
            | ')'
            | '-'
            | '_'
            | '+'
            | '='
            | '{'
            | '}'
            | '['
            | ']'
            | '|'
            | '\\'
            | ':'
            | ';'
            | '"'
            | '\''
            | '<'
            | '>'
            | ','
            | '.'
            | '?'
            | '/'
            | '~'
            | '`'
    )
}

/// Hands out texts in random order without repeating the previous pick.
#[derive(Debug, Clone)]
pub struct TextPool {
    texts: Vec<String>,
    last: Option<usize>,
}

impl TextPool {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
            last: None,
        }
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn next_text(&mut self) -> Option<String> {
        self.next_with(&mut rand::thread_rng())
    }

    pub fn next_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        let idx = match (self.texts.len(), self.last) {
            (0, _) => return None,
            (1, _) => 0,
            (n, Some(last)) => {
                let pick = rng.gen_range(0..n - 1);
                if pick >= last {
                    pick + 1
                } else {
                    pick
                }
            }
            (n, None) => rng.gen_range(0..n),
        };
        self.last = Some(idx);
        self.texts.get(idx).cloned()
    }
}
