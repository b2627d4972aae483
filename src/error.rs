use thiserror::Error;

use crate::texts::Difficulty;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("reference text is empty")]
    EmptyReference,
    #[error("timed session needs a duration of at least one second")]
    ZeroDuration,
    #[error("{game} is not available at {difficulty} difficulty")]
    UnsupportedDifficulty {
        game: &'static str,
        difficulty: Difficulty,
    },
    #[error("no texts available for {0}")]
    EmptyPool(&'static str),
}
