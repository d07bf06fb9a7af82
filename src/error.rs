//! Error types shared by the library.

use std::path::PathBuf;

use thiserror::Error;

pub type GameResult<T> = Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Nicknames are the store's key and a single whitespace-free token.
    #[error("invalid nickname {0:?}")]
    InvalidNickname(String),

    #[error("invalid player name {0:?}")]
    InvalidName(String),

    #[error("player {0:?} is already registered")]
    DuplicatePlayer(String),

    #[error("malformed player record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("invalid resolution {0:?}, expected WIDTHxHEIGHT")]
    InvalidResolution(String),

    #[error("invalid seed {0:?}, expected an unsigned integer")]
    InvalidSeed(String),
}

impl GameError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GameError::Io {
            path: path.into(),
            source,
        }
    }
}
