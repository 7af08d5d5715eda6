//! Error types for the tileshot crate.

use thiserror::Error;

use super::coord::Coord;
use super::state::Phase;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the tileshot crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The board layout string could not be parsed.
    #[error("malformed layout: {0}")]
    MalformedLayout(#[from] LayoutProblem),

    /// A selection is off the board or not legal for the current player and phase.
    #[error("illegal {phase} target {coord}")]
    IllegalMove { coord: Coord, phase: Phase },

    /// A caller or collaborator broke the turn protocol.
    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A background computer player could not run.
    #[error("AI worker failed: {0}")]
    Worker(String),
}

impl Error {
    pub(crate) fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// What is wrong with a layout string. Lines and columns are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutProblem {
    #[error("layout has no tiles")]
    Empty,

    #[error("unrecognized character {character:?} at line {line}, column {column}")]
    UnknownCharacter {
        character: char,
        line: usize,
        column: usize,
    },

    #[error("line {line} has {found} tiles, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("player {player} appears more than once (again at line {line}, column {column})")]
    DuplicatePlayer { player: u8, line: usize, column: usize },

    #[error("player {0} is missing; player indices must be contiguous from 0")]
    MissingPlayer(u8),

    #[error("layout places no players")]
    NoPlayers,
}
