//! Error types for grid construction and search.

use thiserror::Error;

/// A tile arrangement that is not a permutation of 0..=8.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no blank tile (0)")]
    MissingBlank,

    #[error("tile {value} at row {row}, column {col} is outside 0..=8")]
    TileOutOfRange { value: u8, row: usize, col: usize },

    #[error("tile {value} appears more than once")]
    DuplicateTile { value: u8 },

    #[error("expected 9 tiles, found {found}")]
    WrongTileCount { found: usize },

    #[error("invalid tile token '{token}'")]
    InvalidToken { token: String },
}

/// Search terminated without reaching the goal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("frontier exhausted after {expanded} expansions without reaching the goal")]
    NoSolutionFound { expanded: usize },

    #[error("expansion limit of {limit} reached before the goal")]
    ExpansionLimitReached { limit: usize },
}
