use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Game already ended, no new moves are accepted")]
    GameOver,
    #[error("Cell is not in a state that allows this move")]
    InvalidCellState,
    #[error("Malformed board pattern: {0}")]
    MalformedPattern(#[from] PatternError),
}

/// Reasons a textual board pattern is rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row} contains whitespace at column {col}")]
    EmbeddedWhitespace { row: usize, col: usize },
    #[error("pattern dimensions exceed the largest supported board")]
    TooLarge,
}

pub type Result<T> = core::result::Result<T, GameError>;
