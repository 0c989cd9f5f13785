//! Rule and structure errors reported by the core

use crate::pieces::Color;

/// Every way a board or game-state operation can be rejected.
///
/// A failing operation never leaves a partial mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("stack of height {height} cannot take {incoming} more pieces")]
    Capacity { height: usize, incoming: usize },

    #[error("cannot take {requested} pieces from a stack of height {height}")]
    Underflow { requested: usize, height: usize },

    #[error("cell is topped by a standing piece")]
    StandingTop,

    #[error("coordinate ({x}, {y}) is off a {size}x{size} board")]
    OutOfBounds { x: i8, y: i8, size: usize },

    #[error("source and destination are the same cell")]
    SameCell,

    #[error("destination ({x}, {y}) is not orthogonally adjacent to the source")]
    NotAdjacent { x: i8, y: i8 },

    #[error("piece count must be at least 1")]
    ZeroCount,

    #[error("{0} has no pieces left in reserve")]
    ReserveExhausted(Color),

    #[error("top of the source stack does not belong to {0}")]
    NotOwner(Color),

    #[error("placed piece is {piece}, but the mover is {mover}")]
    WrongColor { piece: Color, mover: Color },

    #[error("board size {0} is outside the supported range")]
    InvalidBoardSize(usize),

    #[error("stack of {height} pieces at ({x}, {y}) is over the height limit")]
    StackTooTall { x: i8, y: i8, height: usize },

    #[error("row {row} has {width} cells, expected {size}")]
    NotSquare { row: usize, width: usize, size: usize },

    #[error("standing piece buried under other pieces at ({x}, {y})")]
    BuriedStanding { x: i8, y: i8 },

    #[error("invalid rule set: {0}")]
    InvalidRuleSet(String),
}
