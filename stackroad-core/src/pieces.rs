//! Pieces and the bounded per-cell stack

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Tallest stack a single cell may hold
pub const MAX_STACK_HEIGHT: usize = 5;

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// Orientation of a piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Counts toward roads and flat majority; can be stacked upon
    Flat,
    /// Blocks roads; nothing can be stacked on it
    Standing,
}

/// A single piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub orientation: Orientation,
}

impl Piece {
    pub const fn new(color: Color, orientation: Orientation) -> Self {
        Self { color, orientation }
    }

    pub const fn flat(color: Color) -> Self {
        Self::new(color, Orientation::Flat)
    }

    pub const fn standing(color: Color) -> Self {
        Self::new(color, Orientation::Standing)
    }

    pub fn is_flat(&self) -> bool {
        self.orientation == Orientation::Flat
    }

    pub fn is_standing(&self) -> bool {
        self.orientation == Orientation::Standing
    }

    /// Two-letter cell label: color then orientation (`BF`, `WS`, ...)
    pub fn label(&self) -> &'static str {
        match (self.color, self.orientation) {
            (Color::Black, Orientation::Flat) => "BF",
            (Color::Black, Orientation::Standing) => "BS",
            (Color::White, Orientation::Flat) => "WF",
            (Color::White, Orientation::Standing) => "WS",
        }
    }
}

// ============================================================================
// CELL STACK
// ============================================================================

/// Pieces on one cell, bottom to top.
///
/// Holds at most [`MAX_STACK_HEIGHT`] pieces. Pushes always take an ordered
/// slice, so placing one piece and dropping a carried sub-stack are the same
/// operation. A stack never contains another stack.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Stack {
    pieces: Vec<Piece>,
}

impl Stack {
    pub fn new() -> Self {
        Self {
            pieces: Vec::with_capacity(MAX_STACK_HEIGHT),
        }
    }

    /// Push an ordered slice (bottom-most first) onto the stack
    pub fn push(&mut self, incoming: &[Piece]) -> Result<(), GameError> {
        if incoming.is_empty() {
            return Err(GameError::ZeroCount);
        }
        if self.pieces.len() + incoming.len() > MAX_STACK_HEIGHT {
            return Err(GameError::Capacity {
                height: self.pieces.len(),
                incoming: incoming.len(),
            });
        }
        let covered = &incoming[..incoming.len() - 1];
        if self.top().is_some_and(|top| top.is_standing())
            || covered.iter().any(Piece::is_standing)
        {
            return Err(GameError::StandingTop);
        }
        self.pieces.extend_from_slice(incoming);
        Ok(())
    }

    /// Remove the top `n` pieces, returned bottom-most first (top-most last)
    pub fn pop(&mut self, n: usize) -> Result<Vec<Piece>, GameError> {
        if n == 0 {
            return Err(GameError::ZeroCount);
        }
        if n > self.pieces.len() {
            return Err(GameError::Underflow {
                requested: n,
                height: self.pieces.len(),
            });
        }
        let split = self.pieces.len() - n;
        Ok(self.pieces.split_off(split))
    }

    /// Put back pieces this stack just gave up in a failed transfer
    pub(crate) fn restore(&mut self, pieces: Vec<Piece>) {
        self.pieces.extend(pieces);
    }

    pub fn top(&self) -> Option<&Piece> {
        self.pieces.last()
    }

    pub fn height(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.pieces.len() == MAX_STACK_HEIGHT
    }

    /// Pieces bottom to top
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// True if the top piece is a flat piece of `color`
    pub fn is_road_cell(&self, color: Color) -> bool {
        self.top()
            .is_some_and(|top| top.color == color && top.is_flat())
    }

    /// True if a placement may land here: empty, or flat-topped and not full
    pub fn accepts_placement(&self) -> bool {
        match self.top() {
            None => true,
            Some(top) => top.is_flat() && !self.is_full(),
        }
    }
}
