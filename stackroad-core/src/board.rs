//! Square board geometry and cell storage

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::pieces::{Piece, Stack};

/// Smallest supported board edge
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest supported board edge (bounds the road search's visited array)
pub const MAX_BOARD_SIZE: usize = 8;

/// Number of cells on the largest board
pub const MAX_CELLS: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE;

/// Cell coordinates: `x` is the column, `y` the row, origin at a corner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Get neighbor in direction (0-3)
    pub fn neighbor(&self, direction: u8) -> Coord {
        let (dx, dy) = DIRECTIONS[direction as usize % 4];
        Coord::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// True if `other` shares an edge with this cell
    pub fn is_adjacent(&self, other: Coord) -> bool {
        self.x.abs_diff(other.x) as u16 + self.y.abs_diff(other.y) as u16 == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Direction vectors (dx, dy)
/// Index: 0=up, 1=down, 2=left, 3=right
pub const DIRECTIONS: [(i8, i8); 4] = [
    (0, -1), // up
    (0, 1),  // down
    (-1, 0), // left
    (1, 0),  // right
];

// ============================================================================
// BOARD
// ============================================================================

/// `size` x `size` grid of stacks, stored row-major
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Stack>,
}

impl Board {
    /// Create an empty board
    pub fn new(size: usize) -> Result<Self, GameError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(GameError::InvalidBoardSize(size));
        }
        Ok(Self {
            size,
            cells: vec![Stack::new(); size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if this coordinate is on the board
    pub fn contains(&self, coord: Coord) -> bool {
        let size = self.size as i8;
        (0..size).contains(&coord.x) && (0..size).contains(&coord.y)
    }

    /// Row-major cell index, used by the road search's visited markers
    pub fn index(&self, coord: Coord) -> Result<usize, GameError> {
        if !self.contains(coord) {
            return Err(GameError::OutOfBounds {
                x: coord.x,
                y: coord.y,
                size: self.size,
            });
        }
        Ok(coord.y as usize * self.size + coord.x as usize)
    }

    pub fn get(&self, coord: Coord) -> Result<&Stack, GameError> {
        let idx = self.index(coord)?;
        Ok(&self.cells[idx])
    }

    pub fn get_mut(&mut self, coord: Coord) -> Result<&mut Stack, GameError> {
        let idx = self.index(coord)?;
        Ok(&mut self.cells[idx])
    }

    /// Top piece at a cell; `None` for empty or off-board cells
    pub fn top(&self, coord: Coord) -> Option<&Piece> {
        self.get(coord).ok().and_then(Stack::top)
    }

    /// True once no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|stack| !stack.is_empty())
    }

    /// All coordinates, column by column (x outer, y inner)
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let size = self.size as i8;
        (0..size).flat_map(move |x| (0..size).map(move |y| Coord::new(x, y)))
    }

    /// Iterate occupied cells with their stacks
    pub fn stacks(&self) -> impl Iterator<Item = (Coord, &Stack)> + '_ {
        self.coords().filter_map(move |coord| {
            let stack = &self.cells[coord.y as usize * self.size + coord.x as usize];
            (!stack.is_empty()).then_some((coord, stack))
        })
    }

    // ========================================================================
    // CALLER-FACING EDITS
    // ========================================================================

    /// Put one piece or an ordered slice of pieces on a cell
    pub fn place(&mut self, at: Coord, pieces: &[Piece]) -> Result<(), GameError> {
        self.get_mut(at)?.push(pieces)
    }

    /// Carry the top `count` pieces from one cell to another.
    ///
    /// If the destination rejects them, the pieces go back on the source
    /// before the error is returned.
    pub fn move_pieces(&mut self, from: Coord, to: Coord, count: usize) -> Result<(), GameError> {
        let src = self.index(from)?;
        let dst = self.index(to)?;
        if src == dst {
            return Err(GameError::SameCell);
        }

        let carried = self.cells[src].pop(count)?;
        if let Err(e) = self.cells[dst].push(&carried) {
            self.cells[src].restore(carried);
            return Err(e);
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const WIDTH: usize = 5;

        write!(f, "  ")?;
        for x in 0..self.size {
            write!(f, "{:^w$}", x, w = WIDTH)?;
        }
        writeln!(f)?;

        for y in 0..self.size {
            write!(f, "{} ", y)?;
            for x in 0..self.size {
                let stack = &self.cells[y * self.size + x];
                let cell = match stack.top() {
                    Some(top) => format!("{}{}", top.label(), stack.height()),
                    None => ".".to_string(),
                };
                write!(f, "{:^w$}", cell, w = WIDTH)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
