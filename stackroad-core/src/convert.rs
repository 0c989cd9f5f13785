//! Building a search-ready [`GameState`] from a caller's board.
//!
//! A player-facing layer keeps its own board; once per engine turn it hands
//! that board over through [`StackView`] together with both reserves and the
//! ply counter.

use crate::board::{Board, Coord};
use crate::error::GameError;
use crate::game::{GameState, Reserves};
use crate::pieces::{Color, Piece, MAX_STACK_HEIGHT};

/// Read access to a square board of stacks
pub trait StackView {
    fn board_size(&self) -> usize;

    /// Cells in row `y`; differs from `board_size` only for malformed grids
    fn row_width(&self, _y: usize) -> usize {
        self.board_size()
    }

    /// Pieces at `(x, y)`, bottom to top
    fn pieces_at(&self, x: usize, y: usize) -> &[Piece];
}

impl StackView for Board {
    fn board_size(&self) -> usize {
        self.size()
    }

    fn pieces_at(&self, x: usize, y: usize) -> &[Piece] {
        self.get(Coord::new(x as i8, y as i8))
            .map(|stack| stack.pieces())
            .unwrap_or(&[])
    }
}

/// Row-major nested grid, indexed `grid[y][x]`
impl StackView for Vec<Vec<Vec<Piece>>> {
    fn board_size(&self) -> usize {
        self.len()
    }

    fn row_width(&self, y: usize) -> usize {
        self.get(y).map_or(0, Vec::len)
    }

    fn pieces_at(&self, x: usize, y: usize) -> &[Piece] {
        self.get(y)
            .and_then(|row| row.get(x))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Copy `view` into a fresh game state.
///
/// Rejects non-square grids, stacks over the height limit and standing pieces
/// with anything on top of them.
pub fn to_game_state<V: StackView + ?Sized>(
    view: &V,
    reserves: Reserves,
    ply: u32,
    ply_limit: u32,
) -> Result<GameState, GameError> {
    let size = view.board_size();
    let mut board = Board::new(size)?;

    for row in 0..size {
        let width = view.row_width(row);
        if width != size {
            return Err(GameError::NotSquare { row, width, size });
        }
    }

    for y in 0..size {
        for x in 0..size {
            let pieces = view.pieces_at(x, y);
            if pieces.is_empty() {
                continue;
            }
            let at = Coord::new(x as i8, y as i8);
            if pieces.len() > MAX_STACK_HEIGHT {
                return Err(GameError::StackTooTall {
                    x: at.x,
                    y: at.y,
                    height: pieces.len(),
                });
            }
            if pieces[..pieces.len() - 1].iter().any(Piece::is_standing) {
                return Err(GameError::BuriedStanding { x: at.x, y: at.y });
            }
            board.place(at, pieces)?;
        }
    }

    tracing::debug!(
        "converted {}x{} board at ply {} (reserves {}/{})",
        size,
        size,
        ply,
        reserves.get(Color::Black),
        reserves.get(Color::White)
    );

    Ok(GameState::from_parts(board, reserves, ply, ply_limit))
}
