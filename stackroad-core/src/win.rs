//! Road and flat-majority win detection

use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord, MAX_CELLS};
use crate::pieces::Color;

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Win(Color),
    Draw,
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != GameResult::Ongoing
    }
}

/// Road orientation: which pair of opposite edges a road joins
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    /// Row 0 to the last row
    Vertical,
    /// Column 0 to the last column
    Horizontal,
}

/// True if `color` has a road in either orientation
pub fn has_road(board: &Board, color: Color) -> bool {
    road_along(board, color, Axis::Vertical) || road_along(board, color, Axis::Horizontal)
}

fn road_along(board: &Board, color: Color, axis: Axis) -> bool {
    let size = board.size() as i8;
    let mut visited = [false; MAX_CELLS];
    let mut frontier: Vec<Coord> = Vec::with_capacity(MAX_CELLS);

    for i in 0..size {
        let start = match axis {
            Axis::Vertical => Coord::new(i, 0),
            Axis::Horizontal => Coord::new(0, i),
        };
        if !is_road_cell(board, start, color) {
            continue;
        }
        if let Ok(idx) = board.index(start) {
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
        }
        frontier.push(start);

        // Depth-first over same-color flat tops; the visited markers are
        // shared across starts since a cell reachable from an earlier
        // start has already been fully explored.
        while let Some(cell) = frontier.pop() {
            let reached = match axis {
                Axis::Vertical => cell.y == size - 1,
                Axis::Horizontal => cell.x == size - 1,
            };
            if reached {
                return true;
            }
            for dir in 0..4 {
                let next = cell.neighbor(dir);
                if !is_road_cell(board, next, color) {
                    continue;
                }
                if let Ok(idx) = board.index(next) {
                    if !visited[idx] {
                        visited[idx] = true;
                        frontier.push(next);
                    }
                }
            }
        }
    }

    false
}

fn is_road_cell(board: &Board, coord: Coord, color: Color) -> bool {
    board
        .get(coord)
        .is_ok_and(|stack| stack.is_road_cell(color))
}

/// Number of cells whose top piece is a flat piece of `color`
pub fn flat_count(board: &Board, color: Color) -> i32 {
    board
        .stacks()
        .filter(|(_, stack)| stack.is_road_cell(color))
        .count() as i32
}

/// Compare flat-topped cell counts: strictly more wins, equal is a draw
pub fn flat_majority(board: &Board) -> GameResult {
    let black = flat_count(board, Color::Black);
    let white = flat_count(board, Color::White);
    if black > white {
        GameResult::Win(Color::Black)
    } else if white > black {
        GameResult::Win(Color::White)
    } else {
        GameResult::Draw
    }
}

/// Flat-majority outcome of a full board; `None` while any cell is empty
pub fn flat_outcome(board: &Board) -> Option<GameResult> {
    board.is_full().then(|| flat_majority(board))
}

/// Full outcome at a given ply.
///
/// Roads take priority; roads for both colors at once are a draw. Without a
/// road the flat majority decides once the ply limit is reached or the board
/// has no empty cell.
pub fn result(board: &Board, ply: u32, ply_limit: u32) -> GameResult {
    let black_road = has_road(board, Color::Black);
    let white_road = has_road(board, Color::White);

    match (black_road, white_road) {
        (true, true) => GameResult::Draw,
        (true, false) => GameResult::Win(Color::Black),
        (false, true) => GameResult::Win(Color::White),
        (false, false) => {
            if ply >= ply_limit {
                flat_majority(board)
            } else {
                flat_outcome(board).unwrap_or(GameResult::Ongoing)
            }
        }
    }
}
