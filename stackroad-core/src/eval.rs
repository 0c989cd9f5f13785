//! Position evaluation

use crate::board::Board;
use crate::pieces::Color;
use crate::win::{flat_count, GameResult};

/// Score of a decided game for the winner (negated for the loser)
pub const WIN_SCORE: i32 = 1000;

/// Leaf heuristic from `color`'s point of view: its flat-topped cells minus
/// the opponent's. No positional weighting.
pub fn evaluate(board: &Board, color: Color) -> i32 {
    flat_count(board, color) - flat_count(board, color.opponent())
}

/// Score a finished game from `color`'s point of view; `None` while ongoing
pub fn terminal_score(result: GameResult, color: Color) -> Option<i32> {
    match result {
        GameResult::Ongoing => None,
        GameResult::Draw => Some(0),
        GameResult::Win(winner) if winner == color => Some(WIN_SCORE),
        GameResult::Win(_) => Some(-WIN_SCORE),
    }
}
