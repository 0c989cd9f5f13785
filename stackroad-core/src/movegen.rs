//! Legal move enumeration.
//!
//! Read-only over the board and reserves. Moves come out in a fixed order
//! that the search relies on for tie-breaking:
//! 1. Placements, cell by cell (x outer, y inner), flat before standing
//! 2. Slides, cell by cell, by increasing count, then by direction
//!    (up, down, left, right)

use crate::board::{Board, Coord};
use crate::game::{Move, Reserves};
use crate::pieces::{Color, Piece, MAX_STACK_HEIGHT};

/// Generate all legal moves for `color`
pub fn legal_moves(board: &Board, reserves: &Reserves, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    generate_placements(board, reserves, color, &mut moves);
    generate_slides(board, color, &mut moves);
    moves
}

fn generate_placements(board: &Board, reserves: &Reserves, color: Color, moves: &mut Vec<Move>) {
    if reserves.get(color) == 0 {
        return;
    }

    for at in board.coords() {
        let accepts = board.get(at).is_ok_and(|stack| stack.accepts_placement());
        if accepts {
            moves.push(Move::Place { at, piece: Piece::flat(color) });
            moves.push(Move::Place { at, piece: Piece::standing(color) });
        }
    }
}

fn generate_slides(board: &Board, color: Color, moves: &mut Vec<Move>) {
    for (from, stack) in board.stacks() {
        if stack.top().map(|p| p.color) != Some(color) {
            continue;
        }

        for count in 1..=stack.height() {
            for dir in 0..4 {
                let to = from.neighbor(dir);
                if can_receive(board, to, count) {
                    moves.push(Move::Slide { from, to, count: count as u8 });
                }
            }
        }
    }
}

/// True if `count` pieces may be dropped on `to`
fn can_receive(board: &Board, to: Coord, count: usize) -> bool {
    match board.get(to) {
        Ok(dest) => {
            dest.height() + count <= MAX_STACK_HEIGHT
                && !dest.top().is_some_and(|top| top.is_standing())
        }
        Err(_) => false,
    }
}
