//! Game state, moves, and in-place apply/undo

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord};
use crate::error::GameError;
use crate::movegen;
use crate::pieces::{Color, Piece};
use crate::win::{self, GameResult};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Pieces each color starts with in hand
pub const STARTING_RESERVE: u8 = 21;

/// Plies before the flat majority decides the game
pub const DEFAULT_PLY_LIMIT: u32 = 200;

// ============================================================================
// CORE TYPES
// ============================================================================

/// A legal move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Put a new piece from the reserve on an empty or flat-topped cell
    Place { at: Coord, piece: Piece },
    /// Carry the top `count` pieces to an orthogonal neighbor
    Slide { from: Coord, to: Coord, count: u8 },
}

impl Move {
    pub fn is_placement(&self) -> bool {
        matches!(self, Move::Place { .. })
    }

    /// Target cell of a placement, origin cell of a slide
    pub fn source(&self) -> Coord {
        match *self {
            Move::Place { at, .. } => at,
            Move::Slide { from, .. } => from,
        }
    }

    pub fn destination(&self) -> Option<Coord> {
        match *self {
            Move::Place { .. } => None,
            Move::Slide { to, .. } => Some(to),
        }
    }

    pub fn piece(&self) -> Option<Piece> {
        match *self {
            Move::Place { piece, .. } => Some(piece),
            Move::Slide { .. } => None,
        }
    }

    /// Pieces carried by a slide; a placement counts as one
    pub fn count(&self) -> usize {
        match *self {
            Move::Place { .. } => 1,
            Move::Slide { count, .. } => count as usize,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place { at, piece } => write!(f, "place {} at {}", piece.label(), at),
            Move::Slide { from, to, count } => write!(f, "slide {} {} -> {}", count, from, to),
        }
    }
}

/// Pieces each color still has in hand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reserves {
    counts: [u8; 2],
}

impl Reserves {
    pub fn new(black: u8, white: u8) -> Self {
        Self { counts: [black, white] }
    }

    pub fn get(&self, color: Color) -> u8 {
        self.counts[color.index()]
    }

    fn take(&mut self, color: Color) -> Result<(), GameError> {
        let count = &mut self.counts[color.index()];
        if *count == 0 {
            return Err(GameError::ReserveExhausted(color));
        }
        *count -= 1;
        Ok(())
    }

    fn give_back(&mut self, color: Color) {
        let count = &mut self.counts[color.index()];
        *count = count.saturating_add(1);
    }
}

impl Default for Reserves {
    fn default() -> Self {
        Self::new(STARTING_RESERVE, STARTING_RESERVE)
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Board, reserves and ply counter.
///
/// One value per game or search root. The search mutates it in place through
/// [`GameState::apply`] and restores it with [`GameState::undo`]; no node keeps
/// a private copy.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    reserves: Reserves,
    ply: u32,
    ply_limit: u32,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Fresh game on an empty board
    pub fn new(board_size: usize, starting_reserve: u8, ply_limit: u32) -> Result<Self, GameError> {
        Ok(Self {
            board: Board::new(board_size)?,
            reserves: Reserves::new(starting_reserve, starting_reserve),
            ply: 0,
            ply_limit,
        })
    }

    /// Assemble a state from existing parts
    pub fn from_parts(board: Board, reserves: Reserves, ply: u32, ply_limit: u32) -> Self {
        Self {
            board,
            reserves,
            ply,
            ply_limit,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn reserves(&self) -> &Reserves {
        &self.reserves
    }

    pub fn reserve(&self, color: Color) -> u8 {
        self.reserves.get(color)
    }

    pub fn ply(&self) -> u32 {
        self.ply
    }

    pub fn ply_limit(&self) -> u32 {
        self.ply_limit
    }

    /// Current outcome at this ply
    pub fn result(&self) -> GameResult {
        win::result(&self.board, self.ply, self.ply_limit)
    }

    /// Generate all legal moves for `color`
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        movegen::legal_moves(&self.board, &self.reserves, color)
    }

    // ========================================================================
    // APPLY / UNDO
    // ========================================================================

    /// Play `mv` for `color`. On error nothing is changed.
    pub fn apply(&mut self, mv: Move, color: Color) -> Result<(), GameError> {
        match mv {
            Move::Place { at, piece } => self.apply_placement(at, piece, color)?,
            Move::Slide { from, to, count } => self.apply_slide(from, to, count, color)?,
        }
        self.ply += 1;
        Ok(())
    }

    /// Take back `mv`, previously applied for `color`
    pub fn undo(&mut self, mv: Move, color: Color) -> Result<(), GameError> {
        match mv {
            Move::Place { at, .. } => {
                self.board.get_mut(at)?.pop(1)?;
                self.reserves.give_back(color);
            }
            Move::Slide { from, to, count } => {
                self.board.move_pieces(to, from, count as usize)?;
            }
        }
        self.ply = self.ply.saturating_sub(1);
        Ok(())
    }

    fn apply_placement(&mut self, at: Coord, piece: Piece, color: Color) -> Result<(), GameError> {
        if piece.color != color {
            return Err(GameError::WrongColor {
                piece: piece.color,
                mover: color,
            });
        }
        if self.reserves.get(color) == 0 {
            return Err(GameError::ReserveExhausted(color));
        }
        self.board.place(at, &[piece])?;
        self.reserves.take(color)
    }

    fn apply_slide(
        &mut self,
        from: Coord,
        to: Coord,
        count: u8,
        color: Color,
    ) -> Result<(), GameError> {
        self.board.index(from)?;
        self.board.index(to)?;
        if from == to {
            return Err(GameError::SameCell);
        }
        if !from.is_adjacent(to) {
            return Err(GameError::NotAdjacent { x: to.x, y: to.y });
        }
        if count == 0 {
            return Err(GameError::ZeroCount);
        }
        if !self.board.top(from).is_some_and(|top| top.color == color) {
            return Err(GameError::NotOwner(color));
        }
        self.board.move_pieces(from, to, count as usize)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::MAX_STACK_HEIGHT;

    fn new_game() -> GameState {
        GameState::new(6, STARTING_RESERVE, DEFAULT_PLY_LIMIT).unwrap()
    }

    fn place(x: i8, y: i8, piece: Piece) -> Move {
        Move::Place { at: Coord::new(x, y), piece }
    }

    fn slide(from: (i8, i8), to: (i8, i8), count: u8) -> Move {
        Move::Slide {
            from: Coord::new(from.0, from.1),
            to: Coord::new(to.0, to.1),
            count,
        }
    }

    #[test]
    fn test_game_creation() {
        let game = new_game();
        assert_eq!(game.ply(), 0);
        assert_eq!(game.reserve(Color::Black), 21);
        assert_eq!(game.reserve(Color::White), 21);
        assert_eq!(game.result(), GameResult::Ongoing);
        assert!(GameState::new(2, 21, 200).is_err());
    }

    #[test]
    fn test_apply_placement() {
        let mut game = new_game();
        game.apply(place(2, 3, Piece::flat(Color::Black)), Color::Black).unwrap();
        assert_eq!(game.reserve(Color::Black), 20);
        assert_eq!(game.reserve(Color::White), 21);
        assert_eq!(game.ply(), 1);
        assert_eq!(game.board().top(Coord::new(2, 3)), Some(&Piece::flat(Color::Black)));
    }

    #[test]
    fn test_apply_undo_placement() {
        let mut game = new_game();
        let before = game.clone();
        let mv = place(0, 0, Piece::standing(Color::White));
        game.apply(mv, Color::White).unwrap();
        game.undo(mv, Color::White).unwrap();
        assert_eq!(game, before);
    }

    #[test]
    fn test_apply_undo_slide() {
        let mut game = new_game();
        game.apply(place(1, 1, Piece::flat(Color::Black)), Color::Black).unwrap();
        game.apply(place(1, 1, Piece::flat(Color::White)), Color::White).unwrap();
        let before = game.clone();

        let mv = slide((1, 1), (1, 2), 2);
        game.apply(mv, Color::White).unwrap();
        assert!(game.board().get(Coord::new(1, 1)).unwrap().is_empty());
        assert_eq!(
            game.board().get(Coord::new(1, 2)).unwrap().pieces(),
            &[Piece::flat(Color::Black), Piece::flat(Color::White)]
        );
        assert_eq!(game.reserve(Color::White), before.reserve(Color::White));

        game.undo(mv, Color::White).unwrap();
        assert_eq!(game, before);
    }

    #[test]
    fn test_rejected_moves_leave_state() {
        let mut game = new_game();
        game.apply(place(0, 0, Piece::flat(Color::White)), Color::White).unwrap();
        game.apply(place(1, 0, Piece::standing(Color::Black)), Color::Black).unwrap();
        let before = game.clone();

        let attempts = [
            (place(1, 0, Piece::flat(Color::White)), Color::White),
            (place(2, 2, Piece::flat(Color::Black)), Color::White),
            (place(6, 0, Piece::flat(Color::White)), Color::White),
            (place(i8::MIN, i8::MAX, Piece::flat(Color::White)), Color::White),
            (slide((0, 0), (1, 0), 1), Color::White),
            (slide((0, 0), (0, 0), 1), Color::White),
            (slide((0, 0), (0, 2), 1), Color::White),
            (slide((0, 0), (0, 1), 2), Color::White),
            (slide((0, 0), (0, 1), 0), Color::White),
            (slide((0, 0), (0, 1), 1), Color::Black),
            (slide((100, 0), (-100, 0), 1), Color::White),
            (slide((i8::MAX, i8::MIN), (i8::MIN, i8::MAX), 1), Color::White),
            (slide((0, 0), (-128, 0), 1), Color::White),
        ];
        for (mv, color) in attempts {
            assert!(game.apply(mv, color).is_err(), "{:?} should be rejected", mv);
            assert_eq!(game, before, "{:?} must not mutate", mv);
        }
    }

    #[test]
    fn test_error_kinds() {
        let mut game = new_game();
        game.apply(place(0, 0, Piece::flat(Color::White)), Color::White).unwrap();
        assert_eq!(
            game.apply(slide((0, 0), (0, 0), 1), Color::White),
            Err(GameError::SameCell)
        );
        assert_eq!(
            game.apply(slide((0, 0), (0, 1), 3), Color::White),
            Err(GameError::Underflow { requested: 3, height: 1 })
        );
        assert_eq!(
            game.apply(slide((0, 0), (0, 1), 1), Color::Black),
            Err(GameError::NotOwner(Color::Black))
        );
        assert_eq!(
            game.apply(place(3, 3, Piece::flat(Color::Black)), Color::White),
            Err(GameError::WrongColor { piece: Color::Black, mover: Color::White })
        );
    }

    #[test]
    fn test_far_off_board_slide_is_out_of_bounds() {
        let mut game = new_game();
        assert_eq!(
            game.apply(slide((100, 0), (-100, 0), 1), Color::White),
            Err(GameError::OutOfBounds { x: 100, y: 0, size: 6 })
        );
        game.apply(place(0, 0, Piece::flat(Color::White)), Color::White).unwrap();
        assert_eq!(
            game.apply(slide((0, 0), (0, -1), 1), Color::White),
            Err(GameError::OutOfBounds { x: 0, y: -1, size: 6 })
        );
        assert_eq!(game.ply(), 1);
    }

    #[test]
    fn test_reserve_exhausted() {
        let mut game = GameState::new(3, 1, 200).unwrap();
        game.apply(place(0, 0, Piece::flat(Color::Black)), Color::Black).unwrap();
        let before = game.clone();
        assert_eq!(
            game.apply(place(1, 1, Piece::flat(Color::Black)), Color::Black),
            Err(GameError::ReserveExhausted(Color::Black))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_slide_capacity_restores_source() {
        let mut game = new_game();
        let from = Coord::new(2, 2);
        let to = Coord::new(3, 2);
        for color in [Color::Black, Color::White, Color::Black] {
            game.apply(Move::Place { at: from, piece: Piece::flat(color) }, color).unwrap();
        }
        for _ in 0..MAX_STACK_HEIGHT - 1 {
            game.apply(Move::Place { at: to, piece: Piece::flat(Color::White) }, Color::White)
                .unwrap();
        }
        let before = game.clone();
        let err = game
            .apply(Move::Slide { from, to, count: 3 }, Color::Black)
            .unwrap_err();
        assert!(matches!(err, GameError::Capacity { .. }));
        assert_eq!(game, before);
    }

    #[test]
    fn test_move_accessors() {
        let placement = place(1, 2, Piece::flat(Color::White));
        assert!(placement.is_placement());
        assert_eq!(placement.source(), Coord::new(1, 2));
        assert_eq!(placement.destination(), None);
        assert_eq!(placement.piece(), Some(Piece::flat(Color::White)));
        assert_eq!(placement.count(), 1);

        let carry = slide((1, 2), (1, 3), 3);
        assert!(!carry.is_placement());
        assert_eq!(carry.destination(), Some(Coord::new(1, 3)));
        assert_eq!(carry.piece(), None);
        assert_eq!(carry.count(), 3);

        assert_eq!(placement.to_string(), "place WF at (1,2)");
        assert_eq!(carry.to_string(), "slide 3 (1,2) -> (1,3)");
    }
}
