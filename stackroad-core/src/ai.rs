//! Minimax AI with alpha-beta pruning

use std::fmt;
use std::str::FromStr;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::eval::{evaluate, terminal_score};
use crate::game::{GameState, Move};
use crate::pieces::Color;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Window bound, larger than any reachable score
const INFINITY: i32 = 1_000_000;

/// Seed used when the caller does not pick one
const DEFAULT_SEED: u64 = 42;

// ============================================================================
// DIFFICULTY
// ============================================================================

/// Playing strength tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Uniformly random legal move, no search
    Easy,
    /// Two-ply search
    Medium,
    /// Three-ply search
    Hard,
}

impl Difficulty {
    /// Plies searched, or `None` for the random tier
    pub fn search_depth(self) -> Option<u32> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(2),
            Difficulty::Hard => Some(3),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}' (expected easy, medium or hard)", other)),
        }
    }
}

// ============================================================================
// SEARCH RESULTS
// ============================================================================

/// Counters collected during one search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited below the root
    pub nodes: u64,
    /// Sibling lists cut short by the alpha-beta window
    pub cutoffs: u64,
}

/// Chosen move with its minimax score
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub mv: Move,
    pub score: i32,
    pub stats: SearchStats,
}

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Alpha-Beta AI player for one color.
///
/// Searches by applying and undoing moves on the caller's [`GameState`]; the
/// state is back to its original contents when a call returns.
pub struct AlphaBetaAI {
    pub color: Color,
    depth: Option<u32>,
    rng: ChaCha8Rng,
    stats: SearchStats,
}

impl AlphaBetaAI {
    pub fn new(color: Color, difficulty: Difficulty) -> Self {
        Self::with_seed(color, difficulty, DEFAULT_SEED)
    }

    pub fn with_seed(color: Color, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            color,
            depth: difficulty.search_depth(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            stats: SearchStats::default(),
        }
    }

    /// Search a fixed number of plies (at least one) regardless of tier
    pub fn with_depth(color: Color, depth: u32) -> Self {
        Self {
            color,
            depth: Some(depth.max(1)),
            rng: ChaCha8Rng::seed_from_u64(DEFAULT_SEED),
            stats: SearchStats::default(),
        }
    }

    /// Plies searched, or `None` for random play
    pub fn depth(&self) -> Option<u32> {
        self.depth
    }

    /// Get best move for the current position.
    ///
    /// Returns `Ok(None)` when this color has no legal move; callers treat
    /// that as a pass.
    pub fn best_move(&mut self, state: &mut GameState) -> Result<Option<Move>, GameError> {
        match self.depth {
            None => Ok(self.random_move(state)),
            Some(depth) => Ok(self.search(state, depth)?.map(|outcome| outcome.mv)),
        }
    }

    /// Counters from the most recent search
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    fn random_move(&mut self, state: &GameState) -> Option<Move> {
        let moves = state.legal_moves(self.color);
        let mv = moves.choose(&mut self.rng).copied();
        tracing::debug!("{} picked a random move out of {}: {:?}", self.color, moves.len(), mv);
        mv
    }

    /// Full-width minimax to `depth` plies.
    ///
    /// Ties between root moves go to the first one generated.
    pub fn search(
        &mut self,
        state: &mut GameState,
        depth: u32,
    ) -> Result<Option<SearchOutcome>, GameError> {
        let depth = depth.max(1);
        self.stats = SearchStats::default();

        let moves = state.legal_moves(self.color);
        let mut best: Option<(Move, i32)> = None;
        let mut alpha = -INFINITY;

        for mv in moves {
            state.apply(mv, self.color)?;
            let score = self.minimax(state, depth - 1, false, alpha, INFINITY);
            state.undo(mv, self.color)?;
            let score = score?;

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }

        let outcome = best.map(|(mv, score)| SearchOutcome {
            mv,
            score,
            stats: self.stats,
        });

        if let Some(o) = &outcome {
            tracing::debug!(
                "{} depth {}: {:?} scores {} ({} nodes, {} cutoffs)",
                self.color,
                depth,
                o.mv,
                o.score,
                o.stats.nodes,
                o.stats.cutoffs
            );
        }

        Ok(outcome)
    }

    fn minimax(
        &mut self,
        state: &mut GameState,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32, GameError> {
        self.stats.nodes += 1;

        // Decided games end the line at any depth
        if let Some(score) = terminal_score(state.result(), self.color) {
            return Ok(score);
        }

        if depth == 0 {
            return Ok(evaluate(state.board(), self.color));
        }

        let mover = if maximizing { self.color } else { self.color.opponent() };
        let moves = state.legal_moves(mover);
        if moves.is_empty() {
            // Forced pass: score the position as it stands
            return Ok(evaluate(state.board(), self.color));
        }

        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for mv in moves {
            state.apply(mv, mover)?;
            let score = self.minimax(state, depth - 1, !maximizing, alpha, beta);
            state.undo(mv, mover)?;
            let score = score?;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        Ok(best)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use crate::game::Reserves;
    use crate::pieces::Piece;
    use crate::win::GameResult;

    /// Plain minimax without pruning, same terminal and leaf rules
    fn exhaustive(state: &mut GameState, depth: u32, maximizing: bool, me: Color) -> i32 {
        if let Some(score) = terminal_score(state.result(), me) {
            return score;
        }
        if depth == 0 {
            return evaluate(state.board(), me);
        }
        let mover = if maximizing { me } else { me.opponent() };
        let moves = state.legal_moves(mover);
        if moves.is_empty() {
            return evaluate(state.board(), me);
        }
        let scores = moves.into_iter().map(|mv| {
            state.apply(mv, mover).unwrap();
            let s = exhaustive(state, depth - 1, !maximizing, me);
            state.undo(mv, mover).unwrap();
            s
        });
        if maximizing {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    fn exhaustive_root(state: &mut GameState, depth: u32, me: Color) -> i32 {
        state
            .legal_moves(me)
            .into_iter()
            .map(|mv| {
                state.apply(mv, me).unwrap();
                let s = exhaustive(state, depth - 1, false, me);
                state.undo(mv, me).unwrap();
                s
            })
            .max()
            .unwrap()
    }

    fn small_position() -> GameState {
        let mut state = GameState::new(3, 3, 200).unwrap();
        for (x, y, piece) in [
            (1, 1, Piece::flat(Color::White)),
            (0, 1, Piece::flat(Color::Black)),
            (2, 0, Piece::standing(Color::Black)),
        ] {
            state.apply(Move::Place { at: Coord::new(x, y), piece }, piece.color).unwrap();
        }
        state
    }

    #[test]
    fn test_difficulty_depths() {
        assert_eq!(Difficulty::Easy.search_depth(), None);
        assert_eq!(Difficulty::Medium.search_depth(), Some(2));
        assert_eq!(Difficulty::Hard.search_depth(), Some(3));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("brutal".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    fn test_easy_returns_legal_move() {
        let mut state = small_position();
        let legal = state.legal_moves(Color::White);
        for seed in 0..20 {
            let mut ai = AlphaBetaAI::with_seed(Color::White, Difficulty::Easy, seed);
            let mv = ai.best_move(&mut state).unwrap().unwrap();
            assert!(legal.contains(&mv));
            assert_eq!(ai.last_stats(), SearchStats::default());
        }
    }

    #[test]
    fn test_alpha_beta_matches_exhaustive() {
        for depth in 1..=3 {
            for color in [Color::White, Color::Black] {
                let mut state = small_position();
                let expected = exhaustive_root(&mut state, depth, color);
                let mut ai = AlphaBetaAI::with_depth(color, depth);
                let outcome = ai.search(&mut state, depth).unwrap().unwrap();
                assert_eq!(outcome.score, expected, "depth {} color {}", depth, color);
            }
        }
    }

    #[test]
    fn test_search_restores_state() {
        let mut state = small_position();
        let before = state.clone();
        let mut ai = AlphaBetaAI::new(Color::Black, Difficulty::Hard);
        let mv = ai.best_move(&mut state).unwrap();
        assert!(mv.is_some());
        assert_eq!(state, before);
        assert!(ai.last_stats().nodes > 0);
    }

    #[test]
    fn test_no_legal_moves() {
        // White has nothing in hand and no stack to move
        let mut board = crate::board::Board::new(3).unwrap();
        board.place(Coord::new(0, 0), &[Piece::flat(Color::Black)]).unwrap();
        let mut state = GameState::from_parts(board, Reserves::new(5, 0), 10, 200);
        let mut ai = AlphaBetaAI::new(Color::White, Difficulty::Medium);
        assert_eq!(ai.best_move(&mut state).unwrap(), None);
        let mut easy = AlphaBetaAI::new(Color::White, Difficulty::Easy);
        assert_eq!(easy.best_move(&mut state).unwrap(), None);
    }

    #[test]
    fn test_blocks_opponent_road() {
        let mut state = GameState::new(4, 10, 200).unwrap();
        for x in 0..3 {
            let piece = Piece::flat(Color::Black);
            state.apply(Move::Place { at: Coord::new(x, 1), piece }, Color::Black).unwrap();
        }

        let mut ai = AlphaBetaAI::with_depth(Color::White, 2);
        let mv = ai.best_move(&mut state).unwrap().unwrap();
        state.apply(mv, Color::White).unwrap();

        for reply in state.legal_moves(Color::Black) {
            state.apply(reply, Color::Black).unwrap();
            assert_ne!(
                state.result(),
                GameResult::Win(Color::Black),
                "{:?} then {:?}",
                mv,
                reply
            );
            state.undo(reply, Color::Black).unwrap();
        }
    }

    #[test]
    fn test_first_seen_wins_ties() {
        // On an empty board every placement evaluates the same at depth 1:
        // flats score +1, standings 0. The first flat placement is chosen.
        let mut state = GameState::new(4, 10, 200).unwrap();
        let mut ai = AlphaBetaAI::with_depth(Color::Black, 1);
        let outcome = ai.search(&mut state, 1).unwrap().unwrap();
        assert_eq!(
            outcome.mv,
            Move::Place { at: Coord::new(0, 0), piece: Piece::flat(Color::Black) }
        );
        assert_eq!(outcome.score, 1);
    }

    /// Nodes below the root of the full, unpruned tree
    fn tree_size(state: &mut GameState, depth: u32, mover: Color) -> u64 {
        if depth == 0 || state.result().is_over() {
            return 0;
        }
        let mut total = 0;
        for mv in state.legal_moves(mover) {
            state.apply(mv, mover).unwrap();
            total += 1 + tree_size(state, depth - 1, mover.opponent());
            state.undo(mv, mover).unwrap();
        }
        total
    }

    #[test]
    fn test_pruning_cuts_branches() {
        let mut state = GameState::new(4, 10, 200).unwrap();
        let full = tree_size(&mut state, 2, Color::White);

        let mut ai = AlphaBetaAI::new(Color::White, Difficulty::Medium);
        ai.best_move(&mut state).unwrap();
        let stats = ai.last_stats();
        assert!(stats.cutoffs > 0);
        assert!(stats.nodes < full, "{} nodes searched of {}", stats.nodes, full);

        // One ply has no sibling lists below the root to cut
        let mut shallow = AlphaBetaAI::with_depth(Color::White, 1);
        shallow.best_move(&mut state).unwrap();
        assert_eq!(shallow.last_stats().cutoffs, 0);
        assert_eq!(shallow.last_stats().nodes, tree_size(&mut state, 1, Color::White));
    }
}
