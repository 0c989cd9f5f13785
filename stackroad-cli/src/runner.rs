//! Game runner - drives one game between two AI players

use anyhow::Result;

use stackroad_core::{AlphaBetaAI, Color, Difficulty, GameResult, GameState, Move};

/// Strength of each side
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Players {
    pub black: Difficulty,
    pub white: Difficulty,
}

/// What the side to move did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Moved(Move),
    /// No legal move; the turn goes to the opponent
    Passed,
}

/// Final state of a finished (or stalled) game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOutcome {
    pub result: GameResult,
    pub plies: u32,
    pub moves: Vec<Move>,
}

/// Plays games between two fixed AIs. Black moves first.
pub struct GameRunner {
    black: AlphaBetaAI,
    white: AlphaBetaAI,
}

impl GameRunner {
    pub fn new(players: Players, seed: u64) -> Self {
        Self {
            black: AlphaBetaAI::with_seed(Color::Black, players.black, seed),
            white: AlphaBetaAI::with_seed(Color::White, players.white, seed.wrapping_add(1)),
        }
    }

    /// Play until the game is decided or both sides pass in a row.
    ///
    /// `on_turn` sees the state after every turn.
    pub fn play_game<F>(&mut self, mut state: GameState, mut on_turn: F) -> Result<GameOutcome>
    where
        F: FnMut(&GameState, Color, Turn),
    {
        let mut color = Color::Black;
        let mut passes = 0;
        let mut moves = Vec::new();

        while !state.result().is_over() && passes < 2 {
            let ai = match color {
                Color::Black => &mut self.black,
                Color::White => &mut self.white,
            };

            let turn = match ai.best_move(&mut state)? {
                Some(mv) => {
                    state.apply(mv, color)?;
                    moves.push(mv);
                    passes = 0;
                    Turn::Moved(mv)
                }
                None => {
                    passes += 1;
                    Turn::Passed
                }
            };
            on_turn(&state, color, turn);
            color = color.opponent();
        }

        if passes >= 2 {
            tracing::debug!("game stalled at ply {}: neither side can move", state.ply());
        }

        Ok(GameOutcome {
            result: state.result(),
            plies: state.ply(),
            moves,
        })
    }
}

/// Human-readable result line
pub fn describe_result(result: GameResult) -> String {
    match result {
        GameResult::Win(color) => format!("{} wins", color),
        GameResult::Draw => "draw".to_string(),
        GameResult::Ongoing => "no result (neither side could move)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackroad_core::RuleSet;

    fn small_rules() -> RuleSet {
        RuleSet {
            name: "small".to_string(),
            board_size: 4,
            starting_reserve: 10,
            ply_limit: 30,
        }
    }

    #[test]
    fn test_game_finishes_within_limit() {
        let rules = small_rules();
        let players = Players { black: Difficulty::Medium, white: Difficulty::Easy };
        let mut runner = GameRunner::new(players, 3);

        let mut turns = 0;
        let outcome = runner
            .play_game(rules.new_game().unwrap(), |_, _, _| turns += 1)
            .unwrap();

        assert!(outcome.plies <= rules.ply_limit);
        assert_eq!(outcome.moves.len() as u32, outcome.plies);
        assert!(turns >= outcome.moves.len());
    }

    #[test]
    fn test_same_seed_same_game() {
        let players = Players { black: Difficulty::Easy, white: Difficulty::Easy };
        let first = GameRunner::new(players, 11)
            .play_game(small_rules().new_game().unwrap(), |_, _, _| {})
            .unwrap();
        let second = GameRunner::new(players, 11)
            .play_game(small_rules().new_game().unwrap(), |_, _, _| {})
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_black_moves_first() {
        let players = Players { black: Difficulty::Easy, white: Difficulty::Easy };
        let mut first_mover = None;
        GameRunner::new(players, 5)
            .play_game(small_rules().new_game().unwrap(), |_, color, _| {
                first_mover.get_or_insert(color);
            })
            .unwrap();
        assert_eq!(first_mover, Some(Color::Black));
    }

    #[test]
    fn test_describe_result() {
        assert_eq!(describe_result(GameResult::Win(Color::White)), "white wins");
        assert_eq!(describe_result(GameResult::Draw), "draw");
    }
}
