//! STACKROAD Core - Game engine and AI
//!
//! This crate provides the core game logic for STACKROAD:
//! - Pieces and bounded cell stacks
//! - Square board geometry and storage
//! - Road and flat-majority win detection
//! - Move generation and in-place apply/undo
//! - Flat-count evaluation
//! - Alpha-beta AI with difficulty tiers
//! - Rule set configuration and board conversion

pub mod error;
pub mod pieces;
pub mod board;
pub mod win;
pub mod movegen;
pub mod game;
pub mod eval;
pub mod ai;
pub mod ruleset;
pub mod convert;

// Re-exports for convenient access
pub use error::GameError;
pub use pieces::{Color, Orientation, Piece, Stack, MAX_STACK_HEIGHT};
pub use board::{Board, Coord, DIRECTIONS, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use win::{flat_majority, flat_outcome, has_road, GameResult};
pub use movegen::legal_moves;
pub use game::{GameState, Move, Reserves, DEFAULT_PLY_LIMIT, STARTING_RESERVE};
pub use eval::{evaluate, WIN_SCORE};
pub use ai::{AlphaBetaAI, Difficulty, SearchOutcome, SearchStats};
pub use ruleset::RuleSet;
pub use convert::{to_game_state, StackView};
