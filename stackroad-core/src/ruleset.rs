//! RuleSet - board and game-length configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::GameError;
use crate::game::{GameState, DEFAULT_PLY_LIMIT, STARTING_RESERVE};

fn default_name() -> String {
    "default".to_string()
}

fn default_board_size() -> usize {
    6
}

fn default_starting_reserve() -> u8 {
    STARTING_RESERVE
}

fn default_ply_limit() -> u32 {
    DEFAULT_PLY_LIMIT
}

/// Game configuration. Missing JSON fields take the standard values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default = "default_name")]
    pub name: String,
    /// Edge length of the square board
    #[serde(default = "default_board_size")]
    pub board_size: usize,
    /// Pieces each color starts with in hand
    #[serde(default = "default_starting_reserve")]
    pub starting_reserve: u8,
    /// Plies before the flat majority decides
    #[serde(default = "default_ply_limit")]
    pub ply_limit: u32,
}

impl RuleSet {
    /// Check the configuration before a game is built from it
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(GameError::InvalidBoardSize(self.board_size));
        }
        if self.starting_reserve == 0 {
            return Err(GameError::InvalidRuleSet("starting reserve must be positive".to_string()));
        }
        if self.ply_limit == 0 {
            return Err(GameError::InvalidRuleSet("ply limit must be positive".to_string()));
        }
        Ok(())
    }

    /// Empty board with full reserves at ply 0
    pub fn new_game(&self) -> Result<GameState, GameError> {
        self.validate()?;
        GameState::new(self.board_size, self.starting_reserve, self.ply_limit)
    }

    /// Load from JSON file (handles both flat and `{"name", "ruleset"}` wrapped formats)
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let ruleset = Self::from_json(&content)?;
        ruleset.validate()?;
        Ok(ruleset)
    }

    fn from_json(content: &str) -> anyhow::Result<Self> {
        #[derive(Deserialize)]
        struct Wrapped {
            name: Option<String>,
            ruleset: RuleSet,
        }

        if let Ok(wrapped) = serde_json::from_str::<Wrapped>(content) {
            let mut ruleset = wrapped.ruleset;
            if let Some(name) = wrapped.name {
                ruleset.name = name;
            }
            return Ok(ruleset);
        }

        let ruleset: RuleSet = serde_json::from_str(content)?;
        Ok(ruleset)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            name: default_name(),
            board_size: default_board_size(),
            starting_reserve: default_starting_reserve(),
            ply_limit: default_ply_limit(),
        }
    }
}
