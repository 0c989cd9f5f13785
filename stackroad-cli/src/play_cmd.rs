//! Play command - one game between two AI players, shown ply by ply

use anyhow::Result;
use clap::Args;

use stackroad_core::{Difficulty, RuleSet};

use crate::runner::{describe_result, GameRunner, Players, Turn};

#[derive(Args)]
pub struct PlayArgs {
    /// Black player strength (easy, medium, hard)
    #[arg(long, default_value = "medium")]
    pub black: Difficulty,

    /// White player strength (easy, medium, hard)
    #[arg(long, default_value = "medium")]
    pub white: Difficulty,
}

pub fn run(args: PlayArgs, rules: &RuleSet, seed: Option<u64>) -> Result<()> {
    let state = rules.new_game()?;

    tracing::info!(
        "Starting game on {}x{} board ({}): black={}, white={}",
        rules.board_size,
        rules.board_size,
        rules.name,
        args.black,
        args.white
    );

    println!("{}", state.board());

    let players = Players { black: args.black, white: args.white };
    let mut runner = GameRunner::new(players, seed.unwrap_or(42));

    let outcome = runner.play_game(state, |state, color, turn| {
        match turn {
            Turn::Moved(mv) => println!("Ply {}: {} {}", state.ply(), color, mv),
            Turn::Passed => println!("{} has no legal move and passes", color),
        }
        println!("{}", state.board());
    })?;

    println!("Result: {} after {} plies", describe_result(outcome.result), outcome.plies);
    Ok(())
}
