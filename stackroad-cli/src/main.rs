//! STACKROAD CLI - Command-line interface
//!
//! Commands:
//! - play: Play one AI vs AI game, printing the board every ply
//! - match: Play many independent games in parallel and tally results

mod match_cmd;
mod play_cmd;
mod runner;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stackroad_core::RuleSet;

#[derive(Parser)]
#[command(name = "stackroad")]
#[command(about = "STACKROAD stacking-road game with alpha-beta AI players")]
struct Cli {
    /// Random seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Rule set JSON file (standard 6x6 game when omitted)
    #[arg(long, global = true, value_name = "FILE")]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Play(play_cmd::PlayArgs),
    /// Play a batch of games
    Match(match_cmd::MatchArgs),
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let rules = load_rules(cli.rules.as_deref())?;

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, &rules, cli.seed),
        Commands::Match(args) => match_cmd::run(args, &rules, cli.seed),
    }
}

fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    match path {
        Some(path) => RuleSet::load(path)
            .with_context(|| format!("Failed to load rule set: {}", path.display())),
        None => Ok(RuleSet::default()),
    }
}
