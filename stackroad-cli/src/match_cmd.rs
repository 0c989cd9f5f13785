//! Match command - play a batch of independent games between two AI players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use stackroad_core::{Color, Difficulty, GameResult, RuleSet};

use crate::runner::{describe_result, GameRunner, Players};

/// Seed used for the batch when none is given
const DEFAULT_BASE_SEED: u64 = 42;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Black player strength (easy, medium, hard)
    #[arg(long, default_value = "medium")]
    pub black: Difficulty,

    /// White player strength (easy, medium, hard)
    #[arg(long, default_value = "easy")]
    pub white: Difficulty,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    seed: u64,
    result: GameResult,
    plies: u32,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    black_wins: usize,
    white_wins: usize,
    draws: usize,
    /// Games that ended with both sides unable to move
    stalled: usize,
    avg_plies: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Play the match (games run in parallel)
/// 2. Report results
pub fn run(args: MatchArgs, rules: &RuleSet, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting match on {} rules: black={} vs white={} ({} games)",
        rules.name,
        args.black,
        args.white,
        args.games
    );

    let results = play_match(rules, &args, seed)?;

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games; game `i` uses seed `base + i`
fn play_match(rules: &RuleSet, args: &MatchArgs, seed: Option<u64>) -> Result<MatchResults> {
    let base_seed = seed.unwrap_or(DEFAULT_BASE_SEED);
    let players = Players { black: args.black, white: args.white };

    let progress = ProgressBar::new(args.games as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games ({elapsed})")
            .context("Invalid progress template")?,
    );

    let games = (0..args.games)
        .into_par_iter()
        .map(|index| {
            let seed = base_seed.wrapping_add(index as u64);
            let record = play_single_game(rules, players, index + 1, seed);
            progress.inc(1);
            record
        })
        .collect::<Result<Vec<_>>>()?;

    progress.finish_and_clear();

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        print_json_results(results)
    } else {
        print_text_results(results);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_game(
    rules: &RuleSet,
    players: Players,
    game_number: usize,
    seed: u64,
) -> Result<GameRecord> {
    let state = rules.new_game()?;
    let outcome = GameRunner::new(players, seed)
        .play_game(state, |_, _, _| {})
        .with_context(|| format!("Game {} (seed {}) failed", game_number, seed))?;

    tracing::debug!(
        "Game {}: {} ({} plies)",
        game_number,
        describe_result(outcome.result),
        outcome.plies
    );

    Ok(GameRecord {
        game_number,
        seed,
        result: outcome.result,
        plies: outcome.plies,
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let count = |wanted: GameResult| games.iter().filter(|g| g.result == wanted).count();
    let black_wins = count(GameResult::Win(Color::Black));
    let white_wins = count(GameResult::Win(Color::White));
    let draws = count(GameResult::Draw);
    let stalled = count(GameResult::Ongoing);

    let total_plies: u32 = games.iter().map(|g| g.plies).sum();
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f32 / games.len() as f32
    };

    MatchResults {
        games,
        black_wins,
        white_wins,
        draws,
        stalled,
        avg_plies,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        seed: u64,
        result: String,
        plies: u32,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        black_wins: usize,
        white_wins: usize,
        draws: usize,
        stalled: usize,
        avg_plies: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        black_wins: results.black_wins,
        white_wins: results.white_wins,
        draws: results.draws,
        stalled: results.stalled,
        avg_plies: results.avg_plies,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                seed: g.seed,
                result: describe_result(g.result),
                plies: g.plies,
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize results")?;
    println!("{}", json);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!("Black wins:  {} ({:.1}%)", results.black_wins, percent(results.black_wins, total));
    println!("White wins:  {} ({:.1}%)", results.white_wins, percent(results.white_wins, total));
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));
    if results.stalled > 0 {
        println!("Stalled:     {}", results.stalled);
    }
    println!("Avg plies:   {:.1}", results.avg_plies);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {} (seed {}): {} in {} plies",
            game.game_number,
            game.seed,
            describe_result(game.result),
            game.plies
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
