//! Checkers-Rust: a checkers rules engine for external front ends.
//!
//! ## Usage
//!
//! - `checkers-rust` - Start the text protocol on stdin/stdout
//! - `checkers-rust protocol` - Same as above
//! - `checkers-rust demo` - Play a random game and print it

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use checkers_rust::config::GameConfig;
use checkers_rust::constants::{DEFAULT_SIZE, MAX_PLAYOUT_PLIES};
use checkers_rust::game::{self, GameStatus};
use checkers_rust::playout::playout;
use checkers_rust::protocol::ProtocolEngine;
use checkers_rust::state::GameState;

/// Checkers-Rust: a checkers (draughts) rules engine
#[derive(Parser)]
#[command(name = "checkers-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board size (even, 4 to 26)
    #[arg(global = true, long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Log level for messages written to stderr
    #[arg(global = true, long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text protocol server for use with a front end
    Protocol,
    /// Play a random game and print the result
    Demo {
        /// Seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many moves
        #[arg(long, default_value_t = MAX_PLAYOUT_PLIES)]
        max_plies: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .target(env_logger::Target::Stderr)
        .init();

    let config = GameConfig::new(cli.size).context("invalid --size")?;

    match cli.command {
        Some(Commands::Protocol) | None => {
            let mut engine = ProtocolEngine::new(config);
            engine
                .run(io::stdin().lock(), io::stdout())
                .context("protocol I/O failed")?;
        }
        Some(Commands::Demo { seed, max_plies }) => run_demo(config, seed, max_plies),
    }
    Ok(())
}

fn run_demo(config: GameConfig, seed: Option<u64>, max_plies: usize) {
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    println!("Checkers-Rust: random self-play on a {0}x{0} board\n", config.size());
    let start = GameState::new(&config);
    println!("{start}");

    let end = playout(&start, &mut rng, max_plies);
    let moves: Vec<String> = end.move_history().iter().map(|mv| mv.to_string()).collect();
    println!("Moves: {}\n", moves.join(" "));
    println!("{end}");

    match game::game_status(&end) {
        GameStatus::Victory(side) => println!("{side} wins after {} moves", moves.len()),
        GameStatus::Ongoing => println!("No winner after {} moves", moves.len()),
    }
}
