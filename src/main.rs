use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use quantum_reversi::engines::engine_hard::HardEngine;
use quantum_reversi::engines::engine_random::RandomEngine;
use quantum_reversi::engines::engine_trait::{Engine, SearchParams};
use quantum_reversi::utils::board_notation::render_game_state;
use quantum_reversi::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};
use quantum_reversi::{EngineResult, GameState, GameStateSnapshot};

#[derive(Debug, Parser)]
#[command(name = "quantum_reversi", about = "Quantum Reversi Hard-tier engine")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read a JSON snapshot and print the Hard engine's decision as JSON
    Decide {
        #[arg(long)]
        snapshot: PathBuf,

        /// Fixed search depth (default adapts to the empty-cell count)
        #[arg(long)]
        depth: Option<u8>,

        #[arg(long)]
        max_nodes: Option<u64>,

        /// Also print the parsed board and the engine's info lines to stderr
        #[arg(long)]
        verbose: bool,
    },
    /// Play a seeded series of Hard versus Random games
    Selfplay {
        #[arg(long, default_value_t = 4)]
        games: u16,

        #[arg(long, default_value_t = 1234)]
        seed: u64,

        #[arg(long)]
        depth: Option<u8>,

        #[arg(long, default_value_t = 200)]
        max_plies: u16,

        #[arg(long)]
        verbose: bool,
    },
}

fn decide(
    snapshot: PathBuf,
    depth: Option<u8>,
    max_nodes: Option<u64>,
    verbose: bool,
) -> EngineResult<()> {
    let text = std::fs::read_to_string(&snapshot)?;
    let state = GameState::try_from(GameStateSnapshot::from_json(&text)?)?;
    if verbose {
        eprintln!("{}", render_game_state(&state));
    }

    let mut engine = HardEngine::new();
    let params = SearchParams {
        depth,
        max_nodes,
        ..SearchParams::default()
    };
    let out = engine.choose_move(&state, &params)?;
    if verbose {
        for line in &out.info_lines {
            eprintln!("{line}");
        }
    }
    println!("{}", serde_json::to_string(&out.decision)?);
    Ok(())
}

fn selfplay(
    games: u16,
    seed: u64,
    depth: Option<u8>,
    max_plies: u16,
    verbose: bool,
) -> EngineResult<()> {
    let stats = play_engine_match_series(
        || Box::new(HardEngine::new()) as Box<dyn Engine>,
        move || Box::new(RandomEngine::seeded(seed)) as Box<dyn Engine>,
        MatchSeriesConfig {
            games,
            base_seed: seed,
            per_game: MatchConfig {
                max_plies,
                search_params: SearchParams {
                    depth,
                    ..SearchParams::default()
                },
                ..MatchConfig::default()
            },
            verbose,
        },
    )?;

    println!("player1=hard player2=random");
    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let result = match args.command {
        Command::Decide {
            snapshot,
            depth,
            max_nodes,
            verbose,
        } => decide(snapshot, depth, max_nodes, verbose),
        Command::Selfplay {
            games,
            seed,
            depth,
            max_plies,
            verbose,
        } => selfplay(games, seed, depth, max_plies, verbose),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
