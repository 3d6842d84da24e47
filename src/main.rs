//! 8-Puzzle Solver
//!
//! Solves 3x3 sliding-tile puzzles with A* and compares the Hamming and
//! Manhattan heuristics on a batch of random solvable puzzles, reporting mean
//! and standard deviation of path cost, nodes expanded and search time.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use eight_puzzle::batch::{self, BatchConfig, DEFAULT_PUZZLES};
use eight_puzzle::generator::{random_solvable_grid, seeded_rng};
use eight_puzzle::solvability::{inversion_count, is_solvable, is_solvable_from};
use eight_puzzle::{hamming, manhattan, report, Grid, Heuristic, SearchError, SearchLimits};

/// Solves 8-puzzles with A* and compares heuristics.
#[derive(Parser)]
#[command(name = "eight-puzzle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Compare heuristics over a batch of random solvable puzzles.
    Batch(BatchArgs),
    /// Solve a single puzzle.
    Solve {
        /// Start tiles, row-major, e.g. "1,2,3,4,0,5,6,7,8".
        tiles: Grid,
        #[arg(long, value_enum, default_value_t = Heuristic::Manhattan)]
        heuristic: Heuristic,
        /// Goal tiles; defaults to "0,1,2,3,4,5,6,7,8".
        #[arg(long)]
        goal: Option<Grid>,
        /// Give up after this many expansions.
        #[arg(long)]
        max_expansions: Option<usize>,
    },
    /// Show solvability and heuristic estimates for a puzzle.
    Check {
        /// Tiles, row-major, e.g. "1,2,3,4,0,5,6,7,8".
        tiles: Grid,
    },
    /// Print random solvable puzzles.
    Generate {
        #[arg(long, default_value_t = 1)]
        count: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Debug, PartialEq)]
struct BatchArgs {
    /// Number of random puzzles.
    #[arg(long, default_value_t = DEFAULT_PUZZLES)]
    puzzles: usize,
    /// RNG seed for a reproducible batch.
    #[arg(long)]
    seed: Option<u64>,
    /// Heuristic to compare; repeat for several. Defaults to all.
    #[arg(long = "heuristic", value_enum)]
    heuristics: Vec<Heuristic>,
    /// Give up on a puzzle after this many expansions.
    #[arg(long)]
    max_expansions: Option<usize>,
    /// Also write the report to this file.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Default for BatchArgs {
    fn default() -> Self {
        Self {
            puzzles: DEFAULT_PUZZLES,
            seed: None,
            heuristics: Vec::new(),
            max_expansions: None,
            output: None,
        }
    }
}

/// Failures surfaced to the command line.
#[derive(Error, Debug)]
enum CliError {
    #[error("start cannot reach goal: inversion parities differ\n{start}\n\nvs goal\n{goal}")]
    UnsolvableInput { start: Grid, goal: Grid },

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Batch(args)) => run_batch(args),
        Some(Command::Solve {
            tiles,
            heuristic,
            goal,
            max_expansions,
        }) => run_solve(tiles, goal.unwrap_or(Grid::GOAL), heuristic, max_expansions),
        Some(Command::Check { tiles }) => {
            run_check(tiles);
            Ok(())
        }
        Some(Command::Generate { count, seed }) => {
            run_generate(count, seed);
            Ok(())
        }
        // default: the full heuristic comparison
        None => run_batch(BatchArgs::default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn limits(max_expansions: Option<usize>) -> SearchLimits {
    SearchLimits { max_expansions }
}

/// Builds the library config from command-line arguments.
fn batch_config(args: &BatchArgs) -> BatchConfig {
    let heuristics = if args.heuristics.is_empty() {
        Heuristic::ALL.to_vec()
    } else {
        args.heuristics.clone()
    };

    BatchConfig {
        puzzles: args.puzzles,
        seed: args.seed,
        heuristics,
        limits: limits(args.max_expansions),
    }
}

/// Runs the comparison, prints the report, and saves it when asked.
fn run_batch(args: BatchArgs) -> Result<(), CliError> {
    let report = batch::run_batch(&batch_config(&args));
    print!("{}", report::format_report(&report));

    if let Some(path) = &args.output {
        report::save(path, &report)?;
        println!("\nWrote {}", path.display());
    }

    Ok(())
}

/// Solves one puzzle after checking the start can reach the goal.
fn run_solve(
    start: Grid,
    goal: Grid,
    heuristic: Heuristic,
    max_expansions: Option<usize>,
) -> Result<(), CliError> {
    if !is_solvable_from(&start, &goal) {
        return Err(CliError::UnsolvableInput { start, goal });
    }

    let started = Instant::now();
    let outcome = eight_puzzle::search_with_limits(
        &start,
        &goal,
        heuristic.function(),
        limits(max_expansions),
    )?;
    let elapsed = started.elapsed();

    println!("{start}\n");
    println!("{heuristic} Heuristic:");
    println!("Cost: {}", outcome.cost);
    println!("Expanded nodes: {}", outcome.expanded);
    println!("Generated nodes: {}", outcome.generated);
    println!("Time: {:.4} seconds", elapsed.as_secs_f64());
    Ok(())
}

/// Prints the grid with its inversion parity and heuristic estimates.
fn run_check(grid: Grid) {
    let goal = Grid::GOAL;
    println!("{grid}\n");
    println!("Inversions: {}", inversion_count(&grid));
    println!("Solvable: {}", if is_solvable(&grid) { "yes" } else { "no" });
    println!("Hamming: {}", hamming(&grid, &goal));
    println!("Manhattan: {}", manhattan(&grid, &goal));
}

/// Prints `count` random solvable grids separated by blank lines.
fn run_generate(count: usize, seed: Option<u64>) {
    let mut rng = seeded_rng(seed);
    for i in 0..count {
        if i > 0 {
            println!();
        }
        println!("{}", random_solvable_grid(&mut rng));
    }
}
