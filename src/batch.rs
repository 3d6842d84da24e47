//! Heuristic comparison over a batch of random puzzles.
//!
//! Every puzzle is solved once per selected heuristic so the summaries compare
//! the heuristics on identical inputs.

use std::time::{Duration, Instant};

use crate::generator::{random_solvable_grid, seeded_rng};
use crate::grid::{goal, Grid};
use crate::heuristics::Heuristic;
use crate::solver::{search_with_limits, SearchLimits};

/// Number of puzzles in the default batch.
pub const DEFAULT_PUZZLES: usize = 100;

/// What to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    pub puzzles: usize,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub heuristics: Vec<Heuristic>,
    pub limits: SearchLimits,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            puzzles: DEFAULT_PUZZLES,
            seed: None,
            heuristics: Heuristic::ALL.to_vec(),
            limits: SearchLimits::UNBOUNDED,
        }
    }
}

/// One successful search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trial {
    pub cost: u32,
    pub expanded: usize,
    pub elapsed: Duration,
}

/// Mean and population standard deviation of a sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
}

impl Stats {
    /// Zero for an empty sample.
    pub fn from_samples(samples: impl IntoIterator<Item = f64>) -> Self {
        let samples: Vec<f64> = samples.into_iter().collect();
        if samples.is_empty() {
            return Self::default();
        }

        let count = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / count;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count;

        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }
}

/// Results for one heuristic across the batch.
#[derive(Clone, Debug, PartialEq)]
pub struct HeuristicSummary {
    pub heuristic: Heuristic,
    pub trials: Vec<Trial>,
    /// Searches that ended without a solution.
    pub failed: usize,
}

impl HeuristicSummary {
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            trials: Vec::new(),
            failed: 0,
        }
    }

    pub fn solved(&self) -> usize {
        self.trials.len()
    }

    pub fn cost_stats(&self) -> Stats {
        Stats::from_samples(self.trials.iter().map(|t| t.cost as f64))
    }

    pub fn expanded_stats(&self) -> Stats {
        Stats::from_samples(self.trials.iter().map(|t| t.expanded as f64))
    }

    /// Seconds per search.
    pub fn time_stats(&self) -> Stats {
        Stats::from_samples(self.trials.iter().map(|t| t.elapsed.as_secs_f64()))
    }
}

/// Everything a batch run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchReport {
    pub puzzles: usize,
    pub summaries: Vec<HeuristicSummary>,
}

/// Generates the batch from `config.seed` and runs it.
pub fn run_batch(config: &BatchConfig) -> BatchReport {
    let mut rng = seeded_rng(config.seed);
    let puzzles: Vec<Grid> = (0..config.puzzles)
        .map(|_| random_solvable_grid(&mut rng))
        .collect();

    run_puzzles(&puzzles, &config.heuristics, config.limits)
}

/// Solves each puzzle with each heuristic against the canonical goal.
///
/// Callers must pass solvable puzzles only; an unsolvable one is recorded as a
/// failed trial after the frontier is exhausted.
pub fn run_puzzles(
    puzzles: &[Grid],
    heuristics: &[Heuristic],
    limits: SearchLimits,
) -> BatchReport {
    let goal = goal();
    let mut summaries: Vec<HeuristicSummary> =
        heuristics.iter().map(|&h| HeuristicSummary::new(h)).collect();

    for (index, puzzle) in puzzles.iter().enumerate() {
        log::info!("puzzle {}/{}: {:?}", index + 1, puzzles.len(), puzzle.tiles());

        for summary in &mut summaries {
            let started = Instant::now();
            let result = search_with_limits(puzzle, &goal, summary.heuristic.function(), limits);
            let elapsed = started.elapsed();

            match result {
                Ok(outcome) => summary.trials.push(Trial {
                    cost: outcome.cost,
                    expanded: outcome.expanded,
                    elapsed,
                }),
                Err(error) => {
                    log::warn!("{} failed on puzzle {}: {error}", summary.heuristic, index + 1);
                    summary.failed += 1;
                }
            }
        }
    }

    BatchReport {
        puzzles: puzzles.len(),
        summaries,
    }
}
