//! 8-Puzzle Solver Library
//!
//! A* search over 3x3 sliding-tile puzzles with Hamming and Manhattan
//! heuristics, plus the batch driver that compares them on random puzzles.

pub mod batch;
pub mod error;
pub mod generator;
pub mod grid;
pub mod heuristics;
pub mod report;
pub mod solvability;
pub mod solver;

pub use error::{GridError, SearchError};
pub use grid::{goal, Grid};
pub use heuristics::{hamming, manhattan, Heuristic, HeuristicFn};
pub use solvability::is_solvable;
pub use solver::{search, search_with_limits, SearchLimits, SearchOutcome};
