//! Admissible distance estimates for A*.
//!
//! Both heuristics are consistent: a single move changes either estimate by at
//! most one, so the first time the solver pops a grid its cost is optimal.

use std::fmt;

use clap::ValueEnum;

use crate::grid::{idx_to_coord, Grid};

/// Signature shared by every heuristic: `(grid, goal) -> estimate`.
pub type HeuristicFn = fn(&Grid, &Grid) -> u32;

/// Number of non-blank tiles not on their goal cell.
pub fn hamming(grid: &Grid, goal: &Grid) -> u32 {
    grid.tiles()
        .iter()
        .zip(goal.tiles())
        .filter(|&(&tile, &target)| tile != 0 && tile != target)
        .count() as u32
}

/// Sum over non-blank tiles of the row plus column distance to the tile's
/// goal cell.
pub fn manhattan(grid: &Grid, goal: &Grid) -> u32 {
    let goal_positions = goal.positions();

    grid.tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != 0)
        .map(|(cell_index, &tile)| {
            let (row, col) = idx_to_coord(cell_index);
            let (goal_row, goal_col) = idx_to_coord(goal_positions[tile as usize] as usize);
            (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32
        })
        .sum()
}

/// Selects one of the built-in heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Heuristic {
    /// Misplaced tiles.
    Hamming,
    /// Sum of tile displacements.
    Manhattan,
}

impl Heuristic {
    /// Every heuristic, in report order.
    pub const ALL: [Heuristic; 2] = [Heuristic::Hamming, Heuristic::Manhattan];

    pub const fn name(self) -> &'static str {
        match self {
            Heuristic::Hamming => "Hamming",
            Heuristic::Manhattan => "Manhattan",
        }
    }

    pub const fn function(self) -> HeuristicFn {
        match self {
            Heuristic::Hamming => hamming,
            Heuristic::Manhattan => manhattan,
        }
    }

    #[inline]
    pub fn estimate(self, grid: &Grid, goal: &Grid) -> u32 {
        (self.function())(grid, goal)
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
