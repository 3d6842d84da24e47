//! Inversion-parity reachability test.
//!
//! On a board of odd width a move never changes the parity of the inversion
//! count, so two grids are mutually reachable iff their parities match. The
//! goal has zero inversions.

use crate::grid::{Grid, GRID_SIZE};

/// Pairs of non-blank tiles that appear in the wrong relative order when the
/// grid is read row by row.
pub fn inversion_count(grid: &Grid) -> usize {
    let mut values = [0u8; GRID_SIZE - 1];
    let mut len = 0;
    for &tile in grid.tiles().iter().filter(|&&tile| tile != 0) {
        values[len] = tile;
        len += 1;
    }

    let values = &values[..len];
    values
        .iter()
        .enumerate()
        .map(|(i, &earlier)| values[i + 1..].iter().filter(|&&later| earlier > later).count())
        .sum()
}

/// True iff the grid can reach the canonical goal.
pub fn is_solvable(grid: &Grid) -> bool {
    inversion_count(grid) % 2 == 0
}

/// True iff `start` can reach `goal`.
pub fn is_solvable_from(start: &Grid, goal: &Grid) -> bool {
    inversion_count(start) % 2 == inversion_count(goal) % 2
}
