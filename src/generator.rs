//! Random puzzle generation.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::{Grid, GRID_SIZE};
use crate::solvability::is_solvable;

/// Builds the batch RNG: reproducible when seeded, from OS entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Uniformly random arrangement of 0..=8, solvable or not.
pub fn random_grid<R: Rng + ?Sized>(rng: &mut R) -> Grid {
    let mut tiles: [u8; GRID_SIZE] = [0, 1, 2, 3, 4, 5, 6, 7, 8];
    tiles.shuffle(rng);
    Grid::from_tiles(tiles).unwrap_or_default()
}

/// Draws random arrangements until one can reach the canonical goal.
///
/// Half of all arrangements are solvable, so this takes two draws on average.
pub fn random_solvable_grid<R: Rng + ?Sized>(rng: &mut R) -> Grid {
    loop {
        let grid = random_grid(rng);
        if is_solvable(&grid) {
            return grid;
        }
    }
}
