//! Grid representation and move generation for the 8-puzzle.
//!
//! The grid is a flat row-major array of nine tile values where 0 marks the
//! blank. Every `Grid` is a permutation of 0..=8; the only ways to obtain one
//! are the validating constructors and moving the blank of an existing grid.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;

/// Cells per side.
pub const DIM: usize = 3;

/// Total number of cells.
pub const GRID_SIZE: usize = DIM * DIM;

/// A (row, column) cell position.
pub type Coord = (usize, usize);

/// Packed grid identity used by the visited set.
///
/// The first eight cells take one nibble each, cell 0 in the low bits. The
/// ninth cell is implied because the grid is a permutation.
pub type GridKey = u32;

/// Bits per packed cell.
const KEY_BITS_PER_CELL: usize = 4;

/// Mask for a single packed cell.
const KEY_CELL_MASK: GridKey = (1 << KEY_BITS_PER_CELL) - 1;

/// Converts (row, column) to a linear cell index.
///
/// Index order is row-major: `idx = row * DIM + col`.
#[inline(always)]
pub const fn coord_to_idx(row: usize, col: usize) -> usize {
    row * DIM + col
}

/// Converts a linear cell index to (row, column).
#[inline(always)]
pub const fn idx_to_coord(cell_index: usize) -> Coord {
    (cell_index / DIM, cell_index % DIM)
}

/// Finds the blank tile in a raw tile array.
pub fn locate_blank(tiles: &[u8; GRID_SIZE]) -> Result<Coord, GridError> {
    tiles
        .iter()
        .position(|&tile| tile == 0)
        .map(idx_to_coord)
        .ok_or(GridError::MissingBlank)
}

/// The solved arrangement `[[0,1,2],[3,4,5],[6,7,8]]`.
pub const fn goal() -> Grid {
    Grid::GOAL
}

/// Direction the blank moves in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Enumeration order used by `Grid::successors`.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row, column) delta applied to the blank.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// One 8-puzzle configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    tiles: [u8; GRID_SIZE],
    /// Cell index of the 0 tile, kept in sync with `tiles`.
    blank: u8,
}

impl Grid {
    /// The solved arrangement.
    pub const GOAL: Grid = Grid {
        tiles: [0, 1, 2, 3, 4, 5, 6, 7, 8],
        blank: 0,
    };

    /// Builds a grid from three rows.
    pub fn new(rows: [[u8; DIM]; DIM]) -> Result<Self, GridError> {
        let mut tiles = [0u8; GRID_SIZE];
        for (row, values) in rows.iter().enumerate() {
            tiles[row * DIM..(row + 1) * DIM].copy_from_slice(values);
        }
        Self::from_tiles(tiles)
    }

    /// Builds a grid from nine row-major tiles, rejecting anything that is not
    /// a permutation of 0..=8.
    pub fn from_tiles(tiles: [u8; GRID_SIZE]) -> Result<Self, GridError> {
        let mut seen = [false; GRID_SIZE];

        for (cell_index, &value) in tiles.iter().enumerate() {
            let slot = seen.get_mut(value as usize).ok_or_else(|| {
                let (row, col) = idx_to_coord(cell_index);
                GridError::TileOutOfRange { value, row, col }
            })?;
            if *slot {
                return Err(GridError::DuplicateTile { value });
            }
            *slot = true;
        }

        let (row, col) = locate_blank(&tiles)?;
        Ok(Self {
            tiles,
            blank: coord_to_idx(row, col) as u8,
        })
    }

    /// Rebuilds a grid from its packed key.
    pub fn from_key(key: GridKey) -> Result<Self, GridError> {
        let mut tiles = [0u8; GRID_SIZE];
        for (cell_index, tile) in tiles[..GRID_SIZE - 1].iter_mut().enumerate() {
            *tile = ((key >> (cell_index * KEY_BITS_PER_CELL)) & KEY_CELL_MASK) as u8;
        }

        // the last cell holds whichever value the first eight are missing
        let missing = (0..GRID_SIZE as u8)
            .find(|value| !tiles[..GRID_SIZE - 1].contains(value))
            .unwrap_or(GRID_SIZE as u8);
        tiles[GRID_SIZE - 1] = missing;

        Self::from_tiles(tiles)
    }

    /// Position of the blank tile.
    #[inline]
    pub fn blank(&self) -> Coord {
        idx_to_coord(self.blank as usize)
    }

    #[inline]
    pub fn tile(&self, row: usize, col: usize) -> u8 {
        self.tiles[coord_to_idx(row, col)]
    }

    /// Row-major tile values.
    #[inline]
    pub fn tiles(&self) -> &[u8; GRID_SIZE] {
        &self.tiles
    }

    pub fn rows(&self) -> [[u8; DIM]; DIM] {
        let mut rows = [[0u8; DIM]; DIM];
        for (cell_index, &value) in self.tiles.iter().enumerate() {
            let (row, col) = idx_to_coord(cell_index);
            rows[row][col] = value;
        }
        rows
    }

    /// Cell index of every tile value: `positions()[value] == cell_index`.
    pub fn positions(&self) -> [u8; GRID_SIZE] {
        let mut positions = [0u8; GRID_SIZE];
        for (cell_index, &value) in self.tiles.iter().enumerate() {
            positions[value as usize] = cell_index as u8;
        }
        positions
    }

    /// Position of a tile value, or `None` for values outside 0..=8.
    pub fn position_of(&self, value: u8) -> Option<Coord> {
        self.tiles
            .iter()
            .position(|&tile| tile == value)
            .map(idx_to_coord)
    }

    /// Packs the grid into a `GridKey`.
    #[inline]
    pub fn key(&self) -> GridKey {
        self.tiles[..GRID_SIZE - 1]
            .iter()
            .enumerate()
            .fold(0, |key, (cell_index, &tile)| {
                key | (tile as GridKey) << (cell_index * KEY_BITS_PER_CELL)
            })
    }

    /// Moves the blank one cell, or `None` if that leaves the board.
    pub fn apply(&self, direction: Direction) -> Option<Grid> {
        let (row, col) = self.blank();
        let (row_delta, col_delta) = direction.offset();
        let target_row = row.checked_add_signed(row_delta).filter(|&r| r < DIM)?;
        let target_col = col.checked_add_signed(col_delta).filter(|&c| c < DIM)?;
        let target = coord_to_idx(target_row, target_col);

        let mut tiles = self.tiles;
        tiles.swap(self.blank as usize, target);

        Some(Grid {
            tiles,
            blank: target as u8,
        })
    }

    /// All grids one blank move away, in up, down, left, right order.
    pub fn successors(&self) -> Successors {
        let mut successors = Successors {
            grids: [*self; 4],
            len: 0,
        };

        for direction in Direction::ALL {
            if let Some(next) = self.apply(direction) {
                successors.grids[successors.len as usize] = next;
                successors.len += 1;
            }
        }

        successors
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::GOAL
    }
}

/// Neighbouring grids produced by one expansion.
///
/// Fixed capacity keeps expansion allocation-free; a blank has at most four
/// neighbours.
#[derive(Clone, Copy, Debug)]
pub struct Successors {
    grids: [Grid; 4],
    len: u8,
}

impl Successors {
    #[inline]
    pub fn as_slice(&self) -> &[Grid] {
        &self.grids[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Grid> {
        self.as_slice().iter()
    }
}

impl<'a> IntoIterator for &'a Successors {
    type Item = &'a Grid;
    type IntoIter = std::slice::Iter<'a, Grid>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, values) in self.tiles.chunks(DIM).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (col, value) in values.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}

/// Parses nine digits separated by commas, whitespace, or nothing at all,
/// e.g. `"1,2,3,4,0,5,6,7,8"` or `"123 405 678"`.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut values = Vec::with_capacity(GRID_SIZE);

        for token in text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
        {
            // multi-character tokens are runs of single-digit tiles
            for ch in token.chars() {
                let value = ch.to_digit(10).ok_or_else(|| GridError::InvalidToken {
                    token: token.to_string(),
                })?;
                values.push(value as u8);
            }
        }

        let tiles: [u8; GRID_SIZE] = values
            .as_slice()
            .try_into()
            .map_err(|_| GridError::WrongTileCount {
                found: values.len(),
            })?;

        Self::from_tiles(tiles)
    }
}
