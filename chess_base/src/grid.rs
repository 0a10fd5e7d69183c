//! Board geometry: dimensions, tile arithmetic and direction tables.

use crate::types::{Player, Tile};

use std::fmt::{self, Display};

use thiserror::Error;

/// Error building a [`Grid`]
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A dimension is smaller than [`Grid::MIN_DIMENSION`]
    #[error("dimension {0} is too small, minimum is 3")]
    DimensionTooSmall(u16),
    /// The total tile count does not fit into a tile index
    #[error("{rows}x{cols} tiles do not fit into a tile index")]
    TooManyTiles { rows: u16, cols: u16 },
}

/// The four axis-aligned ray directions, as `(row, col)` deltas.
pub const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// The four diagonal ray directions.
pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// The eight unit steps around a tile.
pub const KING_STEPS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// The eight knight jump offsets.
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

/// Dimensions of the board and the tile index arithmetic over them.
///
/// Tiles are flattened row-major: `index = row * cols + col`. Row 0 is
/// White's back rank, row `rows - 1` is Black's. Rectangular grids are
/// supported; every directional step is bounds-checked through
/// [`Grid::shift`], so ray walks can never wrap around a row edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: u16,
    cols: u16,
}

impl Grid {
    /// The classic 8x8 board.
    pub const STANDARD: Grid = Grid { rows: 8, cols: 8 };

    /// A board must at least fit a king with a free neighbor on each axis.
    pub const MIN_DIMENSION: u16 = 3;

    pub fn new(rows: u16, cols: u16) -> Result<Grid, GridError> {
        if rows < Self::MIN_DIMENSION {
            return Err(GridError::DimensionTooSmall(rows));
        }
        if cols < Self::MIN_DIMENSION {
            return Err(GridError::DimensionTooSmall(cols));
        }
        if (rows as u32) * (cols as u32) > u16::MAX as u32 + 1 {
            return Err(GridError::TooManyTiles { rows, cols });
        }
        Ok(Grid { rows, cols })
    }

    pub const fn rows(&self) -> u16 {
        self.rows
    }

    pub const fn cols(&self) -> u16 {
        self.cols
    }

    /// Total number of tiles.
    pub const fn count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub const fn tile(&self, row: u16, col: u16) -> Tile {
        assert!(row < self.rows && col < self.cols, "tile out of bounds");
        Tile::from_index(row as usize * self.cols as usize + col as usize)
    }

    pub const fn row_of(&self, tile: Tile) -> u16 {
        (tile.index() / self.cols as usize) as u16
    }

    pub const fn col_of(&self, tile: Tile) -> u16 {
        (tile.index() % self.cols as usize) as u16
    }

    pub const fn contains(&self, tile: Tile) -> bool {
        tile.index() < self.count()
    }

    /// Steps from `tile` by `(drow, dcol)`, returning `None` when the result
    /// would leave the board. The sole stepping primitive of every move
    /// generator.
    pub fn shift(&self, tile: Tile, drow: i8, dcol: i8) -> Option<Tile> {
        let row = self.row_of(tile) as i32 + drow as i32;
        let col = self.col_of(tile) as i32 + dcol as i32;
        if row < 0 || col < 0 || row >= self.rows as i32 || col >= self.cols as i32 {
            return None;
        }
        Some(self.tile(row as u16, col as u16))
    }

    /// The farthest row from `player`'s side: where its pawns promote.
    pub const fn far_rank(&self, player: Player) -> u16 {
        match player {
            Player::White => self.rows - 1,
            Player::Black => 0,
        }
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> {
        (0..self.count()).map(Tile::from_index)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
