//! Board occupancy data.

use crate::types::{Grid, Player, Tile};

use std::fmt::{self, Display};

/// Per-tile occupancy of the grid. Pure data: the board knows which player
/// holds each tile, never which piece kind stands there.
///
/// A tile is either empty (`None`) or held by one player, so "occupant is
/// only meaningful while the tile is non-empty" holds by construction.
///
/// Accessors do no bounds validation beyond slice indexing; move generators
/// only ever present in-bounds tiles, which they obtain from
/// [`Grid::shift`](crate::types::Grid::shift).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    tiles: Vec<Option<Player>>,
}

impl Board {
    /// Returns an empty board over `grid`.
    pub fn new(grid: Grid) -> Board {
        Board {
            grid,
            tiles: vec![None; grid.count()],
        }
    }

    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[inline]
    pub fn is_empty(&self, tile: Tile) -> bool {
        self.tiles[tile.index()].is_none()
    }

    /// Returns the player holding `tile`, or `None` for an empty tile.
    #[inline]
    pub fn occupant(&self, tile: Tile) -> Option<Player> {
        self.tiles[tile.index()]
    }

    /// Sets the occupancy of `tile`; `None` empties it.
    #[inline]
    pub fn put(&mut self, tile: Tile, occupant: Option<Player>) {
        self.tiles[tile.index()] = occupant;
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in (0..self.grid.rows()).rev() {
            for col in 0..self.grid.cols() {
                let ch = match self.occupant(self.grid.tile(row, col)) {
                    None => '.',
                    Some(p) => p.as_char(),
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
