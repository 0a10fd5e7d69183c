//! The serializable game snapshot and its validated restore path.
//!
//! The snapshot is plain data at the persistence boundary; how it reaches
//! disk is the host application's business. Per-piece predicates that are
//! derivable from the kind are not stored, so a snapshot cannot claim a
//! harmless king or a promotable pawn.

use crate::game::{Game, SetupError};
use crate::piece::Piece;
use crate::types::{Grid, GridError, PieceKind, Player, Tile};

use thiserror::Error;

/// Error restoring a [`Game`] from a [`SavedGame`]
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RestoreError {
    /// The saved dimensions do not form a valid grid
    #[error("bad grid: {0}")]
    Grid(#[from] GridError),
    /// A player index is neither `+1` nor `-1`
    #[error("bad player index {0}")]
    BadPlayerIndex(i8),
    /// A saved tile lies outside the saved grid
    #[error("tile {0} is out of bounds")]
    OutOfBounds(Tile),
    /// A living pawn stands on its far rank; the save predates the
    /// promotion choice and cannot be resumed
    #[error("unpromoted pawn on tile {0}")]
    PawnUnpromoted(Tile),
    /// The piece list does not form a playable arrangement
    #[error("bad arrangement: {0}")]
    Setup(#[from] SetupError),
}

/// Snapshot of one piece. The player is encoded as `+1` (White) / `-1`
/// (Black), the historical on-disk convention.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SavedPiece {
    pub kind: PieceKind,
    pub player: i8,
    pub tile: u16,
    pub made_first_move: bool,
    pub alive: bool,
}

/// Complete snapshot of a game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGame {
    pub rows: u16,
    pub cols: u16,
    /// Player to move, `+1` / `-1`.
    pub turn: i8,
    pub move_count: u32,
    pub pieces: Vec<SavedPiece>,
}

impl Game {
    /// Captures the complete game state as plain data. Check flags are not
    /// stored; [`Game::restore`] re-derives them from the position.
    pub fn save(&self) -> SavedGame {
        let grid = self.position().board().grid();
        SavedGame {
            rows: grid.rows(),
            cols: grid.cols(),
            turn: self.turn().index(),
            move_count: self.move_count(),
            pieces: self
                .position()
                .pieces()
                .iter()
                .map(|p| SavedPiece {
                    kind: p.kind,
                    player: p.player.index(),
                    tile: p.tile.into(),
                    made_first_move: p.made_first_move,
                    alive: p.alive,
                })
                .collect(),
        }
    }

    /// Rebuilds a game from a snapshot, validating every field: the board is
    /// repopulated purely from the living pieces' tiles and both check flags
    /// are re-derived.
    pub fn restore(saved: &SavedGame) -> Result<Game, RestoreError> {
        let grid = Grid::new(saved.rows, saved.cols)?;
        let turn = Player::from_index(saved.turn).ok_or(RestoreError::BadPlayerIndex(saved.turn))?;

        let mut pieces = Vec::with_capacity(saved.pieces.len());
        for sp in &saved.pieces {
            let player =
                Player::from_index(sp.player).ok_or(RestoreError::BadPlayerIndex(sp.player))?;
            let tile = Tile::from(sp.tile);
            if !grid.contains(tile) {
                return Err(RestoreError::OutOfBounds(tile));
            }
            let piece = Piece {
                kind: sp.kind,
                player,
                tile,
                made_first_move: sp.made_first_move,
                alive: sp.alive,
            };
            if piece.alive && piece.wants_promotion(&grid) {
                return Err(RestoreError::PawnUnpromoted(tile));
            }
            pieces.push(piece);
        }

        let mut game = Game::new(grid, pieces, turn)?;
        game.set_move_count(saved.move_count);
        Ok(game)
    }
}
