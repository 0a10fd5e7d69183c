//! Rules engine for two-player chess on parameterized rectangular boards.
//!
//! The crate is a pure library: it answers "which moves are legal", runs the
//! turn state machine and produces a serializable snapshot. It does no
//! rendering, input handling or disk I/O, and it has no notion of search or
//! evaluation.
//!
//! # Examples
//!
//! ```
//! use tilechess::prelude::*;
//!
//! let mut game = Game::standard();
//! let grid = Grid::STANDARD;
//!
//! // White pushes the king's pawn two tiles.
//! let pawn = game.piece_at(grid.tile(1, 4)).unwrap();
//! assert_eq!(game.select(pawn), Selection::Selected);
//! assert_eq!(game.commit(grid.tile(3, 4)), Commit::Moved);
//! assert_eq!(game.turn(), Player::Black);
//! ```

pub mod board;
pub mod check;
pub mod game;
pub mod legal;
pub mod movegen;
pub mod piece;
pub mod position;
pub mod save;
pub mod types;

pub use board::Board;
pub use game::{Commit, Game, Outcome, Selection, SetupError, State, WinReason};
pub use piece::{MoveSet, Piece, PieceId};
pub use position::{Position, Simulation};
pub use save::{RestoreError, SavedGame, SavedPiece};
pub use types::{Grid, GridError, PieceKind, Player, Tile};

/// The most common imports in one place.
pub mod prelude {
    pub use crate::board::Board;
    pub use crate::game::{Commit, Game, Outcome, Selection, State, WinReason};
    pub use crate::piece::{MoveSet, Piece, PieceId};
    pub use crate::position::Position;
    pub use crate::save::{SavedGame, SavedPiece};
    pub use crate::types::{Grid, PieceKind, Player, Tile};
}
