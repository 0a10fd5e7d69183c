//! Re-exports of the base types used throughout the rules engine.

pub use tilechess_base::grid::{DIAGONAL, KING_STEPS, KNIGHT_JUMPS, ORTHOGONAL};
pub use tilechess_base::types::{KindParseError, PlayerParseError};
pub use tilechess_base::{Grid, GridError, PieceKind, Player, Tile};
