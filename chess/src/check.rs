//! Check detection over raw move sets.
//!
//! Detection deliberately works on *raw* moves: asking whether a king is
//! attacked while validating a move must not itself validate moves, or the
//! two would recurse into each other.

use crate::movegen;
use crate::position::Position;
use crate::types::{Player, Tile};

/// Returns `true` when any living piece of `by` could land on `tile` right
/// now.
///
/// Attack moves target the tile only when it is occupied by the other side,
/// so for empty tiles (a king's flight squares) the quiet moves of every
/// non-harmless piece count as threats too.
pub fn is_tile_attacked(pos: &Position, tile: Tile, by: Player) -> bool {
    for (_, piece) in pos.living(by) {
        let ms = movegen::raw_moves(pos.board(), piece);
        if ms.contains_attack(tile) {
            return true;
        }
        if !piece.moves_are_harmless() && ms.contains_move(tile) {
            return true;
        }
    }
    false
}

/// Returns `true` when `player`'s king currently stands in an attack move of
/// the opponent. A position without a king is never in check.
pub fn is_in_check(pos: &Position, player: Player) -> bool {
    let king = match pos.king_of(player) {
        Some(id) if pos.piece(id).alive => id,
        _ => return false,
    };
    let king_tile = pos.piece(king).tile;
    pos.living(player.opponent())
        .any(|(_, piece)| movegen::raw_moves(pos.board(), piece).contains_attack(king_tile))
}
