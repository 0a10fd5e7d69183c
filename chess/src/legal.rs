//! Legality validation: raw moves filtered by king safety.

use crate::check;
use crate::movegen;
use crate::piece::{MoveSet, PieceId};
use crate::position::Position;
use crate::types::Tile;

/// Returns the legal destinations of piece `id`: its raw moves minus every
/// move that would leave its own king in check.
///
/// Each candidate is tried on a scratch copy of the position through the
/// simulation protocol, so the caller's position is never mutated.
pub fn legal_moves(pos: &Position, id: PieceId) -> MoveSet {
    let raw = movegen::raw_moves(pos.board(), pos.piece(id));
    if raw.is_empty() {
        return raw;
    }

    let player = pos.piece(id).player;
    let mut scratch = pos.clone();
    let keep = |scratch: &mut Position, target: Tile| {
        let sim = scratch.simulate(id, target);
        !check::is_in_check(&sim, player)
    };

    let mut out = MoveSet::new();
    for &target in &raw.moves {
        if keep(&mut scratch, target) {
            out.moves.push(target);
        }
    }
    for &target in &raw.attacks {
        if keep(&mut scratch, target) {
            out.attacks.push(target);
        }
    }
    out
}
