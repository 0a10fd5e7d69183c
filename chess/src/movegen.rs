//! Raw move generation, one pure generator per piece kind.
//!
//! "Raw" means unvalidated: the results describe where a piece could go by
//! its own geometry, ignoring whether the move would expose its king. Check
//! legality is layered on top in [`legal`](crate::legal).

use crate::board::Board;
use crate::piece::{MoveSet, Piece};
use crate::types::{PieceKind, Tile, DIAGONAL, KING_STEPS, KNIGHT_JUMPS, ORTHOGONAL};

/// Generates the raw move set of `piece` on `board`.
///
/// Every returned tile is in bounds and distinct from the piece's own tile.
pub fn raw_moves(board: &Board, piece: &Piece) -> MoveSet {
    let mut out = MoveSet::new();
    match piece.kind {
        PieceKind::Pawn => gen_pawn(board, piece, &mut out),
        PieceKind::Knight => gen_leaper(board, piece, &KNIGHT_JUMPS, &mut out),
        PieceKind::King => gen_leaper(board, piece, &KING_STEPS, &mut out),
        PieceKind::Rook => gen_slider(board, piece, &ORTHOGONAL, &mut out),
        PieceKind::Bishop => gen_slider(board, piece, &DIAGONAL, &mut out),
        PieceKind::Queen => {
            gen_slider(board, piece, &ORTHOGONAL, &mut out);
            gen_slider(board, piece, &DIAGONAL, &mut out);
        }
    }
    out
}

/// Classifies one candidate tile: empty tiles become quiet moves, tiles held
/// by the opponent become attacks. Returns `true` when the tile blocks
/// further movement in its direction (it is occupied by either side).
fn try_add(board: &Board, piece: &Piece, tile: Tile, out: &mut MoveSet) -> bool {
    match board.occupant(tile) {
        None => {
            out.moves.push(tile);
            false
        }
        Some(holder) => {
            if holder == piece.player.opponent() {
                out.attacks.push(tile);
            }
            true
        }
    }
}

/// Walks each ray tile by tile and stops at the first occupied tile: an
/// opposing piece is captured (and still stops the ray), an own piece stops
/// it silently. A slider never jumps past the first obstruction.
fn gen_slider(board: &Board, piece: &Piece, dirs: &[(i8, i8)], out: &mut MoveSet) {
    let grid = board.grid();
    for &(drow, dcol) in dirs {
        let mut cur = piece.tile;
        while let Some(next) = grid.shift(cur, drow, dcol) {
            if try_add(board, piece, next, out) {
                break;
            }
            cur = next;
        }
    }
}

/// Fixed offsets, each bounds-checked independently. Leapers are never
/// blocked by intervening pieces, only by their destination's occupancy.
fn gen_leaper(board: &Board, piece: &Piece, offsets: &[(i8, i8)], out: &mut MoveSet) {
    let grid = board.grid();
    for &(drow, dcol) in offsets {
        if let Some(tile) = grid.shift(piece.tile, drow, dcol) {
            try_add(board, piece, tile, out);
        }
    }
}

fn gen_pawn(board: &Board, piece: &Piece, out: &mut MoveSet) {
    let grid = board.grid();

    // A pawn on its far rank is terminal: it must be promoted before it can
    // act again.
    if piece.wants_promotion(&grid) {
        return;
    }

    let forward = piece.player.forward();

    // Forward steps can never capture, so they bypass `try_add` entirely.
    if let Some(fwd) = grid.shift(piece.tile, forward, 0) {
        if board.is_empty(fwd) {
            out.moves.push(fwd);
            if !piece.made_first_move {
                if let Some(double) = grid.shift(fwd, forward, 0) {
                    if board.is_empty(double) {
                        out.moves.push(double);
                    }
                }
            }
        }
    }

    // Diagonal steps are capture-only: an empty diagonal yields no move.
    for dcol in [-1, 1] {
        if let Some(diag) = grid.shift(piece.tile, forward, dcol) {
            if board.occupant(diag) == Some(piece.player.opponent()) {
                out.attacks.push(diag);
            }
        }
    }
}
