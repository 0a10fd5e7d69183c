//! Pieces and their generated move sets.

use crate::types::{Grid, PieceKind, Player, Tile};

/// Handle to a piece in a [`Position`](crate::position::Position) roster.
///
/// Ids are stable for the lifetime of a game: captured and promoted-away
/// pieces keep their slot with `alive == false`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PieceId(pub(crate) usize);

impl PieceId {
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// Full state of one piece.
///
/// Everything that is persisted lives here. Per-kind predicates (king,
/// harmless moves, promotion pending) are derived from `kind` rather than
/// stored, so they can never fall out of sync with it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub player: Player,
    /// The tile this piece stands on. Mutated on every committed move and
    /// every simulated move.
    pub tile: Tile,
    pub made_first_move: bool,
    /// Cleared when the piece is captured or promoted away.
    pub alive: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, player: Player, tile: Tile) -> Piece {
        Piece {
            kind,
            player,
            tile,
            made_first_move: false,
            alive: true,
        }
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }

    /// A pawn's quiet moves never attack anything: its forward steps cannot
    /// capture, so they are excluded from attack aggregation.
    #[inline]
    pub fn moves_are_harmless(&self) -> bool {
        self.kind == PieceKind::Pawn
    }

    /// True for a pawn standing on its far rank: it has a pending post-move
    /// action (promotion) and generates no moves until it is replaced.
    #[inline]
    pub fn wants_promotion(&self, grid: &Grid) -> bool {
        self.kind == PieceKind::Pawn && grid.row_of(self.tile) == grid.far_rank(self.player)
    }
}

/// The destinations generated for one piece: quiet moves onto empty tiles
/// and attack moves onto tiles held by the opponent.
///
/// A `MoveSet` is built from scratch on each generation call and describes
/// the board as it was at that instant; it is stale the moment the board
/// changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveSet {
    pub moves: Vec<Tile>,
    pub attacks: Vec<Tile>,
}

impl MoveSet {
    pub fn new() -> MoveSet {
        MoveSet::default()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.attacks.is_empty()
    }

    pub fn contains_move(&self, tile: Tile) -> bool {
        self.moves.contains(&tile)
    }

    pub fn contains_attack(&self, tile: Tile) -> bool {
        self.attacks.contains(&tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_flags() {
        let g = Grid::STANDARD;
        let pawn = Piece::new(PieceKind::Pawn, Player::White, g.tile(1, 0));
        assert!(pawn.moves_are_harmless());
        assert!(!pawn.is_king());
        assert!(!pawn.wants_promotion(&g));

        let king = Piece::new(PieceKind::King, Player::White, g.tile(0, 4));
        assert!(king.is_king());
        assert!(!king.moves_are_harmless());

        let promoting = Piece::new(PieceKind::Pawn, Player::White, g.tile(7, 2));
        assert!(promoting.wants_promotion(&g));
        let black_promoting = Piece::new(PieceKind::Pawn, Player::Black, g.tile(0, 2));
        assert!(black_promoting.wants_promotion(&g));

        // A rook on the far rank has no post-move action.
        let rook = Piece::new(PieceKind::Rook, Player::White, g.tile(7, 0));
        assert!(!rook.wants_promotion(&g));
    }

    #[test]
    fn test_move_set() {
        let g = Grid::STANDARD;
        let mut ms = MoveSet::new();
        assert!(ms.is_empty());
        ms.moves.push(g.tile(2, 2));
        ms.attacks.push(g.tile(3, 3));
        assert!(!ms.is_empty());
        assert!(ms.contains_move(g.tile(2, 2)));
        assert!(!ms.contains_move(g.tile(3, 3)));
        assert!(ms.contains_attack(g.tile(3, 3)));
    }
}
