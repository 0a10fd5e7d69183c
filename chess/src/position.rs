//! The session state: board plus piece roster, and the simulation protocol
//! used to test hypothetical moves.

use crate::board::Board;
use crate::piece::{Piece, PieceId};
use crate::types::{Player, Tile};

use std::fmt::{self, Display};
use std::ops::Deref;

/// A board together with every piece ever fielded on it.
///
/// The position is passed by reference into move generation, check detection
/// and legality validation; nothing in the engine reaches for global state.
#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    pieces: Vec<Piece>,
    /// Latch for the single-slot simulation protocol. Opening a simulation
    /// while one is in flight is a caller bug and panics.
    simulating: bool,
}

impl Position {
    pub fn new(board: Board) -> Position {
        Position {
            board,
            pieces: Vec::new(),
            simulating: false,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.0]
    }

    /// Adds `piece` to the roster and writes its occupancy onto the board.
    /// Overwrites whatever occupancy the target tile held.
    pub fn spawn(&mut self, piece: Piece) -> PieceId {
        let id = PieceId(self.pieces.len());
        if piece.alive {
            self.board.put(piece.tile, Some(piece.player));
        }
        self.pieces.push(piece);
        id
    }

    /// Returns the living piece standing on `tile`, if any.
    pub fn piece_at(&self, tile: Tile) -> Option<PieceId> {
        self.pieces
            .iter()
            .position(|p| p.alive && p.tile == tile)
            .map(PieceId)
    }

    /// Returns `player`'s king, dead or alive. `None` only for rosters that
    /// never fielded one (possible in unit tests).
    pub fn king_of(&self, player: Player) -> Option<PieceId> {
        self.pieces
            .iter()
            .position(|p| p.player == player && p.is_king())
            .map(PieceId)
    }

    /// Iterates over `player`'s living pieces.
    pub fn living(&self, player: Player) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.alive && p.player == player)
            .map(|(i, p)| (PieceId(i), p))
    }

    /// Commits a relocation of piece `id` to `target`: empties the origin,
    /// deactivates any captured piece, occupies the target and marks the
    /// mover as having moved. Returns the captured piece, if any.
    ///
    /// # Panics
    ///
    /// Panics if a simulation is in flight.
    pub(crate) fn apply_move(&mut self, id: PieceId, target: Tile) -> Option<PieceId> {
        assert!(
            !self.simulating,
            "cannot commit a move while a simulation is in flight"
        );
        let victim = self.piece_at(target);
        if let Some(v) = victim {
            self.pieces[v.0].alive = false;
        }
        let mover = &mut self.pieces[id.0];
        let from = mover.tile;
        let player = mover.player;
        mover.tile = target;
        mover.made_first_move = true;
        self.board.put(from, None);
        self.board.put(target, Some(player));
        victim
    }

    /// Opens a simulation: applies the hypothetical relocation of `id` to
    /// `target` and records exactly what was mutated. The mutation is fully
    /// reverted when the returned guard drops, on every exit path.
    ///
    /// # Panics
    ///
    /// Panics if a simulation is already in flight. (The `&mut` borrow
    /// already prevents nesting statically; the latch catches guards that
    /// were leaked instead of dropped.)
    pub fn simulate(&mut self, id: PieceId, target: Tile) -> Simulation<'_> {
        assert!(!self.simulating, "a simulation is already in flight");
        self.simulating = true;

        let undo = Undo {
            mover: id,
            from: self.pieces[id.0].tile,
            to: target,
            to_occupant: self.board.occupant(target),
            captured: self.piece_at(target),
        };

        if let Some(v) = undo.captured {
            debug_assert_ne!(self.pieces[v.0].player, self.pieces[id.0].player);
            self.pieces[v.0].alive = false;
        }
        let player = self.pieces[id.0].player;
        self.board.put(undo.from, None);
        self.board.put(target, Some(player));
        self.pieces[id.0].tile = target;

        Simulation { pos: self, undo }
    }

    #[cfg(test)]
    pub(crate) fn simulation_open(&self) -> bool {
        self.simulating
    }

    /// True when board occupancy and the piece roster describe the same
    /// arrangement: every living piece stands on a tile it occupies and
    /// every occupied tile holds exactly one living piece.
    pub fn is_consistent(&self) -> bool {
        let grid = self.board.grid();
        let mut occupied = vec![None; grid.count()];
        for piece in self.pieces.iter().filter(|p| p.alive) {
            let idx = piece.tile.index();
            if occupied[idx].is_some() {
                return false;
            }
            occupied[idx] = Some(piece.player);
        }
        grid.tiles().all(|t| self.board.occupant(t) == occupied[t.index()])
    }
}

impl Display for Position {
    /// Renders the board with piece kinds: White uppercase, Black lowercase,
    /// `.` for empty tiles.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let grid = self.board.grid();
        for row in (0..grid.rows()).rev() {
            for col in 0..grid.cols() {
                let ch = match self.piece_at(grid.tile(row, col)) {
                    None => '.',
                    Some(id) => {
                        let p = self.piece(id);
                        match p.player {
                            Player::White => p.kind.as_char(),
                            Player::Black => p.kind.as_char().to_ascii_lowercase(),
                        }
                    }
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Record of everything a simulation mutated, sufficient for exact revert.
#[derive(Debug, Copy, Clone)]
struct Undo {
    mover: PieceId,
    from: Tile,
    to: Tile,
    to_occupant: Option<Player>,
    captured: Option<PieceId>,
}

/// An open simulation. Dereferences to the hypothetical [`Position`] for
/// read-only queries; dropping it restores the position bit-for-bit.
pub struct Simulation<'a> {
    pos: &'a mut Position,
    undo: Undo,
}

impl Deref for Simulation<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.pos
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        let u = self.undo;
        let player = self.pos.pieces[u.mover.0].player;
        self.pos.pieces[u.mover.0].tile = u.from;
        self.pos.board.put(u.from, Some(player));
        self.pos.board.put(u.to, u.to_occupant);
        if let Some(v) = u.captured {
            self.pos.pieces[v.0].alive = true;
        }
        self.pos.simulating = false;
    }
}
