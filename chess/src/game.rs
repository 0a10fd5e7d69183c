//! The turn controller: an explicit state machine over a [`Position`].
//!
//! The machine cycles `AwaitingSelection` -> `PieceSelected` -> back, with a
//! detour through `AwaitingPromotion` when a pawn reaches its far rank, and
//! terminates in `Over`. Invalid gameplay input (wrong player's piece, a
//! destination outside the legal set) never errors: it is ignored and the
//! state is left unchanged. Misuse of the protocol itself panics.

use crate::board::Board;
use crate::check;
use crate::legal;
use crate::piece::{MoveSet, Piece, PieceId};
use crate::position::Position;
use crate::types::{Grid, PieceKind, Player, Tile};

use thiserror::Error;

/// Error building a [`Game`] from an explicit piece list
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// A piece stands outside the grid
    #[error("tile {0} is out of bounds")]
    OutOfBounds(Tile),
    /// Two living pieces stand on the same tile
    #[error("tile {0} is occupied twice")]
    TileOccupied(Tile),
    /// A player has no living king
    #[error("player {0} has no king")]
    NoKing(Player),
    /// A player has more than one living king
    #[error("player {0} has more than one king")]
    TooManyKings(Player),
}

/// Phase of the turn state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Waiting for the player to move to pick one of their pieces.
    AwaitingSelection,
    /// A piece is selected and its legal destinations are computed.
    PieceSelected { id: PieceId, legal: MoveSet },
    /// A pawn reached its far rank; the machine waits, indefinitely, for the
    /// replacement kind. The turn has not ended yet.
    AwaitingPromotion { id: PieceId },
    /// The game ended. Every further gameplay call is a no-op.
    Over(Outcome),
}

/// How a finished game ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Player,
    pub reason: WinReason,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WinReason {
    /// The player to move was in check with no legal move anywhere.
    Checkmate,
    /// A king was captured outright.
    KingCaptured,
}

/// Result of [`Game::select`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The piece is now selected; its destinations are available through
    /// [`Game::legal_destinations`].
    Selected,
    /// The input was invalid for the current state and was ignored.
    Ignored,
    /// The selection revealed that the player to move has no legal move while
    /// in check. The game is now over.
    Checkmate,
}

/// Result of [`Game::commit`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Commit {
    /// The selected piece moved to an empty tile and the turn passed.
    Moved,
    /// The selected piece captured an opposing piece and the turn passed.
    Captured,
    /// A pawn reached its far rank; the turn will pass once a replacement
    /// kind is chosen through [`Game::promote`].
    PromotionPending,
    /// The move captured the opposing king. The game is over on the spot,
    /// with no further turn bookkeeping.
    KingCaptured,
    /// The input was invalid for the current state and was ignored.
    Ignored,
}

#[inline]
fn side(player: Player) -> usize {
    match player {
        Player::White => 0,
        Player::Black => 1,
    }
}

/// A full two-player game.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    turn: Player,
    in_check: [bool; 2],
    move_count: u32,
    state: State,
}

impl PartialEq for Game {
    fn eq(&self, other: &Game) -> bool {
        self.position.pieces() == other.position.pieces()
            && self.position.board() == other.position.board()
            && self.turn == other.turn
            && self.in_check == other.in_check
            && self.move_count == other.move_count
            && self.state == other.state
    }
}

impl Game {
    /// Builds a game from an explicit piece list.
    ///
    /// Validates that every piece is in bounds, no two living pieces share a
    /// tile and each player has exactly one living king. Check flags are
    /// derived from the resulting position.
    pub fn new(grid: Grid, pieces: Vec<Piece>, turn: Player) -> Result<Game, SetupError> {
        let mut position = Position::new(Board::new(grid));
        let mut kings = [0u32; 2];
        for piece in pieces {
            if !grid.contains(piece.tile) {
                return Err(SetupError::OutOfBounds(piece.tile));
            }
            if piece.alive {
                if !position.board().is_empty(piece.tile) {
                    return Err(SetupError::TileOccupied(piece.tile));
                }
                if piece.is_king() {
                    kings[side(piece.player)] += 1;
                }
            }
            position.spawn(piece);
        }
        for player in [Player::White, Player::Black] {
            match kings[side(player)] {
                0 => return Err(SetupError::NoKing(player)),
                1 => {}
                _ => return Err(SetupError::TooManyKings(player)),
            }
        }
        let in_check = [
            check::is_in_check(&position, Player::White),
            check::is_in_check(&position, Player::Black),
        ];
        Ok(Game {
            position,
            turn,
            in_check,
            move_count: 1,
            state: State::AwaitingSelection,
        })
    }

    /// The classic starting arrangement on the 8x8 board, White to move.
    pub fn standard() -> Game {
        const BACK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let g = Grid::STANDARD;
        let mut pieces = Vec::with_capacity(32);
        for (col, &kind) in BACK.iter().enumerate() {
            let col = col as u16;
            pieces.push(Piece::new(kind, Player::White, g.tile(0, col)));
            pieces.push(Piece::new(PieceKind::Pawn, Player::White, g.tile(1, col)));
            pieces.push(Piece::new(PieceKind::Pawn, Player::Black, g.tile(6, col)));
            pieces.push(Piece::new(kind, Player::Black, g.tile(7, col)));
        }
        Game::new(g, pieces, Player::White).expect("standard arrangement is valid")
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[inline]
    pub fn in_check(&self, player: Player) -> bool {
        self.in_check[side(player)]
    }

    /// Number of the move being played, starting at 1.
    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub(crate) fn set_move_count(&mut self, count: u32) {
        self.move_count = count;
    }

    #[inline]
    pub fn state(&self) -> &State {
        &self.state
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        matches!(self.state, State::Over(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            State::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The currently selected piece, if any.
    pub fn selected(&self) -> Option<PieceId> {
        match self.state {
            State::PieceSelected { id, .. } => Some(id),
            _ => None,
        }
    }

    /// The legal destinations of the selected piece, for highlighting.
    pub fn legal_destinations(&self) -> Option<&MoveSet> {
        match &self.state {
            State::PieceSelected { legal, .. } => Some(legal),
            _ => None,
        }
    }

    /// The player owed a promotion choice, if the machine is parked in
    /// `AwaitingPromotion`.
    pub fn promotion_player(&self) -> Option<Player> {
        match self.state {
            State::AwaitingPromotion { id } => Some(self.position.piece(id).player),
            _ => None,
        }
    }

    pub fn piece_at(&self, tile: Tile) -> Option<PieceId> {
        self.position.piece_at(tile)
    }

    /// Selects piece `id` for the player to move and computes its legal
    /// destinations.
    ///
    /// Ignored when the game is over, a promotion is pending, the piece is
    /// dead or belongs to the opponent, or the piece is already the current
    /// selection. Selecting a different own piece replaces the selection.
    ///
    /// When the mover is in check and the chosen piece has no legal move,
    /// every other living piece of that player is scanned; if none has one
    /// either, the game ends in checkmate.
    pub fn select(&mut self, id: PieceId) -> Selection {
        match self.state {
            State::Over(_) | State::AwaitingPromotion { .. } => return Selection::Ignored,
            State::PieceSelected { id: current, .. } if current == id => {
                return Selection::Ignored
            }
            _ => {}
        }
        let piece = self.position.piece(id);
        if !piece.alive || piece.player != self.turn {
            return Selection::Ignored;
        }

        let legal = legal::legal_moves(&self.position, id);
        if legal.is_empty() && self.in_check(self.turn) && !self.any_legal_move(self.turn) {
            self.state = State::Over(Outcome {
                winner: self.turn.opponent(),
                reason: WinReason::Checkmate,
            });
            return Selection::Checkmate;
        }

        self.state = State::PieceSelected { id, legal };
        Selection::Selected
    }

    /// Moves the selected piece to `target`.
    ///
    /// Ignored unless a piece is selected and `target` is one of its legal
    /// destinations. Capturing the king ends the game immediately; a pawn
    /// arriving on its far rank parks the machine until [`Game::promote`] is
    /// called; any other move passes the turn.
    pub fn commit(&mut self, target: Tile) -> Commit {
        let (id, quiet, capture) = match &self.state {
            State::PieceSelected { id, legal } => (
                *id,
                legal.contains_move(target),
                legal.contains_attack(target),
            ),
            _ => return Commit::Ignored,
        };
        if !quiet && !capture {
            return Commit::Ignored;
        }

        let mover = self.turn;
        let victim = self.position.apply_move(id, target);
        if let Some(v) = victim {
            if self.position.piece(v).is_king() {
                self.state = State::Over(Outcome {
                    winner: mover,
                    reason: WinReason::KingCaptured,
                });
                return Commit::KingCaptured;
            }
        }

        let grid = self.position.board().grid();
        if self.position.piece(id).wants_promotion(&grid) {
            self.state = State::AwaitingPromotion { id };
            return Commit::PromotionPending;
        }

        self.finish_turn();
        if capture {
            Commit::Captured
        } else {
            Commit::Moved
        }
    }

    /// Replaces the pawn awaiting promotion with a fresh piece of `kind` on
    /// the same tile, then passes the turn. Returns `false` without any
    /// effect when `kind` is not promotable (king or pawn).
    ///
    /// # Panics
    ///
    /// Panics when no promotion is pending and the game is not over. Calling
    /// this anywhere but `AwaitingPromotion` is a caller bug, not gameplay
    /// input.
    pub fn promote(&mut self, kind: PieceKind) -> bool {
        let id = match self.state {
            State::AwaitingPromotion { id } => id,
            State::Over(_) => return false,
            _ => panic!("no promotion is pending"),
        };
        if !kind.is_promotable() {
            return false;
        }

        let pawn = self.position.piece(id);
        let (player, tile) = (pawn.player, pawn.tile);
        self.position.piece_mut(id).alive = false;
        let mut replacement = Piece::new(kind, player, tile);
        replacement.made_first_move = true;
        self.position.spawn(replacement);

        self.finish_turn();
        true
    }

    /// End-of-turn bookkeeping, run exactly once per completed move: the
    /// mover cannot still be in check (the validator filtered those moves),
    /// the opponent's flag is recomputed, the move counter advances and the
    /// turn flips.
    fn finish_turn(&mut self) {
        let mover = self.turn;
        let opponent = mover.opponent();
        self.in_check[side(mover)] = false;
        self.in_check[side(opponent)] = check::is_in_check(&self.position, opponent);
        self.move_count += 1;
        self.turn = opponent;
        self.state = State::AwaitingSelection;
    }

    fn any_legal_move(&self, player: Player) -> bool {
        self.position
            .living(player)
            .any(|(id, _)| !legal::legal_moves(&self.position, id).is_empty())
    }
}
