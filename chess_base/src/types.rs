use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

use derive_more::{From, Into};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerParseError {
    #[error("unexpected player char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum KindParseError {
    #[error("unexpected piece kind char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

/// One of the two players.
///
/// White moves first and its pawns advance towards higher rows; Black's
/// pawns advance towards lower rows.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    pub const fn opponent(&self) -> Player {
        match *self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Returns the signed player index used by the persistence format:
    /// `+1` for White and `-1` for Black.
    pub const fn index(&self) -> i8 {
        match *self {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    pub const fn from_index(val: i8) -> Option<Player> {
        match val {
            1 => Some(Player::White),
            -1 => Some(Player::Black),
            _ => None,
        }
    }

    /// Row direction in which this player's pawns advance.
    pub const fn forward(&self) -> i8 {
        match *self {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    pub fn as_char(&self) -> char {
        match *self {
            Player::White => 'w',
            Player::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Player> {
        match c {
            'w' => Some(Player::White),
            'b' => Some(Player::Black),
            _ => None,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Player {
    type Err = PlayerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(PlayerParseError::BadLength);
        }
        let ch = s.as_bytes()[0] as char;
        Player::from_char(ch).ok_or(PlayerParseError::UnexpectedChar(ch))
    }
}

/// The closed set of piece kinds.
///
/// Move generation dispatches over this tag; there is no open-ended piece
/// hierarchy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// Kinds a pawn may promote to. Never contains a king or a pawn.
    pub const PROMOTABLE: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub const fn is_promotable(&self) -> bool {
        !matches!(*self, PieceKind::Pawn | PieceKind::King)
    }

    pub fn as_char(&self) -> char {
        match *self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for PieceKind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(KindParseError::BadLength);
        }
        let ch = s.as_bytes()[0] as char;
        PieceKind::from_char(ch).ok_or(KindParseError::UnexpectedChar(ch))
    }
}

/// A flattened tile index into the grid.
///
/// The index is row-major: `index = row * cols + col`, where row 0 is
/// White's back rank. All arithmetic over tiles goes through
/// [`Grid`](crate::grid::Grid), which owns the dimensions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
pub struct Tile(u16);

impl Tile {
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn from_index(val: usize) -> Tile {
        assert!(val <= u16::MAX as usize, "tile index too large");
        Tile(val as u16)
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}
