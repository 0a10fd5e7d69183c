//! # Base types for tilechess
//!
//! This is an auxiliary crate for `tilechess`, holding the leaf types: players,
//! piece kinds, tiles and the board geometry. It carries no game rules.
//!
//! Normally you don't want to use this crate directly. Use `tilechess` instead.

pub mod grid;
pub mod types;

pub use grid::{Grid, GridError};
pub use types::{PieceKind, Player, Tile};
