//! Core types for chess.
//!
//! This crate provides the fundamental value types used by the replay engine:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for move representation

mod color;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use mov::Move;
pub use piece::Piece;
pub use square::{File, Rank, Square};
