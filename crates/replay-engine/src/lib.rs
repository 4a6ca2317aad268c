//! Chess rule engine for replaying games recorded in PGN.
//!
//! This crate provides:
//! - [`Board`] - an 8x8 grid of optional pieces with move application
//! - [`validate`] - pseudo-legal movement rules and check detection
//! - [`san`] - resolution of SAN tokens to concrete moves
//! - [`movetext`] - PGN movetext cleaning and tokenization
//! - [`Replay`] - a ply-by-ply playback session
//!
//! The engine trusts that its input describes a legal game. It validates
//! only enough to pick the right piece for each SAN token: castling is not
//! checked against attacked squares, and a board without a king is simply
//! never in check.
//!
//! # Example
//!
//! ```
//! use replay_engine::{KingPresentation, Replay};
//! use chess_core::Color;
//!
//! let mut replay = Replay::new("1. f3 e5 2. g4 Qh4# 0-1", None);
//! replay.play_to_end().unwrap();
//! assert!(replay.is_check(Color::White));
//! assert_eq!(replay.final_presentation(), KingPresentation::Loser(Color::White));
//! ```

mod board;
pub mod movetext;
mod replay;
mod result;
pub mod san;
pub mod validate;

pub use board::{Board, Occupant};
pub use movetext::{clean_line, extract_san_token, tokenize, Movetext, MovetextCleaner};
pub use replay::{KingPresentation, Replay, ReplayError};
pub use result::GameResult;
pub use san::{san_to_move, SanError};
pub use validate::{clear_path, is_in_check, is_pseudo_legal};
