//! PGN Replay - plays back chess games from PGN files in the terminal.
//!
//! # Modules
//!
//! - [`config`] - `replay.toml` settings
//! - [`library`] - discovery of PGN files in a directory
//! - [`pgn`] - splitting PGN files into games and reading their tags
//! - [`render`] - plain-text board rendering

pub mod config;
pub mod library;
pub mod pgn;
pub mod render;
