//! Ply-by-ply playback of one game.

use crate::movetext::{tokenize, Movetext};
use crate::san::{san_to_move, SanError};
use crate::validate::is_in_check;
use crate::{Board, GameResult};
use chess_core::{Color, Move};
use thiserror::Error;

/// Error type for replay operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplayError {
    /// A SAN token did not resolve to a move. `ply` is the one-based number
    /// of the failing ply.
    #[error("cannot play ply {ply} ({san}): {source}")]
    Parse {
        ply: usize,
        san: String,
        #[source]
        source: SanError,
    },
}

/// How the kings should be shown once a game has been played through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KingPresentation {
    /// The loser's king is toppled.
    Loser(Color),
    /// Both kings are tilted toward each other.
    Draw,
    /// Both kings stand as usual.
    Upright,
}

/// A playback session: one game's moves and the board they act on.
///
/// The session owns its board exclusively. Once a token fails to parse the
/// session is halted: [`step`](Replay::step) keeps returning that failure
/// until [`seek`](Replay::seek) rewinds.
#[derive(Debug, Clone)]
pub struct Replay {
    board: Board,
    movetext: Movetext,
    result: Option<GameResult>,
    ply: usize,
    halted: Option<ReplayError>,
}

impl Replay {
    /// Tokenizes a movetext buffer and sets up the start position.
    ///
    /// `header_result` is the value of the game's `Result` tag, used only
    /// when the movetext itself has no result token.
    pub fn new(movetext: &str, header_result: Option<&str>) -> Self {
        Self::from_movetext(tokenize(movetext), header_result)
    }

    /// Creates a session from already tokenized movetext.
    pub fn from_movetext(movetext: Movetext, header_result: Option<&str>) -> Self {
        let result = movetext.effective_result(header_result);
        Replay {
            board: Board::new(),
            movetext,
            result,
            ply: 0,
            halted: None,
        }
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the number of plies played so far.
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Returns the number of SAN tokens in the game.
    pub fn len(&self) -> usize {
        self.movetext.len()
    }

    /// Returns true if the game has no moves.
    pub fn is_empty(&self) -> bool {
        self.movetext.is_empty()
    }

    /// Returns the SAN tokens in play order.
    pub fn tokens(&self) -> &[String] {
        &self.movetext.tokens
    }

    /// Returns the game result, if known.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Returns the color whose turn it is.
    pub fn side_to_move(&self) -> Color {
        Color::for_ply(self.ply)
    }

    /// Returns the token that the next [`step`](Replay::step) will play.
    pub fn next_san(&self) -> Option<&str> {
        self.movetext.tokens.get(self.ply).map(String::as_str)
    }

    /// Returns true once every ply has been played.
    pub fn is_finished(&self) -> bool {
        self.ply >= self.len()
    }

    /// Returns the failure that halted the session, if any.
    pub fn halted(&self) -> Option<&ReplayError> {
        self.halted.as_ref()
    }

    /// Returns true if the king of `color` is attacked on the current board.
    pub fn is_check(&self, color: Color) -> bool {
        is_in_check(&self.board, color)
    }

    /// Plays the next ply.
    ///
    /// Returns `Ok(None)` when all plies have been played.
    pub fn step(&mut self) -> Result<Option<Move>, ReplayError> {
        if let Some(err) = &self.halted {
            return Err(err.clone());
        }
        let color = self.side_to_move();
        let Some(san) = self.movetext.tokens.get(self.ply) else {
            return Ok(None);
        };

        match san_to_move(&self.board, san, color) {
            Ok(m) => {
                self.board.apply(m, color);
                self.ply += 1;
                tracing::debug!(ply = self.ply, %color, san = %san, mv = %m, "applied move");
                Ok(Some(m))
            }
            Err(source) => {
                let err = ReplayError::Parse {
                    ply: self.ply + 1,
                    san: san.clone(),
                    source,
                };
                tracing::warn!("{}", err);
                self.halted = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Resets the board and replays the first `index` plies.
    ///
    /// An index past the end plays the whole game. On a parse failure the
    /// board is left at the last position reached and the error is returned.
    pub fn seek(&mut self, index: usize) -> Result<(), ReplayError> {
        self.board.reset();
        self.ply = 0;
        self.halted = None;

        let target = index.min(self.len());
        while self.ply < target {
            self.step()?;
        }
        Ok(())
    }

    /// Plays every remaining ply, stopping at the first failure.
    pub fn play_to_end(&mut self) -> Result<(), ReplayError> {
        while self.step()?.is_some() {}
        Ok(())
    }

    /// Returns how the kings should be shown.
    ///
    /// Only a game played through to its last ply gets a toppled or tilted
    /// king; a halted or unfinished playback is [`KingPresentation::Upright`].
    pub fn final_presentation(&self) -> KingPresentation {
        if !self.is_finished() || self.halted.is_some() {
            return KingPresentation::Upright;
        }
        match self.result {
            Some(result) if result.is_draw() => KingPresentation::Draw,
            Some(result) => result
                .loser()
                .map_or(KingPresentation::Upright, KingPresentation::Loser),
            None => KingPresentation::Upright,
        }
    }
}
