//! Board state: an 8x8 grid of optional pieces.

use chess_core::{Color, Move, Piece, Square};
use std::fmt;

/// The contents of one square: a piece and its owner, or `None` when empty.
pub type Occupant = Option<(Piece, Color)>;

/// The position of one game in playback.
///
/// The grid is the only source of truth; there is no separate piece list.
/// Squares are stored rank-major from the eighth rank down, matching
/// [`Square::index`].
///
/// `Board` is a small fixed-size value, so speculative moves are tried on a
/// [`Clone`] and the clone is dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Occupant; 64],
}

impl Board {
    /// Creates a board with no pieces on it.
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// Creates a board set to the standard initial position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    /// Sets the standard initial position, discarding the current one.
    pub fn reset(&mut self) {
        self.squares = [None; 64];
        for color in [Color::White, Color::Black] {
            let home = color.home_row();
            let pawns = color.pawn_row();
            for (col, piece) in Piece::BACK_RANK.iter().enumerate() {
                let col = col as u8;
                if let Some(sq) = Square::from_coords(home, col) {
                    self.set(sq, Some((*piece, color)));
                }
                if let Some(sq) = Square::from_coords(pawns, col) {
                    self.set(sq, Some((Piece::Pawn, color)));
                }
            }
        }
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Occupant {
        self.squares[sq.index() as usize]
    }

    /// Returns true if no piece stands on the square.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Places (or removes, with `None`) a piece on a square.
    #[inline]
    pub fn set(&mut self, sq: Square, occupant: Occupant) {
        self.squares[sq.index() as usize] = occupant;
    }

    /// Removes and returns whatever stands on the square.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Occupant {
        self.squares[sq.index() as usize].take()
    }

    /// Iterates over occupied squares, rank-major from the eighth rank.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|(p, c)| (sq, p, c)))
    }

    /// Returns the square of the first king of the given color found
    /// scanning rank-major, file-minor.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|&(_, piece, c)| piece == Piece::King && c == color)
            .map(|(sq, _, _)| sq)
    }

    /// Applies a move for `color`, mutating the board in place.
    ///
    /// The move is not validated. It is expected to come from
    /// [`san_to_move`](crate::san_to_move); applying a move whose origin is
    /// empty leaves the board unchanged.
    ///
    /// Besides moving the piece this handles:
    /// - en passant: a pawn moving one file sideways onto an empty square
    ///   removes the pawn standing beside its origin, on the destination file;
    /// - promotion: the promotion piece, in the mover's color, is placed
    ///   instead of the pawn;
    /// - castling: a king moving two files also moves the rook from the
    ///   corner on that side to the square the king crossed.
    pub fn apply(&mut self, m: Move, color: Color) {
        let Some((piece, owner)) = self.piece_at(m.from) else {
            return;
        };
        let file_delta = m.to.col() as i8 - m.from.col() as i8;

        if piece == Piece::Pawn && file_delta.abs() == 1 && self.is_empty(m.to) {
            if let Some(captured) = Square::from_coords(m.from.row(), m.to.col()) {
                self.set(captured, None);
            }
        }

        let placed = match m.promotion {
            Some(promotion) => (promotion, color),
            None => (piece, owner),
        };
        self.set(m.to, Some(placed));
        self.set(m.from, None);

        if piece == Piece::King && file_delta.abs() == 2 {
            let (rook_from, rook_to) = if file_delta > 0 { (7, 5) } else { (0, 3) };
            let row = m.from.row();
            if let (Some(corner), Some(crossed)) = (
                Square::from_coords(row, rook_from),
                Square::from_coords(row, rook_to),
            ) {
                if let Some(rook) = self.take(corner) {
                    self.set(crossed, Some(rook));
                }
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Renders the grid as eight lines of glyphs, eighth rank first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            for col in 0..8u8 {
                let glyph = Square::from_coords(row, col)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', |(piece, color)| piece.glyph(color));
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{File, Rank};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn initial_position() {
        let board = Board::new();
        assert_eq!(board.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(board.piece_at(Square::E8), Some((Piece::King, Color::Black)));
        assert_eq!(board.piece_at(Square::D1), Some((Piece::Queen, Color::White)));
        assert_eq!(board.piece_at(Square::B8), Some((Piece::Knight, Color::Black)));
        assert_eq!(board.piece_at(sq("a2")), Some((Piece::Pawn, Color::White)));
        assert_eq!(board.piece_at(sq("h7")), Some((Piece::Pawn, Color::Black)));
        assert_eq!(board.piece_at(Square::new(File::E, Rank::R4)), None);
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn display_initial_position() {
        let expected = "rnbqkbnr\n\
                        pppppppp\n\
                        ........\n\
                        ........\n\
                        ........\n\
                        ........\n\
                        PPPPPPPP\n\
                        RNBQKBNR\n";
        assert_eq!(Board::new().to_string(), expected);
    }

    #[test]
    fn reset_restores_start() {
        let mut board = Board::new();
        board.apply(Move::new(sq("e2"), sq("e4")), Color::White);
        assert_ne!(board, Board::new());
        board.reset();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn king_square() {
        let board = Board::new();
        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }

    #[test]
    fn apply_quiet_move() {
        let mut board = Board::new();
        board.apply(Move::new(sq("g1"), sq("f3")), Color::White);
        assert_eq!(board.piece_at(sq("g1")), None);
        assert_eq!(board.piece_at(sq("f3")), Some((Piece::Knight, Color::White)));
    }

    #[test]
    fn apply_capture_replaces_piece() {
        let mut board = Board::empty();
        board.set(sq("d4"), Some((Piece::Rook, Color::White)));
        board.set(sq("d7"), Some((Piece::Bishop, Color::Black)));
        board.apply(Move::new(sq("d4"), sq("d7")), Color::White);
        assert_eq!(board.piece_at(sq("d7")), Some((Piece::Rook, Color::White)));
        assert_eq!(board.pieces().count(), 1);
    }

    #[test]
    fn apply_en_passant_removes_bypassed_pawn() {
        let mut board = Board::empty();
        board.set(sq("e5"), Some((Piece::Pawn, Color::White)));
        board.set(sq("d5"), Some((Piece::Pawn, Color::Black)));
        board.apply(Move::new(sq("e5"), sq("d6")), Color::White);
        assert_eq!(board.piece_at(sq("d6")), Some((Piece::Pawn, Color::White)));
        assert_eq!(board.piece_at(sq("d5")), None);
        assert_eq!(board.piece_at(sq("e5")), None);
    }

    #[test]
    fn apply_black_en_passant() {
        let mut board = Board::empty();
        board.set(sq("d4"), Some((Piece::Pawn, Color::Black)));
        board.set(sq("e4"), Some((Piece::Pawn, Color::White)));
        board.apply(Move::new(sq("d4"), sq("e3")), Color::Black);
        assert_eq!(board.piece_at(sq("e3")), Some((Piece::Pawn, Color::Black)));
        assert_eq!(board.piece_at(sq("e4")), None);
    }

    #[test]
    fn apply_promotion() {
        let mut board = Board::empty();
        board.set(sq("e7"), Some((Piece::Pawn, Color::White)));
        board.apply(
            Move::with_promotion(sq("e7"), sq("e8"), Piece::Queen),
            Color::White,
        );
        assert_eq!(board.piece_at(sq("e8")), Some((Piece::Queen, Color::White)));
        assert_eq!(board.piece_at(sq("e7")), None);
    }

    #[test]
    fn apply_black_underpromotion() {
        let mut board = Board::empty();
        board.set(sq("b2"), Some((Piece::Pawn, Color::Black)));
        board.set(sq("a1"), Some((Piece::Rook, Color::White)));
        board.apply(
            Move::with_promotion(sq("b2"), sq("a1"), Piece::Knight),
            Color::Black,
        );
        assert_eq!(board.piece_at(sq("a1")), Some((Piece::Knight, Color::Black)));
    }

    #[test]
    fn apply_castling_moves_rook() {
        let mut board = Board::empty();
        board.set(Square::E1, Some((Piece::King, Color::White)));
        board.set(Square::H1, Some((Piece::Rook, Color::White)));
        board.set(Square::A1, Some((Piece::Rook, Color::White)));
        board.apply(Move::new(Square::E1, Square::G1), Color::White);
        assert_eq!(board.piece_at(Square::G1), Some((Piece::King, Color::White)));
        assert_eq!(board.piece_at(Square::F1), Some((Piece::Rook, Color::White)));
        assert_eq!(board.piece_at(Square::H1), None);
        assert_eq!(board.piece_at(Square::A1), Some((Piece::Rook, Color::White)));

        let mut board = Board::empty();
        board.set(Square::E8, Some((Piece::King, Color::Black)));
        board.set(Square::A8, Some((Piece::Rook, Color::Black)));
        board.apply(Move::new(Square::E8, Square::C8), Color::Black);
        assert_eq!(board.piece_at(Square::C8), Some((Piece::King, Color::Black)));
        assert_eq!(board.piece_at(Square::D8), Some((Piece::Rook, Color::Black)));
        assert_eq!(board.piece_at(Square::A8), None);
    }

    #[test]
    fn apply_from_empty_square_is_noop() {
        let mut board = Board::new();
        board.apply(Move::new(sq("e4"), sq("e5")), Color::White);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn clone_is_independent() {
        let original = Board::new();
        let mut trial = original.clone();
        trial.apply(Move::new(sq("e2"), sq("e4")), Color::White);
        assert_eq!(original, Board::new());
        assert_ne!(trial, original);
    }
}
