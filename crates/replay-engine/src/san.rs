//! Standard Algebraic Notation (SAN) resolution.
//!
//! A SAN token names a destination and a piece type, plus whatever hint is
//! needed to tell apart several pieces of that type. Resolving it against a
//! board and a side to move yields the concrete origin.
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q", "Nbd2", "R1e1"

use crate::validate::{is_in_check, is_pseudo_legal};
use crate::Board;
use chess_core::{Color, File, Move, Piece, Rank, Square};
use thiserror::Error;

/// Errors returned when a SAN token cannot be resolved to a move.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanError {
    #[error("empty SAN string")]
    Empty,

    #[error("invalid destination square in {0:?}")]
    InvalidSquare(String),

    #[error("invalid piece letter '{piece}' in {san:?}")]
    UnknownPiece { piece: char, san: String },

    #[error("invalid promotion in {0:?}")]
    InvalidPromotion(String),

    #[error("invalid disambiguation in {0:?}")]
    InvalidDisambiguation(String),

    #[error("no piece can make the move {0:?}")]
    NoMatchingMove(String),

    #[error("every candidate for {0:?} leaves the king in check")]
    KingLeftInCheck(String),
}

/// Resolves a SAN token into a move for `color` on `board`.
///
/// Trailing `+`/`#` decoration is ignored. Castling (`O-O`, `O-O-O`, or the
/// `0-0` spellings) maps straight to the king's two-file move on its home
/// row without looking at the board; [`Board::apply`] moves the rook.
///
/// For other moves every piece of the named type and color is a candidate
/// if it matches the disambiguation hint and can pseudo-legally reach the
/// destination. A single candidate is accepted as is. With several, each is
/// tried on a copy of the board and the first one that does not leave the
/// mover's king in check wins.
///
/// The board is never modified.
pub fn san_to_move(board: &Board, san: &str, color: Color) -> Result<Move, SanError> {
    let san = san.trim().trim_end_matches(|c: char| c == '+' || c == '#');
    if san.is_empty() {
        return Err(SanError::Empty);
    }

    if let Some(m) = castling_move(san, color) {
        return Ok(m);
    }

    let parsed = parse_san_components(san)?;
    find_matching_move(board, color, &parsed, san)
}

/// Parsed components of a SAN string.
#[derive(Debug, PartialEq, Eq)]
struct ParsedSan {
    piece: Piece,
    from_file: Option<File>,
    from_rank: Option<Rank>,
    to_square: Square,
    promotion: Option<Piece>,
    is_capture: bool,
}

fn castling_move(san: &str, color: Color) -> Option<Move> {
    let to_col = match san {
        "O-O" | "0-0" => 6,
        "O-O-O" | "0-0-0" => 2,
        _ => return None,
    };
    let row = color.home_row();
    Some(Move::new(
        Square::from_coords(row, 4)?,
        Square::from_coords(row, to_col)?,
    ))
}

fn parse_san_components(san: &str) -> Result<ParsedSan, SanError> {
    let (body, promotion) = split_promotion(san)?;

    let chars: Vec<char> = body.chars().collect();
    if chars.len() < 2 {
        return Err(SanError::InvalidSquare(san.to_string()));
    }

    let dest_start = chars.len() - 2;
    let dest: String = chars[dest_start..].iter().collect();
    let to_square =
        Square::from_algebraic(&dest).ok_or_else(|| SanError::InvalidSquare(san.to_string()))?;

    // An uppercase first letter names the piece; otherwise it is a pawn.
    let (piece, hint_start) = match chars[0] {
        c if c.is_ascii_uppercase() && dest_start > 0 => {
            let piece = Piece::from_san_char(c).ok_or_else(|| SanError::UnknownPiece {
                piece: c,
                san: san.to_string(),
            })?;
            (piece, 1)
        }
        _ => (Piece::Pawn, 0),
    };

    // The hint runs up to the capture marker, or to the destination.
    let middle = &chars[hint_start..dest_start];
    let (hint, has_capture_marker) = match middle.iter().position(|&c| c == 'x') {
        Some(x) => (&middle[..x], true),
        None => (middle, false),
    };
    let (from_file, from_rank) = parse_disambiguation(hint, san)?;

    // "ed6" without the marker still names a diagonal pawn capture.
    let pawn_diagonal =
        piece == Piece::Pawn && from_file.is_some_and(|file| file != to_square.file());

    Ok(ParsedSan {
        piece,
        from_file,
        from_rank,
        to_square,
        promotion,
        is_capture: has_capture_marker || pawn_diagonal,
    })
}

/// Splits off a `=X` promotion suffix. A bare trailing piece letter after
/// the destination rank ("e8Q") is accepted too.
fn split_promotion(san: &str) -> Result<(&str, Option<Piece>), SanError> {
    let invalid = || SanError::InvalidPromotion(san.to_string());

    if let Some((body, suffix)) = san.split_once('=') {
        let mut letters = suffix.chars();
        let piece = match (letters.next(), letters.next()) {
            (Some(c), None) => Piece::from_san_char(c.to_ascii_uppercase()),
            _ => None,
        }
        .filter(|p| p.is_promotion_target())
        .ok_or_else(invalid)?;
        return Ok((body, Some(piece)));
    }

    let mut rev = san.chars().rev();
    if let (Some(last), Some(rank)) = (rev.next(), rev.next()) {
        if rank.is_ascii_digit() {
            if let Some(piece) = Piece::from_san_char(last) {
                if !piece.is_promotion_target() {
                    return Err(invalid());
                }
                return Ok((&san[..san.len() - 1], Some(piece)));
            }
        }
    }

    Ok((san, None))
}

fn parse_disambiguation(
    hint: &[char],
    san: &str,
) -> Result<(Option<File>, Option<Rank>), SanError> {
    let invalid = || SanError::InvalidDisambiguation(san.to_string());

    match *hint {
        [] => Ok((None, None)),
        [c] => {
            if let Some(f) = File::from_char(c) {
                Ok((Some(f), None))
            } else if let Some(r) = Rank::from_char(c) {
                Ok((None, Some(r)))
            } else {
                Err(invalid())
            }
        }
        [f, r] => {
            let file = File::from_char(f).ok_or_else(invalid)?;
            let rank = Rank::from_char(r).ok_or_else(invalid)?;
            Ok((Some(file), Some(rank)))
        }
        _ => Err(invalid()),
    }
}

fn find_matching_move(
    board: &Board,
    color: Color,
    parsed: &ParsedSan,
    san: &str,
) -> Result<Move, SanError> {
    let mover = (parsed.piece, color);
    let candidates: Vec<Move> = board
        .pieces()
        .filter(|&(_, piece, owner)| piece == parsed.piece && owner == color)
        .map(|(sq, _, _)| sq)
        .filter(|sq| parsed.from_file.map_or(true, |file| sq.file() == file))
        .filter(|sq| parsed.from_rank.map_or(true, |rank| sq.rank() == rank))
        .filter(|&sq| is_pseudo_legal(board, mover, sq, parsed.to_square, parsed.is_capture))
        .map(|from| Move {
            from,
            to: parsed.to_square,
            promotion: parsed.promotion,
        })
        .collect();

    match candidates.as_slice() {
        [] => Err(SanError::NoMatchingMove(san.to_string())),
        [only] => Ok(*only),
        _ => candidates
            .iter()
            .copied()
            .find(|&m| {
                let mut trial = board.clone();
                trial.apply(m, color);
                !is_in_check(&trial, color)
            })
            .ok_or_else(|| SanError::KingLeftInCheck(san.to_string())),
    }
}
