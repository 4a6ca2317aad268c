//! Pseudo-legal move validation and check detection.
//!
//! These are pure queries over a [`Board`]. A move is pseudo-legal when it
//! matches the moving piece's geometry and the occupancy rules of its path
//! and destination; whether it leaves the mover's own king attacked is a
//! separate question answered with [`is_in_check`] on a trial board.

use crate::Board;
use chess_core::{Color, Piece, Square};

/// Returns true if every square strictly between `from` and `to` is empty.
///
/// Only meaningful for squares on a common rank, file or diagonal; any
/// other pair (such as a knight hop) returns `false`. Adjacent and
/// identical squares have nothing between them and return `true`.
pub fn clear_path(board: &Board, from: Square, to: Square) -> bool {
    let d_row = to.row() as i8 - from.row() as i8;
    let d_col = to.col() as i8 - from.col() as i8;
    if d_row != 0 && d_col != 0 && d_row.abs() != d_col.abs() {
        return false;
    }

    let steps = d_row.abs().max(d_col.abs());
    let (step_row, step_col) = (d_row.signum(), d_col.signum());
    (1..steps).all(|i| {
        from.offset(step_row * i, step_col * i)
            .is_some_and(|sq| board.is_empty(sq))
    })
}

/// Returns true if `piece` of `color` standing on `from` may move to `to`.
///
/// With `capture` set the destination must hold an enemy piece, except for
/// a pawn capturing en passant onto an empty square. Without it the
/// destination must be empty. Castling is not a king move here; it is
/// resolved directly by the SAN parser.
///
/// The board is consulted for occupancy only: the piece is not required to
/// actually stand on `from`.
pub fn is_pseudo_legal(
    board: &Board,
    (piece, color): (Piece, Color),
    from: Square,
    to: Square,
    capture: bool,
) -> bool {
    let target = board.piece_at(to);
    let is_empty = target.is_none();
    let is_enemy = matches!(target, Some((_, owner)) if owner != color);

    let d_row = to.row() as i8 - from.row() as i8;
    let d_col = to.col() as i8 - from.col() as i8;
    let (dr, dc) = (d_row.abs(), d_col.abs());

    let geometry = match piece {
        Piece::Pawn => {
            return pawn_can_reach(board, color, from, to, capture);
        }
        Piece::Knight => (dr == 1 && dc == 2) || (dr == 2 && dc == 1),
        Piece::Bishop => dr == dc && dr > 0 && clear_path(board, from, to),
        Piece::Rook => (dr == 0 || dc == 0) && dr + dc > 0 && clear_path(board, from, to),
        Piece::Queen => {
            (dr == dc || dr == 0 || dc == 0) && dr + dc > 0 && clear_path(board, from, to)
        }
        Piece::King => dr <= 1 && dc <= 1 && dr + dc > 0,
    };

    geometry && if capture { is_enemy } else { is_empty }
}

/// Returns true if the king of `color` is attacked by any enemy piece.
///
/// The king is the first one found scanning rank-major from the eighth
/// rank. A board without a king of that color reports "not in check";
/// callers replaying well-formed games never hit that case.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.king_square(color) else {
        return false;
    };

    let enemy = color.opposite();
    board
        .pieces()
        .filter(|&(_, _, owner)| owner == enemy)
        .any(|(sq, piece, _)| is_pseudo_legal(board, (piece, enemy), sq, king, true))
}

fn pawn_can_reach(board: &Board, color: Color, from: Square, to: Square, capture: bool) -> bool {
    let forward = color.forward();
    let d_row = to.row() as i8 - from.row() as i8;
    let d_col = to.col() as i8 - from.col() as i8;
    let target = board.piece_at(to);

    if d_col == 0 {
        // Pushes never capture.
        if capture || target.is_some() {
            return false;
        }
        return d_row == forward
            || (d_row == 2 * forward
                && from.row() == color.pawn_row()
                && clear_path(board, from, to));
    }

    if d_col.abs() != 1 || d_row != forward || !capture {
        return false;
    }

    match target {
        Some((_, owner)) => owner != color,
        None => en_passant_available(board, color, from, to),
    }
}

/// An enemy pawn must stand beside the mover, on the destination file, and
/// the mover must be on its fifth rank.
fn en_passant_available(board: &Board, color: Color, from: Square, to: Square) -> bool {
    if from.row() != color.en_passant_row() {
        return false;
    }
    Square::from_coords(from.row(), to.col())
        .and_then(|sq| board.piece_at(sq))
        .is_some_and(|occupant| occupant == (Piece::Pawn, color.opposite()))
}
