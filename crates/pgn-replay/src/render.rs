//! Plain-text board rendering.

use chess_core::{Color, Square};
use replay_engine::{is_in_check, Board, KingPresentation, Replay};
use std::fmt;

/// A board drawn from one side, with rank and file labels.
///
/// A king in check is marked with `*` after its glyph.
///
/// ```text
/// 8 r n b q k b n r
/// 7 p p p p p p p p
/// ...
///   a b c d e f g h
/// ```
pub struct BoardView<'a> {
    board: &'a Board,
    view_from_white: bool,
}

impl<'a> BoardView<'a> {
    pub fn new(board: &'a Board, view_from_white: bool) -> Self {
        BoardView {
            board,
            view_from_white,
        }
    }

    /// Grid rows or columns in top-to-bottom / left-to-right order.
    fn order(&self) -> [u8; 8] {
        if self.view_from_white {
            [0, 1, 2, 3, 4, 5, 6, 7]
        } else {
            [7, 6, 5, 4, 3, 2, 1, 0]
        }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let checked: Vec<Square> = [Color::White, Color::Black]
            .into_iter()
            .filter(|&color| is_in_check(self.board, color))
            .filter_map(|color| self.board.king_square(color))
            .collect();

        for row in self.order() {
            let mut line = format!("{}", 8 - row);
            for col in self.order() {
                let Some(sq) = Square::from_coords(row, col) else {
                    continue;
                };
                let glyph = self
                    .board
                    .piece_at(sq)
                    .map_or('.', |(piece, color)| piece.glyph(color));
                line.push(' ');
                line.push(glyph);
                if checked.contains(&sq) {
                    line.push('*');
                }
            }
            writeln!(f, "{}", line)?;
        }

        write!(f, " ")?;
        for col in self.order() {
            write!(f, " {}", char::from(b'a' + col))?;
        }
        writeln!(f)
    }
}

/// Renders a board from White's (`true`) or Black's point of view.
pub fn render_board(board: &Board, view_from_white: bool) -> String {
    BoardView::new(board, view_from_white).to_string()
}

/// Describes the end-of-game king presentation, if there is one to show.
pub fn presentation_line(presentation: KingPresentation) -> Option<String> {
    match presentation {
        KingPresentation::Loser(color) => Some(format!("{} king toppled", color)),
        KingPresentation::Draw => Some("Both kings tilted: draw".to_string()),
        KingPresentation::Upright => None,
    }
}

/// Renders one frame of a replay: caption, ply counter, board and, once the
/// game is over, the result and king presentation.
pub fn render_frame(title: &str, replay: &Replay, view_from_white: bool) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    let last_san = replay
        .ply()
        .checked_sub(1)
        .and_then(|i| replay.tokens().get(i));
    match last_san {
        Some(san) => out.push_str(&format!("Ply {}/{}: {}\n", replay.ply(), replay.len(), san)),
        None => out.push_str(&format!("Ply 0/{}\n", replay.len())),
    }

    out.push_str(&render_board(replay.board(), view_from_white));

    if replay.is_finished() {
        if let Some(result) = replay.result() {
            out.push_str(&format!("Result: {}\n", result));
        }
        if let Some(line) = presentation_line(replay.final_presentation()) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}
