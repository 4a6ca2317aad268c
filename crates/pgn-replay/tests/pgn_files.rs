//! Reads PGN files from disk and replays every game in them.

use chess_core::{Color, Piece, Square};
use pgn_replay::library::list_pgn_files;
use pgn_replay::pgn::load_games;
use pgn_replay::render::render_frame;
use replay_engine::{KingPresentation, ReplayError};
use std::fs;

const CLASSICS: &str = r#"[Event "Paris"]
[Site "Paris FRA"]
[Date "1858.??.??"]
[White "Morphy, Paul"]
[Black "Duke Karl / Count Isouard"]
[Result "1-0"]

1. e4 e5 2. Nf3 d6 3. d4 Bg4 {This is a weak move
already.--Fischer} 4. dxe5 Bxf3 5. Qxf3 dxe5 6. Bc4 Nf6 7. Qb3 Qe7
8. Nc3 c6 9. Bg5 {Black is in what's like a zugzwang position
here.} b5 10. Nxb5! cxb5 11. Bxb5+ Nbd7 12. O-O-O Rd8
13. Rxd7 Rxd7 14. Rd1 Qe6 15. Bxd7+ Nxd7 16. Qb8+ Nxb8 17. Rd8# 1-0

[Event "Training"]
[White "Student"]
[Black "Coach"]
[Date "2024.03.01"]
[Result "1/2-1/2"]

1. d4 d5 2. c4 (2. Nf3 Nf6 3. c4) e6 3. Nc3 Nf6 ; Queen's Gambit Declined
4. Bg5 Be7 1/2-1/2

[Event "Garbled"]
[White "Typo"]
[Result "0-1"]

1. e4 e5 2. Ke3 Nc6 0-1
"#;

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

#[test]
fn test_library_and_replay() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("classics.pgn"), CLASSICS).unwrap();
    fs::write(dir.path().join("readme.md"), "not a game").unwrap();

    let files = list_pgn_files(dir.path()).unwrap();
    assert_eq!(files.len(), 1);

    let games = load_games(&files[0]).unwrap();
    assert_eq!(games.len(), 3);
    assert_eq!(games[0].title(), "Morphy - Isouard (1858)");
    assert_eq!(games[1].title(), "Student - Coach (2024)");
    assert_eq!(games[2].title(), "Typo - Black");
}

#[test]
fn test_morphy_game_ends_in_mate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("classics.pgn");
    fs::write(&path, CLASSICS).unwrap();

    let games = load_games(&path).unwrap();
    let mut replay = games[0].replay();
    assert_eq!(replay.len(), 33);
    replay.play_to_end().unwrap();

    assert_eq!(replay.board().piece_at(sq("d8")), Some((Piece::Rook, Color::White)));
    assert!(replay.is_check(Color::Black));
    assert_eq!(
        replay.final_presentation(),
        KingPresentation::Loser(Color::Black)
    );

    let frame = render_frame(&games[0].title(), &replay, true);
    assert!(frame.contains("8 . n . R k* b . r\n"));
    assert!(frame.ends_with("Result: 1-0\nBlack king toppled\n"));
}

#[test]
fn test_variation_and_line_comment_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("classics.pgn");
    fs::write(&path, CLASSICS).unwrap();

    let games = load_games(&path).unwrap();
    let mut replay = games[1].replay();
    assert_eq!(
        replay.tokens(),
        ["d4", "d5", "c4", "e6", "Nc3", "Nf6", "Bg5", "Be7"]
    );
    replay.play_to_end().unwrap();
    assert_eq!(replay.board().piece_at(sq("g5")), Some((Piece::Bishop, Color::White)));
    assert_eq!(replay.board().piece_at(sq("e7")), Some((Piece::Bishop, Color::Black)));
    assert_eq!(replay.final_presentation(), KingPresentation::Draw);
}

#[test]
fn test_garbled_game_stops_without_presentation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("classics.pgn");
    fs::write(&path, CLASSICS).unwrap();

    let games = load_games(&path).unwrap();
    let mut replay = games[2].replay();
    let err = replay.play_to_end().unwrap_err();
    assert!(matches!(err, ReplayError::Parse { ply: 3, ref san, .. } if san == "Ke3"));
    assert_eq!(replay.ply(), 2);
    assert_eq!(replay.final_presentation(), KingPresentation::Upright);

    let frame = render_frame(&games[2].title(), &replay, false);
    assert!(frame.contains("Ply 2/4: e5\n"));
    assert!(!frame.contains("Result"));
}
