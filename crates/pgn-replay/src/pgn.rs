//! PGN file reading.
//!
//! A PGN file holds any number of games, each a block of tag pairs
//! followed by movetext:
//!
//! ```text
//! [Event "Paris"]
//! [White "Morphy, Paul"]
//! [Black "Duke Karl / Count Isouard"]
//! [Date "1858.??.??"]
//! [Result "1-0"]
//!
//! 1. e4 e5 2. Nf3 d6 {...} 17. Rd8# 1-0
//! ```
//!
//! Only the tags needed for display are kept. Comments and variations are
//! stripped from the movetext while reading, so [`PgnGame::movetext`] is a
//! single cleaned line ready for tokenizing.

use replay_engine::{MovetextCleaner, Replay};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when reading PGN files.
#[derive(Error, Debug)]
pub enum PgnError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One game read from a PGN file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnGame {
    /// Value of the `White` tag, or "White" when missing.
    pub white: String,
    /// Value of the `Black` tag, or "Black" when missing.
    pub black: String,
    /// Four-digit year from the `Date` tag, or empty.
    pub year: String,
    /// Value of the `Result` tag, or empty.
    pub result: String,
    /// Cleaned movetext, lines joined by single spaces.
    pub movetext: String,
}

impl PgnGame {
    fn blank() -> Self {
        PgnGame {
            white: String::new(),
            black: String::new(),
            year: String::new(),
            result: String::new(),
            movetext: String::new(),
        }
    }

    fn read_tag(&mut self, line: &str) {
        if let Some(value) = parse_tag_value(line, "White") {
            self.white = value.to_string();
        } else if let Some(value) = parse_tag_value(line, "Black") {
            self.black = value.to_string();
        } else if let Some(value) = parse_tag_value(line, "Date") {
            self.year = extract_year(value).to_string();
        } else if let Some(value) = parse_tag_value(line, "Result") {
            self.result = value.to_string();
        }
    }

    fn push_movetext(&mut self, text: &str) {
        if !self.movetext.is_empty() {
            self.movetext.push(' ');
        }
        self.movetext.push_str(text);
    }

    fn finish(mut self) -> Self {
        if self.white.is_empty() {
            self.white = "White".to_string();
        }
        if self.black.is_empty() {
            self.black = "Black".to_string();
        }
        self
    }

    /// Returns the `Result` tag value, if the tag was present and non-empty.
    pub fn header_result(&self) -> Option<&str> {
        Some(self.result.as_str()).filter(|r| !r.is_empty())
    }

    /// Returns the short display name of the white player.
    pub fn white_name(&self) -> &str {
        display_name(&self.white)
    }

    /// Returns the short display name of the black player.
    pub fn black_name(&self) -> &str {
        display_name(&self.black)
    }

    /// Returns a one-line caption: "White - Black (year)".
    pub fn title(&self) -> String {
        if self.year.is_empty() {
            format!("{} - {}", self.white_name(), self.black_name())
        } else {
            format!("{} - {} ({})", self.white_name(), self.black_name(), self.year)
        }
    }

    /// Starts a replay session for this game.
    pub fn replay(&self) -> Replay {
        Replay::new(&self.movetext, self.header_result())
    }
}

/// Splits PGN text into games.
///
/// A line starting with `[Event` begins a new game, closing any comment or
/// variation left open. Games without movetext are skipped, as is anything
/// before the first `[Event`. Tag lines are read as they are; every other
/// line goes through one [`MovetextCleaner`] per game, so comments and
/// variations may span lines.
pub fn parse_games(text: &str) -> Vec<PgnGame> {
    let mut games = Vec::new();
    let mut current: Option<PgnGame> = None;
    let mut cleaner = MovetextCleaner::new();

    for line in text.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with("[Event") {
            if let Some(game) = current.take().filter(|g| !g.movetext.is_empty()) {
                games.push(game.finish());
            }
            current = Some(PgnGame::blank());
            cleaner.reset();
            continue;
        }
        if cleaner.is_idle() && trimmed.starts_with('[') {
            if let Some(game) = current.as_mut() {
                game.read_tag(trimmed);
            }
            continue;
        }

        let Some(game) = current.as_mut() else {
            continue;
        };
        let cleaned = cleaner.clean(line);
        let cleaned = cleaned.trim();
        if !cleaned.is_empty() {
            game.push_movetext(cleaned);
        }
    }

    if let Some(game) = current.filter(|g| !g.movetext.is_empty()) {
        games.push(game.finish());
    }
    games
}

/// Reads all games from a PGN file.
///
/// Bytes that are not valid UTF-8 (common in older Latin-1 files) are
/// replaced rather than rejected.
pub fn load_games(path: &Path) -> Result<Vec<PgnGame>, PgnError> {
    let bytes = std::fs::read(path).map_err(|source| PgnError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let games = parse_games(&String::from_utf8_lossy(&bytes));
    tracing::debug!(path = %path.display(), games = games.len(), "loaded PGN file");
    Ok(games)
}

/// Returns the quoted value of a `[Tag "value"]` line for the given tag.
///
/// The tag name must be followed by whitespace, so `White` does not match
/// a `WhiteElo` line.
pub fn parse_tag_value<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let rest = line.strip_prefix('[')?.strip_prefix(tag)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let (_, quoted) = line.split_once('"')?;
    let (value, _) = quoted.split_once('"')?;
    Some(value)
}

/// Returns the year of a PGN date ("1858.??.??"), or "" if the first four
/// characters are not all digits.
pub fn extract_year(date: &str) -> &str {
    match date.get(..4) {
        Some(year) if year.bytes().all(|b| b.is_ascii_digit()) => year,
        _ => "",
    }
}

/// Returns the surname from a player name.
///
/// "Carlsen, Magnus" gives "Carlsen"; otherwise the last word is used, so
/// "Magnus Carlsen" also gives "Carlsen".
pub fn last_name(full: &str) -> &str {
    let full = full.trim_start();
    match full.split_once(',') {
        Some((last, _)) => last.trim_end(),
        None => full.split_whitespace().last().unwrap_or(""),
    }
}

fn display_name(full: &str) -> &str {
    match last_name(full) {
        "" => full,
        last => last,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_GAMES: &str = r#"
[Event "Paris"]
[Site "Paris FRA"]
[Date "1858.??.??"]
[White "Morphy, Paul"]
[Black "Duke Karl / Count Isouard"]
[Result "1-0"]

1. e4 e5 2. Nf3 d6 {Philidor
defence} 3. d4 Bg4
4. dxe5 1-0

[Event "Casual"]
[WhiteElo "2800"]

1. d4 d5 *
"#;

    #[test]
    fn test_parse_two_games() {
        let games = parse_games(TWO_GAMES);
        assert_eq!(games.len(), 2);

        let morphy = &games[0];
        assert_eq!(morphy.white, "Morphy, Paul");
        assert_eq!(morphy.black, "Duke Karl / Count Isouard");
        assert_eq!(morphy.year, "1858");
        assert_eq!(morphy.result, "1-0");
        assert_eq!(morphy.movetext, "1. e4 e5 2. Nf3 d6 3. d4 Bg4 4. dxe5 1-0");

        let casual = &games[1];
        assert_eq!(casual.white, "White");
        assert_eq!(casual.black, "Black");
        assert_eq!(casual.year, "");
        assert_eq!(casual.header_result(), None);
        assert_eq!(casual.movetext, "1. d4 d5 *");
    }

    #[test]
    fn test_games_without_movetext_are_skipped() {
        let text = "[Event \"a\"]\n[White \"X\"]\n\n[Event \"b\"]\n\n1. e4 *\n[Event \"c\"]\n";
        let games = parse_games(text);
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].white, "White");
        assert_eq!(games[0].movetext, "1. e4 *");
    }

    #[test]
    fn test_text_before_first_event_is_ignored() {
        let text = "1. e4 e5\n[White \"Nobody\"]\n[Event \"x\"]\n1. c4 *\n";
        let games = parse_games(text);
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].white, "White");
        assert_eq!(games[0].movetext, "1. c4 *");
    }

    #[test]
    fn test_open_comment_does_not_swallow_next_game() {
        let text = "[Event \"a\"]\n1. e4 {unterminated\n[Event \"b\"]\n1. d4 *\n";
        let games = parse_games(text);
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].movetext, "1. e4");
        assert_eq!(games[1].movetext, "1. d4 *");
    }

    #[test]
    fn test_line_comment_and_variation_spanning_lines() {
        let text = "[Event \"a\"]\n1. e4 ; king pawn\ne5 (1... c5\n2. Nf3) 2. Nf3 *\n";
        let games = parse_games(text);
        assert_eq!(games[0].movetext, "1. e4 e5 2. Nf3 *");
    }

    #[test]
    fn test_tag_values_keep_markup_characters() {
        let text = "[Event \"a\"]\n[White \"Smith (jr.); {x}\"]\n1. e4 *\n";
        let games = parse_games(text);
        assert_eq!(games[0].white, "Smith (jr.); {x}");
    }

    #[test]
    fn test_parse_tag_value() {
        assert_eq!(parse_tag_value("[White \"Tal, Mikhail\"]", "White"), Some("Tal, Mikhail"));
        assert_eq!(parse_tag_value("[White\t\"Tal\"]", "White"), Some("Tal"));
        assert_eq!(parse_tag_value("[WhiteElo \"2700\"]", "White"), None);
        assert_eq!(parse_tag_value("[Black \"Tal\"]", "White"), None);
        assert_eq!(parse_tag_value("[White \"unterminated]", "White"), None);
        assert_eq!(parse_tag_value("[White Tal]", "White"), None);
        assert_eq!(parse_tag_value("White \"Tal\"", "White"), None);
        assert_eq!(parse_tag_value("[Result \"\"]", "Result"), Some(""));
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("1858.??.??"), "1858");
        assert_eq!(extract_year("2023.10.14"), "2023");
        assert_eq!(extract_year("????.??.??"), "");
        assert_eq!(extract_year("185"), "");
        assert_eq!(extract_year(""), "");
        assert_eq!(extract_year("19x5.01.01"), "");
    }

    #[test]
    fn test_last_name() {
        assert_eq!(last_name("Morphy, Paul"), "Morphy");
        assert_eq!(last_name("  Van Wely , Loek"), "Van Wely");
        assert_eq!(last_name("Magnus Carlsen"), "Carlsen");
        assert_eq!(last_name("Carlsen"), "Carlsen");
        assert_eq!(last_name("Paul Morphy  "), "Morphy");
        assert_eq!(last_name("   "), "");
        assert_eq!(last_name(""), "");
    }

    #[test]
    fn test_title() {
        let games = parse_games(TWO_GAMES);
        assert_eq!(games[0].title(), "Morphy - Isouard (1858)");
        assert_eq!(games[1].title(), "White - Black");

        let game = PgnGame {
            white: ", Anonymous".to_string(),
            ..games[1].clone()
        };
        assert_eq!(game.white_name(), ", Anonymous");
    }

    #[test]
    fn test_replay_uses_header_result() {
        let text = "[Event \"a\"]\n[Result \"0-1\"]\n1. f3 e5 2. g4 Qh4#\n";
        let games = parse_games(text);
        let mut replay = games[0].replay();
        replay.play_to_end().unwrap();
        assert_eq!(
            replay.final_presentation(),
            replay_engine::KingPresentation::Loser(chess_core::Color::White)
        );
    }

    #[test]
    fn test_load_games_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.pgn");
        match load_games(&path) {
            Err(PgnError::Read { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected read error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_games_tolerates_latin1() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.pgn");
        let mut bytes = b"[Event \"x\"]\n[White \"Andersson, Ulf\"]\n[Black \"M".to_vec();
        bytes.push(0xFC);
        bytes.extend_from_slice(b"ller\"]\n1. e4 *\n");
        std::fs::write(&path, bytes).unwrap();

        let games = load_games(&path).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].white_name(), "Andersson");
        assert!(games[0].black.starts_with('M'));
    }
}
