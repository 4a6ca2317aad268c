//! PGN movetext cleaning and tokenization.
//!
//! Movetext is the part of a PGN game after the tag pairs:
//!
//! ```text
//! 1. e4 e5 {a comment} 2. Nf3 (2. f4 exf4) Nc6 ; rest of line ignored
//! 3. Bb5!? a6 1-0
//! ```
//!
//! Cleaning drops comments and variations; tokenizing strips move numbers
//! and annotation glyphs and stops at the result token.

use crate::GameResult;

/// Drops `{...}` comments, `(...)` variations and `;` line comments.
///
/// The cleaner keeps its state between calls, so a comment or variation
/// may span several lines fed one at a time. Variations nest; comments do
/// not, and inside a comment only `}` is significant. A closing marker with
/// nothing open is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovetextCleaner {
    in_comment: bool,
    variation_depth: u32,
}

impl MovetextCleaner {
    /// Creates a cleaner outside any comment or variation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no comment or variation is open.
    pub fn is_idle(&self) -> bool {
        !self.in_comment && self.variation_depth == 0
    }

    /// Forgets any open comment or variation.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns `text` with suppressed characters removed.
    ///
    /// A `;` outside a comment discards the rest of its line; the newline
    /// itself is kept.
    pub fn clean(&mut self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut line_comment = false;

        for c in text.chars() {
            if line_comment {
                if c == '\n' {
                    line_comment = false;
                    out.push(c);
                }
                continue;
            }
            if self.in_comment {
                if c == '}' {
                    self.in_comment = false;
                }
                continue;
            }
            match c {
                '{' => self.in_comment = true,
                '(' => self.variation_depth += 1,
                ')' => self.variation_depth = self.variation_depth.saturating_sub(1),
                '}' => {}
                ';' => line_comment = true,
                _ if self.variation_depth == 0 => out.push(c),
                _ => {}
            }
        }
        out
    }
}

/// Cleans a single line with a fresh [`MovetextCleaner`].
pub fn clean_line(line: &str) -> String {
    MovetextCleaner::new().clean(line)
}

/// Strips a leading move number ("12." or "12...") and trailing `!`/`?`
/// glyphs from a whitespace-delimited token.
///
/// Returns `None` when nothing is left, for numeric annotation glyphs
/// such as `$1`, and for the `e.p.` marker some sources write after an
/// en passant capture.
pub fn extract_san_token(token: &str) -> Option<&str> {
    if token == "e.p." {
        return None;
    }

    let rest = if token.starts_with(|c: char| c.is_ascii_digit()) {
        let after_number = token.trim_start_matches(|c: char| c.is_ascii_digit());
        if after_number.starts_with('.') {
            after_number.trim_start_matches('.')
        } else {
            token
        }
    } else {
        token.trim_start_matches('.')
    };

    if rest.starts_with('$') {
        return None;
    }

    let end = rest
        .find(|c: char| c == '!' || c == '?')
        .unwrap_or(rest.len());
    let san = &rest[..end];
    (!san.is_empty()).then_some(san)
}

/// The moves of one game, split into SAN tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Movetext {
    /// SAN tokens in play order.
    pub tokens: Vec<String>,
    /// The result token that ended the movetext, if there was one.
    pub result: Option<GameResult>,
}

impl Movetext {
    /// Returns the movetext's own result, falling back to a separately
    /// parsed `Result` tag value.
    pub fn effective_result(&self, header: Option<&str>) -> Option<GameResult> {
        self.result
            .or_else(|| header.and_then(|tag| GameResult::from_token(tag.trim())))
    }

    /// Returns the number of plies.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if there are no moves.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Splits a movetext buffer into SAN tokens.
///
/// The buffer is cleaned first. Tokenization stops at the first result
/// token (`1-0`, `0-1`, `1/2-1/2`, `*`), which is reported in
/// [`Movetext::result`] rather than among the tokens. This never fails;
/// malformed tokens are left for the SAN parser to reject.
pub fn tokenize(buffer: &str) -> Movetext {
    let cleaned = MovetextCleaner::new().clean(buffer);
    let mut movetext = Movetext::default();

    for token in cleaned.split_whitespace().filter_map(extract_san_token) {
        if let Some(result) = GameResult::from_token(token) {
            movetext.result = Some(result);
            break;
        }
        movetext.tokens.push(token.to_string());
    }

    movetext
}
