//! Token primitives: one wagered number as typed, and the keypad buffer
//! holding the raw digit sequence.
//!
//! The buffer keeps a single raw string and recomputes its token list on
//! demand by splitting on `,`/newline. Nothing here is cached: every reader
//! sees exactly what the agent has typed so far.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of tokens a single draft accepts.
pub const MAX_TOKENS: usize = 30;

/// Maximum digits per token; reaching it closes the token.
pub const TOKEN_DIGITS: usize = 3;

/// One wagered number, 1–3 decimal digits, as entered.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Parses a raw buffer segment; `None` for blanks or non-digit text.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Token> {
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.len() > TOKEN_DIGITS
            || !trimmed.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }
        Some(Token(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digit count as typed (leading zeros included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric value; tokens hold at most 3 digits so `u16` always fits.
    #[must_use]
    pub fn value(&self) -> u16 {
        self.0.parse().unwrap_or(0)
    }

    /// `true` for 1–2 digit tokens (Fijo/Corrido/Parlet material).
    #[must_use]
    pub fn is_short(&self) -> bool {
        matches!(self.len(), 1 | 2)
    }

    /// `true` for 3-digit tokens (Centena material).
    #[must_use]
    pub fn is_centena(&self) -> bool {
        self.len() == TOKEN_DIGITS
    }

    #[must_use]
    pub fn has_leading_zero(&self) -> bool {
        self.0.len() > 1 && self.0.starts_with('0')
    }

    /// Display form: single digits are zero-padded to two.
    #[must_use]
    pub fn display(&self) -> String {
        if self.0.len() == 1 {
            format!("0{}", self.0)
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Outcome of a digit press on the buffer.
///
/// `AcceptedTokenFull` tells the caller the token just reached 3 digits and
/// should be closed with a follow-up [`TokenBuffer::append_delimiter`]. The
/// close is a separate transition (the UI debounces it so the digit renders
/// first), keeping the buffer itself synchronous and deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigitPress {
    Accepted,
    AcceptedTokenFull,
    Rejected,
}

/// The raw keypad buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenBuffer {
    raw: String,
}

impl TokenBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a buffer from a stored raw string (used when a separated
    /// play is pulled back into the draft for editing).
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Current token list, recomputed from the raw string.
    #[must_use]
    pub fn tokens(&self) -> Vec<Token> {
        self.raw
            .split(['\n', ','])
            .filter_map(Token::parse)
            .collect()
    }

    fn open_segment(&self) -> &str {
        self.raw
            .rsplit(['\n', ','])
            .next()
            .unwrap_or("")
    }

    /// Appends one digit to the open token.
    ///
    /// Rejected once [`MAX_TOKENS`] tokens exist or the open token already
    /// holds 3 digits; rejections are silent no-ops by design.
    pub fn append_digit(&mut self, digit: char) -> DigitPress {
        if !digit.is_ascii_digit() {
            return DigitPress::Rejected;
        }
        if self.tokens().len() >= MAX_TOKENS {
            return DigitPress::Rejected;
        }
        if self.open_segment().len() >= TOKEN_DIGITS {
            return DigitPress::Rejected;
        }
        self.raw.push(digit);
        if self.open_segment().len() == TOKEN_DIGITS {
            DigitPress::AcceptedTokenFull
        } else {
            DigitPress::Accepted
        }
    }

    /// Closes the open token with a `,`.
    ///
    /// Rejected (returns `false`) on an empty buffer, a trailing delimiter,
    /// or a blank open token, so empty tokens can never form.
    pub fn append_delimiter(&mut self) -> bool {
        if self.raw.is_empty() || self.open_segment().is_empty() {
            return false;
        }
        self.raw.push(',');
        true
    }

    /// Removes exactly one trailing character, digit or delimiter.
    pub fn backspace(&mut self) {
        self.raw.pop();
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Replaces the whole buffer with an expanded token run.
    pub fn replace_with_tokens(&mut self, tokens: &[Token]) {
        self.raw = tokens
            .iter()
            .map(Token::as_str)
            .collect::<Vec<_>>()
            .join("\n");
    }
}

impl fmt::Display for TokenBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
