//! Instruction token parsing
//!
//! An instruction string is a whitespace-separated list of two-digit hex
//! codes such as `"3E 4B C3"`. Each code names one cell of the 16x16 sprite
//! sheet: the first digit is the row, the second the column.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error produced when an instruction token is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token is not exactly two characters long
    #[error("token '{token}' must be exactly two hex digits, got {len} characters")]
    Length { token: String, len: usize },
    /// Token contains a character outside 0-9, A-F, a-f
    #[error("invalid hex digit '{digit}' in token '{token}'")]
    InvalidHexDigit { token: String, digit: char },
    /// A token inside an instruction string failed to parse
    #[error("instruction {index}: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<TokenError>,
    },
}

/// A parsed instruction code addressing one sprite sheet cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    /// Grid row, taken from the first hex digit (0-15)
    pub row: u8,
    /// Grid column, taken from the second hex digit (0-15)
    pub col: u8,
}

impl Token {
    /// Build the token for a full opcode byte (`0x4B` -> row 4, col 11).
    pub fn from_byte(byte: u8) -> Self {
        Self { row: byte >> 4, col: byte & 0x0F }
    }

    /// The opcode byte this token encodes.
    pub fn byte(self) -> u8 {
        (self.row << 4) | self.col
    }

    /// Parse a two-character hex token.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexpanel::token::Token;
    ///
    /// let token = Token::parse("4B").unwrap();
    /// assert_eq!((token.row, token.col), (4, 11));
    ///
    /// assert!(Token::parse("G1").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, TokenError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != 2 {
            return Err(TokenError::Length { token: text.to_string(), len: chars.len() });
        }

        let row = hex_digit(chars[0]).ok_or_else(|| TokenError::InvalidHexDigit {
            token: text.to_string(),
            digit: chars[0],
        })?;
        let col = hex_digit(chars[1]).ok_or_else(|| TokenError::InvalidHexDigit {
            token: text.to_string(),
            digit: chars[1],
        })?;

        Ok(Self { row, col })
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.byte())
    }
}

/// Parse a single hex digit (0-9, A-F, a-f) to its value (0-15).
pub(crate) fn hex_digit(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'a'..='f' => Some(c as u8 - b'a' + 10),
        'A'..='F' => Some(c as u8 - b'A' + 10),
        _ => None,
    }
}

/// Parse a whitespace-separated instruction string into tokens, in order.
///
/// A blank line yields no tokens. The first malformed token aborts parsing
/// and its zero-based position is reported.
pub fn parse_instructions(line: &str) -> Result<Vec<Token>, TokenError> {
    line.split_whitespace()
        .enumerate()
        .map(|(index, text)| {
            Token::parse(text)
                .map_err(|source| TokenError::AtIndex { index, source: Box::new(source) })
        })
        .collect()
}
