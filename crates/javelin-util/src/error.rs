//! Public error types.
//!
//! A parse has exactly two failure modes: the scanner rejects malformed
//! lexical structure ([`LexerError`]) or the parser meets a token it cannot
//! accept ([`ParserError`]). Both carry the position of the offending input
//! and abort the parse; there is no recovery.

use thiserror::Error;

use crate::position::Position;

/// A malformed token in the source text.
///
/// Raised for unterminated string/character literals, invalid escape
/// sequences, malformed numeric literals (misplaced underscores, empty
/// exponents, digits out of radix), and stray characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {position}")]
pub struct LexerError {
    /// Location of the offending character or literal start.
    pub position: Position,
    /// Human-readable description of what went wrong.
    pub message: String,
}

impl LexerError {
    /// Creates a new lexer error.
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// An unexpected token during parsing.
///
/// `found` describes the offending token, `expected` what the active
/// production would have accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found} at {position}")]
pub struct ParserError {
    /// Location of the offending token.
    pub position: Position,
    /// Description of the token that was found.
    pub found: String,
    /// Description of what was expected instead.
    pub expected: String,
}

impl ParserError {
    /// Creates a new parser error.
    pub fn new(
        position: Position,
        found: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            position,
            found: found.into(),
            expected: expected.into(),
        }
    }
}

/// Any syntax failure produced by a full parse entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The tokenizer rejected the input.
    #[error(transparent)]
    Lexer(#[from] LexerError),

    /// The parser rejected the token sequence.
    #[error(transparent)]
    Parser(#[from] ParserError),
}

impl Error {
    /// Returns the source position the failure was reported at.
    pub fn position(&self) -> Position {
        match self {
            Error::Lexer(e) => e.position,
            Error::Parser(e) => e.position,
        }
    }
}
