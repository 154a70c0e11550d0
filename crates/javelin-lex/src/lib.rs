//! javelin-lex - Lexical analysis for Java source text.
//!
//! This crate turns Java SE 8 source text into a finite, positioned token
//! sequence. It is the first phase of the Javelin pipeline:
//!
//! ```text
//! source text -> tokens -> AST
//! ```
//!
//! The scanner is hand-written and direct-coded: each token family has its
//! own scanning function, dispatched on the first character. Maximal munch
//! applies throughout, with one Java-specific twist: `>>` and `>>>` are
//! lexed whole and the parser splits them back into `>` tokens when they
//! close nested type-argument lists (see [`TokenStream::split_composite_gt`]).
//!
//! Java's `\uXXXX` escapes are a pre-lexer transformation in the language
//! specification; here they are folded into the character cursor, so
//! an escaped spelling of `class` still lexes as the keyword while
//! positions keep pointing at the raw source.
//!
//! # Example
//!
//! ```
//! use javelin_lex::{tokenize, TokenKind};
//!
//! let stream = tokenize("int x = 0xCAFE_BABE;").unwrap();
//! let kinds: Vec<_> = stream.tokens().iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Keyword,
//!         TokenKind::Identifier,
//!         TokenKind::Operator,
//!         TokenKind::HexInteger,
//!         TokenKind::Separator,
//!         TokenKind::EndOfInput,
//!     ]
//! );
//! ```

pub mod cursor;
pub mod lexer;
pub mod stream;
pub mod token;

#[cfg(test)]
mod edge_cases;

pub use lexer::Lexer;
pub use stream::{Marker, TokenStream};
pub use token::{Javadoc, Token, TokenKind};

use javelin_util::LexerError;

/// Tokenizes Java source text.
///
/// Produces a [`TokenStream`] whose last token is `EndOfInput`, or the
/// first [`LexerError`] encountered.
///
/// # Example
///
/// ```
/// use javelin_lex::tokenize;
///
/// assert!(tokenize("class A {}").is_ok());
/// assert!(tokenize("\"unterminated").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<TokenStream, LexerError> {
    Lexer::new(source).tokenize().map(TokenStream::new)
}
