//! The token stream consumed by the parser.
//!
//! [`TokenStream`] owns the eagerly produced token vector and a cursor
//! index over it. It supports absolute positioning (`mark`/`reset`) for
//! speculative parsing and the one parser-driven mutation the Java grammar
//! requires: splitting a composite `>>`/`>>>` token back into `>` tokens
//! when it closes nested type-argument lists.
//!
//! `reset` rolls back any splits performed after the mark, so a failed
//! speculation leaves the stream exactly as it found it.

use javelin_util::Position;

use crate::token::{Javadoc, Token, TokenKind};

/// A saved stream state for speculative parsing.
#[derive(Clone, Copy, Debug)]
pub struct Marker {
    index: usize,
    splits: usize,
}

/// An ordered token sequence with a movable cursor.
///
/// The sequence is always terminated by exactly one `EndOfInput` token;
/// the cursor never moves past it.
///
/// # Example
///
/// ```
/// use javelin_lex::tokenize;
///
/// let mut stream = tokenize("a + b").unwrap();
/// assert_eq!(stream.peek().value, "a");
/// let marker = stream.mark();
/// stream.next();
/// stream.next();
/// assert_eq!(stream.peek().value, "b");
/// stream.reset(marker);
/// assert_eq!(stream.peek().value, "a");
/// ```
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    index: usize,
    /// Log of composite `>` splits: (index of the replaced token, original).
    splits: Vec<(usize, Token)>,
}

impl TokenStream {
    /// Wraps a token vector. The vector must end with `EndOfInput`.
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(matches!(
            tokens.last().map(|t| t.kind),
            Some(TokenKind::EndOfInput)
        ));
        Self {
            tokens,
            index: 0,
            splits: Vec::new(),
        }
    }

    /// The token under the cursor.
    #[inline]
    pub fn peek(&self) -> &Token {
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    /// The token `k` places ahead of the cursor, clamped to `EndOfInput`.
    #[inline]
    pub fn look_ahead(&self, k: usize) -> &Token {
        let idx = self.index.saturating_add(k).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// Consumes and returns the current token. At the end of input the
    /// terminal token is returned repeatedly without advancing.
    pub fn next(&mut self) -> Token {
        let token = self.peek().clone();
        self.advance();
        token
    }

    /// Advances past the current token, staying on `EndOfInput`.
    #[inline]
    pub fn advance(&mut self) {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
    }

    /// True once the cursor rests on `EndOfInput`.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.peek().is_end()
    }

    /// Saves the current stream state.
    pub fn mark(&self) -> Marker {
        Marker {
            index: self.index,
            splits: self.splits.len(),
        }
    }

    /// Restores a previously saved state, undoing any composite-`>` splits
    /// performed since the mark.
    pub fn reset(&mut self, marker: Marker) {
        while self.splits.len() > marker.splits {
            let (idx, original) = self.splits.pop().expect("split log entry");
            self.tokens.remove(idx + 1);
            self.tokens[idx] = original;
        }
        self.index = marker.index;
    }

    /// Position of the Javadoc comment pending on the current token.
    pub fn pre_position(&self) -> Option<Position> {
        self.peek().javadoc.as_deref().map(|j| j.position)
    }

    /// The Javadoc comment pending on the current token.
    pub fn pre_javadoc(&self) -> Option<&Javadoc> {
        self.peek().javadoc.as_deref()
    }

    /// Splits the composite `>>` or `>>>` under the cursor into a leading
    /// `>` and a shifted remainder, in place.
    ///
    /// Invoked when a type-argument close meets a composite token. The
    /// remainder keeps the composite kind, so `>>>` splits twice.
    ///
    /// # Panics
    ///
    /// Panics if the current token is not `>>` or `>>>`.
    pub fn split_composite_gt(&mut self) {
        let token = self.peek();
        assert!(
            token.is_operator(">>") || token.is_operator(">>>"),
            "split_composite_gt on {:?}",
            token.value
        );
        let idx = self.index.min(self.tokens.len() - 1);
        let original = self.tokens[idx].clone();
        let position = original.position;
        let rest = original.value[1..].to_string();

        self.tokens[idx] = Token::new(TokenKind::Operator, ">", position);
        self.tokens.insert(
            idx + 1,
            Token::new(
                TokenKind::Operator,
                rest,
                Position::new(position.line, position.column + 1),
            ),
        );
        self.splits.push((idx, original));
    }

    /// The underlying token slice, including `EndOfInput`.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
