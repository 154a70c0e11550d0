//! javelin-par - Parsing and AST for Java SE 8 source text.
//!
//! This crate is the second and third layer of the Javelin pipeline: it
//! consumes the token stream produced by `javelin-lex` and builds a typed
//! abstract syntax tree rooted at [`CompilationUnit`].
//!
//! The parser is recursive descent and predictive, with bounded speculation
//! for the four places Java's grammar is locally ambiguous:
//!
//! 1. cast vs. parenthesized expression,
//! 2. type arguments vs. the `<` operator,
//! 3. lambda vs. parenthesized expression,
//! 4. generic method invocation after `.`.
//!
//! Speculation uses the token stream's `mark`/`reset`; a failed attempt
//! restores the stream exactly (including un-splitting any composite `>`
//! tokens) and never surfaces as an error. Binary expressions use
//! precedence climbing; `>>`/`>>>` are split through the cursor when they
//! close nested type-argument lists.
//!
//! The library performs no name resolution and no recovery: the first
//! syntax error aborts the parse.
//!
//! # Examples
//!
//! ```
//! use javelin_par::{parse, NodeKind, NodeRef, filter_kind};
//!
//! let unit = parse("package p; class A { int x; }").unwrap();
//! assert_eq!(unit.package.as_ref().unwrap().name, "p");
//! assert_eq!(unit.types[0].name(), "A");
//!
//! let fields: Vec<_> =
//!     filter_kind(NodeRef::from(&unit), NodeKind::FieldDeclaration).collect();
//! assert_eq!(fields.len(), 1);
//! ```
//!
//! ```
//! use javelin_par::parse_expression;
//!
//! let expr = parse_expression("(x) -> x * 2").unwrap();
//! assert!(matches!(expr, javelin_par::Expression::Lambda(_)));
//! ```

pub mod ast;
pub mod walk;

mod decl;
mod expr;
mod stmt;
mod types;

#[cfg(test)]
mod edge_cases;

pub use ast::*;
pub use walk::{
    expression_ref, filter, filter_kind, member_ref, statement_ref, type_declaration_ref,
    type_ref, walk, Child, NodeKind, NodeRef, Walk,
};

pub use javelin_lex::{tokenize, Token, TokenKind, TokenStream};
pub use javelin_util::{Error, LexerError, NodePosition, ParserError, Position};

use log::{debug, trace};

/// Parses a complete compilation unit.
///
/// # Examples
///
/// ```
/// let unit = javelin_par::parse("class A {}").unwrap();
/// assert_eq!(unit.types.len(), 1);
/// ```
pub fn parse(source: &str) -> Result<CompilationUnit, Error> {
    debug!("parsing compilation unit ({} bytes)", source.len());
    let tokens = javelin_lex::tokenize(source)?;
    let mut parser = Parser::new(tokens);
    Ok(parser.parse_compilation_unit()?)
}

/// Parses a single expression; trailing input is an error.
///
/// # Examples
///
/// ```
/// let expr = javelin_par::parse_expression("a + b * c").unwrap();
/// assert!(matches!(expr, javelin_par::Expression::Binary(_)));
/// ```
pub fn parse_expression(source: &str) -> Result<Expression, Error> {
    debug!("parsing expression ({} bytes)", source.len());
    let tokens = javelin_lex::tokenize(source)?;
    let mut parser = Parser::new(tokens);
    let expression = parser.parse_expression()?;
    parser.expect_end()?;
    Ok(expression)
}

/// Parses a single class-body member declaration; trailing input is an
/// error.
///
/// # Examples
///
/// ```
/// use javelin_par::MemberDeclaration;
///
/// let member = javelin_par::parse_member_declaration("int x = 1;").unwrap();
/// assert!(matches!(member, MemberDeclaration::Field(_)));
/// ```
pub fn parse_member_declaration(source: &str) -> Result<MemberDeclaration, Error> {
    debug!("parsing member declaration ({} bytes)", source.len());
    let tokens = javelin_lex::tokenize(source)?;
    let mut parser = Parser::new(tokens);
    let member = parser.parse_member_declaration()?;
    parser.expect_end()?;
    Ok(member)
}

/// Parses a single type use; trailing input is an error.
///
/// # Examples
///
/// ```
/// use javelin_par::Type;
///
/// let ty = javelin_par::parse_type("Map<String, List<Integer>>").unwrap();
/// assert!(matches!(ty, Type::Reference(_)));
/// ```
pub fn parse_type(source: &str) -> Result<Type, Error> {
    let tokens = javelin_lex::tokenize(source)?;
    let mut parser = Parser::new(tokens);
    let ty = parser.parse_type()?;
    parser.expect_end()?;
    Ok(ty)
}

/// The recursive-descent Java parser.
///
/// Grammar productions are spread across the `decl`, `stmt`, `expr`, and
/// `types` modules; this type holds the cursor state and the small shared
/// helper vocabulary. The parser has no other state: speculation depth
/// lives in the call stack, composite-`>` bookkeeping in the stream.
pub struct Parser {
    tokens: TokenStream,
}

impl Parser {
    /// Creates a parser over a token stream.
    pub fn new(tokens: TokenStream) -> Self {
        Self { tokens }
    }

    // =========================================================================
    // CURSOR HELPERS
    // =========================================================================

    #[inline]
    pub(crate) fn peek(&self) -> &Token {
        self.tokens.peek()
    }

    #[inline]
    pub(crate) fn look(&self, k: usize) -> &Token {
        self.tokens.look_ahead(k)
    }

    #[inline]
    pub(crate) fn next_token(&mut self) -> Token {
        self.tokens.next()
    }

    #[inline]
    pub(crate) fn position(&self) -> Position {
        self.peek().position
    }

    #[inline]
    pub(crate) fn node_position(&self) -> NodePosition {
        NodePosition::from(self.position())
    }

    pub(crate) fn check_keyword(&self, keyword: &str) -> bool {
        self.peek().is_keyword(keyword)
    }

    pub(crate) fn check_separator(&self, separator: &str) -> bool {
        self.peek().is_separator(separator)
    }

    pub(crate) fn check_operator(&self, operator: &str) -> bool {
        self.peek().is_operator(operator)
    }

    pub(crate) fn check_identifier(&self) -> bool {
        self.peek().is_identifier()
    }

    pub(crate) fn accept_keyword(&mut self, keyword: &str) -> bool {
        if self.check_keyword(keyword) {
            self.tokens.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn accept_separator(&mut self, separator: &str) -> bool {
        if self.check_separator(separator) {
            self.tokens.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn accept_operator(&mut self, operator: &str) -> bool {
        if self.check_operator(operator) {
            self.tokens.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_keyword(&mut self, keyword: &str) -> Result<(), ParserError> {
        if self.accept_keyword(keyword) {
            Ok(())
        } else {
            self.error(format!("`{keyword}`"))
        }
    }

    pub(crate) fn expect_separator(&mut self, separator: &str) -> Result<(), ParserError> {
        if self.accept_separator(separator) {
            Ok(())
        } else {
            self.error(format!("`{separator}`"))
        }
    }

    pub(crate) fn expect_operator(&mut self, operator: &str) -> Result<(), ParserError> {
        if self.accept_operator(operator) {
            Ok(())
        } else {
            self.error(format!("`{operator}`"))
        }
    }

    /// Consumes and returns an identifier.
    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParserError> {
        if self.check_identifier() {
            Ok(self.next_token().value)
        } else {
            self.error("identifier")
        }
    }

    /// Fails the current production with an unexpected-token error.
    pub(crate) fn error<T>(&self, expected: impl Into<String>) -> Result<T, ParserError> {
        Err(ParserError::new(
            self.position(),
            self.peek().describe(),
            expected,
        ))
    }

    /// Requires the cursor to rest on end of input.
    pub(crate) fn expect_end(&mut self) -> Result<(), ParserError> {
        if self.peek().is_end() {
            Ok(())
        } else {
            self.error("end of input")
        }
    }

    // =========================================================================
    // SPECULATION
    // =========================================================================

    /// Runs `f` speculatively. On failure the stream is restored exactly,
    /// splits included, and `None` is returned; the error never escapes.
    pub(crate) fn try_parse<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParserError>,
    ) -> Option<T> {
        let marker = self.tokens.mark();
        match f(self) {
            Ok(value) => Some(value),
            Err(err) => {
                trace!(
                    "speculation abandoned at {}: expected {}, found {}",
                    err.position,
                    err.expected,
                    err.found
                );
                self.tokens.reset(marker);
                None
            }
        }
    }

    // =========================================================================
    // SHARED VOCABULARY
    // =========================================================================

    /// The Javadoc pending on the token about to be consumed, if any.
    pub(crate) fn pending_documentation(&self) -> Option<String> {
        self.tokens.pre_javadoc().map(|j| j.text.clone())
    }

    /// Splits or consumes one `>` closing a type-argument or
    /// type-parameter list.
    pub(crate) fn expect_close_gt(&mut self) -> Result<(), ParserError> {
        if self.accept_operator(">") {
            return Ok(());
        }
        if self.check_operator(">>") || self.check_operator(">>>") {
            self.tokens.split_composite_gt();
            self.tokens.advance(); // the leading `>`
            return Ok(());
        }
        self.error("`>`")
    }

    /// Parses a dotted identifier chain: `a`, `a.b.c`.
    pub(crate) fn parse_qualified_name(&mut self) -> Result<String, ParserError> {
        let mut name = self.expect_identifier()?;
        while self.check_separator(".") && self.look(1).is_identifier() {
            self.tokens.advance();
            name.push('.');
            name.push_str(&self.next_token().value);
        }
        Ok(name)
    }
}
