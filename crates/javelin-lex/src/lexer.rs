//! The Java tokenizer.
//!
//! A hand-written, position-tracking scanner for the Java SE 8 lexical
//! grammar. Tokens are produced eagerly; the first malformed construct
//! aborts the scan with a [`LexerError`].
//!
//! Dispatch is direct-coded: `next_token` skips insignificant input, records
//! the token start, and branches on the first character to a specialized
//! scanning function. Operators use maximal munch (`>>>=` is one token);
//! the composite `>>` and `>>>` tokens may later be split by the parser
//! when they close nested type-argument lists.

use javelin_util::{LexerError, Position};

use crate::cursor::Cursor;
use crate::token::{is_reserved_keyword, Javadoc, Token, TokenKind};

/// True for characters that may start a Java identifier.
#[inline]
fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// True for characters that may continue a Java identifier.
#[inline]
fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// The Java scanner.
///
/// # Example
///
/// ```
/// use javelin_lex::lexer::Lexer;
/// use javelin_lex::token::TokenKind;
///
/// let tokens = Lexer::new("class A {}").tokenize().unwrap();
/// assert_eq!(tokens[0].kind, TokenKind::Keyword);
/// assert_eq!(tokens[0].value, "class");
/// assert_eq!(tokens.last().unwrap().kind, TokenKind::EndOfInput);
/// ```
pub struct Lexer<'a> {
    /// Character cursor over the source.
    cursor: Cursor<'a>,

    /// Javadoc comment waiting to be attached to the next token.
    pending_javadoc: Option<Javadoc>,

    /// Byte offset of the current token start.
    token_start: usize,

    /// Line/column of the current token start.
    token_position: Position,
}

impl<'a> Lexer<'a> {
    /// Creates a scanner over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            pending_javadoc: None,
            token_start: 0,
            token_position: Position::START,
        }
    }

    /// Scans the entire input, producing a token vector terminated by
    /// exactly one `EndOfInput` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is_end();
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Scans a single token.
    fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace_and_comments()?;

        self.token_start = self.cursor.position();
        self.token_position = self.cursor.pos();

        if self.cursor.is_at_end() {
            return Ok(self.attach_javadoc(Token::end_of_input(self.token_position)));
        }

        let c = self.cursor.current_char();
        match c {
            '(' | ')' | '{' | '}' | '[' | ']' | ';' | ',' => {
                self.cursor.advance();
                Ok(self.finish(TokenKind::Separator))
            }
            '.' => {
                if self.cursor.peek_char(1).is_ascii_digit() {
                    self.lex_number()
                } else {
                    self.lex_dot()
                }
            }
            ':' => {
                self.cursor.advance();
                if self.cursor.match_char(':') {
                    Ok(self.finish(TokenKind::Separator))
                } else {
                    Ok(self.finish(TokenKind::Operator))
                }
            }
            '@' => {
                self.cursor.advance();
                Ok(self.finish(TokenKind::Annotation))
            }
            '\'' => self.lex_character(),
            '"' => self.lex_string(),
            '/' => {
                // Comments were consumed above, so this is `/` or `/=`.
                self.cursor.advance();
                self.cursor.match_char('=');
                Ok(self.finish(TokenKind::Operator))
            }
            _ if is_identifier_start(c) => Ok(self.lex_identifier()),
            _ if c.is_ascii_digit() => self.lex_number(),
            '+' | '-' | '*' | '%' | '=' | '!' | '<' | '>' | '&' | '|' | '^' | '~' | '?' => {
                Ok(self.lex_operator(c))
            }
            _ => {
                if self.cursor.at_malformed_escape() {
                    return Err(self.error("invalid unicode escape"));
                }
                Err(self.error(format!("stray character {c:?}")))
            }
        }
    }

    /// Scans `.` or `...`; a lone pair of dots lexes as two tokens.
    fn lex_dot(&mut self) -> Result<Token, LexerError> {
        self.cursor.advance();
        if self.cursor.current_char() == '.' && self.cursor.peek_char(1) == '.' {
            self.cursor.advance_n(2);
        }
        Ok(self.finish(TokenKind::Separator))
    }

    // =========================================================================
    // WHITESPACE, COMMENTS, JAVADOC
    // =========================================================================

    /// Skips whitespace and comments, recording Javadoc comments.
    ///
    /// A `/** ... */` comment becomes the pending Javadoc for the next
    /// token; any other comment discards a pending Javadoc, so a doc
    /// comment never attaches past intervening commentary.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexerError> {
        loop {
            if self.cursor.is_at_end() {
                return Ok(());
            }
            let c = self.cursor.current_char();
            if c.is_whitespace() || c == '\u{feff}' {
                self.cursor.advance();
                continue;
            }
            if c == '/' {
                match self.cursor.peek_char(1) {
                    '/' => {
                        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                            self.cursor.advance();
                        }
                        self.pending_javadoc = None;
                        continue;
                    }
                    '*' => {
                        self.skip_block_comment()?;
                        continue;
                    }
                    _ => return Ok(()),
                }
            }
            return Ok(());
        }
    }

    /// Skips a `/* ... */` comment, capturing it when it is a Javadoc.
    fn skip_block_comment(&mut self) -> Result<(), LexerError> {
        let start_byte = self.cursor.position();
        let start_pos = self.cursor.pos();
        self.cursor.advance_n(2); // `/*`

        // `/**` opens a Javadoc unless the comment is the empty `/**/`.
        let is_javadoc =
            self.cursor.current_char() == '*' && self.cursor.peek_char(1) != '/';

        loop {
            if self.cursor.is_at_end() {
                return Err(LexerError::new(start_pos, "unterminated block comment"));
            }
            if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                self.cursor.advance_n(2);
                break;
            }
            self.cursor.advance();
        }

        if is_javadoc {
            let text = self.cursor.decoded_slice_from(start_byte).into_owned();
            self.pending_javadoc = Some(Javadoc {
                position: start_pos,
                text,
            });
        } else {
            self.pending_javadoc = None;
        }
        Ok(())
    }

    // =========================================================================
    // IDENTIFIERS AND KEYWORDS
    // =========================================================================

    /// Scans an identifier, reclassifying reserved words and the literal
    /// words `true`/`false`/`null`.
    fn lex_identifier(&mut self) -> Token {
        while is_identifier_part(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let value = self.cursor.decoded_slice_from(self.token_start);
        let kind = match value.as_ref() {
            "true" | "false" => TokenKind::Boolean,
            "null" => TokenKind::Null,
            text if is_reserved_keyword(text) => TokenKind::Keyword,
            _ => TokenKind::Identifier,
        };
        let token = Token::new(kind, value, self.token_position);
        self.attach_javadoc(token)
    }

    // =========================================================================
    // NUMERIC LITERALS
    // =========================================================================

    /// Scans a numeric literal of any family. The literal text is kept
    /// verbatim; only its shape is validated.
    fn lex_number(&mut self) -> Result<Token, LexerError> {
        let first = self.cursor.current_char();

        // Leading-dot decimal float: `.5f`.
        if first == '.' {
            self.cursor.advance();
            self.scan_digits(10)?;
            if matches!(self.cursor.current_char(), 'e' | 'E') {
                self.scan_exponent()?;
            }
            self.scan_float_suffix();
            self.check_literal_end()?;
            return Ok(self.finish(TokenKind::DecimalFloatingPoint));
        }

        if first == '0' {
            match self.cursor.peek_char(1) {
                'x' | 'X' => {
                    self.cursor.advance_n(2);
                    return self.lex_hex();
                }
                'b' | 'B' => {
                    self.cursor.advance_n(2);
                    return self.lex_binary();
                }
                _ => {}
            }
        }

        // Scan the leading digit run; octal classification waits until we
        // know the literal is not a decimal float (`017.5` is a float).
        self.scan_digits(10)?;

        match self.cursor.current_char() {
            '.' => {
                self.cursor.advance();
                self.scan_digits(10)?;
                if matches!(self.cursor.current_char(), 'e' | 'E') {
                    self.scan_exponent()?;
                }
                self.scan_float_suffix();
                self.check_literal_end()?;
                Ok(self.finish(TokenKind::DecimalFloatingPoint))
            }
            'e' | 'E' => {
                self.scan_exponent()?;
                self.scan_float_suffix();
                self.check_literal_end()?;
                Ok(self.finish(TokenKind::DecimalFloatingPoint))
            }
            'f' | 'F' | 'd' | 'D' => {
                self.cursor.advance();
                self.check_literal_end()?;
                Ok(self.finish(TokenKind::DecimalFloatingPoint))
            }
            _ => {
                let digits = self.cursor.decoded_slice_from(self.token_start);
                let kind = if digits.len() > 1 && digits.starts_with('0') {
                    if let Some(bad) = digits.chars().find(|&c| !matches!(c, '0'..='7' | '_')) {
                        return Err(self.error(format!(
                            "invalid digit `{bad}` in octal literal"
                        )));
                    }
                    TokenKind::OctalInteger
                } else {
                    TokenKind::DecimalInteger
                };
                if matches!(self.cursor.current_char(), 'l' | 'L') {
                    self.cursor.advance();
                }
                self.check_literal_end()?;
                Ok(self.finish(kind))
            }
        }
    }

    /// Scans a hexadecimal literal after the `0x` prefix: an integer, or a
    /// float with a mandatory `p` exponent.
    fn lex_hex(&mut self) -> Result<Token, LexerError> {
        let saw_digits = self.scan_digits(16)?;

        match self.cursor.current_char() {
            '.' => {
                self.cursor.advance();
                let saw_fraction = self.scan_digits(16)?;
                if !saw_digits && !saw_fraction {
                    return Err(self.error("no digits in hexadecimal literal"));
                }
                self.scan_hex_exponent()?;
                self.scan_float_suffix();
                self.check_literal_end()?;
                Ok(self.finish(TokenKind::HexFloatingPoint))
            }
            'p' | 'P' if saw_digits => {
                self.scan_hex_exponent()?;
                self.scan_float_suffix();
                self.check_literal_end()?;
                Ok(self.finish(TokenKind::HexFloatingPoint))
            }
            _ => {
                if !saw_digits {
                    return Err(self.error("no digits in hexadecimal literal"));
                }
                if matches!(self.cursor.current_char(), 'l' | 'L') {
                    self.cursor.advance();
                }
                self.check_literal_end()?;
                Ok(self.finish(TokenKind::HexInteger))
            }
        }
    }

    /// Scans a binary literal after the `0b` prefix.
    fn lex_binary(&mut self) -> Result<Token, LexerError> {
        if !self.scan_digits(2)? {
            return Err(self.error("no digits in binary literal"));
        }
        if matches!(self.cursor.current_char(), 'l' | 'L') {
            self.cursor.advance();
        }
        self.check_literal_end()?;
        Ok(self.finish(TokenKind::BinaryInteger))
    }

    /// Scans a run of digits in `radix`, with underscores allowed only
    /// between digits. Returns whether any digit was consumed.
    fn scan_digits(&mut self, radix: u32) -> Result<bool, LexerError> {
        let mut any = false;
        loop {
            let c = self.cursor.current_char();
            if c == '_' {
                if !any {
                    return Err(self.error_here("illegal underscore in numeric literal"));
                }
                while self.cursor.current_char() == '_' {
                    self.cursor.advance();
                }
                if self.cursor.current_char().to_digit(radix).is_none() {
                    return Err(self.error_here("illegal underscore in numeric literal"));
                }
            } else if c.to_digit(radix).is_some() {
                any = true;
                self.cursor.advance();
            } else {
                return Ok(any);
            }
        }
    }

    /// Scans a decimal exponent: `e`/`E`, optional sign, digits.
    fn scan_exponent(&mut self) -> Result<(), LexerError> {
        self.cursor.advance();
        if matches!(self.cursor.current_char(), '+' | '-') {
            self.cursor.advance();
        }
        if !self.scan_digits(10)? {
            return Err(self.error_here("empty exponent in numeric literal"));
        }
        Ok(())
    }

    /// Scans the mandatory binary exponent of a hexadecimal float.
    fn scan_hex_exponent(&mut self) -> Result<(), LexerError> {
        if !matches!(self.cursor.current_char(), 'p' | 'P') {
            return Err(
                self.error_here("hexadecimal floating-point literal requires an exponent")
            );
        }
        self.cursor.advance();
        if matches!(self.cursor.current_char(), '+' | '-') {
            self.cursor.advance();
        }
        if !self.scan_digits(10)? {
            return Err(self.error_here("empty exponent in numeric literal"));
        }
        Ok(())
    }

    /// Consumes an optional `f F d D` suffix.
    fn scan_float_suffix(&mut self) {
        if matches!(self.cursor.current_char(), 'f' | 'F' | 'd' | 'D') {
            self.cursor.advance();
        }
    }

    /// Rejects identifier characters or a second fraction glued onto a
    /// finished numeric literal (`123abc`, `0b12`, `1.2.3`).
    fn check_literal_end(&mut self) -> Result<(), LexerError> {
        let c = self.cursor.current_char();
        if is_identifier_part(c) || c.is_ascii_digit() {
            return Err(self.error_here(format!("invalid character {c:?} in numeric literal")));
        }
        if c == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            return Err(self.error_here("malformed numeric literal"));
        }
        Ok(())
    }

    // =========================================================================
    // CHARACTER AND STRING LITERALS
    // =========================================================================

    /// Scans a character literal, quotes included in the token text.
    fn lex_character(&mut self) -> Result<Token, LexerError> {
        self.cursor.advance(); // opening quote
        match self.cursor.current_char() {
            '\'' => return Err(self.error("empty character literal")),
            '\\' => self.scan_escape_sequence()?,
            _ => {
                if self.cursor.is_at_end() {
                    return Err(self.error("unterminated character literal"));
                }
                self.cursor.advance();
            }
        }
        if !self.cursor.match_char('\'') {
            return Err(self.error("unterminated character literal"));
        }
        Ok(self.finish(TokenKind::Character))
    }

    /// Scans a string literal, quotes included in the token text.
    ///
    /// Control characters pass through transparently; only escape shape is
    /// validated.
    fn lex_string(&mut self) -> Result<Token, LexerError> {
        self.cursor.advance(); // opening quote
        loop {
            if self.cursor.is_at_end() {
                return Err(self.error("unterminated string literal"));
            }
            match self.cursor.current_char() {
                '"' => {
                    self.cursor.advance();
                    return Ok(self.finish(TokenKind::String));
                }
                '\\' => self.scan_escape_sequence()?,
                _ => self.cursor.advance(),
            }
        }
    }

    /// Validates and consumes one escape sequence. The cursor sits on the
    /// backslash; eligible `\u` escapes never reach here because the
    /// cursor decodes them transparently.
    fn scan_escape_sequence(&mut self) -> Result<(), LexerError> {
        if self.cursor.at_malformed_escape() {
            return Err(self.error_here("invalid unicode escape"));
        }
        let escape_pos = self.cursor.pos();
        self.cursor.advance(); // backslash
        let c = self.cursor.current_char();
        match c {
            'b' | 't' | 'n' | 'f' | 'r' | '"' | '\'' | '\\' => {
                self.cursor.advance();
                Ok(())
            }
            '0'..='7' => {
                // Octal escape, at most \377.
                let extra = if c <= '3' { 2 } else { 1 };
                self.cursor.advance();
                for _ in 0..extra {
                    if !matches!(self.cursor.current_char(), '0'..='7') {
                        break;
                    }
                    self.cursor.advance();
                }
                Ok(())
            }
            _ => {
                if self.cursor.is_at_end() {
                    return Err(self.error_here("unexpected end of input in escape sequence"));
                }
                Err(LexerError::new(
                    escape_pos,
                    format!("invalid escape sequence `\\{c}`"),
                ))
            }
        }
    }

    // =========================================================================
    // OPERATORS
    // =========================================================================

    /// Scans an operator with maximal munch.
    fn lex_operator(&mut self, first: char) -> Token {
        self.cursor.advance();
        match first {
            '+' => {
                let _ = self.cursor.match_char('=') || self.cursor.match_char('+');
            }
            '-' => {
                let _ = self.cursor.match_char('=')
                    || self.cursor.match_char('-')
                    || self.cursor.match_char('>');
            }
            '&' => {
                let _ = self.cursor.match_char('&') || self.cursor.match_char('=');
            }
            '|' => {
                let _ = self.cursor.match_char('|') || self.cursor.match_char('=');
            }
            '*' | '/' | '%' | '^' | '=' | '!' => {
                self.cursor.match_char('=');
            }
            '<' => {
                // `<`, `<=`, `<<`, `<<=`
                self.cursor.match_char('<');
                self.cursor.match_char('=');
            }
            '>' => {
                if self.cursor.current_char() == '>' {
                    if self.cursor.peek_char(1) == '>' {
                        // `>>>` or `>>>=`
                        self.cursor.advance_n(2);
                        self.cursor.match_char('=');
                    } else if self.cursor.peek_char(1) == '=' {
                        self.cursor.advance_n(2); // `>>=`
                    } else {
                        self.cursor.advance(); // `>>`
                    }
                } else {
                    self.cursor.match_char('='); // `>=`
                }
            }
            _ => {} // `~` and `?` stand alone
        }
        self.finish(TokenKind::Operator)
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// Builds the token for the text scanned since `token_start`.
    fn finish(&mut self, kind: TokenKind) -> Token {
        let value = self.cursor.decoded_slice_from(self.token_start);
        let token = Token::new(kind, value, self.token_position);
        self.attach_javadoc(token)
    }

    /// Moves the pending Javadoc onto `token`.
    fn attach_javadoc(&mut self, mut token: Token) -> Token {
        if let Some(javadoc) = self.pending_javadoc.take() {
            token.javadoc = Some(Box::new(javadoc));
        }
        token
    }

    /// A lexer error at the start of the current token.
    fn error(&self, message: impl Into<String>) -> LexerError {
        LexerError::new(self.token_position, message)
    }

    /// A lexer error at the current cursor position.
    fn error_here(&self, message: impl Into<String>) -> LexerError {
        LexerError::new(self.cursor.pos(), message)
    }
}
