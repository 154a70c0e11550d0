//! Edge-case and property tests for the tokenizer.
//!
//! These tests pin down the corners of the Java lexical grammar that are
//! easy to get subtly wrong: composite operator munching, the numeric
//! literal families, Unicode escapes, and the totality/monotonicity
//! properties every input must satisfy.

use proptest::prelude::*;

use crate::token::TokenKind;
use crate::tokenize;

// =============================================================================
// COMPOSITE OPERATORS
// =============================================================================

#[test]
fn test_triple_shift_assign_is_one_token() {
    let stream = tokenize("x >>>= 1;").unwrap();
    let ops: Vec<_> = stream
        .tokens()
        .iter()
        .filter(|t| t.kind == TokenKind::Operator)
        .map(|t| t.value.as_str())
        .collect();
    assert_eq!(ops, vec![">>>="]);
}

#[test]
fn test_nested_generics_lex_composite() {
    // The lexer emits the composite token; splitting is the parser's job.
    let stream = tokenize("Foo<Bar<Baz>>> x").unwrap();
    let values: Vec<_> = stream.tokens().iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["Foo", "<", "Bar", "<", "Baz", ">>>", "x", ""]);
}

#[test]
fn test_shift_vs_two_closes() {
    let stream = tokenize("a >> b >>> c").unwrap();
    let ops: Vec<_> = stream
        .tokens()
        .iter()
        .filter(|t| t.kind == TokenKind::Operator)
        .map(|t| t.value.as_str())
        .collect();
    assert_eq!(ops, vec![">>", ">>>"]);
}

// =============================================================================
// NUMERIC LITERAL BOUNDARIES
// =============================================================================

#[test]
fn test_hex_float_boundary() {
    assert_eq!(
        tokenize("0x1.8p1f").unwrap().peek().kind,
        TokenKind::HexFloatingPoint
    );
    assert!(tokenize("0x_1").is_err());
}

#[test]
fn test_underscore_placement_matrix() {
    for ok in ["1_0", "0x1_F", "0b1_0", "01_7", "1_000e1_0", "0x1_2p1_0"] {
        assert!(tokenize(ok).is_ok(), "expected {ok:?} to lex");
    }
    for bad in ["_1x", "1_", "0x1_", "0b_1", "1_e5", "1e_5", "1._2", "1_.2"] {
        let stream = tokenize(bad);
        // `_1x` lexes as an identifier, everything else must error.
        if bad == "_1x" {
            assert_eq!(stream.unwrap().peek().kind, TokenKind::Identifier);
        } else {
            assert!(stream.is_err(), "expected {bad:?} to fail");
        }
    }
}

#[test]
fn test_integer_suffix_kinds() {
    for (src, kind) in [
        ("2L", TokenKind::DecimalInteger),
        ("07l", TokenKind::OctalInteger),
        ("0b11L", TokenKind::BinaryInteger),
        ("0xFL", TokenKind::HexInteger),
    ] {
        let stream = tokenize(src).unwrap();
        assert_eq!(stream.peek().kind, kind, "for {src:?}");
        assert_eq!(stream.peek().value, src);
    }
}

#[test]
fn test_dot_disambiguation() {
    // `.5` is a float, `.x` a separator plus identifier, `...` varargs.
    assert_eq!(
        tokenize(".5f").unwrap().peek().kind,
        TokenKind::DecimalFloatingPoint
    );
    let stream = tokenize(".x").unwrap();
    assert_eq!(stream.peek().value, ".");
    assert_eq!(stream.peek().kind, TokenKind::Separator);
    assert_eq!(tokenize("...").unwrap().peek().value, "...");
}

#[test]
fn test_method_call_on_float_literal() {
    // `1.0.equals(x)` lexes: the second dot is a separator.
    let stream = tokenize("1.0.equals(x)").unwrap();
    let values: Vec<_> = stream.tokens().iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["1.0", ".", "equals", "(", "x", ")", ""]);
}

// =============================================================================
// UNICODE ESCAPES
// =============================================================================

#[test]
fn test_escape_anywhere_including_operators() {
    // `=` written as an escape.
    let stream = tokenize("x \\u003D 1").unwrap();
    assert_eq!(stream.tokens()[1].value, "=");
    assert_eq!(stream.tokens()[1].kind, TokenKind::Operator);
    // The token after the escape is positioned per the raw source.
    assert_eq!(stream.tokens()[2].position.column, 10);
}

#[test]
fn test_escape_position_fidelity() {
    let stream = tokenize("\\u0069nt x;").unwrap();
    assert_eq!(stream.tokens()[0].value, "int");
    assert_eq!(stream.tokens()[0].kind, TokenKind::Keyword);
    assert_eq!(stream.tokens()[0].position.column, 1);
    // `x` sits at the column it occupies in the raw text.
    assert_eq!(stream.tokens()[1].position.column, 10);
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    /// Tokenization is total: any input either lexes to a sequence ending
    /// in EndOfInput or fails with a position inside the input.
    #[test]
    fn prop_tokenize_total(source in ".{0,60}") {
        match tokenize(&source) {
            Ok(stream) => {
                let tokens = stream.tokens();
                prop_assert!(tokens.last().unwrap().is_end());
                prop_assert_eq!(
                    tokens.iter().filter(|t| t.is_end()).count(),
                    1
                );
            }
            Err(err) => {
                let lines = source.lines().count().max(1);
                prop_assert!(err.position.line as usize <= lines + 1);
            }
        }
    }

    /// Token positions never decrease.
    #[test]
    fn prop_positions_monotone(source in "[a-zA-Z0-9+*/<>=!&|(){};, .\\n\"']{0,80}") {
        if let Ok(stream) = tokenize(&source) {
            for pair in stream.tokens().windows(2) {
                prop_assert!(pair[0].position <= pair[1].position);
            }
        }
    }

    /// Inserting whitespace between tokens changes neither kinds nor values.
    #[test]
    fn prop_whitespace_invariance(pad in "[ \\t\\n]{0,6}") {
        let compact = tokenize("int x=y+1;").unwrap();
        let padded_src = format!("int {pad}x{pad}={pad}y{pad}+{pad}1{pad};");
        let padded = tokenize(&padded_src).unwrap();
        let a: Vec<_> = compact.tokens().iter().map(|t| (t.kind, t.value.clone())).collect();
        let b: Vec<_> = padded.tokens().iter().map(|t| (t.kind, t.value.clone())).collect();
        prop_assert_eq!(a, b);
    }

    /// Identifiers that extend a keyword are identifiers, not keywords.
    #[test]
    fn prop_keyword_extension(suffix in "[a-z]{1,3}") {
        let source = format!("class{suffix}");
        let stream = tokenize(&source).unwrap();
        prop_assert_eq!(stream.peek().kind, TokenKind::Identifier);
    }
}

// =============================================================================
// COMMENT INTERACTION
// =============================================================================

#[test]
fn test_comment_invariance() {
    let plain = tokenize("int x = 1;").unwrap();
    let commented = tokenize("int /* a */ x /* b */ = /* c */ 1;").unwrap();
    let a: Vec<_> = plain
        .tokens()
        .iter()
        .map(|t| (t.kind, t.value.clone()))
        .collect();
    let b: Vec<_> = commented
        .tokens()
        .iter()
        .map(|t| (t.kind, t.value.clone()))
        .collect();
    assert_eq!(a, b);
}

#[test]
fn test_star_slash_inside_line_comment() {
    let stream = tokenize("a // */ still comment\nb").unwrap();
    let values: Vec<_> = stream.tokens().iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["a", "b", ""]);
}

#[test]
fn test_block_comment_not_nested() {
    // `/* /* */` closes at the first `*/`.
    let stream = tokenize("/* /* */ x").unwrap();
    assert_eq!(stream.peek().value, "x");
}
