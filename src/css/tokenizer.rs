//! logos-based tokenizers for selector text and declaration values.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `#fff` as HexColor beats a shorter match)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Selectors and values are lexed separately: in a selector `#abc` is an id,
//! while in a value it is a color.

use logos::Logos;

/// Selector token produced by [`selector_tokens`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum SelectorToken {
    /// Identifier: type names, ids, classes, pseudo names, attribute names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// Number, only meaningful as an attribute value.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    /// Double-quoted string, only meaningful as an attribute value.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// `#`
    #[token("#")]
    Hash,

    /// `.`
    #[token(".")]
    Dot,

    /// `:`
    #[token(":")]
    Colon,

    /// `*`
    #[token("*")]
    Star,

    /// `>`
    #[token(">")]
    GreaterThan,

    /// `,`
    #[token(",")]
    Comma,

    /// `[`
    #[token("[")]
    BracketOpen,

    /// `]`
    #[token("]")]
    BracketClose,

    /// `=`
    #[token("=")]
    Equals,
}

/// Declaration value token produced by [`value_tokens`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f,]+")]
pub enum ValueToken {
    /// Hex color: `#fff`, `#ff00aa`, `#ff00aa80` (3-8 hex digits).
    #[regex(r"#[0-9a-fA-F]{3,8}")]
    HexColor,

    /// Number: integer or float, possibly negative.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Identifier: keywords and color names.
    #[regex(r"-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,
}

/// A token with its source text and byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned<'a, T> {
    pub token: T,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Tokenize selector text.
///
/// Fails with the byte offset of the first character no token accepts.
pub fn selector_tokens(input: &str) -> Result<Vec<Spanned<'_, SelectorToken>>, usize> {
    SelectorToken::lexer(input)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok(Spanned { token, text: &input[span.clone()], start: span.start, end: span.end }),
            Err(()) => Err(span.start),
        })
        .collect()
}

/// Tokenize a declaration value.
///
/// Fails with the byte offset of the first character no token accepts.
pub fn value_tokens(input: &str) -> Result<Vec<(ValueToken, &str)>, usize> {
    ValueToken::lexer(input)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok((token, &input[span])),
            Err(()) => Err(span.start),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector_kinds(input: &str) -> Vec<SelectorToken> {
        selector_tokens(input).unwrap().into_iter().map(|t| t.token).collect()
    }

    fn value_kinds(input: &str) -> Vec<(ValueToken, &str)> {
        value_tokens(input).unwrap()
    }

    // ── Selector tokens ──────────────────────────────────────────────

    #[test]
    fn selector_punctuation() {
        assert_eq!(
            selector_kinds("# . : * > , [ ] ="),
            vec![
                SelectorToken::Hash,
                SelectorToken::Dot,
                SelectorToken::Colon,
                SelectorToken::Star,
                SelectorToken::GreaterThan,
                SelectorToken::Comma,
                SelectorToken::BracketOpen,
                SelectorToken::BracketClose,
                SelectorToken::Equals,
            ]
        );
    }

    #[test]
    fn hash_then_ident_is_not_a_color() {
        assert_eq!(selector_kinds("#fff"), vec![SelectorToken::Hash, SelectorToken::Ident]);
    }

    #[test]
    fn compound_selector_spans_are_adjacent() {
        let tokens = selector_tokens("Panel#main .foo").unwrap();
        assert_eq!(tokens[0].text, "Panel");
        assert_eq!(tokens[1].start, tokens[0].end);
        assert_eq!(tokens[2].text, "main");
        // Whitespace gap before `.foo`.
        assert!(tokens[3].start > tokens[2].end);
    }

    #[test]
    fn attribute_selector_tokens() {
        assert_eq!(
            selector_kinds(r#"[kind="big"][level=2]"#),
            vec![
                SelectorToken::BracketOpen,
                SelectorToken::Ident,
                SelectorToken::Equals,
                SelectorToken::StringLiteral,
                SelectorToken::BracketClose,
                SelectorToken::BracketOpen,
                SelectorToken::Ident,
                SelectorToken::Equals,
                SelectorToken::Number,
                SelectorToken::BracketClose,
            ]
        );
    }

    #[test]
    fn unknown_character_reports_offset() {
        assert_eq!(selector_tokens("Panel + Button"), Err(6));
        assert_eq!(selector_tokens("Panel ~ Button"), Err(6));
    }

    #[test]
    fn empty_selector_input() {
        assert!(selector_tokens("  \t\n ").unwrap().is_empty());
    }

    // ── Value tokens ─────────────────────────────────────────────────

    #[test]
    fn value_numbers_and_idents() {
        assert_eq!(
            value_kinds("10 -5 3.5 top-left"),
            vec![
                (ValueToken::Number, "10"),
                (ValueToken::Number, "-5"),
                (ValueToken::Number, "3.5"),
                (ValueToken::Ident, "top-left"),
            ]
        );
    }

    #[test]
    fn value_hex_colors() {
        assert_eq!(
            value_kinds("#fff #ff00aa #ff00aa80"),
            vec![
                (ValueToken::HexColor, "#fff"),
                (ValueToken::HexColor, "#ff00aa"),
                (ValueToken::HexColor, "#ff00aa80"),
            ]
        );
    }

    #[test]
    fn value_strings() {
        assert_eq!(
            value_kinds(r#""hello" 'world'"#),
            vec![(ValueToken::StringLiteral, "\"hello\""), (ValueToken::StringLiteralSingle, "'world'")]
        );
    }

    #[test]
    fn value_commas_are_separators() {
        assert_eq!(
            value_kinds("1,2, 3"),
            vec![(ValueToken::Number, "1"), (ValueToken::Number, "2"), (ValueToken::Number, "3")]
        );
    }

    #[test]
    fn value_rejects_stray_punctuation() {
        assert_eq!(value_tokens("10 {"), Err(3));
    }
}
