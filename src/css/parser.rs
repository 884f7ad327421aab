//! Selector and declaration parsers.
//!
//! Selector lists are split on top-level commas and each rule is parsed on
//! its own, so one malformed rule never hides its siblings. Uses the
//! logos-based tokenizers from [`crate::css::tokenizer`].

use crate::css::model::{Declaration, Value};
use crate::css::selector::{Combinator, Selector, SelectorSequence, SimpleSelector, SimpleSelectorKind};
use crate::css::tokenizer::{selector_tokens, value_tokens, SelectorToken, Spanned, ValueToken};

/// Errors from selector and declaration parsing. Offsets are byte offsets
/// into the trimmed rule or declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty selector")]
    Empty,
    #[error("empty selector term at offset {offset}")]
    EmptyTerm { offset: usize },
    #[error("expected identifier after '{sigil}' at offset {offset}")]
    MissingIdentifier { sigil: char, offset: usize },
    #[error("unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter { character: char, offset: usize },
    #[error("unexpected '{text}' at offset {offset}")]
    UnexpectedToken { text: String, offset: usize },
    #[error("unterminated attribute selector at offset {offset}")]
    UnterminatedAttribute { offset: usize },
    #[error("declaration '{0}' is missing ':'")]
    MissingColon(String),
    #[error("declaration '{0}' has no property name")]
    MissingProperty(String),
    #[error("declaration '{0}' has no value")]
    MissingValue(String),
    #[error("invalid value in '{text}' at offset {offset}")]
    InvalidValue { text: String, offset: usize },
    #[error("unbalanced braces at offset {offset}")]
    UnbalancedBraces { offset: usize },
}

/// A rule that failed to parse and was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRule {
    /// Position of the rule within its comma-separated list.
    pub index: usize,
    /// The trimmed rule text.
    pub rule: String,
    pub error: ParseError,
}

/// Result of parsing a comma-separated selector list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSelectors {
    pub selectors: Vec<Selector>,
    pub skipped: Vec<SkippedRule>,
}

impl ParsedSelectors {
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

/// Parse a comma-separated list of selector rules.
///
/// Rules that fail are recorded in [`ParsedSelectors::skipped`] and logged;
/// the others are still returned, in order.
pub fn parse(rules: &str) -> ParsedSelectors {
    let mut parsed = ParsedSelectors::default();
    for (index, rule) in split_top_level(rules).into_iter().enumerate() {
        match parse_rule(rule) {
            Ok(selector) => parsed.selectors.push(selector),
            Err(error) => {
                log::warn!("skipping selector rule {index} '{}': {error}", rule.trim());
                parsed.skipped.push(SkippedRule { index, rule: rule.trim().to_owned(), error });
            }
        }
    }
    parsed
}

/// Split on commas that are not inside `[...]` or a quoted string.
fn split_top_level(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut start = 0;

    for (i, ch) in input.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '[' if !in_string => depth += 1,
            ']' if !in_string => depth = depth.saturating_sub(1),
            ',' if !in_string && depth == 0 => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

/// Parse exactly one selector rule.
pub fn parse_rule(rule: &str) -> Result<Selector, ParseError> {
    let text = rule.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let tokens = selector_tokens(text).map_err(|offset| ParseError::UnexpectedCharacter {
        character: text[offset..].chars().next().unwrap_or('?'),
        offset,
    })?;

    let mut parser = SelectorParser { tokens, cursor: 0, len: text.len() };
    let sequences = parser.parse_sequences()?;
    Ok(Selector::from_sequences(sequences, text))
}

/// Cursor over selector tokens.
struct SelectorParser<'a> {
    tokens: Vec<Spanned<'a, SelectorToken>>,
    cursor: usize,
    len: usize,
}

impl<'a> SelectorParser<'a> {
    fn peek(&self) -> Option<&Spanned<'a, SelectorToken>> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<Spanned<'a, SelectorToken>> {
        let token = self.tokens.get(self.cursor).copied();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn offset(&self) -> usize {
        self.peek().map(|t| t.start).unwrap_or(self.len)
    }

    /// Returns `true` if the current token is immediately adjacent (no
    /// whitespace) to the previous token.
    fn is_adjacent(&self) -> bool {
        match (self.cursor.checked_sub(1).and_then(|i| self.tokens.get(i)), self.peek()) {
            (Some(prev), Some(curr)) => curr.start == prev.end,
            _ => false,
        }
    }

    /// Parse whitespace- or `>`-separated compound terms.
    fn parse_sequences(&mut self) -> Result<Vec<SelectorSequence>, ParseError> {
        let mut sequences = Vec::new();
        let mut current = self.parse_compound()?;

        loop {
            let combinator = match self.peek().map(|t| t.token) {
                None => {
                    sequences.push(SelectorSequence { simple_selectors: current, combinator: Combinator::None });
                    return Ok(sequences);
                }
                Some(SelectorToken::GreaterThan) => {
                    self.advance();
                    Combinator::Child
                }
                Some(_) => Combinator::Descendant,
            };
            sequences.push(SelectorSequence { simple_selectors: current, combinator });
            current = self.parse_compound()?;
        }
    }

    /// Parse one compound term: a first simple selector plus every simple
    /// selector glued to it without whitespace.
    fn parse_compound(&mut self) -> Result<Vec<SimpleSelector>, ParseError> {
        let mut simple_selectors = vec![self.parse_simple()?];
        while self.is_adjacent()
            && self.peek().is_some_and(|t| {
                matches!(
                    t.token,
                    SelectorToken::Ident
                        | SelectorToken::Star
                        | SelectorToken::Hash
                        | SelectorToken::Dot
                        | SelectorToken::Colon
                        | SelectorToken::BracketOpen
                )
            })
        {
            simple_selectors.push(self.parse_simple()?);
        }
        Ok(simple_selectors)
    }

    fn parse_simple(&mut self) -> Result<SimpleSelector, ParseError> {
        let offset = self.offset();
        let Some(token) = self.advance() else {
            return Err(ParseError::EmptyTerm { offset });
        };

        match token.token {
            SelectorToken::Ident => Ok(SimpleSelector::new(SimpleSelectorKind::Type, token.text)),
            SelectorToken::Star => Ok(SimpleSelector::new(SimpleSelectorKind::Universal, "*")),
            SelectorToken::Hash => self.sigil_name('#', token.start, SimpleSelectorKind::Id),
            SelectorToken::Dot => self.sigil_name('.', token.start, SimpleSelectorKind::Class),
            SelectorToken::Colon => self.sigil_name(':', token.start, SimpleSelectorKind::Pseudo),
            SelectorToken::BracketOpen => self.parse_attribute(token.start),
            SelectorToken::GreaterThan => Err(ParseError::EmptyTerm { offset }),
            _ => Err(ParseError::UnexpectedToken { text: token.text.to_owned(), offset }),
        }
    }

    /// The identifier directly following a sigil.
    fn sigil_name(
        &mut self,
        sigil: char,
        offset: usize,
        kind: SimpleSelectorKind,
    ) -> Result<SimpleSelector, ParseError> {
        if self.is_adjacent() && self.peek().is_some_and(|t| t.token == SelectorToken::Ident) {
            if let Some(name) = self.advance() {
                return Ok(SimpleSelector::new(kind, name.text));
            }
        }
        Err(ParseError::MissingIdentifier { sigil, offset })
    }

    /// `[name]` or `[name=value]`; the `[` is already consumed.
    fn parse_attribute(&mut self, offset: usize) -> Result<SimpleSelector, ParseError> {
        let name = match self.advance() {
            Some(t) if t.token == SelectorToken::Ident => t.text,
            _ => return Err(ParseError::MissingIdentifier { sigil: '[', offset }),
        };

        match self.advance().map(|t| t.token) {
            Some(SelectorToken::BracketClose) => {
                Ok(SimpleSelector::new(SimpleSelectorKind::Attribute, name))
            }
            Some(SelectorToken::Equals) => {
                let value = match self.advance() {
                    Some(t) if matches!(t.token, SelectorToken::Ident | SelectorToken::Number) => t.text,
                    Some(t) if t.token == SelectorToken::StringLiteral => &t.text[1..t.text.len() - 1],
                    _ => return Err(ParseError::UnterminatedAttribute { offset }),
                };
                match self.advance().map(|t| t.token) {
                    Some(SelectorToken::BracketClose) => Ok(SimpleSelector::new(
                        SimpleSelectorKind::Attribute,
                        format!("{name}={value}"),
                    )),
                    _ => Err(ParseError::UnterminatedAttribute { offset }),
                }
            }
            _ => Err(ParseError::UnterminatedAttribute { offset }),
        }
    }
}

/// Parse one `property: values` declaration (without the trailing `;`).
pub fn parse_declaration(text: &str) -> Result<Declaration, ParseError> {
    let text = text.trim();
    let (property, raw_values) =
        text.split_once(':').ok_or_else(|| ParseError::MissingColon(text.to_owned()))?;
    let property = property.trim();
    if property.is_empty() {
        return Err(ParseError::MissingProperty(text.to_owned()));
    }

    let values = parse_values(raw_values).map_err(|offset| ParseError::InvalidValue {
        text: text.to_owned(),
        offset: offset + property.len() + 1,
    })?;
    if values.is_empty() {
        return Err(ParseError::MissingValue(text.to_owned()));
    }

    Ok(Declaration::new(property.to_ascii_lowercase(), values))
}

/// Tokenize a value list. Fails with the offset of the first bad character.
pub fn parse_values(input: &str) -> Result<Vec<Value>, usize> {
    let tokens = value_tokens(input)?;
    let mut values = Vec::with_capacity(tokens.len());
    for (token, text) in tokens {
        let value = match token {
            ValueToken::HexColor => Value::Color(text[1..].to_owned()),
            ValueToken::Number => match text.parse::<f32>() {
                Ok(n) => Value::Number(n),
                Err(_) => return Err(input.find(text).unwrap_or(0)),
            },
            ValueToken::StringLiteral | ValueToken::StringLiteralSingle => {
                Value::String(text[1..text.len() - 1].to_owned())
            }
            ValueToken::Ident => Value::Ident(text.to_owned()),
        };
        values.push(value);
    }
    Ok(values)
}
