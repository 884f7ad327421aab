//! Stylesheets: `selector-list { property: values; }` blocks.
//!
//! Every selector of a block is paired with the block's property mapping,
//! shared through an `Arc` so sheets stay `Send + Sync` and cheap to clone.
//! Parsing never fails as a whole: malformed selectors, declarations and
//! blocks are recorded in [`Stylesheet::skipped`] and logged.

use std::sync::Arc;

use crate::css::model::Style;
use crate::css::parser::{self, ParseError};
use crate::css::selector::Selector;

/// A selector paired with the style it applies.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub selector: Selector,
    pub style: Arc<Style>,
}

/// Something left out while parsing a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// Index of the `{ ... }` block the problem was found in.
    pub block: usize,
    /// The offending selector, declaration or block text, trimmed.
    pub text: String,
    pub error: ParseError,
}

/// An ordered list of style rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    rules: Vec<StyleRule>,
    skipped: Vec<Skipped>,
}

impl Stylesheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse stylesheet text. `/* ... */` comments are ignored.
    pub fn parse(input: &str) -> Self {
        let cleaned = strip_comments(input);
        let mut sheet = Stylesheet::new();
        let mut rest = cleaned.as_str();
        let mut consumed = 0;
        let mut block = 0;

        while !rest.trim().is_empty() {
            let Some(open) = rest.find('{') else {
                sheet.skip(block, rest, ParseError::UnbalancedBraces { offset: consumed });
                break;
            };
            let Some(close) = matching_brace(rest, open) else {
                sheet.skip(block, rest, ParseError::UnbalancedBraces { offset: consumed + open });
                break;
            };

            let selector_text = &rest[..open];
            let body = &rest[open + 1..close];
            if let Some(nested) = body.find('{') {
                sheet.skip(
                    block,
                    &rest[..=close],
                    ParseError::UnbalancedBraces { offset: consumed + open + 1 + nested },
                );
            } else {
                sheet.parse_block(block, selector_text, body);
            }

            consumed += close + 1;
            rest = &rest[close + 1..];
            block += 1;
        }

        log::debug!(
            "parsed stylesheet: {} rules, {} skipped",
            sheet.rules.len(),
            sheet.skipped.len()
        );
        sheet
    }

    fn parse_block(&mut self, block: usize, selector_text: &str, body: &str) {
        let mut declarations = Vec::new();
        for text in body.split(';').filter(|d| !d.trim().is_empty()) {
            match parser::parse_declaration(text) {
                Ok(decl) => declarations.push(decl),
                Err(error) => self.skip(block, text, error),
            }
        }

        let parsed = parser::parse(selector_text);
        for skipped in parsed.skipped {
            self.skipped.push(Skipped { block, text: skipped.rule, error: skipped.error });
        }

        let style = Arc::new(Style::from_declarations(declarations));
        for selector in parsed.selectors {
            self.rules.push(StyleRule { selector, style: Arc::clone(&style) });
        }
    }

    fn skip(&mut self, block: usize, text: &str, error: ParseError) {
        let text = text.trim();
        log::warn!("skipping stylesheet block {block} '{text}': {error}");
        self.skipped.push(Skipped { block, text: text.to_owned(), error });
    }

    /// Append a rule built in code.
    pub fn push(&mut self, selector: Selector, style: Style) {
        self.rules.push(StyleRule { selector, style: Arc::new(style) });
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Byte index of the `}` closing the `{` at `open`.
fn matching_brace(input: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in input[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Strip block comments (`/* ... */`), replacing each with a single space.
/// An unterminated comment runs to the end of the input.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("/*") {
        result.push_str(&rest[..start]);
        result.push(' ');
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return result,
        }
    }

    result.push_str(rest);
    result
}
