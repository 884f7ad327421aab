//! Style data: declaration values, declarations, and the property mapping
//! produced by the cascade.

use std::collections::BTreeMap;
use std::fmt;

/// A value token within a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An identifier like `red`, `top-left`, `horizontal`.
    Ident(String),
    /// A bare number like `10`, `3.5`.
    Number(f32),
    /// A hex color string (without the `#` prefix), e.g. `"ff00aa"`.
    Color(String),
    /// A quoted string value, quotes removed.
    String(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Value::Ident(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Ident(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{n}"),
            Value::Color(hex) => write!(f, "#{hex}"),
            Value::String(s) => write!(f, "\"{s}\""),
        }
    }
}

/// A single property declaration, e.g. `padding: 4 8`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name, e.g. `"background-color"`.
    pub property: String,
    /// The declaration values, in source order.
    pub values: Vec<Value>,
}

impl Declaration {
    pub fn new(property: impl Into<String>, values: Vec<Value>) -> Self {
        Self { property: property.into(), values }
    }
}

/// A property mapping: property name to its values.
///
/// Later writes replace earlier ones key-for-key, which is how the cascade
/// folds matched rules together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    properties: BTreeMap<String, Vec<Value>>,
}

impl Style {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a style from declarations; a repeated property keeps its last value.
    pub fn from_declarations(declarations: impl IntoIterator<Item = Declaration>) -> Self {
        let mut style = Style::new();
        for decl in declarations {
            style.insert(decl.property, decl.values);
        }
        style
    }

    pub fn get(&self, property: &str) -> Option<&[Value]> {
        self.properties.get(property).map(Vec::as_slice)
    }

    pub fn insert(&mut self, property: impl Into<String>, values: Vec<Value>) {
        self.properties.insert(property.into(), values);
    }

    pub fn remove(&mut self, property: &str) -> Option<Vec<Value>> {
        self.properties.remove(property)
    }

    /// Copy every property of `other` into `self`, overwriting shared keys.
    pub fn merge(&mut self, other: &Style) {
        for (property, values) in &other.properties {
            self.properties.insert(property.clone(), values.clone());
        }
    }

    /// Iterate properties in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl fmt::Display for Style {
    /// Formats as a declaration block body: `a: 1; b: x y;`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (property, values) in &self.properties {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{property}:")?;
            for value in values {
                write!(f, " {value}")?;
            }
            f.write_str(";")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overwrites_shared_keys() {
        let mut base = Style::new();
        base.insert("width", vec![Value::Number(10.0)]);
        base.insert("alignment", vec![Value::Ident("top-left".into())]);

        let mut over = Style::new();
        over.insert("width", vec![Value::Number(20.0)]);

        base.merge(&over);
        assert_eq!(base.get("width"), Some(&[Value::Number(20.0)][..]));
        assert_eq!(base.get("alignment"), Some(&[Value::Ident("top-left".into())][..]));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn from_declarations_last_wins() {
        let style = Style::from_declarations([
            Declaration::new("spacing", vec![Value::Number(1.0)]),
            Declaration::new("spacing", vec![Value::Number(2.0)]),
        ]);
        assert_eq!(style.get("spacing"), Some(&[Value::Number(2.0)][..]));
    }

    #[test]
    fn display_is_sorted_block_body() {
        let style = Style::from_declarations([
            Declaration::new("padding", vec![Value::Number(4.0), Value::Number(8.0)]),
            Declaration::new("background-color", vec![Value::Color("fff".into())]),
        ]);
        assert_eq!(style.to_string(), "background-color: #fff; padding: 4 8;");
    }

    #[test]
    fn value_accessors() {
        assert_eq!(Value::Number(3.0).as_number(), Some(3.0));
        assert_eq!(Value::Ident("x".into()).as_number(), None);
        assert_eq!(Value::Ident("x".into()).as_ident(), Some("x"));
    }

    #[test]
    fn empty_style() {
        let style = Style::new();
        assert!(style.is_empty());
        assert!(style.get("width").is_none());
    }
}
