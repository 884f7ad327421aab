//! Directional constraints between view attributes.
//!
//! A constraint is written as a descriptor:
//!
//! ```text
//! width = superview.width * 0.5 - 4
//! left >= sidebar.right + 8
//! height <= 200
//! ```
//!
//! The left-hand attribute belongs to the view holding the constraint. The
//! source is either `superview` (read in the superview's local space, where
//! `left` and `top` are zero) or the identifier of a sibling.

use std::fmt;
use std::str::FromStr;

use logos::Logos;

use crate::geometry::{Rect, Size};
use crate::view::{ViewId, ViewTree};

/// Errors from descriptor parsing and constraint resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintError {
    #[error("unexpected character at offset {0}")]
    UnexpectedCharacter(usize),
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),
    #[error("expected {expected} at offset {offset}")]
    Expected { expected: &'static str, offset: usize },
    #[error("unexpected trailing input at offset {0}")]
    TrailingInput(usize),
    #[error("no view '{0}' to constrain against")]
    Unresolved(String),
}

/// A constrainable edge, extent or center of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Left,
    Top,
    Right,
    Bottom,
    Width,
    Height,
    CenterX,
    CenterY,
}

impl Attribute {
    /// Read this attribute from a frame.
    pub fn read(self, frame: Rect) -> f32 {
        match self {
            Attribute::Left => frame.x,
            Attribute::Top => frame.y,
            Attribute::Right => frame.right(),
            Attribute::Bottom => frame.bottom(),
            Attribute::Width => frame.width,
            Attribute::Height => frame.height,
            Attribute::CenterX => frame.x + frame.width / 2.0,
            Attribute::CenterY => frame.y + frame.height / 2.0,
        }
    }

    /// Write this attribute into a frame. Edges and centers move the origin
    /// and keep the size.
    pub fn write(self, frame: &mut Rect, value: f32) {
        match self {
            Attribute::Left => frame.x = value,
            Attribute::Top => frame.y = value,
            Attribute::Right => frame.x = value - frame.width,
            Attribute::Bottom => frame.y = value - frame.height,
            Attribute::Width => frame.width = value.max(0.0),
            Attribute::Height => frame.height = value.max(0.0),
            Attribute::CenterX => frame.x = value - frame.width / 2.0,
            Attribute::CenterY => frame.y = value - frame.height / 2.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Left => "left",
            Attribute::Top => "top",
            Attribute::Right => "right",
            Attribute::Bottom => "bottom",
            Attribute::Width => "width",
            Attribute::Height => "height",
            Attribute::CenterX => "center-x",
            Attribute::CenterY => "center-y",
        }
    }
}

impl FromStr for Attribute {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let attribute = match s {
            "left" => Attribute::Left,
            "top" => Attribute::Top,
            "right" => Attribute::Right,
            "bottom" => Attribute::Bottom,
            "width" => Attribute::Width,
            "height" => Attribute::Height,
            "center-x" => Attribute::CenterX,
            "center-y" => Attribute::CenterY,
            other => return Err(ConstraintError::UnknownAttribute(other.to_owned())),
        };
        Ok(attribute)
    }
}

/// How the computed value bounds the attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `=`: set the attribute.
    Equal,
    /// `<=`: cap the attribute.
    LessOrEqual,
    /// `>=`: floor the attribute.
    GreaterOrEqual,
}

impl Relation {
    /// The value the attribute takes, given its `current` value.
    pub fn resolve(self, current: f32, value: f32) -> f32 {
        match self {
            Relation::Equal => value,
            Relation::LessOrEqual => current.min(value),
            Relation::GreaterOrEqual => current.max(value),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Relation::Equal => "=",
            Relation::LessOrEqual => "<=",
            Relation::GreaterOrEqual => ">=",
        }
    }
}

/// The view a constraint reads from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Superview,
    /// A sibling, by identifier.
    Sibling(String),
}

/// `target.attribute`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Source {
    pub target: Target,
    pub attribute: Attribute,
}

/// `attribute relation [source * multiplier] + constant`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub attribute: Attribute,
    pub relation: Relation,
    pub source: Option<Source>,
    pub multiplier: f32,
    pub constant: f32,
}

impl Constraint {
    /// `attribute = constant`.
    pub fn constant(attribute: Attribute, relation: Relation, constant: f32) -> Self {
        Self { attribute, relation, source: None, multiplier: 1.0, constant }
    }

    /// Parse a descriptor such as `width = superview.width * 0.5 - 4`.
    pub fn parse(descriptor: &str) -> Result<Constraint, ConstraintError> {
        let tokens: Vec<(Token, &str, usize)> = Token::lexer(descriptor)
            .spanned()
            .map(|(result, span)| match result {
                Ok(token) => Ok((token, &descriptor[span.clone()], span.start)),
                Err(()) => Err(ConstraintError::UnexpectedCharacter(span.start)),
            })
            .collect::<Result<_, _>>()?;
        DescriptorParser { tokens, cursor: 0, len: descriptor.len() }.parse()
    }

    /// Evaluate the right-hand side, given the source value (if any).
    pub fn value(&self, source: Option<f32>) -> f32 {
        source.map_or(0.0, |v| v * self.multiplier) + self.constant
    }
}

impl FromStr for Constraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Constraint::parse(s)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.attribute.name(), self.relation.symbol())?;
        let Some(source) = &self.source else {
            return write!(f, " {}", self.constant);
        };
        match &source.target {
            Target::Superview => write!(f, " superview.{}", source.attribute.name())?,
            Target::Sibling(name) => write!(f, " {name}.{}", source.attribute.name())?,
        }
        if self.multiplier != 1.0 {
            write!(f, " * {}", self.multiplier)?;
        }
        if self.constant > 0.0 {
            write!(f, " + {}", self.constant)?;
        } else if self.constant < 0.0 {
            write!(f, " - {}", -self.constant)?;
        }
        Ok(())
    }
}

/// Descriptor token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum Token {
    /// Attribute names and view identifiers. Hyphens must be followed by a
    /// letter, so `width-4` lexes as `width`, `-`, `4`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*(-[a-zA-Z_][a-zA-Z0-9_]*)*")]
    Ident,
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[token(".")]
    Dot,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("=")]
    #[token("==")]
    Equal,
    #[token("<=")]
    LessOrEqual,
    #[token(">=")]
    GreaterOrEqual,
}

struct DescriptorParser<'a> {
    tokens: Vec<(Token, &'a str, usize)>,
    cursor: usize,
    len: usize,
}

impl<'a> DescriptorParser<'a> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.cursor).map(|t| t.0)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.cursor).map_or(self.len, |t| t.2)
    }

    fn expect(&mut self, token: Token, expected: &'static str) -> Result<&'a str, ConstraintError> {
        match self.tokens.get(self.cursor) {
            Some(&(t, text, _)) if t == token => {
                self.cursor += 1;
                Ok(text)
            }
            _ => Err(ConstraintError::Expected { expected, offset: self.offset() }),
        }
    }

    fn number(&mut self) -> Result<f32, ConstraintError> {
        let offset = self.offset();
        let text = self.expect(Token::Number, "number")?;
        text.parse().map_err(|_| ConstraintError::Expected { expected: "number", offset })
    }

    fn parse(mut self) -> Result<Constraint, ConstraintError> {
        let attribute: Attribute = self.expect(Token::Ident, "attribute")?.parse()?;

        let relation = match self.peek() {
            Some(Token::Equal) => Relation::Equal,
            Some(Token::LessOrEqual) => Relation::LessOrEqual,
            Some(Token::GreaterOrEqual) => Relation::GreaterOrEqual,
            _ => return Err(ConstraintError::Expected { expected: "relation", offset: self.offset() }),
        };
        self.cursor += 1;

        let mut constraint = Constraint::constant(attribute, relation, 0.0);

        match self.peek() {
            Some(Token::Ident) => {
                let target = match self.expect(Token::Ident, "view")? {
                    "superview" => Target::Superview,
                    name => Target::Sibling(name.to_owned()),
                };
                self.expect(Token::Dot, "'.'")?;
                let attribute = self.expect(Token::Ident, "attribute")?.parse()?;
                constraint.source = Some(Source { target, attribute });

                if self.peek() == Some(Token::Star) {
                    self.cursor += 1;
                    constraint.multiplier = self.number()?;
                }

                constraint.constant = match self.peek() {
                    Some(Token::Plus) => {
                        self.cursor += 1;
                        self.number()?
                    }
                    Some(Token::Minus) => {
                        self.cursor += 1;
                        -self.number()?
                    }
                    _ => 0.0,
                };
            }
            Some(Token::Minus) => {
                self.cursor += 1;
                constraint.constant = -self.number()?;
            }
            _ => constraint.constant = self.number()?,
        }

        if self.cursor < self.tokens.len() {
            return Err(ConstraintError::TrailingInput(self.offset()));
        }
        Ok(constraint)
    }
}

impl ViewTree {
    /// Parse a descriptor and add the resulting constraint to `id`.
    pub fn add_constraint_with_descriptor(&mut self, id: ViewId, descriptor: &str) -> Result<(), ConstraintError> {
        let constraint = Constraint::parse(descriptor)?;
        self.add_constraint(id, constraint);
        Ok(())
    }

    /// Read a constraint's source value for the view `id`.
    fn resolve_source(&self, id: ViewId, source: &Source) -> Result<f32, ConstraintError> {
        let parent = self.parent(id);
        let frame = match &source.target {
            Target::Superview => parent
                .and_then(|p| self.get(p))
                .map(|view| Rect { x: 0.0, y: 0.0, ..view.frame })
                .ok_or_else(|| ConstraintError::Unresolved("superview".into()))?,
            Target::Sibling(name) => parent
                .and_then(|p| self.subview_with_identifier(p, name))
                .filter(|&sibling| sibling != id)
                .and_then(|sibling| self.get(sibling))
                .map(|view| view.frame)
                .ok_or_else(|| ConstraintError::Unresolved(name.clone()))?,
        };
        Ok(source.attribute.read(frame))
    }

    /// Apply the constraints held by `id`, in order.
    ///
    /// Unresolvable constraints are logged and skipped. Size changes go
    /// through [`resize`](Self::resize) and are clamped.
    pub fn apply_constraints(&mut self, id: ViewId) {
        let Some(constraints) = self.get(id).map(|view| view.constraints.clone()) else {
            return;
        };

        for constraint in &constraints {
            let source = match &constraint.source {
                Some(source) => match self.resolve_source(id, source) {
                    Ok(v) => Some(v),
                    Err(err) => {
                        log::warn!("skipping constraint '{constraint}': {err}");
                        continue;
                    }
                },
                None => None,
            };

            let Some(mut frame) = self.get(id).map(|view| view.frame) else {
                return;
            };
            let current = constraint.attribute.read(frame);
            let value = constraint.relation.resolve(current, constraint.value(source));
            constraint.attribute.write(&mut frame, value);

            match constraint.attribute {
                Attribute::Width | Attribute::Height => {
                    self.resize(id, Size::new(frame.width, frame.height));
                }
                _ => {
                    if let Some(view) = self.get_mut(id) {
                        view.frame.x = frame.x;
                        view.frame.y = frame.y;
                    }
                }
            }
        }
    }

    /// Apply constraints on every view under `root` marked
    /// `needs_apply_constraints`, superviews before subviews.
    pub fn apply_constraints_if_needed(&mut self, root: ViewId) {
        for id in self.walk_depth_first(root) {
            self.apply_pending_constraints(id);
        }
    }

    /// Apply the constraints of `id` if it is marked, then mark it for
    /// layout. Returns whether anything was applied.
    pub(crate) fn apply_pending_constraints(&mut self, id: ViewId) -> bool {
        if !self.get(id).is_some_and(|view| view.needs_apply_constraints) {
            return false;
        }
        self.apply_constraints(id);
        if let Some(view) = self.get_mut(id) {
            view.needs_apply_constraints = false;
            view.needs_layout = true;
        }
        log::trace!("applied constraints on {id:?}");
        true
    }
}
