//! Selector model and right-to-left matching against the view tree.

use std::fmt;
use std::str::FromStr;

use crate::css::parser::{self, ParseError};
use crate::css::specificity::Specificity;
use crate::view::{View, ViewId, ViewState, ViewTree};

/// What a simple selector tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimpleSelectorKind {
    /// Type name, including super-types: `Button`.
    Type,
    /// `*`, matches any view.
    Universal,
    /// `#identifier`.
    Id,
    /// `.class`.
    Class,
    /// `:highlighted`, `:selected`, `:disabled`, `:focused`.
    Pseudo,
    /// `[name]` or `[name=value]`.
    Attribute,
}

/// One atomic predicate over a view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleSelector {
    pub kind: SimpleSelectorKind,
    /// The name to test. For attributes this is `name` or `name=value`.
    pub pattern: String,
}

impl SimpleSelector {
    pub fn new(kind: SimpleSelectorKind, pattern: impl Into<String>) -> Self {
        Self { kind, pattern: pattern.into() }
    }

    /// Whether this predicate holds for `view`.
    pub fn matches(&self, view: &View) -> bool {
        match self.kind {
            SimpleSelectorKind::Type => view.is_kind_of(&self.pattern),
            SimpleSelectorKind::Universal => true,
            SimpleSelectorKind::Id => view.identifier.as_deref() == Some(self.pattern.as_str()),
            SimpleSelectorKind::Class => view.has_class(&self.pattern),
            SimpleSelectorKind::Pseudo => {
                ViewState::from_pseudo(&self.pattern).is_some_and(|state| view.state.contains(state))
            }
            SimpleSelectorKind::Attribute => match self.pattern.split_once('=') {
                Some((name, value)) => view.attributes.get(name).is_some_and(|v| v == value),
                None => view.attributes.contains_key(&self.pattern),
            },
        }
    }
}

/// How a sequence relates to the sequence on its right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace: `A B`, any depth.
    Descendant,
    /// `A > B`, immediate parent.
    Child,
    /// The rightmost sequence.
    None,
}

/// A compound term: simple selectors joined with AND semantics.
///
/// For example, `Button.primary:highlighted` is one sequence with three
/// simple selectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectorSequence {
    pub simple_selectors: Vec<SimpleSelector>,
    /// Links this sequence to the next one; `None` on the tail.
    pub combinator: Combinator,
}

impl SelectorSequence {
    /// Whether every simple selector matches `view`.
    pub fn matches(&self, view: &View) -> bool {
        self.simple_selectors.iter().all(|simple| simple.matches(view))
    }
}

/// A parsed selector: one or more sequences, the last of which targets the
/// matched view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    sequences: Vec<SelectorSequence>,
    rule: String,
    specificity: Specificity,
}

impl Selector {
    /// Parse exactly one rule (no commas).
    pub fn parse(rule: &str) -> Result<Selector, ParseError> {
        parser::parse_rule(rule)
    }

    /// Build a selector from already-parsed sequences; specificity is computed here.
    pub(crate) fn from_sequences(sequences: Vec<SelectorSequence>, rule: &str) -> Self {
        let specificity = Specificity::of(&sequences);
        Self { sequences, rule: rule.trim().to_owned(), specificity }
    }

    pub fn sequences(&self) -> &[SelectorSequence] {
        &self.sequences
    }

    /// The trimmed rule text this selector was parsed from.
    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// Match against `view`, reading sequences right to left.
    ///
    /// The tail must match `view` itself. Each earlier sequence uses its own
    /// combinator: `Child` must match the current node's parent, `Descendant`
    /// the nearest matching ancestor, which becomes the current node.
    pub fn matches(&self, tree: &ViewTree, view: ViewId) -> bool {
        let Some((target, rest)) = self.sequences.split_last() else {
            return false;
        };
        if !tree.get(view).is_some_and(|v| target.matches(v)) {
            return false;
        }

        let mut current = view;
        for sequence in rest.iter().rev() {
            let next = match sequence.combinator {
                Combinator::Child => tree
                    .parent(current)
                    .filter(|&p| tree.get(p).is_some_and(|v| sequence.matches(v))),
                Combinator::Descendant | Combinator::None => tree
                    .ancestors(current)
                    .into_iter()
                    .find(|&a| tree.get(a).is_some_and(|v| sequence.matches(v))),
            };
            match next {
                Some(id) => current = id,
                None => return false,
            }
        }
        true
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rule)
    }
}

impl FromStr for Selector {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::View;

    /// Build a test tree:
    /// ```text
    ///       root (Window #root)
    ///          |
    ///        panel (Panel #main .content [role=tools])
    ///       /     \
    ///     btn      box (StackView)
    ///  (Button        |
    ///   .primary     lbl (Label #title :highlighted)
    ///   :selected)
    /// ```
    fn build_tree() -> (ViewTree, ViewId, ViewId, ViewId, ViewId, ViewId) {
        let mut tree = ViewTree::new();
        let root = tree.insert(View::new("Window").with_identifier("root"));
        let panel = tree
            .insert_child(
                root,
                View::new("Panel")
                    .with_supertype("Control")
                    .with_identifier("main")
                    .with_class("content")
                    .with_attribute("role", "tools"),
            )
            .unwrap();
        let btn = tree
            .insert_child(
                panel,
                View::new("Button")
                    .with_supertype("Control")
                    .with_class("primary")
                    .with_state(ViewState::SELECTED),
            )
            .unwrap();
        let boxed = tree.insert_child(panel, View::new("StackView")).unwrap();
        let lbl = tree
            .insert_child(
                boxed,
                View::new("Label").with_identifier("title").with_state(ViewState::HIGHLIGHTED),
            )
            .unwrap();
        (tree, root, panel, btn, boxed, lbl)
    }

    fn matches(rule: &str, tree: &ViewTree, id: ViewId) -> bool {
        Selector::parse(rule).unwrap().matches(tree, id)
    }

    #[test]
    fn simple_kinds() {
        let (tree, _root, panel, btn, _boxed, lbl) = build_tree();
        assert!(matches("Button", &tree, btn));
        assert!(matches("Control", &tree, btn));
        assert!(matches("*", &tree, lbl));
        assert!(matches("#title", &tree, lbl));
        assert!(matches(".primary", &tree, btn));
        assert!(matches(":selected", &tree, btn));
        assert!(matches("[role]", &tree, panel));
        assert!(matches("[role=tools]", &tree, panel));
        assert!(!matches("[role=menu]", &tree, panel));
        assert!(!matches("[kind]", &tree, panel));
    }

    #[test]
    fn compound_is_conjunction() {
        let (tree, _root, _panel, btn, ..) = build_tree();
        assert!(matches("Button.primary:selected", &tree, btn));
        assert!(!matches("Button.primary:highlighted", &tree, btn));
        assert!(!matches("Label.primary", &tree, btn));
    }

    #[test]
    fn unknown_pseudo_never_matches() {
        let (tree, _root, _panel, btn, ..) = build_tree();
        assert!(!matches(":hover", &tree, btn));
    }

    #[test]
    fn descendant_any_depth() {
        let (tree, _root, _panel, _btn, _boxed, lbl) = build_tree();
        assert!(matches("Window Label", &tree, lbl));
        assert!(matches("#main #title", &tree, lbl));
        assert!(matches("Window Panel StackView Label", &tree, lbl));
        assert!(!matches("Button Label", &tree, lbl));
    }

    #[test]
    fn child_requires_immediate_parent() {
        let (tree, _root, _panel, btn, _boxed, lbl) = build_tree();
        assert!(matches("Panel > Button", &tree, btn));
        assert!(!matches("Panel > Label", &tree, lbl));
        assert!(matches("Panel > StackView > Label", &tree, lbl));
        assert!(matches("Window > Panel Label", &tree, lbl));
        assert!(!matches("Window > StackView Label", &tree, lbl));
    }

    #[test]
    fn target_must_match_view_itself() {
        let (tree, _root, panel, ..) = build_tree();
        assert!(!matches("Panel Button", &tree, panel));
    }

    #[test]
    fn stale_id_never_matches() {
        let (mut tree, _root, _panel, btn, ..) = build_tree();
        tree.remove(btn);
        assert!(!matches("*", &tree, btn));
    }

    #[test]
    fn display_and_from_str() {
        let selector: Selector = "  Panel > .foo ".parse().unwrap();
        assert_eq!(selector.to_string(), "Panel > .foo");
        assert_eq!(selector.rule(), "Panel > .foo");
    }

    #[test]
    fn reparse_rule_is_identical() {
        let selector = Selector::parse("Panel#main .foo > Control:highlighted[role=x]").unwrap();
        let again = Selector::parse(selector.rule()).unwrap();
        assert_eq!(again, selector);
        assert_eq!(again.specificity(), selector.specificity());
    }
}
