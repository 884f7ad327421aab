//! The style cascade: collect matching rules, order them by specificity, and
//! fold their property mappings into a computed style.

use crate::css::model::Style;
use crate::css::properties::apply_style;
use crate::css::stylesheet::{StyleRule, Stylesheet};
use crate::view::{ViewId, ViewTree};

/// Stylesheets in declaration order, plus the passes that apply them.
///
/// Rules are numbered globally across sheets: every rule of an earlier sheet
/// is declared before every rule of a later one.
#[derive(Debug, Clone, Default)]
pub struct Cascade {
    sheets: Vec<Stylesheet>,
}

impl Cascade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stylesheet; its rules are declared after all existing ones.
    pub fn add_stylesheet(&mut self, sheet: Stylesheet) {
        self.sheets.push(sheet);
    }

    /// Drop every stylesheet.
    pub fn clear(&mut self) {
        self.sheets.clear();
    }

    pub fn stylesheets(&self) -> &[Stylesheet] {
        &self.sheets
    }

    /// Every rule in global declaration order.
    fn rules(&self) -> impl Iterator<Item = &StyleRule> {
        self.sheets.iter().flat_map(|sheet| sheet.rules())
    }

    /// The rules whose selector matches `view`, in cascade order: ascending
    /// specificity, declaration order among equals.
    pub fn matching_rules(&self, tree: &ViewTree, view: ViewId) -> Vec<&StyleRule> {
        let mut matched: Vec<&StyleRule> =
            self.rules().filter(|rule| rule.selector.matches(tree, view)).collect();
        // Stable: equal specificities keep declaration order.
        matched.sort_by_key(|rule| rule.selector.specificity());
        matched
    }

    /// Fold every matching rule's style, later rules overwriting earlier ones.
    pub fn computed_style(&self, tree: &ViewTree, view: ViewId) -> Style {
        let mut style = Style::new();
        for rule in self.matching_rules(tree, view) {
            style.merge(&rule.style);
        }
        style
    }

    /// Restyle every view under `root` marked `needs_apply_style`, parents
    /// before children. Returns how many views were restyled.
    pub fn apply_if_needed(&self, tree: &mut ViewTree, root: ViewId) -> usize {
        let mut restyled = 0;
        for id in tree.walk_depth_first(root) {
            if !tree.get(id).is_some_and(|view| view.needs_apply_style) {
                continue;
            }
            let style = self.computed_style(tree, id);
            log::trace!("restyle {id:?}: {style}");
            apply_style(tree, id, &style);
            if let Some(view) = tree.get_mut(id) {
                view.computed_style = style;
                view.needs_apply_style = false;
            }
            restyled += 1;
        }
        if restyled > 0 {
            log::debug!("cascade restyled {restyled} views");
        }
        restyled
    }
}
