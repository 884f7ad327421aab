//! View queries: by identifier, class, type, and selector.

use super::node::{View, ViewId};
use super::tree::ViewTree;
use crate::css::selector::Selector;

impl ViewTree {
    /// The first view in `root`'s subtree (including `root`) with the given
    /// identifier, in depth-first order.
    pub fn descendant_with_identifier(&self, root: ViewId, identifier: &str) -> Option<ViewId> {
        self.walk_depth_first(root)
            .into_iter()
            .find(|&id| self.has_identifier(id, identifier))
    }

    /// The nearest of `id` and its ancestors with the given identifier.
    pub fn ancestor_with_identifier(&self, id: ViewId, identifier: &str) -> Option<ViewId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&v| self.has_identifier(v, identifier))
    }

    /// The direct subview of `parent` with the given identifier.
    pub fn subview_with_identifier(&self, parent: ViewId, identifier: &str) -> Option<ViewId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&child| self.has_identifier(child, identifier))
    }

    /// All views in `root`'s subtree carrying `class`.
    pub fn query_by_class(&self, root: ViewId, class: &str) -> Vec<ViewId> {
        self.query_all(root, |view| view.has_class(class))
    }

    /// All views in `root`'s subtree that are of type `type_name`, directly or
    /// through a super-type.
    pub fn query_by_type(&self, root: ViewId, type_name: &str) -> Vec<ViewId> {
        self.query_all(root, |view| view.is_kind_of(type_name))
    }

    /// All views in `root`'s subtree matching an arbitrary predicate, in
    /// depth-first pre-order.
    pub fn query_all(&self, root: ViewId, predicate: impl Fn(&View) -> bool) -> Vec<ViewId> {
        self.walk_depth_first(root)
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(&predicate))
            .collect()
    }

    /// All views in `root`'s subtree matched by `selector`, in depth-first
    /// pre-order. Ancestors above `root` still take part in matching.
    pub fn select(&self, selector: &Selector, root: ViewId) -> Vec<ViewId> {
        self.walk_depth_first(root)
            .into_iter()
            .filter(|&id| selector.matches(self, id))
            .collect()
    }

    /// The first view in `root`'s subtree matched by `selector`.
    pub fn select_first(&self, selector: &Selector, root: ViewId) -> Option<ViewId> {
        self.walk_depth_first(root)
            .into_iter()
            .find(|&id| selector.matches(self, id))
    }

    fn has_identifier(&self, id: ViewId, identifier: &str) -> bool {
        self.get(id)
            .is_some_and(|view| view.identifier.as_deref() == Some(identifier))
    }
}
