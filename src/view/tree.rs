//! Tree operations: insert, add/remove subviews, reparent, walk, dirty flags.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{View, ViewId, ViewKind, ViewState};
use crate::geometry::{Point, Rect, Spacing};
use crate::layout::constraint::Constraint;

/// Empty slice constant for returning when a view has no subviews.
const EMPTY_CHILDREN: &[ViewId] = &[];

/// Errors from tree mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("view does not exist")]
    Missing,
    #[error("a view cannot be added to itself or to one of its descendants")]
    Cycle,
}

/// Where to insert a subview relative to an existing sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Before,
    After,
}

/// The view hierarchy, backed by a slotmap arena.
///
/// All views live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps; a view's parent link never owns the parent. Views
/// detached with [`remove_from_superview`](Self::remove_from_superview) stay in
/// the arena until [`remove`](Self::remove) drops them.
#[derive(Debug)]
pub struct ViewTree {
    pub(crate) views: SlotMap<ViewId, View>,
    children: SecondaryMap<ViewId, Vec<ViewId>>,
    parent: SecondaryMap<ViewId, ViewId>,
    root: Option<ViewId>,
}

impl ViewTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            views: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Insert a detached view (no superview).
    ///
    /// If no root has been set yet, this view becomes the root.
    pub fn insert(&mut self, view: View) -> ViewId {
        let id = self.views.insert(view);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Insert a view as the last subview of `parent`.
    pub fn insert_child(&mut self, parent: ViewId, view: View) -> Result<ViewId, TreeError> {
        if !self.views.contains_key(parent) {
            return Err(TreeError::Missing);
        }
        let id = self.views.insert(view);
        self.children.insert(id, Vec::new());
        self.attach(parent, id, None);
        Ok(id)
    }

    /// Add `child` as the last subview of `parent`, detaching it from any
    /// previous superview first.
    pub fn add_subview(&mut self, parent: ViewId, child: ViewId) -> Result<(), TreeError> {
        self.check_attach(parent, child)?;
        self.detach(child);
        self.attach(parent, child, None);
        Ok(())
    }

    /// Add `child` to `parent`, positioned before or after the sibling `other`.
    ///
    /// Falls back to appending when `other` is not a subview of `parent`.
    pub fn add_subview_relative_to(
        &mut self,
        parent: ViewId,
        child: ViewId,
        other: ViewId,
        position: Position,
    ) -> Result<(), TreeError> {
        self.check_attach(parent, child)?;
        self.detach(child);
        let index = self
            .children(parent)
            .iter()
            .position(|&sibling| sibling == other)
            .map(|i| match position {
                Position::Before => i,
                Position::After => i + 1,
            });
        self.attach(parent, child, index);
        Ok(())
    }

    /// Detach a view from its superview, keeping it (and its subtree) in the arena.
    pub fn remove_from_superview(&mut self, id: ViewId) {
        self.detach(id);
    }

    /// Detach every subview of `id`, returning them in their former order.
    /// The detached views stay in the arena.
    pub fn remove_all_subviews(&mut self, id: ViewId) -> Vec<ViewId> {
        let detached = self.children(id).to_vec();
        for &child in &detached {
            self.detach(child);
        }
        detached
    }

    /// Put `replacement` where `subview` sits in its superview, then detach
    /// `subview`.
    pub fn replace_subview(&mut self, subview: ViewId, replacement: ViewId) -> Result<(), TreeError> {
        if subview == replacement {
            return if self.contains(subview) { Ok(()) } else { Err(TreeError::Missing) };
        }
        let parent = self.parent(subview).ok_or(TreeError::Missing)?;
        self.check_attach(parent, replacement)?;
        self.detach(replacement);
        let index = self.children(parent).iter().position(|&child| child == subview);
        self.attach(parent, replacement, index);
        self.detach(subview);
        Ok(())
    }

    /// Move a view to the end of its superview's subviews, in front of its
    /// siblings for drawing and hit testing.
    ///
    /// Only a stack superview is marked for layout, since order places its
    /// subviews.
    pub fn bring_subview_to_front(&mut self, id: ViewId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        let Some(siblings) = self.children.get_mut(parent) else {
            return;
        };
        if siblings.last() == Some(&id) {
            return;
        }
        siblings.retain(|&child| child != id);
        siblings.push(id);
        if self.get(parent).is_some_and(|view| matches!(view.kind, ViewKind::Stack(_))) {
            self.set_needs_layout(parent);
        }
    }

    /// Remove a view and all its descendants.
    ///
    /// Returns the removed [`View`], or `None` if it didn't exist.
    pub fn remove(&mut self, id: ViewId) -> Option<View> {
        if !self.views.contains_key(id) {
            return None;
        }

        self.detach(id);

        if self.root == Some(id) {
            self.root = None;
        }

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            let view = self.views.remove(current);
            if current == id {
                removed = view;
            }
        }

        removed
    }

    fn check_attach(&self, parent: ViewId, child: ViewId) -> Result<(), TreeError> {
        if !self.views.contains_key(parent) || !self.views.contains_key(child) {
            return Err(TreeError::Missing);
        }
        if self.is_descendant_of(parent, child) {
            log::warn!("rejected adding a view beneath its own subtree");
            return Err(TreeError::Cycle);
        }
        Ok(())
    }

    fn attach(&mut self, parent: ViewId, child: ViewId, index: Option<usize>) {
        self.parent.insert(child, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            match index {
                Some(i) if i <= siblings.len() => siblings.insert(i, child),
                _ => siblings.push(child),
            }
        }
        if self.root == Some(child) {
            self.root = Some(self.top_ancestor(parent));
        }
        self.set_needs_layout(parent);
        self.invalidate_style(child);
    }

    fn detach(&mut self, id: ViewId) {
        if let Some(old_parent) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&child| child != id);
            }
            self.set_needs_layout(old_parent);
            self.invalidate_style(id);
        }
    }

    fn top_ancestor(&self, id: ViewId) -> ViewId {
        self.ancestors(id).last().copied().unwrap_or(id)
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Get the superview of a view, if it has one.
    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.parent.get(id).copied()
    }

    /// Get the subviews of a view, in order. Empty if the view has none or
    /// does not exist.
    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(EMPTY_CHILDREN)
    }

    /// Subviews that take part in layout: not hidden, not internally aligned.
    pub fn visible_subviews(&self, id: ViewId) -> Vec<ViewId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| {
                self.get(child).is_some_and(|view| {
                    !view.hidden && view.alignment != super::node::Alignment::Internal
                })
            })
            .collect()
    }

    /// Walk from `id` up to the root, collecting ancestor ids.
    ///
    /// Does **not** include `id` itself; starts with the immediate parent.
    pub fn ancestors(&self, id: ViewId) -> Vec<ViewId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether `id` is `ancestor` or lies beneath it.
    pub fn is_descendant_of(&self, id: ViewId, ancestor: ViewId) -> bool {
        id == ancestor || self.ancestors(id).contains(&ancestor)
    }

    /// Number of ancestors above `id`.
    pub fn depth(&self, id: ViewId) -> usize {
        self.ancestors(id).len()
    }

    /// Whether the view and all its ancestors are shown.
    pub fn is_visible(&self, id: ViewId) -> bool {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .all(|v| self.get(v).is_some_and(|view| !view.hidden))
    }

    /// The view's frame in root coordinates.
    pub fn render_frame(&self, id: ViewId) -> Option<Rect> {
        let frame = self.get(id)?.frame;
        let offset = self
            .ancestors(id)
            .into_iter()
            .filter_map(|a| self.get(a))
            .fold(Point::ZERO, |acc, view| acc + view.frame.origin());
        Some(frame.translate(offset))
    }

    /// The visible part of the view in root coordinates: its render frame
    /// grown by its border, clipped to every ancestor's.
    pub fn clipping_frame(&self, id: ViewId) -> Option<Rect> {
        let outset = |view_id: ViewId| {
            let view = self.get(view_id)?;
            let frame = self.render_frame(view_id)?;
            let border = view.border_width;
            Some(Rect::new(
                frame.x - border,
                frame.y - border,
                frame.width + 2.0 * border,
                frame.height + 2.0 * border,
            ))
        };
        let frame = outset(id)?;
        Some(
            self.ancestors(id)
                .into_iter()
                .filter_map(outset)
                .fold(frame, Rect::intersection),
        )
    }

    /// Whether `point` (root coordinates) falls within the view's clipping
    /// frame.
    pub fn contains_point(&self, id: ViewId, point: Point) -> bool {
        self.clipping_frame(id).is_some_and(|frame| frame.contains(point))
    }

    /// The deepest visible view under `point` (root coordinates), searching
    /// front-most subviews first.
    pub fn hit_test(&self, root: ViewId, point: Point) -> Option<ViewId> {
        let view = self.get(root)?;
        if view.hidden {
            return None;
        }
        let frame = self.render_frame(root)?;
        if !frame.contains(point) {
            return None;
        }
        self.children(root)
            .iter()
            .rev()
            .find_map(|&child| self.hit_test(child, point))
            .or(Some(root))
    }

    // ── Access ───────────────────────────────────────────────────────

    /// Immutable access to a view.
    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.views.get(id)
    }

    /// Mutable access to a view.
    ///
    /// Direct field writes do not touch dirty flags; prefer the setters below
    /// or follow up with [`set_needs_layout`](Self::set_needs_layout).
    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(id)
    }

    /// The current root view, if set.
    pub fn root(&self) -> Option<ViewId> {
        self.root
    }

    /// Explicitly set the root view.
    pub fn set_root(&mut self, id: ViewId) {
        self.root = Some(id);
    }

    /// Number of views in the arena.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.views.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: ViewId) -> Vec<ViewId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.views.contains_key(current) {
                continue;
            }
            result.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    // ── Dirty flags ──────────────────────────────────────────────────

    pub fn set_needs_layout(&mut self, id: ViewId) {
        if let Some(view) = self.views.get_mut(id) {
            view.needs_layout = true;
        }
    }

    pub fn set_needs_apply_constraints(&mut self, id: ViewId) {
        if let Some(view) = self.views.get_mut(id) {
            view.needs_apply_constraints = true;
        }
    }

    /// Mark `id` and its whole subtree for a new cascade. Descendants are
    /// included because their selectors may match through this view.
    pub fn invalidate_style(&mut self, id: ViewId) {
        for view_id in self.walk_depth_first(id) {
            if let Some(view) = self.views.get_mut(view_id) {
                view.needs_apply_style = true;
            }
        }
    }

    // ── Setters that keep dirty flags in sync ────────────────────────

    pub fn add_class(&mut self, id: ViewId, class: &str) {
        if let Some(view) = self.views.get_mut(id) {
            if !view.has_class(class) {
                view.classes.push(class.to_owned());
                self.invalidate_style(id);
            }
        }
    }

    pub fn remove_class(&mut self, id: ViewId, class: &str) {
        if let Some(view) = self.views.get_mut(id) {
            if view.has_class(class) {
                view.classes.retain(|c| c != class);
                self.invalidate_style(id);
            }
        }
    }

    /// Toggle a style class: add if absent, remove if present.
    pub fn toggle_class(&mut self, id: ViewId, class: &str) {
        let present = self.get(id).is_some_and(|view| view.has_class(class));
        if present {
            self.remove_class(id, class);
        } else {
            self.add_class(id, class);
        }
    }

    pub fn set_identifier(&mut self, id: ViewId, identifier: Option<&str>) {
        if let Some(view) = self.views.get_mut(id) {
            view.identifier = identifier.map(str::to_owned);
            self.invalidate_style(id);
        }
    }

    pub fn set_attribute(&mut self, id: ViewId, name: &str, value: &str) {
        if let Some(view) = self.views.get_mut(id) {
            view.attributes.insert(name.to_owned(), value.to_owned());
            self.invalidate_style(id);
        }
    }

    /// Set or clear pseudo-state bits.
    pub fn set_state(&mut self, id: ViewId, state: ViewState, on: bool) {
        if let Some(view) = self.views.get_mut(id) {
            let before = view.state;
            view.state.set(state, on);
            if view.state != before {
                self.invalidate_style(id);
            }
        }
    }

    /// Show or hide a view. A change marks the superview for layout.
    pub fn set_hidden(&mut self, id: ViewId, hidden: bool) {
        if let Some(view) = self.views.get_mut(id) {
            if view.hidden != hidden {
                view.hidden = hidden;
                if let Some(parent) = self.parent(id) {
                    self.set_needs_layout(parent);
                }
            }
        }
    }

    /// Replace the padding. A change marks the view for layout.
    pub fn set_padding(&mut self, id: ViewId, padding: Spacing) {
        if let Some(view) = self.views.get_mut(id) {
            if view.padding != padding {
                view.padding = padding;
                view.needs_layout = true;
            }
        }
    }

    /// Replace the frame. The size goes through [`resize`](Self::resize), so
    /// it is clamped and a change marks the view for layout.
    pub fn set_frame(&mut self, id: ViewId, frame: Rect) {
        let Some(view) = self.views.get_mut(id) else {
            return;
        };
        view.frame.x = frame.x;
        view.frame.y = frame.y;
        self.resize(id, frame.size());
    }

    /// Append a constraint to the view and mark it for constraint application.
    pub fn add_constraint(&mut self, id: ViewId, constraint: Constraint) {
        if let Some(view) = self.views.get_mut(id) {
            view.constraints.push(constraint);
            view.needs_apply_constraints = true;
        }
    }

    /// Remove the first constraint equal to `constraint`. Returns whether one
    /// was removed.
    ///
    /// The remaining constraints, if any, are re-applied on the next pass and
    /// the view is marked for layout.
    pub fn remove_constraint(&mut self, id: ViewId, constraint: &Constraint) -> bool {
        let Some(view) = self.views.get_mut(id) else {
            return false;
        };
        let Some(index) = view.constraints.iter().position(|c| c == constraint) else {
            return false;
        };
        view.constraints.remove(index);
        view.needs_apply_constraints = !view.constraints.is_empty();
        view.needs_layout = true;
        true
    }

    /// Drop every constraint. A view that had any is marked for layout.
    pub fn remove_all_constraints(&mut self, id: ViewId) {
        if let Some(view) = self.views.get_mut(id) {
            if !view.constraints.is_empty() {
                view.constraints.clear();
                view.needs_layout = true;
            }
            view.needs_apply_constraints = false;
        }
    }
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}
