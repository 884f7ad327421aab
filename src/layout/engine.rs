//! The layout pass and size negotiation.
//!
//! Layout runs top-down: a view positions and sizes its subviews in
//! [`layout_subviews`](ViewTree::layout_subviews), then each subview lays out
//! its own. Sizes are negotiated bottom-up through
//! [`size_that_fits`](ViewTree::size_that_fits) and
//! [`size_that_contains`](ViewTree::size_that_contains).

use crate::geometry::{Rect, Size};
use crate::view::{Autoresizing, HorizontalAlignment, VerticalAlignment, ViewId, ViewKind, ViewTree};

impl ViewTree {
    /// The view's content rectangle in its own coordinates: the frame size
    /// inset by padding, never negative.
    pub fn bounds(&self, id: ViewId) -> Rect {
        self.get(id)
            .map(|view| Rect::new(0.0, 0.0, view.frame.width, view.frame.height).shrink(view.padding))
            .unwrap_or(Rect::EMPTY)
    }

    /// Resize a view, clamped to its min and max size.
    ///
    /// A size change marks the view for layout and its constrained subviews
    /// for constraint application.
    pub fn resize(&mut self, id: ViewId, size: Size) {
        let Some(view) = self.get_mut(id) else {
            return;
        };
        let size = size.clamp(view.min_size, view.max_size);
        if view.frame.size() == size {
            return;
        }
        view.frame.width = size.width;
        view.frame.height = size.height;
        view.needs_layout = true;

        for child in self.children(id).to_vec() {
            if let Some(subview) = self.get_mut(child) {
                if !subview.constraints.is_empty() {
                    subview.needs_apply_constraints = true;
                }
            }
        }
    }

    /// The size this view would like, given its subviews.
    ///
    /// Stacks measure their visible subviews along the axis. Other views that
    /// contain their subviews measure the visible subviews' extent; anything
    /// else keeps its current size. Clamped to min and max.
    pub fn size_that_fits(&self, id: ViewId) -> Size {
        let Some(view) = self.get(id) else {
            return Size::ZERO;
        };
        let size = match &view.kind {
            ViewKind::Stack(params) => self.stack_size(id, params, |tree, child| tree.size_that_fits(child)),
            _ if view.autoresizing.contains(Autoresizing::CONTAIN) => self.contained_extent(id),
            _ => view.size(),
        };
        size.clamp(view.min_size, view.max_size)
    }

    /// The smallest size at least [`size_that_fits`](Self::size_that_fits)
    /// that holds every visible subview's own `size_that_contains` at its
    /// origin, plus trailing padding. Clamped to min and max.
    pub fn size_that_contains(&self, id: ViewId) -> Size {
        let Some(view) = self.get(id) else {
            return Size::ZERO;
        };
        let mut size = self.size_that_fits(id);
        if let ViewKind::Stack(params) = &view.kind {
            size = size.max(self.stack_size(id, params, |tree, child| tree.size_that_contains(child)));
        }
        for child in self.visible_subviews(id) {
            let Some(subview) = self.get(child) else {
                continue;
            };
            let contained = self.size_that_contains(child);
            size = size.max(Size::new(
                subview.frame.x + contained.width + view.padding.right,
                subview.frame.y + contained.height + view.padding.bottom,
            ));
        }
        size.clamp(view.min_size, view.max_size)
    }

    /// Resize the view to [`size_that_fits`](Self::size_that_fits).
    pub fn size_to_fit(&mut self, id: ViewId) {
        let size = self.size_that_fits(id);
        self.resize(id, size);
    }

    /// Resize the view to [`size_that_contains`](Self::size_that_contains).
    pub fn size_to_contain(&mut self, id: ViewId) {
        let size = self.size_that_contains(id);
        self.resize(id, size);
    }

    /// Extent of the visible subviews at their preferred sizes, plus padding.
    ///
    /// Unaligned subviews are measured from the bounds origin to their far
    /// edge. Aligned subviews contribute their size only, since their origin
    /// is an output of layout.
    fn contained_extent(&self, id: ViewId) -> Size {
        let Some(view) = self.get(id) else {
            return Size::ZERO;
        };
        let mut extent = Size::ZERO;
        for child in self.visible_subviews(id) {
            let Some(subview) = self.get(child) else {
                continue;
            };
            let fits = self.size_that_fits(child);
            let offset = if subview.alignment.horizontal().is_none() && subview.alignment.vertical().is_none() {
                Size::new(
                    (subview.frame.x - view.padding.left).max(0.0),
                    (subview.frame.y - view.padding.top).max(0.0),
                )
            } else {
                Size::ZERO
            };
            extent = extent.max(fits + offset);
        }
        extent + view.padding.size()
    }

    /// Lay out `id` if it is marked, then recurse into its subviews.
    pub fn layout_if_needed(&mut self, id: ViewId) {
        if self.get(id).is_some_and(|view| view.needs_layout) {
            self.layout_subviews(id);
        }
        for child in self.children(id).to_vec() {
            self.layout_if_needed(child);
        }
    }

    /// Position and size the subviews of `id` according to its kind.
    pub fn layout_subviews(&mut self, id: ViewId) {
        let Some(view) = self.get_mut(id) else {
            return;
        };
        view.needs_layout = false;
        let kind = view.kind.clone();

        // The view may have been resized during this pass, after the
        // constraint pass ran.
        for child in self.children(id).to_vec() {
            self.apply_pending_constraints(child);
        }

        match kind {
            ViewKind::Plain => self.layout_default(id),
            ViewKind::Stack(params) => self.layout_stack(id, &params),
            ViewKind::Panel(state) => self.layout_panel(id, &state),
        }
        log::trace!("laid out {id:?}: {:?}", self.get(id).map(|v| v.frame));
    }

    /// Size each shown subview to fit (or to the bounds, per its
    /// autoresizing mask), then align it.
    ///
    /// `Internal` subviews autoresize against the full frame instead of the
    /// bounds and, like unaligned ones, keep their origin.
    pub(crate) fn layout_default(&mut self, id: ViewId) {
        let Some(view) = self.get(id) else {
            return;
        };
        let bounds = self.bounds(id);
        let full = Rect::new(0.0, 0.0, view.frame.width, view.frame.height);

        for child in self.children(id).to_vec() {
            let Some(subview) = self.get(child) else {
                continue;
            };
            if subview.hidden {
                continue;
            }
            let area = if subview.alignment == crate::view::Alignment::Internal { full } else { bounds };
            let autoresizing = subview.autoresizing;

            let mut size = self.size_that_fits(child);
            if autoresizing.contains(Autoresizing::WIDTH) {
                size.width = area.width;
            }
            if autoresizing.contains(Autoresizing::HEIGHT) {
                size.height = area.height;
            }
            self.resize(child, size);

            let Some(subview) = self.get_mut(child) else {
                continue;
            };
            let frame = &mut subview.frame;
            match subview.alignment.horizontal() {
                Some(HorizontalAlignment::Left) => frame.x = area.x,
                Some(HorizontalAlignment::Center) => frame.x = area.x + (area.width - frame.width) / 2.0,
                Some(HorizontalAlignment::Right) => frame.x = area.right() - frame.width,
                None => {}
            }
            match subview.alignment.vertical() {
                Some(VerticalAlignment::Top) => frame.y = area.y,
                Some(VerticalAlignment::Middle) => frame.y = area.y + (area.height - frame.height) / 2.0,
                Some(VerticalAlignment::Bottom) => frame.y = area.bottom() - frame.height,
                None => {}
            }
        }
    }
}
