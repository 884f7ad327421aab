//! Stack layout: visible subviews placed one after another along an axis.

use crate::geometry::{Rect, Size};
use crate::view::{Axis, Distribution, StackParams, ViewId, ViewTree};

/// Extent of `rect` along `axis`.
fn extent(rect: Rect, axis: Axis) -> f32 {
    match axis {
        Axis::Horizontal => rect.width,
        Axis::Vertical => rect.height,
    }
}

fn size_along(size: Size, axis: Axis) -> f32 {
    match axis {
        Axis::Horizontal => size.width,
        Axis::Vertical => size.height,
    }
}

impl ViewTree {
    /// Measure a stack: the sum of the subviews' extents along the axis plus
    /// spacing between them, the largest subview across it, plus padding.
    ///
    /// `measure` sizes each visible subview.
    pub(crate) fn stack_size<F>(&self, id: ViewId, params: &StackParams, measure: F) -> Size
    where
        F: Fn(&ViewTree, ViewId) -> Size,
    {
        let Some(view) = self.get(id) else {
            return Size::ZERO;
        };
        let subviews = self.visible_subviews(id);
        let gaps = params.spacing * subviews.len().saturating_sub(1) as f32;

        let mut along = 0.0;
        let mut across: f32 = 0.0;
        for child in subviews {
            let size = measure(self, child);
            match params.axis {
                Axis::Horizontal => {
                    along += size.width;
                    across = across.max(size.height);
                }
                Axis::Vertical => {
                    along += size.height;
                    across = across.max(size.width);
                }
            }
        }

        let content = match params.axis {
            Axis::Horizontal => Size::new(along + gaps, across),
            Axis::Vertical => Size::new(across, along + gaps),
        };
        content + view.padding.size()
    }

    /// Lay out a stack.
    ///
    /// Subviews are first sized and aligned as by the default layout, then
    /// placed end to end along the axis starting at the bounds origin. With
    /// [`Distribution::Fill`] their extents are scaled so the stack's bounds
    /// are filled; with [`Distribution::FillEqually`] each gets an equal share.
    pub(crate) fn layout_stack(&mut self, id: ViewId, params: &StackParams) {
        self.layout_default(id);

        let subviews = self.visible_subviews(id);
        if subviews.is_empty() {
            return;
        }
        let bounds = self.bounds(id);
        let count = subviews.len() as f32;
        let available = (extent(bounds, params.axis) - params.spacing * (count - 1.0)).max(0.0);
        let requested: f32 = subviews
            .iter()
            .map(|&child| size_along(self.size_that_fits(child), params.axis))
            .sum();
        let scale = if requested > 0.0 { available / requested } else { 1.0 };

        let mut position = match params.axis {
            Axis::Horizontal => bounds.x,
            Axis::Vertical => bounds.y,
        };
        for child in subviews {
            let Some(view) = self.get_mut(child) else {
                continue;
            };
            let before = view.frame.size();
            let mut size = before;
            let length = match params.axis {
                Axis::Horizontal => {
                    view.frame.x = position;
                    &mut size.width
                }
                Axis::Vertical => {
                    view.frame.y = position;
                    &mut size.height
                }
            };
            match params.distribution {
                Distribution::Default => {}
                Distribution::Fill => *length *= scale,
                Distribution::FillEqually => *length = available / count,
            }
            // Distributed lengths still respect the subview's min and max.
            self.resize(child, size);

            let after = self.get(child).map_or(before, |view| view.frame.size());
            position += size_along(after, params.axis) + params.spacing;
            if after != before {
                self.layout_subviews(child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Spacing;
    use crate::view::{Alignment, Autoresizing, View};
    use pretty_assertions::assert_eq;

    fn frames(tree: &ViewTree, ids: &[ViewId]) -> Vec<Rect> {
        ids.iter().map(|&id| tree.get(id).unwrap().frame).collect()
    }

    fn stack_in_window(
        axis: Axis,
        distribution: Distribution,
        spacing: f32,
        sizes: &[(f32, f32)],
    ) -> (ViewTree, ViewId, ViewId, Vec<ViewId>) {
        let mut tree = ViewTree::new();
        let root = tree.insert(View::new("Window").with_size(Size::new(300.0, 100.0)));
        let stack = tree
            .insert_child(
                root,
                View::stack(axis)
                    .with_spacing(spacing)
                    .with_distribution(distribution)
                    .with_autoresizing(Autoresizing::FILL),
            )
            .unwrap();
        let children = sizes
            .iter()
            .map(|&(w, h)| tree.insert_child(stack, View::new("Item").with_size(Size::new(w, h))).unwrap())
            .collect();
        (tree, root, stack, children)
    }

    #[test]
    fn default_distribution_places_end_to_end() {
        let (mut tree, root, _stack, items) =
            stack_in_window(Axis::Vertical, Distribution::Default, 4.0, &[(10.0, 20.0), (30.0, 5.0)]);
        tree.layout_if_needed(root);
        assert_eq!(
            frames(&tree, &items),
            vec![Rect::new(0.0, 0.0, 10.0, 20.0), Rect::new(0.0, 24.0, 30.0, 5.0)]
        );
    }

    #[test]
    fn fill_equally_splits_available_extent() {
        let (mut tree, root, _stack, items) = stack_in_window(
            Axis::Horizontal,
            Distribution::FillEqually,
            10.0,
            &[(1.0, 10.0), (50.0, 10.0), (5.0, 10.0)],
        );
        tree.layout_if_needed(root);
        let share = 280.0 / 3.0;
        let frames = frames(&tree, &items);
        for (i, frame) in frames.iter().enumerate() {
            assert!((frame.width - share).abs() < 1e-3, "item {i}: {frame:?}");
            assert!((frame.x - i as f32 * (share + 10.0)).abs() < 1e-3, "item {i}: {frame:?}");
        }
    }

    #[test]
    fn distributed_lengths_respect_max_size() {
        let (mut tree, root, _stack, items) = stack_in_window(
            Axis::Horizontal,
            Distribution::FillEqually,
            10.0,
            &[(1.0, 10.0), (1.0, 10.0), (1.0, 10.0)],
        );
        tree.get_mut(items[1]).unwrap().max_size = Size::new(50.0, 100.0);
        tree.layout_if_needed(root);

        let share = 280.0 / 3.0;
        let frames = frames(&tree, &items);
        assert_eq!(frames[1].width, 50.0);
        assert!((frames[1].x - (share + 10.0)).abs() < 1e-3, "{:?}", frames[1]);
        // The next subview follows the clamped length, not the share.
        assert!((frames[2].x - (share + 70.0)).abs() < 1e-3, "{:?}", frames[2]);
        assert!((frames[2].width - share).abs() < 1e-3, "{:?}", frames[2]);
    }

    #[test]
    fn fill_scales_proportionally() {
        let (mut tree, root, _stack, items) =
            stack_in_window(Axis::Horizontal, Distribution::Fill, 0.0, &[(50.0, 10.0), (100.0, 10.0)]);
        tree.layout_if_needed(root);
        assert_eq!(
            frames(&tree, &items),
            vec![Rect::new(0.0, 0.0, 100.0, 10.0), Rect::new(100.0, 0.0, 200.0, 10.0)]
        );
    }

    #[test]
    fn layout_is_idempotent() {
        for distribution in [Distribution::Default, Distribution::Fill, Distribution::FillEqually] {
            let (mut tree, root, stack, items) =
                stack_in_window(Axis::Horizontal, distribution, 6.0, &[(40.0, 10.0), (20.0, 30.0), (70.0, 5.0)]);
            tree.layout_if_needed(root);
            let first = frames(&tree, &items);
            tree.layout_subviews(stack);
            for (again, before) in frames(&tree, &items).iter().zip(&first) {
                assert!((again.x - before.x).abs() < 1e-3, "{distribution:?}: {again:?} vs {before:?}");
                assert!((again.width - before.width).abs() < 1e-3, "{distribution:?}: {again:?} vs {before:?}");
                assert_eq!(again.height, before.height);
            }
        }
    }

    #[test]
    fn hidden_and_internal_subviews_are_skipped() {
        let (mut tree, root, stack, items) =
            stack_in_window(Axis::Vertical, Distribution::Default, 2.0, &[(10.0, 10.0), (10.0, 10.0)]);
        tree.insert_child(stack, View::new("Item").with_size(Size::new(10.0, 10.0)).hidden(true))
            .unwrap();
        let overlay = tree
            .insert_child(
                stack,
                View::new("Overlay").with_frame(Rect::new(7.0, 7.0, 3.0, 3.0)).with_alignment(Alignment::Internal),
            )
            .unwrap();
        tree.set_hidden(items[0], true);
        tree.layout_if_needed(root);
        assert_eq!(tree.get(items[1]).unwrap().frame.y, 0.0);
        assert_eq!(tree.get(overlay).unwrap().frame, Rect::new(7.0, 7.0, 3.0, 3.0));
    }

    #[test]
    fn respects_padding() {
        let (mut tree, root, stack, items) =
            stack_in_window(Axis::Vertical, Distribution::Default, 0.0, &[(10.0, 10.0), (10.0, 10.0)]);
        tree.set_padding(stack, Spacing::new(5.0, 0.0, 0.0, 3.0));
        tree.layout_if_needed(root);
        assert_eq!(
            frames(&tree, &items),
            vec![Rect::new(0.0, 5.0, 10.0, 10.0), Rect::new(0.0, 15.0, 10.0, 10.0)]
        );
    }

    #[test]
    fn measures_sum_along_and_max_across() {
        let mut tree = ViewTree::new();
        let stack = tree.insert(View::stack(Axis::Horizontal).with_spacing(5.0).with_padding(Spacing::all(1.0)));
        tree.insert_child(stack, View::new("A").with_size(Size::new(10.0, 4.0))).unwrap();
        tree.insert_child(stack, View::new("B").with_size(Size::new(20.0, 8.0))).unwrap();
        tree.insert_child(stack, View::new("C").with_size(Size::new(99.0, 99.0)).hidden(true)).unwrap();
        assert_eq!(tree.size_that_fits(stack), Size::new(37.0, 10.0));

        tree.size_to_fit(stack);
        tree.layout_if_needed(stack);
        assert_eq!(tree.size_that_fits(stack), Size::new(37.0, 10.0));
    }

    #[test]
    fn empty_stack_measures_padding() {
        let mut tree = ViewTree::new();
        let stack = tree.insert(View::stack(Axis::Vertical).with_spacing(8.0).with_padding(Spacing::all(2.0)));
        assert_eq!(tree.size_that_fits(stack), Size::new(4.0, 4.0));
        tree.layout_if_needed(stack);
    }
}
