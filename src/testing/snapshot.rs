//! Snapshot helpers.
//!
//! Functions for turning a laid-out view tree into plain text suitable for
//! snapshot testing and assertions.

use std::fmt::Write as _;

use crate::geometry::Rect;
use crate::view::{View, ViewId, ViewTree};
use crate::window::Renderer;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Describe a view as `Type#identifier.class1.class2`.
pub fn view_label(view: &View) -> String {
    let mut label = view.type_name.clone();
    if let Some(identifier) = &view.identifier {
        label.push('#');
        label.push_str(identifier);
    }
    for class in &view.classes {
        label.push('.');
        label.push_str(class);
    }
    label
}

/// Dump the frames under `root`, one view per line, indented two spaces per
/// level. Frames are relative to the superview. Hidden views are listed with
/// a `hidden` marker but their subviews are left out.
///
/// # Examples
///
/// ```ignore
/// use strata_ui::testing::frames_to_string;
///
/// let dump = frames_to_string(window.tree(), window.root());
/// assert!(dump.starts_with("Window (0, 0, 80, 24)"));
/// ```
pub fn frames_to_string(tree: &ViewTree, root: ViewId) -> String {
    let mut out = String::new();
    write_frames(tree, root, 0, &mut out);
    out.truncate(out.trim_end().len());
    out
}

fn write_frames(tree: &ViewTree, id: ViewId, depth: usize, out: &mut String) {
    let Some(view) = tree.get(id) else {
        return;
    };
    let Rect { x, y, width, height } = view.frame;
    let _ = write!(out, "{:indent$}{} ({x}, {y}, {width}, {height})", "", view_label(view), indent = depth * 2);
    if view.hidden {
        out.push_str(" hidden\n");
        return;
    }
    out.push('\n');
    for &child in tree.children(id) {
        write_frames(tree, child, depth + 1, out);
    }
}

// ---------------------------------------------------------------------------
// RecordingRenderer
// ---------------------------------------------------------------------------

/// A [`Renderer`] that records every draw call.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    /// Label and window-space frame of each drawn view, in draw order.
    pub calls: Vec<(String, Rect)>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The labels of the drawn views, in draw order.
    pub fn labels(&self) -> Vec<&str> {
        self.calls.iter().map(|(label, _)| label.as_str()).collect()
    }
}

impl Renderer for RecordingRenderer {
    fn draw_view(&mut self, view: &View, frame: Rect) {
        self.calls.push((view_label(view), frame));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use pretty_assertions::assert_eq;

    #[test]
    fn label_includes_identifier_and_classes() {
        let view = View::new("Button").with_identifier("ok").with_classes(["primary", "wide"]);
        assert_eq!(view_label(&view), "Button#ok.primary.wide");
        assert_eq!(view_label(&View::new("Label")), "Label");
    }

    #[test]
    fn frames_are_indented_by_depth() {
        let mut tree = ViewTree::new();
        let root = tree.insert(View::new("Window").with_size(Size::new(80.0, 24.0)));
        let box_ = tree
            .insert_child(root, View::new("Box").with_frame(Rect::new(2.0, 1.0, 10.5, 3.0)))
            .unwrap();
        let hidden = tree.insert_child(box_, View::new("Tip").with_class("hint").hidden(true)).unwrap();
        tree.insert_child(hidden, View::new("Never")).unwrap();

        insta::assert_snapshot!(frames_to_string(&tree, root), @r"
        Window (0, 0, 80, 24)
          Box (2, 1, 10.5, 3)
            Tip.hint (0, 0, 0, 0) hidden
        ");
    }

    #[test]
    fn recording_renderer_collects_labels() {
        let mut renderer = RecordingRenderer::new();
        renderer.draw_view(&View::new("A").with_identifier("x"), Rect::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(renderer.labels(), vec!["A#x"]);
        assert_eq!(renderer.calls[0].1, Rect::new(1.0, 1.0, 1.0, 1.0));
    }
}
