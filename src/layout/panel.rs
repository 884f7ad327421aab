//! Panel: a draggable, resizable container with a content area, an optional
//! accessory bar and a resize handle in its bottom-right corner.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::color::Color;
use crate::geometry::{Point, Size, Spacing};
use crate::view::{Alignment, Autoresizing, Axis, TreeError, View, ViewId, ViewKind, ViewState, ViewTree};

/// Build-time settings for a [`Panel`].
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub identifier: Option<String>,
    pub classes: Vec<String>,
    pub origin: Point,
    pub padding: f32,
    pub spacing: f32,
    pub handle_size: f32,
    pub min_size: Size,
    pub max_size: Size,
    pub draggable: bool,
    pub resizable: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            identifier: None,
            classes: Vec::new(),
            origin: Point::ZERO,
            padding: 12.0,
            spacing: 6.0,
            handle_size: 10.0,
            min_size: Size::ZERO,
            max_size: Size::MAX,
            draggable: true,
            resizable: true,
        }
    }
}

impl PanelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_handle_size(mut self, size: f32) -> Self {
        self.handle_size = size;
        self
    }

    pub fn with_min_size(mut self, size: Size) -> Self {
        self.min_size = size;
        self
    }

    pub fn with_max_size(mut self, size: Size) -> Self {
        self.max_size = size;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }
}

/// The views making up a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Panel {
    pub view: ViewId,
    /// Vertical stack holding the content and accessory bar.
    pub stack: ViewId,
    pub content: ViewId,
    /// Horizontal bar below the content, hidden until shown.
    pub accessory: ViewId,
    pub handle: ViewId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize,
}

/// A pointer gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub kind: GestureKind,
    /// Pointer position of the previous event, in window coordinates.
    pub last: Point,
}

/// Per-panel state, stored in [`ViewKind::Panel`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelState {
    pub parts: Panel,
    pub draggable: bool,
    pub resizable: bool,
    pub gesture: Option<Gesture>,
}

impl Panel {
    /// Build a panel under `parent`.
    pub fn build(tree: &mut ViewTree, parent: ViewId, config: &PanelConfig) -> Result<Panel, TreeError> {
        let mut panel = View::new("Panel")
            .with_supertype("Control")
            .with_classes(config.classes.iter().cloned())
            .with_frame(crate::geometry::Rect::new(config.origin.x, config.origin.y, 0.0, 0.0))
            .with_padding(Spacing::all(config.padding))
            .with_autoresizing(Autoresizing::CONTAIN)
            .with_min_size(config.min_size)
            .with_max_size(config.max_size);
        panel.identifier = config.identifier.clone();
        panel.border_color = Color::DARK_GRAY;
        panel.border_width = 1.0;
        panel.kind = ViewKind::Panel(PanelState::default());
        let view = tree.insert_child(parent, panel)?;

        let stack = tree.insert_child(
            view,
            View::stack(Axis::Vertical).with_spacing(config.spacing).with_alignment(Alignment::TopLeft),
        )?;
        let content = tree.insert_child(
            stack,
            View::stack(Axis::Vertical)
                .with_class("content")
                .with_spacing(config.spacing)
                .with_autoresizing(Autoresizing::CONTAIN | Autoresizing::WIDTH),
        )?;
        let accessory = tree.insert_child(
            stack,
            View::stack(Axis::Horizontal)
                .with_class("accessory")
                .with_spacing(config.spacing)
                .with_alignment(Alignment::MiddleRight)
                .hidden(true),
        )?;
        let handle = tree.insert_child(
            view,
            View::new("ResizeHandle")
                .with_class("resize-handle")
                .with_alignment(Alignment::Internal)
                .with_size(Size::new(config.handle_size, config.handle_size))
                .hidden(!config.resizable),
        )?;

        let parts = Panel { view, stack, content, accessory, handle };
        if let Some(ViewKind::Panel(state)) = tree.get_mut(view).map(|v| &mut v.kind) {
            *state = PanelState {
                parts,
                draggable: config.draggable,
                resizable: config.resizable,
                gesture: None,
            };
        }
        log::debug!("built panel {view:?}");
        Ok(parts)
    }

    /// The parts of the panel `id`, if it is one.
    pub fn of(tree: &ViewTree, id: ViewId) -> Option<Panel> {
        tree.panel_state(id).map(|state| state.parts)
    }

    /// Handle a mouse event addressed to the panel `id`. Returns whether the
    /// event was consumed.
    pub fn capture_event(tree: &mut ViewTree, id: ViewId, event: &MouseEvent) -> bool {
        let point = Point::new(f32::from(event.column), f32::from(event.row));
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => Self::begin(tree, id, point),
            MouseEventKind::Drag(MouseButton::Left) => {
                let active = tree.panel_state(id).is_some_and(|state| state.gesture.is_some());
                if !active && !Self::begin(tree, id, point) {
                    return false;
                }
                Self::update(tree, id, point);
                true
            }
            MouseEventKind::Up(MouseButton::Left) => Self::end(tree, id),
            _ => false,
        }
    }

    fn begin(tree: &mut ViewTree, id: ViewId, point: Point) -> bool {
        let Some(state) = tree.panel_state(id) else {
            return false;
        };
        let on_handle = state.resizable
            && tree.get(state.parts.handle).is_some_and(|handle| !handle.hidden)
            && tree.render_frame(state.parts.handle).is_some_and(|frame| frame.contains(point));
        let kind = if on_handle {
            GestureKind::Resize
        } else if state.draggable {
            GestureKind::Drag
        } else {
            return false;
        };

        if let Some(state) = tree.panel_state_mut(id) {
            state.gesture = Some(Gesture { kind, last: point });
        }
        tree.set_state(id, ViewState::HIGHLIGHTED, true);
        log::trace!("panel {id:?}: begin {kind:?} at {point:?}");
        true
    }

    fn update(tree: &mut ViewTree, id: ViewId, point: Point) {
        let Some(state) = tree.panel_state_mut(id) else {
            return;
        };
        let Some(gesture) = state.gesture.as_mut() else {
            return;
        };
        let delta = point - gesture.last;
        gesture.last = point;
        let kind = gesture.kind;

        let Some(frame) = tree.get(id).map(|view| view.frame) else {
            return;
        };
        match kind {
            GestureKind::Resize => {
                tree.resize(id, Size::new(frame.width + delta.x, frame.height + delta.y));
            }
            GestureKind::Drag => tree.set_frame(id, frame.translate(delta)),
        }
    }

    fn end(tree: &mut ViewTree, id: ViewId) -> bool {
        let ended = tree.panel_state_mut(id).and_then(|state| state.gesture.take()).is_some();
        if ended {
            tree.set_state(id, ViewState::HIGHLIGHTED, false);
        }
        ended
    }
}

impl ViewTree {
    pub fn panel_state(&self, id: ViewId) -> Option<&PanelState> {
        match &self.get(id)?.kind {
            ViewKind::Panel(state) => Some(state),
            _ => None,
        }
    }

    pub fn panel_state_mut(&mut self, id: ViewId) -> Option<&mut PanelState> {
        match &mut self.get_mut(id)?.kind {
            ViewKind::Panel(state) => Some(state),
            _ => None,
        }
    }

    /// Show or hide a panel's accessory bar.
    pub fn set_panel_accessory_hidden(&mut self, id: ViewId, hidden: bool) {
        if let Some(parts) = Panel::of(self, id) {
            self.set_hidden(parts.accessory, hidden);
            self.set_needs_layout(id);
        }
    }

    /// Allow or forbid resizing; the handle is hidden on the next layout.
    pub fn set_panel_resizable(&mut self, id: ViewId, resizable: bool) {
        if let Some(state) = self.panel_state_mut(id) {
            state.resizable = resizable;
            self.set_needs_layout(id);
        }
    }

    pub fn set_panel_draggable(&mut self, id: ViewId, draggable: bool) {
        if let Some(state) = self.panel_state_mut(id) {
            state.draggable = draggable;
        }
    }

    /// The size the content stack is given: what it needs to contain its
    /// subviews, less the accessory bar and its spacing when that is shown.
    pub fn panel_content_size(&self, id: ViewId) -> Size {
        let Some(state) = self.panel_state(id) else {
            return Size::ZERO;
        };
        let parts = state.parts;
        let mut size = self.size_that_contains(parts.content);
        if self.get(parts.accessory).is_some_and(|accessory| !accessory.hidden) {
            let spacing = self.get(parts.stack).and_then(|stack| stack.stack_params()).map_or(0.0, |p| p.spacing);
            size.height = (size.height - (self.size_that_contains(parts.accessory).height + spacing)).max(0.0);
        }
        size
    }

    pub(crate) fn layout_panel(&mut self, id: ViewId, state: &PanelState) {
        let size = self.panel_content_size(id);
        self.resize(state.parts.content, size);

        self.layout_default(id);

        let Some(frame) = self.get(id).map(|view| view.frame) else {
            return;
        };
        if let Some(handle) = self.get_mut(state.parts.handle) {
            handle.frame.x = frame.width - handle.frame.width;
            handle.frame.y = frame.height - handle.frame.height;
        }
        self.set_hidden(state.parts.handle, !state.resizable);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
    }

    fn window_with_panel(config: PanelConfig) -> (ViewTree, ViewId, Panel) {
        let mut tree = ViewTree::new();
        let root = tree.insert(View::new("Window").with_size(Size::new(200.0, 100.0)));
        let panel = Panel::build(&mut tree, root, &config).unwrap();
        tree.insert_child(panel.content, View::new("Label").with_size(Size::new(40.0, 10.0))).unwrap();
        tree.layout_if_needed(root);
        (tree, root, panel)
    }

    #[test]
    fn build_structure() {
        let (tree, _root, panel) = window_with_panel(PanelConfig::new().with_identifier("main"));
        let view = tree.get(panel.view).unwrap();
        assert!(view.is_kind_of("Control"));
        assert_eq!(view.identifier.as_deref(), Some("main"));
        assert_eq!(view.padding, Spacing::all(12.0));
        assert_eq!(tree.children(panel.view), &[panel.stack, panel.handle]);
        assert_eq!(tree.children(panel.stack), &[panel.content, panel.accessory]);
        assert!(tree.get(panel.accessory).unwrap().hidden);
        assert_eq!(Panel::of(&tree, panel.view), Some(panel));
        assert_eq!(Panel::of(&tree, panel.content), None);
    }

    #[test]
    fn layout_contains_content_and_pins_handle() {
        let (tree, _root, panel) = window_with_panel(PanelConfig::new().with_origin(Point::new(5.0, 5.0)));
        // 40x10 label plus 12 padding on every side.
        assert_eq!(tree.get(panel.view).unwrap().frame, Rect::new(5.0, 5.0, 64.0, 34.0));
        assert_eq!(tree.get(panel.stack).unwrap().frame, Rect::new(12.0, 12.0, 40.0, 10.0));
        assert_eq!(tree.get(panel.handle).unwrap().frame, Rect::new(54.0, 24.0, 10.0, 10.0));
        assert!(!tree.get(panel.handle).unwrap().hidden);
    }

    #[test]
    fn accessory_reduces_content_size() {
        let (mut tree, root, panel) = window_with_panel(PanelConfig::new());
        tree.insert_child(panel.accessory, View::new("Button").with_size(Size::new(20.0, 4.0))).unwrap();
        assert_eq!(tree.panel_content_size(panel.view), Size::new(40.0, 10.0));
        tree.set_panel_accessory_hidden(panel.view, false);
        assert_eq!(tree.panel_content_size(panel.view), Size::new(40.0, 0.0));
        tree.layout_if_needed(root);
        assert!(!tree.get(panel.accessory).unwrap().hidden);
    }

    #[test]
    fn not_resizable_hides_handle() {
        let (tree, _root, panel) = window_with_panel(PanelConfig::new().resizable(false));
        assert!(tree.get(panel.handle).unwrap().hidden);
    }

    #[test]
    fn drag_translates_origin() {
        let (mut tree, _root, panel) = window_with_panel(PanelConfig::new().with_origin(Point::new(10.0, 10.0)));
        assert!(Panel::capture_event(&mut tree, panel.view, &mouse(MouseEventKind::Down(MouseButton::Left), 15, 15)));
        assert!(tree.get(panel.view).unwrap().state.contains(ViewState::HIGHLIGHTED));
        assert!(Panel::capture_event(&mut tree, panel.view, &mouse(MouseEventKind::Drag(MouseButton::Left), 25, 18)));
        assert!(Panel::capture_event(&mut tree, panel.view, &mouse(MouseEventKind::Drag(MouseButton::Left), 30, 20)));
        assert_eq!(tree.get(panel.view).unwrap().frame.origin(), Point::new(25.0, 15.0));
        assert_eq!(tree.get(panel.view).unwrap().size(), Size::new(64.0, 34.0));

        assert!(Panel::capture_event(&mut tree, panel.view, &mouse(MouseEventKind::Up(MouseButton::Left), 30, 20)));
        assert!(!tree.get(panel.view).unwrap().state.contains(ViewState::HIGHLIGHTED));
        assert_eq!(tree.panel_state(panel.view).unwrap().gesture, None);
        assert!(!Panel::capture_event(&mut tree, panel.view, &mouse(MouseEventKind::Up(MouseButton::Left), 30, 20)));
    }

    #[test]
    fn resize_from_handle_clamps() {
        let config = PanelConfig::new().with_min_size(Size::new(50.0, 30.0)).with_max_size(Size::new(80.0, 60.0));
        let (mut tree, _root, panel) = window_with_panel(config);
        // Handle spans (54, 24) to (64, 34).
        assert!(Panel::capture_event(&mut tree, panel.view, &mouse(MouseEventKind::Down(MouseButton::Left), 60, 30)));
        assert_eq!(tree.panel_state(panel.view).unwrap().gesture.map(|g| g.kind), Some(GestureKind::Resize));

        Panel::capture_event(&mut tree, panel.view, &mouse(MouseEventKind::Drag(MouseButton::Left), 100, 35));
        assert_eq!(tree.get(panel.view).unwrap().size(), Size::new(80.0, 39.0));
        Panel::capture_event(&mut tree, panel.view, &mouse(MouseEventKind::Drag(MouseButton::Left), 0, 0));
        assert_eq!(tree.get(panel.view).unwrap().size(), Size::new(50.0, 30.0));
        assert_eq!(tree.get(panel.view).unwrap().frame.origin(), Point::ZERO);
    }

    #[test]
    fn not_draggable_ignores_body_presses() {
        let (mut tree, _root, panel) = window_with_panel(PanelConfig::new().draggable(false));
        assert!(!Panel::capture_event(&mut tree, panel.view, &mouse(MouseEventKind::Down(MouseButton::Left), 2, 2)));
        assert!(!Panel::capture_event(&mut tree, panel.view, &mouse(MouseEventKind::Drag(MouseButton::Left), 9, 9)));
        assert_eq!(tree.get(panel.view).unwrap().frame.origin(), Point::ZERO);
    }

    #[test]
    fn drag_without_press_starts_a_gesture() {
        let (mut tree, _root, panel) = window_with_panel(PanelConfig::new());
        assert!(Panel::capture_event(&mut tree, panel.view, &mouse(MouseEventKind::Drag(MouseButton::Left), 3, 3)));
        assert!(Panel::capture_event(&mut tree, panel.view, &mouse(MouseEventKind::Drag(MouseButton::Left), 4, 5)));
        assert_eq!(tree.get(panel.view).unwrap().frame.origin(), Point::new(1.0, 2.0));
    }

    #[test]
    fn other_buttons_are_ignored() {
        let (mut tree, _root, panel) = window_with_panel(PanelConfig::new());
        assert!(!Panel::capture_event(&mut tree, panel.view, &mouse(MouseEventKind::Down(MouseButton::Right), 3, 3)));
        assert!(!Panel::capture_event(&mut tree, panel.view, &mouse(MouseEventKind::Moved, 3, 3)));
    }
}
