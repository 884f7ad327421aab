//! Pilot: programmatic interaction with a headless window.
//!
//! The `Pilot` wraps a [`WindowController`] and provides methods to simulate
//! user input (mouse presses, drags, resize) as crossterm events, run the
//! per-frame passes, and inspect the resulting frames.

use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::css::Selector;
use crate::geometry::{Rect, Size};
use crate::view::ViewId;
use crate::window::{WindowConfig, WindowController};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless window driver for testing.
///
/// Every simulated input is followed by an [`update`](WindowController::update),
/// so frames read back through the pilot are always laid out.
///
/// # Examples
///
/// ```ignore
/// use strata_ui::layout::PanelConfig;
/// use strata_ui::testing::Pilot;
/// use strata_ui::window::WindowConfig;
///
/// let mut pilot = Pilot::with_config(WindowConfig::new().with_panel(PanelConfig::new()));
/// let panel = pilot.window().panels()[0].view;
/// pilot.drag((2, 2), (12, 7));
/// assert_eq!(pilot.frame_of(panel).unwrap().x, 10.0);
/// ```
pub struct Pilot {
    window: WindowController,
}

impl Pilot {
    /// Create a headless window with the given size.
    pub fn new(width: u16, height: u16) -> Self {
        let size = Size::new(f32::from(width), f32::from(height));
        Self::with_config(WindowConfig::new().with_size(size))
    }

    /// Create a Pilot from a [`WindowConfig`].
    pub fn with_config(config: WindowConfig) -> Self {
        let mut window = WindowController::new(config);
        window.update();
        Self { window }
    }

    /// Append a stylesheet and restyle.
    pub fn with_css(mut self, css: &str) -> Self {
        self.window.add_css(css);
        self.window.update();
        self
    }

    // ── Input simulation ─────────────────────────────────────────────

    fn send(&mut self, event: Event) -> bool {
        let consumed = self.window.respond_to_event(&event);
        self.window.update();
        consumed
    }

    fn mouse(&mut self, kind: MouseEventKind, x: u16, y: u16) -> bool {
        self.send(Event::Mouse(MouseEvent { kind, column: x, row: y, modifiers: KeyModifiers::NONE }))
    }

    /// Press the left button at (x, y).
    pub fn mouse_down(&mut self, x: u16, y: u16) -> bool {
        self.mouse(MouseEventKind::Down(MouseButton::Left), x, y)
    }

    /// Move the pointer to (x, y) with the left button held.
    pub fn mouse_drag(&mut self, x: u16, y: u16) -> bool {
        self.mouse(MouseEventKind::Drag(MouseButton::Left), x, y)
    }

    /// Release the left button at (x, y).
    pub fn mouse_up(&mut self, x: u16, y: u16) -> bool {
        self.mouse(MouseEventKind::Up(MouseButton::Left), x, y)
    }

    /// Press and release the left button at (x, y).
    pub fn click(&mut self, x: u16, y: u16) -> bool {
        let pressed = self.mouse_down(x, y);
        self.mouse_up(x, y) || pressed
    }

    /// Press at `from`, drag to `to` and release there. Returns whether the
    /// press was consumed.
    pub fn drag(&mut self, from: (u16, u16), to: (u16, u16)) -> bool {
        let pressed = self.mouse_down(from.0, from.1);
        self.mouse_drag(to.0, to.1);
        self.mouse_up(to.0, to.1);
        pressed
    }

    /// Simulate a terminal resize to the given dimensions.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.send(Event::Resize(width, height));
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Borrow the underlying window immutably.
    pub fn window(&self) -> &WindowController {
        &self.window
    }

    /// Borrow the underlying window mutably.
    pub fn window_mut(&mut self) -> &mut WindowController {
        &mut self.window
    }

    /// Run the per-frame passes.
    pub fn update(&mut self) {
        self.window.update();
    }

    /// The frame of `id` in window coordinates.
    pub fn frame_of(&self, id: ViewId) -> Option<Rect> {
        self.window.tree().render_frame(id)
    }

    /// Views under the root matching `selector`. A malformed selector
    /// matches nothing.
    pub fn select(&self, selector: &str) -> Vec<ViewId> {
        match Selector::parse(selector) {
            Ok(selector) => self.window.tree().select(&selector, self.window.root()),
            Err(err) => {
                log::warn!("pilot: bad selector '{selector}': {err}");
                Vec::new()
            }
        }
    }

    /// Dump the tree's frames. See [`frames_to_string`](super::frames_to_string).
    pub fn frames(&self) -> String {
        super::snapshot::frames_to_string(self.window.tree(), self.window.root())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::layout::PanelConfig;
    use crate::view::{View, ViewState};
    use pretty_assertions::assert_eq;

    fn pilot_with_panel() -> Pilot {
        let config = WindowConfig::new()
            .with_size(Size::new(80.0, 24.0))
            .with_panel(PanelConfig::new().with_identifier("main").with_origin(Point::new(4.0, 2.0)));
        let mut pilot = Pilot::with_config(config);
        let content = pilot.window().panels()[0].content;
        pilot
            .window_mut()
            .tree_mut()
            .insert_child(content, View::new("Label").with_size(Size::new(10.0, 2.0)))
            .unwrap();
        pilot.update();
        pilot
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_sets_root_size() {
        let pilot = Pilot::new(120, 40);
        let root = pilot.window().root();
        assert_eq!(pilot.frame_of(root), Some(Rect::new(0.0, 0.0, 120.0, 40.0)));
        assert!(!pilot.window().tree().get(root).unwrap().needs_apply_style());
    }

    #[test]
    fn with_css_restyles() {
        let pilot = Pilot::new(10, 10).with_css("Window { border-width: 2; }");
        let root = pilot.window().root();
        assert_eq!(pilot.window().tree().get(root).unwrap().border_width, 2.0);
    }

    // ── Mouse ────────────────────────────────────────────────────────

    #[test]
    fn drag_moves_panel() {
        let mut pilot = pilot_with_panel();
        let panel = pilot.select("#main")[0];
        assert!(pilot.drag((5, 3), (15, 8)));
        assert_eq!(pilot.frame_of(panel).map(|f| f.origin()), Some(Point::new(14.0, 7.0)));
    }

    #[test]
    fn mouse_down_highlights_until_release() {
        let mut pilot = pilot_with_panel();
        let panel = pilot.select("Panel")[0];
        assert!(pilot.mouse_down(5, 3));
        assert_eq!(pilot.select("Panel:highlighted"), vec![panel]);
        assert!(pilot.mouse_up(5, 3));
        assert!(pilot.select("Panel:highlighted").is_empty());
        assert!(!pilot.window().tree().get(panel).unwrap().state.contains(ViewState::HIGHLIGHTED));
    }

    #[test]
    fn click_outside_panels_is_ignored() {
        let mut pilot = pilot_with_panel();
        assert!(!pilot.click(70, 20));
        assert!(pilot.click(5, 3));
    }

    // ── Resize ───────────────────────────────────────────────────────

    #[test]
    fn resize_updates_root() {
        let mut pilot = Pilot::new(80, 24);
        pilot.resize(100, 50);
        let root = pilot.window().root();
        assert_eq!(pilot.frame_of(root), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
    }

    // ── Query ────────────────────────────────────────────────────────

    #[test]
    fn bad_selector_selects_nothing() {
        let pilot = pilot_with_panel();
        assert!(pilot.select("Panel >").is_empty());
        assert_eq!(pilot.select("Panel .content Label").len(), 1);
    }

    #[test]
    fn frames_dump() {
        let pilot = pilot_with_panel();
        insta::assert_snapshot!(pilot.frames(), @r"
        Window (0, 0, 80, 24)
          Panel#main (4, 2, 34, 26)
            StackView (12, 12, 10, 2)
              StackView.content (0, 0, 10, 2)
                Label (0, 0, 10, 2)
              StackView.accessory (0, 0, 0, 0) hidden
            ResizeHandle.resize-handle (24, 16, 10, 10)
        ");
    }
}
