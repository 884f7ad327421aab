//! Window controller: owns the view tree and cascade, runs the per-frame
//! passes and routes terminal input to panels.
//!
//! A frame is `update` (style, then constraints, then layout) followed by
//! `render`, which hands every visible view to a [`Renderer`] depth-first.

use crossterm::event::{Event, MouseEvent, MouseEventKind};

use crate::css::{Cascade, Stylesheet};
use crate::geometry::{Point, Rect, Size};
use crate::layout::{Panel, PanelConfig};
use crate::view::{TreeError, View, ViewId, ViewKind, ViewTree};

/// Stylesheet applied before any user CSS.
pub const DEFAULT_THEME: &str = r#"
Window {
    background-color: black;
}

Panel {
    background-color: #202020;
    border-color: dark-gray;
    border-width: 1;
}

Panel:highlighted {
    border-color: light-gray;
}

ResizeHandle {
    background-color: gray;
}
"#;

// ---------------------------------------------------------------------------
// WindowConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`WindowController`].
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Initial size of the root view.
    pub size: Size,
    /// User stylesheets, applied after the theme in order.
    pub css: Vec<String>,
    /// Panels built under the root, in order.
    pub panels: Vec<PanelConfig>,
    /// Whether [`DEFAULT_THEME`] is applied.
    pub theme: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            size: Size::new(80.0, 24.0),
            css: Vec::new(),
            panels: Vec::new(),
            theme: true,
        }
    }
}

impl WindowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial size (builder).
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Append a stylesheet (builder).
    pub fn with_css(mut self, css: impl Into<String>) -> Self {
        self.css.push(css.into());
        self
    }

    /// Add a panel (builder).
    pub fn with_panel(mut self, panel: PanelConfig) -> Self {
        self.panels.push(panel);
        self
    }

    /// Skip the default theme (builder).
    pub fn without_theme(mut self) -> Self {
        self.theme = false;
        self
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Draws views. `frame` is the view's frame in window coordinates.
pub trait Renderer {
    fn draw_view(&mut self, view: &View, frame: Rect);
}

// ---------------------------------------------------------------------------
// WindowController
// ---------------------------------------------------------------------------

/// Owns a view tree rooted at a `Window` view, together with its cascade.
#[derive(Debug)]
pub struct WindowController {
    tree: ViewTree,
    cascade: Cascade,
    root: ViewId,
    panels: Vec<Panel>,
    /// Panel holding the current pointer gesture.
    captured: Option<ViewId>,
}

impl WindowController {
    pub fn new(config: WindowConfig) -> Self {
        let mut tree = ViewTree::new();
        let root = tree.insert(View::new("Window").with_size(config.size));

        let mut cascade = Cascade::new();
        if config.theme {
            cascade.add_stylesheet(Stylesheet::parse(DEFAULT_THEME));
        }
        for css in &config.css {
            cascade.add_stylesheet(Stylesheet::parse(css));
        }

        let mut window = Self { tree, cascade, root, panels: Vec::new(), captured: None };
        for panel in &config.panels {
            if let Err(err) = window.add_panel(panel) {
                log::warn!("failed to build panel: {err}");
            }
        }
        log::debug!(
            "window {}x{} with {} stylesheets, {} panels",
            config.size.width,
            config.size.height,
            window.cascade.stylesheets().len(),
            window.panels.len()
        );
        window
    }

    pub fn root(&self) -> ViewId {
        self.root
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ViewTree {
        &mut self.tree
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    /// Panels built by this window, in order.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Build a panel under the root.
    pub fn add_panel(&mut self, config: &PanelConfig) -> Result<Panel, TreeError> {
        let panel = Panel::build(&mut self.tree, self.root, config)?;
        self.panels.push(panel);
        Ok(panel)
    }

    /// Append a stylesheet and restyle the whole tree on the next update.
    pub fn add_stylesheet(&mut self, sheet: Stylesheet) {
        self.cascade.add_stylesheet(sheet);
        self.tree.invalidate_style(self.root);
    }

    /// Parse and append CSS text. See [`add_stylesheet`](Self::add_stylesheet).
    pub fn add_css(&mut self, css: &str) {
        self.add_stylesheet(Stylesheet::parse(css));
    }

    /// Resize the root view.
    pub fn resize(&mut self, size: Size) {
        self.tree.resize(self.root, size);
    }

    /// Run the style, constraint and layout passes over dirty views.
    pub fn update(&mut self) {
        let restyled = self.cascade.apply_if_needed(&mut self.tree, self.root);
        self.tree.apply_constraints_if_needed(self.root);
        self.tree.layout_if_needed(self.root);
        log::trace!("update: {restyled} restyled");
    }

    /// Update, then draw every visible view depth-first, superviews before
    /// subviews. Hidden views are skipped along with their subviews. Returns
    /// the number of views drawn.
    pub fn render(&mut self, renderer: &mut dyn Renderer) -> usize {
        self.update();
        self.draw(self.root, Point::ZERO, renderer)
    }

    fn draw(&self, id: ViewId, offset: Point, renderer: &mut dyn Renderer) -> usize {
        let Some(view) = self.tree.get(id) else {
            return 0;
        };
        if view.hidden {
            return 0;
        }
        let frame = view.frame.translate(offset);
        renderer.draw_view(view, frame);

        let mut drawn = 1;
        for &child in self.tree.children(id) {
            drawn += self.draw(child, frame.origin(), renderer);
        }
        drawn
    }

    /// Handle a terminal event. Returns whether it was consumed.
    pub fn respond_to_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Resize(width, height) => {
                self.resize(Size::new(f32::from(*width), f32::from(*height)));
                true
            }
            Event::Mouse(mouse) => self.route_mouse(mouse),
            _ => false,
        }
    }

    /// Send a mouse event to the panel holding the current gesture, or else
    /// to the panel under the pointer.
    fn route_mouse(&mut self, mouse: &MouseEvent) -> bool {
        let target = match self.captured {
            Some(panel) => Some(panel),
            None => self.panel_at(Point::new(f32::from(mouse.column), f32::from(mouse.row))),
        };
        let Some(panel) = target else {
            return false;
        };
        if matches!(mouse.kind, MouseEventKind::Down(_)) {
            self.tree.bring_subview_to_front(panel);
        }

        let consumed = Panel::capture_event(&mut self.tree, panel, mouse);
        let active = self.tree.panel_state(panel).is_some_and(|state| state.gesture.is_some());
        self.captured = active.then_some(panel);
        consumed
    }

    /// The innermost panel containing `point`.
    pub fn panel_at(&self, point: Point) -> Option<ViewId> {
        let hit = self.tree.hit_test(self.root, point)?;
        std::iter::once(hit)
            .chain(self.tree.ancestors(hit))
            .find(|&id| self.tree.get(id).is_some_and(|view| matches!(view.kind, ViewKind::Panel(_))))
    }
}
