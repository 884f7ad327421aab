//! View types: ViewId, View, state and layout masks.

use std::collections::BTreeMap;
use std::str::FromStr;

use bitflags::bitflags;
use slotmap::new_key_type;

use crate::color::Color;
use crate::css::model::Style;
use crate::geometry::{Rect, Size, Spacing};
use crate::layout::constraint::Constraint;
use crate::layout::panel::PanelState;

new_key_type! {
    /// Unique identifier for a view in a [`ViewTree`](super::ViewTree). Copy, lightweight (u64).
    pub struct ViewId;
}

bitflags! {
    /// Interaction state of a view, matched by pseudo selectors (`:highlighted`).
    #[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct ViewState: u8 {
        const HIGHLIGHTED = 1 << 0;
        const SELECTED = 1 << 1;
        const DISABLED = 1 << 2;
        const FOCUSED = 1 << 3;
    }
}

impl ViewState {
    /// The state bit named by a pseudo selector, if any.
    pub fn from_pseudo(name: &str) -> Option<ViewState> {
        match name {
            "highlighted" => Some(ViewState::HIGHLIGHTED),
            "selected" => Some(ViewState::SELECTED),
            "disabled" => Some(ViewState::DISABLED),
            "focused" => Some(ViewState::FOCUSED),
            _ => None,
        }
    }
}

bitflags! {
    /// How a view is sized by its superview's layout pass.
    #[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Autoresizing: u8 {
        /// Take the full width of the superview's bounds.
        const WIDTH = 1 << 0;
        /// Take the full height of the superview's bounds.
        const HEIGHT = 1 << 1;
        const FILL = Self::WIDTH.bits() | Self::HEIGHT.bits();
        /// Size to fit the visible subviews.
        const CONTAIN = 1 << 2;
    }
}

/// Vertical component of an [`Alignment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    Middle,
    Bottom,
}

/// Horizontal component of an [`Alignment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

/// Placement of a view within its superview's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// The origin is left untouched by layout.
    #[default]
    None,
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    /// Positioned within the superview's frame rather than its bounds, and
    /// excluded from the visible subviews that containers distribute.
    Internal,
}

impl Alignment {
    pub fn vertical(self) -> Option<VerticalAlignment> {
        use Alignment::*;
        match self {
            TopLeft | TopCenter | TopRight => Some(VerticalAlignment::Top),
            MiddleLeft | MiddleCenter | MiddleRight => Some(VerticalAlignment::Middle),
            BottomLeft | BottomCenter | BottomRight => Some(VerticalAlignment::Bottom),
            None | Internal => Option::None,
        }
    }

    pub fn horizontal(self) -> Option<HorizontalAlignment> {
        use Alignment::*;
        match self {
            TopLeft | MiddleLeft | BottomLeft => Some(HorizontalAlignment::Left),
            TopCenter | MiddleCenter | BottomCenter => Some(HorizontalAlignment::Center),
            TopRight | MiddleRight | BottomRight => Some(HorizontalAlignment::Right),
            None | Internal => Option::None,
        }
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let alignment = match s {
            "none" => Alignment::None,
            "top-left" => Alignment::TopLeft,
            "top-center" => Alignment::TopCenter,
            "top-right" => Alignment::TopRight,
            "middle-left" => Alignment::MiddleLeft,
            "middle-center" => Alignment::MiddleCenter,
            "middle-right" => Alignment::MiddleRight,
            "bottom-left" => Alignment::BottomLeft,
            "bottom-center" => Alignment::BottomCenter,
            "bottom-right" => Alignment::BottomRight,
            "internal" => Alignment::Internal,
            other => return Err(format!("unknown alignment: {other}")),
        };
        Ok(alignment)
    }
}

/// The axis a stack view distributes its subviews along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// How a stack view allocates space among its visible subviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distribution {
    /// Subviews keep their size.
    #[default]
    Default,
    /// Subviews are scaled proportionally to fill the available extent.
    Fill,
    /// Subviews share the available extent equally.
    FillEqually,
}

/// Parameters of a stacking container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StackParams {
    pub axis: Axis,
    pub distribution: Distribution,
    pub spacing: f32,
}

/// Layout behavior of a view.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewKind {
    /// Default layout: size and align each subview independently.
    #[default]
    Plain,
    /// Stack subviews along an axis.
    Stack(StackParams),
    /// Draggable, resizable container.
    Panel(PanelState),
}

/// A node in the view hierarchy.
#[derive(Debug, Clone)]
pub struct View {
    /// Type name (e.g. "Button", "StackView"), matched by type selectors.
    pub type_name: String,
    /// Names of the types this view specializes, also matched by type selectors.
    pub supertypes: Vec<String>,
    /// Optional identifier (`#id` selector).
    pub identifier: Option<String>,
    /// Style classes (`.class` selector).
    pub classes: Vec<String>,
    /// Arbitrary attributes (`[name]` / `[name=value]` selectors).
    pub attributes: BTreeMap<String, String>,
    /// Pseudo-state bits (`:highlighted` etc).
    pub state: ViewState,
    /// Hidden views are neither drawn nor laid out by their superview.
    pub hidden: bool,
    /// Frame relative to the superview.
    pub frame: Rect,
    pub padding: Spacing,
    pub alignment: Alignment,
    pub autoresizing: Autoresizing,
    pub min_size: Size,
    pub max_size: Size,
    pub background_color: Color,
    pub border_color: Color,
    pub border_width: f32,
    /// Constraints applied before layout, in order.
    pub constraints: Vec<Constraint>,
    pub kind: ViewKind,
    /// The style last produced by the cascade.
    pub computed_style: Style,
    pub(crate) needs_apply_style: bool,
    pub(crate) needs_apply_constraints: bool,
    pub(crate) needs_layout: bool,
}

impl View {
    /// Create a plain view with the given type name and sensible defaults.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            supertypes: Vec::new(),
            identifier: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            state: ViewState::empty(),
            hidden: false,
            frame: Rect::EMPTY,
            padding: Spacing::ZERO,
            alignment: Alignment::None,
            autoresizing: Autoresizing::empty(),
            min_size: Size::ZERO,
            max_size: Size::MAX,
            background_color: Color::TRANSPARENT,
            border_color: Color::TRANSPARENT,
            border_width: 0.0,
            constraints: Vec::new(),
            kind: ViewKind::Plain,
            computed_style: Style::new(),
            needs_apply_style: true,
            needs_apply_constraints: false,
            needs_layout: true,
        }
    }

    /// Create a stack view along `axis`. Stacks contain their subviews by default.
    pub fn stack(axis: Axis) -> Self {
        let mut view = View::new("StackView").with_supertype("View");
        view.kind = ViewKind::Stack(StackParams { axis, ..StackParams::default() });
        view.autoresizing = Autoresizing::CONTAIN;
        view
    }

    /// Add a super-type name (builder).
    pub fn with_supertype(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.supertypes.contains(&name) {
            self.supertypes.push(name);
        }
        self
    }

    /// Set the identifier (builder).
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Add a single style class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add multiple style classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            self = self.with_class(class);
        }
        self
    }

    /// Set an attribute (builder).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_state(mut self, state: ViewState) -> Self {
        self.state = state;
        self
    }

    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.frame.width = size.width;
        self.frame.height = size.height;
        self
    }

    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_autoresizing(mut self, autoresizing: Autoresizing) -> Self {
        self.autoresizing = autoresizing;
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

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set stack spacing (builder). No-op for non-stack views.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        if let ViewKind::Stack(params) = &mut self.kind {
            params.spacing = spacing;
        }
        self
    }

    /// Set stack distribution (builder). No-op for non-stack views.
    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        if let ViewKind::Stack(params) = &mut self.kind {
            params.distribution = distribution;
        }
        self
    }

    /// Add a constraint (builder).
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self.needs_apply_constraints = true;
        self
    }

    /// Whether this view is of type `name`, directly or through a super-type.
    pub fn is_kind_of(&self, name: &str) -> bool {
        self.type_name == name || self.supertypes.iter().any(|t| t == name)
    }

    /// Check whether this view has a given style class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// The current frame size.
    pub fn size(&self) -> Size {
        self.frame.size()
    }

    /// The stack parameters, if this is a stack view.
    pub fn stack_params(&self) -> Option<&StackParams> {
        match &self.kind {
            ViewKind::Stack(params) => Some(params),
            _ => None,
        }
    }

    pub fn stack_params_mut(&mut self) -> Option<&mut StackParams> {
        match &mut self.kind {
            ViewKind::Stack(params) => Some(params),
            _ => None,
        }
    }

    pub fn needs_apply_style(&self) -> bool {
        self.needs_apply_style
    }

    pub fn needs_apply_constraints(&self) -> bool {
        self.needs_apply_constraints
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults() {
        let view = View::new("Label");
        assert_eq!(view.type_name, "Label");
        assert!(view.identifier.is_none());
        assert!(view.classes.is_empty());
        assert!(view.state.is_empty());
        assert!(!view.hidden);
        assert_eq!(view.max_size, Size::MAX);
        assert_eq!(view.kind, ViewKind::Plain);
        assert!(view.needs_layout());
        assert!(view.needs_apply_style());
        assert!(!view.needs_apply_constraints());
    }

    #[test]
    fn builder_with_class_dedup() {
        let view = View::new("Panel").with_class("primary").with_classes(["primary", "large"]);
        assert_eq!(view.classes, vec!["primary", "large"]);
    }

    #[test]
    fn is_kind_of_walks_supertypes() {
        let view = View::new("Button").with_supertype("Control").with_supertype("View");
        assert!(view.is_kind_of("Button"));
        assert!(view.is_kind_of("Control"));
        assert!(view.is_kind_of("View"));
        assert!(!view.is_kind_of("Panel"));
    }

    #[test]
    fn stack_defaults_to_contain() {
        let view = View::stack(Axis::Horizontal).with_spacing(4.0);
        assert!(view.autoresizing.contains(Autoresizing::CONTAIN));
        let params = view.stack_params().unwrap();
        assert_eq!(params.axis, Axis::Horizontal);
        assert_eq!(params.spacing, 4.0);
        assert_eq!(params.distribution, Distribution::Default);
    }

    #[test]
    fn spacing_ignored_for_plain_views() {
        let view = View::new("Box").with_spacing(10.0);
        assert!(view.stack_params().is_none());
    }

    #[test]
    fn pseudo_state_names() {
        assert_eq!(ViewState::from_pseudo("highlighted"), Some(ViewState::HIGHLIGHTED));
        assert_eq!(ViewState::from_pseudo("disabled"), Some(ViewState::DISABLED));
        assert_eq!(ViewState::from_pseudo("hover"), None);
    }

    #[test]
    fn autoresizing_fill_is_width_and_height() {
        assert_eq!(Autoresizing::FILL, Autoresizing::WIDTH | Autoresizing::HEIGHT);
        assert!(!Autoresizing::FILL.contains(Autoresizing::CONTAIN));
    }

    #[test]
    fn alignment_components() {
        assert_eq!(Alignment::MiddleRight.vertical(), Some(VerticalAlignment::Middle));
        assert_eq!(Alignment::MiddleRight.horizontal(), Some(HorizontalAlignment::Right));
        assert_eq!(Alignment::Internal.vertical(), None);
        assert_eq!("bottom-center".parse::<Alignment>(), Ok(Alignment::BottomCenter));
        assert!("sideways".parse::<Alignment>().is_err());
    }

    #[test]
    fn view_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<ViewId>();
    }
}
