//! Layout: constraints, size negotiation, default and stack layout, panels.

pub mod constraint;
pub mod engine;
pub mod panel;
pub mod stack;

pub use constraint::{Attribute, Constraint, ConstraintError, Relation, Source, Target};
pub use panel::{Gesture, GestureKind, Panel, PanelConfig, PanelState};
