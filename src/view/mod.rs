//! View arena: slotmap-backed view hierarchy with identifier/class/selector queries.

pub mod node;
pub mod tree;
pub mod query;

pub use node::{
    Alignment, Autoresizing, Axis, Distribution, HorizontalAlignment, StackParams,
    VerticalAlignment, View, ViewId, ViewKind, ViewState,
};
pub use tree::{Position, TreeError, ViewTree};
