//! # strata-ui
//!
//! A CSS-styled retained view hierarchy with box layout, for building
//! interactive control panels over any rendering surface.
//!
//! Views live in a slotmap arena and are styled by stylesheets whose
//! selectors match type names, identifiers, classes, pseudo-states and
//! attributes, combined with descendant and child combinators. Matching rules
//! cascade by specificity. Layout sizes and positions views by alignment,
//! autoresizing masks, constraints and stacking.
//!
//! ## Core Systems
//!
//! - **[`css`]**: selector tokenizer and parser, specificity, stylesheets, cascade, property binding
//! - **[`view`]**: slotmap-backed view tree with identifier, class and selector queries
//! - **[`layout`]**: constraints, size negotiation, default and stack layout, panels
//! - **[`window`]**: per-frame passes, rendering seam and crossterm input routing
//! - **[`testing`]**: headless pilot and frame snapshots
//! - **[`geometry`]**, **[`color`]**: Point, Size, Rect, Spacing and Color primitives

// Foundation
pub mod color;
pub mod geometry;

// Core systems
pub mod css;
pub mod layout;
pub mod view;

// Application
pub mod window;

// Testing
pub mod testing;
