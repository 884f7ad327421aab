//! Property binding: computed style values → typed view fields.
//!
//! Each property writes one or more fields of a [`View`]. Properties that
//! change geometry report it so the caller can mark the view for layout.

use crate::color::Color;
use crate::css::model::{Style, Value};
use crate::geometry::Spacing;
use crate::view::{Alignment, Autoresizing, Axis, Distribution, View, ViewId, ViewKind, ViewTree};

/// Errors from property binding.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
    #[error("unknown property: {0}")]
    UnknownProperty(String),
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },
    #[error("{property} does not apply to {type_name}")]
    NotApplicable { property: String, type_name: String },
}

fn invalid(property: &str, message: impl Into<String>) -> PropertyError {
    PropertyError::InvalidValue { property: property.into(), message: message.into() }
}

/// Extract exactly one value.
fn require_single<'a>(values: &'a [Value], property: &str) -> Result<&'a Value, PropertyError> {
    match values {
        [value] => Ok(value),
        _ => Err(invalid(property, format!("expected 1 value, got {}", values.len()))),
    }
}

/// Extract a single identifier.
fn require_single_ident<'a>(values: &'a [Value], property: &str) -> Result<&'a str, PropertyError> {
    match require_single(values, property)? {
        Value::Ident(name) => Ok(name.as_str()),
        other => Err(invalid(property, format!("expected identifier, got: {other}"))),
    }
}

/// Extract a single number.
fn require_number(values: &[Value], property: &str) -> Result<f32, PropertyError> {
    match require_single(values, property)? {
        Value::Number(n) => Ok(*n),
        other => Err(invalid(property, format!("expected number, got: {other}"))),
    }
}

/// Extract a single non-negative number.
fn require_length(values: &[Value], property: &str) -> Result<f32, PropertyError> {
    let n = require_number(values, property)?;
    if n < 0.0 {
        return Err(invalid(property, format!("expected non-negative number, got: {n}")));
    }
    Ok(n)
}

/// A maximum: a non-negative number or `none` for unbounded.
fn require_max(values: &[Value], property: &str) -> Result<f32, PropertyError> {
    match require_single(values, property)? {
        Value::Ident(name) if name == "none" => Ok(f32::MAX),
        _ => require_length(values, property),
    }
}

/// Extract a color: hex or a color name.
fn require_color(values: &[Value], property: &str) -> Result<Color, PropertyError> {
    let color = match require_single(values, property)? {
        Value::Color(hex) => Color::from_hex(hex),
        Value::Ident(name) => Color::named(name),
        _ => None,
    };
    color.ok_or_else(|| invalid(property, format!("expected color, got: {}", values[0])))
}

fn require_bool(values: &[Value], property: &str) -> Result<bool, PropertyError> {
    match require_single(values, property)? {
        Value::Ident(name) if name == "true" => Ok(true),
        Value::Ident(name) if name == "false" => Ok(false),
        Value::Number(n) => Ok(*n != 0.0),
        other => Err(invalid(property, format!("expected true|false, got: {other}"))),
    }
}

/// Parse 1-4 lengths into a [`Spacing`] (CSS shorthand).
///
/// - 1 value: all sides
/// - 2 values: vertical, horizontal
/// - 3 values: top, horizontal, bottom
/// - 4 values: top, right, bottom, left
pub fn parse_spacing(values: &[Value], property: &str) -> Result<Spacing, PropertyError> {
    let numbers = values
        .iter()
        .map(|v| match v {
            Value::Number(n) if *n >= 0.0 => Ok(*n),
            other => Err(invalid(property, format!("expected non-negative number, got: {other}"))),
        })
        .collect::<Result<Vec<f32>, _>>()?;

    match numbers[..] {
        [all] => Ok(Spacing::all(all)),
        [vertical, horizontal] => Ok(Spacing::symmetric(vertical, horizontal)),
        [top, horizontal, bottom] => Ok(Spacing::new(top, horizontal, bottom, horizontal)),
        [top, right, bottom, left] => Ok(Spacing::new(top, right, bottom, left)),
        _ => Err(invalid(property, format!("expected 1-4 values, got {}", numbers.len()))),
    }
}

/// Parse space-separated autoresizing keywords.
pub fn parse_autoresizing(values: &[Value], property: &str) -> Result<Autoresizing, PropertyError> {
    let mut mask = Autoresizing::empty();
    for value in values {
        mask |= match value.as_ident() {
            Some("width") => Autoresizing::WIDTH,
            Some("height") => Autoresizing::HEIGHT,
            Some("fill") => Autoresizing::FILL,
            Some("contain") => Autoresizing::CONTAIN,
            Some("none") => Autoresizing::empty(),
            _ => {
                return Err(invalid(
                    property,
                    format!("expected width|height|fill|contain|none, got: {value}"),
                ))
            }
        };
    }
    Ok(mask)
}

/// Write `value` into `slot`, reporting whether it changed.
fn set<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Apply one declaration to a view.
///
/// Returns `true` when the view's geometry changed.
pub fn apply_declaration(view: &mut View, property: &str, values: &[Value]) -> Result<bool, PropertyError> {
    let changed = match property {
        // Placement
        "alignment" => {
            let name = require_single_ident(values, property)?;
            let alignment = name.parse::<Alignment>().map_err(|message| invalid(property, message))?;
            set(&mut view.alignment, alignment)
        }
        "autoresizing" => {
            let mask = parse_autoresizing(values, property)?;
            set(&mut view.autoresizing, mask)
        }
        "hidden" => {
            let hidden = require_bool(values, property)?;
            set(&mut view.hidden, hidden)
        }

        // Appearance
        "background-color" => {
            view.background_color = require_color(values, property)?;
            false
        }
        "border-color" => {
            view.border_color = require_color(values, property)?;
            false
        }
        "border-width" => {
            view.border_width = require_length(values, property)?;
            false
        }

        // Frame
        "left" => {
            let x = require_number(values, property)?;
            set(&mut view.frame.x, x)
        }
        "top" => {
            let y = require_number(values, property)?;
            set(&mut view.frame.y, y)
        }
        "width" => {
            let width = require_length(values, property)?;
            set(&mut view.frame.width, width)
        }
        "height" => {
            let height = require_length(values, property)?;
            set(&mut view.frame.height, height)
        }
        "min-width" => {
            let n = require_length(values, property)?;
            set(&mut view.min_size.width, n)
        }
        "min-height" => {
            let n = require_length(values, property)?;
            set(&mut view.min_size.height, n)
        }
        "max-width" => {
            let n = require_max(values, property)?;
            set(&mut view.max_size.width, n)
        }
        "max-height" => {
            let n = require_max(values, property)?;
            set(&mut view.max_size.height, n)
        }

        // Padding
        "padding" => {
            let padding = parse_spacing(values, property)?;
            set(&mut view.padding, padding)
        }
        "padding-top" => {
            let n = require_length(values, property)?;
            set(&mut view.padding.top, n)
        }
        "padding-right" => {
            let n = require_length(values, property)?;
            set(&mut view.padding.right, n)
        }
        "padding-bottom" => {
            let n = require_length(values, property)?;
            set(&mut view.padding.bottom, n)
        }
        "padding-left" => {
            let n = require_length(values, property)?;
            set(&mut view.padding.left, n)
        }

        // Stack
        "axis" | "distribution" | "spacing" => {
            let type_name = view.type_name.clone();
            let ViewKind::Stack(params) = &mut view.kind else {
                return Err(PropertyError::NotApplicable { property: property.into(), type_name });
            };
            match property {
                "axis" => {
                    let axis = match require_single_ident(values, property)? {
                        "vertical" => Axis::Vertical,
                        "horizontal" => Axis::Horizontal,
                        other => {
                            return Err(invalid(property, format!("expected vertical|horizontal, got: {other}")))
                        }
                    };
                    set(&mut params.axis, axis)
                }
                "distribution" => {
                    let distribution = match require_single_ident(values, property)? {
                        "default" => Distribution::Default,
                        "fill" => Distribution::Fill,
                        "fill-equally" => Distribution::FillEqually,
                        other => {
                            return Err(invalid(
                                property,
                                format!("expected default|fill|fill-equally, got: {other}"),
                            ))
                        }
                    };
                    set(&mut params.distribution, distribution)
                }
                _ => {
                    let spacing = require_length(values, property)?;
                    set(&mut params.spacing, spacing)
                }
            }
        }

        _ => return Err(PropertyError::UnknownProperty(property.into())),
    };
    Ok(changed)
}

/// Bind every property of `style` to the view `id`.
///
/// Invalid properties are logged and skipped. A geometric change marks the
/// view and its superview for layout.
pub fn apply_style(tree: &mut ViewTree, id: ViewId, style: &Style) {
    let Some(view) = tree.get_mut(id) else {
        return;
    };

    let mut geometry_changed = false;
    for (property, values) in style.iter() {
        match apply_declaration(view, property, values) {
            Ok(changed) => geometry_changed |= changed,
            Err(err) => log::warn!("{} {id:?}: {err}", view.type_name),
        }
    }

    if geometry_changed {
        view.needs_layout = true;
        if let Some(parent) = tree.parent(id) {
            tree.set_needs_layout(parent);
        }
    }
}
