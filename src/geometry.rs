//! Core geometry types: Point, Size, Rect, Spacing.
//!
//! Frames are expressed in surface units as `f32` so that distribution
//! strategies like fill-equally can split space without integer truncation.
//! Every frame is relative to its superview.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D position or displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    /// The largest representable size, used as the default maximum bound.
    pub const MAX: Size = Size { width: f32::MAX, height: f32::MAX };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp each dimension into `[min, max]`.
    ///
    /// `max` wins when the bounds are inverted.
    #[inline]
    pub fn clamp(self, min: Size, max: Size) -> Size {
        Size {
            width: self.width.max(min.width).min(max.width),
            height: self.height.max(min.height).min(max.height),
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Size) -> Size {
        Size {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

impl Add for Size {
    type Output = Size;
    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size { width: self.width + rhs.width, height: self.height + rhs.height }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// A rectangle defined by its origin and size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// An empty rect at the origin.
    pub const EMPTY: Rect = Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    /// Create a new rect.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    /// The top-left corner.
    #[inline]
    pub const fn origin(self) -> Point {
        Point { x: self.x, y: self.y }
    }

    /// The dimensions.
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Whether the point lies inside this rect (right and bottom edges excluded).
    #[inline]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Translate the rect by `offset`.
    #[inline]
    pub fn translate(self, offset: Point) -> Rect {
        Rect { x: self.x + offset.x, y: self.y + offset.y, ..self }
    }

    /// The overlap of two rects. Disjoint rects give a zero-sized rect at the
    /// nearer corner of the overlap.
    #[inline]
    pub fn intersection(self, other: Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Rect {
            x,
            y,
            width: (self.right().min(other.right()) - x).max(0.0),
            height: (self.bottom().min(other.bottom()) - y).max(0.0),
        }
    }

    /// Contract the rect inward by the given [`Spacing`].
    ///
    /// Width and height are clamped to zero to avoid negative dimensions.
    #[inline]
    pub fn shrink(self, spacing: Spacing) -> Rect {
        Rect {
            x: self.x + spacing.left,
            y: self.y + spacing.top,
            width: (self.width - spacing.width()).max(0.0),
            height: (self.height - spacing.height()).max(0.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// Spacing around the four sides of a rectangle, used for padding.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Spacing {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Spacing {
    /// Zero spacing on all sides.
    pub const ZERO: Spacing = Spacing { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };

    /// Create spacing with explicit values for each side.
    #[inline]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// All four sides set to the same value.
    #[inline]
    pub const fn all(value: f32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// Symmetric spacing: `vertical` for top/bottom, `horizontal` for left/right.
    #[inline]
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }

    /// Total horizontal extent: `left + right`.
    #[inline]
    pub fn width(self) -> f32 {
        self.left + self.right
    }

    /// Total vertical extent: `top + bottom`.
    #[inline]
    pub fn height(self) -> f32 {
        self.top + self.bottom
    }

    /// The combined extent as a [`Size`].
    #[inline]
    pub fn size(self) -> Size {
        Size { width: self.width(), height: self.height() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_clamp() {
        let min = Size::new(10.0, 10.0);
        let max = Size::new(100.0, 50.0);
        assert_eq!(Size::new(5.0, 70.0).clamp(min, max), Size::new(10.0, 50.0));
        assert_eq!(Size::new(40.0, 20.0).clamp(min, max), Size::new(40.0, 20.0));
    }

    #[test]
    fn size_clamp_inverted_bounds_prefers_max() {
        let clamped = Size::new(5.0, 5.0).clamp(Size::new(20.0, 20.0), Size::new(10.0, 10.0));
        assert_eq!(clamped, Size::new(10.0, 10.0));
    }

    #[test]
    fn rect_edges_and_contains() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert!(r.contains(Point::new(10.0, 20.0)));
        assert!(r.contains(Point::new(39.5, 59.5)));
        assert!(!r.contains(Point::new(40.0, 30.0)));
        assert!(!r.contains(Point::new(9.9, 30.0)));
    }

    #[test]
    fn rect_shrink_clamps_to_zero() {
        let r = Rect::new(0.0, 0.0, 10.0, 4.0);
        let shrunk = r.shrink(Spacing::all(3.0));
        assert_eq!(shrunk, Rect::new(3.0, 3.0, 4.0, 0.0));
    }

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0.0, 0.0, 50.0, 40.0);
        let b = Rect::new(30.0, 10.0, 50.0, 50.0);
        assert_eq!(a.intersection(b), Rect::new(30.0, 10.0, 20.0, 30.0));
        assert_eq!(b.intersection(a), a.intersection(b));

        let far = Rect::new(100.0, 100.0, 5.0, 5.0);
        assert_eq!(a.intersection(far).size(), Size::ZERO);
    }

    #[test]
    fn rect_translate() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0).translate(Point::new(10.0, 20.0));
        assert_eq!(r, Rect::new(11.0, 22.0, 3.0, 4.0));
    }

    #[test]
    fn spacing_extents() {
        let s = Spacing::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(s.width(), 6.0);
        assert_eq!(s.height(), 4.0);
        assert_eq!(s.size(), Size::new(6.0, 4.0));
        assert_eq!(Spacing::symmetric(2.0, 5.0), Spacing::new(2.0, 5.0, 2.0, 5.0));
    }

    #[test]
    fn point_arithmetic() {
        let p = Point::new(3.0, 4.0) + Point::new(1.0, 1.0);
        assert_eq!(p, Point::new(4.0, 5.0));
        assert_eq!(p - Point::new(4.0, 5.0), Point::ZERO);
    }
}
