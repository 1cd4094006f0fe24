use serde::{Deserialize, Serialize};

use crate::geometry::placement::{Axis, Length, Side};

pub use kurbo::Point;

/// A 2D point in the engine's shared coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Coords {
    /// Create a coordinate pair.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Read the component on `axis`.
    pub fn get(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Overwrite the component on `axis`.
    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }
}

impl From<Point> for Coords {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Coords> for Point {
    fn from(c: Coords) -> Self {
        Point::new(c.x, c.y)
    }
}

/// Measured size of an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl Dimensions {
    /// Create a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Read the extent along `length`.
    pub fn get(self, length: Length) -> f64 {
        match length {
            Length::Width => self.width,
            Length::Height => self.height,
        }
    }
}

/// Axis-aligned rectangle with an origin and a non-negative size.
///
/// A zero width or height is valid and denotes an element that has not been laid out yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from origin and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-origin rectangle with the given size.
    pub const fn from_dimensions(d: Dimensions) -> Self {
        Self::new(0.0, 0.0, d.width, d.height)
    }

    /// Origin component on `axis`.
    pub fn origin(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Extent along `length`.
    pub fn length(self, length: Length) -> f64 {
        self.dimensions().get(length)
    }

    /// Size of the rectangle.
    pub fn dimensions(self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Right edge.
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Translate by `(dx, dy)`.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Overlap of two rectangles; disjoint inputs yield a zero-sized rectangle.
    pub fn intersect(self, other: Rect) -> Rect {
        self.to_kurbo().intersect(other.to_kurbo()).into()
    }

    /// Smallest rectangle enclosing both inputs.
    pub fn union(self, other: Rect) -> Rect {
        self.to_kurbo().union(other.to_kurbo()).into()
    }

    /// Bounding box of a set of rectangles, `None` when empty.
    pub fn bounding(rects: &[Rect]) -> Option<Rect> {
        let (first, rest) = rects.split_first()?;
        Some(rest.iter().fold(*first, |acc, r| acc.union(*r)))
    }

    /// Convert to a kurbo rectangle (`x0, y0, x1, y1` form).
    pub fn to_kurbo(self) -> kurbo::Rect {
        kurbo::Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

impl From<kurbo::Rect> for Rect {
    fn from(r: kurbo::Rect) -> Self {
        Self::new(r.x0, r.y0, r.width(), r.height())
    }
}

/// Reference and floating rectangles in one coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementRects {
    /// Rectangle of the anchor element.
    pub reference: Rect,
    /// Rectangle of the positioned element (origin usually zero).
    pub floating: Rect,
}

/// Edge-form rectangle, as reported by DOM `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientRect {
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Left edge.
    pub left: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl From<Rect> for ClientRect {
    fn from(r: Rect) -> Self {
        Self {
            top: r.y,
            right: r.right(),
            bottom: r.bottom(),
            left: r.x,
            width: r.width,
            height: r.height,
        }
    }
}

impl From<ClientRect> for Rect {
    fn from(c: ClientRect) -> Self {
        Rect::new(c.left, c.top, c.width, c.height)
    }
}

/// One value per side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideObject {
    /// Top side.
    pub top: f64,
    /// Right side.
    pub right: f64,
    /// Bottom side.
    pub bottom: f64,
    /// Left side.
    pub left: f64,
}

impl SideObject {
    /// Same value on every side.
    pub const fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// Read the value for `side`.
    pub fn get(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    /// Apply `f` to every side.
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
            left: f(self.left),
        }
    }

    /// Return `true` when any side is `>= 0`.
    pub fn any_non_negative(&self) -> bool {
        Side::ALL.iter().any(|s| self.get(*s) >= 0.0)
    }
}

/// Inset applied to a clipping boundary: a uniform value or per-side values.
///
/// Deserializes from either `8` or `{"top": 4, "left": 2}` (missing sides are zero).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Padding {
    /// Same inset on every side.
    Uniform(f64),
    /// Per-side insets.
    Sides(SideObject),
}

impl Padding {
    /// Normalize to the per-side form.
    pub fn to_sides(self) -> SideObject {
        match self {
            Padding::Uniform(v) => SideObject::uniform(v),
            Padding::Sides(s) => s,
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Padding::Uniform(0.0)
    }
}

impl From<f64> for Padding {
    fn from(v: f64) -> Self {
        Padding::Uniform(v)
    }
}

impl From<SideObject> for Padding {
    fn from(s: SideObject) -> Self {
        Padding::Sides(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
