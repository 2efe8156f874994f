//! Inclusive integer rectangles in lattice coordinates.

use std::fmt;

/// An axis-aligned rectangle of lattice sites, bounds inclusive.
///
/// `Rect { x_min: 0, x_max: 0, y_min: 0, y_max: 0 }` is the single site
/// at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Smallest x coordinate.
    pub x_min: i64,
    /// Largest x coordinate.
    pub x_max: i64,
    /// Smallest y coordinate.
    pub y_min: i64,
    /// Largest y coordinate.
    pub y_max: i64,
}

impl Rect {
    /// Build a rectangle from its four bounds.
    pub fn new(x_min: i64, x_max: i64, y_min: i64, y_max: i64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// The degenerate rectangle holding only `(x, y)`.
    pub fn point(x: i64, y: i64) -> Self {
        Self::new(x, x, y, y)
    }

    /// The square of radius `radius` centered at `(cx, cy)`.
    pub fn centered(cx: i64, cy: i64, radius: i64) -> Self {
        Self::new(cx - radius, cx + radius, cy - radius, cy + radius)
    }

    /// Whether `(x, y)` lies inside the rectangle.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.x_min <= x && x <= self.x_max && self.y_min <= y && y <= self.y_max
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.x_min <= other.x_min
            && other.x_max <= self.x_max
            && self.y_min <= other.y_min
            && other.y_max <= self.y_max
    }

    /// Grow the rectangle so that it contains `(x, y)`.
    pub fn expand_to(&mut self, x: i64, y: i64) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }

    /// Number of columns.
    pub fn width(&self) -> i64 {
        self.x_max - self.x_min + 1
    }

    /// Number of rows.
    pub fn height(&self) -> i64 {
        self.y_max - self.y_min + 1
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{}]x[{},{}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}
