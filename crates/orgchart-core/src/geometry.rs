//! Geometric primitives for chart layout and positioning.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in chart space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - The rectangle a card covers, for overlap checks
//! - [`Insets`] - Padding/margin values for four sides
//!
//! # Coordinate System
//!
//! Chart space follows SVG conventions:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! The root card is anchored at `x = 0` and depth grows downward along `+Y`.
//! A node position is the top-center anchor of its card.

use serde::Deserialize;

/// A 2D point in chart coordinate space.
///
/// # Examples
///
/// ```
/// # use orgchart_core::geometry::Point;
/// let parent = Point::new(0.0, 0.0);
/// let child = Point::new(-123.5, 120.0);
///
/// let halfway = parent.lerp(child, 0.5);
/// assert_eq!(halfway.x(), -61.75);
/// assert_eq!(halfway.y(), 60.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Linear interpolation toward `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Point, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Creates the bounds of a card whose top-center anchor is `anchor`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orgchart_core::geometry::{Bounds, Point, Size};
    /// let card = Bounds::new_from_top_center(Point::new(0.0, 120.0), Size::new(235.0, 147.0));
    /// assert_eq!(card.min_x(), -117.5);
    /// assert_eq!(card.min_y(), 120.0);
    /// assert_eq!(card.max_y(), 267.0);
    /// ```
    pub fn new_from_top_center(anchor: Point, size: Size) -> Self {
        Self::new_from_top_left(anchor.with_x(anchor.x - size.width / 2.0), size)
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns `true` if the interiors of the two bounds overlap.
    ///
    /// Bounds that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

}

/// Represents spacing around an element (padding, margin, etc.)
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_lerp_endpoints() {
        let start = Point::new(10.0, 20.0);
        let end = Point::new(30.0, -40.0);

        assert_eq!(start.lerp(end, 0.0), start);
        assert_eq!(start.lerp(end, 1.0), end);
    }

    #[test]
    fn test_point_lerp_clamps() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(100.0, 100.0);

        assert_eq!(start.lerp(end, 2.0), end);
        assert_eq!(start.lerp(end, -1.0), start);
    }

    #[test]
    fn test_bounds_top_center() {
        let bounds = Bounds::new_from_top_center(Point::new(10.0, 0.0), Size::new(20.0, 5.0));
        assert_approx_eq!(f32, bounds.min_x(), 0.0);
        assert_approx_eq!(f32, bounds.max_x(), 20.0);
        assert_approx_eq!(f32, bounds.height(), 5.0);
    }

    #[test]
    fn test_bounds_intersects() {
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let b = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
        let touching = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(10.0, 10.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&touching));
    }

    #[test]
    fn test_insets_sums() {
        let insets = Insets::new(20.0, 10.0, 5.0, 15.0);
        assert_approx_eq!(f32, insets.horizontal_sum(), 25.0);
        assert_approx_eq!(f32, insets.vertical_sum(), 25.0);
    }
}
