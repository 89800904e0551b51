// SPDX-License-Identifier: AGPL-3.0-or-later

//! Points in the two-dimensional plane.

use std::cmp::Ordering;

/// A location in the plane, in `f64` coordinates.
///
/// Derived equality is exact (bit-for-bit); geometric comparisons with a
/// tolerance go through [`Point::almost_eq`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Tolerance-based equality.
    ///
    /// Two points are equal when they are identical, or when each per-axis
    /// difference is below `tolerance` relative to the larger coordinate
    /// magnitude, floored at one. The floor makes the comparison absolute
    /// near the origin, so coordinates of opposite sign cannot blow up the
    /// relative term.
    pub fn almost_eq(&self, other: Point, tolerance: f64) -> bool {
        if self == &other {
            return true;
        }
        let scale_x = self.x.abs().max(other.x.abs()).max(1.0);
        let scale_y = self.y.abs().max(other.y.abs()).max(1.0);
        (self.x - other.x).abs() <= tolerance * scale_x
            && (self.y - other.y).abs() <= tolerance * scale_y
    }

    /// Total order by x-coordinate, then y-coordinate.
    ///
    /// This is the order in which the sweep passes over points.
    pub fn lex_cmp(&self, other: &Point) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}
