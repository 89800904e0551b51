// SPDX-License-Identifier: AGPL-3.0-or-later

//! Axis-aligned bounding rectangles.

use crate::geometry::point::Point;

/// An axis-aligned rectangle, described by its lower-left and upper-right
/// corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Corner with the smallest coordinates.
    pub min: Point,
    /// Corner with the largest coordinates.
    pub max: Point,
}

impl Rect {
    /// Create a rectangle from its corners.
    pub fn new(min: Point, max: Point) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y);
        Rect { min, max }
    }

    /// The smallest rectangle containing all points of the iterator, or
    /// `None` when the iterator is empty.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut rect = Rect::new(first, first);
        for p in points {
            rect.min.x = rect.min.x.min(p.x);
            rect.min.y = rect.min.y.min(p.y);
            rect.max.x = rect.max.x.max(p.x);
            rect.max.y = rect.max.y.max(p.y);
        }
        Some(rect)
    }

    /// Check if two rectangles share at least one point. Touching counts.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}
