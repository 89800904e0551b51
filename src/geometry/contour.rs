// SPDX-License-Identifier: AGPL-3.0-or-later

//! Closed rings of points.

use itertools::Itertools;

use crate::geometry::point::Point;
use crate::geometry::rect::Rect;

/// A ring of points.
///
/// The ring is implicitly closed: the last point connects back to the first,
/// without the first point being repeated. Orientation is not prescribed,
/// [`Contour::signed_area`] reports it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contour {
    /// The vertices of the ring.
    pub points: Vec<Point>,
}

impl Contour {
    /// Create a ring from its vertices.
    pub fn new(points: Vec<Point>) -> Self {
        Contour { points }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the ring has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Twice the enclosed area is summed with the shoelace formula; half of it
    /// is returned. Positive for counterclockwise rings.
    pub fn signed_area(&self) -> f64 {
        let doubled: f64 = self
            .points
            .iter()
            .circular_tuple_windows()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum();
        doubled / 2.0
    }

    /// Check if a point lies inside the ring, by ray crossing parity.
    ///
    /// Points exactly on the boundary may report either side.
    pub fn contains_point(&self, p: Point) -> bool {
        let mut inside = false;
        for (a, b) in self.points.iter().circular_tuple_windows() {
            if (a.y > p.y) != (b.y > p.y) {
                let t = (p.y - a.y) / (b.y - a.y);
                let crossing_x = a.x + t * (b.x - a.x);
                if p.x < crossing_x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Smallest axis-aligned rectangle containing all vertices, or `None` for
    /// an empty ring.
    pub fn bounding_box(&self) -> Option<Rect> {
        Rect::from_points(self.points.iter().copied())
    }

    /// The ring shifted by the given displacement.
    pub fn translated(&self, dx: f64, dy: f64) -> Contour {
        Contour::new(
            self.points
                .iter()
                .map(|p| Point::new(p.x + dx, p.y + dy))
                .collect(),
        )
    }
}

impl From<Vec<(f64, f64)>> for Contour {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Contour::new(points.into_iter().map(Point::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_area_of_unit_square() {
        let ccw = Contour::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert_eq!(ccw.signed_area(), 1.0);

        let cw = Contour::from(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        assert_eq!(cw.signed_area(), -1.0);
    }

    #[test]
    fn contains_point_in_square() {
        let square = Contour::from(vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        assert!(square.contains_point(Point::new(1.0, 1.0)));
        assert!(!square.contains_point(Point::new(3.0, 1.0)));
        assert!(!square.contains_point(Point::new(-0.5, 0.5)));
    }

    #[test]
    fn contains_point_in_triangle() {
        let triangle = Contour::from(vec![(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)]);
        assert!(triangle.contains_point(Point::new(1.0, 1.0)));
        assert!(!triangle.contains_point(Point::new(3.0, 3.0)));
    }

    #[test]
    fn bounding_box_spans_all_points() {
        let ring = Contour::from(vec![(1.0, 5.0), (3.0, -1.0), (-2.0, 2.0)]);
        let bbox = ring.bounding_box().unwrap();
        assert_eq!(bbox.min, Point::new(-2.0, -1.0));
        assert_eq!(bbox.max, Point::new(3.0, 5.0));

        assert!(Contour::default().bounding_box().is_none());
    }

    #[test]
    fn translate_shifts_every_vertex() {
        let ring = Contour::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let moved = ring.translated(2.0, -1.0);
        assert_eq!(
            moved,
            Contour::from(vec![(2.0, -1.0), (3.0, -1.0), (3.0, 0.0)])
        );
    }
}
