// SPDX-License-Identifier: AGPL-3.0-or-later

//! Geometry types operated on by this crate.
//!
//! All types use `f64` coordinates. A [`Geometry`] bundles them into one
//! tagged value, so code handling mixed geometries must match on it
//! exhaustively and the compiler flags any unhandled variant.

mod contour;
mod point;
mod rect;
mod segment;

use std::fmt;

pub use contour::Contour;
pub use point::Point;
pub use rect::Rect;
pub use segment::{Segment, SegmentIntersection, Side};

/// A set of points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPoint {
    /// The member points.
    pub points: Vec<Point>,
}

impl MultiPoint {
    /// Create a point set from its members.
    pub fn new(points: Vec<Point>) -> Self {
        MultiPoint { points }
    }
}

/// An open path through a sequence of points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString {
    /// The path vertices, in order.
    pub points: Vec<Point>,
}

impl LineString {
    /// Create a path from its vertices.
    pub fn new(points: Vec<Point>) -> Self {
        LineString { points }
    }
}

impl From<Vec<(f64, f64)>> for LineString {
    fn from(points: Vec<(f64, f64)>) -> Self {
        LineString::new(points.into_iter().map(Point::from).collect())
    }
}

/// A collection of open paths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiLineString {
    /// The member paths.
    pub line_strings: Vec<LineString>,
}

impl MultiLineString {
    /// Create a path collection from its members.
    pub fn new(line_strings: Vec<LineString>) -> Self {
        MultiLineString { line_strings }
    }
}

/// A polygon, represented by a flat list of rings.
///
/// Holes are not nested below their outer ring. Membership follows the
/// even-odd rule over all rings together: a ring inside another ring cuts a
/// hole, a ring inside a hole fills again.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    /// The rings of the polygon.
    pub rings: Vec<Contour>,
}

impl Polygon {
    /// Create a polygon from its rings.
    pub fn new(rings: Vec<Contour>) -> Self {
        Polygon { rings }
    }

    /// Check if no ring carries any vertex.
    pub fn is_empty(&self) -> bool {
        self.rings.iter().all(|ring| ring.is_empty())
    }

    /// Check if a point lies inside the polygon under the even-odd rule.
    ///
    /// Points exactly on a ring boundary may report either side.
    pub fn contains_point(&self, p: Point) -> bool {
        self.rings
            .iter()
            .fold(false, |inside, ring| inside ^ ring.contains_point(p))
    }

    /// Smallest axis-aligned rectangle containing all vertices of all rings,
    /// or `None` when there are none.
    pub fn bounding_box(&self) -> Option<Rect> {
        Rect::from_points(self.rings.iter().flat_map(|ring| ring.points.iter().copied()))
    }

    /// The polygon shifted by the given displacement.
    pub fn translated(&self, dx: f64, dy: f64) -> Polygon {
        Polygon::new(self.rings.iter().map(|ring| ring.translated(dx, dy)).collect())
    }
}

impl From<Vec<(f64, f64)>> for Polygon {
    fn from(ring: Vec<(f64, f64)>) -> Self {
        Polygon::new(vec![Contour::from(ring)])
    }
}

/// A collection of polygons.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon {
    /// The member polygons.
    pub polygons: Vec<Polygon>,
}

impl MultiPolygon {
    /// Create a polygon collection from its members.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        MultiPolygon { polygons }
    }
}

/// Any geometry this crate can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single point.
    Point(Point),
    /// A set of points.
    MultiPoint(MultiPoint),
    /// An open path.
    LineString(LineString),
    /// A collection of open paths.
    MultiLineString(MultiLineString),
    /// A polygon.
    Polygon(Polygon),
    /// A collection of polygons.
    MultiPolygon(MultiPolygon),
}

impl Geometry {
    /// The kind tag of this geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }
}

/// The kind of a [`Geometry`], without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    /// A single point.
    Point,
    /// A set of points.
    MultiPoint,
    /// An open path.
    LineString,
    /// A collection of open paths.
    MultiLineString,
    /// A polygon.
    Polygon,
    /// A collection of polygons.
    MultiPolygon,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
        };
        f.write_str(name)
    }
}

impl From<Point> for Geometry {
    fn from(g: Point) -> Self {
        Geometry::Point(g)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(g: MultiPoint) -> Self {
        Geometry::MultiPoint(g)
    }
}

impl From<LineString> for Geometry {
    fn from(g: LineString) -> Self {
        Geometry::LineString(g)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(g: MultiLineString) -> Self {
        Geometry::MultiLineString(g)
    }
}

impl From<Polygon> for Geometry {
    fn from(g: Polygon) -> Self {
        Geometry::Polygon(g)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(g: MultiPolygon) -> Self {
        Geometry::MultiPolygon(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_with_hole_membership() {
        // Outer 4x4 square with an inner 2x2 ring cutting a hole.
        let polygon = Polygon::new(vec![
            Contour::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
            Contour::from(vec![(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]),
        ]);
        assert!(polygon.contains_point(Point::new(0.5, 0.5)));
        assert!(!polygon.contains_point(Point::new(2.0, 2.0)));
        assert!(!polygon.contains_point(Point::new(5.0, 2.0)));
    }

    #[test]
    fn empty_polygon_checks() {
        assert!(Polygon::default().is_empty());
        assert!(Polygon::new(vec![Contour::default()]).is_empty());
        assert!(!Polygon::from(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]).is_empty());
    }

    #[test]
    fn geometry_kind_names() {
        let g: Geometry = Polygon::from(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]).into();
        assert_eq!(g.kind(), GeometryKind::Polygon);
        assert_eq!(GeometryKind::MultiLineString.to_string(), "MultiLineString");
    }
}
