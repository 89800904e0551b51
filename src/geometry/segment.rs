// SPDX-License-Identifier: AGPL-3.0-or-later

//! Line segments and segment intersection.

use crate::geometry::point::Point;

/// Location of a point relative to a directed segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left of the segment, looking from start to end.
    Left,
    /// Right of the segment, looking from start to end.
    Right,
    /// On the carrier line of the segment.
    Center,
}

/// Result of intersecting two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    /// The segments do not meet.
    None,
    /// The segments meet in a single point.
    Point(Point),
    /// The segments are collinear and share more than a point.
    Overlap(Segment),
}

/// A directed straight-line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// First endpoint.
    pub start: Point,
    /// Second endpoint.
    pub end: Point,
}

/// Twice the signed area of the triangle (a, b, c).
/// Positive when `c` lies left of the directed line from `a` to `b`.
fn signed_area(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

impl Segment {
    /// Create a new segment.
    pub fn new(start: Point, end: Point) -> Self {
        Segment { start, end }
    }

    /// Check if both endpoints coincide under the given tolerance.
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        self.start.almost_eq(self.end, tolerance)
    }

    /// The segment with start and end swapped.
    pub fn reversed(&self) -> Segment {
        Segment::new(self.end, self.start)
    }

    /// Find the side of the segment on which the point lies.
    ///
    /// The test is exact: only points exactly on the carrier line report
    /// [`Side::Center`].
    pub fn side_of(&self, point: Point) -> Side {
        let area = signed_area(self.start, self.end, point);
        if area > 0.0 {
            Side::Left
        } else if area < 0.0 {
            Side::Right
        } else {
            Side::Center
        }
    }

    /// Check if both endpoints of `other` lie on the carrier line of `self`.
    pub fn is_collinear(&self, other: &Segment) -> bool {
        self.side_of(other.start) == Side::Center && self.side_of(other.end) == Side::Center
    }

    /// Compute the intersection of two segments.
    ///
    /// Near-parallel segments (sine of the enclosed angle below the square
    /// root of `tolerance`) are treated as parallel. A computed intersection
    /// point within `tolerance` of one of the four endpoints is snapped onto
    /// that endpoint, so segments meeting near a vertex meet exactly there.
    /// Degenerate segments never intersect anything.
    pub fn intersection(&self, other: &Segment, tolerance: f64) -> SegmentIntersection {
        if self.is_degenerate(tolerance) || other.is_degenerate(tolerance) {
            return SegmentIntersection::None;
        }

        let p0 = self.start;
        let d0 = Point::new(self.end.x - p0.x, self.end.y - p0.y);
        let p1 = other.start;
        let d1 = Point::new(other.end.x - p1.x, other.end.y - p1.y);

        let e = Point::new(p1.x - p0.x, p1.y - p0.y);
        let kross = d0.x * d1.y - d0.y * d1.x;
        let sqr_len0 = d0.x * d0.x + d0.y * d0.y;
        let sqr_len1 = d1.x * d1.x + d1.y * d1.y;

        if kross * kross > tolerance * sqr_len0 * sqr_len1 {
            // The carrier lines cross. Check that the crossing lies on both segments.
            let s = (e.x * d1.y - e.y * d1.x) / kross;
            if !(0.0..=1.0).contains(&s) {
                return SegmentIntersection::None;
            }
            let t = (e.x * d0.y - e.y * d0.x) / kross;
            if !(0.0..=1.0).contains(&t) {
                return SegmentIntersection::None;
            }
            let p = Point::new(p0.x + s * d0.x, p0.y + s * d0.y);
            return SegmentIntersection::Point(self.snap_to_endpoint(p, other, tolerance));
        }

        // The segments are parallel. Check whether they share the carrier line.
        let sqr_len_e = e.x * e.x + e.y * e.y;
        let kross = e.x * d0.y - e.y * d0.x;
        if kross * kross > tolerance * sqr_len0 * sqr_len_e {
            return SegmentIntersection::None;
        }

        // Same carrier line. Project `other` onto `self` and intersect the
        // parameter intervals.
        let s0 = (d0.x * e.x + d0.y * e.y) / sqr_len0;
        let s1 = s0 + (d0.x * d1.x + d0.y * d1.y) / sqr_len0;
        let (s_min, s_max) = if s0 < s1 { (s0, s1) } else { (s1, s0) };

        match interval_overlap(0.0, 1.0, s_min, s_max) {
            None => SegmentIntersection::None,
            Some((w0, None)) => {
                let p = Point::new(p0.x + w0 * d0.x, p0.y + w0 * d0.y);
                SegmentIntersection::Point(self.snap_to_endpoint(p, other, tolerance))
            }
            Some((w0, Some(w1))) => {
                let a = Point::new(p0.x + w0 * d0.x, p0.y + w0 * d0.y);
                let b = Point::new(p0.x + w1 * d0.x, p0.y + w1 * d0.y);
                let a = self.snap_to_endpoint(a, other, tolerance);
                let b = self.snap_to_endpoint(b, other, tolerance);
                if a.almost_eq(b, tolerance) {
                    // A vanishing overlap is a touch point.
                    SegmentIntersection::Point(a)
                } else {
                    SegmentIntersection::Overlap(Segment::new(a, b))
                }
            }
        }
    }

    /// Snap `p` onto the first of the four segment endpoints it is almost
    /// equal to, if any.
    fn snap_to_endpoint(&self, p: Point, other: &Segment, tolerance: f64) -> Point {
        for candidate in [self.start, self.end, other.start, other.end] {
            if p.almost_eq(candidate, tolerance) {
                return candidate;
            }
        }
        p
    }
}

/// Intersect the parameter intervals `[u0, u1]` and `[v0, v1]`.
///
/// Returns `None` when they are disjoint, `Some((w, None))` when they share a
/// single value and `Some((w0, Some(w1)))` for a proper interval.
fn interval_overlap(u0: f64, u1: f64, v0: f64, v1: f64) -> Option<(f64, Option<f64>)> {
    if u1 < v0 || u0 > v1 {
        return None;
    }
    if u1 > v0 {
        if u0 < v1 {
            let w0 = if u0 < v0 { v0 } else { u0 };
            let w1 = if u1 > v1 { v1 } else { u1 };
            Some((w0, Some(w1)))
        } else {
            Some((u0, None))
        }
    } else {
        Some((u1, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn seg(a: (f64, f64), b: (f64, f64)) -> Segment {
        Segment::new(a.into(), b.into())
    }

    #[test]
    fn side_of_directed_segment() {
        let s = seg((0.0, 0.0), (2.0, 0.0));
        assert_eq!(s.side_of(Point::new(1.0, 1.0)), Side::Left);
        assert_eq!(s.side_of(Point::new(1.0, -1.0)), Side::Right);
        assert_eq!(s.side_of(Point::new(5.0, 0.0)), Side::Center);
    }

    #[test]
    fn crossing_segments_meet_in_a_point() {
        let a = seg((0.0, 0.0), (2.0, 2.0));
        let b = seg((0.0, 2.0), (2.0, 0.0));
        assert_eq!(
            a.intersection(&b, TOL),
            SegmentIntersection::Point(Point::new(1.0, 1.0))
        );
    }

    #[test]
    fn crossing_lines_but_disjoint_segments() {
        let a = seg((0.0, 0.0), (1.0, 1.0));
        let b = seg((3.0, 0.0), (0.0, 3.0));
        assert_eq!(a.intersection(&b, TOL), SegmentIntersection::None);
    }

    #[test]
    fn parallel_segments_do_not_meet() {
        let a = seg((0.0, 0.0), (2.0, 0.0));
        let b = seg((0.0, 1.0), (2.0, 1.0));
        assert_eq!(a.intersection(&b, TOL), SegmentIntersection::None);
    }

    #[test]
    fn collinear_segments_overlap_in_a_segment() {
        let a = seg((0.0, 0.0), (2.0, 0.0));
        let b = seg((1.0, 0.0), (3.0, 0.0));
        assert_eq!(
            a.intersection(&b, TOL),
            SegmentIntersection::Overlap(seg((1.0, 0.0), (2.0, 0.0)))
        );
    }

    #[test]
    fn collinear_segments_touching_in_one_endpoint() {
        let a = seg((0.0, 0.0), (1.0, 0.0));
        let b = seg((1.0, 0.0), (2.0, 0.0));
        assert_eq!(
            a.intersection(&b, TOL),
            SegmentIntersection::Point(Point::new(1.0, 0.0))
        );
    }

    #[test]
    fn endpoint_on_interior_of_other_segment() {
        let a = seg((0.0, 0.0), (2.0, 0.0));
        let b = seg((1.0, 0.0), (1.0, 1.0));
        assert_eq!(
            a.intersection(&b, TOL),
            SegmentIntersection::Point(Point::new(1.0, 0.0))
        );
    }

    #[test]
    fn crossing_near_a_vertex_snaps_onto_it() {
        let a = seg((0.0, 0.0), (2.0, 0.0));
        let b = seg((1.0, -1.0), (1.0 + 1e-13, 1e-13));
        match a.intersection(&b, TOL) {
            SegmentIntersection::Point(p) => assert_eq!(p, b.end),
            other => panic!("expected a point intersection, got {:?}", other),
        }
    }

    #[test]
    fn degenerate_segments_never_intersect() {
        let a = seg((1.0, 1.0), (1.0, 1.0));
        let b = seg((0.0, 0.0), (2.0, 2.0));
        assert_eq!(a.intersection(&b, TOL), SegmentIntersection::None);
        assert_eq!(b.intersection(&a, TOL), SegmentIntersection::None);
    }

    #[test]
    fn collinearity_check() {
        let a = seg((0.0, 0.0), (4.0, 4.0));
        assert!(a.is_collinear(&seg((1.0, 1.0), (2.0, 2.0))));
        assert!(!a.is_collinear(&seg((1.0, 1.0), (2.0, 3.0))));
    }
}
