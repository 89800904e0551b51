// SPDX-License-Identifier: AGPL-3.0-or-later

//! Conversion of input geometries into the ring form used by the sweep.
//!
//! The sweep works on one representation only: a list of rings. Polygons map
//! onto it directly, paths become rings that the caller treats as open.
//! Rings that are too short to form an edge chain are repaired here so the
//! sweep never sees them.

use crate::error::OperationError;
use crate::geometry::{Contour, Geometry, Point, Polygon};

/// Relative length of the synthetic spur appended to two-point rings.
const PADDING_DELTA: f64 = 1e-5;

/// Bring an operand into ring form.
///
/// Polygon variants contribute their rings unchanged, path variants one ring
/// per path. Point variants cannot take part in an operation and are
/// rejected.
pub(crate) fn normalize(geometry: &Geometry) -> Result<Polygon, OperationError> {
    let rings: Vec<Contour> = match geometry {
        Geometry::Polygon(polygon) => polygon.rings.clone(),
        Geometry::MultiPolygon(polygons) => polygons
            .polygons
            .iter()
            .flat_map(|polygon| polygon.rings.iter().cloned())
            .collect(),
        Geometry::LineString(path) => vec![Contour::new(path.points.clone())],
        Geometry::MultiLineString(paths) => paths
            .line_strings
            .iter()
            .map(|path| Contour::new(path.points.clone()))
            .collect(),
        Geometry::Point(_) | Geometry::MultiPoint(_) => {
            return Err(OperationError::UnsupportedGeometry(geometry.kind()))
        }
    };
    Ok(Polygon::new(rings.into_iter().map(repair_ring).collect()))
}

/// Repair rings with fewer than three vertices.
///
/// A single vertex spans no edge and is dropped. A two-vertex ring would
/// collapse into one doubly-traversed edge, so a short spur just past the
/// second vertex is appended. The spur continues the ring direction in x and
/// mirrors it in y, leaving the carrier line, so the three vertices are not
/// collinear.
fn repair_ring(ring: Contour) -> Contour {
    match ring.points.len() {
        1 => Contour::default(),
        2 => {
            let p0 = ring.points[0];
            let p1 = ring.points[1];
            let spur = Point::new(
                p1.x + (p1.x - p0.x) * PADDING_DELTA,
                p1.y - (p1.y - p0.y) * PADDING_DELTA,
            );
            Contour::new(vec![p0, p1, spur])
        }
        _ => ring,
    }
}
