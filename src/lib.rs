// SPDX-License-Identifier: AGPL-3.0-or-later

#![deny(missing_docs)]

//! Boolean operations on 2-D geometry.
//!
//! The crate computes union, intersection, difference and xor between two
//! geometry operands with a sweep line over both operands at once. The kind
//! of the result follows from the kinds of the operands: two areas produce
//! an area, a path against an area produces the clipped path pieces, two
//! paths produce their crossing points.
//!
//! # Example
//!
//! ```
//! use geomop::{construct, Geometry, Operation, Polygon};
//!
//! let a = Geometry::from(Polygon::from(vec![
//!     (0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0),
//! ]));
//! let b = Geometry::from(Polygon::from(vec![
//!     (1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0),
//! ]));
//!
//! let union = construct(Some(&a), Some(&b), Operation::Union).unwrap();
//! match union {
//!     Some(Geometry::Polygon(polygon)) => {
//!         assert_eq!(polygon.rings.len(), 1);
//!         assert_eq!(polygon.rings[0].signed_area().abs(), 7.0);
//!     }
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

mod booleanop;
mod connect_edges;
mod construct;
mod error;
mod geometry;
mod normalize;
mod sweep_line;

pub mod encoding;

pub use construct::{construct, construct_with_tolerance};
pub use error::OperationError;
pub use geometry::{
    Contour, Geometry, GeometryKind, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon, Rect,
};

/// The boolean operation to compute.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operation {
    /// Keep the region covered by at least one operand.
    Union,
    /// Keep the region covered by both operands.
    Intersection,
    /// Keep the region covered by the subject but not by the clipping
    /// operand.
    Difference,
    /// Keep the region covered by exactly one operand.
    Xor,
}

/// Default comparison tolerance.
///
/// Two coordinates count as equal when their difference stays below this
/// value relative to the larger magnitude, floored at one.
pub const TOLERANCE: f64 = 1e-9;
