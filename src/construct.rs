// SPDX-License-Identifier: AGPL-3.0-or-later

//! The public entry point dispatching on operand kinds.
//!
//! Operands arrive as arbitrary geometry values. Missing operands are
//! resolved without touching the engine, the remaining pairs are classified
//! into areal and linear operands, brought into the operand order the
//! engine expects and normalized into ring sets.

use crate::booleanop::{boolean_op, OutputKind};
use crate::error::OperationError;
use crate::geometry::{Geometry, GeometryKind};
use crate::normalize::normalize;
use crate::{Operation, TOLERANCE};

/// Operand classes taking part in an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperandClass {
    /// Polygon or MultiPolygon.
    Areal,
    /// LineString or MultiLineString.
    Linear,
}

fn operand_class(geometry: &Geometry) -> Result<OperandClass, OperationError> {
    match geometry.kind() {
        GeometryKind::Polygon | GeometryKind::MultiPolygon => Ok(OperandClass::Areal),
        GeometryKind::LineString | GeometryKind::MultiLineString => Ok(OperandClass::Linear),
        GeometryKind::Point | GeometryKind::MultiPoint => {
            Err(OperationError::UnsupportedGeometry(geometry.kind()))
        }
    }
}

/// Compute a boolean operation between two optional operands with the
/// default [`TOLERANCE`].
///
/// The result kind follows from the operand kinds: two areal operands
/// produce an area, a linear operand against an areal one produces the
/// clipped path pieces, two linear operands produce their crossing points.
/// `Ok(None)` means the result is empty.
pub fn construct(
    subject: Option<&Geometry>,
    clipping: Option<&Geometry>,
    operation: Operation,
) -> Result<Option<Geometry>, OperationError> {
    construct_with_tolerance(subject, clipping, operation, TOLERANCE)
}

/// Same as [`construct`] with an explicit comparison tolerance.
pub fn construct_with_tolerance(
    subject: Option<&Geometry>,
    clipping: Option<&Geometry>,
    operation: Operation,
    tolerance: f64,
) -> Result<Option<Geometry>, OperationError> {
    // Missing operands short-circuit. Pass-through results are returned as
    // they are, without kind validation.
    let (subject, clipping) = match (subject, clipping) {
        (None, None) => return Ok(None),
        (None, Some(clipping)) => {
            return Ok(match operation {
                Operation::Union | Operation::Xor => Some(clipping.clone()),
                Operation::Intersection | Operation::Difference => None,
            })
        }
        (Some(subject), None) => {
            return Ok(match operation {
                Operation::Intersection => None,
                Operation::Union | Operation::Difference | Operation::Xor => {
                    Some(subject.clone())
                }
            })
        }
        (Some(subject), Some(clipping)) => (subject, clipping),
    };

    let subject_class = operand_class(subject)?;
    let clipping_class = operand_class(clipping)?;

    // The engine expects the linear operand in subject position. Clipping
    // an area with a path means clipping the path against the area.
    let (subject, clipping, output) = match (subject_class, clipping_class) {
        (OperandClass::Areal, OperandClass::Areal) => (subject, clipping, OutputKind::Polygons),
        (OperandClass::Linear, OperandClass::Areal) => (subject, clipping, OutputKind::Lines),
        (OperandClass::Areal, OperandClass::Linear) => (clipping, subject, OutputKind::Lines),
        (OperandClass::Linear, OperandClass::Linear) => (subject, clipping, OutputKind::Points),
    };

    let subject_rings = normalize(subject)?;
    let clipping_rings = normalize(clipping)?;

    Ok(boolean_op(
        &subject_rings,
        &clipping_rings,
        operation,
        output,
        tolerance,
    ))
}
