// SPDX-License-Identifier: AGPL-3.0-or-later

//! Errors reported by boolean operations.

use thiserror::Error;

use crate::geometry::GeometryKind;

/// Reasons a boolean operation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OperationError {
    /// An operand has a kind that cannot take part in a boolean operation.
    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometry(GeometryKind),
}
