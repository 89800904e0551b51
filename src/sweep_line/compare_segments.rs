// SPDX-License-Identifier: AGPL-3.0-or-later

//! Ordering of edges along the scan line.
//!
//! The scan line keeps the edges it currently crosses sorted by the height
//! of the crossing point. The comparator below defines that order on the
//! left events of the edges.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::geometry::{Segment, Side};
use crate::sweep_line::sweep_event::SweepEvent;

/// Order `later` against `earlier` by the side of `earlier` it starts on.
///
/// `Less` when `later` starts above `earlier`. A start on the carrier line
/// itself falls through to the end point.
fn order_by_start_side(earlier: &Segment, later: &Segment) -> Ordering {
    debug_assert!(earlier.start != later.start);

    debug_assert!(earlier.start.x <= earlier.end.x);
    debug_assert!(later.start.x <= later.end.x);

    debug_assert!(
        !(earlier.start.x > later.end.x || later.start.x > earlier.end.x),
        "scan line neighbors must overlap in x"
    );

    match earlier.side_of(later.start) {
        Side::Left => Ordering::Less,
        Side::Right => Ordering::Greater,
        Side::Center => match earlier.side_of(later.end) {
            Side::Left => Ordering::Less,
            Side::Right => Ordering::Greater,
            Side::Center => Ordering::Equal,
        },
    }
}

/// Order two left events by where their edges cross the scan line, lower
/// crossing first.
///
/// Both events must be left events of non-degenerate edges, and the edges
/// must overlap in x, otherwise the scan line could not hold both at once.
/// Collinear edges cross at the same height at every sweep position and
/// fall back to the edge id, which keeps their order stable when an edge is
/// divided.
pub fn compare_events_by_segments(a: &Rc<SweepEvent>, b: &Rc<SweepEvent>) -> Ordering {
    debug_assert!(a.is_left_event());
    debug_assert!(b.is_left_event());

    // An event always ties with itself.
    if Rc::ptr_eq(a, b) {
        return Ordering::Equal;
    }

    let sa = a.get_segment().unwrap();
    let sb = b.get_segment().unwrap();

    debug_assert!(sa.start.x <= sa.end.x);
    debug_assert!(sb.start.x <= sb.end.x);

    debug_assert!(sa.start != sa.end);
    debug_assert!(sb.start != sb.end);

    debug_assert!(
        !(sa.start.x > sb.end.x || sb.start.x > sa.end.x),
        "scan line neighbors must overlap in x"
    );

    if sa.is_collinear(&sb) {
        a.get_edge_id().cmp(&b.get_edge_id())
    } else if sa.start == sb.start {
        // Shared left endpoint, the right endpoints decide.
        match sa.side_of(sb.end) {
            Side::Left => Ordering::Less,
            Side::Right => Ordering::Greater,
            Side::Center => panic!("collinear edges must have been handled above"),
        }
    } else if sa.start.x == sb.start.x {
        // Same start x, so the start heights differ and decide directly.
        debug_assert!(sa.start.y != sb.start.y);
        if sa.start.y < sb.start.y {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    } else {
        // The edge starting first judges the other's start point.
        let order = if sa.start.x < sb.start.x {
            order_by_start_side(&sa, &sb)
        } else {
            order_by_start_side(&sb, &sa).reverse()
        };
        debug_assert!(order != Ordering::Equal);
        order
    }
}
