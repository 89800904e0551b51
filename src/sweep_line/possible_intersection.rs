// SPDX-License-Identifier: AGPL-3.0-or-later

//! Intersection handling between neighbors in the scan line.
//!
//! When two edges become neighbors the sweep checks them for intersection.
//! A proper crossing splits the edges in place; collinear overlaps are
//! resolved by keeping one representative edge of the shared span and
//! marking the duplicate as non-contributing.

use std::cmp::Ordering;
use std::collections::binary_heap::BinaryHeap;
use std::rc::Rc;

use crate::geometry::{Point, SegmentIntersection};
use crate::sweep_line::sweep_event::{EdgeType, SweepEvent};

/// Split a segment into two segments at the intersection point `inter` and
/// push the new events into the queue.
fn divide_segment(
    event: &Rc<SweepEvent>,
    inter: Point,
    queue: &mut BinaryHeap<Rc<SweepEvent>>,
) {
    debug_assert!(event.is_left_event());

    if let Some(other_event) = event.get_other_event() {
        debug_assert!(
            event.p != inter && other_event.p != inter,
            "Split point must not lie on an endpoint."
        );

        // "Right event" of the left half and "left event" of the right half.
        // Each new event takes over the classification stored on the event it
        // replaces, so overlap markings survive the split.
        let r = SweepEvent::new_rc(
            event.get_edge_id(),
            inter,
            event.p,
            false,
            Rc::downgrade(event),
            event.polygon_type,
            event.get_edge_type(),
        );

        let l = SweepEvent::new_rc(
            event.get_edge_id(),
            inter,
            other_event.p,
            true,
            Rc::downgrade(&other_event),
            event.polygon_type,
            other_event.get_edge_type(),
        );

        if other_event.p.lex_cmp(&inter) == Ordering::Less {
            // Rounding placed the split point past the right endpoint. Swap
            // the endpoint roles so both halves keep a left and a right event.
            other_event.set_is_left_event(true);
            l.set_is_left_event(false);
        }

        other_event.set_other_event(&l);
        event.set_other_event(&r);

        // Every linked pair must keep exactly one left event.
        debug_assert!(l.is_left_event() ^ l.get_other_event().unwrap().is_left_event());
        debug_assert!(r.is_left_event() ^ r.get_other_event().unwrap().is_left_event());

        queue.push(l);
        queue.push(r);
    }
}

/// Check if `a` leaves the event queue before `b`.
///
/// The queue is a max-heap over the reversed event order, so the greater
/// event pops first.
fn processed_before(a: &Rc<SweepEvent>, b: &Rc<SweepEvent>) -> bool {
    a.cmp(b) == Ordering::Greater
}

/// Check two neighboring events for intersection and make the necessary
/// modifications to them and to the queue.
///
/// `event1` must come before `event2` in the scan line. Both must be left
/// events.
///
/// A single-point intersection between edges of different operands is
/// recorded in `crossings`. Collinear overlaps between different operands
/// are marked through the edge types; overlaps within one operand are left
/// alone, the duplicate edges cancel during classification.
pub fn possible_intersection(
    event1: &Rc<SweepEvent>,
    event2: &Rc<SweepEvent>,
    queue: &mut BinaryHeap<Rc<SweepEvent>>,
    crossings: &mut Vec<Point>,
    tolerance: f64,
) {
    debug_assert!(event1.is_left_event());
    debug_assert!(event2.is_left_event());

    let edge1 = event1.get_segment().unwrap();
    let edge2 = event2.get_segment().unwrap();

    match edge1.intersection(&edge2, tolerance) {
        SegmentIntersection::None => {}
        SegmentIntersection::Point(p) => {
            if event1.polygon_type != event2.polygon_type {
                crossings.push(p);
            }

            // The intersection point was snapped onto nearby endpoints, so
            // the endpoint tests stay tolerance-based.
            if !p.almost_eq(edge1.start, tolerance) && !p.almost_eq(edge1.end, tolerance) {
                divide_segment(event1, p, queue);
            }
            if !p.almost_eq(edge2.start, tolerance) && !p.almost_eq(edge2.end, tolerance) {
                divide_segment(event2, p, queue);
            }
        }
        SegmentIntersection::Overlap(_) => {
            if event1.polygon_type == event2.polygon_type {
                return;
            }
            mark_overlap(event1, event2, queue, tolerance);
        }
    }
}

/// Resolve a collinear overlap between edges of different operands.
///
/// The four endpoint events are brought into queue processing order; a
/// coinciding endpoint pair collapses into a `None` entry. The duplicate
/// edge of the shared span becomes non-contributing, the surviving
/// representative records whether both operands transition the same way
/// across the span.
fn mark_overlap(
    event1: &Rc<SweepEvent>,
    event2: &Rc<SweepEvent>,
    queue: &mut BinaryHeap<Rc<SweepEvent>>,
    tolerance: f64,
) {
    let other1 = event1.get_other_event().unwrap();
    let other2 = event2.get_other_event().unwrap();

    let mut sorted_events: Vec<Option<Rc<SweepEvent>>> = Vec::with_capacity(4);

    if event1.p.almost_eq(event2.p, tolerance) {
        sorted_events.push(None);
    } else if processed_before(event1, event2) {
        sorted_events.push(Some(event1.clone()));
        sorted_events.push(Some(event2.clone()));
    } else {
        sorted_events.push(Some(event2.clone()));
        sorted_events.push(Some(event1.clone()));
    }

    if other1.p.almost_eq(other2.p, tolerance) {
        sorted_events.push(None);
    } else if processed_before(&other1, &other2) {
        sorted_events.push(Some(other1.clone()));
        sorted_events.push(Some(other2.clone()));
    } else {
        sorted_events.push(Some(other2.clone()));
        sorted_events.push(Some(other1.clone()));
    }

    let span_type = if event1.is_in_out_transition() == event2.is_in_out_transition() {
        EdgeType::SameTransition
    } else {
        EdgeType::DifferentTransition
    };

    match sorted_events.len() {
        2 => {
            // Both segments are equal.
            event1.set_edge_type(EdgeType::NonContributing);
            other1.set_edge_type(EdgeType::NonContributing);
            event2.set_edge_type(span_type);
            other2.set_edge_type(span_type);
        }
        3 => {
            // The segments share one endpoint. The middle event belongs to
            // the segment that is entirely the shared span.
            let middle = sorted_events[1].as_ref().unwrap();
            middle.set_edge_type(EdgeType::NonContributing);
            middle
                .get_other_event()
                .unwrap()
                .set_edge_type(EdgeType::NonContributing);

            if let Some(first) = sorted_events[0].as_ref() {
                // The right endpoints coincide. Splitting the longer edge at
                // the shared span hands the marking down to its second half.
                first.get_other_event().unwrap().set_edge_type(span_type);
                divide_segment(first, middle.p, queue);
            } else {
                // The left endpoints coincide. The first half of the longer
                // edge is the shared span.
                let outer_left = sorted_events[2].as_ref().unwrap().get_other_event().unwrap();
                outer_left.set_edge_type(span_type);
                divide_segment(&outer_left, middle.p, queue);
            }
        }
        _ => {
            debug_assert_eq!(sorted_events.len(), 4);
            let first = sorted_events[0].as_ref().unwrap();
            let second = sorted_events[1].as_ref().unwrap();
            let third = sorted_events[2].as_ref().unwrap();
            let fourth = sorted_events[3].as_ref().unwrap();

            if !Rc::ptr_eq(first, &fourth.get_other_event().unwrap()) {
                // Partial overlap, no segment contains the other. The split
                // of `first` hands the span marking on `third` down to its
                // second half.
                second.set_edge_type(EdgeType::NonContributing);
                third.set_edge_type(span_type);
                divide_segment(first, second.p, queue);
                divide_segment(second, third.p, queue);
            } else {
                // One segment contains the other. The inner segment is the
                // duplicate; the outer one is split around it.
                second.set_edge_type(EdgeType::NonContributing);
                second
                    .get_other_event()
                    .unwrap()
                    .set_edge_type(EdgeType::NonContributing);
                divide_segment(first, second.p, queue);

                // After the split the second half of the outer edge starts a
                // fresh left event; that event covers the shared span.
                let outer_left = fourth.get_other_event().unwrap();
                outer_left.set_edge_type(span_type);
                divide_segment(&outer_left, third.p, queue);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sweep_line::sweep_event::PolygonType;
    use std::rc::Weak;

    const TOL: f64 = 1e-9;

    fn event_pair(
        edge_id: usize,
        left: (f64, f64),
        right: (f64, f64),
        polygon_type: PolygonType,
    ) -> (Rc<SweepEvent>, Rc<SweepEvent>) {
        let other = SweepEvent::new_rc(
            edge_id,
            right.into(),
            left.into(),
            false,
            Weak::new(),
            polygon_type,
            EdgeType::Normal,
        );
        let event = SweepEvent::new_rc(
            edge_id,
            left.into(),
            right.into(),
            true,
            Rc::downgrade(&other),
            polygon_type,
            EdgeType::Normal,
        );
        other.set_other_event(&event);
        (event, other)
    }

    #[test]
    fn divide_rewires_the_event_pairs() {
        let (event, other) = event_pair(1, (0.0, 0.0), (4.0, 0.0), PolygonType::Subject);
        let mut queue = BinaryHeap::new();

        divide_segment(&event, Point::new(1.0, 0.0), &mut queue);

        assert_eq!(queue.len(), 2);
        let first = queue.pop().unwrap();
        let second = queue.pop().unwrap();

        // The right event of the left half leaves the queue before the left
        // event of the right half.
        assert!(!first.is_left_event());
        assert_eq!(first.p, Point::new(1.0, 0.0));
        assert!(second.is_left_event());
        assert_eq!(second.p, Point::new(1.0, 0.0));

        assert!(Rc::ptr_eq(&first.get_other_event().unwrap(), &event));
        assert!(Rc::ptr_eq(&second.get_other_event().unwrap(), &other));
        assert!(Rc::ptr_eq(&event.get_other_event().unwrap(), &first));
        assert!(Rc::ptr_eq(&other.get_other_event().unwrap(), &second));
    }

    #[test]
    fn crossing_divides_both_edges() {
        let (e1, _o1) = event_pair(1, (0.0, 0.0), (2.0, 2.0), PolygonType::Subject);
        let (e2, _o2) = event_pair(2, (0.0, 2.0), (2.0, 0.0), PolygonType::Clipping);
        let mut queue = BinaryHeap::new();
        let mut crossings = Vec::new();

        possible_intersection(&e1, &e2, &mut queue, &mut crossings, TOL);

        assert_eq!(crossings, vec![Point::new(1.0, 1.0)]);
        // Two splits, two new events each.
        assert_eq!(queue.len(), 4);
        assert_eq!(e1.get_other_event().unwrap().p, Point::new(1.0, 1.0));
        assert_eq!(e2.get_other_event().unwrap().p, Point::new(1.0, 1.0));
    }

    #[test]
    fn endpoint_touch_does_not_divide() {
        let (e1, _o1) = event_pair(1, (0.0, 0.0), (1.0, 1.0), PolygonType::Subject);
        let (e2, _o2) = event_pair(2, (1.0, 1.0), (2.0, 0.0), PolygonType::Clipping);
        let mut queue = BinaryHeap::new();
        let mut crossings = Vec::new();

        possible_intersection(&e1, &e2, &mut queue, &mut crossings, TOL);

        // The touch point is a crossing of the operands, but no edge is split.
        assert_eq!(crossings, vec![Point::new(1.0, 1.0)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn equal_edges_of_different_operands_are_marked() {
        let (e1, o1) = event_pair(1, (0.0, 0.0), (2.0, 0.0), PolygonType::Subject);
        let (e2, o2) = event_pair(2, (0.0, 0.0), (2.0, 0.0), PolygonType::Clipping);
        e1.set_flags(false, false);
        e2.set_flags(false, true);
        let mut queue = BinaryHeap::new();
        let mut crossings = Vec::new();

        possible_intersection(&e1, &e2, &mut queue, &mut crossings, TOL);

        assert!(queue.is_empty());
        assert!(crossings.is_empty());
        assert_eq!(e1.get_edge_type(), EdgeType::NonContributing);
        assert_eq!(o1.get_edge_type(), EdgeType::NonContributing);
        assert_eq!(e2.get_edge_type(), EdgeType::SameTransition);
        assert_eq!(o2.get_edge_type(), EdgeType::SameTransition);
    }

    #[test]
    fn overlap_within_one_operand_stays_unmarked() {
        let (e1, _o1) = event_pair(1, (0.0, 0.0), (2.0, 0.0), PolygonType::Subject);
        let (e2, _o2) = event_pair(2, (1.0, 0.0), (3.0, 0.0), PolygonType::Subject);
        let mut queue = BinaryHeap::new();
        let mut crossings = Vec::new();

        possible_intersection(&e1, &e2, &mut queue, &mut crossings, TOL);

        assert!(queue.is_empty());
        assert_eq!(e1.get_edge_type(), EdgeType::Normal);
        assert_eq!(e2.get_edge_type(), EdgeType::Normal);
    }
}
