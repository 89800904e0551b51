// SPDX-License-Identifier: AGPL-3.0-or-later

//! The sweep line pass computing boolean operations.
//!
//! Both operands are swept together from left to right. Intersections are
//! resolved in place by splitting edges, every finished edge is classified
//! against the other operand, and the edges passing the operation's filter
//! are handed to the output stage.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::ops::RangeFrom;
use std::rc::{Rc, Weak};

use itertools::Itertools;

use crate::connect_edges::Connector;
use crate::geometry::{
    Contour, Geometry, LineString, MultiLineString, MultiPoint, Point, Polygon, Segment,
};
use crate::sweep_line::compare_segments::compare_events_by_segments;
use crate::sweep_line::possible_intersection::possible_intersection;
use crate::sweep_line::splay_scanline::SplayScanLine;
use crate::sweep_line::sweep_event::{EdgeType, PolygonType, SweepEvent};
use crate::Operation;

/// Shape of the result a boolean operation produces.
///
/// The shape follows from the operand kinds: two areas make an area, a path
/// against an area makes paths, two paths make points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputKind {
    /// Both operands are areas, the result is an area.
    Polygons,
    /// The subject is a path clipped by an area, the result consists of
    /// path pieces.
    Lines,
    /// Both operands are paths, the result consists of their crossing
    /// points.
    Points,
}

/// Compute a boolean operation between two operands in ring form.
///
/// Returns `None` when the result is empty.
pub(crate) fn boolean_op(
    subject: &Polygon,
    clipping: &Polygon,
    operation: Operation,
    output: OutputKind,
    tolerance: f64,
) -> Option<Geometry> {
    let (subject_bounds, clipping_bounds) = match (subject.bounding_box(), clipping.bounding_box())
    {
        (Some(subject_bounds), Some(clipping_bounds)) => (subject_bounds, clipping_bounds),
        // An operand without points leaves nothing to sweep.
        _ => return trivial_result(subject, clipping, operation, output),
    };

    // Operands that cannot touch keep their segments as they are.
    if !subject_bounds.overlaps(&clipping_bounds) {
        return trivial_result(subject, clipping, operation, output);
    }

    // Paths stay open: their vertex chain does not wrap around.
    let subject_open = output != OutputKind::Polygons;
    let clipping_open = output == OutputKind::Points;

    let mut event_queue = fill_queue(subject, clipping, subject_open, clipping_open, tolerance);

    let mut scan_line = SplayScanLine::new(compare_events_by_segments);
    let mut connector = Connector::new(tolerance);
    let mut crossings: Vec<Point> = Vec::new();

    // Past these x-positions the result cannot change any more.
    let subject_max_x = subject_bounds.max.x;
    let min_max_x = subject_bounds.max.x.min(clipping_bounds.max.x);

    while let Some(event) = event_queue.pop() {
        match operation {
            Operation::Intersection if event.p.x > min_max_x => break,
            Operation::Difference if event.p.x > subject_max_x => break,
            _ => {}
        }

        if event.is_left_event() {
            debug_assert!(
                !scan_line.contains(&event),
                "Event is already in the scan line."
            );

            scan_line.insert(event.clone());

            let maybe_prev = scan_line.prev(&event).cloned();
            let maybe_next = scan_line.next(&event).cloned();
            let maybe_prev_prev = maybe_prev
                .as_ref()
                .and_then(|prev| scan_line.prev(prev).cloned());

            compute_fields(&event, maybe_prev.as_ref(), maybe_prev_prev.as_ref());

            if let Some(next) = &maybe_next {
                possible_intersection(&event, next, &mut event_queue, &mut crossings, tolerance);
            }

            if let Some(prev) = &maybe_prev {
                possible_intersection(prev, &event, &mut event_queue, &mut crossings, tolerance);
            }
        } else if let Some(left_event) = event.get_other_event() {
            debug_assert!(left_event.is_left_event());

            if output != OutputKind::Points && contributes_to_result(&left_event, operation, output)
            {
                connector.add(Segment::new(left_event.p, event.p));
            }

            debug_assert!(
                scan_line.contains(&left_event),
                "Left event is not in the scan line."
            );

            if scan_line.contains(&left_event) {
                let maybe_prev = scan_line.prev(&left_event).cloned();
                let maybe_next = scan_line.next(&left_event).cloned();

                scan_line.remove(&left_event);

                // prev and next become neighbors. Check them for intersection.
                if let (Some(prev), Some(next)) = (maybe_prev, maybe_next) {
                    possible_intersection(&prev, &next, &mut event_queue, &mut crossings, tolerance);
                }
            }
        }
    }

    match output {
        OutputKind::Polygons | OutputKind::Lines => connector.into_geometry(output),
        OutputKind::Points => {
            // Deduplicate under the tolerance, keeping first appearance order.
            let mut points: Vec<Point> = Vec::new();
            for p in crossings {
                if !points.iter().any(|q| q.almost_eq(p, tolerance)) {
                    points.push(p);
                }
            }
            if points.is_empty() {
                None
            } else {
                Some(Geometry::MultiPoint(MultiPoint::new(points)))
            }
        }
    }
}

/// Results for operand pairs that cannot interact: an operand without
/// points, or disjoint bounding boxes.
fn trivial_result(
    subject: &Polygon,
    clipping: &Polygon,
    operation: Operation,
    output: OutputKind,
) -> Option<Geometry> {
    match output {
        OutputKind::Polygons => {
            let rings: Vec<Contour> = match operation {
                Operation::Intersection => Vec::new(),
                Operation::Difference => subject
                    .rings
                    .iter()
                    .filter(|ring| !ring.is_empty())
                    .cloned()
                    .collect(),
                Operation::Union | Operation::Xor => subject
                    .rings
                    .iter()
                    .chain(clipping.rings.iter())
                    .filter(|ring| !ring.is_empty())
                    .cloned()
                    .collect(),
            };
            if rings.is_empty() {
                None
            } else {
                Some(Geometry::Polygon(Polygon::new(rings)))
            }
        }
        OutputKind::Lines => {
            // Only the subject contributes path pieces.
            let mut paths: Vec<LineString> = match operation {
                Operation::Intersection => Vec::new(),
                Operation::Union | Operation::Difference | Operation::Xor => subject
                    .rings
                    .iter()
                    .filter(|ring| !ring.is_empty())
                    .map(|ring| LineString::new(ring.points.clone()))
                    .collect(),
            };
            match paths.len() {
                0 => None,
                1 => paths.pop().map(Geometry::LineString),
                _ => Some(Geometry::MultiLineString(MultiLineString::new(paths))),
            }
        }
        OutputKind::Points => None,
    }
}

/// Create the initial event queue from both operands.
fn fill_queue(
    subject: &Polygon,
    clipping: &Polygon,
    subject_open: bool,
    clipping_open: bool,
    tolerance: f64,
) -> BinaryHeap<Rc<SweepEvent>> {
    let mut event_queue = BinaryHeap::new();
    let mut edge_id_generator = 1..;

    process_operand(
        &mut event_queue,
        subject,
        PolygonType::Subject,
        subject_open,
        &mut edge_id_generator,
        tolerance,
    );
    process_operand(
        &mut event_queue,
        clipping,
        PolygonType::Clipping,
        clipping_open,
        &mut edge_id_generator,
        tolerance,
    );

    event_queue
}

/// Push the events of all edges of one operand.
///
/// Closed rings wrap around from the last vertex to the first, open paths
/// do not contribute that edge.
fn process_operand(
    event_queue: &mut BinaryHeap<Rc<SweepEvent>>,
    polygon: &Polygon,
    polygon_type: PolygonType,
    open: bool,
    edge_id_generator: &mut RangeFrom<usize>,
    tolerance: f64,
) {
    for ring in &polygon.rings {
        if open {
            for (start, end) in ring.points.iter().tuple_windows() {
                enqueue_segment_events(
                    event_queue,
                    *start,
                    *end,
                    polygon_type,
                    edge_id_generator,
                    tolerance,
                );
            }
        } else {
            for (start, end) in ring.points.iter().circular_tuple_windows() {
                enqueue_segment_events(
                    event_queue,
                    *start,
                    *end,
                    polygon_type,
                    edge_id_generator,
                    tolerance,
                );
            }
        }
    }
}

/// Push the two events of a single edge.
fn enqueue_segment_events(
    event_queue: &mut BinaryHeap<Rc<SweepEvent>>,
    start: Point,
    end: Point,
    polygon_type: PolygonType,
    edge_id_generator: &mut RangeFrom<usize>,
    tolerance: f64,
) {
    if Segment::new(start, end).is_degenerate(tolerance) {
        // Degenerate edges would confuse the scan line ordering.
        return;
    }

    let edge_id = edge_id_generator.next().unwrap();
    let start_is_left = start.lex_cmp(&end) == Ordering::Less;

    let event_start = SweepEvent::new_rc(
        edge_id,
        start,
        end,
        start_is_left,
        Weak::new(),
        polygon_type,
        EdgeType::Normal,
    );
    let event_end = SweepEvent::new_rc(
        edge_id,
        end,
        start,
        !start_is_left,
        Rc::downgrade(&event_start),
        polygon_type,
        EdgeType::Normal,
    );
    event_start.set_other_event(&event_end);

    event_queue.push(event_start);
    event_queue.push(event_end);
}

/// Compute the classification flags of an event entering the scan line.
///
/// `maybe_prev` is the edge directly below, `maybe_prev_prev` the one below
/// that. Crossing an edge of the own polygon toggles the in/out transition,
/// an edge of the other polygon switches which side of it we are on. An
/// overlap representative below is transparent, the edge below the pair
/// takes its place.
fn compute_fields(
    event: &Rc<SweepEvent>,
    maybe_prev: Option<&Rc<SweepEvent>>,
    maybe_prev_prev: Option<&Rc<SweepEvent>>,
) {
    match maybe_prev {
        None => {
            // Nothing below: outside of everything.
            event.set_flags(false, false);
        }
        Some(prev) if prev.get_edge_type() != EdgeType::Normal => match maybe_prev_prev {
            None => {
                if prev.polygon_type != event.polygon_type {
                    event.set_flags(false, true);
                } else {
                    event.set_flags(true, false);
                }
            }
            Some(prev_prev) => {
                if prev.polygon_type == event.polygon_type {
                    event.set_flags(
                        !prev.is_in_out_transition(),
                        !prev_prev.is_in_out_transition(),
                    );
                } else {
                    event.set_flags(
                        !prev_prev.is_in_out_transition(),
                        !prev.is_in_out_transition(),
                    );
                }
            }
        },
        Some(prev) if prev.polygon_type == event.polygon_type => {
            event.set_flags(!prev.is_in_out_transition(), prev.is_inside_other());
        }
        Some(prev) => {
            event.set_flags(prev.is_inside_other(), !prev.is_in_out_transition());
        }
    }
}

/// Check if a finished edge belongs into the result of the operation.
///
/// `left_event` carries the flags computed when the edge entered the scan
/// line. For path output the clipping operand only shapes the result; its
/// own edges are never emitted.
fn contributes_to_result(
    left_event: &Rc<SweepEvent>,
    operation: Operation,
    output: OutputKind,
) -> bool {
    debug_assert!(left_event.is_left_event());

    if output == OutputKind::Lines && left_event.polygon_type == PolygonType::Clipping {
        return false;
    }

    match left_event.get_edge_type() {
        EdgeType::Normal => match operation {
            Operation::Intersection => left_event.is_inside_other(),
            Operation::Union => !left_event.is_inside_other(),
            Operation::Difference => match left_event.polygon_type {
                PolygonType::Subject => !left_event.is_inside_other(),
                PolygonType::Clipping => left_event.is_inside_other(),
            },
            Operation::Xor => true,
        },
        EdgeType::NonContributing => false,
        EdgeType::SameTransition => {
            matches!(operation, Operation::Intersection | Operation::Union)
        }
        EdgeType::DifferentTransition => operation == Operation::Difference,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn left_event(
        edge_id: usize,
        left: (f64, f64),
        right: (f64, f64),
        polygon_type: PolygonType,
    ) -> Rc<SweepEvent> {
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
        event
    }

    #[test]
    fn fill_queue_event_counts() {
        let square = Polygon::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let empty = Polygon::default();

        // A closed ring contributes one edge per vertex.
        let queue = fill_queue(&square, &empty, false, false, 1e-9);
        assert_eq!(queue.len(), 8);

        // An open path of n vertices contributes n - 1 edges.
        let queue = fill_queue(&square, &empty, true, false, 1e-9);
        assert_eq!(queue.len(), 6);
    }

    #[test]
    fn fill_queue_skips_degenerate_edges() {
        let ring = Polygon::from(vec![(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let queue = fill_queue(&ring, &Polygon::default(), false, false, 1e-9);
        assert_eq!(queue.len(), 6);
    }

    #[test]
    fn compute_fields_recurrence() {
        // Lowest edge: outside of everything.
        let bottom = left_event(1, (0.0, 0.0), (4.0, 0.0), PolygonType::Subject);
        compute_fields(&bottom, None, None);
        assert!(!bottom.is_in_out_transition());
        assert!(!bottom.is_inside_other());

        // Same polygon above: the in/out transition toggles.
        let same = left_event(2, (0.0, 1.0), (4.0, 1.0), PolygonType::Subject);
        compute_fields(&same, Some(&bottom), None);
        assert!(same.is_in_out_transition());
        assert!(!same.is_inside_other());

        // Other polygon above the subject bottom edge: inside the subject.
        let other = left_event(3, (0.0, 2.0), (4.0, 2.0), PolygonType::Clipping);
        compute_fields(&other, Some(&bottom), None);
        assert!(!other.is_in_out_transition());
        assert!(other.is_inside_other());
    }

    #[test]
    fn filter_for_each_operation() {
        let inside = left_event(1, (0.0, 0.0), (1.0, 0.0), PolygonType::Subject);
        inside.set_flags(false, true);
        let outside = left_event(2, (0.0, 0.0), (1.0, 0.0), PolygonType::Subject);
        outside.set_flags(false, false);

        let polygons = OutputKind::Polygons;
        assert!(contributes_to_result(
            &inside,
            Operation::Intersection,
            polygons
        ));
        assert!(!contributes_to_result(
            &outside,
            Operation::Intersection,
            polygons
        ));
        assert!(!contributes_to_result(&inside, Operation::Union, polygons));
        assert!(contributes_to_result(&outside, Operation::Union, polygons));
        assert!(!contributes_to_result(
            &inside,
            Operation::Difference,
            polygons
        ));
        assert!(contributes_to_result(
            &outside,
            Operation::Difference,
            polygons
        ));
        assert!(contributes_to_result(&inside, Operation::Xor, polygons));
        assert!(contributes_to_result(&outside, Operation::Xor, polygons));

        // For the clipping operand the difference filter is mirrored.
        let clipping_inside = left_event(3, (0.0, 0.0), (1.0, 0.0), PolygonType::Clipping);
        clipping_inside.set_flags(false, true);
        assert!(contributes_to_result(
            &clipping_inside,
            Operation::Difference,
            polygons
        ));

        // Path output never takes edges of the clipping operand.
        assert!(!contributes_to_result(
            &clipping_inside,
            Operation::Difference,
            OutputKind::Lines
        ));
        assert!(contributes_to_result(
            &inside,
            Operation::Intersection,
            OutputKind::Lines
        ));
    }

    #[test]
    fn overlap_representatives_in_the_filter() {
        let same = left_event(1, (0.0, 0.0), (1.0, 0.0), PolygonType::Subject);
        same.set_edge_type(EdgeType::SameTransition);
        let different = left_event(2, (0.0, 0.0), (1.0, 0.0), PolygonType::Subject);
        different.set_edge_type(EdgeType::DifferentTransition);
        let duplicate = left_event(3, (0.0, 0.0), (1.0, 0.0), PolygonType::Subject);
        duplicate.set_edge_type(EdgeType::NonContributing);

        let polygons = OutputKind::Polygons;
        assert!(contributes_to_result(
            &same,
            Operation::Intersection,
            polygons
        ));
        assert!(contributes_to_result(&same, Operation::Union, polygons));
        assert!(!contributes_to_result(
            &same,
            Operation::Difference,
            polygons
        ));
        assert!(!contributes_to_result(&same, Operation::Xor, polygons));

        assert!(contributes_to_result(
            &different,
            Operation::Difference,
            polygons
        ));
        assert!(!contributes_to_result(
            &different,
            Operation::Union,
            polygons
        ));

        for operation in [
            Operation::Union,
            Operation::Intersection,
            Operation::Difference,
            Operation::Xor,
        ] {
            assert!(!contributes_to_result(&duplicate, operation, polygons));
        }
    }
}
