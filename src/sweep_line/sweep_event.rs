// SPDX-License-Identifier: AGPL-3.0-or-later

//! Sweep events, the queue elements of the sweep line algorithm.
//!
//! Every segment of the input contributes two events, one per endpoint. The
//! two events of a pair are linked through weak references and carry the
//! mutable state the sweep updates as it runs.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::{Rc, Weak};

use crate::geometry::{Point, Segment, Side};

/// Which operand an edge came from.
///
/// Intersection and difference are not symmetric, so every edge keeps track
/// of its operand.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Ord, PartialOrd)]
pub enum PolygonType {
    /// The first operand.
    Subject,
    /// The second operand, clipping the first.
    Clipping,
}

/// Classification of an edge with respect to collinear overlaps.
///
/// Edges start out as `Normal`. When the sweep finds two collinear edges of
/// different operands sharing a span, it keeps one representative and marks
/// how the operands behave across it.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum EdgeType {
    /// An ordinary edge.
    Normal,
    /// A duplicate of an overlapped span. Never part of the result.
    NonContributing,
    /// Representative of an overlapped span where both operands make the
    /// same inside/outside transition.
    SameTransition,
    /// Representative of an overlapped span where the operands make opposite
    /// transitions.
    DifferentTransition,
}

/// State the sweep rewrites while an event is queued.
#[derive(Debug, Clone)]
struct MutablePart {
    /// The event at the opposite endpoint of the edge.
    other_event: Weak<SweepEvent>,
    /// Whether `p` is the lexicographically smaller endpoint of the edge.
    /// Splitting an edge can flip this on a queued event.
    is_left_event: bool,
    /// Overlap classification of the edge.
    edge_type: EdgeType,
    /// Does the interior of its own polygon lie below this edge?
    in_out: bool,
    /// Does the edge lie inside the other polygon?
    inside_other: bool,
}

/// One endpoint event of a segment.
#[derive(Debug, Clone)]
pub struct SweepEvent {
    /// Shared mutable state, borrow checked at runtime.
    mutable: RefCell<MutablePart>,
    /// The endpoint this event stands for.
    pub p: Point,
    /// Original segment from which this event was created. Splits shorten the
    /// live segment but never this one, so queue ordering stays stable.
    original_segment: Segment,
    /// Operand the edge belongs to.
    pub polygon_type: PolygonType,
    /// Unique ID of the edge. Used to break ties and guarantee ordering for
    /// overlapping edges.
    pub edge_id: usize,
}

impl SweepEvent {
    /// Create the event for the endpoint `point` of the edge towards
    /// `other_point`, wrapped into a `Rc`.
    pub fn new_rc(
        edge_id: usize,
        point: Point,
        other_point: Point,
        is_left_event: bool,
        other_event: Weak<SweepEvent>,
        polygon_type: PolygonType,
        edge_type: EdgeType,
    ) -> Rc<SweepEvent> {
        Rc::new(SweepEvent {
            mutable: RefCell::new(MutablePart {
                other_event,
                is_left_event,
                edge_type,
                in_out: false,
                inside_other: false,
            }),
            p: point,
            original_segment: Segment::new(point, other_point),
            polygon_type,
            edge_id,
        })
    }

    /// Does this event mark the left endpoint of its segment?
    pub fn is_left_event(&self) -> bool {
        self.mutable.borrow().is_left_event
    }

    pub(crate) fn set_is_left_event(&self, is_left_event: bool) {
        self.mutable.borrow_mut().is_left_event = is_left_event;
    }

    /// The event at the other endpoint, while it is still alive.
    pub fn get_other_event(&self) -> Option<Rc<Self>> {
        self.mutable.borrow().other_event.upgrade()
    }

    /// Link this event to the one at the other endpoint.
    pub fn set_other_event(&self, other_event: &Rc<Self>) {
        debug_assert_ne!(self.is_left_event(), other_event.is_left_event());
        self.mutable.borrow_mut().other_event = Rc::downgrade(other_event);
    }

    /// The live edge of this event, from this endpoint to the linked one.
    ///
    /// `None` once the partner event has been dropped.
    pub fn get_segment(&self) -> Option<Segment> {
        self.get_other_event().map(|other| {
            debug_assert!(self.is_left_event() ^ other.is_left_event());
            Segment::new(self.p, other.p)
        })
    }

    /// Get the original segment associated with this event. Start and end
    /// point are sorted.
    pub fn get_original_segment(&self) -> Segment {
        let s = self.original_segment;
        if s.start.lex_cmp(&s.end) == Ordering::Less {
            s
        } else {
            s.reversed()
        }
    }

    /// Get the unique ID of the edge.
    pub fn get_edge_id(&self) -> usize {
        self.edge_id
    }

    /// Get the overlap classification of the edge.
    pub fn get_edge_type(&self) -> EdgeType {
        self.mutable.borrow().edge_type
    }

    /// Set the overlap classification of the edge.
    pub fn set_edge_type(&self, edge_type: EdgeType) {
        self.mutable.borrow_mut().edge_type = edge_type;
    }

    /// Does the interior of its own polygon lie below this edge?
    pub fn is_in_out_transition(&self) -> bool {
        self.mutable.borrow().in_out
    }

    /// Does the edge lie inside the other polygon?
    pub fn is_inside_other(&self) -> bool {
        self.mutable.borrow().inside_other
    }

    /// Store the classification flags computed when the event enters the
    /// scan line.
    pub fn set_flags(&self, in_out: bool, inside_other: bool) {
        let mut mutable = self.mutable.borrow_mut();
        mutable.in_out = in_out;
        mutable.inside_other = inside_other;
    }
}

impl PartialEq for SweepEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SweepEvent {}

impl PartialOrd for SweepEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SweepEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed at the end, so the max-heap of the event queue pops the
        // smallest event first.
        let point_ordering = self.p.lex_cmp(&other.p);

        match point_ordering {
            Ordering::Equal => {
                // At one point, right events go first: an edge ending there
                // leaves the scan line before an edge starting there enters.
                match self.is_left_event().cmp(&other.is_left_event()) {
                    Ordering::Equal => {
                        // Same point, same endpoint role. The edges decide.
                        let ours = self.get_original_segment();
                        let theirs = other.get_original_segment();

                        debug_assert!(ours.start == theirs.start || ours.end == theirs.end);

                        let reference = if other.is_left_event() {
                            theirs.end
                        } else {
                            theirs.start
                        };

                        match ours.side_of(reference) {
                            // The lower edge orders first. Left side means
                            // the other edge continues above ours.
                            Side::Left => {
                                debug_assert!(!ours.is_collinear(&theirs));
                                Ordering::Less
                            }
                            Side::Right => {
                                debug_assert!(!ours.is_collinear(&theirs));
                                Ordering::Greater
                            }
                            Side::Center => {
                                // Collinear pair: subject ahead of clipping,
                                // then the edge id.
                                self.polygon_type
                                    .cmp(&other.polygon_type)
                                    .then_with(|| self.edge_id.cmp(&other.edge_id))
                            }
                        }
                    }
                    less_or_greater => less_or_greater,
                }
            }
            less_or_greater => less_or_greater,
        }
        .reverse()
    }
}
