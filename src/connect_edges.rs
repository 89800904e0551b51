// SPDX-License-Identifier: AGPL-3.0-or-later

//! Connect the edges surviving the sweep into rings and paths.
//!
//! Edges arrive one by one in sweep order. Each one is attached to an open
//! point chain sharing an endpoint, chains are merged when an edge bridges
//! two of them, and a chain whose ends meet becomes a ring.

use std::collections::VecDeque;

use crate::booleanop::OutputKind;
use crate::geometry::{Contour, Geometry, LineString, MultiLineString, Point, Polygon, Segment};

/// A sequence of points linked together by result edges.
#[derive(Debug, Clone)]
struct PointChain {
    points: VecDeque<Point>,
    closed: bool,
}

impl PointChain {
    fn init(segment: Segment) -> Self {
        let mut points = VecDeque::new();
        points.push_back(segment.start);
        points.push_back(segment.end);
        PointChain {
            points,
            closed: false,
        }
    }

    fn close(&mut self) {
        // A ring needs at least three corners. A segment coinciding with a
        // two point chain is a duplicate edge and is swallowed instead.
        if self.points.len() > 2 {
            self.closed = true;
        }
    }

    /// Attach a segment to either end of the chain.
    ///
    /// Returns `false` when the segment does not share an endpoint with the
    /// chain.
    fn link_segment(&mut self, segment: &Segment, tolerance: f64) -> bool {
        let (front, back) = match (self.points.front(), self.points.back()) {
            (Some(front), Some(back)) => (*front, *back),
            _ => return false,
        };

        if segment.start.almost_eq(front, tolerance) {
            if segment.end.almost_eq(back, tolerance) {
                self.close();
            } else {
                self.points.push_front(segment.end);
            }
            return true;
        }
        if segment.end.almost_eq(back, tolerance) {
            if segment.start.almost_eq(front, tolerance) {
                self.close();
            } else {
                self.points.push_back(segment.start);
            }
            return true;
        }
        if segment.end.almost_eq(front, tolerance) {
            if segment.start.almost_eq(back, tolerance) {
                self.close();
            } else {
                self.points.push_front(segment.start);
            }
            return true;
        }
        if segment.start.almost_eq(back, tolerance) {
            if segment.end.almost_eq(front, tolerance) {
                self.close();
            } else {
                self.points.push_back(segment.end);
            }
            return true;
        }

        false
    }

    /// Splice another chain onto this one where their ends meet.
    ///
    /// On success the other chain is drained and can be discarded.
    fn link_chain(&mut self, other: &mut PointChain, tolerance: f64) -> bool {
        let (front, back) = match (self.points.front(), self.points.back()) {
            (Some(front), Some(back)) => (*front, *back),
            _ => return false,
        };
        let (other_front, other_back) = match (other.points.front(), other.points.back()) {
            (Some(front), Some(back)) => (*front, *back),
            _ => return false,
        };

        if other_front.almost_eq(back, tolerance) {
            other.points.pop_front();
            self.points.extend(other.points.drain(..));
            return true;
        }
        if other_back.almost_eq(front, tolerance) {
            self.points.pop_front();
            for p in other.points.drain(..).rev() {
                self.points.push_front(p);
            }
            return true;
        }
        if other_front.almost_eq(front, tolerance) {
            self.points.pop_front();
            for p in other.points.drain(..) {
                self.points.push_front(p);
            }
            return true;
        }
        if other_back.almost_eq(back, tolerance) {
            self.points.pop_back();
            self.points.extend(other.points.drain(..).rev());
            return true;
        }

        false
    }
}

/// Collects result edges and connects them into point chains.
#[derive(Debug, Clone)]
pub(crate) struct Connector {
    open: Vec<PointChain>,
    closed: Vec<PointChain>,
    tolerance: f64,
}

impl Connector {
    pub(crate) fn new(tolerance: f64) -> Self {
        Connector {
            open: Vec::new(),
            closed: Vec::new(),
            tolerance,
        }
    }

    /// Add one result edge.
    pub(crate) fn add(&mut self, segment: Segment) {
        for j in 0..self.open.len() {
            if self.open[j].link_segment(&segment, self.tolerance) {
                if self.open[j].closed {
                    let chain = self.open.remove(j);
                    self.closed.push(chain);
                } else {
                    // The chain grew. It may now reach another open chain.
                    for k in (j + 1)..self.open.len() {
                        let (left, right) = self.open.split_at_mut(k);
                        if left[j].link_chain(&mut right[0], self.tolerance) {
                            self.open.remove(k);
                            break;
                        }
                    }
                }
                return;
            }
        }

        // No chain takes the segment. Start a new one.
        self.open.push(PointChain::init(segment));
    }

    /// Turn the collected chains into the result geometry.
    ///
    /// Returns `None` when no edge was added. For ring output open chains
    /// are kept as well, a chain which failed to close still carries its
    /// area. For path output a closed chain repeats its first point at the
    /// end.
    pub(crate) fn into_geometry(self, output: OutputKind) -> Option<Geometry> {
        match output {
            OutputKind::Polygons => {
                let rings: Vec<Contour> = self
                    .closed
                    .into_iter()
                    .chain(self.open)
                    .map(|chain| Contour::new(chain.points.into_iter().collect()))
                    .collect();
                if rings.is_empty() {
                    None
                } else {
                    Some(Geometry::Polygon(Polygon::new(rings)))
                }
            }
            OutputKind::Lines => {
                let mut paths: Vec<LineString> = Vec::new();
                for chain in self.closed.into_iter().chain(self.open) {
                    let closed = chain.closed;
                    let mut points: Vec<Point> = chain.points.into_iter().collect();
                    if closed {
                        if let Some(first) = points.first().copied() {
                            points.push(first);
                        }
                    }
                    paths.push(LineString::new(points));
                }
                match paths.len() {
                    0 => None,
                    1 => paths.pop().map(Geometry::LineString),
                    _ => Some(Geometry::MultiLineString(MultiLineString::new(paths))),
                }
            }
            OutputKind::Points => None,
        }
    }
}
