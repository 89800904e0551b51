// SPDX-License-Identifier: AGPL-3.0-or-later

//! Ordered scan line storage on a splay tree.

use libreda_splay::SplaySet;
use std::cmp::Ordering;

/// The edges currently crossing the sweep line, ordered by a caller
/// supplied comparator.
///
/// Neighbor queries drive the intersection tests: only edges adjacent in
/// this order can touch without the sweep noticing elsewhere.
pub struct SplayScanLine<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    content: SplaySet<T, C>,
}

impl<T, C> SplayScanLine<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Create an empty scan line.
    pub fn new(comparator: C) -> SplayScanLine<T, C> {
        SplayScanLine {
            content: SplaySet::new(comparator),
        }
    }

    /// Check if an equal element is in the set.
    pub fn contains(&self, t: &T) -> bool {
        self.content.contains(t)
    }

    /// The element directly above `t`.
    pub fn next(&self, t: &T) -> Option<&T> {
        self.content.next(t)
    }

    /// The element directly below `t`.
    pub fn prev(&self, t: &T) -> Option<&T> {
        self.content.prev(t)
    }

    /// Insert an element. Returns `false` when an equal element was present.
    pub fn insert(&mut self, t: T) -> bool {
        self.content.insert(t)
    }

    /// Remove an element. Returns `false` when no equal element was present.
    pub fn remove(&mut self, t: &T) -> bool {
        self.content.remove(t)
    }
}
