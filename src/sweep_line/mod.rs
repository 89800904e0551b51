// SPDX-License-Identifier: AGPL-3.0-or-later

//! Building blocks of the sweep line pass: the event type, the orderings
//! that keep queue and scan line consistent, and the in-place splitting of
//! intersecting edges.

pub mod compare_segments;
pub mod possible_intersection;
pub mod splay_scanline;
pub mod sweep_event;
