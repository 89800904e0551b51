// SPDX-License-Identifier: AGPL-3.0-or-later

//! Readers and writers for external geometry formats.

pub mod igc;
pub mod wkb;
