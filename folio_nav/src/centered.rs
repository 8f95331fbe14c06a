// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Centered-spread determination.

use folio_layout::contains_rect;
use folio_spread::SpreadIndex;
use kurbo::Rect;

/// How far the viewport is inflated before containment tests, to keep
/// floating-point rounding at frame boundaries from flickering the result.
pub const CENTER_EPSILON: f64 = 2.0;

/// Determines which spread sits under the center of `viewport`.
///
/// The viewport is inflated by [`CENTER_EPSILON`] first. An empty frame list
/// yields `None`. A first or last frame entirely inside the inflated viewport
/// short-circuits to that end of the sequence; this is what keeps the ends
/// selected while the viewport overshoots past them. Otherwise the ordered,
/// non-overlapping frames are binary-searched for the one containing the
/// viewport center, stepping by the probed frame's horizontal midpoint; if the
/// center falls between frames (spacing gaps), the last probed index is the
/// answer.
#[must_use]
pub fn centered_spread(spread_frames: &[Rect], viewport: Rect) -> Option<SpreadIndex> {
    if spread_frames.is_empty() {
        return None;
    }

    let visible = viewport.inflate(CENTER_EPSILON, CENTER_EPSILON);

    if contains_rect(visible, spread_frames[0]) {
        return Some(0);
    }
    if contains_rect(visible, spread_frames[spread_frames.len() - 1]) {
        return Some(spread_frames.len() - 1);
    }

    let center = visible.center();
    let mut lo: isize = 0;
    let mut hi: isize = spread_frames.len() as isize - 1;

    loop {
        let probe = ((lo + hi) / 2).max(0) as usize;
        let frame = spread_frames[probe];
        if frame.contains(center) {
            return Some(probe);
        }
        if lo > hi {
            // Bounds crossed without an exact hit: the center is in a gap
            // between adjacent frames. The last probed index is the closest
            // defensible answer.
            return Some(probe);
        }
        if center.x < frame.center().x {
            hi = probe as isize - 1;
        } else {
            lo = probe as isize + 1;
        }
    }
}
