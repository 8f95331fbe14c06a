// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-release target prediction.

use folio_layout::SpreadGeometry;
use folio_spread::SpreadIndex;
use kurbo::Rect;

/// Fling velocity (surface velocity units) beyond which a released drag steps
/// one spread in the fling direction.
pub const FLING_VELOCITY_THRESHOLD: f64 = 0.5;

/// Fraction of a neighboring spread that must be visible for a slow drag to
/// settle onto it instead of snapping back.
pub const NEIGHBOR_VISIBILITY_THRESHOLD: f64 = 0.1;

/// Where a drag started: the spread centered at the time and the viewport.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DragOrigin {
    pub(crate) spread: SpreadIndex,
    pub(crate) viewport: Rect,
}

/// Predicts the spread a released drag should settle on.
///
/// Starting from the currently centered spread: if the drag never left its
/// origin spread, a fling past [`FLING_VELOCITY_THRESHOLD`] steps one spread
/// in the fling direction; with negligible velocity, the neighbor in the
/// direction of motion wins if more than [`NEIGHBOR_VISIBILITY_THRESHOLD`] of
/// it is visible. The result is clamped into the spread range, producing
/// settle-on-nearest-spread behavior instead of raw momentum.
pub(crate) fn drag_target_spread(
    geometry: &SpreadGeometry,
    spread_count: usize,
    centered: Option<SpreadIndex>,
    origin: Option<DragOrigin>,
    viewport: Rect,
    velocity_x: f64,
) -> Option<SpreadIndex> {
    if spread_count == 0 {
        return None;
    }

    let mut target = centered.unwrap_or(0) as isize;

    if let Some(origin) = origin {
        if target == origin.spread as isize {
            if velocity_x > FLING_VELOCITY_THRESHOLD {
                target += 1;
            } else if velocity_x < -FLING_VELOCITY_THRESHOLD {
                target -= 1;
            } else if viewport.x0 > origin.viewport.x0
                && neighbor_fraction(geometry, target + 1, viewport)
                    > NEIGHBOR_VISIBILITY_THRESHOLD
            {
                target += 1;
            } else if viewport.x0 < origin.viewport.x0
                && neighbor_fraction(geometry, target - 1, viewport)
                    > NEIGHBOR_VISIBILITY_THRESHOLD
            {
                target -= 1;
            }
        }
    }

    Some(target.clamp(0, spread_count as isize - 1) as usize)
}

fn neighbor_fraction(geometry: &SpreadGeometry, spread: isize, viewport: Rect) -> f64 {
    if spread < 0 {
        0.0
    } else {
        geometry.visibility_fraction(spread as usize, viewport)
    }
}
