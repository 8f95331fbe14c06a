// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom sessions: re-hosting the current spread into the magnifier surface.

use folio_layout::SpreadGeometry;
use folio_spread::{PageIndex, PageSet, SpreadConfiguration};
use kurbo::{Insets, Point, Rect, Size, Vec2};

use crate::host::{EngineHost, OverlayId};
use crate::slots::SlotPool;

/// The zoom surface's minimum (and resting) scale.
pub const MIN_ZOOM_SCALE: f64 = 1.0;

/// Scale at which the zoom background reaches its full target alpha.
pub const BACKGROUND_FADE_FULL_SCALE: f64 = 1.5;

/// How close to the minimum scale counts as fully zoomed out when deciding
/// whether to re-enable outer scrolling.
pub const ZOOM_END_EPSILON: f64 = 0.01;

/// Spring parameters for the double-tap zoom animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringSpec {
    /// Animation duration in seconds.
    pub duration: f64,
    /// Spring damping ratio.
    pub damping: f64,
    /// Initial spring velocity.
    pub initial_velocity: f64,
}

/// Spring used when a double tap zooms back out: faster and stiffer.
pub const ZOOM_OUT_SPRING: SpringSpec = SpringSpec {
    duration: 0.30,
    damping: 0.9,
    initial_velocity: 0.9,
};

/// Spring used when a double tap zooms in: slower and softer.
pub const ZOOM_IN_SPRING: SpringSpec = SpringSpec {
    duration: 0.40,
    damping: 0.8,
    initial_velocity: 0.75,
};

/// What a double tap should do to the zoom surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DoubleTapAction {
    /// Animate back to the minimum scale.
    ZoomOut {
        /// The scale to settle at.
        scale: f64,
    },
    /// Animate to the maximum scale, framing `rect` (zoom-content
    /// coordinates).
    ZoomIn {
        /// The region to zoom to, centered on the tap.
        rect: Rect,
    },
}

/// A resolved double-tap gesture: the action plus its animation spring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoubleTapZoom {
    /// What to animate.
    pub action: DoubleTapAction,
    /// How to animate it.
    pub spring: SpringSpec,
}

/// Resolves a double tap at `tap` (zoom-content coordinates) into a zoom
/// toggle, or `None` when zooming is disabled (`max_scale <= min_scale`).
///
/// Zoomed in → zoom out to the minimum. Zoomed out → zoom in to the maximum,
/// framing a region of the content centered on the tap.
#[must_use]
pub fn double_tap_zoom(
    scale: f64,
    min_scale: f64,
    max_scale: f64,
    tap: Point,
    content_size: Size,
) -> Option<DoubleTapZoom> {
    if min_scale >= max_scale {
        return None;
    }

    if scale > min_scale {
        Some(DoubleTapZoom {
            action: DoubleTapAction::ZoomOut { scale: min_scale },
            spring: ZOOM_OUT_SPRING,
        })
    } else {
        let target = Size::new(content_size.width / max_scale, content_size.height / max_scale);
        let origin = Point::new(tap.x - target.width / 2.0, tap.y - target.height / 2.0);
        Some(DoubleTapZoom {
            action: DoubleTapAction::ZoomIn {
                rect: Rect::from_origin_size(origin, target),
            },
            spring: ZOOM_IN_SPRING,
        })
    }
}

/// Interpolates the zoom background alpha for `scale`.
///
/// Linear from 0 at scale 1.0 up to `max_alpha` at
/// [`BACKGROUND_FADE_FULL_SCALE`], clamped to `max_alpha` beyond it.
#[must_use]
pub fn background_alpha(scale: f64, max_alpha: f64) -> f64 {
    let alpha = max_alpha / (BACKGROUND_FADE_FULL_SCALE - MIN_ZOOM_SCALE) * (scale - MIN_ZOOM_SCALE);
    alpha.clamp(0.0, max_alpha)
}

/// Computes content insets that keep unscaled zoom content pinned to
/// `target_frame`.
///
/// `bounds` is the zoom surface size, `content_frame` the zoomed content's
/// current frame, and `target_frame` where the content should sit at rest.
/// The target's offset is expressed as a proportion of the slack space around
/// it, and the same proportion of the slack around the current content frame
/// becomes the inset, so the content stays visually anchored while it grows.
#[must_use]
pub fn anchoring_insets(bounds: Size, content_frame: Rect, target_frame: Rect) -> Insets {
    let slack_x = bounds.width - target_frame.width();
    let slack_y = bounds.height - target_frame.height();
    let pct_x = if slack_x != 0.0 {
        target_frame.x0 / slack_x
    } else {
        1.0
    };
    let pct_y = if slack_y != 0.0 {
        target_frame.y0 / slack_y
    } else {
        1.0
    };

    let scaled_x = (bounds.width - content_frame.width()) * pct_x;
    let scaled_y = (bounds.height - content_frame.height()) * pct_y;

    let mut insets = Insets::ZERO;
    if bounds.height > content_frame.height() {
        insets.y0 = scaled_y;
        insets.y1 = scaled_y;
    }
    if bounds.width > content_frame.width() {
        insets.x0 = scaled_x;
        insets.x1 = scaled_x;
    }
    insets
}

/// The zoom session state machine.
///
/// Inactive (empty zooming set) or active over the current spread's pages.
/// Activation always passes through a reset, so slots never leak into two
/// surfaces at once.
#[derive(Debug, Default)]
pub struct ZoomSession {
    zooming: PageSet,
    target_background: Option<peniko::Color>,
    overlay: Option<OverlayId>,
    /// Union frame of the member slots in zoom-surface coordinates; the
    /// anchoring target.
    content_frame: Rect,
    /// Content-space offset mapping slot frames into zoom-content space.
    anchor_offset: Vec2,
}

impl ZoomSession {
    /// Creates an inactive session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pages currently hosted in the zoom surface.
    #[must_use]
    pub fn zooming_pages(&self) -> &PageSet {
        &self.zooming
    }

    /// Returns `true` while a session is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.zooming.is_empty()
    }

    /// Deactivates the session: re-homes member slots into the paging
    /// surface, forces the scale back to 1.0 (with synthesized begin/end
    /// notifications so observers always see balanced pairs), and clears all
    /// zoom surface state. Resetting an inactive session is a no-op.
    pub(crate) fn reset<H: EngineHost>(
        &mut self,
        host: &mut H,
        pool: &mut SlotPool,
        layout: Option<(&SpreadConfiguration, &SpreadGeometry)>,
    ) {
        if !self.is_active() {
            return;
        }

        if let Some((config, geometry)) = layout {
            let members: Vec<PageIndex> = self.zooming.iter().collect();
            for page in members {
                let Some(view) = pool.get(page).map(|slot| slot.view()) else {
                    continue;
                };
                if let Some(frame) = pool.restore_slot_layout(host, config, geometry, page) {
                    host.return_to_scroll_layer(view, frame);
                }
            }
        }

        if host.zoom_scale() != MIN_ZOOM_SCALE {
            self.begin(host);
            host.set_zoom_scale(MIN_ZOOM_SCALE);
            self.end(host);
        }

        host.set_max_zoom_scale(MIN_ZOOM_SCALE);
        host.set_zoom_background(None);
        if let Some(overlay) = self.overlay.take() {
            host.remove_overlay(overlay);
        }
        self.zooming.clear();
        self.target_background = None;
        self.content_frame = Rect::ZERO;
        self.anchor_offset = Vec2::ZERO;
    }

    /// Activates a session over `current`.
    ///
    /// A no-op when `current` already matches the zooming set, unless
    /// `force` (used after a full relayout, where the slots moved under the
    /// session). Always resets first.
    pub(crate) fn activate<H: EngineHost>(
        &mut self,
        host: &mut H,
        pool: &mut SlotPool,
        config: &SpreadConfiguration,
        geometry: &SpreadGeometry,
        current: &PageSet,
        force: bool,
    ) {
        if self.zooming == *current && !force {
            return;
        }

        log::debug!("zoom session over {current:?} (force={force})");
        self.reset(host, pool, Some((config, geometry)));

        let max_scale = current
            .first()
            .and_then(|page| config.property_for_page(page))
            .map_or(MIN_ZOOM_SCALE, |property| property.max_zoom_scale());
        host.set_max_zoom_scale(max_scale);

        self.zooming = current.clone();

        host.set_zoom_scale(MIN_ZOOM_SCALE);
        host.set_zoom_scroll_offset(Point::ZERO);
        host.set_zoom_insets(Insets::ZERO);

        let viewport = host.viewport();
        host.set_zoom_frame(viewport);
        let viewport_origin = viewport.origin().to_vec2();

        // Union of the member slots' on-screen rects, in zoom-surface coords.
        let mut union: Option<Rect> = None;
        for page in self.zooming.iter() {
            if let Some(slot) = pool.get(page) {
                let frame = slot.frame() - viewport_origin;
                union = Some(match union {
                    Some(combined) => combined.union(frame),
                    None => frame,
                });
            }
        }
        let union = union.unwrap_or(Rect::ZERO);

        host.set_zoom_content_size(union.size());
        self.content_frame = union;
        self.anchor_offset = viewport_origin + union.origin().to_vec2();

        for page in self.zooming.iter() {
            if let Some(slot) = pool.get_mut(page) {
                slot.set_zooming(true);
                let local = slot.frame() - self.anchor_offset;
                host.adopt_into_zoom_layer(slot.view(), local);
            }
        }

        host.set_zoom_insets(anchoring_insets(
            viewport.size(),
            union.size().to_rect(),
            union,
        ));

        self.update_overlay(host, pool);
    }

    /// Requests (or refreshes) the provider overlay for the zoomed spread.
    pub(crate) fn update_overlay<H: EngineHost>(&mut self, host: &mut H, pool: &SlotPool) {
        let mut page_frames: Vec<(PageIndex, Rect)> = Vec::new();
        for page in self.zooming.iter() {
            if let Some(slot) = pool.get(page) {
                page_frames.push((page, slot.frame() - self.anchor_offset));
            }
        }

        let new_overlay = if page_frames.is_empty() {
            None
        } else {
            host.overlay_for_spread(self.content_frame.size(), &page_frames)
        };

        if new_overlay != self.overlay {
            if let Some(old) = self.overlay.take() {
                host.remove_overlay(old);
            }
            self.overlay = new_overlay;
        }
        if let Some(overlay) = self.overlay {
            host.install_overlay(overlay, self.content_frame.size().to_rect());
        }
    }

    /// Handles the zoom surface starting to change scale.
    pub(crate) fn begin<H: EngineHost>(&mut self, host: &mut H) {
        if self.zooming.is_empty() {
            return;
        }
        let scale = host.zoom_scale();
        host.zoom_started(&self.zooming, scale);
        self.target_background = Some(host.zoom_background(&self.zooming));
    }

    /// Handles a zoom scale change: fades the background, re-anchors the
    /// content, and notifies observers.
    pub(crate) fn scale_changed<H: EngineHost>(&mut self, host: &mut H) {
        let color = match self.target_background {
            Some(color) => color,
            None => {
                let color = host.zoom_background(&self.zooming);
                self.target_background = Some(color);
                color
            }
        };

        let scale = host.zoom_scale();
        let max_alpha = f64::from(color.components[3]);
        let alpha = background_alpha(scale, max_alpha);
        host.set_zoom_background(Some(color.with_alpha(alpha as f32)));

        self.reanchor(host);

        if !self.zooming.is_empty() {
            host.zoom_changed(&self.zooming, scale);
        }
    }

    /// Handles the zoom gesture/animation ending: outer scrolling comes back
    /// only once the scale has returned to (near) the minimum.
    pub(crate) fn end<H: EngineHost>(&mut self, host: &mut H) {
        let scale = host.zoom_scale();
        host.set_scroll_enabled(scale <= MIN_ZOOM_SCALE + ZOOM_END_EPSILON);
        if !self.zooming.is_empty() {
            host.zoom_ended(&self.zooming, scale);
        }
    }

    /// Recomputes the anchoring insets from the host's current zoom state.
    /// Called on every zoom layout pass.
    pub(crate) fn reanchor<H: EngineHost>(&mut self, host: &mut H) {
        if self.zooming.is_empty() {
            return;
        }
        let viewport = host.viewport();
        host.set_zoom_insets(anchoring_insets(
            viewport.size(),
            host.zoom_content_frame(),
            self.content_frame,
        ));
    }
}
