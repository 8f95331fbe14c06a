// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cached derived geometry for one configuration and container size.

use folio_spread::{PageIndex, PageSet, SpreadConfiguration, SpreadIndex};
use kurbo::{Point, Rect, Size};

use crate::frames;

/// Precomputed spread and page frames for one `(configuration, container)`
/// pair.
///
/// The cache is immutable: rebuild it wholesale whenever the configuration is
/// replaced or the container resizes. All queries delegate to the pure
/// functions in this crate.
#[derive(Clone, Debug)]
pub struct SpreadGeometry {
    container: Size,
    spread_frames: Vec<Rect>,
    page_frames: Vec<Rect>,
}

impl SpreadGeometry {
    /// Computes the geometry for `config` inside `container`.
    #[must_use]
    pub fn new(config: &SpreadConfiguration, container: Size) -> Self {
        let spread_frames = frames::spread_frames(config, container);
        let page_frames = frames::page_frames(config, &spread_frames);
        Self {
            container,
            spread_frames,
            page_frames,
        }
    }

    /// Returns the container size the geometry was computed for.
    #[must_use]
    pub fn container(&self) -> Size {
        self.container
    }

    /// Returns all spread frames in spread-index order.
    #[must_use]
    pub fn spread_frames(&self) -> &[Rect] {
        &self.spread_frames
    }

    /// Returns all page frames in page-index order.
    #[must_use]
    pub fn page_frames(&self) -> &[Rect] {
        &self.page_frames
    }

    /// Returns one spread's frame, or `None` when out of range.
    #[must_use]
    pub fn spread_frame(&self, spread: SpreadIndex) -> Option<Rect> {
        self.spread_frames.get(spread).copied()
    }

    /// Returns one page's maximum frame, or `None` when out of range.
    #[must_use]
    pub fn page_frame(&self, page: PageIndex) -> Option<Rect> {
        self.page_frames.get(page).copied()
    }

    /// Returns the scrollable content size.
    #[must_use]
    pub fn content_size(&self) -> Size {
        frames::content_size(&self.spread_frames, self.container)
    }

    /// Returns the scroll offset that presents `spread`.
    #[must_use]
    pub fn scroll_offset_for_spread(&self, spread: SpreadIndex) -> Point {
        frames::scroll_offset_for_spread(spread, &self.spread_frames, self.container)
    }

    /// Returns the visible fraction of `spread` within `visible_rect`.
    #[must_use]
    pub fn visibility_fraction(&self, spread: SpreadIndex, visible_rect: Rect) -> f64 {
        frames::visibility_fraction(spread, visible_rect, &self.spread_frames)
    }

    /// Collects the pages intersecting (or contained in) `visible_rect`.
    #[must_use]
    pub fn visible_pages(&self, visible_rect: Rect, fully_visible: bool) -> PageSet {
        frames::visible_pages(visible_rect, &self.page_frames, fully_visible)
    }
}
