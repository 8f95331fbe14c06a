// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigation state machine.

use folio_layout::SpreadGeometry;
use folio_spread::{PageSet, SpreadConfiguration, SpreadIndex};
use kurbo::Rect;

use crate::centered::centered_spread;
use crate::drag::{DragOrigin, drag_target_spread};

/// One observed change to a page-index set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageDiff {
    /// The full set after the change.
    pub pages: PageSet,
    /// Indexes that entered the set.
    pub added: PageSet,
    /// Indexes that left the set.
    pub removed: PageSet,
}

impl PageDiff {
    fn from_change(old: &PageSet, new: PageSet) -> Option<Self> {
        if *old == new {
            return None;
        }
        let (added, removed) = PageSet::diff(old, &new);
        Some(Self {
            pages: new,
            added,
            removed,
        })
    }
}

/// Tracks centered, current, and visible page state across scroll events.
///
/// The tracker is pure bookkeeping: it never touches a surface. Hosts call
/// [`update_centered`](Self::update_centered) and
/// [`update_visible`](Self::update_visible) on every scroll tick,
/// [`settle`](Self::settle) when motion finishes, and forward any returned
/// [`PageDiff`] to their observers. State only resets on explicit
/// [`reset`](Self::reset) (a reload), never on its own.
#[derive(Clone, Debug, Default)]
pub struct NavigationTracker {
    centered_spread: Option<SpreadIndex>,
    centered_pages: PageSet,
    current_spread: Option<SpreadIndex>,
    current_pages: PageSet,
    visible_pages: PageSet,
    drag: Option<DragOrigin>,
}

impl NavigationTracker {
    /// Creates a tracker with no centered, current, or visible state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the spread currently under the viewport center, if any.
    #[must_use]
    pub fn centered_spread(&self) -> Option<SpreadIndex> {
        self.centered_spread
    }

    /// Returns the pages of the centered spread.
    #[must_use]
    pub fn centered_pages(&self) -> &PageSet {
        &self.centered_pages
    }

    /// Returns the settled spread snapshot, if any.
    #[must_use]
    pub fn current_spread(&self) -> Option<SpreadIndex> {
        self.current_spread
    }

    /// Returns the settled page snapshot.
    #[must_use]
    pub fn current_pages(&self) -> &PageSet {
        &self.current_pages
    }

    /// Returns the pages whose frames intersect the viewport.
    #[must_use]
    pub fn visible_pages(&self) -> &PageSet {
        &self.visible_pages
    }

    /// Recomputes the centered spread for `viewport`.
    ///
    /// Called on every scroll tick. Returns the centered-page diff when the
    /// centered set changed.
    pub fn update_centered(
        &mut self,
        geometry: &SpreadGeometry,
        config: &SpreadConfiguration,
        viewport: Rect,
    ) -> Option<PageDiff> {
        self.centered_spread = centered_spread(geometry.spread_frames(), viewport);

        let new_pages = self
            .centered_spread
            .map(|spread| config.page_indexes_for_spread(spread))
            .unwrap_or_default();

        let diff = PageDiff::from_change(&self.centered_pages, new_pages);
        if let Some(diff) = &diff {
            self.centered_pages = diff.pages.clone();
        }
        diff
    }

    /// Recomputes the visible page set for `viewport`.
    ///
    /// Called on every scroll tick. Returns the visible-page diff when the
    /// set changed.
    pub fn update_visible(
        &mut self,
        geometry: &SpreadGeometry,
        viewport: Rect,
    ) -> Option<PageDiff> {
        let new_pages = geometry.visible_pages(viewport, false);
        let diff = PageDiff::from_change(&self.visible_pages, new_pages);
        if let Some(diff) = &diff {
            self.visible_pages = diff.pages.clone();
        }
        diff
    }

    /// Snapshots the centered spread as current once motion has settled.
    ///
    /// Recomputes the centered spread first, so the in-motion diff (if the
    /// final tick moved it) comes back alongside the settled diff. Hosts
    /// deliver the first to the "changed during motion" observation point and
    /// the second to "finished changing".
    pub fn settle(
        &mut self,
        geometry: &SpreadGeometry,
        config: &SpreadConfiguration,
        viewport: Rect,
    ) -> (Option<PageDiff>, Option<PageDiff>) {
        let motion_diff = self.update_centered(geometry, config, viewport);

        self.current_spread = self.centered_spread;
        let new_pages = self
            .current_spread
            .map(|spread| config.page_indexes_for_spread(spread))
            .unwrap_or_default();

        let settled_diff = PageDiff::from_change(&self.current_pages, new_pages);
        if let Some(diff) = &settled_diff {
            self.current_pages = diff.pages.clone();
        }
        (motion_diff, settled_diff)
    }

    /// Captures the drag origin: the centered spread and viewport at the
    /// moment the user's finger went down.
    pub fn begin_drag(&mut self, viewport: Rect) {
        self.drag = Some(DragOrigin {
            spread: self.centered_spread.unwrap_or(0),
            viewport,
        });
    }

    /// Predicts the spread a drag released at `viewport` with horizontal
    /// fling velocity `velocity_x` should settle on.
    #[must_use]
    pub fn drag_target_spread(
        &self,
        geometry: &SpreadGeometry,
        config: &SpreadConfiguration,
        viewport: Rect,
        velocity_x: f64,
    ) -> Option<SpreadIndex> {
        drag_target_spread(
            geometry,
            config.spread_count(),
            self.centered_spread,
            self.drag,
            viewport,
            velocity_x,
        )
    }

    /// Clears every tracked quantity. Only an explicit reload does this.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
