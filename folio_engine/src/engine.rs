// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine: event handling, deferred operations, and orchestration.

use std::collections::VecDeque;

use folio_layout::SpreadGeometry;
use folio_nav::NavigationTracker;
use folio_spread::{PageIndex, PageSet, SpreadConfiguration};
use kurbo::{Point, Size};

use crate::host::{EngineHost, SettleToken};
use crate::slots::{PageSlot, SlotPool};
use crate::zoom::{self, DoubleTapZoom, MIN_ZOOM_SCALE, ZoomSession};

/// Debounce (seconds) applied before settling when deceleration ended while
/// the viewport was scrolled out of bounds: a bounce-back deceleration is
/// probably coming, and settling twice looks glitchy. The settle still fires
/// so motion always ends in a settled notification.
pub const SETTLE_DEBOUNCE: f64 = 0.2;

/// A host-facing operation deferred to the next `run_pending` turn.
#[derive(Clone, Debug)]
enum Command {
    Reload { target: Option<PageIndex> },
    JumpToPage { page: PageIndex, animated: bool },
    ReconfigureVisiblePages,
    ReconfigureOverlay,
}

/// The spread viewer engine.
///
/// Owns the configuration, geometry cache, navigation tracker, slot pool, and
/// zoom session. The host reports events (`set_bounds`, `scrolled`, the drag
/// and zoom callbacks) and the engine drives the surface back through the
/// [`EngineHost`] it is handed on each call; it never stores the host.
///
/// Mutating operations that are not direct event responses ([`reload`],
/// [`jump_to_page`], [`reconfigure_visible_pages`], [`reconfigure_overlay`])
/// enqueue onto an internal FIFO and run when the host next calls
/// [`run_pending`], so calling them from inside another state mutation is
/// never re-entrant.
///
/// [`reload`]: Self::reload
/// [`jump_to_page`]: Self::jump_to_page
/// [`reconfigure_visible_pages`]: Self::reconfigure_visible_pages
/// [`reconfigure_overlay`]: Self::reconfigure_overlay
/// [`run_pending`]: Self::run_pending
#[derive(Debug, Default)]
pub struct SpreadEngine {
    container: Size,
    config: Option<SpreadConfiguration>,
    geometry: Option<SpreadGeometry>,
    nav: NavigationTracker,
    pool: SlotPool,
    zoom: ZoomSession,
    /// Skips post-scroll reconciliation while a forced relayout is underway.
    performing_layout: bool,
    dragging: bool,
    decelerating: bool,
    pending: VecDeque<Command>,
    pending_settle: Option<SettleToken>,
    next_settle_token: u64,
}

impl SpreadEngine {
    /// Creates an engine with no configuration. The first
    /// [`set_bounds`](Self::set_bounds) fetches one from the provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ---- read-only access ----

    /// Returns the active configuration, if one has been fetched.
    #[must_use]
    pub fn configuration(&self) -> Option<&SpreadConfiguration> {
        self.config.as_ref()
    }

    /// Returns the current geometry cache, if laid out.
    #[must_use]
    pub fn geometry(&self) -> Option<&SpreadGeometry> {
        self.geometry.as_ref()
    }

    /// Returns the settled current pages.
    #[must_use]
    pub fn current_pages(&self) -> &PageSet {
        self.nav.current_pages()
    }

    /// Returns the pages intersecting the viewport.
    #[must_use]
    pub fn visible_pages(&self) -> &PageSet {
        self.nav.visible_pages()
    }

    /// Returns the pages hosted in the zoom surface.
    #[must_use]
    pub fn zooming_pages(&self) -> &PageSet {
        self.zoom.zooming_pages()
    }

    /// Returns the slot for `page` if its view is loaded.
    #[must_use]
    pub fn slot_for_page(&self, page: PageIndex) -> Option<&PageSlot> {
        self.pool.get(page)
    }

    /// Returns `true` while a forced relayout awaits its transition
    /// completion.
    #[must_use]
    pub fn is_performing_layout(&self) -> bool {
        self.performing_layout
    }

    // ---- deferred host-facing operations ----

    /// Requests a full reload: all slots are destroyed, the configuration is
    /// refetched, and layout rebuilds toward `target` (or the page that was
    /// centered). Deferred to the next [`run_pending`](Self::run_pending).
    pub fn reload(&mut self, target: Option<PageIndex>) {
        self.pending.push_back(Command::Reload { target });
    }

    /// Requests a scroll to the spread containing `page` (clamped into the
    /// page range; a no-op without a configuration). Deferred to the next
    /// [`run_pending`](Self::run_pending).
    pub fn jump_to_page(&mut self, page: PageIndex, animated: bool) {
        self.pending.push_back(Command::JumpToPage { page, animated });
    }

    /// Requests the provider's configure callback to re-run on every loaded
    /// slot. Deferred to the next [`run_pending`](Self::run_pending).
    pub fn reconfigure_visible_pages(&mut self) {
        self.pending.push_back(Command::ReconfigureVisiblePages);
    }

    /// Requests a refresh of the zoomed spread's overlay. Deferred to the
    /// next [`run_pending`](Self::run_pending).
    pub fn reconfigure_overlay(&mut self) {
        self.pending.push_back(Command::ReconfigureOverlay);
    }

    /// Executes queued operations in FIFO order. Hosts call this once per
    /// event-loop turn.
    pub fn run_pending<H: EngineHost>(&mut self, host: &mut H) {
        while let Some(command) = self.pending.pop_front() {
            self.execute(host, command);
        }
    }

    fn execute<H: EngineHost>(&mut self, host: &mut H, command: Command) {
        match command {
            Command::Reload { target } => {
                let target = target
                    .or_else(|| self.nav.centered_pages().first())
                    .unwrap_or(0);
                log::debug!("reload toward page {target}");
                self.pool.clear(host);
                self.nav.reset();
                self.config = None;
                self.geometry = None;
                self.relayout(host, self.container, target);
            }
            Command::JumpToPage { page, animated } => {
                let offset = {
                    let (Some(config), Some(geometry)) =
                        (self.config.as_ref(), self.geometry.as_ref())
                    else {
                        return;
                    };
                    if config.page_count() == 0 {
                        return;
                    }
                    let page = page.min(config.page_count() - 1);
                    let Some(spread) = config.spread_index_for_page(page) else {
                        return;
                    };
                    geometry.scroll_offset_for_spread(spread)
                };
                log::debug!("jump to page {page} (animated={animated})");
                host.set_scroll_offset(offset, animated);
                if !animated {
                    self.finish_scrolling(host);
                }
            }
            Command::ReconfigureVisiblePages => {
                for slot in self.pool.iter() {
                    host.configure_page(slot);
                }
            }
            Command::ReconfigureOverlay => {
                self.zoom.update_overlay(host, &self.pool);
            }
        }
    }

    // ---- layout events ----

    /// Reports the container size. Lays out (refetching the configuration on
    /// size change) and snaps back to the page that was centered.
    ///
    /// A relayout disables scrolling until the host reports
    /// [`layout_transition_completed`](Self::layout_transition_completed).
    pub fn set_bounds<H: EngineHost>(&mut self, host: &mut H, bounds: Size) {
        let target = self.nav.centered_pages().first().unwrap_or(0);
        self.relayout(host, bounds, target);
    }

    /// Finalizes a relayout once the host's layout transition has visually
    /// settled: re-enables scrolling and force-activates the zoom session
    /// over the current spread.
    pub fn layout_transition_completed<H: EngineHost>(&mut self, host: &mut H) {
        host.set_scroll_enabled(true);
        self.activate_zoom(host, true);
        self.performing_layout = false;
    }

    fn relayout<H: EngineHost>(&mut self, host: &mut H, bounds: Size, target_page: PageIndex) {
        let mut new_config = self.config.clone();
        if self.config.is_none() || self.container != bounds {
            new_config = Some(host.spread_configuration(bounds));
        }
        let will_relayout = self.container != bounds || new_config != self.config;

        if will_relayout {
            // Member slots re-home at their pre-relayout frames; the new
            // session is activated after the transition completes.
            let layout = self.config.as_ref().zip(self.geometry.as_ref());
            self.zoom.reset(host, &mut self.pool, layout);
        }

        self.container = bounds;
        self.config = new_config;

        if !will_relayout {
            return;
        }

        let config = self
            .config
            .as_ref()
            .expect("a spread configuration is required for layout");

        self.performing_layout = true;
        log::debug!(
            "relayout {}x{} {config}",
            bounds.width,
            bounds.height
        );
        host.set_scroll_enabled(false);

        let geometry = SpreadGeometry::new(config, bounds);
        host.set_content_size(geometry.content_size());

        let target_spread = config.spread_index_for_page(target_page).unwrap_or(0);
        host.set_scroll_offset(geometry.scroll_offset_for_spread(target_spread), false);

        self.geometry = Some(geometry);
        let geometry = self.geometry.as_ref().expect("geometry just computed");

        let viewport = host.viewport();
        if let Some(diff) = self.nav.update_visible(geometry, viewport) {
            host.visible_pages_changed(&diff.pages, &diff.added, &diff.removed);
        }
        self.pool.reconcile(
            host,
            config,
            geometry,
            self.nav.visible_pages(),
            self.zoom.zooming_pages(),
        );
        let (motion, settled) = self.nav.settle(geometry, config, viewport);
        if let Some(diff) = motion {
            host.current_pages_changed(&diff.pages, &diff.added, &diff.removed);
        }
        if let Some(diff) = settled {
            host.current_pages_finished_changing(&diff.pages, &diff.added, &diff.removed);
        }
    }

    // ---- scroll events ----

    /// Reports a scroll tick. Only user-driven motion (dragging or
    /// decelerating) updates state; programmatic animated scrolls settle via
    /// [`scroll_animation_ended`](Self::scroll_animation_ended).
    pub fn scrolled<H: EngineHost>(&mut self, host: &mut H) {
        if !(self.dragging || self.decelerating) {
            return;
        }
        let (Some(config), Some(geometry)) = (self.config.as_ref(), self.geometry.as_ref())
        else {
            return;
        };

        let viewport = host.viewport();
        if let Some(diff) = self.nav.update_centered(geometry, config, viewport) {
            host.current_pages_changed(&diff.pages, &diff.added, &diff.removed);
        }
        if let Some(diff) = self.nav.update_visible(geometry, viewport) {
            host.visible_pages_changed(&diff.pages, &diff.added, &diff.removed);
        }
        self.pool.reconcile(
            host,
            config,
            geometry,
            self.nav.visible_pages(),
            self.zoom.zooming_pages(),
        );
    }

    /// Reports that the user started dragging. Captures the drag origin and
    /// holds zooming off while the outer surface moves.
    pub fn drag_began<H: EngineHost>(&mut self, host: &mut H) {
        let Some(config) = self.config.as_ref() else {
            return;
        };
        if config.spread_count() == 0 {
            return;
        }
        self.dragging = true;
        self.nav.begin_drag(host.viewport());
        host.set_max_zoom_scale(MIN_ZOOM_SCALE);
    }

    /// Reports an imminent drag release with horizontal fling velocity.
    /// Returns the content offset the deceleration should target, settling on
    /// the nearest meaningful spread instead of raw momentum.
    #[must_use]
    pub fn drag_will_end<H: EngineHost>(&mut self, host: &mut H, velocity_x: f64) -> Point {
        let viewport = host.viewport();
        let (Some(config), Some(geometry)) = (self.config.as_ref(), self.geometry.as_ref())
        else {
            return viewport.origin();
        };
        match self
            .nav
            .drag_target_spread(geometry, config, viewport, velocity_x)
        {
            Some(spread) => geometry.scroll_offset_for_spread(spread),
            None => viewport.origin(),
        }
    }

    /// Reports the end of the drag gesture. When no deceleration follows,
    /// the scroll settles immediately.
    pub fn drag_ended<H: EngineHost>(&mut self, host: &mut H, will_decelerate: bool) {
        self.dragging = false;
        if !will_decelerate {
            self.finish_scrolling(host);
        }
    }

    /// Reports the start of deceleration. Any pending settle is superseded.
    pub fn deceleration_began<H: EngineHost>(&mut self, host: &mut H) {
        self.decelerating = true;
        if let Some(stale) = self.pending_settle.take() {
            host.cancel_settle(stale);
        }
    }

    /// Reports the end of deceleration and schedules the settle.
    ///
    /// A viewport outside the content bounds suggests a bounce-back
    /// deceleration is coming, so the settle is debounced by
    /// [`SETTLE_DEBOUNCE`]; otherwise it is requested immediately. Either way
    /// the request carries a fresh token that supersedes any outstanding one.
    pub fn deceleration_ended<H: EngineHost>(&mut self, host: &mut H) {
        self.decelerating = false;

        let viewport = host.viewport();
        let out_of_bounds = self.geometry.as_ref().is_some_and(|geometry| {
            let content = geometry.content_size();
            viewport.x0 < 0.0
                || viewport.x1 > content.width
                || viewport.y0 < 0.0
                || viewport.y1 > content.height
        });
        let delay = if out_of_bounds { SETTLE_DEBOUNCE } else { 0.0 };

        if let Some(stale) = self.pending_settle.take() {
            host.cancel_settle(stale);
        }
        self.next_settle_token += 1;
        let token = SettleToken(self.next_settle_token);
        self.pending_settle = Some(token);
        host.request_settle(delay, token);
    }

    /// Delivers a scheduled settle. Stale tokens (superseded by a newer
    /// request) are ignored.
    pub fn settle_fired<H: EngineHost>(&mut self, host: &mut H, token: SettleToken) {
        if self.pending_settle != Some(token) {
            return;
        }
        self.pending_settle = None;
        self.finish_scrolling(host);
    }

    /// Reports the end of a programmatic animated scroll.
    pub fn scroll_animation_ended<H: EngineHost>(&mut self, host: &mut H) {
        self.finish_scrolling(host);
    }

    fn finish_scrolling<H: EngineHost>(&mut self, host: &mut H) {
        // A forced relayout is underway; its completion will reconcile.
        if self.performing_layout {
            return;
        }
        let (Some(config), Some(geometry)) = (self.config.as_ref(), self.geometry.as_ref())
        else {
            return;
        };

        let viewport = host.viewport();
        if let Some(diff) = self.nav.update_visible(geometry, viewport) {
            host.visible_pages_changed(&diff.pages, &diff.added, &diff.removed);
        }
        self.pool.reconcile(
            host,
            config,
            geometry,
            self.nav.visible_pages(),
            self.zoom.zooming_pages(),
        );
        let (motion, settled) = self.nav.settle(geometry, config, viewport);
        if let Some(diff) = motion {
            host.current_pages_changed(&diff.pages, &diff.added, &diff.removed);
        }
        if let Some(diff) = settled {
            host.current_pages_finished_changing(&diff.pages, &diff.added, &diff.removed);
        }

        self.zoom.activate(
            host,
            &mut self.pool,
            config,
            geometry,
            self.nav.current_pages(),
            false,
        );

        // Scroll start collapsed the zoom ceiling; restore it for the spread
        // we settled on even when the zoom session itself did not change.
        let max_scale = self
            .nav
            .current_spread()
            .and_then(|spread| config.property(spread))
            .map_or(MIN_ZOOM_SCALE, |property| property.max_zoom_scale());
        host.set_max_zoom_scale(max_scale);
    }

    fn activate_zoom<H: EngineHost>(&mut self, host: &mut H, force: bool) {
        let (Some(config), Some(geometry)) = (self.config.as_ref(), self.geometry.as_ref())
        else {
            return;
        };
        self.zoom.activate(
            host,
            &mut self.pool,
            config,
            geometry,
            self.nav.current_pages(),
            force,
        );
    }

    // ---- zoom events ----

    /// Reports that the zoom surface began changing scale.
    pub fn zoom_began<H: EngineHost>(&mut self, host: &mut H) {
        self.zoom.begin(host);
    }

    /// Reports a zoom scale change.
    pub fn zoomed<H: EngineHost>(&mut self, host: &mut H) {
        self.zoom.scale_changed(host);
    }

    /// Reports that the zoom gesture or animation finished.
    pub fn zoom_ended<H: EngineHost>(&mut self, host: &mut H) {
        self.zoom.end(host);
    }

    /// Reports a zoom surface layout pass; re-anchors the zoom content.
    pub fn zoom_layout_pass<H: EngineHost>(&mut self, host: &mut H) {
        self.zoom.reanchor(host);
    }

    /// Resolves a double tap at `tap` (zoom-content coordinates) into the
    /// zoom animation the host should run, or `None` when no session is
    /// active or zooming is disabled for the current spread.
    #[must_use]
    pub fn double_tap_zoom<H: EngineHost>(&self, host: &H, tap: Point) -> Option<DoubleTapZoom> {
        if !self.zoom.is_active() {
            return None;
        }
        let config = self.config.as_ref()?;
        let max_scale = self
            .nav
            .current_spread()
            .and_then(|spread| config.property(spread))
            .map_or(MIN_ZOOM_SCALE, |property| property.max_zoom_scale());
        zoom::double_tap_zoom(
            host.zoom_scale(),
            MIN_ZOOM_SCALE,
            max_scale,
            tap,
            host.zoom_content_frame().size(),
        )
    }
}
