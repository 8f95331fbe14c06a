// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts between the engine and its host: the data provider, the change
//! observer, and the imperative rendering surface.
//!
//! The engine never stores a host reference. Every event entry point takes
//! `&mut impl EngineHost` for the duration of the call, which makes the
//! non-owning relationship explicit: the host owns the provider, observer,
//! and surface; the engine owns only its own state.

use folio_spread::{PageIndex, PageSet, SpreadConfiguration};
use kurbo::{Insets, Point, Rect, Size, Vec2};
use peniko::Color;

use crate::slots::PageSlot;

/// Recycling compatibility tag for page content.
///
/// Slots are only reused across pages that declare the same content type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContentType(pub u32);

/// Host-allocated handle to one live page content view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageViewId(pub u64);

/// Host-allocated handle to a spread overlay view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u64);

/// Engine-allocated token identifying one scheduled settle callback.
///
/// A new token supersedes any outstanding one; the engine ignores
/// [`SpreadEngine::settle_fired`](crate::SpreadEngine::settle_fired) calls
/// carrying a stale token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SettleToken(pub u64);

/// Supplies the engine with configuration and page content.
///
/// `spread_configuration`, `configure_page`, and `content_type` are required;
/// the rest have universally applicable defaults. All callbacks run
/// synchronously on the engine's single event context; `configure_page` in
/// particular runs during scrolling and must not block; hand long-running
/// content preparation off asynchronously and fill the view in later.
///
/// Callbacks must not re-enter the engine's mutating operations.
pub trait PageProvider {
    /// Produces a fresh configuration for the given container size.
    ///
    /// Called whenever the container size changes or a reload requires a new
    /// layout. The result replaces the previous configuration wholesale.
    fn spread_configuration(&mut self, container: Size) -> SpreadConfiguration;

    /// Fills content into a slot that was just bound to its page index.
    ///
    /// The slot's page index is final; its frame is not (size negotiation
    /// happens afterwards).
    fn configure_page(&mut self, slot: &PageSlot);

    /// Declares the content type of a page, controlling slot reuse.
    fn content_type(&mut self, page: PageIndex) -> ContentType;

    /// How many pages before the visible set to keep loaded.
    fn preload_before(&mut self, _visible: &PageSet) -> usize {
        2
    }

    /// How many pages after the visible set to keep loaded.
    fn preload_after(&mut self, _visible: &PageSet) -> usize {
        6
    }

    /// Final say over the preload window.
    ///
    /// `window` is the visible set expanded by the before/after counts. The
    /// returned set replaces it (and is then clamped to the page range).
    fn adjust_preload_window(&mut self, _visible: &PageSet, window: PageSet) -> PageSet {
        window
    }

    /// The color the zoom surface background fades toward while zooming.
    fn zoom_background(&mut self, _zooming: &PageSet) -> Color {
        Color::from_rgba8(0, 0, 0, 178)
    }

    /// An optional overlay for the zoomed spread.
    ///
    /// `size` is the zoom content size; `page_frames` maps each zooming page
    /// to its frame in zoom-content coordinates. Returning `None` installs
    /// nothing.
    fn overlay_for_spread(
        &mut self,
        _size: Size,
        _page_frames: &[(PageIndex, Rect)],
    ) -> Option<OverlayId> {
        None
    }
}

/// Receives change notifications. Every method is optional.
///
/// The three page-set notifications are distinct observation points:
/// visibility changes on every tick, current-page changes fire during motion,
/// and the finished variant fires once after motion settles.
pub trait SpreadObserver {
    /// The set of pages intersecting the viewport changed.
    fn visible_pages_changed(&mut self, _pages: &PageSet, _added: &PageSet, _removed: &PageSet) {}

    /// The centered pages changed while scrolling or relayout is in motion.
    fn current_pages_changed(&mut self, _pages: &PageSet, _added: &PageSet, _removed: &PageSet) {}

    /// The current pages changed and all scrolling/animation has settled.
    fn current_pages_finished_changing(
        &mut self,
        _pages: &PageSet,
        _added: &PageSet,
        _removed: &PageSet,
    ) {
    }

    /// A zoom session started changing scale; `scale` is the starting scale.
    fn zoom_started(&mut self, _pages: &PageSet, _scale: f64) {}

    /// The zoom scale changed.
    fn zoom_changed(&mut self, _pages: &PageSet, _scale: f64) {}

    /// The zoom gesture or animation finished at `scale`.
    fn zoom_ended(&mut self, _pages: &PageSet, _scale: f64) {}
}

/// The imperative rendering surface the engine drives.
///
/// Two surfaces hide behind this trait: the outer horizontally paging scroll
/// surface (content size, offset, scroll enabling, settle timers, page view
/// slots) and the independent zoom surface pages re-home into while their
/// spread is current. Commands are idempotent state setters; the engine may
/// re-issue the current value.
///
/// Coordinates: `viewport` and page frames live in the paging surface's
/// content space. Zoom-layer frames live in zoom-content space with the
/// origin at the zoomed content's top-left.
pub trait RenderHost {
    // ---- outer paging surface ----

    /// The currently visible rect in content coordinates.
    fn viewport(&self) -> Rect;

    /// Resizes the scrollable content.
    fn set_content_size(&mut self, size: Size);

    /// Scrolls to `offset`, optionally animated. An animated scroll must
    /// report [`SpreadEngine::scroll_animation_ended`](crate::SpreadEngine::scroll_animation_ended)
    /// when it finishes.
    fn set_scroll_offset(&mut self, offset: Point, animated: bool);

    /// Enables or disables user scrolling of the paging surface.
    fn set_scroll_enabled(&mut self, enabled: bool);

    /// Schedules [`SpreadEngine::settle_fired`](crate::SpreadEngine::settle_fired)
    /// to be called with `token` after `delay` seconds.
    fn request_settle(&mut self, delay: f64, token: SettleToken);

    /// Cancels a previously requested settle callback, if still pending.
    fn cancel_settle(&mut self, token: SettleToken);

    // ---- page view slots ----

    /// Creates a content view for `page` seeded with `frame`.
    ///
    /// Seeding the initial frame keeps new views from animating in from the
    /// origin.
    fn create_page_view(&mut self, page: PageIndex, content: ContentType, frame: Rect)
    -> PageViewId;

    /// Destroys a content view evicted from the preload window.
    fn destroy_page_view(&mut self, view: PageViewId);

    /// Size negotiation: the view's preferred size within `max`.
    fn preferred_page_size(&mut self, _view: PageViewId, max: Size) -> Size {
        max
    }

    /// Positions a view in content coordinates.
    fn set_page_frame(&mut self, view: PageViewId, frame: Rect);

    /// Sets a view's opacity.
    fn set_page_alpha(&mut self, view: PageViewId, alpha: f64);

    /// Sets a view's horizontal ghost offset (applied on top of its frame).
    fn set_page_translation(&mut self, view: PageViewId, translation: Vec2);

    // ---- zoom surface ----

    /// Positions the zoom surface over the viewport, in content coordinates.
    fn set_zoom_frame(&mut self, frame: Rect);

    /// The zoom surface's current scale.
    fn zoom_scale(&self) -> f64;

    /// Sets the zoom scale programmatically. The minimum scale is always 1.0.
    fn set_zoom_scale(&mut self, scale: f64);

    /// Sets the maximum zoom scale; 1.0 disables zooming.
    fn set_max_zoom_scale(&mut self, scale: f64);

    /// Sets the zoom surface's scroll offset (pan within the zoomed content).
    fn set_zoom_scroll_offset(&mut self, offset: Point);

    /// Resizes the zoom surface's scrollable content.
    fn set_zoom_content_size(&mut self, size: Size);

    /// Sets the zoom surface's content insets (the anchoring mechanism).
    fn set_zoom_insets(&mut self, insets: Insets);

    /// Sets the zoom surface background, `None` for clear.
    fn set_zoom_background(&mut self, color: Option<Color>);

    /// The zoomed content's current frame within the zoom surface, reflecting
    /// scale and pan.
    fn zoom_content_frame(&self) -> Rect;

    /// Re-homes a page view into the zoom layer at `frame` (zoom-content
    /// coordinates).
    fn adopt_into_zoom_layer(&mut self, view: PageViewId, frame: Rect);

    /// Returns a page view to the paging surface at `frame` (content
    /// coordinates).
    fn return_to_scroll_layer(&mut self, view: PageViewId, frame: Rect);

    // ---- overlay ----

    /// Installs the overlay above the zoom content, sized to `frame`
    /// (zoom-content coordinates). Re-installing an installed overlay just
    /// updates its frame.
    fn install_overlay(&mut self, overlay: OverlayId, frame: Rect);

    /// Removes a previously installed overlay.
    fn remove_overlay(&mut self, overlay: OverlayId);
}

/// Everything the engine needs from its host, as one bound.
///
/// Blanket-implemented for any type providing all three contracts; a host
/// typically implements them on a single adapter struct and passes it to each
/// engine call.
pub trait EngineHost: PageProvider + SpreadObserver + RenderHost {}

impl<T: PageProvider + SpreadObserver + RenderHost + ?Sized> EngineHost for T {}
