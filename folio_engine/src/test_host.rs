// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording host used by the unit tests in this crate.

use folio_spread::{PageIndex, PageSet, SpreadConfiguration};
use kurbo::{Insets, Point, Rect, Size, Vec2};
use peniko::Color;

use crate::host::{
    ContentType, OverlayId, PageProvider, PageViewId, RenderHost, SettleToken, SpreadObserver,
};
use crate::slots::PageSlot;

/// One recorded observer notification.
#[derive(Clone, Debug)]
pub(crate) enum Note {
    Visible {
        pages: PageSet,
        added: PageSet,
        removed: PageSet,
    },
    Current {
        pages: PageSet,
        added: PageSet,
        removed: PageSet,
    },
    Finished {
        pages: PageSet,
        added: PageSet,
        removed: PageSet,
    },
    ZoomStarted {
        pages: PageSet,
        scale: f64,
    },
    ZoomChanged {
        pages: PageSet,
        scale: f64,
    },
    ZoomEnded {
        pages: PageSet,
        scale: f64,
    },
}

/// Provider + observer + surface rolled into one recording mock.
///
/// Surface state setters store the latest value; lifecycle commands append to
/// their logs so tests can count creates/destroys/adoptions.
#[derive(Debug)]
pub(crate) struct TestHost {
    // Provider knobs.
    pub(crate) configuration: Option<SpreadConfiguration>,
    pub(crate) content_type_for: fn(PageIndex) -> ContentType,
    pub(crate) preload_override: Option<PageSet>,
    pub(crate) overlay_result: Option<OverlayId>,
    pub(crate) preferred_size: Option<Size>,

    // Paging surface state.
    pub(crate) viewport: Rect,
    pub(crate) content_size: Size,
    pub(crate) scroll_enabled: bool,
    pub(crate) scroll_offsets: Vec<(Point, bool)>,

    // Page view log.
    pub(crate) created: Vec<(PageIndex, ContentType, PageViewId)>,
    pub(crate) destroyed: Vec<PageViewId>,
    pub(crate) configured: Vec<PageIndex>,

    // Zoom surface state.
    pub(crate) zoom_scale: f64,
    pub(crate) max_zoom_scale: f64,
    pub(crate) zoom_scroll_offset: Point,
    pub(crate) zoom_frame: Rect,
    pub(crate) zoom_content_size: Size,
    pub(crate) zoom_insets: Insets,
    pub(crate) zoom_background: Option<Color>,
    pub(crate) adopted: Vec<(PageViewId, Rect)>,
    pub(crate) returned: Vec<(PageViewId, Rect)>,
    pub(crate) overlays_installed: Vec<(OverlayId, Rect)>,
    pub(crate) overlays_removed: Vec<OverlayId>,

    // Settle scheduling.
    pub(crate) settle_requests: Vec<(f64, SettleToken)>,
    pub(crate) settle_cancels: Vec<SettleToken>,

    // Observer log.
    pub(crate) notes: Vec<Note>,

    next_view_id: u64,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        Self {
            configuration: None,
            content_type_for: |_| ContentType(0),
            preload_override: None,
            overlay_result: None,
            preferred_size: None,
            viewport: Rect::new(0.0, 0.0, 100.0, 50.0),
            content_size: Size::ZERO,
            scroll_enabled: true,
            scroll_offsets: Vec::new(),
            created: Vec::new(),
            destroyed: Vec::new(),
            configured: Vec::new(),
            zoom_scale: 1.0,
            max_zoom_scale: 1.0,
            zoom_scroll_offset: Point::ZERO,
            zoom_frame: Rect::ZERO,
            zoom_content_size: Size::ZERO,
            zoom_insets: Insets::ZERO,
            zoom_background: None,
            adopted: Vec::new(),
            returned: Vec::new(),
            overlays_installed: Vec::new(),
            overlays_removed: Vec::new(),
            settle_requests: Vec::new(),
            settle_cancels: Vec::new(),
            notes: Vec::new(),
            next_view_id: 0,
        }
    }

    /// Moves the viewport to `x`, keeping its size.
    pub(crate) fn scroll_to(&mut self, x: f64) {
        let size = self.viewport.size();
        self.viewport = Rect::from_origin_size((x, 0.0), size);
    }
}

impl PageProvider for TestHost {
    fn spread_configuration(&mut self, _container: Size) -> SpreadConfiguration {
        self.configuration
            .clone()
            .expect("test host needs a spread configuration")
    }

    fn configure_page(&mut self, slot: &PageSlot) {
        self.configured.push(slot.page());
    }

    fn content_type(&mut self, page: PageIndex) -> ContentType {
        (self.content_type_for)(page)
    }

    fn adjust_preload_window(&mut self, _visible: &PageSet, window: PageSet) -> PageSet {
        self.preload_override.clone().unwrap_or(window)
    }

    fn overlay_for_spread(
        &mut self,
        _size: Size,
        _page_frames: &[(PageIndex, Rect)],
    ) -> Option<OverlayId> {
        self.overlay_result
    }
}

impl SpreadObserver for TestHost {
    fn visible_pages_changed(&mut self, pages: &PageSet, added: &PageSet, removed: &PageSet) {
        self.notes.push(Note::Visible {
            pages: pages.clone(),
            added: added.clone(),
            removed: removed.clone(),
        });
    }

    fn current_pages_changed(&mut self, pages: &PageSet, added: &PageSet, removed: &PageSet) {
        self.notes.push(Note::Current {
            pages: pages.clone(),
            added: added.clone(),
            removed: removed.clone(),
        });
    }

    fn current_pages_finished_changing(
        &mut self,
        pages: &PageSet,
        added: &PageSet,
        removed: &PageSet,
    ) {
        self.notes.push(Note::Finished {
            pages: pages.clone(),
            added: added.clone(),
            removed: removed.clone(),
        });
    }

    fn zoom_started(&mut self, pages: &PageSet, scale: f64) {
        self.notes.push(Note::ZoomStarted {
            pages: pages.clone(),
            scale,
        });
    }

    fn zoom_changed(&mut self, pages: &PageSet, scale: f64) {
        self.notes.push(Note::ZoomChanged {
            pages: pages.clone(),
            scale,
        });
    }

    fn zoom_ended(&mut self, pages: &PageSet, scale: f64) {
        self.notes.push(Note::ZoomEnded {
            pages: pages.clone(),
            scale,
        });
    }
}

impl RenderHost for TestHost {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
    }

    fn set_scroll_offset(&mut self, offset: Point, animated: bool) {
        self.scroll_offsets.push((offset, animated));
        let size = self.viewport.size();
        self.viewport = Rect::from_origin_size(offset, size);
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }

    fn request_settle(&mut self, delay: f64, token: SettleToken) {
        self.settle_requests.push((delay, token));
    }

    fn cancel_settle(&mut self, token: SettleToken) {
        self.settle_cancels.push(token);
    }

    fn create_page_view(
        &mut self,
        page: PageIndex,
        content: ContentType,
        _frame: Rect,
    ) -> PageViewId {
        self.next_view_id += 1;
        let view = PageViewId(self.next_view_id);
        self.created.push((page, content, view));
        view
    }

    fn destroy_page_view(&mut self, view: PageViewId) {
        self.destroyed.push(view);
    }

    fn preferred_page_size(&mut self, _view: PageViewId, max: Size) -> Size {
        self.preferred_size.unwrap_or(max)
    }

    fn set_page_frame(&mut self, _view: PageViewId, _frame: Rect) {}

    fn set_page_alpha(&mut self, _view: PageViewId, _alpha: f64) {}

    fn set_page_translation(&mut self, _view: PageViewId, _translation: Vec2) {}

    fn set_zoom_frame(&mut self, frame: Rect) {
        self.zoom_frame = frame;
    }

    fn zoom_scale(&self) -> f64 {
        self.zoom_scale
    }

    fn set_zoom_scale(&mut self, scale: f64) {
        self.zoom_scale = scale;
    }

    fn set_max_zoom_scale(&mut self, scale: f64) {
        self.max_zoom_scale = scale;
    }

    fn set_zoom_scroll_offset(&mut self, offset: Point) {
        self.zoom_scroll_offset = offset;
    }

    fn set_zoom_content_size(&mut self, size: Size) {
        self.zoom_content_size = size;
    }

    fn set_zoom_insets(&mut self, insets: Insets) {
        self.zoom_insets = insets;
    }

    fn set_zoom_background(&mut self, color: Option<Color>) {
        self.zoom_background = color;
    }

    fn zoom_content_frame(&self) -> Rect {
        (self.zoom_content_size * self.zoom_scale).to_rect()
    }

    fn adopt_into_zoom_layer(&mut self, view: PageViewId, frame: Rect) {
        self.adopted.push((view, frame));
    }

    fn return_to_scroll_layer(&mut self, view: PageViewId, frame: Rect) {
        self.returned.push((view, frame));
    }

    fn install_overlay(&mut self, overlay: OverlayId, frame: Rect) {
        self.overlays_installed.push((overlay, frame));
    }

    fn remove_overlay(&mut self, overlay: OverlayId) {
        self.overlays_removed.push(overlay);
    }
}
