// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared recording host for the engine integration tests.

use folio_engine::{
    ContentType, OverlayId, PageProvider, PageSlot, PageViewId, RenderHost, SettleToken,
    SpreadObserver,
};
use folio_spread::{PageIndex, PageSet, SpreadConfiguration};
use kurbo::{Insets, Point, Rect, Size, Vec2};
use peniko::Color;

/// One recorded observer notification.
#[derive(Clone, Debug)]
pub enum Note {
    Visible(PageSet),
    Current(PageSet),
    Finished(PageSet),
    ZoomStarted(PageSet, f64),
    ZoomChanged(PageSet, f64),
    ZoomEnded(PageSet, f64),
}

/// Provider + observer + surface in one struct, recording every command.
#[derive(Debug)]
pub struct RecordingHost {
    pub configuration: Option<SpreadConfiguration>,
    pub overlay_result: Option<OverlayId>,

    pub viewport: Rect,
    pub content_size: Size,
    pub scroll_enabled: bool,
    pub scroll_offsets: Vec<(Point, bool)>,

    pub created: Vec<(PageIndex, ContentType, PageViewId)>,
    pub destroyed: Vec<PageViewId>,
    pub configured: Vec<PageIndex>,

    pub zoom_scale: f64,
    pub max_zoom_scale: f64,
    pub zoom_scroll_offset: Point,
    pub zoom_frame: Rect,
    pub zoom_content_size: Size,
    pub zoom_insets: Insets,
    pub zoom_background: Option<Color>,
    pub adopted: Vec<(PageViewId, Rect)>,
    pub returned: Vec<(PageViewId, Rect)>,
    pub overlays_installed: Vec<(OverlayId, Rect)>,
    pub overlays_removed: Vec<OverlayId>,

    pub settle_requests: Vec<(f64, SettleToken)>,
    pub settle_cancels: Vec<SettleToken>,

    pub notes: Vec<Note>,

    next_view_id: u64,
}

impl RecordingHost {
    pub fn new(configuration: SpreadConfiguration, viewport: Rect) -> Self {
        Self {
            configuration: Some(configuration),
            overlay_result: None,
            viewport,
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
    pub fn scroll_to(&mut self, x: f64) {
        let size = self.viewport.size();
        self.viewport = Rect::from_origin_size((x, 0.0), size);
    }
}

impl PageProvider for RecordingHost {
    fn spread_configuration(&mut self, _container: Size) -> SpreadConfiguration {
        self.configuration
            .clone()
            .expect("recording host needs a configuration")
    }

    fn configure_page(&mut self, slot: &PageSlot) {
        self.configured.push(slot.page());
    }

    fn content_type(&mut self, _page: PageIndex) -> ContentType {
        ContentType(0)
    }

    fn overlay_for_spread(
        &mut self,
        _size: Size,
        _page_frames: &[(PageIndex, Rect)],
    ) -> Option<OverlayId> {
        self.overlay_result
    }
}

impl SpreadObserver for RecordingHost {
    fn visible_pages_changed(&mut self, pages: &PageSet, _added: &PageSet, _removed: &PageSet) {
        self.notes.push(Note::Visible(pages.clone()));
    }

    fn current_pages_changed(&mut self, pages: &PageSet, _added: &PageSet, _removed: &PageSet) {
        self.notes.push(Note::Current(pages.clone()));
    }

    fn current_pages_finished_changing(
        &mut self,
        pages: &PageSet,
        _added: &PageSet,
        _removed: &PageSet,
    ) {
        self.notes.push(Note::Finished(pages.clone()));
    }

    fn zoom_started(&mut self, pages: &PageSet, scale: f64) {
        self.notes.push(Note::ZoomStarted(pages.clone(), scale));
    }

    fn zoom_changed(&mut self, pages: &PageSet, scale: f64) {
        self.notes.push(Note::ZoomChanged(pages.clone(), scale));
    }

    fn zoom_ended(&mut self, pages: &PageSet, scale: f64) {
        self.notes.push(Note::ZoomEnded(pages.clone(), scale));
    }
}

impl RenderHost for RecordingHost {
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
