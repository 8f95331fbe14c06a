// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page slot pool: view recycling around a preload window.

use folio_layout::{SpreadGeometry, aligned_page_frame};
use folio_spread::{PageIndex, PageSet, SpreadConfiguration};
use hashbrown::HashMap;
use kurbo::{Rect, Vec2};

use crate::host::{ContentType, EngineHost, PageViewId, RenderHost};

/// One live content view bound to a page index.
///
/// The pool exclusively owns slot lifetime; the page binding is rebound on
/// recycle. The frame is always in paging-surface content coordinates, even
/// while the slot is hosted in the zoom layer.
#[derive(Clone, Debug)]
pub struct PageSlot {
    page: PageIndex,
    content: ContentType,
    view: PageViewId,
    frame: Rect,
    alpha: f64,
    translation: Vec2,
    zooming: bool,
}

impl PageSlot {
    /// Returns the page index the slot is bound to.
    #[must_use]
    pub fn page(&self) -> PageIndex {
        self.page
    }

    /// Returns the slot's recycling content type.
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        self.content
    }

    /// Returns the host view handle backing the slot.
    #[must_use]
    pub fn view(&self) -> PageViewId {
        self.view
    }

    /// Returns the slot's frame in content coordinates.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Returns the slot's opacity.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the slot's ghost translation.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Returns `true` while the slot is hosted in the zoom layer.
    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.zooming
    }

    pub(crate) fn set_zooming(&mut self, zooming: bool) {
        self.zooming = zooming;
    }

    pub(crate) fn restore_layout<H: RenderHost>(&mut self, host: &mut H, frame: Rect) {
        self.frame = frame;
        self.alpha = 1.0;
        self.translation = Vec2::ZERO;
        host.set_page_frame(self.view, frame);
        host.set_page_alpha(self.view, 1.0);
        host.set_page_translation(self.view, Vec2::ZERO);
    }
}

/// Expands `visible` by `before`/`after` contiguous pages, clamped to
/// `[0, page_count)`.
///
/// The expansion is a contiguous range from `first - before` through
/// `last + after`, so interior gaps in the visible set are filled as well.
/// Empty inputs produce an empty window.
#[must_use]
pub fn preload_window(
    visible: &PageSet,
    before: usize,
    after: usize,
    page_count: usize,
) -> PageSet {
    let (Some(first), Some(last)) = (visible.first(), visible.last()) else {
        return PageSet::new();
    };
    if page_count == 0 {
        return PageSet::new();
    }

    let mut window = visible.clone();
    let start = first.saturating_sub(before);
    let end = (last + after).min(page_count - 1);
    window.insert_range(start..end + 1);
    window.retain(|page| page < page_count);
    window
}

/// The pool of live page slots.
///
/// `reconcile` is the only operation that creates or destroys slots; it runs
/// on every relayout and scroll tick and is idempotent for unchanged inputs.
#[derive(Debug, Default)]
pub struct SlotPool {
    slots: HashMap<PageIndex, PageSlot>,
}

impl SlotPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` when no slots are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the slot bound to `page`, if loaded.
    #[must_use]
    pub fn get(&self, page: PageIndex) -> Option<&PageSlot> {
        self.slots.get(&page)
    }

    pub(crate) fn get_mut(&mut self, page: PageIndex) -> Option<&mut PageSlot> {
        self.slots.get_mut(&page)
    }

    /// Iterates all live slots in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &PageSlot> {
        self.slots.values()
    }

    /// Destroys every slot's view and empties the pool.
    pub(crate) fn clear<H: RenderHost>(&mut self, host: &mut H) {
        for (_, slot) in self.slots.drain() {
            host.destroy_page_view(slot.view);
        }
    }

    /// Reconciles the pool against the preload window around `visible`.
    ///
    /// Slots in the window or in the active `zooming` set survive; others are
    /// recycled into same-content-type replacements or destroyed. Surviving
    /// non-zooming slots are re-laid-out through size negotiation and get the
    /// distance fade: slots outside the visible window turn invisible and
    /// shift by half the container width per index of distance, so preloaded
    /// neighbors stack offscreen instead of peeking in.
    pub(crate) fn reconcile<H: EngineHost>(
        &mut self,
        host: &mut H,
        config: &SpreadConfiguration,
        geometry: &SpreadGeometry,
        visible: &PageSet,
        zooming: &PageSet,
    ) {
        let window = {
            let before = host.preload_before(visible);
            let after = host.preload_after(visible);
            let window = preload_window(visible, before, after, config.page_count());
            let mut window = host.adjust_preload_window(visible, window);
            window.retain(|page| page < config.page_count());
            window
        };

        let mut needed: HashMap<PageIndex, PageSlot> = HashMap::new();
        let mut recyclable: Vec<PageSlot> = Vec::new();

        for (page, slot) in self.slots.drain() {
            if window.contains(page) || zooming.contains(page) {
                needed.insert(page, slot);
            } else {
                recyclable.push(slot);
            }
        }

        for page in window.iter() {
            if needed.contains_key(&page) {
                continue;
            }

            let content = host.content_type(page);
            let slot = match recyclable
                .iter()
                .position(|slot| slot.content == content)
            {
                Some(index) => {
                    let mut slot = recyclable.swap_remove(index);
                    slot.page = page;
                    slot
                }
                None => {
                    let frame = geometry.page_frame(page).unwrap_or(Rect::ZERO);
                    let view = host.create_page_view(page, content, frame);
                    PageSlot {
                        page,
                        content,
                        view,
                        frame,
                        alpha: 1.0,
                        translation: Vec2::ZERO,
                        zooming: false,
                    }
                }
            };

            host.configure_page(&slot);
            needed.insert(page, slot);
        }

        for slot in recyclable {
            host.destroy_page_view(slot.view);
        }

        let container = geometry.container();
        for slot in needed.values_mut() {
            if slot.zooming || zooming.contains(slot.page) {
                continue;
            }

            let max_frame = geometry.page_frame(slot.page).unwrap_or(Rect::ZERO);
            let preferred = host.preferred_page_size(slot.view, max_frame.size());
            let frame = aligned_page_frame(
                max_frame,
                preferred,
                config.alignment_for_page(slot.page),
            );

            slot.frame = frame;
            slot.alpha = 1.0;
            slot.translation = Vec2::ZERO;

            // Signed index distance from the visible window.
            let mut distance: isize = 0;
            if let (Some(first), Some(last)) = (visible.first(), visible.last()) {
                if slot.page > last {
                    distance = (slot.page - last) as isize;
                } else if slot.page < first {
                    distance = -((first - slot.page) as isize);
                }
            }
            if distance != 0 {
                slot.alpha = 0.0;
                slot.translation = Vec2::new(container.width / 2.0 * distance as f64, 0.0);
            }

            host.set_page_frame(slot.view, slot.frame);
            host.set_page_alpha(slot.view, slot.alpha);
            host.set_page_translation(slot.view, slot.translation);
        }

        self.slots = needed;
    }

    /// Recomputes the resized, aligned frame for `page` and restores the slot
    /// into the scroll layer's layout state.
    pub(crate) fn restore_slot_layout<H: EngineHost>(
        &mut self,
        host: &mut H,
        config: &SpreadConfiguration,
        geometry: &SpreadGeometry,
        page: PageIndex,
    ) -> Option<Rect> {
        let slot = self.slots.get_mut(&page)?;
        let max_frame = geometry.page_frame(page).unwrap_or(Rect::ZERO);
        let preferred = host.preferred_page_size(slot.view, max_frame.size());
        let frame = aligned_page_frame(max_frame, preferred, config.alignment_for_page(page));
        slot.set_zooming(false);
        slot.restore_layout(host, frame);
        Some(frame)
    }
}
