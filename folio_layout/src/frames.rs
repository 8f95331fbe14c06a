// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame computation and visibility queries.

use folio_spread::{PageAlignment, PageSet, SpreadConfiguration, SpreadIndex, SpreadType};
use kurbo::{Point, Rect, Size};

/// Computes one frame per spread, laid out left to right.
///
/// Each frame is `floor(container.width × width_percentage)` wide and spans
/// the full container height. The configured spacing precedes every spread;
/// the first spread starts at the configuration's leading spacing.
#[must_use]
pub fn spread_frames(config: &SpreadConfiguration, container: Size) -> Vec<Rect> {
    let mut frames = Vec::with_capacity(config.spread_count());
    let mut right_edge = 0.0;

    for (spread, property) in config.properties().iter().enumerate() {
        let spacing = if spread == 0 {
            config.leading_spacing()
        } else {
            config.spread_spacing()
        };
        let width = (container.width * property.width_percentage()).floor();
        let x0 = right_edge + spacing;
        frames.push(Rect::new(x0, 0.0, x0 + width, container.height));
        right_edge = x0 + width;
    }

    frames
}

/// Computes one frame per page from the spread frames.
///
/// A double spread splits into two equal-width halves: verso (first page in
/// reading order) left, recto right. A single spread's page frame equals the
/// spread frame. Output order matches ascending page-index order.
#[must_use]
pub fn page_frames(config: &SpreadConfiguration, spread_frames: &[Rect]) -> Vec<Rect> {
    let mut frames = Vec::with_capacity(config.page_count());

    for (spread, frame) in spread_frames.iter().enumerate() {
        match config.spread_type(spread) {
            Some(SpreadType::Double { .. }) => {
                let mid = frame.x0 + frame.width() / 2.0;
                frames.push(Rect::new(frame.x0, frame.y0, mid, frame.y1));
                frames.push(Rect::new(mid, frame.y0, frame.x1, frame.y1));
            }
            Some(SpreadType::Single(_)) => frames.push(*frame),
            None => {}
        }
    }

    frames
}

/// Computes the scrollable content size: the last spread's right edge by the
/// container height.
#[must_use]
pub fn content_size(spread_frames: &[Rect], container: Size) -> Size {
    match spread_frames.last() {
        Some(last) => Size::new(last.max_x(), container.height),
        None => Size::ZERO,
    }
}

/// Computes the scroll offset that presents `spread`.
///
/// The first spread aligns to its left edge and the last to its right edge
/// minus the container width, so neither end overscrolls past the sequence;
/// interior spreads center under the viewport. Out-of-range indexes yield the
/// origin.
#[must_use]
pub fn scroll_offset_for_spread(
    spread: SpreadIndex,
    spread_frames: &[Rect],
    container: Size,
) -> Point {
    let Some(frame) = spread_frames.get(spread) else {
        return Point::ZERO;
    };

    let x = if spread == 0 {
        frame.x0
    } else if spread == spread_frames.len() - 1 {
        frame.max_x() - container.width
    } else {
        frame.center().x - container.width / 2.0
    };

    Point::new(x, 0.0)
}

/// Returns how much of `spread` lies inside `visible_rect`, as a fraction of
/// the spread's width in `[0, 1]`. Missing or zero-width spreads yield `0`.
#[must_use]
pub fn visibility_fraction(
    spread: SpreadIndex,
    visible_rect: Rect,
    spread_frames: &[Rect],
) -> f64 {
    let Some(frame) = spread_frames.get(spread) else {
        return 0.0;
    };
    if frame.width() <= 0.0 {
        return 0.0;
    }

    let intersection = frame.intersect(visible_rect);
    if intersection.width() <= 0.0 || intersection.height() <= 0.0 {
        return 0.0;
    }
    intersection.width() / frame.width()
}

/// Collects the pages whose frames intersect `visible_rect`.
///
/// With `fully_visible` the frame must be entirely contained instead. Runs on
/// every scroll tick, so the scan short-circuits once the monotonically
/// ordered frames pass the right edge of the rect.
#[must_use]
pub fn visible_pages(visible_rect: Rect, page_frames: &[Rect], fully_visible: bool) -> PageSet {
    let mut pages = PageSet::new();

    for (page, frame) in page_frames.iter().enumerate() {
        if frame.x0 >= visible_rect.x1 {
            break;
        }
        let hit = if fully_visible {
            contains_rect(visible_rect, *frame)
        } else {
            rects_intersect(visible_rect, *frame)
        };
        if hit {
            pages.insert(page);
        }
    }

    pages
}

/// Places a page's preferred size within its maximum frame.
///
/// The page is vertically centered; horizontally it pins to the edge named by
/// `alignment`, or centers for [`PageAlignment::Center`]. Centered offsets are
/// rounded to whole units to keep content crisp.
#[must_use]
pub fn aligned_page_frame(max_frame: Rect, preferred: Size, alignment: PageAlignment) -> Rect {
    let y = (max_frame.center().y - preferred.height / 2.0).round();
    let x = match alignment {
        PageAlignment::Left => max_frame.x0,
        PageAlignment::Right => max_frame.max_x() - preferred.width,
        PageAlignment::Center => (max_frame.center().x - preferred.width / 2.0).round(),
    };
    Rect::from_origin_size((x, y), preferred)
}

/// Returns `true` if `outer` fully contains `inner` (shared edges count).
#[must_use]
pub fn contains_rect(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.x1 <= outer.x1 && inner.y0 >= outer.y0 && inner.y1 <= outer.y1
}

/// Returns `true` if the rects overlap with positive area.
#[must_use]
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}
