// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Layout: pure spread/page geometry.
//!
//! Everything in this crate is a deterministic function of a
//! [`SpreadConfiguration`](folio_spread::SpreadConfiguration) and a container
//! size. No state, no side effects: callers recompute whenever either input
//! changes and cache the result in a [`SpreadGeometry`].
//!
//! The coordinate space is the host surface's content space: spreads are laid
//! out left to right starting at the configuration's leading spacing, every
//! frame spans the full container height, and scroll offsets are expressed as
//! the content-space origin of the viewport.
//!
//! ## Minimal example
//!
//! ```rust
//! use folio_layout::SpreadGeometry;
//! use folio_spread::SpreadConfiguration;
//! use kurbo::Size;
//!
//! let config = SpreadConfiguration::singles(8, 0.0);
//! let geometry = SpreadGeometry::new(&config, Size::new(100.0, 50.0));
//!
//! assert_eq!(geometry.content_size(), Size::new(800.0, 50.0));
//! // Interior spreads center under the viewport.
//! assert_eq!(geometry.scroll_offset_for_spread(5).x, 500.0);
//! ```

mod frames;
mod geometry;

pub use frames::{
    aligned_page_frame, contains_rect, content_size, page_frames, rects_intersect,
    scroll_offset_for_spread, spread_frames, visibility_fraction, visible_pages,
};
pub use geometry::SpreadGeometry;
