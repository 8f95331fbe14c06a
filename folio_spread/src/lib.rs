// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Spread: the spread configuration model.
//!
//! This crate describes how a dense strip of pages indexed `0..page_count`
//! groups into *spreads*: navigable units of one or two pages shown together,
//! like an open book. It is the read-only input to every other Folio crate:
//! geometry, navigation, and the engine all consume a [`SpreadConfiguration`]
//! and never mutate it.
//!
//! The core concepts are:
//!
//! - [`PageIndex`] / [`SpreadIndex`]: plain indexes into the page strip and
//!   the spread sequence.
//! - [`PageSet`]: a small ordered set of page indexes with the diffing
//!   operations change notifications are built from.
//! - [`SpreadProperty`]: one spread's pages plus its zoom ceiling and
//!   fractional width.
//! - [`SpreadConfiguration`]: the ordered spread sequence with spacing policy
//!   and index lookups in both directions.
//!
//! Configurations are produced fresh by a data provider whenever the container
//! size changes or a reload is requested, and are replaced wholesale; there
//! is no in-place mutation API.
//!
//! ## Minimal example
//!
//! Six pages laid out as `[1, 2, 2, 1]` pages per spread:
//!
//! ```rust
//! use folio_spread::{SpreadConfiguration, SpreadHint, SpreadType};
//!
//! let config = SpreadConfiguration::paginate(6, 10.0, |spread_index, _next_page| {
//!     let pages = if spread_index == 0 || spread_index == 3 { 1 } else { 2 };
//!     SpreadHint::default().with_pages_in_spread(pages)
//! });
//!
//! assert_eq!(config.page_count(), 6);
//! assert_eq!(config.spread_count(), 4);
//! assert_eq!(config.spread_index_for_page(2), Some(1));
//! assert_eq!(
//!     config.spread_type(1),
//!     Some(SpreadType::Double { verso: 1, recto: 2 })
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod configuration;
mod page_set;
mod property;

pub use configuration::{SpreadConfiguration, SpreadHint};
pub use page_set::PageSet;
pub use property::{
    DEFAULT_MAX_ZOOM_SCALE, DEFAULT_WIDTH_PERCENTAGE, PageAlignment, SpreadProperty, SpreadType,
};

/// Index of one logical content unit, in `[0, page_count)`.
pub type PageIndex = usize;

/// Index of one navigable unit of one or two pages, in `[0, spread_count)`.
pub type SpreadIndex = usize;
