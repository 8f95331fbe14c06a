// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Nav: navigation state over a spread sequence.
//!
//! This crate answers "where is the user?" for a horizontally scrolling
//! spread strip. It tracks three index quantities with different lifetimes:
//!
//! - the **centered spread**: which spread sits under the viewport center,
//!   recomputed on every scroll tick via [`centered_spread`] (first/last
//!   shortcuts plus a midpoint binary search over the ordered frames);
//! - the **current spread/pages**: a stable snapshot of the centered spread,
//!   taken only when scrolling or animation settles;
//! - the **visible pages**: every page whose frame intersects the viewport.
//!
//! Each update returns a [`PageDiff`] when the corresponding set changed, so
//! hosts can forward added/removed notifications without re-deriving them.
//! [`NavigationTracker`] also predicts the spread a released drag should
//! settle on from fling velocity and neighbor visibility.
//!
//! ## Minimal example
//!
//! ```rust
//! use folio_layout::SpreadGeometry;
//! use folio_nav::NavigationTracker;
//! use folio_spread::SpreadConfiguration;
//! use kurbo::{Rect, Size};
//!
//! let config = SpreadConfiguration::singles(8, 0.0);
//! let geometry = SpreadGeometry::new(&config, Size::new(100.0, 50.0));
//! let mut tracker = NavigationTracker::new();
//!
//! // Viewport over spread 3.
//! let viewport = Rect::new(300.0, 0.0, 400.0, 50.0);
//! let diff = tracker.update_centered(&geometry, &config, viewport).unwrap();
//! assert_eq!(tracker.centered_spread(), Some(3));
//! assert!(diff.added.contains(3));
//! ```

mod centered;
mod drag;
mod tracker;

pub use centered::{CENTER_EPSILON, centered_spread};
pub use drag::{FLING_VELOCITY_THRESHOLD, NEIGHBOR_VISIBILITY_THRESHOLD};
pub use tracker::{NavigationTracker, PageDiff};
