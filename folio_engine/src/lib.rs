// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folio Engine: the paginated, zoomable spread viewer core.
//!
//! [`SpreadEngine`] ties the Folio crates together into the engine a host UI
//! embeds: it owns the spread configuration, the derived geometry, the
//! navigation state, a recycled pool of page content slots, and the zoom
//! session that temporarily re-homes the current spread's slots into an
//! independent magnifier surface.
//!
//! The engine is deliberately blind to any concrete UI stack. The host
//! implements three contracts and passes itself into every call:
//!
//! - [`PageProvider`]: how many pages exist, how they group into spreads,
//!   and how each page's content is produced.
//! - [`SpreadObserver`]: optional change notifications (visible pages,
//!   current pages in motion and settled, zoom lifecycle).
//! - [`RenderHost`]: the imperative scrolling/zooming surface the engine
//!   drives: content sizing, scroll offsets, page view lifecycle, zoom
//!   transforms and insets.
//!
//! Everything runs single-threaded and event-driven: the host reports size
//! changes, scroll ticks, drag and zoom events, and the engine synchronously
//! recomputes state and issues surface commands. Host-facing mutations
//! (`reload`, `jump_to_page`, reconfiguration) are queued and executed on the
//! host's next [`SpreadEngine::run_pending`] turn so they can never re-enter
//! an update in progress.
//!
//! ## Sketch
//!
//! ```rust,ignore
//! let mut engine = SpreadEngine::new();
//!
//! // On container resize:
//! engine.set_bounds(&mut host, size);
//! // ... host runs its layout transition ...
//! engine.layout_transition_completed(&mut host);
//!
//! // On every scroll tick while the user drags:
//! engine.scrolled(&mut host);
//!
//! // Programmatic navigation, deferred to the next turn:
//! engine.jump_to_page(5, true);
//! engine.run_pending(&mut host);
//! ```

mod engine;
mod host;
mod slots;
#[cfg(test)]
mod test_host;
mod zoom;

pub use engine::{SETTLE_DEBOUNCE, SpreadEngine};
pub use host::{
    ContentType, EngineHost, OverlayId, PageProvider, PageViewId, RenderHost, SettleToken,
    SpreadObserver,
};
pub use slots::{PageSlot, SlotPool, preload_window};
pub use zoom::{
    BACKGROUND_FADE_FULL_SCALE, DoubleTapAction, DoubleTapZoom, MIN_ZOOM_SCALE, SpringSpec,
    ZOOM_END_EPSILON, ZOOM_IN_SPRING, ZOOM_OUT_SPRING, ZoomSession, anchoring_insets,
    background_alpha, double_tap_zoom,
};
