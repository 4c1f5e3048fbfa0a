//! Scroll position controller for the `scrollport` crate.
//!
//! The `scrollport` crate computes windows and slot positions for a given scroll position.
//! This crate decides what the scroll position is:
//!
//! - Drag gestures, with momentum (fling) on release
//! - Wheel input, normalized and accumulated into one animated target per direction
//! - Animated or immediate scroll-to a position, an edge or an item
//! - Lifecycle notifications (`on_scroll_start` / `on_scroll` / `on_scroll_stop`)
//!
//! Time is adapter-driven: every call takes `now_ms`, and animations advance in
//! [`ScrollController::tick`].
//!
//! ```rust
//! use scrollport::{ScrollTarget, Size, ViewportOptions};
//! use scrollport_adapter::{ControllerOptions, ScrollController, ScrollTo};
//!
//! let mut c = ScrollController::new(
//!     ViewportOptions::list(1000, 72.0),
//!     ControllerOptions::default(),
//! );
//! // Not measured yet: the request waits.
//! c.scroll_to(ScrollTo::immediate(ScrollTarget::index(20)), 0);
//! assert!(c.pending_scroll_to().is_some());
//!
//! c.on_resize(Size::new(300.0, 550.0), 0);
//! assert_eq!(c.scroll_position().y, 1440.0);
//! ```
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod drag;
mod fling;
mod options;
mod tween;
mod wheel;

#[cfg(test)]
mod tests;

pub use controller::{Phase, ScrollController, ScrollTo};
pub use drag::{DragRelease, DragState};
pub use fling::{Fling, FlingParams, simulate_fling, velocity};
pub use options::{ANIMATION_DURATION_MS, ControllerOptions, HOLD_TIME_MS, ScrollCallback};
pub use tween::{Easing, Tween};
pub use wheel::{
    MAX_WHEEL_PAGE_RATIO, PIXELS_PER_LINE, WHEEL_DELTA_MULTIPLIER, WheelEvent, WheelMode,
    normalize_wheel,
};
