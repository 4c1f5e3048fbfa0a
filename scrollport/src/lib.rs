//! A headless windowing engine for recycled virtual lists and grids.
//!
//! For the scroll position controller (drag, wheel, fling, animated scroll-to and lifecycle
//! notifications), see the `scrollport-adapter` crate.
//!
//! The engine materializes only a window of items around the viewport and maps each item onto
//! one of a fixed number of reusable slots (`index % window_size`), so the number of rendered
//! nodes stays constant no matter how far the list scrolls:
//!
//! - [`GridLayout`]: item/grid sizes and items per line, derived from the container size.
//! - [`ViewportMetrics`]: client/content size and maximum scroll offset per axis.
//! - [`ScrollThreshold`]: a hysteresis window around the scroll position; the index window is
//!   only recomputed once the position leaves it, and then shifts by whole lines.
//! - [`IndexWindow`]: the first materialized index and the window size.
//! - [`SlotTable`]: which item each slot shows; only slots whose item changed are re-rendered.
//! - [`VariableRows`]: per-row column windows for grids whose cells vary in size.
//!
//! It is UI-agnostic. A rendering layer is expected to provide:
//! - the container size ([`Container`] or [`ViewportEngine::on_resize`])
//! - a [`Renderer`] that produces content for a slot and moves slots around
//!
//! ```rust
//! use scrollport::{Point, Size, ViewportEngine, ViewportOptions};
//!
//! let mut engine = ViewportEngine::new(
//!     ViewportOptions::list(1000, 72.0).with_client_size(Some(Size::new(300.0, 550.0))),
//! );
//! assert_eq!(engine.window().num_of_items, 11);
//!
//! engine.set_scroll_position(Point::new(0.0, 1000.0));
//! assert_eq!(engine.window().first_index, 12);
//! ```
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod engine;
mod layout;
mod metrics;
mod options;
mod render;
mod slots;
mod threshold;
mod types;
mod variable;
mod window;

#[cfg(test)]
mod property_tests;

pub use engine::{BoundsUpdate, ViewportEngine, WindowChange};
pub use layout::{AxisLayout, GridLayout, items_per_line};
pub use metrics::{AxisMetrics, ViewportMetrics, recompute_bounds};
pub use options::{CellCountFn, CellSizeFn, DataSize, ItemSize, Positioning, ViewportOptions};
pub use render::{Container, RenderRequest, Renderer};
pub use slots::{SlotState, SlotTable, SlotUpdate, assign_slot};
pub use threshold::{Crossing, ScrollThreshold};
pub use types::{
    Direction, IndexWindow, ItemId, ItemPosition, Point, ScrollAlign, ScrollDirection,
    ScrollInfo, ScrollTarget, Size, StickTo, VisibleRange,
};
pub use variable::{RowInfo, RowThreshold, VariableRows};
pub use window::{WindowGeometry, compute_window, refit_window, shift_first_index};
