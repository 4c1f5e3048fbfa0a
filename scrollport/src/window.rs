use crate::threshold::{Crossing, ScrollThreshold};
use crate::{IndexWindow, ScrollDirection, VisibleRange};

/// What the window calculator needs to know about the current layout and bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowGeometry {
    pub grid_size: f64,
    pub items_per_line: usize,
    /// `data_size - num_of_items`: the last first index that keeps the window inside the data.
    pub max_first_index: usize,
    pub max_scroll_offset: f64,
}

/// Derives the index window for a new scroll position.
///
/// While `position` stays inside the threshold the current window is returned unchanged;
/// otherwise the threshold slides and the window shifts by whole lines, however far the
/// position jumped in one step.
pub fn compute_window(
    threshold: &mut ScrollThreshold,
    position: f64,
    direction: Option<ScrollDirection>,
    current: IndexWindow,
    geometry: &WindowGeometry,
) -> IndexWindow {
    let crossing = threshold.advance(
        position,
        direction,
        geometry.grid_size,
        geometry.max_scroll_offset,
    );
    match crossing {
        Some(crossing) => IndexWindow {
            first_index: shift_first_index(
                current.first_index,
                crossing,
                geometry.items_per_line,
                geometry.max_first_index,
            ),
            ..current
        },
        None => current,
    }
}

/// Shifts `first_index` by `crossing.lines` lines, clamped to `[0, max_first_index]`.
///
/// The start is first realigned to a line boundary, so a window that was clamped to a
/// partial last line snaps back onto the grid when it moves again.
pub fn shift_first_index(
    first_index: usize,
    crossing: Crossing,
    items_per_line: usize,
    max_first_index: usize,
) -> usize {
    let n = items_per_line.max(1);
    let aligned = first_index.div_ceil(n).saturating_mul(n);
    let step = crossing.lines.saturating_mul(n);
    match crossing.direction {
        ScrollDirection::Forward => aligned.saturating_add(step).min(max_first_index),
        ScrollDirection::Backward => aligned.saturating_sub(step).min(max_first_index),
    }
}

/// Re-sizes the window after the data size or the layout changed.
///
/// Returns the new window and its `max_first_index`. A window that sat at the previous
/// maximum while the viewport had already moved past it stays pinned to the new maximum;
/// otherwise the first index is only clamped.
pub fn refit_window(
    current: IndexWindow,
    data_size: usize,
    num_of_items: usize,
    previous_max_first_index: usize,
    visible: Option<VisibleRange>,
    items_per_line: usize,
) -> (IndexWindow, usize) {
    let num_of_items = num_of_items.min(data_size);
    let max_first_index = data_size - num_of_items;
    let was_pinned = current.first_index == previous_max_first_index
        && visible.is_some_and(|v| {
            previous_max_first_index.saturating_add(items_per_line) < v.first
        });

    let first_index = if was_pinned {
        max_first_index
    } else {
        current.first_index.min(max_first_index)
    };
    (IndexWindow::new(first_index, num_of_items), max_first_index)
}
