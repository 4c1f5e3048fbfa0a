use core::ops::Range;

use crate::options::{CellCountFn, CellSizeFn};
use crate::ScrollDirection;

/// Secondary-axis window of one row in a variable grid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowThreshold {
    pub min: f64,
    pub max: f64,
}

/// Which cells of a row cover the viewport, and where the scanned cells start.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowInfo {
    pub first_visible_col: usize,
    /// Inclusive. The row is empty when no cell lies under the viewport.
    pub last_visible_col: usize,
    /// Start offset of every cell up to and including `last_visible_col`.
    pub offsets: Vec<f64>,
    pub threshold: Option<RowThreshold>,
}

impl RowInfo {
    pub fn columns(&self) -> Range<usize> {
        let end = (self.last_visible_col + 1).min(self.offsets.len());
        self.first_visible_col.min(end)..end
    }

    pub fn is_empty(&self) -> bool {
        self.columns().is_empty()
    }

    /// Whether the row's visible columns no longer cover `position..position + client_size`.
    pub fn is_stale(
        &self,
        position: f64,
        client_size: f64,
        direction: Option<ScrollDirection>,
    ) -> bool {
        let Some(t) = self.threshold else {
            return true;
        };
        match direction {
            Some(ScrollDirection::Forward) => position + client_size > t.max,
            Some(ScrollDirection::Backward) => position < t.min,
            None => false,
        }
    }
}

/// Lazily computed per-row column windows for grids whose cells vary along the cross axis.
#[derive(Clone)]
pub struct VariableRows {
    cells_in_row: CellCountFn,
    cell_size: CellSizeFn,
    client_size: f64,
    max_scroll_size: f64,
    rows: Vec<Option<RowInfo>>,
}

impl VariableRows {
    pub fn new(
        row_count: usize,
        cells_in_row: CellCountFn,
        cell_size: CellSizeFn,
        client_size: f64,
        max_scroll_size: Option<f64>,
    ) -> Self {
        let mut rows = Self {
            cells_in_row,
            cell_size,
            client_size,
            max_scroll_size: 0.0,
            rows: vec![None; row_count],
        };
        rows.max_scroll_size = match max_scroll_size {
            Some(size) => size,
            None => rows.widest_row(),
        };
        rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Content extent along the variable axis.
    pub fn max_scroll_size(&self) -> f64 {
        self.max_scroll_size
    }

    pub fn row(&self, row: usize) -> Option<&RowInfo> {
        self.rows.get(row).and_then(Option::as_ref)
    }

    pub fn cell_size(&self, row: usize, column: usize) -> f64 {
        (self.cell_size)(row, column)
    }

    /// Scans the cells of `row` from the start until `position..position + client_size` is
    /// covered, recording the visible column range, the cell offsets and the row threshold.
    pub fn update_row_info(&mut self, row: usize, position: f64) -> Option<&RowInfo> {
        if row >= self.rows.len() {
            vwarn!(row, rows = self.rows.len(), "variable rows: row out of range");
            return None;
        }
        let count = (self.cells_in_row)(row);
        let viewport_end = position + self.client_size;

        let mut offsets = Vec::new();
        let mut accumulated = 0.0;
        let mut first = None;
        let mut min = None;
        let mut last = None;
        let mut max = None;

        for column in 0..count {
            let size = (self.cell_size)(row, column);
            offsets.push(accumulated);
            if accumulated <= position && position < accumulated + size {
                first = Some(column);
                min = Some(accumulated);
            }
            if accumulated + size > viewport_end {
                last = Some(column);
                max = Some(accumulated + size);
                break;
            }
            accumulated += size;
        }

        let info = RowInfo {
            first_visible_col: first.unwrap_or(count),
            last_visible_col: last.unwrap_or(count.saturating_sub(1)),
            offsets,
            threshold: Some(RowThreshold {
                min: min.unwrap_or(accumulated),
                max: max.unwrap_or(self.max_scroll_size),
            }),
        };
        vtrace!(
            row,
            first = info.first_visible_col,
            last = info.last_visible_col,
            "row info updated"
        );
        self.rows[row] = Some(info);
        self.rows[row].as_ref()
    }

    /// Refreshes the rows of the window `new_first..new_first + num_of_items`.
    ///
    /// A row is rescanned when it just entered the window, when its column range no longer
    /// covers the viewport in the direction of travel, or when it was never scanned.
    /// Returns whether any row changed.
    pub fn sync_window(
        &mut self,
        previous_first: usize,
        new_first: usize,
        num_of_items: usize,
        position: f64,
        direction: Option<ScrollDirection>,
    ) -> bool {
        let end = new_first.saturating_add(num_of_items).min(self.rows.len());
        let mut changed = false;
        for row in new_first..end {
            let entering = (previous_first < new_first
                && row >= previous_first.saturating_add(num_of_items))
                || (previous_first > new_first && row < previous_first);
            let stale = match &self.rows[row] {
                Some(info) => info.is_stale(position, self.client_size, direction),
                None => true,
            };
            if entering || stale {
                self.update_row_info(row, position);
                changed = true;
            }
        }
        changed
    }

    fn widest_row(&self) -> f64 {
        (0..self.rows.len())
            .map(|row| {
                (0..(self.cells_in_row)(row))
                    .map(|column| (self.cell_size)(row, column))
                    .sum::<f64>()
            })
            .fold(0.0, f64::max)
    }
}

impl core::fmt::Debug for VariableRows {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VariableRows")
            .field("client_size", &self.client_size)
            .field("max_scroll_size", &self.max_scroll_size)
            .field("row_count", &self.rows.len())
            .finish_non_exhaustive()
    }
}
