use crate::{Direction, ItemSize, Point, Size, StickTo, ViewportOptions, VisibleRange};

/// Sizes along one axis of the layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisLayout {
    pub client_size: f64,
    pub item_size: f64,
    /// `item_size + spacing`: the distance between the starts of two adjacent lines.
    pub grid_size: f64,
}

/// Layout metrics derived from the options and the container size.
///
/// "Primary" is the scroll axis; "secondary" is the cross axis, along which a grid packs
/// `dimension_to_extent` items per line.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    pub direction: Direction,
    pub primary: AxisLayout,
    pub secondary: AxisLayout,
    pub dimension_to_extent: usize,
    pub spacing: f64,
    /// Items are sized by the layout (grids), so positions carry width and height.
    pub sized_items: bool,
}

impl GridLayout {
    pub fn compute(options: &ViewportOptions, client_size: Size) -> Self {
        let direction = options.direction;
        let spacing = options.spacing;
        let (primary_client, secondary_client) = split_size(direction, client_size);

        let mut dimension_to_extent = 1;
        let mut sized_items = false;
        let (primary_item, secondary_item) = match &options.item_size {
            ItemSize::Fixed(size) => (*size, *size),
            ItemSize::Grid {
                min_width,
                min_height,
            } => {
                sized_items = true;
                let (primary_min, secondary_min) = if direction.is_vertical() {
                    (*min_height, *min_width)
                } else {
                    (*min_width, *min_height)
                };
                dimension_to_extent =
                    items_per_line(secondary_client, secondary_min, spacing);
                let n = dimension_to_extent as f64;
                let secondary_item = ((secondary_client - spacing * (n - 1.0)) / n).floor();
                let primary_item = if secondary_min > 0.0 {
                    (primary_min * (secondary_item / secondary_min)).floor()
                } else {
                    primary_min
                };
                (primary_item, secondary_item)
            }
            ItemSize::Variable { fixed, .. } => {
                sized_items = true;
                (*fixed, *fixed)
            }
        };

        Self {
            direction,
            primary: AxisLayout {
                client_size: primary_client,
                item_size: primary_item,
                grid_size: primary_item + spacing,
            },
            secondary: AxisLayout {
                client_size: secondary_client,
                item_size: secondary_item,
                grid_size: secondary_item + spacing,
            },
            dimension_to_extent,
            spacing,
            sized_items,
        }
    }

    /// Width of the hysteresis window around the scroll position: two grid lines.
    pub fn threshold_base(&self) -> f64 {
        self.primary.grid_size * 2.0
    }

    /// Number of grid lines needed to cover the client area.
    pub fn lines_in_view(&self) -> usize {
        let grid = self.primary.grid_size;
        if grid <= 0.0 {
            vwarn!(grid, "non-positive grid size");
            return 0;
        }
        (self.primary.client_size / grid).ceil().max(0.0) as usize
    }

    /// `min(data_size, items_per_line × (lines_in_view + overhang))`.
    pub fn num_of_items(&self, data_size: usize, overhang: usize) -> usize {
        let lines = self.lines_in_view().saturating_add(overhang);
        data_size.min(self.dimension_to_extent.saturating_mul(lines))
    }

    /// Content extent along the primary axis for `data_size` items.
    pub fn content_size(&self, data_size: usize) -> f64 {
        if data_size == 0 {
            return 0.0;
        }
        let lines = data_size.div_ceil(self.dimension_to_extent) as f64;
        (lines * self.primary.grid_size - self.spacing).max(0.0)
    }

    /// Start of `index` along the primary and secondary axes, in content space.
    pub fn grid_position(&self, index: usize) -> (f64, f64) {
        let n = self.dimension_to_extent;
        let primary = (index / n) as f64 * self.primary.grid_size;
        let secondary = (index % n) as f64 * self.secondary.grid_size;
        (primary, secondary)
    }

    /// Scroll position that brings `index` into view at the requested end.
    ///
    /// Sticking to the end only applies to fixed-size lists; the result may be negative and is
    /// expected to be clamped by the caller.
    pub fn item_position(&self, index: usize, stick_to: StickTo) -> Point {
        let (mut primary, secondary) = self.grid_position(index);
        if !self.sized_items && stick_to == StickTo::End {
            primary -= self.primary.client_size - self.primary.item_size;
        }
        self.to_point(primary, secondary)
    }

    pub fn to_point(&self, primary: f64, secondary: f64) -> Point {
        if self.direction.is_vertical() {
            Point::new(secondary, primary)
        } else {
            Point::new(primary, secondary)
        }
    }

    pub fn to_size(&self, primary: f64, secondary: f64) -> Size {
        if self.direction.is_vertical() {
            Size::new(secondary, primary)
        } else {
            Size::new(primary, secondary)
        }
    }

    /// Splits a point into its (primary, secondary) components.
    pub fn split(&self, point: Point) -> (f64, f64) {
        if self.direction.is_vertical() {
            (point.y, point.x)
        } else {
            (point.x, point.y)
        }
    }

    /// Indices intersecting the viewport when scrolled to `position` along the primary axis.
    pub fn visible_range(&self, data_size: usize, position: f64) -> Option<VisibleRange> {
        if data_size == 0 {
            return None;
        }
        let AxisLayout {
            client_size,
            item_size,
            grid_size,
        } = self.primary;
        if grid_size <= 0.0 {
            return None;
        }
        let n = self.dimension_to_extent;
        let last_index = data_size - 1;
        let first_line = (((position - item_size) / grid_size).floor() + 1.0).max(0.0) as usize;
        let end_line = ((position + client_size) / grid_size).ceil().max(0.0) as usize;
        let first = first_line.saturating_mul(n).min(last_index);
        let last = end_line.saturating_mul(n).saturating_sub(1).min(last_index);
        Some(VisibleRange {
            first,
            last: last.max(first),
        })
    }
}

/// Items per grid line: `floor((client + spacing) / (min_item + spacing))`, at least 1.
pub fn items_per_line(client_size: f64, min_item_size: f64, spacing: f64) -> usize {
    let denominator = min_item_size + spacing;
    if denominator <= 0.0 {
        vwarn!(min_item_size, spacing, "grid item size must be positive");
        return 1;
    }
    ((client_size + spacing) / denominator).floor().max(1.0) as usize
}

fn split_size(direction: Direction, size: Size) -> (f64, f64) {
    if direction.is_vertical() {
        (size.height, size.width)
    } else {
        (size.width, size.height)
    }
}
