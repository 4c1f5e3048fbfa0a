use std::sync::Arc;

use crate::{Direction, Size};

/// Returns the size of cell `column` in row `row` along the variable axis.
pub type CellSizeFn = Arc<dyn Fn(usize, usize) -> f64 + Send + Sync>;

/// Returns how many cells row `row` holds along the variable axis.
pub type CellCountFn = Arc<dyn Fn(usize) -> usize + Send + Sync>;

/// Item sizing along the primary axis (and, for grids, the secondary axis).
#[derive(Clone)]
pub enum ItemSize {
    /// Every item has the same size in the scroll axis and spans the cross axis.
    Fixed(f64),
    /// Items are laid out in a grid. The number of items per line is derived from the
    /// container's cross size; items are scaled up to fill it.
    Grid { min_width: f64, min_height: f64 },
    /// Rows of `fixed` size in the scroll axis, each holding cells of varying size along the
    /// cross axis (an EPG-style grid). Requires [`DataSize::Variable`].
    Variable { fixed: f64, variable: CellSizeFn },
}

impl ItemSize {
    /// Whether two sizes describe the same layout.
    ///
    /// Closures are compared by identity, so re-using the same `Arc` keeps the layout.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (
                Self::Grid {
                    min_width: aw,
                    min_height: ah,
                },
                Self::Grid {
                    min_width: bw,
                    min_height: bh,
                },
            ) => aw == bw && ah == bh,
            (
                Self::Variable {
                    fixed: a,
                    variable: fa,
                },
                Self::Variable {
                    fixed: b,
                    variable: fb,
                },
            ) => a == b && Arc::ptr_eq(fa, fb),
            _ => false,
        }
    }
}

impl core::fmt::Debug for ItemSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fixed(size) => f.debug_tuple("Fixed").field(size).finish(),
            Self::Grid {
                min_width,
                min_height,
            } => f
                .debug_struct("Grid")
                .field("min_width", min_width)
                .field("min_height", min_height)
                .finish(),
            Self::Variable { fixed, .. } => f
                .debug_struct("Variable")
                .field("fixed", fixed)
                .finish_non_exhaustive(),
        }
    }
}

/// Number of items, or rows plus per-row cell counts for variable grids.
#[derive(Clone)]
pub enum DataSize {
    Fixed(usize),
    Variable { fixed: usize, variable: CellCountFn },
}

impl DataSize {
    /// Number of items (or rows, for variable grids) along the primary axis.
    pub fn primary(&self) -> usize {
        match self {
            Self::Fixed(n) => *n,
            Self::Variable { fixed, .. } => *fixed,
        }
    }

    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (
                Self::Variable {
                    fixed: a,
                    variable: fa,
                },
                Self::Variable {
                    fixed: b,
                    variable: fb,
                },
            ) => a == b && Arc::ptr_eq(fa, fb),
            _ => false,
        }
    }
}

impl From<usize> for DataSize {
    fn from(n: usize) -> Self {
        Self::Fixed(n)
    }
}

impl core::fmt::Debug for DataSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fixed(n) => f.debug_tuple("Fixed").field(n).finish(),
            Self::Variable { fixed, .. } => f
                .debug_struct("Variable")
                .field("fixed", fixed)
                .finish_non_exhaustive(),
        }
    }
}

/// How slot positions are expressed to the rendering layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Positioning {
    /// Each slot is positioned relative to the viewport (scroll position already subtracted).
    #[default]
    ByItem,
    /// Slots are positioned in content space; the host translates the whole container by
    /// [`crate::ViewportEngine::container_offset`].
    ByContainer,
}

/// Configuration for [`crate::ViewportEngine`].
///
/// Cheap to clone: the variable-grid closures live in `Arc`s.
#[derive(Clone)]
pub struct ViewportOptions {
    pub direction: Direction,
    pub item_size: ItemSize,
    pub data_size: DataSize,
    /// Gap between adjacent items, in both axes for grids.
    pub spacing: f64,
    /// Extra lines rendered past the viewport as a scroll buffer.
    pub overhang: usize,
    pub positioning: Positioning,
    /// Container size known up front. When unset the engine stays unmeasured until
    /// [`crate::ViewportEngine::on_resize`] is called.
    pub client_size: Option<Size>,
    /// Content size along the variable axis of a variable grid. Computed from the cell sizes
    /// when unset.
    pub variable_max_scroll_size: Option<f64>,
}

impl ViewportOptions {
    /// A one-dimensional list of `data_size` items of `item_size` each.
    pub fn list(data_size: usize, item_size: f64) -> Self {
        Self::with_sizes(DataSize::Fixed(data_size), ItemSize::Fixed(item_size))
    }

    /// A grid of `data_size` items, each at least `min_width` × `min_height`.
    pub fn grid(data_size: usize, min_width: f64, min_height: f64) -> Self {
        Self::with_sizes(
            DataSize::Fixed(data_size),
            ItemSize::Grid {
                min_width,
                min_height,
            },
        )
    }

    /// A grid of `rows` fixed-size rows whose cells vary in size along the cross axis.
    pub fn variable(
        rows: usize,
        row_size: f64,
        cells_in_row: impl Fn(usize) -> usize + Send + Sync + 'static,
        cell_size: impl Fn(usize, usize) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::with_sizes(
            DataSize::Variable {
                fixed: rows,
                variable: Arc::new(cells_in_row),
            },
            ItemSize::Variable {
                fixed: row_size,
                variable: Arc::new(cell_size),
            },
        )
    }

    fn with_sizes(data_size: DataSize, item_size: ItemSize) -> Self {
        Self {
            direction: Direction::Vertical,
            item_size,
            data_size,
            spacing: 0.0,
            overhang: 3,
            positioning: Positioning::ByItem,
            client_size: None,
            variable_max_scroll_size: None,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_item_size(mut self, item_size: ItemSize) -> Self {
        self.item_size = item_size;
        self
    }

    pub fn with_data_size(mut self, data_size: impl Into<DataSize>) -> Self {
        self.data_size = data_size.into();
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_overhang(mut self, overhang: usize) -> Self {
        self.overhang = overhang;
        self
    }

    pub fn with_positioning(mut self, positioning: Positioning) -> Self {
        self.positioning = positioning;
        self
    }

    pub fn with_client_size(mut self, client_size: Option<Size>) -> Self {
        self.client_size = client_size;
        self
    }

    pub fn with_variable_max_scroll_size(mut self, size: Option<f64>) -> Self {
        self.variable_max_scroll_size = size;
        self
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.item_size, ItemSize::Variable { .. })
    }

    /// Whether switching from `self` to `other` invalidates the layout metrics
    /// (as opposed to only the data size).
    pub(crate) fn metrics_differ(&self, other: &Self) -> bool {
        self.direction != other.direction
            || !self.item_size.same_as(&other.item_size)
            || self.overhang != other.overhang
            || self.spacing != other.spacing
            || self.positioning != other.positioning
            || self.variable_max_scroll_size != other.variable_max_scroll_size
    }
}

impl core::fmt::Debug for ViewportOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewportOptions")
            .field("direction", &self.direction)
            .field("item_size", &self.item_size)
            .field("data_size", &self.data_size)
            .field("spacing", &self.spacing)
            .field("overhang", &self.overhang)
            .field("positioning", &self.positioning)
            .field("client_size", &self.client_size)
            .field("variable_max_scroll_size", &self.variable_max_scroll_size)
            .finish()
    }
}
