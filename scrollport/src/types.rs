/// The primary (virtualized) scroll axis of a list or grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Horizontal,
    #[default]
    Vertical,
}

impl Direction {
    pub fn is_vertical(self) -> bool {
        self == Self::Vertical
    }
}

/// Direction of a single scroll step along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    /// Returns the direction of travel from `from` to `to`, or `None` if they are equal.
    pub fn between(from: f64, to: f64) -> Option<Self> {
        if to > from {
            Some(Self::Forward)
        } else if to < from {
            Some(Self::Backward)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Where a rendering slot should be placed, in viewport (or content) coordinates.
///
/// `width`/`height` are only set for grids, where the item size is derived from the
/// container size rather than fixed by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPosition {
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// The contiguous range of data indices currently materialized as slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexWindow {
    pub first_index: usize,
    pub num_of_items: usize,
}

impl IndexWindow {
    pub fn new(first_index: usize, num_of_items: usize) -> Self {
        Self {
            first_index,
            num_of_items,
        }
    }

    /// Exclusive end of the window, clamped to `data_size`.
    pub fn end(&self, data_size: usize) -> usize {
        self.first_index
            .saturating_add(self.num_of_items)
            .min(data_size)
    }

    pub fn is_empty(&self) -> bool {
        self.num_of_items == 0
    }
}

/// Indices that intersect the viewport (no overhang), both inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub first: usize,
    pub last: usize,
}

/// Identity of a renderable item.
///
/// `column` is only set in variable grids, where `index` is the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId {
    pub index: usize,
    pub column: Option<usize>,
}

impl ItemId {
    pub fn item(index: usize) -> Self {
        Self {
            index,
            column: None,
        }
    }

    pub fn cell(row: usize, column: usize) -> Self {
        Self {
            index: row,
            column: Some(column),
        }
    }
}

/// Which end of the viewport an item should line up with in a scroll-to-index request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StickTo {
    #[default]
    Start,
    End,
}

/// Payload of lifecycle notifications: where the viewport is and what it shows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollInfo {
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub visible_range: Option<VisibleRange>,
}

/// A corner or edge of the content to scroll to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScrollAlign {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ScrollAlign {
    pub fn is_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    pub fn is_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    pub fn is_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }
}

/// Where a scroll-to request should land.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScrollTarget {
    /// Absolute offsets; a missing axis keeps its current position.
    Position { x: Option<f64>, y: Option<f64> },
    /// An edge or corner of the content.
    Align(ScrollAlign),
    /// The start of an item (a row, in variable grids).
    Index { index: usize, stick_to: StickTo },
}

impl ScrollTarget {
    pub fn position(x: f64, y: f64) -> Self {
        Self::Position {
            x: Some(x),
            y: Some(y),
        }
    }

    pub fn index(index: usize) -> Self {
        Self::Index {
            index,
            stick_to: StickTo::Start,
        }
    }
}
