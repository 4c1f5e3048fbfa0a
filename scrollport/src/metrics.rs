use crate::{Direction, Point, Size};

/// Client/content extent of one axis plus the furthest reachable scroll offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisMetrics {
    pub client_size: f64,
    pub content_size: f64,
    /// Always `max(0, content_size - client_size)`.
    pub max_scroll_offset: f64,
}

impl AxisMetrics {
    pub fn new(client_size: f64, content_size: f64) -> Self {
        Self {
            client_size,
            content_size,
            max_scroll_offset: (content_size - client_size).max(0.0),
        }
    }

    /// Clamps a scroll position into `[0, max_scroll_offset]`. NaN clamps to 0.
    pub fn clamp(&self, position: f64) -> f64 {
        if position.is_nan() {
            return 0.0;
        }
        position.clamp(0.0, self.max_scroll_offset)
    }

    /// Whether content overflows the client area on this axis.
    pub fn overflows(&self) -> bool {
        self.content_size > self.client_size
    }
}

/// Scroll bounds of both axes, recomputed whenever the container, the data size or the item
/// size changes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportMetrics {
    pub horizontal: AxisMetrics,
    pub vertical: AxisMetrics,
}

impl ViewportMetrics {
    pub fn axis(&self, direction: Direction) -> AxisMetrics {
        match direction {
            Direction::Horizontal => self.horizontal,
            Direction::Vertical => self.vertical,
        }
    }

    pub fn max_scroll_offset(&self) -> Point {
        Point::new(
            self.horizontal.max_scroll_offset,
            self.vertical.max_scroll_offset,
        )
    }

    pub fn clamp(&self, position: Point) -> Point {
        Point::new(
            self.horizontal.clamp(position.x),
            self.vertical.clamp(position.y),
        )
    }

    pub fn client_size(&self) -> Size {
        Size::new(self.horizontal.client_size, self.vertical.client_size)
    }

    pub fn content_size(&self) -> Size {
        Size::new(self.horizontal.content_size, self.vertical.content_size)
    }
}

/// Derives viewport metrics from a measured client size and the laid-out content size.
pub fn recompute_bounds(client_size: Size, content_size: Size) -> ViewportMetrics {
    ViewportMetrics {
        horizontal: AxisMetrics::new(client_size.width, content_size.width),
        vertical: AxisMetrics::new(client_size.height, content_size.height),
    }
}
