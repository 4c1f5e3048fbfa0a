use crate::ScrollDirection;

/// The scroll-position window inside which the current index window stays valid.
///
/// Moving forward past `max` or backward past `min` requires shifting the index window;
/// the threshold then slides by whole grid lines so the window always moves by an integral
/// number of lines.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollThreshold {
    pub min: f64,
    pub max: f64,
    /// Two grid lines; the smallest meaningful `max`.
    pub base: f64,
}

/// A threshold edge was crossed by `lines` whole grid lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crossing {
    pub direction: ScrollDirection,
    pub lines: usize,
}

impl ScrollThreshold {
    /// A fresh threshold for a window starting at index 0: unbounded backwards.
    pub fn new(base: f64) -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: base,
            base,
        }
    }

    pub fn contains(&self, position: f64) -> bool {
        self.min <= position && position <= self.max
    }

    pub fn should_recompute(&self, position: f64, direction: Option<ScrollDirection>) -> bool {
        match direction {
            Some(ScrollDirection::Forward) => position > self.max,
            Some(ScrollDirection::Backward) => position < self.min,
            None => false,
        }
    }

    /// Re-clamps `max` after the scroll bounds shrank.
    ///
    /// When the whole scroll range is shorter than `base`, the threshold collapses to
    /// `[-inf, base]`.
    pub fn sync(&mut self, max_scroll_offset: f64) {
        if self.max <= max_scroll_offset {
            return;
        }
        if max_scroll_offset < self.base {
            self.max = self.base;
            self.min = f64::NEG_INFINITY;
        } else {
            self.max = max_scroll_offset;
            self.min = max_scroll_offset - self.base;
        }
    }

    /// Moves the threshold so that it contains `position` again, if an edge was crossed in
    /// `direction`. Returns how many grid lines the index window has to shift.
    pub fn advance(
        &mut self,
        position: f64,
        direction: Option<ScrollDirection>,
        grid_size: f64,
        max_scroll_offset: f64,
    ) -> Option<Crossing> {
        if grid_size <= 0.0 {
            vwarn!(grid_size, "threshold: non-positive grid size");
            return None;
        }
        let min_of_max = self.base;
        let max_of_min = max_scroll_offset - min_of_max;

        let crossing = match direction {
            Some(ScrollDirection::Forward) if position > self.max => {
                let lines = ((position - self.max) / grid_size).ceil();
                self.max = max_scroll_offset.min(self.max + lines * grid_size);
                self.min = max_of_min.min(self.max - grid_size);
                Some(Crossing {
                    direction: ScrollDirection::Forward,
                    lines: lines as usize,
                })
            }
            Some(ScrollDirection::Backward) if position < self.min => {
                let lines = ((self.min - position) / grid_size).ceil();
                self.max = min_of_max.max(self.min - (lines * grid_size - grid_size));
                self.min = if self.max > min_of_max {
                    self.max - grid_size
                } else {
                    f64::NEG_INFINITY
                };
                Some(Crossing {
                    direction: ScrollDirection::Backward,
                    lines: lines as usize,
                })
            }
            _ => None,
        };

        #[cfg(feature = "tracing")]
        if let Some(c) = crossing {
            vtrace!(
                lines = c.lines,
                min = self.min,
                max = self.max,
                "threshold crossed"
            );
        }
        self.sync(max_scroll_offset);
        crossing
    }
}
