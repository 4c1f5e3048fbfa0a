use scrollport::Point;

use crate::fling::velocity;

/// Pointer tracking for one drag gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub last: Point,
    pub last_ms: u64,
    /// Pointer delta of the most recent move.
    pub delta: Point,
    pub moved: bool,
}

/// A finished drag: the last move's delta and the time since it happened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragRelease {
    pub delta: Point,
    pub dt_ms: u64,
    pub moved: bool,
}

impl DragRelease {
    /// Scroll velocity in px/ms. The scroll moves against the pointer.
    pub fn velocity(&self) -> Point {
        let dt = self.dt_ms as f64;
        Point::new(velocity(-self.delta.x, dt), velocity(-self.delta.y, dt))
    }
}

impl DragState {
    pub fn new(at: Point, now_ms: u64) -> Self {
        Self {
            last: at,
            last_ms: now_ms,
            delta: Point::ZERO,
            moved: false,
        }
    }

    /// Records a pointer move and returns its delta. Axes that cannot scroll report 0.
    pub fn move_to(&mut self, at: Point, now_ms: u64, horizontal: bool, vertical: bool) -> Point {
        let dx = if horizontal { at.x - self.last.x } else { 0.0 };
        let dy = if vertical { at.y - self.last.y } else { 0.0 };
        self.delta = Point::new(dx, dy);
        self.last = at;
        self.last_ms = now_ms;
        self.moved = true;
        self.delta
    }

    pub fn release(&self, now_ms: u64) -> DragRelease {
        DragRelease {
            delta: self.delta,
            dt_ms: now_ms.saturating_sub(self.last_ms),
            moved: self.moved,
        }
    }
}
