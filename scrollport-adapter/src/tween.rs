use scrollport::{Point, ViewportMetrics};

/// Time-based interpolation between two scroll positions, sampled by the adapter's clock.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: Point,
    pub to: Point,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: Point, to: Point, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now_ms: u64) -> f64 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now_ms: u64) -> Point {
        let eased = self.easing.sample(self.progress(now_ms));
        Point::new(
            self.from.x + (self.to.x - self.from.x) * eased,
            self.from.y + (self.to.y - self.from.y) * eased,
        )
    }

    /// Clamps the target into new bounds and rebases `from` so the tween passes through
    /// `current` at `now_ms`. `start_ms` and `duration_ms` are kept, so the animation
    /// continues from where the viewport is instead of restarting.
    ///
    /// Returns whether the target moved.
    pub fn clamp_target(
        &mut self,
        metrics: &ViewportMetrics,
        current: Point,
        now_ms: u64,
    ) -> bool {
        let clamped = metrics.clamp(self.to);
        let changed = clamped != self.to;
        self.to = clamped;

        let eased = self.easing.sample(self.progress(now_ms));
        let remaining = 1.0 - eased;
        self.from = if remaining > f64::EPSILON {
            Point::new(
                (current.x - clamped.x * eased) / remaining,
                (current.y - clamped.y * eased) / remaining,
            )
        } else {
            clamped
        };
        changed
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Easing {
    Linear,
    SmoothStep,
    #[default]
    EaseInOutCubic,
    /// Cubic ease-out: fast start, slow landing. Used for flings.
    EaseOut,
}

impl Easing {
    pub fn sample(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
            Self::EaseOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
        }
    }
}
