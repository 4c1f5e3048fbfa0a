use scrollport::Point;

/// Per-frame momentum decay used to turn a release velocity into a fling target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlingParams {
    pub frame_ms: u64,
    /// Velocity multiplier applied after every frame, in `(0, 1)`.
    pub friction: f64,
    /// The fling ends once a frame would move less than this many pixels.
    pub min_step: f64,
    pub max_frames: u32,
}

impl Default for FlingParams {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            friction: 0.95,
            min_step: 0.5,
            max_frames: 600,
        }
    }
}

/// Where a fling lands and how long it takes to get there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fling {
    pub target: Point,
    pub duration_ms: u64,
}

/// `d / dt`, or 0 when either is 0.
pub fn velocity(d: f64, dt_ms: f64) -> f64 {
    if d == 0.0 || dt_ms == 0.0 {
        0.0
    } else {
        d / dt_ms
    }
}

/// Simulates momentum from `from` with `velocity` (px/ms per axis) until it dies down.
pub fn simulate_fling(from: Point, velocity: Point, params: &FlingParams) -> Fling {
    let friction = if (0.0..1.0).contains(&params.friction) {
        params.friction
    } else {
        vwarn!(friction = params.friction, "fling friction out of range");
        FlingParams::default().friction
    };
    let frame = params.frame_ms.max(1) as f64;

    let (dx, fx) = decay(velocity.x * frame, friction, params.min_step, params.max_frames);
    let (dy, fy) = decay(velocity.y * frame, friction, params.min_step, params.max_frames);
    let frames = fx.max(fy);
    let fling = Fling {
        target: Point::new(from.x + dx, from.y + dy),
        duration_ms: u64::from(frames) * params.frame_ms.max(1),
    };
    vtrace!(
        vx = velocity.x,
        vy = velocity.y,
        duration_ms = fling.duration_ms,
        "fling simulated"
    );
    fling
}

/// Total travel and frame count of a per-frame `step` decaying by `friction`.
fn decay(mut step: f64, friction: f64, min_step: f64, max_frames: u32) -> (f64, u32) {
    let mut travelled = 0.0;
    let mut frames = 0;
    while step.abs() >= min_step && frames < max_frames {
        travelled += step;
        step *= friction;
        frames += 1;
    }
    (travelled, frames)
}
