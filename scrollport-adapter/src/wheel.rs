/// Ratio of wheel delta units to pixels scrolled.
pub const WHEEL_DELTA_MULTIPLIER: f64 = 1.5;
/// Pixels per line for line-mode wheel deltas.
pub const PIXELS_PER_LINE: f64 = 39.0;
/// Largest distance one wheel event may scroll, relative to the client size.
pub const MAX_WHEEL_PAGE_RATIO: f64 = 0.2;

/// Unit of a wheel delta.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WheelMode {
    #[default]
    Pixel,
    Line,
    Page,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelEvent {
    /// Positive scrolls forward (down or right).
    pub delta: f64,
    pub mode: WheelMode,
}

impl WheelEvent {
    pub fn pixels(delta: f64) -> Self {
        Self {
            delta,
            mode: WheelMode::Pixel,
        }
    }

    pub fn lines(delta: f64) -> Self {
        Self {
            delta,
            mode: WheelMode::Line,
        }
    }

    pub fn pages(delta: f64) -> Self {
        Self {
            delta,
            mode: WheelMode::Page,
        }
    }
}

/// Converts a wheel event into a pixel distance, bounded by `±0.2 × client_size`.
pub fn normalize_wheel(event: WheelEvent, client_size: f64) -> f64 {
    let max_pixel = (client_size * MAX_WHEEL_PAGE_RATIO).max(0.0);
    match event.mode {
        WheelMode::Pixel => (event.delta * WHEEL_DELTA_MULTIPLIER).clamp(-max_pixel, max_pixel),
        WheelMode::Line => (event.delta * PIXELS_PER_LINE * WHEEL_DELTA_MULTIPLIER)
            .clamp(-max_pixel, max_pixel),
        WheelMode::Page if event.delta < 0.0 => -max_pixel,
        WheelMode::Page if event.delta > 0.0 => max_pixel,
        WheelMode::Page => 0.0,
    }
}
