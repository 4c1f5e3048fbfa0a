use std::sync::Arc;

use scrollport::ScrollInfo;

use crate::{Easing, FlingParams};

/// A lifecycle notification handler.
pub type ScrollCallback = Arc<dyn Fn(&ScrollInfo) + Send + Sync>;

/// Default duration of an animated scroll-to.
pub const ANIMATION_DURATION_MS: u64 = 1000;
/// A drag released longer than this after its last move ends without a fling.
pub const HOLD_TIME_MS: u64 = 50;

/// Configuration for [`crate::ScrollController`].
#[derive(Clone)]
pub struct ControllerOptions {
    pub animation_duration_ms: u64,
    pub hold_time_ms: u64,
    /// Easing of animated scroll-to and wheel animations.
    pub easing: Easing,
    /// Easing of fling animations.
    pub fling_easing: Easing,
    pub fling: FlingParams,

    /// Called once when a scroll episode (drag, wheel burst, animation) begins.
    pub on_scroll_start: Option<ScrollCallback>,
    /// Called after every position update.
    pub on_scroll: Option<ScrollCallback>,
    /// Called once when the episode ends, however it ends.
    pub on_scroll_stop: Option<ScrollCallback>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            animation_duration_ms: ANIMATION_DURATION_MS,
            hold_time_ms: HOLD_TIME_MS,
            easing: Easing::default(),
            fling_easing: Easing::EaseOut,
            fling: FlingParams::default(),
            on_scroll_start: None,
            on_scroll: None,
            on_scroll_stop: None,
        }
    }
}

impl ControllerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_animation_duration_ms(mut self, duration_ms: u64) -> Self {
        self.animation_duration_ms = duration_ms;
        self
    }

    pub fn with_hold_time_ms(mut self, hold_time_ms: u64) -> Self {
        self.hold_time_ms = hold_time_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_fling_easing(mut self, easing: Easing) -> Self {
        self.fling_easing = easing;
        self
    }

    pub fn with_fling(mut self, fling: FlingParams) -> Self {
        self.fling = fling;
        self
    }

    pub fn with_on_scroll_start(mut self, f: impl Fn(&ScrollInfo) + Send + Sync + 'static) -> Self {
        self.on_scroll_start = Some(Arc::new(f));
        self
    }

    pub fn with_on_scroll(mut self, f: impl Fn(&ScrollInfo) + Send + Sync + 'static) -> Self {
        self.on_scroll = Some(Arc::new(f));
        self
    }

    pub fn with_on_scroll_stop(mut self, f: impl Fn(&ScrollInfo) + Send + Sync + 'static) -> Self {
        self.on_scroll_stop = Some(Arc::new(f));
        self
    }
}

impl core::fmt::Debug for ControllerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ControllerOptions")
            .field("animation_duration_ms", &self.animation_duration_ms)
            .field("hold_time_ms", &self.hold_time_ms)
            .field("easing", &self.easing)
            .field("fling_easing", &self.fling_easing)
            .field("fling", &self.fling)
            .field("on_scroll_start", &self.on_scroll_start.is_some())
            .field("on_scroll", &self.on_scroll.is_some())
            .field("on_scroll_stop", &self.on_scroll_stop.is_some())
            .finish()
    }
}
