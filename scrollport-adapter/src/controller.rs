use scrollport::{
    BoundsUpdate, Container, DataSize, Point, Renderer, ScrollDirection, ScrollInfo, ScrollTarget,
    Size, SlotUpdate, ViewportEngine, ViewportOptions,
};

use crate::drag::DragState;
use crate::fling::simulate_fling;
use crate::options::ScrollCallback;
use crate::wheel::{WheelEvent, normalize_wheel};
use crate::{ControllerOptions, Easing, Tween};

/// Targets closer than this to the end of the content snap to it.
const EPSILON: f64 = 1.0;

/// What is currently moving the scroll position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
    Flinging,
    Animating,
}

/// A programmatic scroll request.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollTo {
    pub target: ScrollTarget,
    pub animate: bool,
}

impl ScrollTo {
    /// An animated scroll to `target`.
    pub fn new(target: ScrollTarget) -> Self {
        Self {
            target,
            animate: true,
        }
    }

    /// Jumps to `target` without animating.
    pub fn immediate(target: ScrollTarget) -> Self {
        Self {
            target,
            animate: false,
        }
    }

    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }
}

impl From<ScrollTarget> for ScrollTo {
    fn from(target: ScrollTarget) -> Self {
        Self::new(target)
    }
}

/// Consecutive wheel events in one direction share a single animated target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct WheelAccumulator {
    direction: Option<ScrollDirection>,
    target: Option<Point>,
}

/// A framework-neutral scroll position controller that wraps a [`ViewportEngine`].
///
/// It turns drag, wheel and programmatic scroll-to input into scroll positions, runs fling and
/// scroll-to animations, and emits `on_scroll_start` / `on_scroll` / `on_scroll_stop` with
/// exactly one start and one stop per scroll episode, however the episode ends.
///
/// It holds no clock and no UI objects. Adapters drive it by calling:
/// - `on_resize` / `sync_client_size` when the container is measured
/// - `drag_start` / `drag_move` / `drag_end` and `wheel` for user input
/// - `tick(now_ms)` every frame while [`Self::needs_frame`] is true
/// - `render` to push slot changes to the rendering layer
#[derive(Clone, Debug)]
pub struct ScrollController {
    engine: ViewportEngine,
    options: ControllerOptions,
    phase: Phase,
    tween: Option<Tween>,
    drag: Option<DragState>,
    wheel: WheelAccumulator,
    episode_open: bool,
    pending: Option<ScrollTo>,
}

impl ScrollController {
    pub fn new(viewport: ViewportOptions, options: ControllerOptions) -> Self {
        Self::from_engine(ViewportEngine::new(viewport), options)
    }

    pub fn from_engine(engine: ViewportEngine, options: ControllerOptions) -> Self {
        Self {
            engine,
            options,
            phase: Phase::Idle,
            tween: None,
            drag: None,
            wheel: WheelAccumulator::default(),
            episode_open: false,
            pending: None,
        }
    }

    pub fn engine(&self) -> &ViewportEngine {
        &self.engine
    }

    pub fn into_engine(self) -> ViewportEngine {
        self.engine
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ControllerOptions) {
        self.options = options;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn tween(&self) -> Option<&Tween> {
        self.tween.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Whether the adapter should schedule another `tick`.
    pub fn needs_frame(&self) -> bool {
        self.is_animating()
    }

    /// A scroll-to waiting for the first measurement.
    pub fn pending_scroll_to(&self) -> Option<ScrollTo> {
        self.pending
    }

    pub fn scroll_position(&self) -> Point {
        self.engine.scroll_position()
    }

    pub fn scroll_info(&self) -> ScrollInfo {
        self.engine.scroll_info()
    }

    pub fn render(&mut self, renderer: &mut impl Renderer) -> SlotUpdate {
        self.engine.render(renderer)
    }

    pub fn on_resize(&mut self, client_size: Size, now_ms: u64) -> BoundsUpdate {
        let update = self.engine.on_resize(client_size);
        self.after_bounds_change(update, now_ms);
        update
    }

    pub fn sync_client_size(
        &mut self,
        container: &impl Container,
        now_ms: u64,
    ) -> Option<BoundsUpdate> {
        let update = self.engine.sync_client_size(container)?;
        self.after_bounds_change(update, now_ms);
        Some(update)
    }

    pub fn on_data_change(
        &mut self,
        data_size: impl Into<DataSize>,
        now_ms: u64,
    ) -> Option<BoundsUpdate> {
        let update = self.engine.on_data_change(data_size)?;
        self.after_bounds_change(update, now_ms);
        Some(update)
    }

    pub fn update_viewport_options(
        &mut self,
        f: impl FnOnce(&mut ViewportOptions),
        now_ms: u64,
    ) -> Option<BoundsUpdate> {
        let update = self.engine.update_options(f)?;
        self.after_bounds_change(update, now_ms);
        Some(update)
    }

    /// Scrolls to `request.target`, clamped to the scroll bounds.
    ///
    /// Before the container is measured the request is kept and replayed on the next
    /// measurement; a later request replaces it.
    pub fn scroll_to(&mut self, request: impl Into<ScrollTo>, now_ms: u64) {
        let request = request.into();
        if !self.engine.is_measured() {
            vdebug!("scroll_to deferred until the container is measured");
            self.pending = Some(request);
            return;
        }
        let target = self.engine.resolve_target(&request.target);
        self.drag = None;
        self.wheel = WheelAccumulator::default();
        self.start(
            target,
            request.animate,
            Phase::Animating,
            self.options.animation_duration_ms,
            self.options.easing,
            now_ms,
        );
    }

    /// Cancels any drag or animation and returns to [`Phase::Idle`].
    ///
    /// Emits `on_scroll_stop` if a scroll episode is open; calling it again is a no-op.
    pub fn stop(&mut self) {
        self.tween = None;
        self.drag = None;
        self.wheel = WheelAccumulator::default();
        self.phase = Phase::Idle;
        if self.episode_open {
            self.episode_open = false;
            vdebug!("scroll stop");
            self.notify(self.options.on_scroll_stop.as_ref());
        }
    }

    /// Advances the running animation. Returns the new scroll position, or `None` when idle.
    ///
    /// A fling ends early once it is within a pixel of its target.
    pub fn tick(&mut self, now_ms: u64) -> Option<Point> {
        let tween = self.tween?;
        let metrics = *self.engine.metrics();
        let target = metrics.clamp(tween.to);
        let at = metrics.clamp(tween.sample(now_ms));
        let settled = self.phase == Phase::Flinging
            && (target.x - at.x).abs() < EPSILON
            && (target.y - at.y).abs() < EPSILON;
        if tween.is_done(now_ms) || settled {
            self.scroll(target);
            self.stop();
        } else {
            self.scroll(at);
        }
        Some(self.engine.scroll_position())
    }

    /// Starts a drag gesture. A running animation is stopped first.
    pub fn drag_start(&mut self, at: Point, now_ms: u64) {
        if self.phase != Phase::Idle {
            self.stop();
        }
        self.drag = Some(DragState::new(at, now_ms));
        self.phase = Phase::Dragging;
    }

    /// Moves the content with the pointer. The first move opens the scroll episode.
    pub fn drag_move(&mut self, at: Point, now_ms: u64) -> Option<Point> {
        if self.phase != Phase::Dragging {
            return None;
        }
        let horizontal = self.engine.can_scroll_horizontally();
        let vertical = self.engine.can_scroll_vertically();
        let delta = self.drag.as_mut()?.move_to(at, now_ms, horizontal, vertical);

        self.open_episode();
        let current = self.engine.scroll_position();
        self.scroll(Point::new(current.x - delta.x, current.y - delta.y));
        Some(self.engine.scroll_position())
    }

    /// Ends the drag: flings with the release velocity, or stops if the pointer was held still
    /// for longer than the hold time.
    pub fn drag_end(&mut self, now_ms: u64) {
        if self.phase != Phase::Dragging {
            return;
        }
        self.phase = Phase::Idle;
        let Some(drag) = self.drag.take() else {
            return;
        };
        let release = drag.release(now_ms);
        if !release.moved {
            return;
        }
        if release.dt_ms > self.options.hold_time_ms {
            vtrace!(dt_ms = release.dt_ms, "drag held, no fling");
            self.stop();
            return;
        }

        let fling = simulate_fling(
            self.engine.scroll_position(),
            release.velocity(),
            &self.options.fling,
        );
        if fling.duration_ms == 0 {
            self.stop();
            return;
        }
        self.start(
            fling.target,
            true,
            Phase::Flinging,
            fling.duration_ms,
            self.options.fling_easing,
            now_ms,
        );
    }

    /// Scrolls by a wheel event. Returns `false` when the event was ignored (while dragging,
    /// before measurement, or when nothing can scroll).
    pub fn wheel(&mut self, event: WheelEvent, now_ms: u64) -> bool {
        if self.phase == Phase::Dragging || !self.engine.is_measured() {
            return false;
        }
        let vertical = self.engine.can_scroll_vertically();
        let client = self.engine.metrics().client_size();
        let extent = if vertical {
            client.height
        } else if self.engine.can_scroll_horizontally() {
            client.width
        } else {
            return false;
        };

        let delta = normalize_wheel(event, extent);
        let Some(direction) = ScrollDirection::between(0.0, delta) else {
            return false;
        };
        if self.wheel.direction != Some(direction) {
            self.wheel = WheelAccumulator {
                direction: Some(direction),
                target: None,
            };
        }
        let base = self
            .wheel
            .target
            .unwrap_or_else(|| self.engine.scroll_position());
        let target = if vertical {
            Point::new(base.x, base.y + delta)
        } else {
            Point::new(base.x + delta, base.y)
        };
        self.wheel.target = Some(target);
        self.start(
            target,
            true,
            Phase::Animating,
            self.options.animation_duration_ms,
            self.options.easing,
            now_ms,
        );
        true
    }

    fn start(
        &mut self,
        target: Point,
        animate: bool,
        phase: Phase,
        duration_ms: u64,
        easing: Easing,
        now_ms: u64,
    ) {
        self.tween = None;
        self.open_episode();

        let metrics = *self.engine.metrics();
        let max = metrics.max_scroll_offset();
        let mut target = target;
        if (max.x - target.x).abs() < EPSILON {
            target.x = max.x;
        }
        if (max.y - target.y).abs() < EPSILON {
            target.y = max.y;
        }
        let target = metrics.clamp(target);

        if animate {
            vtrace!(x = target.x, y = target.y, duration_ms, "animation started");
            self.tween = Some(Tween::new(
                self.engine.scroll_position(),
                target,
                now_ms,
                duration_ms,
                easing,
            ));
            self.phase = phase;
        } else {
            self.scroll(target);
            self.stop();
        }
    }

    fn scroll(&mut self, to: Point) {
        self.engine.set_scroll_position(to);
        self.notify(self.options.on_scroll.as_ref());
    }

    fn open_episode(&mut self) {
        if self.episode_open {
            return;
        }
        self.episode_open = true;
        vdebug!("scroll start");
        self.notify(self.options.on_scroll_start.as_ref());
    }

    fn notify(&self, callback: Option<&ScrollCallback>) {
        if let Some(f) = callback {
            f(&self.engine.scroll_info());
        }
    }

    fn after_bounds_change(&mut self, update: BoundsUpdate, now_ms: u64) {
        let current = self.engine.scroll_position();
        if let Some(tween) = &mut self.tween {
            if tween.clamp_target(&update.metrics, current, now_ms) {
                vdebug!(
                    x = tween.to.x,
                    y = tween.to.y,
                    "in-flight target re-clamped"
                );
            }
        } else if let Some(position) = update.reclamped {
            if self.phase == Phase::Dragging {
                if self.episode_open {
                    self.notify(self.options.on_scroll.as_ref());
                }
            } else {
                self.start(
                    position,
                    false,
                    Phase::Idle,
                    0,
                    self.options.easing,
                    now_ms,
                );
            }
        }

        if !self.engine.is_measured() {
            return;
        }
        if let Some(request) = self.pending.take() {
            vdebug!(animate = request.animate, "replaying deferred scroll_to");
            self.scroll_to(request, now_ms);
        }
    }
}
