use crate::*;

use scrollport::{Point, ScrollAlign, ScrollInfo, ScrollTarget, Size, ViewportOptions};
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Event {
    Start,
    Scroll,
    Stop,
}

type Log = Arc<Mutex<Vec<(Event, ScrollInfo)>>>;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }
}

fn recording_options() -> (ControllerOptions, Log) {
    let log: Log = Arc::default();
    let (a, b, c) = (log.clone(), log.clone(), log.clone());
    let options = ControllerOptions::default()
        .with_on_scroll_start(move |info| a.lock().unwrap().push((Event::Start, *info)))
        .with_on_scroll(move |info| b.lock().unwrap().push((Event::Scroll, *info)))
        .with_on_scroll_stop(move |info| c.lock().unwrap().push((Event::Stop, *info)));
    (options, log)
}

fn events(log: &Log) -> Vec<Event> {
    log.lock().unwrap().iter().map(|(e, _)| *e).collect()
}

fn count(log: &Log, event: Event) -> usize {
    events(log).into_iter().filter(|e| *e == event).count()
}

fn list_controller() -> (ScrollController, Log) {
    let (options, log) = recording_options();
    let c = ScrollController::new(
        ViewportOptions::list(1000, 72.0).with_client_size(Some(Size::new(300.0, 550.0))),
        options,
    );
    (c, log)
}

const MAX_Y: f64 = 72_000.0 - 550.0;

fn run_until_idle(c: &mut ScrollController, mut now_ms: u64) -> u64 {
    let mut frames = 0;
    while c.needs_frame() {
        now_ms += 16;
        c.tick(now_ms);
        frames += 1;
        assert!(frames < 10_000, "animation never finished");
    }
    now_ms
}

#[test]
fn immediate_scroll_to_is_idempotent() {
    let (mut c, log) = list_controller();
    let origin = ScrollTo::immediate(ScrollTarget::position(0.0, 0.0));
    c.scroll_to(origin, 0);
    assert_eq!(c.scroll_position(), Point::ZERO);
    c.scroll_to(origin, 0);
    assert_eq!(c.scroll_position(), Point::ZERO);
    assert_eq!(events(&log), [
        Event::Start,
        Event::Scroll,
        Event::Stop,
        Event::Start,
        Event::Scroll,
        Event::Stop,
    ]);
    assert_eq!(c.phase(), Phase::Idle);
}

#[test]
fn scroll_to_clamps_out_of_range_targets() {
    let (mut c, _log) = list_controller();
    c.scroll_to(ScrollTo::immediate(ScrollTarget::position(0.0, 1.0e6)), 0);
    assert_eq!(c.scroll_position().y, MAX_Y);
    c.scroll_to(ScrollTo::immediate(ScrollTarget::position(0.0, -500.0)), 0);
    assert_eq!(c.scroll_position().y, 0.0);

    c.scroll_to(ScrollTo::new(ScrollTarget::position(0.0, 1.0e6)), 0);
    assert_eq!(c.tween().unwrap().to.y, MAX_Y);
    run_until_idle(&mut c, 0);
    assert_eq!(c.scroll_position().y, MAX_Y);
}

#[test]
fn target_near_the_end_snaps_to_it() {
    let (mut c, _log) = list_controller();
    c.scroll_to(ScrollTo::new(ScrollTarget::position(0.0, MAX_Y - 0.5)), 0);
    assert_eq!(c.tween().unwrap().to.y, MAX_Y);
    c.scroll_to(ScrollTo::new(ScrollTarget::position(0.0, MAX_Y - 2.0)), 0);
    assert_eq!(c.tween().unwrap().to.y, MAX_Y - 2.0);
}

#[test]
fn animated_scroll_to_runs_for_the_configured_duration() {
    let (mut c, log) = list_controller();
    c.scroll_to(ScrollTo::new(ScrollTarget::position(0.0, 5000.0)), 0);
    assert_eq!(c.phase(), Phase::Animating);
    assert!(c.needs_frame());

    let mut last = 0.0;
    let mut ticks = 0;
    let mut now = 0;
    while now <= 1000 {
        let y = c.tick(now).unwrap().y;
        assert!(y >= last);
        last = y;
        ticks += 1;
        now += 50;
    }
    assert_eq!(last, 5000.0);
    assert!(!c.needs_frame());
    assert_eq!(c.tick(now), None);
    assert_eq!(c.phase(), Phase::Idle);

    let evs = events(&log);
    assert_eq!(evs.first(), Some(&Event::Start));
    assert_eq!(evs.last(), Some(&Event::Stop));
    assert_eq!(count(&log, Event::Scroll), ticks);

    let entries = log.lock().unwrap();
    let (_, start) = entries[0];
    assert_eq!(start.scroll_top, 0.0);
    assert_eq!(start.visible_range.map(|r| r.first), Some(0));
    let (_, stop) = entries[entries.len() - 1];
    assert_eq!(stop.scroll_top, 5000.0);
    assert_eq!(stop, c.scroll_info());
}

#[test]
fn scroll_to_before_measurement_is_replayed() {
    let (options, log) = recording_options();
    let mut c = ScrollController::new(ViewportOptions::list(1000, 72.0), options);
    c.scroll_to(ScrollTo::immediate(ScrollTarget::index(20)), 0);
    c.scroll_to(ScrollTo::immediate(ScrollTarget::index(30)), 0);
    assert!(events(&log).is_empty());
    assert_eq!(
        c.pending_scroll_to(),
        Some(ScrollTo::immediate(ScrollTarget::index(30)))
    );

    c.on_resize(Size::new(300.0, 550.0), 5);
    assert_eq!(c.pending_scroll_to(), None);
    assert_eq!(c.scroll_position().y, 30.0 * 72.0);
    assert_eq!(events(&log), [Event::Start, Event::Scroll, Event::Stop]);
}

#[test]
fn drag_moves_against_the_pointer_then_flings() {
    let (mut c, log) = list_controller();
    c.drag_start(Point::new(0.0, 500.0), 0);
    assert_eq!(c.phase(), Phase::Dragging);
    assert!(events(&log).is_empty());

    let p = c.drag_move(Point::new(0.0, 400.0), 10).unwrap();
    assert_eq!(p, Point::new(0.0, 100.0));
    assert_eq!(events(&log), [Event::Start, Event::Scroll]);

    c.drag_end(15);
    assert_eq!(c.phase(), Phase::Flinging);
    let target = c.tween().unwrap().to;
    assert!(target.y > 100.0);
    assert_eq!(target.x, 0.0);
    assert_eq!(c.tween().unwrap().easing, Easing::EaseOut);

    run_until_idle(&mut c, 15);
    assert_eq!(c.scroll_position(), target);
    assert_eq!(count(&log, Event::Start), 1);
    assert_eq!(count(&log, Event::Stop), 1);
    assert_eq!(events(&log).last(), Some(&Event::Stop));
}

#[test]
fn fling_settles_once_within_a_pixel_of_its_target() {
    let (mut c, log) = list_controller();
    c.drag_start(Point::new(0.0, 500.0), 0);
    c.drag_move(Point::new(0.0, 400.0), 10);
    c.drag_end(15);
    let tween = *c.tween().unwrap();
    assert_eq!(tween.easing, Easing::EaseOut);

    let end = run_until_idle(&mut c, 15);
    assert!(end < tween.start_ms + tween.duration_ms);
    assert_eq!(c.phase(), Phase::Idle);
    assert_eq!(c.scroll_position(), tween.to);
    assert_eq!(count(&log, Event::Stop), 1);
}

#[test]
fn drag_held_past_hold_time_does_not_fling() {
    let (mut c, log) = list_controller();
    c.drag_start(Point::new(0.0, 500.0), 0);
    c.drag_move(Point::new(0.0, 450.0), 10);
    c.drag_end(10 + HOLD_TIME_MS + 40);
    assert_eq!(c.phase(), Phase::Idle);
    assert!(!c.needs_frame());
    assert_eq!(c.scroll_position().y, 50.0);
    assert_eq!(events(&log), [Event::Start, Event::Scroll, Event::Stop]);
}

#[test]
fn drag_without_movement_is_silent() {
    let (mut c, log) = list_controller();
    c.drag_start(Point::new(0.0, 500.0), 0);
    c.drag_end(5);
    assert_eq!(c.phase(), Phase::Idle);
    assert!(events(&log).is_empty());
}

#[test]
fn drag_interrupts_running_animation() {
    let (mut c, log) = list_controller();
    c.scroll_to(ScrollTo::new(ScrollTarget::position(0.0, 3000.0)), 0);
    c.tick(100);
    c.drag_start(Point::new(0.0, 300.0), 100);
    assert!(!c.is_animating());
    assert_eq!(events(&log), [Event::Start, Event::Scroll, Event::Stop]);

    c.drag_move(Point::new(0.0, 290.0), 110);
    assert_eq!(count(&log, Event::Start), 2);
}

#[test]
fn wheel_deltas_are_normalized() {
    assert_eq!(normalize_wheel(WheelEvent::pixels(20.0), 550.0), 30.0);
    assert_eq!(normalize_wheel(WheelEvent::pixels(100.0), 550.0), 110.0);
    assert_eq!(normalize_wheel(WheelEvent::pixels(-100.0), 550.0), -110.0);
    assert_eq!(normalize_wheel(WheelEvent::lines(1.0), 550.0), 58.5);
    assert_eq!(normalize_wheel(WheelEvent::pages(-3.0), 550.0), -110.0);
    assert_eq!(normalize_wheel(WheelEvent::pages(0.0), 550.0), 0.0);
}

#[test]
fn wheel_accumulates_in_one_direction() {
    let (mut c, log) = list_controller();
    assert!(c.wheel(WheelEvent::pixels(100.0), 0));
    assert_eq!(c.tween().unwrap().to.y, 110.0);
    assert!(c.wheel(WheelEvent::pixels(100.0), 0));
    assert_eq!(c.tween().unwrap().to.y, 220.0);

    // Halfway through the second animation, the wheel turns around.
    c.tick(500);
    assert_eq!(c.scroll_position().y, 110.0);
    assert!(c.wheel(WheelEvent::pixels(-10.0), 500));
    assert_eq!(c.tween().unwrap().to.y, 95.0);

    assert_eq!(count(&log, Event::Start), 1);
    run_until_idle(&mut c, 500);
    assert_eq!(c.scroll_position().y, 95.0);
    assert_eq!(count(&log, Event::Stop), 1);

    // A new burst starts from the current position.
    assert!(c.wheel(WheelEvent::pixels(10.0), 5000));
    assert_eq!(c.tween().unwrap().to.y, 110.0);
    assert_eq!(count(&log, Event::Start), 2);
}

#[test]
fn wheel_is_ignored_while_dragging_or_unmeasured() {
    let (mut c, log) = list_controller();
    c.drag_start(Point::new(0.0, 0.0), 0);
    assert!(!c.wheel(WheelEvent::pixels(100.0), 0));
    assert!(events(&log).is_empty());

    let mut unmeasured =
        ScrollController::new(ViewportOptions::list(10, 72.0), ControllerOptions::default());
    assert!(!unmeasured.wheel(WheelEvent::pixels(100.0), 0));
}

#[test]
fn stop_emits_once_per_episode() {
    let (mut c, log) = list_controller();
    c.stop();
    assert!(events(&log).is_empty());

    c.scroll_to(ScrollTo::new(ScrollTarget::position(0.0, 800.0)), 0);
    c.tick(16);
    c.stop();
    c.stop();
    assert_eq!(count(&log, Event::Start), 1);
    assert_eq!(count(&log, Event::Stop), 1);
    assert!(!c.needs_frame());
    assert_eq!(c.tick(32), None);
}

#[test]
fn random_interrupts_pair_start_and_stop() {
    let (mut c, log) = list_controller();
    let mut rng = Lcg::new(42);
    let mut now = 0u64;

    for cycle in 0..100 {
        match rng.gen_range_u64(0, 3) {
            0 => {
                let y = rng.gen_range_u64(0, 80_000) as f64;
                c.scroll_to(ScrollTo::new(ScrollTarget::position(0.0, y)), now);
            }
            1 => {
                let d = rng.gen_range_u64(1, 300) as f64;
                let d = if rng.gen_range_u64(0, 2) == 0 { d } else { -d };
                c.wheel(WheelEvent::pixels(d), now);
            }
            _ => {
                let dy = rng.gen_range_u64(1, 200) as f64;
                c.drag_start(Point::new(0.0, 400.0), now);
                now += 8;
                c.drag_move(Point::new(0.0, 400.0 - dy), now);
                now += rng.gen_range_u64(0, 80);
                c.drag_end(now);
            }
        }
        for _ in 0..rng.gen_range_u64(0, 80) {
            now += 16;
            c.tick(now);
        }
        c.stop();

        assert_eq!(c.phase(), Phase::Idle);
        assert!(!c.needs_frame());
        assert_eq!(count(&log, Event::Start), cycle + 1);
        assert_eq!(count(&log, Event::Stop), cycle + 1);
        now += 100;
    }

    let mut open = false;
    for e in events(&log) {
        match e {
            Event::Start => {
                assert!(!open, "start while an episode is open");
                open = true;
            }
            Event::Scroll => assert!(open, "scroll outside an episode"),
            Event::Stop => {
                assert!(open, "stop without start");
                open = false;
            }
        }
    }
}

#[test]
fn resize_mid_animation_reclamps_target_and_keeps_timing() {
    let (mut c, log) = list_controller();
    c.scroll_to(ScrollTo::new(ScrollTarget::Align(ScrollAlign::Bottom)), 0);
    assert_eq!(c.tween().unwrap().to.y, MAX_Y);
    c.tick(400);

    c.on_resize(Size::new(300.0, 1000.0), 400);
    let tween = *c.tween().unwrap();
    assert_eq!(tween.to.y, 72_000.0 - 1000.0);
    assert_eq!(tween.start_ms, 0);
    assert_eq!(tween.duration_ms, ANIMATION_DURATION_MS);

    c.tick(1000);
    assert_eq!(c.scroll_position().y, 72_000.0 - 1000.0);
    assert_eq!(count(&log, Event::Start), 1);
    assert_eq!(count(&log, Event::Stop), 1);
}

#[test]
fn shrinking_data_while_idle_reports_the_new_position() {
    let (mut c, log) = list_controller();
    c.scroll_to(ScrollTo::immediate(ScrollTarget::Align(ScrollAlign::Bottom)), 0);
    log.lock().unwrap().clear();

    let update = c.on_data_change(500usize, 10).unwrap();
    assert_eq!(update.reclamped, Some(Point::new(0.0, 500.0 * 72.0 - 550.0)));
    assert_eq!(events(&log), [Event::Start, Event::Scroll, Event::Stop]);
    let (_, stop) = *log.lock().unwrap().last().unwrap();
    assert_eq!(stop.scroll_top, 500.0 * 72.0 - 550.0);
}

#[test]
fn tween_clamp_rebases_on_the_current_position() {
    let mut t = Tween::new(
        Point::ZERO,
        Point::new(0.0, 1000.0),
        100,
        200,
        Easing::Linear,
    );
    assert_eq!(t.sample(200), Point::new(0.0, 500.0));

    let metrics = scrollport::recompute_bounds(Size::new(100.0, 100.0), Size::new(100.0, 900.0));
    assert!(t.clamp_target(&metrics, Point::new(0.0, 500.0), 200));
    assert_eq!(t.to.y, 800.0);
    assert_eq!((t.start_ms, t.duration_ms), (100, 200));
    assert_eq!(t.sample(200), Point::new(0.0, 500.0));
    assert_eq!(t.sample(300), Point::new(0.0, 800.0));
    assert!(!t.clamp_target(&metrics, Point::new(0.0, 500.0), 200));

    // The viewport was already clamped past the new target.
    let metrics = scrollport::recompute_bounds(Size::new(100.0, 100.0), Size::new(100.0, 500.0));
    assert!(t.clamp_target(&metrics, Point::new(0.0, 400.0), 200));
    assert_eq!(t.sample(200), Point::new(0.0, 400.0));
    assert_eq!(t.sample(250), Point::new(0.0, 400.0));
}

#[test]
fn shrinking_data_mid_animation_never_jumps_back() {
    for data_size in [100usize, 500] {
        let (mut c, log) = list_controller();
        c.scroll_to(ScrollTo::new(ScrollTarget::Align(ScrollAlign::Bottom)), 0);
        c.tick(400);
        let before = c.scroll_position().y;

        c.on_data_change(data_size, 400);
        let target = data_size as f64 * 72.0 - 550.0;
        assert_eq!(c.tween().unwrap().to.y, target);
        let mut last = c.scroll_position().y;
        assert_eq!(last, before.min(target));

        let mut now = 400;
        while c.needs_frame() {
            now += 16;
            let y = c.tick(now).unwrap().y;
            assert!(y >= last - 1e-6, "moved back from {last} to {y}");
            assert!(y <= target + 1e-6);
            last = y;
        }
        assert!(now <= ANIMATION_DURATION_MS + 16);
        assert_eq!(c.scroll_position().y, target);
        assert_eq!(count(&log, Event::Start), 1);
        assert_eq!(count(&log, Event::Stop), 1);
    }
}

#[test]
fn easing_curves_hit_their_endpoints() {
    for easing in [
        Easing::Linear,
        Easing::SmoothStep,
        Easing::EaseInOutCubic,
        Easing::EaseOut,
    ] {
        assert_eq!(easing.sample(0.0), 0.0);
        assert_eq!(easing.sample(1.0), 1.0);
    }
    assert!(Easing::EaseOut.sample(0.25) > 0.25);
}

#[test]
fn fling_decays_to_a_stop() {
    let params = FlingParams::default();
    let still = simulate_fling(Point::new(5.0, 5.0), Point::ZERO, &params);
    assert_eq!(still.target, Point::new(5.0, 5.0));
    assert_eq!(still.duration_ms, 0);

    let fling = simulate_fling(Point::ZERO, Point::new(0.0, 2.0), &params);
    assert!(fling.target.y > 0.0);
    // Geometric series bound: 2 × 16 / (1 - 0.95).
    assert!(fling.target.y < 640.0);
    assert_eq!(fling.duration_ms % params.frame_ms, 0);

    let back = simulate_fling(Point::ZERO, Point::new(0.0, -2.0), &params);
    assert_eq!(back.target.y, -fling.target.y);
    assert_eq!(velocity(10.0, 0.0), 0.0);
    assert_eq!(velocity(10.0, 4.0), 2.5);
}
