use scrollport::{Point, ScrollTarget, Size, ViewportOptions};
use scrollport_adapter::{ControllerOptions, ScrollController, ScrollTo};

fn main() {
    // Example: an adapter feeding pointer events and frame ticks into the controller.
    //
    // An adapter would:
    // - forward pointer down/move/up as drag_start/drag_move/drag_end
    // - call tick(now_ms) every frame while needs_frame() is true
    // - call render() to move and refill its recycled nodes
    let options = ControllerOptions::default()
        .with_on_scroll_start(|info| println!("start top={}", info.scroll_top))
        .with_on_scroll_stop(|info| {
            println!(
                "stop top={} visible={:?}",
                info.scroll_top, info.visible_range
            )
        });
    let mut c = ScrollController::new(
        ViewportOptions::grid(10_000, 120.0, 90.0)
            .with_spacing(8.0)
            .with_client_size(Some(Size::new(800.0, 600.0))),
        options,
    );

    let mut now_ms = 0u64;
    c.drag_start(Point::new(400.0, 500.0), now_ms);
    for step in 1..=5 {
        now_ms += 8;
        c.drag_move(Point::new(400.0, 500.0 - 40.0 * step as f64), now_ms);
    }
    now_ms += 8;
    c.drag_end(now_ms);
    println!("phase={:?} target={:?}", c.phase(), c.tween().map(|t| t.to));

    while c.needs_frame() {
        now_ms += 16;
        let Some(p) = c.tick(now_ms) else {
            break;
        };
        if now_ms % 160 == 0 {
            println!("t={now_ms} y={} window={:?}", p.y, c.engine().window());
        }
    }

    c.scroll_to(ScrollTo::immediate(ScrollTarget::index(0)), now_ms);
    println!("back to top: {:?}", c.scroll_position());
}
