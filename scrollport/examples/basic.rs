// Example: a list of 1000 rows rendered through 11 recycled slots.
use scrollport::{
    ItemPosition, Point, RenderRequest, Renderer, Size, ViewportEngine, ViewportOptions,
};

#[derive(Default)]
struct PrintRenderer {
    rendered: Vec<usize>,
}

impl Renderer for PrintRenderer {
    fn render_item(&mut self, request: RenderRequest) {
        self.rendered.push(request.item.index);
    }

    fn apply_position(&mut self, _slot: usize, _position: ItemPosition) {}
}

fn main() {
    let mut engine = ViewportEngine::new(
        ViewportOptions::list(1000, 72.0).with_client_size(Some(Size::new(300.0, 550.0))),
    );
    println!("window={:?}", engine.window());

    let mut r = PrintRenderer::default();
    for y in [0.0, 100.0, 145.0, 1000.0, 71_450.0] {
        engine.set_scroll_position(Point::new(0.0, y));
        r.rendered.clear();
        let update = engine.render(&mut r);
        println!(
            "y={y} window={:?} visible={:?} rendered={:?} moved={}",
            engine.window(),
            engine.visible_range(),
            r.rendered,
            update.repositioned
        );
    }
}
