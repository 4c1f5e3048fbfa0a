use crate::*;

use proptest::prelude::*;

struct NullRenderer;

impl Renderer for NullRenderer {
    fn render_item(&mut self, _request: RenderRequest) {}

    fn apply_position(&mut self, _slot: usize, _position: ItemPosition) {}
}

fn px(range: core::ops::Range<u32>) -> impl Strategy<Value = f64> {
    range.prop_map(f64::from)
}

fn expected_num_of_items(
    data_size: usize,
    per_line: usize,
    client: f64,
    grid: f64,
    overhang: usize,
) -> usize {
    let lines = (client / grid).ceil() as usize + overhang;
    data_size.min(per_line * lines)
}

proptest! {
    #[test]
    fn prop_list_window_size(
        data_size in 0usize..5_000,
        item_size in px(1..200),
        spacing in px(0..20),
        client in px(0..2_000),
        overhang in 0usize..6,
    ) {
        let engine = ViewportEngine::new(
            ViewportOptions::list(data_size, item_size)
                .with_spacing(spacing)
                .with_overhang(overhang)
                .with_client_size(Some(Size::new(320.0, client))),
        );
        let window = engine.window();
        let expected = expected_num_of_items(data_size, 1, client, item_size + spacing, overhang);
        prop_assert_eq!(window.num_of_items, expected);
        prop_assert!(window.first_index + window.num_of_items <= data_size);
    }

    #[test]
    fn prop_grid_window_size(
        data_size in 0usize..5_000,
        min_width in px(10..300),
        min_height in px(10..300),
        client_width in px(1..1_500),
        client_height in px(1..1_500),
        overhang in 0usize..6,
    ) {
        let engine = ViewportEngine::new(
            ViewportOptions::grid(data_size, min_width, min_height)
                .with_overhang(overhang)
                .with_client_size(Some(Size::new(client_width, client_height))),
        );
        let layout = engine.layout().copied().unwrap();
        let per_line = items_per_line(client_width, min_width, 0.0);
        prop_assert_eq!(layout.dimension_to_extent, per_line);
        prop_assume!(layout.primary.grid_size > 0.0);
        let expected = expected_num_of_items(
            data_size,
            per_line,
            client_height,
            layout.primary.grid_size,
            overhang,
        );
        prop_assert_eq!(engine.window().num_of_items, expected);
    }

    #[test]
    fn prop_first_index_moves_by_whole_lines(
        data_size in 1usize..3_000,
        client_width in px(100..1_000),
        steps in prop::collection::vec(-3_000i32..3_000, 1..40),
    ) {
        let mut engine = ViewportEngine::new(
            ViewportOptions::grid(data_size, 100.0, 80.0)
                .with_spacing(4.0)
                .with_client_size(Some(Size::new(client_width, 500.0))),
        );
        let n = engine.layout().unwrap().dimension_to_extent;
        let max = engine.metrics().vertical.max_scroll_offset;
        for step in steps {
            let y = engine.scroll_position().y + f64::from(step);
            engine.set_scroll_position(Point::new(0.0, y));
            let window = engine.window();
            let max_first = engine.max_first_index();
            prop_assert!(
                window.first_index % n == 0 || window.first_index == max_first,
                "first_index {} is neither line aligned (n = {}) nor the maximum {}",
                window.first_index,
                n,
                max_first
            );
            prop_assert!(window.first_index <= max_first);
            prop_assert!(window.first_index + window.num_of_items <= data_size);
            let p = engine.scroll_position().y;
            prop_assert!((0.0..=max).contains(&p));
        }
    }

    #[test]
    fn prop_shift_by_k_lines_reassigns_k_lines_of_slots(
        client_width in px(100..1_000),
        k in 1usize..8,
    ) {
        let mut engine = ViewportEngine::new(
            ViewportOptions::grid(100_000, 100.0, 100.0)
                .with_client_size(Some(Size::new(client_width, 600.0))),
        );
        let n = engine.layout().unwrap().dimension_to_extent;
        let grid = engine.layout().unwrap().primary.grid_size;
        let num = engine.window().num_of_items;
        prop_assume!(k * n < num);

        engine.render(&mut NullRenderer);
        let before: Vec<Option<ItemId>> = engine.slots().iter().map(|s| s.item).collect();

        // Just past the threshold edge by (k - 1) lines plus a pixel: exactly k lines.
        let base = engine.threshold().base;
        engine.set_scroll_position(Point::new(0.0, base + (k - 1) as f64 * grid + 1.0));
        prop_assert_eq!(engine.window().first_index, k * n);

        let update = engine.render(&mut NullRenderer);
        prop_assert_eq!(update.rendered, k * n);
        prop_assert_eq!(update.repositioned, num - k * n);

        let kept = engine
            .slots()
            .iter()
            .zip(&before)
            .filter(|(now, was)| now.item == **was)
            .count();
        prop_assert_eq!(kept, num - k * n);
    }

    #[test]
    fn prop_assign_slot_is_stable_under_shift(
        window_size in 1usize..64,
        first in 0usize..10_000,
        k in 0usize..64,
    ) {
        let k = k.min(window_size);
        let before: Vec<usize> = (first..first + window_size).collect();
        let after: Vec<usize> = (first + k..first + k + window_size).collect();
        let changed = (0..window_size)
            .filter(|&slot| {
                let old = before.iter().find(|&&i| assign_slot(i, window_size) == slot);
                let new = after.iter().find(|&&i| assign_slot(i, window_size) == slot);
                old != new
            })
            .count();
        prop_assert_eq!(changed, k);
    }
}
