use std::sync::Arc;

use crate::layout::GridLayout;
use crate::metrics::{ViewportMetrics, recompute_bounds};
use crate::options::CellCountFn;
use crate::render::{Container, Renderer};
use crate::slots::{SlotTable, SlotUpdate, assign_slot};
use crate::threshold::ScrollThreshold;
use crate::variable::VariableRows;
use crate::window::{WindowGeometry, compute_window, refit_window};
use crate::{
    DataSize, IndexWindow, ItemId, ItemPosition, ItemSize, Point, Positioning, ScrollDirection,
    ScrollInfo, ScrollTarget, Size, ViewportOptions, VisibleRange,
};

/// Result of applying new scroll bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundsUpdate {
    pub metrics: ViewportMetrics,
    /// Set when the previous scroll position no longer fit and was clamped to this one.
    pub reclamped: Option<Point>,
}

/// How a scroll position update affected the materialized items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowChange {
    pub previous: IndexWindow,
    pub current: IndexWindow,
    /// A variable grid row rescanned its visible columns.
    pub rows_changed: bool,
}

impl WindowChange {
    fn unchanged(window: IndexWindow) -> Self {
        Self {
            previous: window,
            current: window,
            rows_changed: false,
        }
    }

    /// Whether slots must receive new items (as opposed to only moving).
    pub fn needs_render(&self) -> bool {
        self.previous != self.current || self.rows_changed
    }
}

/// A headless windowing engine for virtual lists and grids.
///
/// The engine owns the layout metrics, the scroll bounds, the hysteresis threshold, the index
/// window and the slot table. It holds no UI objects and no clock: whatever owns the render
/// loop calls [`Self::on_resize`], [`Self::on_data_change`] and
/// [`Self::set_scroll_position`], then [`Self::render`] to push slot changes to a
/// [`Renderer`].
#[derive(Clone, Debug)]
pub struct ViewportEngine {
    options: ViewportOptions,
    client_size: Option<Size>,
    layout: Option<GridLayout>,
    metrics: ViewportMetrics,
    threshold: ScrollThreshold,
    window: IndexWindow,
    max_first_index: usize,
    visible: Option<VisibleRange>,
    position: Point,
    rows: Option<VariableRows>,
    slots: SlotTable,
}

impl ViewportEngine {
    /// Creates an engine. If `options.client_size` is set the engine is measured right away.
    pub fn new(options: ViewportOptions) -> Self {
        vdebug!(
            data_size = options.data_size.primary(),
            overhang = options.overhang,
            spacing = options.spacing,
            "ViewportEngine::new"
        );
        let client_size = options.client_size;
        let mut engine = Self {
            options,
            client_size: None,
            layout: None,
            metrics: ViewportMetrics::default(),
            threshold: ScrollThreshold::new(0.0),
            window: IndexWindow::default(),
            max_first_index: 0,
            visible: None,
            position: Point::ZERO,
            rows: None,
            slots: SlotTable::default(),
        };
        if let Some(size) = client_size {
            engine.on_resize(size);
        }
        engine
    }

    pub fn options(&self) -> &ViewportOptions {
        &self.options
    }

    /// Whether a container size is known. Until then the engine has no window and no bounds.
    pub fn is_measured(&self) -> bool {
        self.layout.is_some()
    }

    pub fn client_size(&self) -> Option<Size> {
        self.client_size
    }

    pub fn layout(&self) -> Option<&GridLayout> {
        self.layout.as_ref()
    }

    pub fn metrics(&self) -> &ViewportMetrics {
        &self.metrics
    }

    pub fn threshold(&self) -> &ScrollThreshold {
        &self.threshold
    }

    pub fn window(&self) -> IndexWindow {
        self.window
    }

    pub fn max_first_index(&self) -> usize {
        self.max_first_index
    }

    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.visible
    }

    pub fn scroll_position(&self) -> Point {
        self.position
    }

    pub fn data_size(&self) -> usize {
        self.options.data_size.primary()
    }

    pub fn slots(&self) -> &SlotTable {
        &self.slots
    }

    pub fn variable_rows(&self) -> Option<&VariableRows> {
        self.rows.as_ref()
    }

    pub fn scroll_info(&self) -> ScrollInfo {
        ScrollInfo {
            scroll_left: self.position.x,
            scroll_top: self.position.y,
            visible_range: self.visible,
        }
    }

    pub fn can_scroll_horizontally(&self) -> bool {
        self.is_measured() && self.metrics.horizontal.overflows()
    }

    pub fn can_scroll_vertically(&self) -> bool {
        self.is_measured() && self.metrics.vertical.overflows()
    }

    /// Applies a new container size: recomputes layout metrics, the window and the bounds,
    /// then re-derives the window for the current scroll position.
    pub fn on_resize(&mut self, client_size: Size) -> BoundsUpdate {
        self.calculate_metrics(client_size);
        self.update_states_and_bounds();
        self.resync_window()
    }

    /// Re-measures through `container` and applies the size if it changed.
    pub fn sync_client_size(&mut self, container: &impl Container) -> Option<BoundsUpdate> {
        let size = container.measure_container();
        if self.client_size == Some(size) {
            return None;
        }
        Some(self.on_resize(size))
    }

    pub fn on_data_change(&mut self, data_size: impl Into<DataSize>) -> Option<BoundsUpdate> {
        let data_size = data_size.into();
        self.update_options(|o| o.data_size = data_size)
    }

    /// Replaces the options, recomputing only what they affect.
    ///
    /// Layout changes (direction, item size, spacing, overhang, positioning) rebuild the
    /// metrics; a data size change only refits the window and the bounds.
    pub fn set_options(&mut self, options: ViewportOptions) -> Option<BoundsUpdate> {
        let metrics_changed = self.options.metrics_differ(&options);
        let data_changed = !self.options.data_size.same_as(&options.data_size);
        let pending_client = options.client_size;
        self.options = options;
        vtrace!(metrics_changed, data_changed, "ViewportEngine::set_options");

        let Some(client_size) = self.client_size.or(pending_client) else {
            return None;
        };
        if metrics_changed || !self.is_measured() {
            Some(self.on_resize(client_size))
        } else if data_changed {
            if self.options.is_variable() {
                self.rows = self.build_rows();
            }
            self.update_states_and_bounds();
            Some(self.resync_rows_and_bounds())
        } else {
            None
        }
    }

    /// Clones the current options, applies `f`, then delegates to [`Self::set_options`].
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut ViewportOptions),
    ) -> Option<BoundsUpdate> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    /// Moves the viewport to `position` (clamped to the bounds) and advances the index window
    /// if the position left the current threshold.
    ///
    /// The scroll direction of each axis is derived from the previous position.
    pub fn set_scroll_position(&mut self, position: Point) -> WindowChange {
        let Some(layout) = self.layout else {
            vdebug!("set_scroll_position before measurement ignored");
            return WindowChange::unchanged(self.window);
        };
        let clamped = self.metrics.clamp(position);
        let direction_x = ScrollDirection::between(self.position.x, clamped.x);
        let direction_y = ScrollDirection::between(self.position.y, clamped.y);
        let (primary_direction, secondary_direction) = if layout.direction.is_vertical() {
            (direction_y, direction_x)
        } else {
            (direction_x, direction_y)
        };
        let (primary, secondary) = layout.split(clamped);

        let previous = self.window;
        let geometry = self.geometry(&layout);
        self.window = compute_window(
            &mut self.threshold,
            primary,
            primary_direction,
            previous,
            &geometry,
        );
        self.position = clamped;
        self.visible = layout.visible_range(self.data_size(), primary);

        let rows_changed = match &mut self.rows {
            Some(rows) => rows.sync_window(
                previous.first_index,
                self.window.first_index,
                self.window.num_of_items,
                secondary,
                secondary_direction,
            ),
            None => false,
        };

        vtrace!(
            x = clamped.x,
            y = clamped.y,
            first_index = self.window.first_index,
            "scroll position"
        );
        WindowChange {
            previous,
            current: self.window,
            rows_changed,
        }
    }

    /// Resolves a scroll-to target into an (unclamped) scroll position.
    ///
    /// Axes that cannot scroll resolve to 0 for absolute positions and keep their current
    /// position otherwise.
    pub fn resolve_target(&self, target: &ScrollTarget) -> Point {
        let can_h = self.can_scroll_horizontally();
        let can_v = self.can_scroll_vertically();
        let current = self.position;
        match *target {
            ScrollTarget::Position { x, y } => Point::new(
                if can_h { x.unwrap_or(current.x) } else { 0.0 },
                if can_v { y.unwrap_or(current.y) } else { 0.0 },
            ),
            ScrollTarget::Align(align) => {
                let max = self.metrics.max_scroll_offset();
                let x = match (can_h, align.is_left(), align.is_right()) {
                    (true, true, _) => 0.0,
                    (true, _, true) => max.x,
                    _ => current.x,
                };
                let y = match (can_v, align.is_top(), align.is_bottom()) {
                    (true, true, _) => 0.0,
                    (true, _, true) => max.y,
                    _ => current.y,
                };
                Point::new(x, y)
            }
            ScrollTarget::Index { index, stick_to } => {
                let Some(layout) = &self.layout else {
                    return current;
                };
                if index >= self.data_size() {
                    vwarn!(index, data_size = self.data_size(), "scroll target out of range");
                    return current;
                }
                let item = layout.item_position(index, stick_to);
                Point::new(
                    if can_h { item.x } else { current.x },
                    if can_v { item.y } else { current.y },
                )
            }
        }
    }

    /// Offset the host applies to the item container under [`Positioning::ByContainer`].
    pub fn container_offset(&self) -> Point {
        match (self.options.positioning, &self.layout) {
            (Positioning::ByContainer, Some(layout)) => {
                let (primary, secondary) = layout.split(self.position);
                layout.to_point(-primary, -secondary)
            }
            _ => Point::ZERO,
        }
    }

    /// Pushes the current window to `renderer`.
    ///
    /// Slots that now show a different item get `render_item` followed by `apply_position`;
    /// slots that keep their item only get `apply_position`, and only if they moved.
    pub fn render(&mut self, renderer: &mut impl Renderer) -> SlotUpdate {
        let Some(layout) = self.layout else {
            return SlotUpdate::default();
        };
        if self.rows.is_some() {
            self.render_variable(&layout, renderer)
        } else {
            self.render_fixed(&layout, renderer)
        }
    }

    fn render_fixed(&mut self, layout: &GridLayout, renderer: &mut impl Renderer) -> SlotUpdate {
        let mut update = SlotUpdate::default();
        let num = self.window.num_of_items;
        let from = self.window.first_index;
        let to = self.window.end(self.data_size());
        if from >= to {
            return update;
        }

        let n = layout.dimension_to_extent;
        let (mut primary, mut secondary) = layout.grid_position(from);
        if self.options.positioning == Positioning::ByItem {
            primary -= layout.split(self.position).0;
        }
        let (width, height) = item_extent(layout, layout.secondary.item_size);

        let mut column = from % n;
        for index in from..to {
            let at = layout.to_point(primary, secondary);
            let position = ItemPosition {
                x: at.x,
                y: at.y,
                width,
                height,
            };
            self.slots.place(
                assign_slot(index, num),
                ItemId::item(index),
                position,
                renderer,
                &mut update,
            );

            column += 1;
            if column == n {
                column = 0;
                secondary = 0.0;
                primary += layout.primary.grid_size;
            } else {
                secondary += layout.secondary.grid_size;
            }
        }
        update
    }

    fn render_variable(
        &mut self,
        layout: &GridLayout,
        renderer: &mut impl Renderer,
    ) -> SlotUpdate {
        let mut update = SlotUpdate::default();
        let from = self.window.first_index;
        let to = self.window.end(self.data_size());
        let (scroll_primary, scroll_secondary) = layout.split(self.position);
        let by_item = self.options.positioning == Positioning::ByItem;

        if let Some(rows) = &mut self.rows {
            for row in from..to {
                if rows.row(row).is_none() {
                    rows.update_row_info(row, scroll_secondary);
                }
            }
        }
        let Some(rows) = &self.rows else {
            return update;
        };

        let mut primary = layout.grid_position(from).0;
        let mut secondary_base = 0.0;
        if by_item {
            primary -= scroll_primary;
            secondary_base -= scroll_secondary;
        }

        let mut slot = 0;
        for row in from..to {
            if let Some(info) = rows.row(row) {
                for column in info.columns() {
                    let size = rows.cell_size(row, column);
                    let offset = info.offsets.get(column).copied().unwrap_or(0.0);
                    let at = layout.to_point(primary, secondary_base + offset);
                    let (width, height) = item_extent(layout, size);
                    self.slots.place(
                        slot,
                        ItemId::cell(row, column),
                        ItemPosition {
                            x: at.x,
                            y: at.y,
                            width,
                            height,
                        },
                        renderer,
                        &mut update,
                    );
                    slot += 1;
                }
            }
            primary += layout.primary.grid_size;
        }
        self.slots.truncate(slot);
        update
    }

    fn geometry(&self, layout: &GridLayout) -> WindowGeometry {
        WindowGeometry {
            grid_size: layout.primary.grid_size,
            items_per_line: layout.dimension_to_extent,
            max_first_index: self.max_first_index,
            max_scroll_offset: self.metrics.axis(layout.direction).max_scroll_offset,
        }
    }

    fn build_rows(&self) -> Option<VariableRows> {
        let layout = self.layout?;
        let ItemSize::Variable { variable, .. } = &self.options.item_size else {
            return None;
        };
        let cells_in_row: CellCountFn = match &self.options.data_size {
            DataSize::Variable { variable, .. } => Arc::clone(variable),
            DataSize::Fixed(_) => {
                vwarn!("variable item size without a variable data size");
                Arc::new(|_: usize| 0usize)
            }
        };
        Some(VariableRows::new(
            self.data_size(),
            cells_in_row,
            Arc::clone(variable),
            layout.secondary.client_size,
            self.options.variable_max_scroll_size,
        ))
    }

    fn calculate_metrics(&mut self, client_size: Size) {
        let layout = GridLayout::compute(&self.options, client_size);
        vdebug!(
            width = client_size.width,
            height = client_size.height,
            items_per_line = layout.dimension_to_extent,
            grid_size = layout.primary.grid_size,
            "calculate_metrics"
        );
        self.client_size = Some(client_size);
        self.threshold = ScrollThreshold::new(layout.threshold_base());
        self.window = IndexWindow::default();
        self.max_first_index = 0;
        self.visible = None;
        self.layout = Some(layout);
        self.rows = self.build_rows();
    }

    fn update_states_and_bounds(&mut self) {
        let Some(layout) = self.layout else {
            return;
        };
        let data_size = self.data_size();
        let num_of_items = layout.num_of_items(data_size, self.options.overhang);
        let (window, max_first_index) = refit_window(
            self.window,
            data_size,
            num_of_items,
            self.max_first_index,
            self.visible,
            layout.dimension_to_extent,
        );
        self.window = window;
        self.max_first_index = max_first_index;
        self.slots.reset(num_of_items);

        let secondary_content = match &self.rows {
            Some(rows) => rows.max_scroll_size(),
            None => layout.secondary.client_size,
        };
        let content = layout.to_size(layout.content_size(data_size), secondary_content);
        self.metrics = recompute_bounds(self.client_size.unwrap_or_default(), content);
        self.threshold
            .sync(self.metrics.axis(layout.direction).max_scroll_offset);
        self.visible = layout.visible_range(data_size, layout.split(self.position).0);
        vdebug!(
            first_index = window.first_index,
            num_of_items,
            max_first_index,
            "update_states_and_bounds"
        );
    }

    /// Clamps the position to the new bounds and walks the fresh threshold forward to it,
    /// so the window matches the position after the metrics were reset.
    fn resync_window(&mut self) -> BoundsUpdate {
        let Some(layout) = self.layout else {
            return BoundsUpdate {
                metrics: self.metrics,
                reclamped: None,
            };
        };
        let clamped = self.metrics.clamp(self.position);
        let reclamped = (clamped != self.position).then_some(clamped);
        self.position = clamped;

        let primary = layout.split(clamped).0;
        self.walk_window_to(&layout, primary);
        self.visible = layout.visible_range(self.data_size(), primary);
        self.sync_all_rows();
        BoundsUpdate {
            metrics: self.metrics,
            reclamped,
        }
    }

    /// Clamps the position after a data change. A refit window that no longer covers the
    /// viewport is re-derived from a fresh threshold.
    fn resync_rows_and_bounds(&mut self) -> BoundsUpdate {
        let clamped = self.metrics.clamp(self.position);
        let reclamped = (clamped != self.position).then_some(clamped);
        self.position = clamped;
        if let Some(layout) = self.layout {
            let primary = layout.split(clamped).0;
            self.visible = layout.visible_range(self.data_size(), primary);
            if !self.window_covers_visible() {
                vdebug!(
                    first_index = self.window.first_index,
                    "window left the viewport, re-deriving"
                );
                self.threshold = ScrollThreshold::new(layout.threshold_base());
                self.threshold
                    .sync(self.metrics.axis(layout.direction).max_scroll_offset);
                self.window = IndexWindow::new(0, self.window.num_of_items);
                self.walk_window_to(&layout, primary);
            }
        }
        self.sync_all_rows();
        BoundsUpdate {
            metrics: self.metrics,
            reclamped,
        }
    }

    /// Walks a threshold that starts at index 0 forward to `primary`.
    fn walk_window_to(&mut self, layout: &GridLayout, primary: f64) {
        if primary <= 0.0 {
            return;
        }
        let geometry = self.geometry(layout);
        self.window = compute_window(
            &mut self.threshold,
            primary,
            Some(ScrollDirection::Forward),
            self.window,
            &geometry,
        );
    }

    fn window_covers_visible(&self) -> bool {
        let Some(visible) = self.visible else {
            return true;
        };
        self.window.first_index <= visible.first
            && visible.last < self.window.end(self.data_size())
    }

    fn sync_all_rows(&mut self) {
        let Some(layout) = self.layout else {
            return;
        };
        let secondary = layout.split(self.position).1;
        let window = self.window;
        if let Some(rows) = &mut self.rows {
            rows.sync_window(
                window.first_index,
                window.first_index,
                window.num_of_items,
                secondary,
                None,
            );
        }
    }
}

/// Width and height reported for a slot, or `None` for fixed-size lists.
fn item_extent(layout: &GridLayout, secondary_size: f64) -> (Option<f64>, Option<f64>) {
    if !layout.sized_items {
        return (None, None);
    }
    let size = layout.to_size(layout.primary.item_size, secondary_size);
    (Some(size.width), Some(size.height))
}
