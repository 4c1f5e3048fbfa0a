use crate::{ItemId, ItemPosition, Size};

/// A request to produce content for `item` inside the reusable `slot`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderRequest {
    pub item: ItemId,
    pub slot: usize,
}

/// The rendering layer that owns the actual visual nodes.
///
/// The engine never holds node handles. It tells the renderer which slot shows which item
/// and where each slot goes; the renderer keeps one node per slot and reuses it.
pub trait Renderer {
    /// Produces new content for a slot whose item changed.
    fn render_item(&mut self, request: RenderRequest);

    /// Moves (and, for grids, resizes) the node occupying `slot`.
    fn apply_position(&mut self, slot: usize, position: ItemPosition);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render_item(&mut self, request: RenderRequest) {
        (**self).render_item(request);
    }

    fn apply_position(&mut self, slot: usize, position: ItemPosition) {
        (**self).apply_position(slot, position);
    }
}

/// The element whose client area is the viewport.
pub trait Container {
    /// Current client size. Expected to be cheap; callers may memoize it.
    fn measure_container(&self) -> Size;
}
