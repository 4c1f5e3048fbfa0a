use crate::render::{RenderRequest, Renderer};
use crate::{ItemId, ItemPosition};

/// Maps a data index onto one of `window_size` reusable slots.
pub fn assign_slot(index: usize, window_size: usize) -> usize {
    if window_size == 0 {
        return 0;
    }
    index % window_size
}

/// What a slot currently shows and where it was last placed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotState {
    pub item: Option<ItemId>,
    pub position: Option<ItemPosition>,
}

/// Counts of renderer calls made by one slot pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlotUpdate {
    /// Slots whose item changed (`render_item` + `apply_position`).
    pub rendered: usize,
    /// Slots that kept their item but moved (`apply_position` only).
    pub repositioned: usize,
}

impl SlotUpdate {
    pub fn is_empty(&self) -> bool {
        self.rendered == 0 && self.repositioned == 0
    }
}

/// Fixed-identity rendering slots.
///
/// A slot keeps its identity while the items it shows change. Only slots that receive a
/// different item are re-rendered; the rest are just moved.
#[derive(Clone, Debug, Default)]
pub struct SlotTable {
    slots: Vec<SlotState>,
}

impl SlotTable {
    /// Forgets every slot's item, forcing a full re-render on the next pass.
    pub fn reset(&mut self, len: usize) {
        vdebug!(len, "slots reset");
        self.slots = alloc_slots(len);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&SlotState> {
        self.slots.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotState> {
        self.slots.iter()
    }

    /// Returns the slot currently showing `item`, if any.
    pub fn slot_of(&self, item: ItemId) -> Option<usize> {
        self.slots.iter().position(|s| s.item == Some(item))
    }

    /// Drops slots past `len`, e.g. when a variable grid row shows fewer cells.
    pub fn truncate(&mut self, len: usize) {
        self.slots.truncate(len);
    }

    /// Puts `item` at `position` into `slot`, calling the renderer only for what changed.
    pub fn place(
        &mut self,
        slot: usize,
        item: ItemId,
        position: ItemPosition,
        renderer: &mut impl Renderer,
        update: &mut SlotUpdate,
    ) {
        if slot >= self.slots.len() {
            self.slots.resize(slot + 1, SlotState::default());
        }
        let state = &mut self.slots[slot];
        if state.item != Some(item) {
            renderer.render_item(RenderRequest { item, slot });
            renderer.apply_position(slot, position);
            state.item = Some(item);
            state.position = Some(position);
            update.rendered += 1;
        } else if state.position != Some(position) {
            renderer.apply_position(slot, position);
            state.position = Some(position);
            update.repositioned += 1;
        }
    }
}

fn alloc_slots(len: usize) -> Vec<SlotState> {
    let mut slots = Vec::with_capacity(len);
    slots.resize(len, SlotState::default());
    slots
}
