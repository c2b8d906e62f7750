//! The three-slot virtualization window.
//!
//! Only the visible page and its two neighbours are attached at any time.
//! Every attached page is tracked here with its list index and its frame in
//! content coordinates. Commits then compare indices directly and never
//! search the page list.
use pagemenu_ui::{Px, PxRect};
use smallvec::SmallVec;

use crate::{
    index::Direction,
    page::{PageId, PageRef},
};

/// Horizontal slot of the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The previous page, content x in `[0, w)`.
    Left,
    /// The visible page, content x in `[w, 2w)`.
    Center,
    /// The next page, content x in `[2w, 3w)`.
    Right,
}

impl Slot {
    /// All slots in the order the window fills them.
    pub const FILL_ORDER: [Slot; 3] = [Slot::Center, Slot::Left, Slot::Right];

    fn position(self) -> i32 {
        match self {
            Self::Left => 0,
            Self::Center => 1,
            Self::Right => 2,
        }
    }

    /// Content x-coordinate of this slot's origin.
    pub fn origin(self, width: Px) -> Px {
        width * self.position()
    }

    /// The slot whose origin is exactly `x`.
    pub fn for_origin(x: Px, width: Px) -> Option<Slot> {
        if width <= Px::ZERO {
            return None;
        }
        [Self::Left, Self::Center, Self::Right]
            .into_iter()
            .find(|slot| slot.origin(width) == x)
    }

    /// The side slot reached by travelling in `direction`.
    pub fn toward(direction: Direction) -> Slot {
        match direction {
            Direction::Backward => Self::Left,
            Direction::Forward => Self::Right,
        }
    }
}

/// An attached page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowEntry {
    /// The page and its list index.
    pub page: PageRef,
    /// Slot the page occupies. `None` once a recentre pushed it off the span;
    /// such entries are evicted by the next window shift.
    pub slot: Option<Slot>,
    /// Layout rectangle in content coordinates.
    pub frame: PxRect,
}

/// Set of attached pages.
///
/// Holds at most three entries, one per slot, and never the same page twice.
#[derive(Clone, Debug, Default)]
pub struct Window {
    entries: SmallVec<[WindowEntry; 3]>,
}

impl Window {
    /// Creates an empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached pages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attached entries in attach order.
    pub fn iter(&self) -> impl Iterator<Item = &WindowEntry> {
        self.entries.iter()
    }

    /// Whether `id` is attached.
    pub fn contains(&self, id: PageId) -> bool {
        self.entries.iter().any(|entry| entry.page.id == id)
    }

    /// The entry for `id`, if attached.
    pub fn entry(&self, id: PageId) -> Option<&WindowEntry> {
        self.entries.iter().find(|entry| entry.page.id == id)
    }

    /// The entry occupying `slot`.
    pub fn entry_in(&self, slot: Slot) -> Option<&WindowEntry> {
        self.entries.iter().find(|entry| entry.slot == Some(slot))
    }

    /// The page occupying `slot`.
    pub fn page_in(&self, slot: Slot) -> Option<PageRef> {
        self.entry_in(slot).map(|entry| entry.page)
    }

    /// Records an attached page. Returns `false`, leaving the window
    /// untouched, when the page is already attached or the slot is taken.
    pub(crate) fn insert(&mut self, page: PageRef, slot: Slot, frame: PxRect) -> bool {
        if self.contains(page.id) || self.entry_in(slot).is_some() {
            return false;
        }
        debug_assert!(self.entries.len() < 3, "window holds at most three pages");
        self.entries.push(WindowEntry {
            page,
            slot: Some(slot),
            frame,
        });
        true
    }

    /// Forgets an attached page.
    pub(crate) fn remove(&mut self, id: PageId) -> Option<WindowEntry> {
        let position = self.entries.iter().position(|entry| entry.page.id == id)?;
        Some(self.entries.remove(position))
    }

    /// Moves an attached page into `slot`. Fails when another page holds it.
    pub(crate) fn relocate(&mut self, id: PageId, slot: Slot, frame: PxRect) -> bool {
        if self
            .entry_in(slot)
            .is_some_and(|occupant| occupant.page.id != id)
        {
            return false;
        }
        match self.entries.iter_mut().find(|entry| entry.page.id == id) {
            Some(entry) => {
                entry.slot = Some(slot);
                entry.frame = frame;
                true
            }
            None => false,
        }
    }

    /// Translates every frame by `dx` and retags slots accordingly.
    #[tracing::instrument(level = "trace", skip(self))]
    pub(crate) fn shift(&mut self, dx: Px, width: Px) {
        for entry in self.entries.iter_mut() {
            entry.frame = entry.frame.translate(dx, Px::ZERO);
            entry.slot = Slot::for_origin(entry.frame.x, width);
        }
    }

    /// Removes every entry except `keep` whose frame misses `span`.
    pub(crate) fn take_outside(
        &mut self,
        span: &PxRect,
        keep: PageId,
    ) -> SmallVec<[WindowEntry; 3]> {
        self.take_where(|entry| entry.page.id != keep && !entry.frame.intersects(span))
    }

    /// Removes every entry a shift pushed off the span.
    pub(crate) fn take_unslotted(&mut self) -> SmallVec<[WindowEntry; 3]> {
        self.take_where(|entry| entry.slot.is_none())
    }

    /// Removes every entry except `keep`.
    pub(crate) fn take_all_except(&mut self, keep: Option<PageId>) -> SmallVec<[WindowEntry; 3]> {
        self.take_where(|entry| Some(entry.page.id) != keep)
    }

    fn take_where(
        &mut self,
        mut predicate: impl FnMut(&WindowEntry) -> bool,
    ) -> SmallVec<[WindowEntry; 3]> {
        let mut taken = SmallVec::new();
        let mut kept = SmallVec::new();
        for entry in self.entries.drain(..) {
            if predicate(&entry) {
                taken.push(entry);
            } else {
                kept.push(entry);
            }
        }
        self.entries = kept;
        taken
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    const WIDTH: Px = Px(100);

    fn frame(slot: Slot) -> PxRect {
        PxRect::new(slot.origin(WIDTH), Px::ZERO, WIDTH, Px(200))
    }

    fn pages(count: usize) -> Vec<PageRef> {
        let mut ids: SlotMap<PageId, ()> = SlotMap::with_key();
        (0..count)
            .map(|index| PageRef {
                id: ids.insert(()),
                index,
            })
            .collect()
    }

    #[test]
    fn slot_origins_round_trip() {
        for slot in Slot::FILL_ORDER {
            assert_eq!(Slot::for_origin(slot.origin(WIDTH), WIDTH), Some(slot));
        }
        assert_eq!(Slot::for_origin(Px(-100), WIDTH), None);
        assert_eq!(Slot::for_origin(Px(50), WIDTH), None);
        assert_eq!(Slot::for_origin(Px::ZERO, Px::ZERO), None);
    }

    #[test]
    fn insert_refuses_duplicates_and_taken_slots() {
        let pages = pages(2);
        let mut window = Window::new();

        assert!(window.insert(pages[0], Slot::Center, frame(Slot::Center)));
        assert!(!window.insert(pages[0], Slot::Left, frame(Slot::Left)));
        assert!(!window.insert(pages[1], Slot::Center, frame(Slot::Center)));
        assert!(window.insert(pages[1], Slot::Left, frame(Slot::Left)));
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn shift_retags_and_marks_pages_off_the_span() {
        let pages = pages(3);
        let mut window = Window::new();
        window.insert(pages[0], Slot::Left, frame(Slot::Left));
        window.insert(pages[1], Slot::Center, frame(Slot::Center));
        window.insert(pages[2], Slot::Right, frame(Slot::Right));

        window.shift(-WIDTH, WIDTH);

        assert_eq!(window.entry(pages[0].id).and_then(|e| e.slot), None);
        assert_eq!(window.page_in(Slot::Left), Some(pages[1]));
        assert_eq!(window.page_in(Slot::Center), Some(pages[2]));
        assert_eq!(window.page_in(Slot::Right), None);

        let span = PxRect::new(Px::ZERO, Px::ZERO, WIDTH * 3, Px(200));
        let evicted = window.take_outside(&span, pages[2].id);
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].page, pages[0]);
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn relocate_moves_into_free_slot_only() {
        let pages = pages(2);
        let mut window = Window::new();
        window.insert(pages[0], Slot::Center, frame(Slot::Center));
        window.insert(pages[1], Slot::Left, frame(Slot::Left));

        assert!(!window.relocate(pages[1].id, Slot::Center, frame(Slot::Center)));
        assert!(window.relocate(pages[1].id, Slot::Right, frame(Slot::Right)));
        assert_eq!(window.page_in(Slot::Right), Some(pages[1]));
        assert_eq!(window.page_in(Slot::Left), None);
    }

    #[test]
    fn take_all_except_keeps_target() {
        let pages = pages(3);
        let mut window = Window::new();
        window.insert(pages[0], Slot::Left, frame(Slot::Left));
        window.insert(pages[1], Slot::Center, frame(Slot::Center));
        window.insert(pages[2], Slot::Right, frame(Slot::Right));

        let taken = window.take_all_except(Some(pages[2].id));
        assert_eq!(taken.len(), 2);
        assert!(window.contains(pages[2].id));
        assert_eq!(window.len(), 1);
    }
}
