//! Tracking sets with stable slot indices.
//!
//! Resolvers iterate a tracker by slot index while explosions elsewhere remove
//! entries. Removal leaves a tombstone instead of shifting the vector, so an
//! index taken before a nested explosion still names the same slot after it.

use crate::types::Pos;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tracker {
    slots: Vec<Option<Pos>>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a position; returns its slot.
    pub fn push(&mut self, pos: Pos) -> usize {
        self.slots.push(Some(pos));
        self.slots.len() - 1
    }

    /// Number of slots, tombstones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of live (non-tombstoned) slots.
    pub fn live_len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Position held by `slot`, or `None` for tombstones and out-of-range slots.
    pub fn get(&self, slot: usize) -> Option<Pos> {
        self.slots.get(slot).copied().flatten()
    }

    /// First live slot tracking `pos`.
    pub fn find(&self, pos: Pos) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(pos))
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.find(pos).is_some()
    }

    pub fn tombstone(&mut self, slot: usize) {
        if let Some(s) = self.slots.get_mut(slot) {
            *s = None;
        }
    }

    /// Tombstone every slot tracking `pos`. Returns how many were removed.
    pub fn tombstone_at(&mut self, pos: Pos) -> usize {
        let mut removed = 0;
        for s in self.slots.iter_mut().filter(|s| **s == Some(pos)) {
            *s = None;
            removed += 1;
        }
        removed
    }

    /// Point a live slot at a new position. Tombstones stay tombstones.
    pub fn retarget(&mut self, slot: usize, pos: Pos) {
        if let Some(s) = self.slots.get_mut(slot) {
            if s.is_some() {
                *s = Some(pos);
            }
        }
    }

    /// Live positions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// Drop tombstones, keeping the relative order of live entries.
    ///
    /// Only valid between resolver passes: it renumbers slots.
    pub fn compact(&mut self) {
        self.slots.retain(Option::is_some);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
