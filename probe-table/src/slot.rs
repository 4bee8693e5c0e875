//! Backing slot array

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem;

/// A single cell of the backing array
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<K, V> {
    /// Never held an entry since the last clear
    Empty,
    /// Holds a live key-value pair
    Occupied(K, V),
    /// Held an entry that was removed; keeps probe chains connected
    Tombstone,
}

impl<K, V> Slot<K, V> {
    /// True for a slot that ends every probe chain
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// True for a slot holding a live entry
    #[inline(always)]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(..))
    }

    /// True for a removed entry's marker
    #[inline(always)]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    /// Returns the live entry, if any
    #[inline(always)]
    pub fn entry(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        }
    }
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Slot::Empty
    }
}

/// Fixed-length array of slots, allocated once
pub(crate) struct SlotStore<K, V> {
    slots: Box<[Slot<K, V>]>,
    tombstones: usize,
}

impl<K, V> SlotStore<K, V> {
    /// Allocates `capacity` empty slots. `capacity` must be non-zero.
    pub(crate) fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::default);
        Self {
            slots: slots.into_boxed_slice(),
            tombstones: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline(always)]
    pub(crate) fn tombstones(&self) -> usize {
        self.tombstones
    }

    #[inline(always)]
    pub(crate) fn get(&self, idx: usize) -> &Slot<K, V> {
        &self.slots[idx]
    }

    #[inline(always)]
    pub(crate) fn get_mut(&mut self, idx: usize) -> &mut Slot<K, V> {
        &mut self.slots[idx]
    }

    /// Writes a new entry into an empty or tombstone slot.
    pub(crate) fn occupy(&mut self, idx: usize, key: K, value: V) {
        let prev = mem::replace(&mut self.slots[idx], Slot::Occupied(key, value));
        debug_assert!(!prev.is_occupied(), "occupy over a live slot {}", idx);
        if prev.is_tombstone() {
            self.tombstones -= 1;
        }
    }

    /// Turns an occupied slot into a tombstone and hands back its entry.
    pub(crate) fn bury(&mut self, idx: usize) -> Option<(K, V)> {
        if !self.slots[idx].is_occupied() {
            return None;
        }
        match mem::replace(&mut self.slots[idx], Slot::Tombstone) {
            Slot::Occupied(k, v) => {
                self.tombstones += 1;
                Some((k, v))
            }
            _ => None,
        }
    }

    /// Resets every slot to empty.
    pub(crate) fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.tombstones = 0;
    }

    /// Replaces the store with a fresh one of the same capacity and yields
    /// the live entries that were in it, in slot order.
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (K, V)> {
        let capacity = self.capacity();
        mem::replace(self, SlotStore::new(capacity)).into_entries()
    }

    /// Consumes the store, yielding live entries in slot order.
    pub(crate) fn into_entries(self) -> impl Iterator<Item = (K, V)> {
        Vec::from(self.slots).into_iter().filter_map(|slot| match slot {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        })
    }

    pub(crate) fn iter(&self) -> core::slice::Iter<'_, Slot<K, V>> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_empty() {
        let store: SlotStore<u32, u32> = SlotStore::new(8);
        assert_eq!(store.capacity(), 8);
        assert!(store.iter().all(Slot::is_empty));
        assert_eq!(store.tombstones(), 0);
    }

    #[test]
    fn test_occupy_and_bury() {
        let mut store = SlotStore::new(4);
        store.occupy(2, "k", 1);
        assert_eq!(store.get(2).entry(), Some((&"k", &1)));

        assert_eq!(store.bury(2), Some(("k", 1)));
        assert!(store.get(2).is_tombstone());
        assert_eq!(store.tombstones(), 1);

        // Burying a tombstone or an empty slot is a no-op.
        assert_eq!(store.bury(2), None);
        assert_eq!(store.bury(0), None);
        assert_eq!(store.tombstones(), 1);

        store.occupy(2, "j", 3);
        assert_eq!(store.tombstones(), 0);
    }

    #[test]
    fn test_drain_resets() {
        let mut store = SlotStore::new(4);
        store.occupy(0, 1, 10);
        store.occupy(3, 2, 20);
        store.bury(0);

        let live: Vec<_> = store.drain().collect();
        assert_eq!(live, alloc::vec![(2, 20)]);
        assert_eq!(store.capacity(), 4);
        assert_eq!(store.tombstones(), 0);
        assert!(store.iter().all(Slot::is_empty));
    }
}
