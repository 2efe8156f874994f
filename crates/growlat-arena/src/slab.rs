//! Slot allocator with a free list.
//!
//! [`Slab`] hands out stable `u32` slots. Removed slots go onto a free list
//! and are reused by the next insertion, so a tree that keeps growing and
//! collapsing in the same region does not keep growing its backing vector.

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use crate::handle::SlotKey;

/// A slab of `T` values addressed by typed keys `K`.
#[derive(Clone, Debug)]
pub struct Slab<K, T> {
    /// All slots (live and vacant).
    slots: Vec<Option<T>>,
    /// Indices of vacant slots available for reuse.
    free_list: Vec<u32>,
    /// Number of live slots.
    live: usize,
    _key: PhantomData<K>,
}

impl<K: SlotKey, T> Slab<K, T> {
    /// Create an empty slab.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty slab with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live: 0,
            _key: PhantomData,
        }
    }

    /// Store `value`, reusing a vacant slot when one exists.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` slots would be needed.
    pub fn insert(&mut self, value: T) -> K {
        self.live += 1;
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx as usize] = Some(value);
            return K::from_index(idx);
        }
        let idx = u32::try_from(self.slots.len()).expect("slab exceeded u32::MAX slots");
        self.slots.push(Some(value));
        K::from_index(idx)
    }

    /// Take the value out of slot `key`, leaving it vacant.
    ///
    /// Returns `None` if the slot was already vacant.
    pub fn remove(&mut self, key: K) -> Option<T> {
        let value = self.slots.get_mut(key.index())?.take()?;
        self.live -= 1;
        self.free_list.push(key.index() as u32);
        Some(value)
    }

    /// Shared access to a live slot.
    #[inline]
    pub fn get(&self, key: K) -> Option<&T> {
        self.slots.get(key.index())?.as_ref()
    }

    /// Exclusive access to a live slot.
    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.slots.get_mut(key.index())?.as_mut()
    }

    /// Whether `key` refers to a live slot.
    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the slab holds no live value.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Total slots (live + vacant).
    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    /// Number of vacant slots available for reuse.
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Drop every value and forget all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.live = 0;
    }

    /// Iterate over live `(key, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|v| (K::from_index(idx as u32), v)))
    }
}

impl<K: SlotKey, T> Default for Slab<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: SlotKey, T> Index<K> for Slab<K, T> {
    type Output = T;

    #[inline]
    fn index(&self, key: K) -> &T {
        match self.get(key) {
            Some(v) => v,
            None => panic!("access through vacant slot {key:?}"),
        }
    }
}

impl<K: SlotKey, T> IndexMut<K> for Slab<K, T> {
    #[inline]
    fn index_mut(&mut self, key: K) -> &mut T {
        match self.get_mut(key) {
            Some(v) => v,
            None => panic!("access through vacant slot {key:?}"),
        }
    }
}
