// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Order store: which slot each item occupies.
//!
//! ## Moves
//!
//! A move takes an item out of its slot and inserts it at the destination; every
//! item between the two slots shifts one step toward the vacated slot. Items are
//! never swapped pairwise.
//!
//! ```
//! use understory_sortable::order::OrderStore;
//!
//! let mut store = OrderStore::from_items(["A", "B", "C", "D"]).unwrap();
//! let m = store.move_item(&"A", &"C").unwrap();
//! assert_eq!((m.from, m.to), (0, 2));
//! assert_eq!(store.get().iter().copied().collect::<Vec<_>>(), ["B", "C", "A", "D"]);
//! ```
//!
//! ## Snapshots
//!
//! The store publishes immutable [`OrderMap`] snapshots behind an `Arc`. Every
//! mutation builds a complete new map and swaps it in, so a reader holding a
//! snapshot never sees a half-applied move.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::error::SortableError;

/// One applied move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move<K> {
    /// The moved item.
    pub item: K,
    /// Slot before the move.
    pub from: usize,
    /// Slot after the move.
    pub to: usize,
}

/// Bijection between items and the slots `0..len`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderMap<K> {
    order: Vec<K>,
    slots: BTreeMap<K, usize>,
}

impl<K: Ord + Clone> Default for OrderMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone> OrderMap<K> {
    /// An empty map.
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            slots: BTreeMap::new(),
        }
    }

    /// Items in slot order. Duplicates are rejected.
    pub fn from_items(items: impl IntoIterator<Item = K>) -> Result<Self, SortableError> {
        let mut map = Self::new();
        for (index, item) in items.into_iter().enumerate() {
            if map.slots.contains_key(&item) {
                return Err(SortableError::DuplicateItem { index });
            }
            map.slots.insert(item.clone(), map.order.len());
            map.order.push(item);
        }
        Ok(map)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if there are no items.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `item` is present.
    pub fn contains(&self, item: &K) -> bool {
        self.slots.contains_key(item)
    }

    /// Slot of `item`.
    pub fn slot_of(&self, item: &K) -> Option<usize> {
        self.slots.get(item).copied()
    }

    /// Item in `slot`.
    pub fn item_at(&self, slot: usize) -> Option<&K> {
        self.order.get(slot)
    }

    /// Items in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.order.iter()
    }

    /// A copy with `item` moved to `to`.
    ///
    /// Returns `None` for unknown items, out-of-range slots, and moves onto the
    /// item's own slot.
    pub fn moved_to(&self, item: &K, to: usize) -> Option<(Self, usize)> {
        let from = self.slot_of(item)?;
        if from == to || to >= self.len() {
            return None;
        }
        let mut order = self.order.clone();
        let moving = order.remove(from);
        order.insert(to, moving);
        let mut slots = self.slots.clone();
        for (slot, k) in order.iter().enumerate().take(from.max(to) + 1).skip(from.min(to)) {
            slots.insert(k.clone(), slot);
        }
        let next = Self { order, slots };
        next.check();
        Some((next, from))
    }

    /// A copy with `active` moved into the slot `over` occupied.
    pub fn moved(&self, active: &K, over: &K) -> Option<(Self, usize, usize)> {
        let to = self.slot_of(over)?;
        let (next, from) = self.moved_to(active, to)?;
        Some((next, from, to))
    }

    /// A copy whose domain is exactly `items`.
    ///
    /// Items already present keep their relative order; new items follow in input
    /// order. Repeated input items are kept once.
    pub fn synced(&self, items: impl IntoIterator<Item = K>) -> Self {
        let mut incoming: BTreeMap<K, usize> = BTreeMap::new();
        let mut fresh = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            if incoming.contains_key(&item) {
                continue;
            }
            if !self.slots.contains_key(&item) {
                fresh.push(item.clone());
            }
            incoming.insert(item, index);
        }
        let mut order: Vec<K> = self
            .order
            .iter()
            .filter(|k| incoming.contains_key(*k))
            .cloned()
            .collect();
        order.extend(fresh);
        let slots = order
            .iter()
            .enumerate()
            .map(|(slot, k)| (k.clone(), slot))
            .collect();
        let next = Self { order, slots };
        next.check();
        next
    }

    fn check(&self) {
        debug_assert_eq!(
            self.order.len(),
            self.slots.len(),
            "order map lost its bijection"
        );
        debug_assert!(
            self.order
                .iter()
                .enumerate()
                .all(|(slot, k)| self.slots.get(k) == Some(&slot)),
            "order map lost its bijection"
        );
    }
}

/// Owner of the current [`OrderMap`] snapshot.
#[derive(Clone, Debug)]
pub struct OrderStore<K> {
    current: Arc<OrderMap<K>>,
    version: u64,
}

impl<K: Ord + Clone> Default for OrderStore<K> {
    fn default() -> Self {
        Self::new(OrderMap::new())
    }
}

impl<K: Ord + Clone> OrderStore<K> {
    /// Wrap an existing map.
    pub fn new(map: OrderMap<K>) -> Self {
        Self {
            current: Arc::new(map),
            version: 0,
        }
    }

    /// Build from items in slot order.
    pub fn from_items(items: impl IntoIterator<Item = K>) -> Result<Self, SortableError> {
        OrderMap::from_items(items).map(Self::new)
    }

    /// Current map.
    pub fn get(&self) -> &OrderMap<K> {
        &self.current
    }

    /// Shareable handle to the current map; later mutations do not affect it.
    pub fn snapshot(&self) -> Arc<OrderMap<K>> {
        Arc::clone(&self.current)
    }

    /// Number of snapshots published so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    fn publish(&mut self, map: OrderMap<K>) {
        self.current = Arc::new(map);
        self.version += 1;
    }

    /// Move `active` into the slot of `over`. No-op when they are equal or unknown.
    pub fn move_item(&mut self, active: &K, over: &K) -> Option<Move<K>> {
        let (next, from, to) = self.current.moved(active, over)?;
        self.publish(next);
        tracing::debug!(from, to, "item moved");
        Some(Move {
            item: active.clone(),
            from,
            to,
        })
    }

    /// Move `item` to slot `to`.
    pub fn move_to_slot(&mut self, item: &K, to: usize) -> Option<Move<K>> {
        let (next, from) = self.current.moved_to(item, to)?;
        self.publish(next);
        tracing::debug!(from, to, "item moved");
        Some(Move {
            item: item.clone(),
            from,
            to,
        })
    }

    /// Re-derive the domain from the current data set.
    pub fn sync(&mut self, items: impl IntoIterator<Item = K>) {
        let next = self.current.synced(items);
        if next != *self.current {
            tracing::debug!(len = next.len(), "order domain changed");
            self.publish(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn items(store: &OrderStore<char>) -> Vec<char> {
        store.get().iter().copied().collect()
    }

    #[test]
    fn move_forward_splices() {
        let mut s = OrderStore::from_items(['A', 'B', 'C', 'D']).unwrap();
        let m = s.move_item(&'A', &'C').unwrap();
        assert_eq!(m, Move { item: 'A', from: 0, to: 2 });
        assert_eq!(items(&s), vec!['B', 'C', 'A', 'D']);
        assert_eq!(s.get().slot_of(&'A'), Some(2));
        assert_eq!(s.get().slot_of(&'B'), Some(0));
    }

    #[test]
    fn move_backward_splices() {
        let mut s = OrderStore::from_items(['A', 'B', 'C', 'D']).unwrap();
        s.move_item(&'D', &'B').unwrap();
        assert_eq!(items(&s), vec!['A', 'D', 'B', 'C']);
    }

    #[test]
    fn self_move_and_unknown_are_noops() {
        let mut s = OrderStore::from_items(['A', 'B']).unwrap();
        assert!(s.move_item(&'A', &'A').is_none());
        assert!(s.move_item(&'Z', &'A').is_none());
        assert!(s.move_to_slot(&'A', 5).is_none());
        assert_eq!(s.version(), 0);
    }

    #[test]
    fn snapshots_are_isolated_from_later_moves() {
        let mut s = OrderStore::from_items(['A', 'B', 'C']).unwrap();
        let before = s.snapshot();
        s.move_to_slot(&'C', 0).unwrap();
        assert_eq!(before.iter().copied().collect::<Vec<_>>(), vec!['A', 'B', 'C']);
        assert_eq!(items(&s), vec!['C', 'A', 'B']);
    }

    #[test]
    fn sync_preserves_relative_order() {
        let mut s = OrderStore::from_items(['A', 'B', 'C', 'D']).unwrap();
        s.move_item(&'D', &'A').unwrap();
        // D A B C; drop B, add E and F.
        s.sync(['E', 'A', 'C', 'D', 'F']);
        assert_eq!(items(&s), vec!['D', 'A', 'C', 'E', 'F']);
        let v = s.version();
        s.sync(['E', 'A', 'C', 'D', 'F']);
        assert_eq!(s.version(), v);
    }

    #[test]
    fn duplicates_are_rejected_up_front() {
        assert_eq!(
            OrderMap::from_items(['A', 'B', 'A']),
            Err(SortableError::DuplicateItem { index: 2 })
        );
    }
}
