//! Indexed binary min-heap with mutable priorities
//!
//! [`IndexedHeap`] tracks entries by a unique key. Each key owns a payload that
//! never changes and a priority that can be changed after insertion with
//! [`reweight`](IndexedHeap::reweight). The heap array holds only keys; the
//! priority used for every comparison is looked up through the key.
//!
//! # Design
//!
//! A single [`FxHashMap`] maps each key to an entry bundling its payload,
//! priority, and current heap position. Every swap of two heap slots rewrites
//! the position of both keys before the swap returns, so `position[k]` always
//! names the slot holding `k`. That index is what lets `reweight` start
//! restructuring from the key's slot instead of searching for it.
//!
//! Enumeration follows insertion order, kept in a separate sequence index.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity                        |
//! |----------------|-----------------------------------|
//! | `enqueue`      | O(log n)                          |
//! | `dequeue`      | O(log n)                          |
//! | `reweight`     | O(log n)                          |
//! | `peek`         | O(1)                              |
//! | `weight`/`get` | O(1) expected                     |
//!
//! # Example
//!
//! ```rust
//! use mutable_heaps::Heap;
//! use mutable_heaps::indexed::IndexedHeap;
//!
//! let mut feed = IndexedHeap::new();
//! feed.enqueue("markets", "Stocks rally", 10).unwrap();
//! feed.enqueue("weather", "Rain tomorrow", 20).unwrap();
//! feed.enqueue("sports", "Home team wins", 30).unwrap();
//!
//! feed.reweight(&"sports", 1).unwrap();
//! assert_eq!(feed.peek(), Ok(&"sports"));
//! assert_eq!(feed.get(&"sports"), Ok(&"Home team wins"));
//! ```

use crate::storage::{self, HeapStorage};
use crate::traits::{Heap, HeapError};
use log::trace;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::Hash;

/// Capacity of a heap built with [`IndexedHeap::new`]
pub const DEFAULT_CAPACITY: usize = 10;

/// Everything tracked for one key
#[derive(Debug, Clone)]
struct Entry<V, P> {
    payload: V,
    priority: P,
    /// Slot currently holding the key in the heap array
    position: usize,
    /// Insertion sequence number, for ordered enumeration
    seq: u64,
}

/// A binary min-heap of keys whose priorities can change after insertion
///
/// # Type Parameters
/// - `K`: Unique identity of an entry; stored in the heap array and the index
/// - `V`: Payload associated with a key, fixed at insertion
/// - `P`: Priority; smaller values are dequeued first
#[derive(Debug, Clone)]
pub struct IndexedHeap<K, V, P>
where
    K: Hash + Eq + Clone,
    P: Ord,
{
    heap: HeapStorage<K>,
    entries: FxHashMap<K, Entry<V, P>>,
    order: BTreeMap<u64, K>,
    next_seq: u64,
}

impl<K, V, P> IndexedHeap<K, V, P>
where
    K: Hash + Eq + Clone,
    P: Ord,
{
    /// Creates an empty heap with [`DEFAULT_CAPACITY`] slots
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty heap with room for `capacity` keys before growing
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: HeapStorage::with_capacity(capacity),
            entries: FxHashMap::default(),
            order: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Inserts `key` with its payload and initial priority
    ///
    /// # Errors
    /// - [`HeapError::DuplicateKey`] if `key` is already tracked
    /// - [`HeapError::AllocationFailure`] if growing the heap array fails
    ///
    /// The heap is unchanged on error.
    pub fn enqueue(&mut self, key: K, payload: V, priority: P) -> Result<(), HeapError> {
        if self.entries.contains_key(&key) {
            return Err(HeapError::DuplicateKey);
        }
        let slot = self.heap.push(key.clone())?;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, key.clone());
        self.entries.insert(
            key,
            Entry {
                payload,
                priority,
                position: slot,
                seq,
            },
        );
        self.bubble(slot);
        self.debug_check();
        Ok(())
    }

    /// Returns the current priority of `key`
    ///
    /// # Errors
    /// [`HeapError::UnknownKey`] if `key` is not tracked.
    pub fn weight(&self, key: &K) -> Result<&P, HeapError> {
        self.entry(key).map(|e| &e.priority)
    }

    /// Changes the priority of `key`, returning the previous one
    ///
    /// A smaller priority bubbles the key toward the root, a larger one
    /// percolates it toward the leaves, and an equal one leaves the heap alone.
    ///
    /// # Errors
    /// [`HeapError::UnknownKey`] if `key` is not tracked.
    pub fn reweight(&mut self, key: &K, priority: P) -> Result<P, HeapError> {
        let entry = self.entries.get_mut(key).ok_or(HeapError::UnknownKey)?;
        let slot = entry.position;
        let old = std::mem::replace(&mut entry.priority, priority);
        match entry.priority.cmp(&old) {
            Ordering::Less => {
                trace!("reweight: priority decreased, bubbling from slot {}", slot);
                self.bubble(slot);
            }
            Ordering::Greater => {
                trace!("reweight: priority increased, percolating from slot {}", slot);
                self.percolate(slot);
            }
            Ordering::Equal => {}
        }
        self.debug_check();
        Ok(old)
    }

    /// Returns the payload stored for `key`
    ///
    /// # Errors
    /// [`HeapError::UnknownKey`] if `key` is not tracked.
    pub fn get(&self, key: &K) -> Result<&V, HeapError> {
        self.entry(key).map(|e| &e.payload)
    }

    /// True if `key` is currently tracked
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the root key along with its payload and priority
    ///
    /// # Errors
    /// [`HeapError::EmptyContainer`] if the heap is empty.
    pub fn peek_entry(&self) -> Result<(&K, &V, &P), HeapError> {
        let key = self.peek()?;
        let entry = self.entry(key)?;
        Ok((key, &entry.payload, &entry.priority))
    }

    /// Iterates over every tracked `(key, payload)` pair in insertion order
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        Iter {
            keys: self.order.values(),
            entries: &self.entries,
        }
    }

    /// Drops every entry; capacity is retained
    pub fn clear(&mut self) {
        self.heap.clear();
        self.entries.clear();
        self.order.clear();
    }

    /// Allocated heap slots under the `2 * capacity + 17` growth policy
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    /// Checks heap order and that every key's recorded position is its real slot
    pub fn verify_internal_structure(&self) -> bool {
        let keys = self.heap.as_slice();
        if keys.len() != self.entries.len() || keys.len() != self.order.len() {
            return false;
        }
        let positions_ok = keys
            .iter()
            .enumerate()
            .all(|(i, k)| self.entries.get(k).is_some_and(|e| e.position == i));
        positions_ok && (1..keys.len()).all(|i| self.value(storage::parent(i)) <= self.value(i))
    }

    fn entry(&self, key: &K) -> Result<&Entry<V, P>, HeapError> {
        self.entries.get(key).ok_or(HeapError::UnknownKey)
    }

    /// Priority of the key at slot `i`
    ///
    /// Every key in the heap array has an entry.
    #[inline]
    fn value(&self, i: usize) -> &P {
        &self.entries[self.heap.get(i)].priority
    }

    /// Swap two slots and record both keys' new positions
    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.set_position(i);
        self.set_position(j);
    }

    #[inline]
    fn set_position(&mut self, i: usize) {
        if let Some(entry) = self.entries.get_mut(self.heap.get(i)) {
            entry.position = i;
        }
    }

    fn bubble(&mut self, mut child: usize) {
        while !storage::is_root(child) {
            let p = storage::parent(child);
            if self.value(child) < self.value(p) {
                self.swap(child, p);
                child = p;
            } else {
                break;
            }
        }
    }

    fn percolate(&mut self, mut p: usize) {
        while !self.heap.is_leaf(p) {
            let mut child = storage::left(p);
            let right = storage::right(p);
            if self.heap.has_right(p) && self.value(right) < self.value(child) {
                child = right;
            }
            if self.value(p) <= self.value(child) {
                return;
            }
            self.swap(child, p);
            p = child;
        }
    }

    #[inline]
    fn debug_check(&self) {
        #[cfg(feature = "strict-invariants")]
        debug_assert!(self.verify_internal_structure(), "heap index out of sync");
    }
}

impl<K, V, P> Heap for IndexedHeap<K, V, P>
where
    K: Hash + Eq + Clone,
    P: Ord,
{
    type Item = K;
    type Popped = (K, V, P);

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn peek(&self) -> Result<&K, HeapError> {
        self.heap
            .as_slice()
            .first()
            .ok_or(HeapError::EmptyContainer)
    }

    /// Removes the root key and everything tracked for it
    fn dequeue(&mut self) -> Result<(K, V, P), HeapError> {
        let last = self.heap.last_index().ok_or(HeapError::EmptyContainer)?;
        self.swap(storage::ROOT, last);
        let key = self.heap.pop_last().ok_or(HeapError::EmptyContainer)?;
        let entry = self.entries.remove(&key).ok_or(HeapError::UnknownKey)?;
        self.order.remove(&entry.seq);
        if !self.heap.is_empty() {
            self.percolate(storage::ROOT);
        }
        self.debug_check();
        Ok((key, entry.payload, entry.priority))
    }
}

impl<K, V, P> Default for IndexedHeap<K, V, P>
where
    K: Hash + Eq + Clone,
    P: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Insertion-ordered iterator over `(key, payload)` pairs
pub struct Iter<'a, K, V, P> {
    keys: std::collections::btree_map::Values<'a, u64, K>,
    entries: &'a FxHashMap<K, Entry<V, P>>,
}

impl<'a, K, V, P> Iterator for Iter<'a, K, V, P>
where
    K: Hash + Eq,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        self.entries.get(key).map(|e| (key, &e.payload))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<'a, K, V, P> IntoIterator for &'a IndexedHeap<K, V, P>
where
    K: Hash + Eq + Clone,
    P: Ord,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> IndexedHeap<&'static str, &'static str, i32> {
        let mut heap = IndexedHeap::new();
        heap.enqueue("a", "story a", 10).unwrap();
        heap.enqueue("b", "story b", 20).unwrap();
        heap.enqueue("c", "story c", 30).unwrap();
        heap
    }

    #[test]
    fn test_basic_operations() {
        let mut heap = feed();
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek(), Ok(&"a"));
        assert_eq!(heap.peek_entry(), Ok((&"a", &"story a", &10)));

        assert_eq!(heap.dequeue(), Ok(("a", "story a", 10)));
        assert_eq!(heap.dequeue(), Ok(("b", "story b", 20)));
        assert_eq!(heap.dequeue(), Ok(("c", "story c", 30)));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_empty_errors() {
        let mut heap: IndexedHeap<u32, (), u32> = IndexedHeap::new();
        assert_eq!(heap.peek(), Err(HeapError::EmptyContainer));
        assert_eq!(heap.peek_entry(), Err(HeapError::EmptyContainer));
        assert_eq!(heap.dequeue(), Err(HeapError::EmptyContainer));
    }

    #[test]
    fn test_reweight_moves_key() {
        let mut heap = feed();

        assert_eq!(heap.reweight(&"b", 1), Ok(20));
        assert_eq!(heap.peek(), Ok(&"b"));
        assert!(heap.verify_internal_structure());

        heap.reweight(&"c", 100).unwrap();
        assert!(heap.verify_internal_structure());
        heap.reweight(&"c", 5).unwrap();
        assert_eq!(heap.peek(), Ok(&"b"));

        heap.reweight(&"b", 50).unwrap();
        assert_eq!(heap.peek(), Ok(&"c"));
        assert_eq!(heap.weight(&"c"), Ok(&5));
        assert!(heap.verify_internal_structure());
    }

    #[test]
    fn test_reweight_same_priority() {
        let mut heap = feed();
        assert_eq!(heap.reweight(&"a", 10), Ok(10));
        assert_eq!(heap.peek(), Ok(&"a"));
        assert!(heap.verify_internal_structure());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut heap = feed();
        assert_eq!(
            heap.enqueue("b", "other", 0),
            Err(HeapError::DuplicateKey)
        );
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek(), Ok(&"a"));
        assert_eq!(heap.get(&"b"), Ok(&"story b"));
        assert_eq!(heap.weight(&"b"), Ok(&20));
    }

    #[test]
    fn test_unknown_key() {
        let mut heap = feed();
        assert_eq!(heap.weight(&"z"), Err(HeapError::UnknownKey));
        assert_eq!(heap.get(&"z"), Err(HeapError::UnknownKey));
        assert_eq!(heap.reweight(&"z", 1), Err(HeapError::UnknownKey));
        assert!(!heap.contains_key(&"z"));
        assert!(heap.verify_internal_structure());
    }

    #[test]
    fn test_dequeued_key_is_forgotten() {
        let mut heap = feed();
        heap.dequeue().unwrap();
        assert!(!heap.contains_key(&"a"));
        assert_eq!(heap.get(&"a"), Err(HeapError::UnknownKey));
        heap.enqueue("a", "story a again", 99).unwrap();
        assert_eq!(heap.get(&"a"), Ok(&"story a again"));
        assert!(heap.verify_internal_structure());
    }

    #[test]
    fn test_iter_insertion_order() {
        let mut heap = IndexedHeap::new();
        heap.enqueue("z", 1, 3).unwrap();
        heap.enqueue("y", 2, 1).unwrap();
        heap.enqueue("x", 3, 2).unwrap();

        let pairs: Vec<_> = heap.iter().collect();
        assert_eq!(pairs, vec![(&"z", &1), (&"y", &2), (&"x", &3)]);

        heap.dequeue().unwrap();
        let keys: Vec<_> = (&heap).into_iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["z", "x"]);
    }

    #[test]
    fn test_growth_past_default_capacity() {
        let mut heap = IndexedHeap::new();
        assert_eq!(heap.capacity(), DEFAULT_CAPACITY);
        for i in (0..40u32).rev() {
            heap.enqueue(i, i * 10, i).unwrap();
            assert!(heap.verify_internal_structure());
        }
        assert_eq!(heap.capacity(), 2 * (2 * DEFAULT_CAPACITY + 17) + 17);
        for i in 0..40u32 {
            assert_eq!(heap.dequeue(), Ok((i, i * 10, i)));
        }
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original = feed();
        let copy = original.clone();
        original.reweight(&"c", 0).unwrap();
        original.dequeue().unwrap();

        assert_eq!(copy.len(), 3);
        assert_eq!(copy.peek(), Ok(&"a"));
        assert_eq!(copy.weight(&"c"), Ok(&30));
        assert!(copy.verify_internal_structure());
    }

    #[test]
    fn test_clear() {
        let mut heap = feed();
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.iter().count(), 0);
        heap.enqueue("a", "fresh", 1).unwrap();
        assert_eq!(heap.get(&"a"), Ok(&"fresh"));
    }

    #[test]
    fn test_oversized_capacity_leaves_heap_unchanged() {
        let mut heap: IndexedHeap<u64, u64, u64> = IndexedHeap::with_capacity(usize::MAX / 2);
        assert_eq!(heap.enqueue(1, 10, 100), Err(HeapError::AllocationFailure));
        assert!(heap.is_empty());
        assert!(!heap.contains_key(&1));
        assert_eq!(heap.iter().count(), 0);
        assert!(heap.verify_internal_structure());
    }
}
