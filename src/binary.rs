//! Binary min-heap over naturally ordered values
//!
//! [`BinaryMinHeap`] is the plain half of this crate: values are their own
//! priority, there is no identity index, and duplicates are allowed. It adds
//! O(n) bulk construction (heapify) on top of the usual single-element
//! operations.
//!
//! # Time Complexity
//!
//! | Operation    | Complexity                         |
//! |--------------|------------------------------------|
//! | `enqueue`    | O(1) average, O(log n) worst-case  |
//! | `dequeue`    | O(log n)                           |
//! | `peek`       | O(1)                               |
//! | `from_vec`   | O(n)                               |
//!
//! # Example
//!
//! ```rust
//! use mutable_heaps::Heap;
//! use mutable_heaps::binary::BinaryMinHeap;
//!
//! let mut heap = BinaryMinHeap::from_vec(vec![5, 1, 4]);
//! heap.enqueue(2).unwrap();
//! heap.enqueue(3).unwrap();
//!
//! assert_eq!(heap.peek(), Ok(&1));
//! assert_eq!(heap.dequeue(), Ok(1));
//! assert_eq!(heap.dequeue(), Ok(2));
//! assert_eq!(heap.into_sorted_vec(), vec![3, 4, 5]);
//! ```

use crate::storage::{self, HeapStorage};
use crate::traits::{Heap, HeapError};
use log::debug;
use std::fmt;

/// A binary min-heap of values ordered by `T: Ord`
///
/// Comparison is strict less-than; equal values keep whatever relative order
/// the heap structure leaves them in.
#[derive(Debug, Clone)]
pub struct BinaryMinHeap<T: Ord> {
    data: HeapStorage<T>,
}

impl<T: Ord> BinaryMinHeap<T> {
    /// Creates an empty heap with zero capacity; the first enqueue grows it
    pub fn new() -> Self {
        Self {
            data: HeapStorage::default(),
        }
    }

    /// Creates an empty heap with room for `capacity` values before growing
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: HeapStorage::with_capacity(capacity),
        }
    }

    /// Builds a heap from `items` in O(n)
    ///
    /// Every internal node is percolated, starting from the last one and working
    /// back to the root. The resulting heap is full, so the next enqueue grows it.
    pub fn from_vec(items: Vec<T>) -> Self {
        debug!("heapifying {} values", items.len());
        let mut heap = Self {
            data: HeapStorage::from_vec(items),
        };
        if let Some(last) = heap.data.last_index() {
            if last > 0 {
                for i in (storage::ROOT..=storage::parent(last)).rev() {
                    heap.percolate(i);
                }
            }
        }
        heap.debug_check();
        heap
    }

    /// Inserts `value`, growing the backing array if it is full
    ///
    /// # Errors
    /// [`HeapError::AllocationFailure`] if growth fails; the heap is unchanged.
    pub fn enqueue(&mut self, value: T) -> Result<(), HeapError> {
        let slot = self.data.push(value)?;
        self.bubble(slot);
        self.debug_check();
        Ok(())
    }

    /// Logical reset; capacity is retained
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Allocated slots under the `2 * capacity + 17` growth policy
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Current contents in array order (not sorted)
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.as_slice().iter()
    }

    /// Current contents in array order (not sorted)
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Consumes the heap, returning its values in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        self.drain_ordered()
    }

    /// Checks the heap-order invariant over every parent/child pair
    pub fn verify_internal_structure(&self) -> bool {
        let slots = self.data.as_slice();
        (1..slots.len()).all(|i| slots[storage::parent(i)] <= slots[i])
    }

    /// Move the value at `child` up while it is smaller than its parent
    fn bubble(&mut self, mut child: usize) {
        while !storage::is_root(child) {
            let p = storage::parent(child);
            if self.data.get(child) < self.data.get(p) {
                self.data.swap(child, p);
                child = p;
            } else {
                break;
            }
        }
    }

    /// Move the value at `p` down while its smaller child is smaller than it
    fn percolate(&mut self, mut p: usize) {
        while !self.data.is_leaf(p) {
            let mut child = storage::left(p);
            let right = storage::right(p);
            if self.data.has_right(p) && self.data.get(right) < self.data.get(child) {
                child = right;
            }
            if self.data.get(p) <= self.data.get(child) {
                return;
            }
            self.data.swap(child, p);
            p = child;
        }
    }

    #[inline]
    fn debug_check(&self) {
        #[cfg(feature = "strict-invariants")]
        debug_assert!(self.verify_internal_structure(), "heap order violated");
    }
}

impl<T: Ord> Heap for BinaryMinHeap<T> {
    type Item = T;
    type Popped = T;

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn peek(&self) -> Result<&T, HeapError> {
        self.data
            .as_slice()
            .first()
            .ok_or(HeapError::EmptyContainer)
    }

    fn dequeue(&mut self) -> Result<T, HeapError> {
        let last = self.data.last_index().ok_or(HeapError::EmptyContainer)?;
        self.data.swap(storage::ROOT, last);
        let min = self
            .data
            .pop_last()
            .ok_or(HeapError::EmptyContainer)?;
        if !self.data.is_empty() {
            self.percolate(storage::ROOT);
        }
        self.debug_check();
        Ok(min)
    }
}

impl<T: Ord> Default for BinaryMinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> From<Vec<T>> for BinaryMinHeap<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T: Ord> FromIterator<T> for BinaryMinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T: Ord> IntoIterator for &'a BinaryMinHeap<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Prints the contents in array order, each value followed by a space
impl<T: Ord + fmt::Display> fmt::Display for BinaryMinHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            write!(f, "{} ", value)?;
        }
        Ok(())
    }
}
