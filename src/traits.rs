//! Common traits for heap data structures
//!
//! This module provides the pieces shared by both queues in this crate:
//!
//! - [`HeapError`]: the error taxonomy returned by every fallible operation
//! - [`Heap`]: base trait covering the priority-queue shape (`peek`, `dequeue`,
//!   `len`, `is_empty`) that [`BinaryMinHeap`](crate::binary::BinaryMinHeap) and
//!   [`IndexedHeap`](crate::indexed::IndexedHeap) both expose
//!
//! Insertion is deliberately not part of the trait: the plain heap inserts a bare
//! value while the indexed heap inserts a `(key, payload, priority)` triple.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `peek` or `dequeue` was called on a queue with no elements
    EmptyContainer,
    /// The key is already tracked by the indexed heap
    DuplicateKey,
    /// The key is not tracked by the indexed heap
    UnknownKey,
    /// Growing the backing array failed
    AllocationFailure,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyContainer => write!(f, "operation on an empty heap"),
            HeapError::DuplicateKey => write!(f, "key is already present in the heap"),
            HeapError::UnknownKey => write!(f, "key is not present in the heap"),
            HeapError::AllocationFailure => {
                write!(f, "failed to grow the heap's backing array")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Base trait for the min-heaps in this crate
///
/// # Example
///
/// ```rust
/// use mutable_heaps::Heap;
/// use mutable_heaps::binary::BinaryMinHeap;
///
/// let mut heap = BinaryMinHeap::new();
/// heap.enqueue(3).unwrap();
/// heap.enqueue(1).unwrap();
/// heap.enqueue(2).unwrap();
///
/// assert_eq!(heap.peek(), Ok(&1));
/// assert_eq!(heap.drain_ordered(), vec![1, 2, 3]);
/// ```
pub trait Heap {
    /// What `peek` exposes: the value itself, or the key of the root entry
    type Item: ?Sized;

    /// What `dequeue` hands back for the removed root
    type Popped;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Returns the minimum without removing it
    ///
    /// # Errors
    /// [`HeapError::EmptyContainer`] if the heap holds no elements.
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Result<&Self::Item, HeapError>;

    /// Removes the minimum and returns it
    ///
    /// # Errors
    /// [`HeapError::EmptyContainer`] if the heap holds no elements.
    ///
    /// # Time Complexity
    /// O(log n)
    fn dequeue(&mut self) -> Result<Self::Popped, HeapError>;

    /// Dequeues every element, returning them in ascending priority order
    fn drain_ordered(&mut self) -> Vec<Self::Popped> {
        let mut out = Vec::with_capacity(self.len());
        while let Ok(popped) = self.dequeue() {
            out.push(popped);
        }
        out
    }
}
