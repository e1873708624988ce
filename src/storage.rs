//! Array storage shared by the binary heaps
//!
//! [`HeapStorage`] owns the contiguous slot buffer behind both
//! [`BinaryMinHeap`](crate::binary::BinaryMinHeap) and
//! [`IndexedHeap`](crate::indexed::IndexedHeap). It tracks a logical capacity
//! separately from the `Vec`'s own so that growth follows one fixed policy:
//!
//! ```text
//! new_capacity = 2 * capacity + 17
//! ```
//!
//! The `+ 17` keeps a zero-capacity heap from growing one slot at a time.
//!
//! The buffer itself is reserved lazily, on the first push that needs the
//! room, so a large requested capacity surfaces as
//! [`HeapError::AllocationFailure`] instead of an allocator panic.
//!
//! # Layout
//!
//! Slots are 0-indexed with the root at index 0:
//!
//! | Relation | Index        |
//! |----------|--------------|
//! | parent   | `(i - 1) / 2`|
//! | left     | `2 * i + 1`  |
//! | right    | `2 * i + 2`  |

use crate::traits::HeapError;
use log::debug;

/// Multiplier applied to the current capacity on growth
pub(crate) const GROWTH_FACTOR: usize = 2;

/// Constant added on growth so tiny heaps don't thrash
pub(crate) const GROWTH_PAD: usize = 17;

/// Growable slot buffer with heap index arithmetic
#[derive(Debug, Clone)]
pub(crate) struct HeapStorage<T> {
    slots: Vec<T>,
    capacity: usize,
}

impl<T> HeapStorage<T> {
    /// Creates empty storage with a logical capacity of `capacity` slots
    ///
    /// Nothing is allocated until the first push.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity,
        }
    }

    /// Takes ownership of `slots` as-is; the logical capacity becomes its length
    ///
    /// The caller is responsible for restoring heap order afterwards.
    pub fn from_vec(slots: Vec<T>) -> Self {
        let capacity = slots.len();
        Self { slots, capacity }
    }

    /// Number of occupied slots
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Logical capacity under the growth policy
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Occupied slots in array order
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }

    /// Slot `i`; callers only pass indices below `len()`
    #[inline]
    pub fn get(&self, i: usize) -> &T {
        &self.slots[i]
    }

    #[inline]
    pub fn last_index(&self) -> Option<usize> {
        self.slots.len().checked_sub(1)
    }

    /// Appends `value` at the new last slot, growing first if full
    ///
    /// Returns the index the value landed at. On error nothing is stored.
    pub fn push(&mut self, value: T) -> Result<usize, HeapError> {
        if self.slots.len() == self.capacity {
            self.grow()?;
        }
        if self.slots.len() == self.slots.capacity() {
            self.reserve_logical()?;
        }
        self.slots.push(value);
        Ok(self.slots.len() - 1)
    }

    /// Removes the last occupied slot
    #[inline]
    pub fn pop_last(&mut self) -> Option<T> {
        self.slots.pop()
    }

    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        self.slots.swap(i, j);
    }

    /// Logical reset; the allocation and capacity are kept
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Makes the buffer hold the full logical capacity
    fn reserve_logical(&mut self) -> Result<(), HeapError> {
        self.slots
            .try_reserve_exact(self.capacity - self.slots.len())
            .map_err(|_| HeapError::AllocationFailure)
    }

    fn grow(&mut self) -> Result<(), HeapError> {
        let new_capacity = self
            .capacity
            .checked_mul(GROWTH_FACTOR)
            .and_then(|c| c.checked_add(GROWTH_PAD))
            .ok_or(HeapError::AllocationFailure)?;
        self.slots
            .try_reserve_exact(new_capacity - self.slots.len())
            .map_err(|_| HeapError::AllocationFailure)?;
        debug!(
            "growing heap storage: capacity {} -> {} ({} occupied)",
            self.capacity,
            new_capacity,
            self.slots.len()
        );
        self.capacity = new_capacity;
        Ok(())
    }

    /// True if `i` addresses an occupied slot
    #[inline]
    pub fn valid(&self, i: usize) -> bool {
        i < self.slots.len()
    }

    /// True if `i` has no children
    #[inline]
    pub fn is_leaf(&self, i: usize) -> bool {
        !self.valid(left(i))
    }

    /// True if `p` has both a left and right child
    #[inline]
    pub fn has_right(&self, p: usize) -> bool {
        self.valid(right(p))
    }
}

// ----------------------------------------------------------------------
// Index arithmetic
// ----------------------------------------------------------------------

/// Index of the root slot
pub(crate) const ROOT: usize = 0;

/// Parent index of `child`
///
/// Precondition: `child` is not the root.
#[inline]
pub(crate) fn parent(child: usize) -> usize {
    (child - 1) / 2
}

#[inline]
pub(crate) fn left(p: usize) -> usize {
    2 * p + 1
}

#[inline]
pub(crate) fn right(p: usize) -> usize {
    left(p) + 1
}

#[inline]
pub(crate) fn is_root(i: usize) -> bool {
    i == ROOT
}

impl<T> Default for HeapStorage<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
