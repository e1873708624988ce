//! Mutable-Priority Binary Heaps for Rust
//!
//! This crate provides two array-backed binary min-heaps that share one growth
//! policy and one set of index arithmetic:
//!
//! - **[`BinaryMinHeap`](binary::BinaryMinHeap)**: values are their own priority;
//!   O(1) average enqueue, O(log n) dequeue, and O(n) bulk construction (heapify)
//! - **[`IndexedHeap`](indexed::IndexedHeap)**: entries are identified by a unique
//!   key that owns a payload and a priority; an identity-to-position index keeps
//!   re-prioritization (`reweight`) at O(log n) and key lookups at O(1)
//!
//! The [`pathfinding`] module runs Dijkstra and A* with `IndexedHeap` as the
//! open set, using `reweight` as decrease-key.
//!
//! Neither heap is thread-safe; share one behind your own lock if needed.
//!
//! # Feature Flags
//!
//! - `strict-invariants`: re-check heap order (and, for `IndexedHeap`, the
//!   key-to-position index) after every mutation with `debug_assert!`. Run the
//!   suite with it enabled via `cargo test --features strict-invariants`; the
//!   `strict_invariants` test target only builds with the feature on.
//!
//! # Example
//!
//! ```rust
//! use mutable_heaps::indexed::IndexedHeap;
//! use mutable_heaps::{Heap, HeapError};
//!
//! let mut heap = IndexedHeap::new();
//! heap.enqueue("a", "first", 10).unwrap();
//! heap.enqueue("b", "second", 20).unwrap();
//! heap.reweight(&"b", 1).unwrap();
//!
//! assert_eq!(heap.peek(), Ok(&"b"));
//! assert_eq!(heap.enqueue("a", "again", 0), Err(HeapError::DuplicateKey));
//! ```

pub mod binary;
pub mod indexed;
pub mod pathfinding;
mod storage;
pub mod traits;

// Re-export the main trait and error for convenience
pub use traits::{Heap, HeapError};
