//! Mutation sequences run with `strict-invariants` enabled
//!
//! Every enqueue, dequeue and reweight re-verifies the heap internally, so these
//! tests fail with a panic at the first operation that breaks an invariant.

mod common;

use mutable_heaps::binary::BinaryMinHeap;
use mutable_heaps::indexed::IndexedHeap;
use mutable_heaps::Heap;

#[test]
fn test_binary_mutations_checked() {
    common::init_logging();
    let mut heap = BinaryMinHeap::new();
    for i in 0..500u32 {
        heap.enqueue((i * 7919) % 503).unwrap();
        if i % 3 == 0 {
            heap.dequeue().unwrap();
        }
    }
    let mut last = 0;
    while let Ok(value) = heap.dequeue() {
        assert!(value >= last);
        last = value;
    }
}

#[test]
fn test_indexed_mutations_checked() {
    common::init_logging();
    let mut heap = IndexedHeap::with_capacity(0);
    for key in 0..300u32 {
        heap.enqueue(key, key.to_string(), (key * 31) % 97).unwrap();
    }
    for key in (0..300u32).step_by(2) {
        heap.reweight(&key, (key * 17) % 101).unwrap();
    }
    for key in (1..300u32).step_by(3) {
        heap.reweight(&key, 1000 + key).unwrap();
    }
    let mut last = 0;
    while let Ok((key, payload, priority)) = heap.dequeue() {
        assert!(priority >= last);
        assert_eq!(payload, key.to_string());
        last = priority;
    }
}
