//! The future event list.
//!
//! # Design
//!
//! A binary min-heap keyed on event time, with a monotonically increasing
//! sequence number breaking ties in insertion order.  The FIFO tie-break
//! matters for reproducibility: simultaneous events (a routed arrival and a
//! zero-width completion, say) must always be served in the order they were
//! scheduled, on every platform.
//!
//! Push and pop are O(log n); the heap is unbounded.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::Event;

struct Entry<J> {
    event: Event<J>,
    seq:   u64,
}

// Ordering is reversed so BinaryHeap's max-heap behaves as a min-heap:
// earliest time first, lowest sequence number first among equals.
impl<J> Ord for Entry<J> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .event
            .time
            .total_cmp(&self.event.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<J> PartialOrd for Entry<J> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<J> PartialEq for Entry<J> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq && self.event.time.total_cmp(&other.event.time) == Ordering::Equal
    }
}

impl<J> Eq for Entry<J> {}

/// Time-ordered event queue with FIFO tie-breaking.
pub struct EventQueue<J> {
    heap: BinaryHeap<Entry<J>>,
    seq:  u64,
}

impl<J> EventQueue<J> {
    pub fn new() -> Self {
        EventQueue {
            heap: BinaryHeap::new(),
            seq:  0,
        }
    }

    /// Schedule an event.
    pub fn push(&mut self, event: Event<J>) {
        debug_assert!(event.time.is_finite(), "non-finite event time");
        let entry = Entry { event, seq: self.seq };
        self.seq += 1;
        self.heap.push(entry);
    }

    /// Remove and return the earliest event, or `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<Event<J>> {
        self.heap.pop().map(|e| e.event)
    }

    /// Time of the earliest pending event.
    pub fn peek_time(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.event.time)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<J> Default for EventQueue<J> {
    fn default() -> Self {
        EventQueue::new()
    }
}
