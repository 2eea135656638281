//! Min-priority queue with lazy deletion.
//!
//! `std::collections::BinaryHeap` has no decrease-key operation, so
//! [`LazyQueue::set_priority`] instead invalidates the node's previous
//! entry and pushes a fresh one. Invalidation is keyed by a per-entry
//! serial number, never by value, so two entries with equal
//! (priority, node) are never confused. Stale entries are discarded when
//! they surface in [`LazyQueue::pop`].

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::hash::Hash;

use crate::error::{Result, SimError};

/// A heap entry. The serial is the entry's identity for invalidation and
/// also the final ordering tie-break, so the heap order is total:
/// (priority, node reading order, insertion order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry<N> {
    priority: u32,
    node: N,
    serial: u64,
}

/// Min-priority queue over nodes with priority updates via lazy deletion.
#[derive(Debug, Clone)]
pub struct LazyQueue<N> {
    heap: BinaryHeap<Reverse<Entry<N>>>,
    /// Node -> serial of its latest live entry.
    finder: HashMap<N, u64>,
    /// Serials of invalidated entries not yet popped.
    deleted: HashSet<u64>,
    next_serial: u64,
}

impl<N: Copy + Eq + Ord + Hash> LazyQueue<N> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            finder: HashMap::new(),
            deleted: HashSet::new(),
            next_serial: 0,
        }
    }

    /// Insert a new entry for `node`.
    ///
    /// Any existing entry for the node stays live; callers that want to
    /// *update* a queued node use [`Self::set_priority`] instead.
    pub fn push(&mut self, node: N, priority: u32) {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.heap.push(Reverse(Entry {
            priority,
            node,
            serial,
        }));
        self.finder.insert(node, serial);
    }

    /// Update a node's priority, invalidating its previous entry if one is
    /// live.
    pub fn set_priority(&mut self, node: N, priority: u32) {
        if let Some(&stale) = self.finder.get(&node) {
            self.deleted.insert(stale);
        }
        self.push(node, priority);
    }

    /// Whether the node has a live (non-invalidated) entry.
    #[must_use]
    pub fn has_node(&self, node: N) -> bool {
        self.finder.contains_key(&node)
    }

    /// Whether any live entries remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.finder.is_empty()
    }

    /// Remove and return the lowest-priority live entry as
    /// `(priority, node)`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::EmptyQueue`] if no live entries remain.
    pub fn pop(&mut self) -> Result<(u32, N)> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            if self.deleted.remove(&entry.serial) {
                continue;
            }
            if self.finder.get(&entry.node) == Some(&entry.serial) {
                self.finder.remove(&entry.node);
            }
            return Ok((entry.priority, entry.node));
        }
        Err(SimError::EmptyQueue)
    }
}
