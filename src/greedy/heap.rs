// Stable min-heap
// Array-backed priority queue ordered by (weight, insertion order)

use crate::trace::NodeId;

#[derive(Debug, Clone, Copy)]
struct Entry {
    weight: u64,
    order: u64,
    id: NodeId,
}

impl Entry {
    fn key(&self) -> (u64, u64) {
        (self.weight, self.order)
    }
}

/// Min-priority queue whose ties break by insertion order, never arbitrarily
///
/// The insertion counter is part of the comparison key, so equal weights come
/// out first-in first-out. The array layout is exposed through `ids()`
/// because snapshots render the queue as the algorithm sees it, which is why
/// this is a local helper rather than `std::collections::BinaryHeap`.
pub struct StableMinHeap {
    entries: Vec<Entry>,
    next_order: u64,
}

impl StableMinHeap {
    pub fn new() -> Self {
        StableMinHeap {
            entries: Vec::new(),
            next_order: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queue contents in heap array order (index 0 is the minimum)
    pub fn ids(&self) -> Vec<NodeId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// The minimum entry without removing it
    pub fn peek(&self) -> Option<NodeId> {
        self.entries.first().map(|e| e.id)
    }

    pub fn push(&mut self, id: NodeId, weight: u64) {
        self.entries.push(Entry {
            weight,
            order: self.next_order,
            id,
        });
        self.next_order += 1;
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return the minimum entry
    pub fn pop(&mut self) -> Option<NodeId> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let entry = self.entries.pop();
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        entry.map(|e| e.id)
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.entries[i].key() < self.entries[parent].key() {
                self.entries.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut smallest = i;

            if left < self.entries.len()
                && self.entries[left].key() < self.entries[smallest].key()
            {
                smallest = left;
            }
            if right < self.entries.len()
                && self.entries[right].key() < self.entries[smallest].key()
            {
                smallest = right;
            }
            if smallest == i {
                break;
            }

            self.entries.swap(i, smallest);
            i = smallest;
        }
    }
}

impl Default for StableMinHeap {
    fn default() -> Self {
        Self::new()
    }
}
