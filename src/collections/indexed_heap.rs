use crate::errors::HeapError;
use super::FxHashMap;

use std::hash::Hash;


/// Entry stored in the heap array
/// sequence only breaks ties between equal distances
#[derive(Debug, Clone)]
struct HeapEntry<N, C> {
    distance: C,
    sequence: u64,
    node: N,
}

impl<N, C: PartialOrd> HeapEntry<N, C> {
    /// Ordering key is (distance, sequence)
    fn precedes(&self, other: &Self) -> bool {
        self.distance < other.distance
            || (self.distance == other.distance && self.sequence < other.sequence)
    }
}


fn parent(slot: usize) -> usize {
    (slot - 1) / 2
}

fn left_child(slot: usize) -> usize {
    2 * slot + 1
}


/// Binary min-heap with an index from node to array slot
/// Supports decrease-key in O(log n) without scanning the array
/// Each node can be queued at most once at a time
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<N, C> {
    entries: Vec<HeapEntry<N, C>>,
    slots: FxHashMap<N, usize>, // node -> current slot in entries
    next_sequence: u64,
}

impl<N, C> Default for IndexedMinHeap<N, C>
where
    N: Eq + Hash + Clone,
    C: PartialOrd + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, C> IndexedMinHeap<N, C>
where
    N: Eq + Hash + Clone,
    C: PartialOrd + Copy,
{

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            slots: FxHashMap::default(),
            next_sequence: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            slots: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            next_sequence: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the node is currently queued
    pub fn contains(&self, node: &N) -> bool {
        self.slots.contains_key(node)
    }

    /// Current queued distance of a node
    pub fn distance(&self, node: &N) -> Option<C> {
        self.slots.get(node).map(|&slot| self.entries[slot].distance)
    }

    /// Smallest entry without removing it
    pub fn peek(&self) -> Option<(C, &N)> {
        self.entries.first().map(|entry| (entry.distance, &entry.node))
    }

    /// Insert a node that is not queued yet
    pub fn push(&mut self, node: N, distance: C) -> Result<(), HeapError> {
        if self.slots.contains_key(&node) {
            return Err(HeapError::DuplicateNode);
        }

        let slot = self.entries.len();
        self.slots.insert(node.clone(), slot);
        self.entries.push(HeapEntry {
            distance,
            sequence: self.next_sequence,
            node,
        });
        self.next_sequence += 1;

        self.sift_up(slot);
        Ok(())
    }

    /// Remove and return the entry with the smallest distance
    /// Equal distances come out in insertion order
    pub fn pop_min(&mut self) -> Option<(C, N)> {
        if self.entries.is_empty() {
            return None;
        }

        // Move the root to the end so it can be popped off the array
        let last = self.entries.len() - 1;
        self.swap(0, last);
        let entry = self.entries.pop()?;
        self.slots.remove(&entry.node);

        if !self.entries.is_empty() {
            self.sift_down(0);
        }

        Some((entry.distance, entry.node))
    }

    /// Replace the distance of a queued node
    /// Callers pass an improving distance; a larger one is still handled by sifting down
    pub fn decrease_key(&mut self, node: &N, new_distance: C) -> Result<(), HeapError> {
        let slot = *self.slots.get(node).ok_or(HeapError::MissingNode)?;
        self.entries[slot].distance = new_distance;

        if slot > 0 && self.entries[slot].precedes(&self.entries[parent(slot)]) {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
        Ok(())
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent_slot = parent(slot);
            if !self.entries[slot].precedes(&self.entries[parent_slot]) {
                break;
            }
            self.swap(slot, parent_slot);
            slot = parent_slot;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = left_child(slot);
            let right = left + 1;
            let mut smallest = slot;

            if left < len && self.entries[left].precedes(&self.entries[smallest]) {
                smallest = left;
            }
            if right < len && self.entries[right].precedes(&self.entries[smallest]) {
                smallest = right;
            }

            // heap property holds below this slot
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }

    /// Swap two array slots and keep the index in step
    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        for slot in [a, b] {
            if let Some(index) = self.slots.get_mut(&self.entries[slot].node) {
                *index = slot;
            }
        }
    }

    /// Checks the min-heap property and the slot index
    #[cfg(test)]
    fn is_consistent(&self) -> bool {
        let ordered = (1..self.entries.len())
            .all(|slot| !self.entries[slot].precedes(&self.entries[parent(slot)]));
        let indexed = self.slots.len() == self.entries.len()
            && self.entries.iter().enumerate()
                .all(|(slot, entry)| self.slots.get(&entry.node) == Some(&slot));
        ordered && indexed
    }
}
