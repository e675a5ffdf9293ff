//! Addressable min-priority queue.
//!
//! [`PriorityMap`] behaves like a map from key to priority that can also hand out
//! the key with the smallest priority. Insert/update, removal of an arbitrary key
//! and [`PriorityMap::pop_min`] all run in O(log n): entries live in an
//! array-backed binary heap and a position index records where each key sits.
//!
//! The coloring search uses it as its worklist, keyed by vertex entropy.
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{Error, Result};

#[derive(Clone, Debug)]
struct Entry<K, P> {
    priority: P,
    key: K,
}

/// Map from key to priority with O(log n) `set`, `remove` and `pop_min`.
#[derive(Clone, Debug)]
pub struct PriorityMap<K, P> {
    heap: Vec<Entry<K, P>>,
    positions: HashMap<K, usize>,
}

#[inline]
fn parent(i: usize) -> usize {
    (i - 1) >> 1
}

#[inline]
fn left(i: usize) -> usize {
    (i << 1) + 1
}

#[inline]
fn right(i: usize) -> usize {
    (i + 1) << 1
}

impl<K, P> PriorityMap<K, P>
where
    K: Hash + Eq + Clone,
    P: Ord,
{
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&P> {
        self.positions.get(key).map(|&pos| &self.heap[pos].priority)
    }

    /// Inserts `key`, or replaces its priority if already present.
    pub fn set(&mut self, key: K, priority: P) {
        self.remove(&key);
        let pos = self.heap.len();
        self.positions.insert(key.clone(), pos);
        self.heap.push(Entry { priority, key });
        self.sift_up(pos);
    }

    /// Removes `key` and returns its priority.
    ///
    /// The entry is swapped up to the root unconditionally and then popped; moving
    /// an entry along its own parent path never breaks the heap order of the
    /// subtrees it passes.
    pub fn remove(&mut self, key: &K) -> Option<P> {
        let mut pos = *self.positions.get(key)?;
        while pos > 0 {
            let up = parent(pos);
            self.swap(pos, up);
            pos = up;
        }
        self.pop_min().ok().map(|(_, priority)| priority)
    }

    /// Removes and returns the entry with the smallest priority.
    pub fn pop_min(&mut self) -> Result<(K, P)> {
        if self.heap.is_empty() {
            return Err(Error::QueueUnderflow);
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop().ok_or(Error::QueueUnderflow)?;
        self.positions.remove(&entry.key);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok((entry.key, entry.priority))
    }

    pub fn peek_min(&self) -> Result<(&K, &P)> {
        self.heap
            .first()
            .map(|e| (&e.key, &e.priority))
            .ok_or(Error::QueueUnderflow)
    }

    /// Keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.heap.iter().map(|e| &e.key)
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &P)> + '_ {
        self.heap.iter().map(|e| (&e.key, &e.priority))
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }

    // An entry moves above a parent of equal priority.
    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let up = parent(i);
            if self.heap[up].priority < self.heap[i].priority {
                break;
            }
            self.swap(i, up);
            i = up;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let l = left(i);
            let r = right(i);
            let mut low = i;
            if l < n && self.heap[l].priority < self.heap[low].priority {
                low = l;
            }
            if r < n && self.heap[r].priority < self.heap[low].priority {
                low = r;
            }
            if low == i {
                break;
            }
            self.swap(i, low);
            i = low;
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.heap.swap(i, j);
        if let Some(pos) = self.positions.get_mut(&self.heap[i].key) {
            *pos = i;
        }
        if let Some(pos) = self.positions.get_mut(&self.heap[j].key) {
            *pos = j;
        }
    }
}

impl<K, P> Default for PriorityMap<K, P>
where
    K: Hash + Eq + Clone,
    P: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> Extend<(K, P)> for PriorityMap<K, P>
where
    K: Hash + Eq + Clone,
    P: Ord,
{
    fn extend<I: IntoIterator<Item = (K, P)>>(&mut self, iter: I) {
        for (key, priority) in iter {
            self.set(key, priority);
        }
    }
}

impl<K, P> FromIterator<(K, P)> for PriorityMap<K, P>
where
    K: Hash + Eq + Clone,
    P: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
