//! Indexed min-heap over channel ids.
//!
//! A `Vec`-backed binary heap plus a position index (`id -> array slot`),
//! favored over a pairing heap for cache behavior. Tie-break is smallest id.
//! `update` runs in O(log M) by id rather than by full-heap rebuild, unlike
//! a plain `std::collections::BinaryHeap` wrapper.

use crate::error::NrmError;
use crate::time::SimTime;

pub struct IndexedMinHeap<T: SimTime> {
    /// `(time, channel_id)` pairs in heap order.
    heap: Vec<(T, usize)>,
    /// `position[id]` is `id`'s current slot in `heap`.
    position: Vec<usize>,
}

impl<T: SimTime> IndexedMinHeap<T> {
    /// `build(times)`: O(M) heapify.
    pub fn build(times: Vec<T>) -> Self {
        let heap: Vec<(T, usize)> = times.into_iter().enumerate().map(|(id, t)| (t, id)).collect();
        let mut position = vec![0usize; heap.len()];
        for (idx, &(_, id)) in heap.iter().enumerate() {
            position[id] = idx;
        }
        let mut this = Self { heap, position };
        if this.heap.len() > 1 {
            for i in (0..this.heap.len() / 2).rev() {
                this.sift_down(i);
            }
        }
        this
    }

    /// O(1): the current minimum `(time, id)`, ties broken by smallest id.
    pub fn peek_min(&self) -> (T, usize) {
        self.heap[0]
    }

    /// O(1): the time currently scheduled for `id`.
    pub fn read(&self, id: usize) -> Result<T, NrmError> {
        let idx = self.slot_of(id)?;
        Ok(self.heap[idx].0)
    }

    /// O(log M): rewrite `id`'s scheduled time and restore the heap
    /// invariant by sifting in whichever direction is needed, including
    /// `+∞`.
    pub fn update(&mut self, id: usize, new_time: T) -> Result<(), NrmError> {
        let idx = self.slot_of(id)?;
        let moved_up = new_time < self.heap[idx].0;
        self.heap[idx].0 = new_time;
        if moved_up {
            self.sift_up(idx);
        } else {
            self.sift_down(idx);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn slot_of(&self, id: usize) -> Result<usize, NrmError> {
        self.position.get(id).copied().ok_or_else(|| NrmError::HeapInvariantViolation {
            detail: format!("channel id {id} out of range [0, {})", self.position.len()),
        })
    }

    fn less(&self, a: (T, usize), b: (T, usize)) -> bool {
        a.0 < b.0 || (a.0 == b.0 && a.1 < b.1)
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.position[self.heap[i].1] = i;
        self.position[self.heap[j].1] = j;
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.less(self.heap[i], self.heap[parent]) {
                self.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let l = 2 * i + 1;
            let r = 2 * i + 2;
            let mut smallest = i;
            if l < n && self.less(self.heap[l], self.heap[smallest]) {
                smallest = l;
            }
            if r < n && self.less(self.heap[r], self.heap[smallest]) {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }
}
