//! Indexed binary min-heap over cell indices.
//!
//! Entries are ordered by `(priority, insertion order)`, so equal priorities
//! come out FIFO. Every cell's heap slot is tracked, which makes
//! [`Frontier::decrease_priority`] a sift-up from a known position instead
//! of a scan. [`Frontier::clear`] only bumps a generation stamp.

#[derive(Debug, Clone, Copy)]
struct Entry {
    cell: usize,
    priority: i32,
    seq: u64,
}

impl Entry {
    #[inline]
    fn before(&self, other: &Entry) -> bool {
        (self.priority, self.seq) < (other.priority, other.seq)
    }
}

/// Priority frontier shared by every search on a grid.
#[derive(Debug, Clone)]
pub struct Frontier {
    heap: Vec<Entry>,
    /// Heap position of each cell, valid only when its stamp is current.
    slots: Vec<usize>,
    /// Generation in which the cell was last inserted; 0 means "not queued".
    stamps: Vec<u32>,
    generation: u32,
    seq: u64,
}

impl Frontier {
    /// Create a frontier able to hold cells `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity.min(1024)),
            slots: vec![0; capacity],
            stamps: vec![0; capacity],
            generation: 1,
            seq: 0,
        }
    }

    /// Number of cells this frontier can index.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of queued cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every entry without touching the per-cell index.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Stamps from 2^32 clears ago could alias the new generation.
            self.stamps.fill(0);
            self.generation = 1;
        }
    }

    /// Whether `cell` is currently queued.
    #[inline]
    pub fn contains(&self, cell: usize) -> bool {
        self.stamps.get(cell) == Some(&self.generation)
    }

    /// Current priority of `cell`, if queued.
    pub fn priority_of(&self, cell: usize) -> Option<i32> {
        if self.contains(cell) {
            Some(self.heap[self.slots[cell]].priority)
        } else {
            None
        }
    }

    /// Insert `cell` at `priority`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is already queued or out of capacity.
    pub fn enqueue(&mut self, cell: usize, priority: i32) {
        assert!(
            !self.contains(cell),
            "frontier: cell {cell} enqueued twice"
        );
        let pos = self.heap.len();
        self.heap.push(Entry {
            cell,
            priority,
            seq: self.seq,
        });
        self.seq += 1;
        self.stamps[cell] = self.generation;
        self.slots[cell] = pos;
        self.sift_up(pos);
    }

    /// Remove and return the cell with the lowest priority.
    pub fn dequeue_min(&mut self) -> Option<usize> {
        let last = self.heap.len().checked_sub(1)?;
        self.heap.swap(0, last);
        let top = self.heap.pop()?;
        self.stamps[top.cell] = 0;
        if !self.heap.is_empty() {
            self.slots[self.heap[0].cell] = 0;
            self.sift_down(0);
        }
        Some(top.cell)
    }

    /// Lower the priority of an already queued cell.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not queued or `priority` is not strictly lower
    /// than its current priority.
    pub fn decrease_priority(&mut self, cell: usize, priority: i32) {
        assert!(
            self.contains(cell),
            "frontier: decrease_priority on absent cell {cell}"
        );
        let pos = self.slots[cell];
        let old = self.heap[pos].priority;
        assert!(
            priority < old,
            "frontier: priority of cell {cell} raised from {old} to {priority}"
        );
        self.heap[pos].priority = priority;
        self.sift_up(pos);
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.heap[pos].before(&self.heap[parent]) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < n && self.heap[right].before(&self.heap[left]) {
                child = right;
            }
            if !self.heap[child].before(&self.heap[pos]) {
                break;
            }
            self.swap(pos, child);
            pos = child;
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots[self.heap[a].cell] = a;
        self.slots[self.heap[b].cell] = b;
    }
}
