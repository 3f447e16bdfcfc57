//! Frontier collections for A*.
//!
//! Both implementations select the open cell with the lowest `f`, breaking
//! ties in favour of the cell inserted first. A cell keeps its insertion
//! rank when its cost is lowered, so the two return the same cell on every
//! selection and a search yields the same path with either.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use stargrid_core::Grid;

/// Which [`OpenSet`] implementation a search uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OpenSetKind {
    /// [`LinearOpenSet`]: full scan on every selection.
    #[default]
    Linear,
    /// [`HeapOpenSet`]: binary heap with lazy deletion.
    Heap,
}

/// Priority collection of open cells, stored as flat grid indices.
///
/// Priorities are read from the grid (`Cell::f`), so the set must be told
/// through [`decrease`](OpenSet::decrease) whenever a member's `g` drops.
pub trait OpenSet {
    /// Insert a newly opened cell.
    fn push(&mut self, grid: &Grid, idx: usize);

    /// Note that the `f` of member `idx` has been lowered.
    fn decrease(&mut self, grid: &Grid, idx: usize);

    /// Remove and return the member with minimum `f`, earliest insertion
    /// first among equals.
    fn pop_min(&mut self, grid: &Grid) -> Option<usize>;

    fn contains(&self, idx: usize) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// LinearOpenSet
// ---------------------------------------------------------------------------

/// Insertion-ordered list scanned in full on every selection.
#[derive(Clone, Debug, Default)]
pub struct LinearOpenSet {
    items: Vec<usize>,
}

impl LinearOpenSet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OpenSet for LinearOpenSet {
    fn push(&mut self, _grid: &Grid, idx: usize) {
        self.items.push(idx);
    }

    fn decrease(&mut self, _grid: &Grid, _idx: usize) {
        // Priorities are read fresh on every scan.
    }

    fn pop_min(&mut self, grid: &Grid) -> Option<usize> {
        let (pos, _) = self
            .items
            .iter()
            .enumerate()
            // min_by_key keeps the first of equal keys.
            .min_by_key(|&(_, &i)| grid.at(i).f())?;
        Some(self.items.remove(pos))
    }

    fn contains(&self, idx: usize) -> bool {
        self.items.contains(&idx)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

// ---------------------------------------------------------------------------
// HeapOpenSet
// ---------------------------------------------------------------------------

/// Heap entry ordered by `(f, seq)`, reversed so `BinaryHeap` pops the
/// smallest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    f: i32,
    seq: u64,
    idx: usize,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary heap with lazy decrease-key.
///
/// Lowering a member's cost pushes a fresh entry; the superseded one is
/// recognised as stale (its `f` no longer matches the cell) and skipped
/// when it surfaces.
#[derive(Clone, Debug)]
pub struct HeapOpenSet {
    heap: BinaryHeap<Entry>,
    /// Insertion rank of each member, `None` when not in the set.
    slots: Vec<Option<u64>>,
    next_seq: u64,
    len: usize,
}

impl HeapOpenSet {
    /// Create an empty set able to hold any cell of a grid with `cells`
    /// cells.
    pub fn new(cells: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            slots: vec![None; cells],
            next_seq: 0,
            len: 0,
        }
    }
}

impl OpenSet for HeapOpenSet {
    fn push(&mut self, grid: &Grid, idx: usize) {
        if self.slots.len() < grid.len() {
            self.slots.resize(grid.len(), None);
        }
        if self.slots[idx].is_some() {
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots[idx] = Some(seq);
        self.len += 1;
        self.heap.push(Entry {
            f: grid.at(idx).f(),
            seq,
            idx,
        });
    }

    fn decrease(&mut self, grid: &Grid, idx: usize) {
        let Some(Some(seq)) = self.slots.get(idx).copied() else {
            return;
        };
        self.heap.push(Entry {
            f: grid.at(idx).f(),
            seq,
            idx,
        });
    }

    fn pop_min(&mut self, grid: &Grid) -> Option<usize> {
        while let Some(e) = self.heap.pop() {
            let live = self.slots[e.idx] == Some(e.seq) && grid.at(e.idx).f() == e.f;
            if !live {
                continue;
            }
            self.slots[e.idx] = None;
            self.len -= 1;
            return Some(e.idx);
        }
        None
    }

    fn contains(&self, idx: usize) -> bool {
        self.slots.get(idx).is_some_and(Option::is_some)
    }

    fn len(&self) -> usize {
        self.len
    }
}
