//! A simulated process taking part in the odd-even transposition sort.

use oddeven_core::{PhaseParity, Rank, Value};

/// Which half of a merged sequence a process keeps after a compare-split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    /// The smallest values.
    Lower,
    /// The largest values.
    Upper,
}

impl Half {
    /// Half kept by `rank` in a phase of the given parity.
    ///
    /// In odd phases even ranks pair with `rank + 1`; in even phases odd ranks
    /// do. The member of a pair with the lower rank keeps the lower half.
    pub fn kept_by(rank: Rank, parity: PhaseParity) -> Self {
        if parity.is_odd() == rank.is_even() {
            Half::Lower
        } else {
            Half::Upper
        }
    }
}

/// One logical process: a rank, its two neighbours and two data buffers.
#[derive(Debug, Clone)]
pub struct Processor {
    rank: Rank,
    /// Partner during odd phases; `None` below rank zero.
    odd_neighbor: Option<Rank>,
    /// Partner during even phases; `None` below rank zero.
    even_neighbor: Option<Rank>,
    /// Values owned by this process.
    data: Vec<Value>,
    /// Last buffer delivered by a neighbour.
    received: Vec<Value>,
}

impl Processor {
    /// Create a process with empty buffers.
    pub fn new(rank: Rank) -> Self {
        let (odd_neighbor, even_neighbor) = if rank.is_even() {
            (Some(rank.next()), rank.prev())
        } else {
            (rank.prev(), Some(rank.next()))
        };

        Self {
            rank,
            odd_neighbor,
            even_neighbor,
            data: Vec::new(),
            received: Vec::new(),
        }
    }

    /// This processor's rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Values currently owned.
    pub fn data(&self) -> &[Value] {
        &self.data
    }

    /// Last buffer received from a neighbour.
    pub fn received(&self) -> &[Value] {
        &self.received
    }

    /// Replace the owned values and clear the received buffer.
    pub fn load_data(&mut self, values: Vec<Value>) {
        self.data = values;
        self.received.clear();
    }

    /// Overwrite the received buffer.
    pub fn set_received(&mut self, values: Vec<Value>) {
        self.received = values;
    }

    /// Neighbour for a phase of the given parity.
    ///
    /// May be at or above the process count; callers must range-check it and
    /// skip the phase when there is no partner.
    pub fn neighbor_for(&self, parity: PhaseParity) -> Option<Rank> {
        match parity {
            PhaseParity::Odd => self.odd_neighbor,
            PhaseParity::Even => self.even_neighbor,
        }
    }

    /// Sort the owned and received buffers ascending, independently.
    pub fn local_sort_both(&mut self) {
        self.data.sort_unstable();
        self.received.sort_unstable();
    }

    /// Merge both (sorted) buffers and keep one half in the owned buffer.
    ///
    /// The merge is stable with owned values winning ties. The kept half has
    /// exactly as many values as the owned buffer had; an empty received
    /// buffer leaves the owned values unchanged.
    pub fn merge_split(&mut self, parity: PhaseParity) -> Half {
        let keep = self.data.len();
        let merged = merge(&self.data, &self.received);

        let half = Half::kept_by(self.rank, parity);
        let kept = match half {
            Half::Lower => &merged[..keep],
            Half::Upper => &merged[merged.len() - keep..],
        };
        self.data.copy_from_slice(kept);

        half
    }
}

/// Linear merge of two ascending sequences; `left` wins ties.
fn merge(left: &[Value], right: &[Value]) -> Vec<Value> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            merged.push(left[i]);
            i += 1;
        } else {
            merged.push(right[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);

    merged
}
