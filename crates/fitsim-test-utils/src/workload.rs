//! Deterministic allocate/free workloads and a replay driver.
//!
//! A [`Workload`] is a flat list of [`WorkloadOp`]s that refer to
//! allocations by caller-chosen handles rather than by offset, so the
//! same workload can be replayed against every placement policy.

use std::ops::Range;

use fitsim_arena::{ArenaAllocator, ArenaStats};
use fitsim_core::ArenaOffset;
use indexmap::IndexMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One step of a workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkloadOp {
    /// Allocate `size` bytes and remember the result under `handle`.
    Alloc { handle: u32, size: usize },
    /// Free whatever `handle` refers to. Ignored if its allocation failed.
    Free { handle: u32 },
}

/// An ordered sequence of allocate/free operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Workload {
    pub ops: Vec<WorkloadOp>,
}

impl Workload {
    pub fn from_ops(ops: Vec<WorkloadOp>) -> Self {
        Self { ops }
    }

    /// Generate `len` operations from `seed`.
    ///
    /// Each step frees a random live handle with probability
    /// `free_probability` (when any are live), otherwise allocates a size
    /// drawn uniformly from `sizes`. Same seed, same workload.
    ///
    /// # Panics
    ///
    /// Panics if `sizes` is empty or `free_probability` is outside `[0, 1]`.
    pub fn random(seed: u64, len: usize, sizes: Range<usize>, free_probability: f64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut live: Vec<u32> = Vec::new();
        let mut next_handle = 0u32;
        let mut ops = Vec::with_capacity(len);

        for _ in 0..len {
            if !live.is_empty() && rng.random_bool(free_probability) {
                let idx = rng.random_range(0..live.len());
                ops.push(WorkloadOp::Free {
                    handle: live.swap_remove(idx),
                });
            } else {
                let size = rng.random_range(sizes.clone());
                ops.push(WorkloadOp::Alloc {
                    handle: next_handle,
                    size,
                });
                live.push(next_handle);
                next_handle += 1;
            }
        }
        Self { ops }
    }

    /// Allocate `count` blocks of `size` bytes, then free every other one.
    ///
    /// Leaves half the space free in `size`-byte holes, none of which can
    /// hold anything larger than `size`.
    pub fn checkerboard(count: u32, size: usize) -> Self {
        let mut ops: Vec<WorkloadOp> = (0..count)
            .map(|handle| WorkloadOp::Alloc { handle, size })
            .collect();
        ops.extend((0..count).step_by(2).map(|handle| WorkloadOp::Free { handle }));
        Self { ops }
    }

    /// Append `other`'s operations, shifting its handles past ours.
    pub fn then(mut self, other: Workload) -> Self {
        let base = self.max_handle().map_or(0, |h| h + 1);
        self.ops.extend(other.ops.into_iter().map(|op| match op {
            WorkloadOp::Alloc { handle, size } => WorkloadOp::Alloc {
                handle: handle + base,
                size,
            },
            WorkloadOp::Free { handle } => WorkloadOp::Free {
                handle: handle + base,
            },
        }));
        self
    }

    fn max_handle(&self) -> Option<u32> {
        self.ops
            .iter()
            .map(|op| match *op {
                WorkloadOp::Alloc { handle, .. } | WorkloadOp::Free { handle } => handle,
            })
            .max()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Outcome of replaying a [`Workload`].
#[derive(Clone, Debug)]
pub struct ReplayReport {
    /// Successful allocations.
    pub allocated: usize,
    /// Allocations that found no fitting block.
    pub failed: usize,
    /// Frees that released a live handle.
    pub freed: usize,
    /// Frees of handles whose allocation had failed.
    pub skipped_frees: usize,
    /// Largest block count seen after any operation.
    pub peak_blocks: usize,
    /// Handles still live at the end, in allocation order.
    pub live: Vec<(u32, ArenaOffset)>,
    /// Allocator statistics after the last operation.
    pub final_stats: ArenaStats,
}

/// Applies workload operations one at a time, mapping handles to offsets.
///
/// Use this instead of [`replay`] when something must be checked between
/// operations.
#[derive(Debug, Default)]
pub struct Replayer {
    live: IndexMap<u32, ArenaOffset>,
    allocated: usize,
    failed: usize,
    freed: usize,
    skipped_frees: usize,
    peak_blocks: usize,
}

impl Replayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one operation to `alloc`.
    ///
    /// # Panics
    ///
    /// Panics if `op` allocates a handle that is still live.
    pub fn apply(&mut self, alloc: &mut ArenaAllocator, op: WorkloadOp) {
        match op {
            WorkloadOp::Alloc { handle, size } => match alloc.allocate(size) {
                Ok(offset) => {
                    let previous = self.live.insert(handle, offset);
                    assert!(previous.is_none(), "handle {handle} allocated twice");
                    self.allocated += 1;
                }
                Err(_) => self.failed += 1,
            },
            WorkloadOp::Free { handle } => match self.live.shift_remove(&handle) {
                Some(offset) => {
                    alloc.free(offset);
                    self.freed += 1;
                }
                None => self.skipped_frees += 1,
            },
        }
        self.peak_blocks = self.peak_blocks.max(alloc.block_count());
    }

    /// Offset currently mapped to `handle`, if live.
    pub fn offset_of(&self, handle: u32) -> Option<ArenaOffset> {
        self.live.get(&handle).copied()
    }

    /// Summarise everything applied so far.
    pub fn finish(self, alloc: &ArenaAllocator) -> ReplayReport {
        ReplayReport {
            allocated: self.allocated,
            failed: self.failed,
            freed: self.freed,
            skipped_frees: self.skipped_frees,
            peak_blocks: self.peak_blocks.max(alloc.block_count()),
            live: self.live.into_iter().collect(),
            final_stats: alloc.stats(),
        }
    }
}

/// Run `workload` against `alloc` from start to finish.
///
/// # Panics
///
/// Panics if the workload allocates the same handle twice while it is live.
pub fn replay(alloc: &mut ArenaAllocator, workload: &Workload) -> ReplayReport {
    let mut replayer = Replayer::new();
    for op in &workload.ops {
        replayer.apply(alloc, *op);
    }
    replayer.finish(alloc)
}
