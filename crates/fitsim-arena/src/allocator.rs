//! The arena allocator: placement, splitting, and coalescing over one
//! owned byte buffer.
//!
//! ```text
//! arena:  [ USED 16 | FREE 52 | USED 4 | FREE 12 | ... ]
//!           ▲         ▲
//!           head      cursor (block of the last first/next-fit hit)
//! ```
//!
//! The list is always a partition of the arena: it starts at offset 0,
//! blocks are contiguous in list order, and their sizes sum to the arena
//! size. Every free merges all adjacent FREE runs, so two FREE blocks are
//! never neighbours once an operation returns.

use fitsim_core::{align_up, Algorithm, ArenaOffset, BlockState};
use tracing::{debug, trace, warn};

use crate::block::{BlockId, BlockInfo, BlockTable};
use crate::config::AllocatorConfig;
use crate::error::{AllocError, InitError};
use crate::placement;
use crate::stats::{ArenaStats, Counters};

/// What a call to [`ArenaAllocator::free`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FreeOutcome {
    /// A USED block was released.
    Released,
    /// The block was already FREE. A warning was logged and nothing changed.
    DoubleFree,
    /// No block starts at the given offset. Nothing changed.
    Unknown,
}

/// A free-list allocator over a single pre-allocated byte arena.
///
/// The arena is obtained once in [`init`](Self::init) and released once in
/// [`teardown`](Self::teardown) (or on drop). Requests are answered purely
/// from the block list; the system allocator is only touched again when a
/// split needs a descriptor slot that has not been created before.
pub struct ArenaAllocator {
    /// Backing storage, zero-initialised at init.
    arena: Vec<u8>,
    blocks: BlockTable,
    algorithm: Algorithm,
    /// Block of the last successful first-fit or next-fit allocation.
    /// Always a linked descriptor.
    cursor: BlockId,
    counters: Counters,
}

impl ArenaAllocator {
    /// Allocate the backing arena and create one FREE block spanning it.
    ///
    /// The arena size is rounded up to
    /// [`ALIGNMENT`](fitsim_core::ALIGNMENT). On success
    /// [`block_count`](Self::block_count) is 1 and the next-fit cursor
    /// sits at the list head.
    pub fn init(config: AllocatorConfig) -> Result<Self, InitError> {
        if config.arena_size == 0 {
            return Err(InitError::ZeroSize);
        }
        let size = config.aligned_size().ok_or(InitError::SizeOverflow {
            requested: config.arena_size,
        })?;

        let mut arena = Vec::new();
        arena
            .try_reserve_exact(size)
            .map_err(|_| InitError::BackingAllocationFailed { bytes: size })?;
        arena.resize(size, 0);

        let blocks = BlockTable::new(size);
        let cursor = blocks.head();
        debug!(arena_size = size, algorithm = %config.algorithm, "arena initialised");

        Ok(Self {
            arena,
            blocks,
            algorithm: config.algorithm,
            cursor,
            counters: Counters::default(),
        })
    }

    /// Release everything this allocator holds, then initialise afresh.
    ///
    /// The old arena is dropped before the new one is requested, so peak
    /// memory never holds both.
    pub fn reinit(self, config: AllocatorConfig) -> Result<Self, InitError> {
        debug!(
            old_arena_size = self.arena.len(),
            old_blocks = self.blocks.len(),
            "re-initialising arena"
        );
        drop(self);
        Self::init(config)
    }

    /// Release the arena and every block descriptor.
    pub fn teardown(self) {
        debug!(
            arena_size = self.arena.len(),
            blocks = self.blocks.len(),
            "arena torn down"
        );
    }

    /// The placement policy fixed at init.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Arena size in bytes, after alignment.
    pub fn arena_size(&self) -> usize {
        self.arena.len()
    }

    /// Reserve `requested` bytes and return the offset of the block.
    ///
    /// The request is rounded up to [`ALIGNMENT`](fitsim_core::ALIGNMENT);
    /// a zero-byte request reserves one granule so that every live
    /// allocation has its own offset. The chosen FREE block is marked USED
    /// and, if larger than needed, split so that the remainder stays FREE
    /// directly after it.
    ///
    /// Returns [`AllocError::Exhausted`] when no FREE block is large
    /// enough; the block list is not touched in that case.
    pub fn allocate(&mut self, requested: usize) -> Result<ArenaOffset, AllocError> {
        let Some(size) = align_up(requested.max(1)) else {
            return Err(self.exhausted(requested));
        };
        let Some(id) = placement::find_fit(&self.blocks, self.algorithm, size, self.cursor) else {
            return Err(self.exhausted(requested));
        };

        let block = self.blocks.get_mut(id);
        block.state = BlockState::Used;
        let offset = block.offset;
        let split = block.size > size;
        if split {
            self.blocks.split_off(id, size);
        }
        if self.algorithm.updates_cursor() {
            self.cursor = id;
        }
        self.counters.allocations += 1;

        trace!(requested, aligned = size, offset, split, "allocated");
        Ok(ArenaOffset(offset))
    }

    /// Release the block starting at `offset` and coalesce FREE neighbours.
    ///
    /// Freeing a block that is already FREE logs a warning and changes
    /// nothing. Freeing an offset that starts no block is ignored.
    pub fn free(&mut self, offset: ArenaOffset) -> FreeOutcome {
        let outcome = match self.blocks.find_by_offset(offset.0) {
            Some(id) => {
                let block = self.blocks.get_mut(id);
                match block.state {
                    BlockState::Used => {
                        block.state = BlockState::Free;
                        self.counters.frees += 1;
                        FreeOutcome::Released
                    }
                    BlockState::Free => {
                        warn!(%offset, "double free detected");
                        self.counters.double_frees += 1;
                        FreeOutcome::DoubleFree
                    }
                }
            }
            None => {
                self.counters.unknown_frees += 1;
                FreeOutcome::Unknown
            }
        };

        let merged = self.coalesce();
        trace!(%offset, ?outcome, merged, "freed");
        outcome
    }

    /// Merge every maximal run of adjacent FREE blocks into its first block,
    /// in one pass over the list. Returns the number of descriptors removed.
    fn coalesce(&mut self) -> usize {
        let mut merged = 0;
        let mut current = Some(self.blocks.head());
        while let Some(id) = current {
            if self.blocks.get(id).state.is_free() {
                while let Some(next) = self.blocks.next(id) {
                    if !self.blocks.get(next).state.is_free() {
                        break;
                    }
                    self.blocks.absorb_next(id);
                    if self.cursor == next {
                        self.cursor = id;
                    }
                    merged += 1;
                }
            }
            current = self.blocks.next(id);
        }
        self.counters.merges += merged as u64;
        merged
    }

    fn exhausted(&mut self, requested: usize) -> AllocError {
        self.counters.failed_allocations += 1;
        let largest_free = self.largest_free();
        debug!(requested, largest_free, "allocation failed: arena exhausted");
        AllocError::Exhausted {
            requested,
            largest_free,
        }
    }

    fn largest_free(&self) -> usize {
        self.blocks
            .iter()
            .filter(|(_, block)| block.state.is_free())
            .map(|(_, block)| block.size)
            .max()
            .unwrap_or(0)
    }

    /// Number of block descriptors in the list, FREE and USED.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Iterate the block list in offset order.
    pub fn blocks(&self) -> impl DoubleEndedIterator<Item = BlockInfo> + ExactSizeIterator + '_ {
        self.blocks.iter().map(|(_, block)| BlockInfo::from(block))
    }

    /// Offset of the block the next-fit cursor names.
    pub fn cursor_offset(&self) -> ArenaOffset {
        ArenaOffset(self.blocks.get(self.cursor).offset)
    }

    /// Bytes of the USED block starting at `offset`.
    ///
    /// Returns `None` if no block starts there or the block is FREE.
    pub fn bytes(&self, offset: ArenaOffset) -> Option<&[u8]> {
        let id = self.blocks.find_by_offset(offset.0)?;
        let block = self.blocks.get(id);
        if block.state.is_free() {
            return None;
        }
        Some(&self.arena[block.offset..block.offset + block.size])
    }

    /// Mutable bytes of the USED block starting at `offset`.
    ///
    /// Returns `None` if no block starts there or the block is FREE.
    pub fn bytes_mut(&mut self, offset: ArenaOffset) -> Option<&mut [u8]> {
        let id = self.blocks.find_by_offset(offset.0)?;
        let block = self.blocks.get(id);
        if block.state.is_free() {
            return None;
        }
        let range = block.offset..block.offset + block.size;
        Some(&mut self.arena[range])
    }

    /// Summarise the block list and lifetime counters.
    pub fn stats(&self) -> ArenaStats {
        let mut stats = ArenaStats {
            arena_size: self.arena.len(),
            used_bytes: 0,
            free_bytes: 0,
            used_blocks: 0,
            free_blocks: 0,
            largest_free: 0,
            descriptor_slots: self.blocks.slot_count(),
            allocations: self.counters.allocations,
            failed_allocations: self.counters.failed_allocations,
            frees: self.counters.frees,
            double_frees: self.counters.double_frees,
            unknown_frees: self.counters.unknown_frees,
            merges: self.counters.merges,
        };
        for (_, block) in self.blocks.iter() {
            match block.state {
                BlockState::Free => {
                    stats.free_bytes += block.size;
                    stats.free_blocks += 1;
                    stats.largest_free = stats.largest_free.max(block.size);
                }
                BlockState::Used => {
                    stats.used_bytes += block.size;
                    stats.used_blocks += 1;
                }
            }
        }
        stats
    }
}

impl std::fmt::Debug for ArenaAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArenaAllocator")
            .field("arena_size", &self.arena.len())
            .field("algorithm", &self.algorithm)
            .field("blocks", &self.blocks().collect::<Vec<_>>())
            .field("cursor", &self.cursor_offset())
            .finish()
    }
}
