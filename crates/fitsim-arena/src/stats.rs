//! Occupancy and fragmentation statistics.

use std::fmt;

/// Lifetime operation counters kept by the allocator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Counters {
    pub(crate) allocations: u64,
    pub(crate) failed_allocations: u64,
    pub(crate) frees: u64,
    pub(crate) double_frees: u64,
    pub(crate) unknown_frees: u64,
    pub(crate) merges: u64,
}

/// Point-in-time summary of an allocator's block list and history.
///
/// Produced by [`ArenaAllocator::stats`](crate::ArenaAllocator::stats).
#[derive(Clone, Debug, PartialEq)]
pub struct ArenaStats {
    /// Arena size in bytes (after alignment).
    pub arena_size: usize,
    /// Bytes held by USED blocks.
    pub used_bytes: usize,
    /// Bytes held by FREE blocks.
    pub free_bytes: usize,
    /// Number of USED blocks.
    pub used_blocks: usize,
    /// Number of FREE blocks.
    pub free_blocks: usize,
    /// Size of the largest FREE block, 0 when the arena is full.
    pub largest_free: usize,
    /// Descriptor slots ever created (linked or recycled).
    pub descriptor_slots: usize,
    /// Successful allocations.
    pub allocations: u64,
    /// Allocations that found no fitting block.
    pub failed_allocations: u64,
    /// Frees that released a USED block.
    pub frees: u64,
    /// Frees of a block that was already FREE.
    pub double_frees: u64,
    /// Frees of an offset that starts no block.
    pub unknown_frees: u64,
    /// Descriptors merged away by coalescing.
    pub merges: u64,
}

impl ArenaStats {
    /// Total number of linked blocks.
    pub fn block_count(&self) -> usize {
        self.used_blocks + self.free_blocks
    }

    /// External fragmentation: `1 - largest_free / free_bytes`.
    ///
    /// 0.0 when all free space is one block (or nothing is free); tends
    /// to 1.0 as free space splinters into many small blocks.
    pub fn external_fragmentation(&self) -> f64 {
        if self.free_bytes == 0 {
            return 0.0;
        }
        1.0 - self.largest_free as f64 / self.free_bytes as f64
    }

    /// Fraction of the arena held by USED blocks.
    pub fn utilization(&self) -> f64 {
        if self.arena_size == 0 {
            return 0.0;
        }
        self.used_bytes as f64 / self.arena_size as f64
    }
}

impl fmt::Display for ArenaStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} blocks ({} used / {} free), {}/{} bytes used, largest free {}, fragmentation {:.3}",
            self.block_count(),
            self.used_blocks,
            self.free_blocks,
            self.used_bytes,
            self.arena_size,
            self.largest_free,
            self.external_fragmentation()
        )
    }
}
