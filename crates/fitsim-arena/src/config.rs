//! Allocator configuration parameters.

use fitsim_core::{align_up, Algorithm};

/// Configuration for an [`ArenaAllocator`](crate::ArenaAllocator).
///
/// Validated by [`ArenaAllocator::init`](crate::ArenaAllocator::init);
/// both values are immutable for the allocator's lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocatorConfig {
    /// Requested arena size in bytes. Rounded up to the 4-byte
    /// granularity at init. Must be non-zero.
    pub arena_size: usize,

    /// Placement policy used by every allocation.
    pub algorithm: Algorithm,
}

impl AllocatorConfig {
    /// Default arena size: 64KB.
    pub const DEFAULT_ARENA_SIZE: usize = 64 * 1024;

    /// Default placement policy.
    pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::FirstFit;

    /// Create a config for the given size and policy.
    pub fn new(arena_size: usize, algorithm: Algorithm) -> Self {
        Self {
            arena_size,
            algorithm,
        }
    }

    /// The arena size after rounding, or `None` if rounding overflows.
    pub fn aligned_size(&self) -> Option<usize> {
        align_up(self.arena_size)
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ARENA_SIZE, Self::DEFAULT_ALGORITHM)
    }
}
