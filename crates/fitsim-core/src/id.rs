//! Strongly-typed arena offsets.

use std::fmt;

/// Byte offset of a block's first byte within the arena.
///
/// Returned by a successful allocation and handed back on free. An offset
/// is only meaningful to the allocator that produced it, and only until
/// the block it names is freed or the allocator is torn down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArenaOffset(pub usize);

impl ArenaOffset {
    /// The first byte of the arena.
    pub const ZERO: Self = Self(0);

    /// The raw byte offset.
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for ArenaOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<usize> for ArenaOffset {
    fn from(v: usize) -> Self {
        Self(v)
    }
}
