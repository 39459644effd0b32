//! Allocator error types.

use std::error::Error;
use std::fmt;

/// Errors from [`ArenaAllocator::init`](crate::ArenaAllocator::init).
///
/// An init that fails leaves nothing behind: no arena, no descriptors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitError {
    /// The requested arena size was zero.
    ZeroSize,
    /// Rounding the arena size up to the alignment granularity overflows.
    SizeOverflow {
        /// The size as requested.
        requested: usize,
    },
    /// The backing buffer could not be obtained from the system allocator.
    BackingAllocationFailed {
        /// Number of bytes that were requested.
        bytes: usize,
    },
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "arena size must be non-zero"),
            Self::SizeOverflow { requested } => {
                write!(f, "arena size {requested} overflows when aligned")
            }
            Self::BackingAllocationFailed { bytes } => {
                write!(f, "could not allocate {bytes}-byte backing arena")
            }
        }
    }
}

impl Error for InitError {}

/// Errors from [`ArenaAllocator::allocate`](crate::ArenaAllocator::allocate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// No FREE block is large enough for the request. The block list is
    /// left exactly as it was.
    Exhausted {
        /// Number of bytes requested, before alignment.
        requested: usize,
        /// Size of the largest FREE block at the time of the request.
        largest_free: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted {
                requested,
                largest_free,
            } => {
                write!(
                    f,
                    "arena exhausted: requested {requested} bytes, largest free block {largest_free} bytes"
                )
            }
        }
    }
}

impl Error for AllocError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_sizes() {
        let err = AllocError::Exhausted {
            requested: 100,
            largest_free: 48,
        };
        assert_eq!(
            err.to_string(),
            "arena exhausted: requested 100 bytes, largest free block 48 bytes"
        );
        assert!(InitError::BackingAllocationFailed { bytes: 4096 }
            .to_string()
            .contains("4096"));
    }
}
