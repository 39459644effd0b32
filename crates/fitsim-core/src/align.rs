//! The fixed 4-byte alignment granularity.
//!
//! Every block size in the arena is a multiple of [`ALIGNMENT`]. Because
//! blocks are only ever split into two aligned pieces, every block offset
//! is aligned as well.

/// Allocation granularity in bytes.
pub const ALIGNMENT: usize = 4;

/// Round `value` up to the next multiple of [`ALIGNMENT`].
///
/// Returns `None` if the rounded value does not fit in `usize`.
pub const fn align_up(value: usize) -> Option<usize> {
    match value.checked_add(ALIGNMENT - 1) {
        Some(v) => Some(v & !(ALIGNMENT - 1)),
        None => None,
    }
}

/// Whether `value` is a multiple of [`ALIGNMENT`].
pub const fn is_aligned(value: usize) -> bool {
    value % ALIGNMENT == 0
}
