//! Block-list invariant checks and layout fixtures.

use std::fmt;

use fitsim_arena::{ArenaAllocator, BlockInfo};
use fitsim_core::{is_aligned, ArenaOffset, BlockState};

/// A broken block-list invariant, with the offending block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutViolation {
    /// The list is empty.
    Empty,
    /// A block does not start where its predecessor ends (or the head
    /// does not start at 0).
    Discontiguous { expected: usize, block: BlockInfo },
    /// A block has zero size.
    EmptyBlock { block: BlockInfo },
    /// A block's offset or size is not a multiple of the granularity.
    Misaligned { block: BlockInfo },
    /// Two FREE blocks are neighbours.
    UncoalescedFree { first: BlockInfo, second: BlockInfo },
    /// Block sizes do not add up to the arena size.
    Coverage { covered: usize, arena_size: usize },
    /// Walking `prev` links from the tail disagrees with `next` links
    /// from the head.
    BackLinks,
    /// `block_count()` disagrees with the number of blocks walked.
    CountMismatch { walked: usize, reported: usize },
}

impl fmt::Display for LayoutViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "block list is empty"),
            Self::Discontiguous { expected, block } => {
                write!(f, "expected block at {expected}, found {block:?}")
            }
            Self::EmptyBlock { block } => write!(f, "zero-sized block {block:?}"),
            Self::Misaligned { block } => write!(f, "misaligned block {block:?}"),
            Self::UncoalescedFree { first, second } => {
                write!(f, "adjacent FREE blocks {first:?} and {second:?}")
            }
            Self::Coverage {
                covered,
                arena_size,
            } => write!(f, "blocks cover {covered} of {arena_size} bytes"),
            Self::BackLinks => write!(f, "reverse traversal disagrees with forward"),
            Self::CountMismatch { walked, reported } => {
                write!(f, "walked {walked} blocks but block_count() is {reported}")
            }
        }
    }
}

impl std::error::Error for LayoutViolation {}

/// Verify every block-list invariant of `alloc`.
///
/// Checks coverage, alignment, contiguity from offset 0, non-empty
/// blocks, complete coalescing, back links, and the reported count.
pub fn check_layout(alloc: &ArenaAllocator) -> Result<(), LayoutViolation> {
    let forward: Vec<BlockInfo> = alloc.blocks().collect();
    if forward.is_empty() {
        return Err(LayoutViolation::Empty);
    }

    let mut expected = 0;
    let mut prev: Option<BlockInfo> = None;
    for &block in &forward {
        if block.offset.0 != expected {
            return Err(LayoutViolation::Discontiguous { expected, block });
        }
        if block.size == 0 {
            return Err(LayoutViolation::EmptyBlock { block });
        }
        if !is_aligned(block.offset.0) || !is_aligned(block.size) {
            return Err(LayoutViolation::Misaligned { block });
        }
        if let Some(p) = prev {
            if p.state.is_free() && block.state.is_free() {
                return Err(LayoutViolation::UncoalescedFree {
                    first: p,
                    second: block,
                });
            }
        }
        expected = block.end();
        prev = Some(block);
    }
    if expected != alloc.arena_size() {
        return Err(LayoutViolation::Coverage {
            covered: expected,
            arena_size: alloc.arena_size(),
        });
    }

    let mut backward: Vec<BlockInfo> = alloc.blocks().rev().collect();
    backward.reverse();
    if backward != forward {
        return Err(LayoutViolation::BackLinks);
    }
    if forward.len() != alloc.block_count() {
        return Err(LayoutViolation::CountMismatch {
            walked: forward.len(),
            reported: alloc.block_count(),
        });
    }
    Ok(())
}

/// Carve a fresh allocator into the given `(size, state)` runs.
///
/// Every size is allocated in order, then the runs marked FREE are freed.
/// Adjacent FREE runs coalesce, so separate them with a USED run to keep
/// them distinct. Returns the offset of every run.
///
/// # Panics
///
/// Panics if `alloc` already has live allocations or the runs do not fit.
pub fn carve(alloc: &mut ArenaAllocator, runs: &[(usize, BlockState)]) -> Vec<ArenaOffset> {
    assert_eq!(alloc.block_count(), 1, "carve needs a fresh allocator");
    let offsets: Vec<ArenaOffset> = runs
        .iter()
        .map(|&(size, _)| {
            alloc
                .allocate(size)
                .unwrap_or_else(|e| panic!("carving {size} bytes: {e}"))
        })
        .collect();
    for (offset, &(_, state)) in offsets.iter().zip(runs) {
        if state.is_free() {
            alloc.free(*offset);
        }
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitsim_arena::AllocatorConfig;
    use fitsim_core::Algorithm;

    #[test]
    fn fresh_allocator_passes() {
        let alloc = ArenaAllocator::init(AllocatorConfig::new(64, Algorithm::FirstFit)).unwrap();
        assert_eq!(check_layout(&alloc), Ok(()));
    }

    #[test]
    fn carve_produces_requested_runs() {
        let mut alloc =
            ArenaAllocator::init(AllocatorConfig::new(104, Algorithm::BestFit)).unwrap();
        let offsets = carve(
            &mut alloc,
            &[
                (50, BlockState::Free),
                (4, BlockState::Used),
                (10, BlockState::Free),
                (4, BlockState::Used),
                (30, BlockState::Free),
            ],
        );
        assert_eq!(
            offsets,
            vec![
                ArenaOffset(0),
                ArenaOffset(52),
                ArenaOffset(56),
                ArenaOffset(68),
                ArenaOffset(72),
            ]
        );
        let states: Vec<_> = alloc.blocks().map(|b| (b.size, b.state)).collect();
        assert_eq!(
            states,
            vec![
                (52, BlockState::Free),
                (4, BlockState::Used),
                (12, BlockState::Free),
                (4, BlockState::Used),
                (32, BlockState::Free),
            ]
        );
        assert_eq!(check_layout(&alloc), Ok(()));
    }
}
