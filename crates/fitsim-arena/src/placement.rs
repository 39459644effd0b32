//! The four placement searches.
//!
//! Each search only reads the block table. It returns the block that
//! should satisfy an aligned request, or `None` when nothing fits. Marking
//! the block, splitting, and moving the cursor happen in the allocator.

use fitsim_core::Algorithm;

use crate::block::{BlockId, BlockTable};

/// Pick the block that satisfies an aligned request of `size` bytes.
///
/// `cursor` is only read by [`Algorithm::NextFit`].
pub(crate) fn find_fit(
    table: &BlockTable,
    algorithm: Algorithm,
    size: usize,
    cursor: BlockId,
) -> Option<BlockId> {
    match algorithm {
        Algorithm::FirstFit => first_fit(table, size),
        Algorithm::NextFit => next_fit(table, size, cursor),
        Algorithm::BestFit => select_by_leftover(table, size, |candidate, best| candidate < best),
        Algorithm::WorstFit => select_by_leftover(table, size, |candidate, best| candidate > best),
    }
}

fn first_fit(table: &BlockTable, size: usize) -> Option<BlockId> {
    table
        .iter()
        .find(|(_, block)| block.fits(size))
        .map(|(id, _)| id)
}

/// Scan forward from `cursor`, wrapping to the head at the end of the
/// list. Every block is visited at most once.
fn next_fit(table: &BlockTable, size: usize, cursor: BlockId) -> Option<BlockId> {
    let mut id = cursor;
    loop {
        if table.get(id).fits(size) {
            return Some(id);
        }
        id = table.next(id).unwrap_or_else(|| table.head());
        if id == cursor {
            return None;
        }
    }
}

/// Full scan keeping the fitting block whose leftover wins under
/// `better(candidate, current_best)`. A strict comparison keeps the
/// earliest block on ties.
fn select_by_leftover(
    table: &BlockTable,
    size: usize,
    better: impl Fn(usize, usize) -> bool,
) -> Option<BlockId> {
    let mut winner: Option<(BlockId, usize)> = None;
    for (id, block) in table.iter() {
        if !block.fits(size) {
            continue;
        }
        let leftover = block.size - size;
        match winner {
            Some((_, best)) if !better(leftover, best) => {}
            _ => winner = Some((id, leftover)),
        }
    }
    winner.map(|(id, _)| id)
}
