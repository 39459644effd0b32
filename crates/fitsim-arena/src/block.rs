//! Block descriptors and the offset-ordered descriptor slab.
//!
//! The block list is doubly linked, but links are [`BlockId`] indices into
//! a slab rather than owning pointers. Unlinking a descriptor pushes its
//! slot onto a free-slot list; the next split reuses it.

use fitsim_core::{ArenaOffset, BlockState};

/// Stable index of a descriptor within a [`BlockTable`].
///
/// Only valid while the descriptor is linked. Once a block is merged into
/// its predecessor its slot may be handed to a later split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct BlockId(usize);

/// One contiguous run of the arena.
#[derive(Clone, Debug)]
pub(crate) struct Block {
    pub(crate) offset: usize,
    pub(crate) size: usize,
    pub(crate) state: BlockState,
    prev: Option<BlockId>,
    next: Option<BlockId>,
}

impl Block {
    /// Whether this block can satisfy an aligned request of `size` bytes.
    pub(crate) fn fits(&self, size: usize) -> bool {
        self.state.is_free() && self.size >= size
    }
}

/// Read-only view of a block, as exposed by
/// [`ArenaAllocator::blocks`](crate::ArenaAllocator::blocks).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockInfo {
    /// Offset of the block's first byte.
    pub offset: ArenaOffset,
    /// Length in bytes; always a multiple of the alignment granularity.
    pub size: usize,
    /// FREE or USED.
    pub state: BlockState,
}

impl BlockInfo {
    /// One past the block's last byte.
    pub fn end(&self) -> usize {
        self.offset.0 + self.size
    }
}

impl From<&Block> for BlockInfo {
    fn from(block: &Block) -> Self {
        Self {
            offset: ArenaOffset(block.offset),
            size: block.size,
            state: block.state,
        }
    }
}

/// Slab of block descriptors linked in increasing offset order.
///
/// The head always starts at offset 0 and the sizes of all linked blocks
/// always sum to the arena size.
pub(crate) struct BlockTable {
    /// Descriptor storage. Slots listed in `free_slots` are unlinked.
    slots: Vec<Block>,
    /// Indices of unlinked slots available for reuse.
    free_slots: Vec<usize>,
    head: BlockId,
    tail: BlockId,
    /// Number of linked descriptors.
    len: usize,
}

impl BlockTable {
    /// A table holding a single FREE block spanning `arena_size` bytes.
    pub(crate) fn new(arena_size: usize) -> Self {
        Self {
            slots: vec![Block {
                offset: 0,
                size: arena_size,
                state: BlockState::Free,
                prev: None,
                next: None,
            }],
            free_slots: Vec::new(),
            head: BlockId(0),
            tail: BlockId(0),
            len: 1,
        }
    }

    pub(crate) fn head(&self) -> BlockId {
        self.head
    }

    pub(crate) fn get(&self, id: BlockId) -> &Block {
        &self.slots[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.slots[id.0]
    }

    pub(crate) fn next(&self, id: BlockId) -> Option<BlockId> {
        self.slots[id.0].next
    }

    pub(crate) fn prev(&self, id: BlockId) -> Option<BlockId> {
        self.slots[id.0].prev
    }

    /// Number of linked descriptors.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Number of slots ever created, linked or not.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Find the linked block starting exactly at `offset`.
    pub(crate) fn find_by_offset(&self, offset: usize) -> Option<BlockId> {
        self.iter()
            .find(|(_, block)| block.offset == offset)
            .map(|(id, _)| id)
    }

    /// Shrink `id` to `size` bytes and link a FREE block holding the
    /// remainder directly after it.
    ///
    /// The caller guarantees `0 < size < block.size`.
    pub(crate) fn split_off(&mut self, id: BlockId, size: usize) -> BlockId {
        let (offset, remainder, old_next) = {
            let block = &mut self.slots[id.0];
            debug_assert!(size > 0 && size < block.size);
            let remainder = block.size - size;
            block.size = size;
            (block.offset + size, remainder, block.next)
        };

        let descriptor = Block {
            offset,
            size: remainder,
            state: BlockState::Free,
            prev: Some(id),
            next: old_next,
        };
        let new_id = if let Some(slot) = self.free_slots.pop() {
            self.slots[slot] = descriptor;
            BlockId(slot)
        } else {
            self.slots.push(descriptor);
            BlockId(self.slots.len() - 1)
        };

        self.slots[id.0].next = Some(new_id);
        match old_next {
            Some(next) => self.slots[next.0].prev = Some(new_id),
            None => self.tail = new_id,
        }
        self.len += 1;
        new_id
    }

    /// Merge the successor of `id` into `id` and unlink it.
    ///
    /// Returns the id of the unlinked descriptor, or `None` if `id` is the
    /// tail. States are not inspected; the caller decides what may merge.
    pub(crate) fn absorb_next(&mut self, id: BlockId) -> Option<BlockId> {
        let victim = self.slots[id.0].next?;
        let (victim_size, victim_next) = {
            let v = &self.slots[victim.0];
            (v.size, v.next)
        };

        let block = &mut self.slots[id.0];
        block.size += victim_size;
        block.next = victim_next;
        match victim_next {
            Some(next) => self.slots[next.0].prev = Some(id),
            None => self.tail = id,
        }

        let v = &mut self.slots[victim.0];
        v.prev = None;
        v.next = None;
        self.free_slots.push(victim.0);
        self.len -= 1;
        Some(victim)
    }

    /// Iterate linked blocks in offset order.
    pub(crate) fn iter(&self) -> Iter<'_> {
        Iter {
            table: self,
            front: Some(self.head),
            back: Some(self.tail),
            remaining: self.len,
        }
    }
}

/// Offset-ordered iterator over linked blocks. Walks `next` links from the
/// front and `prev` links from the back.
pub(crate) struct Iter<'a> {
    table: &'a BlockTable,
    front: Option<BlockId>,
    back: Option<BlockId>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (BlockId, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        self.front = self.table.next(id);
        Some((id, self.table.get(id)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        self.back = self.table.prev(id);
        Some((id, self.table.get(id)))
    }
}

impl ExactSizeIterator for Iter<'_> {}
