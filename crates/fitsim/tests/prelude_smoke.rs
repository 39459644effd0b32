//! The prelude alone is enough to drive a full session.

use fitsim::prelude::*;

#[test]
fn policy_parsed_from_name_drives_allocator() {
    let algorithm: Algorithm = "worst-fit".parse().unwrap();
    let mut alloc = ArenaAllocator::init(AllocatorConfig::new(256, algorithm)).unwrap();
    assert_eq!(alloc.algorithm(), Algorithm::WorstFit);

    let offsets: Vec<ArenaOffset> = (0..4).map(|_| alloc.allocate(16).unwrap()).collect();
    assert_eq!(offsets[3], ArenaOffset(48));

    let err = alloc.allocate(512).unwrap_err();
    assert!(matches!(err, AllocError::Exhausted { requested: 512, .. }));

    for offset in offsets {
        assert_eq!(alloc.free(offset), FreeOutcome::Released);
    }
    let blocks: Vec<BlockInfo> = alloc.blocks().collect();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].state, BlockState::Free);
    assert_eq!(blocks[0].size, 256);
    alloc.teardown();
}

#[test]
fn init_errors_are_reachable_through_the_facade() {
    let err = ArenaAllocator::init(AllocatorConfig::new(0, Algorithm::FirstFit)).unwrap_err();
    assert_eq!(err, InitError::ZeroSize);
    let stats: ArenaStats = ArenaAllocator::init(AllocatorConfig::default())
        .unwrap()
        .stats();
    assert_eq!(stats.free_blocks, 1);
}
