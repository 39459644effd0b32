//! Integration test: block-list invariants under seeded workloads,
//! coalescing completeness, and free-path edge cases.

use fitsim_arena::{AllocatorConfig, ArenaAllocator, FreeOutcome};
use fitsim_core::{Algorithm, ArenaOffset, BlockState};
use fitsim_test_utils::{check_layout, replay, Replayer, Workload, WorkloadOp};

fn init(arena_size: usize, algorithm: Algorithm) -> ArenaAllocator {
    ArenaAllocator::init(AllocatorConfig::new(arena_size, algorithm)).unwrap()
}

/// Apply one op at a time so the layout is checked after every step.
#[test]
fn seeded_workloads_keep_the_partition_intact() {
    for algorithm in Algorithm::ALL {
        for seed in 0..8u64 {
            let mut alloc = init(4096, algorithm);
            let mut replayer = Replayer::new();
            let workload = Workload::random(seed, 400, 1..300, 0.45);
            for op in workload.ops {
                replayer.apply(&mut alloc, op);
                if let Err(v) = check_layout(&alloc) {
                    panic!("{algorithm} seed {seed} after {op:?}: {v}");
                }
            }
        }
    }
}

#[test]
fn replay_totals_match_allocator_counters() {
    for algorithm in Algorithm::ALL {
        let mut alloc = init(2048, algorithm);
        let report = replay(&mut alloc, &Workload::random(42, 600, 8..200, 0.4));
        let stats = &report.final_stats;
        assert_eq!(stats.allocations as usize, report.allocated);
        assert_eq!(stats.failed_allocations as usize, report.failed);
        assert_eq!(stats.frees as usize, report.freed);
        assert_eq!(stats.used_blocks, report.live.len());
        assert_eq!(stats.used_bytes + stats.free_bytes, 2048);
    }
}

/// A, B, C USED followed by a FREE tail: 4 blocks. Any free order ends
/// with one block.
#[test]
fn three_neighbours_coalesce_in_any_order() {
    let orders = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    for order in orders {
        let mut alloc = init(256, Algorithm::FirstFit);
        let abc = [
            alloc.allocate(16).unwrap(),
            alloc.allocate(24).unwrap(),
            alloc.allocate(32).unwrap(),
        ];
        assert_eq!(alloc.block_count(), 4);
        for i in order {
            assert_eq!(alloc.free(abc[i]), FreeOutcome::Released);
            check_layout(&alloc).unwrap();
        }
        assert_eq!(alloc.block_count(), 1, "order {order:?}");
        let only = alloc.blocks().next().unwrap();
        assert_eq!(only.size, 256);
        assert_eq!(only.state, BlockState::Free);
    }
}

#[test]
fn double_free_leaves_one_free_descriptor() {
    let mut alloc = init(128, Algorithm::FirstFit);
    let a = alloc.allocate(16).unwrap();
    let b = alloc.allocate(16).unwrap();
    let _c = alloc.allocate(16).unwrap();

    assert_eq!(alloc.free(b), FreeOutcome::Released);
    let count = alloc.block_count();
    assert_eq!(alloc.free(b), FreeOutcome::DoubleFree);
    assert_eq!(alloc.block_count(), count);

    let free_at_b: Vec<_> = alloc
        .blocks()
        .filter(|blk| blk.offset == b)
        .collect();
    assert_eq!(free_at_b.len(), 1);
    assert_eq!(free_at_b[0].state, BlockState::Free);
    assert_eq!(alloc.stats().double_frees, 1);

    // The allocator stays usable.
    assert_eq!(alloc.free(a), FreeOutcome::Released);
    check_layout(&alloc).unwrap();
}

#[test]
fn freeing_a_merged_away_offset_is_unknown() {
    let mut alloc = init(64, Algorithm::FirstFit);
    let a = alloc.allocate(16).unwrap();
    let b = alloc.allocate(16).unwrap();
    alloc.allocate(16).unwrap();
    alloc.free(a);
    alloc.free(b);
    // b's descriptor was folded into a's.
    assert_eq!(alloc.free(b), FreeOutcome::Unknown);
    assert_eq!(alloc.free(ArenaOffset(3)), FreeOutcome::Unknown);
    check_layout(&alloc).unwrap();
}

#[test]
fn checkerboard_shows_external_fragmentation() {
    let mut alloc = init(256, Algorithm::BestFit);
    let report = replay(
        &mut alloc,
        &Workload::checkerboard(16, 16).then(Workload::from_ops(vec![WorkloadOp::Alloc {
            handle: 0,
            size: 17,
        }])),
    );
    let stats = report.final_stats;
    assert_eq!(report.failed, 1);
    assert_eq!(stats.free_bytes, 128);
    assert_eq!(stats.largest_free, 16);
    assert!((stats.external_fragmentation() - 0.875).abs() < 1e-12);
}

#[test]
fn teardown_then_init_again() {
    let mut alloc = init(64, Algorithm::WorstFit);
    alloc.allocate(8).unwrap();
    alloc.teardown();

    let alloc = init(64, Algorithm::WorstFit);
    assert_eq!(alloc.block_count(), 1);
}
