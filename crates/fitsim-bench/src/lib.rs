//! Workload profiles and policy comparison for the fitsim simulator.
//!
//! Provides pre-built [`Profile`]s for benchmarking and examples:
//!
//! - [`small_object_profile`]: 64KB arena, 8-64 byte requests, heavy churn
//! - [`mixed_size_profile`]: 256KB arena, 16B-4KB requests
//! - [`large_object_profile`]: 1MB arena, 4-64KB requests, near capacity
//!
//! [`compare_policies`] replays one profile under all four policies.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use fitsim_arena::{AllocatorConfig, ArenaAllocator, InitError};
use fitsim_core::Algorithm;
use fitsim_test_utils::{replay, ReplayReport, Workload};

/// An arena size paired with the workload to run in it.
#[derive(Clone, Debug)]
pub struct Profile {
    /// Short identifier used in benchmark and report names.
    pub name: &'static str,
    /// Arena size in bytes.
    pub arena_size: usize,
    /// Operations to replay.
    pub workload: Workload,
}

/// Many small objects with frequent frees.
pub fn small_object_profile(seed: u64) -> Profile {
    Profile {
        name: "small_object",
        arena_size: 64 * 1024,
        workload: Workload::random(seed, 5_000, 8..64, 0.45),
    }
}

/// A wide spread of request sizes; the profile where policies diverge most.
pub fn mixed_size_profile(seed: u64) -> Profile {
    Profile {
        name: "mixed_size",
        arena_size: 256 * 1024,
        workload: Workload::random(seed, 4_000, 16..4096, 0.4),
    }
}

/// Few large objects in an arena that can only hold a handful at once.
pub fn large_object_profile(seed: u64) -> Profile {
    Profile {
        name: "large_object",
        arena_size: 1024 * 1024,
        workload: Workload::random(seed, 500, 4096..65536, 0.35),
    }
}

/// Replay `profile` on a fresh allocator using `algorithm`.
pub fn run_profile(profile: &Profile, algorithm: Algorithm) -> Result<ReplayReport, InitError> {
    let mut alloc = ArenaAllocator::init(AllocatorConfig::new(profile.arena_size, algorithm))?;
    let report = replay(&mut alloc, &profile.workload);
    alloc.teardown();
    Ok(report)
}

/// Replay `profile` under each of `algorithms`, in order.
pub fn compare_policies(
    profile: &Profile,
    algorithms: &[Algorithm],
) -> Result<Vec<(Algorithm, ReplayReport)>, InitError> {
    algorithms
        .iter()
        .map(|&algorithm| Ok((algorithm, run_profile(profile, algorithm)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_deterministic() {
        assert_eq!(
            small_object_profile(3).workload,
            small_object_profile(3).workload
        );
        assert_ne!(
            mixed_size_profile(3).workload,
            mixed_size_profile(4).workload
        );
    }

    #[test]
    fn comparison_covers_every_policy() {
        let profile = small_object_profile(42);
        let results = compare_policies(&profile, &Algorithm::ALL).unwrap();
        assert_eq!(results.len(), 4);
        for (algorithm, report) in &results {
            assert_eq!(
                report.final_stats.used_bytes + report.final_stats.free_bytes,
                profile.arena_size,
                "{algorithm}"
            );
            assert!(report.allocated > 0, "{algorithm}");
        }
    }

    #[test]
    fn same_policy_same_outcome() {
        let profile = large_object_profile(9);
        let a = run_profile(&profile, Algorithm::NextFit).unwrap();
        let b = run_profile(&profile, Algorithm::NextFit).unwrap();
        assert_eq!(a.allocated, b.allocated);
        assert_eq!(a.failed, b.failed);
        assert_eq!(a.live, b.live);
    }
}
