//! Side-by-side placement policy comparison.
//!
//! Replays one seeded workload under each requested policy and prints
//! failure counts and fragmentation.
//!
//! ```text
//! cargo run -p fitsim-bench --example policy_compare -- [seed] [policy...]
//! RUST_LOG=fitsim_arena=debug cargo run -p fitsim-bench --example policy_compare
//! ```

use std::process::ExitCode;

use fitsim_bench::{compare_policies, mixed_size_profile};
use fitsim_core::Algorithm;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        None => 42,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("invalid seed: {e}");
            return ExitCode::from(2);
        }
    };
    let parsed: Result<Vec<Algorithm>, _> = args.map(|s| s.parse()).collect();
    let algorithms = match parsed {
        Ok(list) if list.is_empty() => Algorithm::ALL.to_vec(),
        Ok(list) => list,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    let profile = mixed_size_profile(seed);
    println!(
        "=== fitsim policy comparison: {} ({} ops, {} byte arena, seed {seed}) ===\n",
        profile.name,
        profile.workload.len(),
        profile.arena_size
    );

    let results = match compare_policies(&profile, &algorithms) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("init failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{:<10} {:>8} {:>8} {:>11} {:>10} {:>13} {:>7}",
        "policy", "allocs", "failed", "peak blocks", "free blks", "largest free", "frag"
    );
    for (algorithm, report) in &results {
        let stats = &report.final_stats;
        println!(
            "{:<10} {:>8} {:>8} {:>11} {:>10} {:>13} {:>7.3}",
            algorithm.name(),
            report.allocated,
            report.failed,
            report.peak_blocks,
            stats.free_blocks,
            stats.largest_free,
            stats.external_fragmentation()
        );
    }
    ExitCode::SUCCESS
}
