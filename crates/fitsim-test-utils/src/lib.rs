//! Test utilities for fitsim development.
//!
//! - [`check_layout`] verifies the block-list invariants of an allocator.
//! - [`carve`] builds a specific FREE/USED layout on a fresh allocator.
//! - [`workload`] generates seeded allocate/free sequences and replays
//!   them against an allocator.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod layout;
pub mod workload;

pub use layout::{carve, check_layout, LayoutViolation};
pub use workload::{replay, ReplayReport, Replayer, Workload, WorkloadOp};
