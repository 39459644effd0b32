//! Free-list arena allocator for the fitsim placement-policy simulator.
//!
//! One [`ArenaAllocator`] owns a single pre-allocated byte arena and a
//! list of block descriptors partitioning it into FREE and USED runs.
//! Requests are served by one of four placement policies; frees merge
//! adjacent FREE runs. Nothing here calls the system allocator per
//! request.
//!
//! # Architecture
//!
//! ```text
//! ArenaAllocator
//! ├── Vec<u8>              (the arena, allocated once at init)
//! ├── BlockTable           (slab of descriptors, linked by BlockId in offset order)
//! │   └── free slots       (unlinked descriptors, recycled by the next split)
//! ├── placement::find_fit  (first / next / best / worst fit searches)
//! ├── cursor               (next-fit resume point)
//! └── Counters             (lifetime totals surfaced through ArenaStats)
//! ```
//!
//! # Invariants
//!
//! - **Coverage:** blocks are contiguous from offset 0 and their sizes sum
//!   to the arena size.
//! - **Alignment:** every block size and offset is a multiple of 4.
//! - **Coalesced:** no two FREE blocks are adjacent once any operation
//!   returns.
//!
//! The allocator is single-threaded: every mutating call takes `&mut self`
//! and none of them block.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
mod block;
pub mod config;
pub mod error;
mod placement;
pub mod stats;

// Public re-exports for the primary API surface.
pub use allocator::{ArenaAllocator, FreeOutcome};
pub use block::BlockInfo;
pub use config::AllocatorConfig;
pub use error::{AllocError, InitError};
pub use stats::ArenaStats;
