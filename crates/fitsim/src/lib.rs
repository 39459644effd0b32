//! Fitsim: a free-list memory allocator simulator.
//!
//! This is the top-level facade crate that re-exports the public API from the
//! fitsim sub-crates. For most users, adding `fitsim` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use fitsim::prelude::*;
//!
//! let config = AllocatorConfig::new(1024, Algorithm::BestFit);
//! let mut alloc = ArenaAllocator::init(config).unwrap();
//!
//! let a = alloc.allocate(100).unwrap();
//! let b = alloc.allocate(13).unwrap();
//! assert_eq!(a, ArenaOffset(0));
//! assert_eq!(b, ArenaOffset(100));
//! assert_eq!(alloc.block_count(), 3);
//!
//! assert_eq!(alloc.free(a), FreeOutcome::Released);
//! assert_eq!(alloc.free(b), FreeOutcome::Released);
//! assert_eq!(alloc.block_count(), 1);
//!
//! alloc.teardown();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `fitsim-arena` | The allocator, block views, config, stats, errors |
//! | [`types`] | `fitsim-core` | Offsets, `Algorithm`, `BlockState`, alignment helpers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// The simulated arena and its block list (`fitsim-arena`).
///
/// Most users only need [`arena::ArenaAllocator`] and
/// [`arena::AllocatorConfig`], both also in the [`prelude`].
pub use fitsim_arena as arena;

/// Shared vocabulary types (`fitsim-core`).
///
/// Contains [`types::ArenaOffset`], the [`types::Algorithm`] policy enum,
/// and the 4-byte alignment helpers.
pub use fitsim_core as types;

/// Common imports for typical fitsim usage.
///
/// ```rust
/// use fitsim::prelude::*;
/// ```
pub mod prelude {
    // Allocator
    pub use fitsim_arena::{AllocatorConfig, ArenaAllocator, ArenaStats, BlockInfo, FreeOutcome};

    // Errors
    pub use fitsim_arena::{AllocError, InitError};

    // Core types
    pub use fitsim_core::{Algorithm, ArenaOffset, BlockState};
}
