//! Core types for the fitsim allocator simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the arena and its callers: arena offsets,
//! placement policies, block states, the alignment rule, and the
//! policy-name parse error.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod align;
pub mod error;
pub mod id;
pub mod policy;

pub use align::{align_up, is_aligned, ALIGNMENT};
pub use error::ParseAlgorithmError;
pub use id::ArenaOffset;
pub use policy::{Algorithm, BlockState};
