//! Convenient re-exports for common usage.
//!
//! This module provides a single import for the kernels, the dispatching
//! [`Pruner`] and the capability types it is built from.
//!
//! # Example
//!
//! ```
//! use blank_prune::prelude::*;
//!
//! let pruner = Pruner::new(Variant::Full, Capability::new(Width::W16, Tier::Portable)).unwrap();
//! let mut out = [0u8; 16];
//! let len = pruner.prune(b" bcde fghi jklm ", &mut out).unwrap();
//! assert_eq!(&out[..len], b"bcdefghijklm");
//! ```

pub use crate::{
    // Dispatch
    Capability,
    Pruner,
    PruneError,
    Tier,
    Variant,
    Width,
    available_capabilities,

    // Portable kernels
    compact_batches,
    is_blank,
    prune_full,
    prune_naive,
    prune_scalar,
    prune_semi,

    // Width bounds for the generic kernels
    prune::{LaneCount, SupportedLaneCount},
};
