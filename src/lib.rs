//! Branch-free pruning of blank bytes from fixed-width ASCII batches.
//!
//! A byte is blank when it is `<= 0x20` (space and the control
//! characters). Every variant works on a 16- or 32-byte batch with
//! data-parallel permutes instead of a per-byte loop:
//!
//! - `scalar`: the sequential reference loop
//! - `naive-single`: prefix-sum compaction of one batch
//! - `naive-double`: two batches joined at the first one's length
//! - `semi`: blank runs filled with the next non-blank, trailing run dropped
//! - `full`: stable partition through a bitonic sorting network
//!
//! The portable implementations live in [`prune`] and are generic over the
//! batch width. With the `simd` feature, SSSE3 and NEON kernels cover the
//! 16-lane variants; [`Pruner`] picks one after a single capability check.
//!
//! ```
//! use blank_prune::prune_naive;
//!
//! let mut out = [0u8; 16];
//! let len = prune_naive(b" 1  2  3    45  ", &mut out);
//! assert_eq!(&out[..len], b"12345");
//! ```

pub mod core;
pub mod engine;
pub mod error;
pub mod prelude;
pub mod prune;

#[cfg(feature = "simd")]
pub mod simd;

pub use core::capability::{Capability, Tier, Width};
pub use core::config::{PruneConfig, SampleConfig, Settings, Variant};
pub use engine::{MatrixEntry, PlatformInfo, Pruner, available_capabilities, support_matrix};
pub use error::PruneError;
pub use prune::{
    Network, ValidationReport, compact_batches, count_blanks, is_blank, prune_full, prune_naive,
    prune_scalar, prune_semi,
};

#[cfg(test)]
mod tests;
