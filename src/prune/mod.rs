//! Blank pruning over fixed-width batches.
//!
//! Portable implementations of every variant, generic over the batch
//! width. Each one is a composition of the same building blocks:
//! classify (`predicate`), scan (`scan`), derive a gather index
//! (`permute`, or the sorting `network` for the full partition), gather.

pub mod compositor;
pub mod full;
pub mod lanes;
pub mod layout;
pub mod naive;
pub mod network;
pub mod permute;
pub mod predicate;
pub mod scalar;
pub mod scan;
pub mod semi;

pub use compositor::compact_batches;
pub use full::prune_full;
pub use lanes::Lanes;
pub use naive::prune_naive;
pub use network::{Network, Stage, ValidationReport};
pub use predicate::{count_blanks, is_blank};
pub use scalar::prune_scalar;
pub use semi::prune_semi;

/// Marker for a batch width, in the style of `std::simd::LaneCount`.
pub struct LaneCount<const W: usize>;

/// Batch widths with a baked sorting network.
pub trait SupportedLaneCount: sealed::Sealed {
    fn network() -> &'static Network<'static>;
}

impl SupportedLaneCount for LaneCount<16> {
    fn network() -> &'static Network<'static> {
        &network::BITONIC_16
    }
}

impl SupportedLaneCount for LaneCount<32> {
    fn network() -> &'static Network<'static> {
        &network::BITONIC_32
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::LaneCount<16> {}
    impl Sealed for super::LaneCount<32> {}
}
