//! Stable two-way partition through a sorting network.

use super::lanes::Lanes;
use super::permute::partition_keys;
use super::predicate::blank_mask;
use super::scan::ones;
use super::{LaneCount, SupportedLaneCount};

/// Put every non-blank before every blank, keeping order in both groups.
///
/// Unlike the compacting variants, all W output lanes are meaningful: the
/// blanks follow the returned length in their original order.
#[inline]
pub fn prune_full<const W: usize>(input: &[u8; W], out: &mut [u8; W]) -> usize
where
    LaneCount<W>: SupportedLaneCount,
{
    let v = Lanes::load(input);
    let blank = blank_mask(v);

    let sorted = LaneCount::<W>::network().sort_lanes(partition_keys(blank));
    let index = sorted.and(Lanes::splat((W - 1) as u8));
    v.gather(index).store(out);

    W - ones(blank).horizontal_sum() as usize
}
