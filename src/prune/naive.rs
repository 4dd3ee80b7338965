//! Prefix-sum compaction of a single batch.

use super::lanes::Lanes;
use super::permute::compaction_index;
use super::predicate::blank_mask;
use super::{LaneCount, SupportedLaneCount};

/// Move the non-blanks of one batch to the front of `out`.
///
/// Returns `W - blanks`. Lanes past the returned length are zero.
#[inline]
pub fn prune_naive<const W: usize>(input: &[u8; W], out: &mut [u8; W]) -> usize
where
    LaneCount<W>: SupportedLaneCount,
{
    let v = Lanes::load(input);
    let (index, blanks) = compaction_index(blank_mask(v));
    v.gather(index).store(out);
    W - blanks
}
