//! Run-aware replacement: fill blank runs instead of removing them.

use super::lanes::Lanes;
use super::permute::run_fill_index;
use super::predicate::blank_mask;
use super::{LaneCount, SupportedLaneCount};

/// Replace each blank run with a copy of the non-blank that follows it.
///
/// A run that reaches the end of the batch has nothing to copy and is
/// truncated: its lanes read as zero and the returned length stops before
/// it. Interior runs keep their length.
#[inline]
pub fn prune_semi<const W: usize>(input: &[u8; W], out: &mut [u8; W]) -> usize
where
    LaneCount<W>: SupportedLaneCount,
{
    let v = Lanes::load(input);
    let (index, capped) = run_fill_index(blank_mask(v));
    v.gather(index).store(out);
    W - capped
}
