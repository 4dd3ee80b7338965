//! Gather-index derivation from blank masks.
//!
//! All three derivations produce an index vector for `Lanes::gather` (or
//! `pshufb` / `tbl`). Lanes without a source hold a value `>= W`, which
//! gathers as 0.

use super::lanes::Lanes;
use super::scan::{ones, prefix_sum, suffix_max, suffix_sum};

/// Index that moves every non-blank to the front, in order.
///
/// Non-blank lane `i` belongs at `i - prefix[i]` (the inclusive blank
/// count equals the exclusive one on a non-blank lane). That is a scatter;
/// it is turned into a gather by routing: each lane carries its source
/// tag (`i + 1`, 0 when empty) and remaining shift, and for each bit `b`
/// of the shift the lanes with that bit set move down `b` lanes. Shifts
/// never decrease along the batch and grow by at most the distance between
/// two survivors, so an arriving tag never lands on a lane that keeps its
/// own and the two halves can be merged with OR.
///
/// Also returns the blank count, read from the last prefix lane.
#[inline]
pub fn compaction_index<const W: usize>(blank: Lanes<W>) -> (Lanes<W>, usize) {
    let keep = blank.andnot(Lanes::splat(0xFF));
    let prefix = prefix_sum(ones(blank));
    let mut shift = prefix.and(keep);
    let mut tag = Lanes::iota().add(Lanes::splat(1)).and(keep);

    let mut step = 1;
    while step < W {
        let bit = Lanes::splat(step as u8);
        let moving = shift.and(bit).cmpeq(bit);

        let arriving_tag = moving.and(tag).shift_down(step);
        let arriving_shift = moving.and(shift).shift_down(step);
        tag = moving.andnot(tag).or(arriving_tag);
        shift = moving.andnot(shift).or(arriving_shift);

        step <<= 1;
    }

    // empty lanes wrap to 0xFF
    (tag.sub(Lanes::splat(1)), prefix.last() as usize)
}

/// Index that fills every blank run with the next non-blank after it.
///
/// Returns the index and the number of capped lanes, which is the length
/// of the trailing blank run. Capping is always applied: a trailing lane's
/// raw index is `W`, and OR-ing it with 0xFF both keeps the gather in the
/// zero-read range on every tier and leaves a countable marker.
#[inline]
pub fn run_fill_index<const W: usize>(blank: Lanes<W>) -> (Lanes<W>, usize) {
    let keep = blank.andnot(Lanes::splat(0xFF));

    // blanks from each lane to the end
    let sum = suffix_sum(ones(blank));

    // blanks from the next non-blank to the end, 0 when none follows
    let beyond = suffix_max(sum.and(keep));

    let run = sum.sub(beyond);
    let index = Lanes::iota().add(run);
    let capped = index.cmpgt(Lanes::splat((W - 1) as u8));

    (index.or(capped), capped.count_set())
}

/// Sort keys for the partition network: `index | W` on blank lanes.
///
/// Ascending order of these keys puts the non-blank indices first and the
/// blank indices after them, both in original order.
#[inline]
pub fn partition_keys<const W: usize>(blank: Lanes<W>) -> Lanes<W> {
    blank.and(Lanes::splat(W as u8)).or(Lanes::iota())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prune::predicate::blank_mask;

    fn index_of(text: &[u8; 16]) -> Lanes<16> {
        compaction_index(blank_mask(Lanes::load(text))).0
    }

    #[test]
    fn test_compaction_index_scattered_blanks() {
        let index = index_of(b" 1  2  3    45  ");
        assert_eq!(index.0[..5], [1, 4, 7, 12, 13]);
        assert!(index.0[5..].iter().all(|&i| i == 0xFF));
    }

    #[test]
    fn test_compaction_index_without_blanks_is_identity() {
        let index = index_of(b"abcdefghijklmnop");
        assert_eq!(index, Lanes::iota());
    }

    #[test]
    fn test_compaction_index_all_blank_is_empty() {
        let (index, blanks) = compaction_index(blank_mask(Lanes::<16>::splat(b' ')));
        assert_eq!(index, Lanes::splat(0xFF));
        assert_eq!(blanks, 16);
    }

    #[test]
    fn test_compaction_index_reports_blank_count() {
        let (_, blanks) = compaction_index(blank_mask(Lanes::<16>::load(b" 1  2  3    45  ")));
        assert_eq!(blanks, 11);
    }

    #[test]
    fn test_compaction_index_single_long_run() {
        let index = index_of(b"ab         cdefg");
        assert_eq!(index.0[..7], [0, 1, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_run_fill_index() {
        let (index, capped) = run_fill_index(blank_mask(Lanes::<16>::load(b"1234 678  9     ")));
        assert_eq!(index.0[..11], [0, 1, 2, 3, 5, 5, 6, 7, 10, 10, 10]);
        assert_eq!(capped, 5);
        assert!(index.0[11..].iter().all(|&i| i == 0xFF));
    }

    #[test]
    fn test_run_fill_index_all_blank_caps_everything() {
        let (index, capped) = run_fill_index(blank_mask(Lanes::<32>::splat(b' ')));
        assert_eq!(capped, 32);
        assert_eq!(index, Lanes::splat(0xFF));
    }

    #[test]
    fn test_partition_keys() {
        let keys = partition_keys(blank_mask(Lanes::<16>::load(b" a b c d e f g h")));
        assert_eq!(keys.0[0], 16);
        assert_eq!(keys.0[1], 1);
        assert_eq!(keys.0[14], 30);
        assert_eq!(keys.0[15], 15);
    }
}
