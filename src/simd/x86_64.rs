//! SSSE3 kernels for 16-byte batches.
//!
//! One `__m128i` per batch. The index derivations are the ones in
//! `prune::permute`, unrolled for 16 lanes: `pslldq`/`psrldq` are the lane
//! shifts, `pshufb` is the gather. `pshufb` zeroes any lane whose index has
//! the high bit set, which is exactly the 0xFF sentinel left in lanes with
//! no source.
//!
//! All kernels require SSSE3; callers check [`super::has_ssse3`] first.

use std::arch::x86_64::*;

use crate::prune::network::{BITONIC_16, Network};
use crate::prune::predicate::BLANK_MAX;

#[inline]
#[target_feature(enable = "ssse3")]
unsafe fn iota() -> __m128i {
    unsafe { _mm_setr_epi8(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15) }
}

/// 0xFF where `byte <= 0x20`. SSE has no unsigned compare, so
/// `min(x, 0x20) == x` stands in for it.
#[inline]
#[target_feature(enable = "ssse3")]
unsafe fn blank_mask(v: __m128i) -> __m128i {
    unsafe { _mm_cmpeq_epi8(_mm_min_epu8(v, _mm_set1_epi8(BLANK_MAX as i8)), v) }
}

#[inline]
#[target_feature(enable = "ssse3")]
unsafe fn count_set(mask: __m128i) -> usize {
    unsafe { _mm_movemask_epi8(mask).count_ones() as usize }
}

#[inline]
#[target_feature(enable = "ssse3")]
unsafe fn prefix_sum(mut x: __m128i) -> __m128i {
    unsafe {
        x = _mm_add_epi8(x, _mm_slli_si128::<1>(x));
        x = _mm_add_epi8(x, _mm_slli_si128::<2>(x));
        x = _mm_add_epi8(x, _mm_slli_si128::<4>(x));
        _mm_add_epi8(x, _mm_slli_si128::<8>(x))
    }
}

#[inline]
#[target_feature(enable = "ssse3")]
unsafe fn suffix_sum(mut x: __m128i) -> __m128i {
    unsafe {
        x = _mm_add_epi8(x, _mm_srli_si128::<1>(x));
        x = _mm_add_epi8(x, _mm_srli_si128::<2>(x));
        x = _mm_add_epi8(x, _mm_srli_si128::<4>(x));
        _mm_add_epi8(x, _mm_srli_si128::<8>(x))
    }
}

#[inline]
#[target_feature(enable = "ssse3")]
unsafe fn suffix_max(mut x: __m128i) -> __m128i {
    unsafe {
        x = _mm_max_epu8(x, _mm_srli_si128::<1>(x));
        x = _mm_max_epu8(x, _mm_srli_si128::<2>(x));
        x = _mm_max_epu8(x, _mm_srli_si128::<4>(x));
        _mm_max_epu8(x, _mm_srli_si128::<8>(x))
    }
}

/// One routing step: lanes whose shift has bit `S` move down `S` lanes.
#[inline]
#[target_feature(enable = "ssse3")]
unsafe fn route<const S: i32>(tag: __m128i, shift: __m128i) -> (__m128i, __m128i) {
    unsafe {
        let bit = _mm_set1_epi8(S as i8);
        let moving = _mm_cmpeq_epi8(_mm_and_si128(shift, bit), bit);
        let tag = _mm_or_si128(
            _mm_andnot_si128(moving, tag),
            _mm_srli_si128::<S>(_mm_and_si128(moving, tag)),
        );
        let shift = _mm_or_si128(
            _mm_andnot_si128(moving, shift),
            _mm_srli_si128::<S>(_mm_and_si128(moving, shift)),
        );
        (tag, shift)
    }
}

/// Gather index for compaction, plus the blank count.
#[inline]
#[target_feature(enable = "ssse3")]
unsafe fn compaction_index(blank: __m128i) -> (__m128i, usize) {
    unsafe {
        let keep = _mm_andnot_si128(blank, _mm_set1_epi8(-1));
        let prefix = prefix_sum(_mm_and_si128(blank, _mm_set1_epi8(1)));
        let shift = _mm_and_si128(prefix, keep);
        let tag = _mm_and_si128(_mm_add_epi8(iota(), _mm_set1_epi8(1)), keep);

        let (tag, shift) = route::<1>(tag, shift);
        let (tag, shift) = route::<2>(tag, shift);
        let (tag, shift) = route::<4>(tag, shift);
        let (tag, _) = route::<8>(tag, shift);

        (_mm_sub_epi8(tag, _mm_set1_epi8(1)), count_set(blank))
    }
}

/// Gather index that fills blank runs, plus the capped-lane count.
#[inline]
#[target_feature(enable = "ssse3")]
unsafe fn run_fill_index(blank: __m128i) -> (__m128i, usize) {
    unsafe {
        let keep = _mm_andnot_si128(blank, _mm_set1_epi8(-1));
        let sum = suffix_sum(_mm_and_si128(blank, _mm_set1_epi8(1)));
        let beyond = suffix_max(_mm_and_si128(sum, keep));
        let index = _mm_add_epi8(iota(), _mm_sub_epi8(sum, beyond));

        // index <= 16, so the signed compare is exact
        let capped = _mm_cmpgt_epi8(index, _mm_set1_epi8(15));
        (_mm_or_si128(index, capped), count_set(capped))
    }
}

/// Gather index that partitions non-blanks before blanks.
#[inline]
#[target_feature(enable = "ssse3")]
unsafe fn partition_index(blank: __m128i, network: &Network<'_>) -> __m128i {
    unsafe {
        debug_assert_eq!(network.width, 16);
        let mut keys = _mm_or_si128(_mm_and_si128(blank, _mm_set1_epi8(16)), iota());
        for stage in network.stages {
            let a = _mm_shuffle_epi8(keys, _mm_loadu_si128(stage.lo.as_ptr().cast()));
            let b = _mm_shuffle_epi8(keys, _mm_loadu_si128(stage.hi.as_ptr().cast()));
            keys = _mm_unpacklo_epi64(_mm_min_epu8(a, b), _mm_max_epu8(a, b));
        }
        keys = _mm_shuffle_epi8(keys, _mm_loadu_si128(network.deshuffle.as_ptr().cast()));
        _mm_and_si128(keys, _mm_set1_epi8(15))
    }
}

/// Compact one batch. Returns `16 - blanks`.
#[target_feature(enable = "ssse3")]
pub unsafe fn prune_naive(input: &[u8; 16], out: &mut [u8; 16]) -> usize {
    unsafe {
        let v = _mm_loadu_si128(input.as_ptr().cast());
        let (index, blanks) = compaction_index(blank_mask(v));
        _mm_storeu_si128(out.as_mut_ptr().cast(), _mm_shuffle_epi8(v, index));
        16 - blanks
    }
}

/// Compact two batches into one run.
///
/// Both index derivations are independent; the second store lands at the
/// first batch's valid length and overwrites its zeroed tail.
#[target_feature(enable = "ssse3")]
pub unsafe fn prune_naive_double(input: &[u8; 32], out: &mut [u8; 32]) -> usize {
    unsafe {
        let v0 = _mm_loadu_si128(input.as_ptr().cast());
        let v1 = _mm_loadu_si128(input.as_ptr().add(16).cast());
        let (index0, blanks0) = compaction_index(blank_mask(v0));
        let (index1, blanks1) = compaction_index(blank_mask(v1));
        let len0 = 16 - blanks0;

        _mm_storeu_si128(out.as_mut_ptr().cast(), _mm_shuffle_epi8(v0, index0));
        _mm_storeu_si128(out.as_mut_ptr().add(len0).cast(), _mm_shuffle_epi8(v1, index1));
        len0 + 16 - blanks1
    }
}

/// Fill interior blank runs, drop the trailing one.
#[target_feature(enable = "ssse3")]
pub unsafe fn prune_semi(input: &[u8; 16], out: &mut [u8; 16]) -> usize {
    unsafe {
        let v = _mm_loadu_si128(input.as_ptr().cast());
        let (index, capped) = run_fill_index(blank_mask(v));
        _mm_storeu_si128(out.as_mut_ptr().cast(), _mm_shuffle_epi8(v, index));
        16 - capped
    }
}

/// Stable partition through the 16-lane bitonic network.
#[target_feature(enable = "ssse3")]
pub unsafe fn prune_full(input: &[u8; 16], out: &mut [u8; 16]) -> usize {
    unsafe {
        let v = _mm_loadu_si128(input.as_ptr().cast());
        let blank = blank_mask(v);
        let index = partition_index(blank, &BITONIC_16);
        _mm_storeu_si128(out.as_mut_ptr().cast(), _mm_shuffle_epi8(v, index));
        16 - count_set(blank)
    }
}
