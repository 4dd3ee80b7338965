//! NEON kernels for 16-byte batches.
//!
//! One `uint8x16_t` per batch. `vextq_u8` against a zero register is the
//! lane shift, `vqtbl1q_u8` is the gather: any index of 16 or more reads
//! as zero, so the 0xFF sentinel needs no special handling.
//!
//! NEON is mandatory on aarch64; the `unsafe` only covers the raw loads
//! and stores.

use std::arch::aarch64::*;

use crate::prune::network::{BITONIC_16, Network};
use crate::prune::predicate::BLANK_MAX;

const IOTA: [u8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

#[inline]
#[target_feature(enable = "neon")]
unsafe fn iota() -> uint8x16_t {
    unsafe { vld1q_u8(IOTA.as_ptr()) }
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn blank_mask(v: uint8x16_t) -> uint8x16_t {
    unsafe { vcleq_u8(v, vdupq_n_u8(BLANK_MAX)) }
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn count_set(mask: uint8x16_t) -> usize {
    unsafe { vaddvq_u8(vandq_u8(mask, vdupq_n_u8(1))) as usize }
}

/// `!a & b`, matching `_mm_andnot_si128` and `Lanes::andnot`.
#[inline]
#[target_feature(enable = "neon")]
unsafe fn andnot(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
    unsafe { vbicq_u8(b, a) }
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn prefix_sum(mut x: uint8x16_t) -> uint8x16_t {
    unsafe {
        let zero = vdupq_n_u8(0);
        x = vaddq_u8(x, vextq_u8::<15>(zero, x));
        x = vaddq_u8(x, vextq_u8::<14>(zero, x));
        x = vaddq_u8(x, vextq_u8::<12>(zero, x));
        vaddq_u8(x, vextq_u8::<8>(zero, x))
    }
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn suffix_sum(mut x: uint8x16_t) -> uint8x16_t {
    unsafe {
        let zero = vdupq_n_u8(0);
        x = vaddq_u8(x, vextq_u8::<1>(x, zero));
        x = vaddq_u8(x, vextq_u8::<2>(x, zero));
        x = vaddq_u8(x, vextq_u8::<4>(x, zero));
        vaddq_u8(x, vextq_u8::<8>(x, zero))
    }
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn suffix_max(mut x: uint8x16_t) -> uint8x16_t {
    unsafe {
        let zero = vdupq_n_u8(0);
        x = vmaxq_u8(x, vextq_u8::<1>(x, zero));
        x = vmaxq_u8(x, vextq_u8::<2>(x, zero));
        x = vmaxq_u8(x, vextq_u8::<4>(x, zero));
        vmaxq_u8(x, vextq_u8::<8>(x, zero))
    }
}

/// One routing step: lanes whose shift has bit `S` move down `S` lanes.
#[inline]
#[target_feature(enable = "neon")]
unsafe fn route<const S: i32>(tag: uint8x16_t, shift: uint8x16_t) -> (uint8x16_t, uint8x16_t) {
    unsafe {
        let zero = vdupq_n_u8(0);
        let moving = vtstq_u8(shift, vdupq_n_u8(S as u8));
        let tag = vorrq_u8(
            andnot(moving, tag),
            vextq_u8::<S>(vandq_u8(moving, tag), zero),
        );
        let shift = vorrq_u8(
            andnot(moving, shift),
            vextq_u8::<S>(vandq_u8(moving, shift), zero),
        );
        (tag, shift)
    }
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn compaction_index(blank: uint8x16_t) -> (uint8x16_t, usize) {
    unsafe {
        let one = vdupq_n_u8(1);
        let keep = vmvnq_u8(blank);
        let prefix = prefix_sum(vandq_u8(blank, one));
        let shift = vandq_u8(prefix, keep);
        let tag = vandq_u8(vaddq_u8(iota(), one), keep);

        let (tag, shift) = route::<1>(tag, shift);
        let (tag, shift) = route::<2>(tag, shift);
        let (tag, shift) = route::<4>(tag, shift);
        let (tag, _) = route::<8>(tag, shift);

        (vsubq_u8(tag, one), count_set(blank))
    }
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn run_fill_index(blank: uint8x16_t) -> (uint8x16_t, usize) {
    unsafe {
        let keep = vmvnq_u8(blank);
        let sum = suffix_sum(vandq_u8(blank, vdupq_n_u8(1)));
        let beyond = suffix_max(vandq_u8(sum, keep));
        let index = vaddq_u8(iota(), vsubq_u8(sum, beyond));
        let capped = vcgtq_u8(index, vdupq_n_u8(15));
        (vorrq_u8(index, capped), count_set(capped))
    }
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn partition_index(blank: uint8x16_t, network: &Network<'_>) -> uint8x16_t {
    unsafe {
        debug_assert_eq!(network.width, 16);
        let mut keys = vorrq_u8(vandq_u8(blank, vdupq_n_u8(16)), iota());
        for stage in network.stages {
            let a = vqtbl1q_u8(keys, vld1q_u8(stage.lo.as_ptr()));
            let b = vqtbl1q_u8(keys, vld1q_u8(stage.hi.as_ptr()));
            keys = vcombine_u8(vget_low_u8(vminq_u8(a, b)), vget_low_u8(vmaxq_u8(a, b)));
        }
        keys = vqtbl1q_u8(keys, vld1q_u8(network.deshuffle.as_ptr()));
        vandq_u8(keys, vdupq_n_u8(15))
    }
}

/// Compact one batch. Returns `16 - blanks`.
#[target_feature(enable = "neon")]
pub unsafe fn prune_naive(input: &[u8; 16], out: &mut [u8; 16]) -> usize {
    unsafe {
        let v = vld1q_u8(input.as_ptr());
        let (index, blanks) = compaction_index(blank_mask(v));
        vst1q_u8(out.as_mut_ptr(), vqtbl1q_u8(v, index));
        16 - blanks
    }
}

/// Compact two batches into one run; the second store lands at the first
/// batch's valid length.
#[target_feature(enable = "neon")]
pub unsafe fn prune_naive_double(input: &[u8; 32], out: &mut [u8; 32]) -> usize {
    unsafe {
        let v0 = vld1q_u8(input.as_ptr());
        let v1 = vld1q_u8(input.as_ptr().add(16));
        let (index0, blanks0) = compaction_index(blank_mask(v0));
        let (index1, blanks1) = compaction_index(blank_mask(v1));
        let len0 = 16 - blanks0;

        vst1q_u8(out.as_mut_ptr(), vqtbl1q_u8(v0, index0));
        vst1q_u8(out.as_mut_ptr().add(len0), vqtbl1q_u8(v1, index1));
        len0 + 16 - blanks1
    }
}

/// Fill interior blank runs, drop the trailing one.
#[target_feature(enable = "neon")]
pub unsafe fn prune_semi(input: &[u8; 16], out: &mut [u8; 16]) -> usize {
    unsafe {
        let v = vld1q_u8(input.as_ptr());
        let (index, capped) = run_fill_index(blank_mask(v));
        vst1q_u8(out.as_mut_ptr(), vqtbl1q_u8(v, index));
        16 - capped
    }
}

/// Stable partition through the 16-lane bitonic network.
#[target_feature(enable = "neon")]
pub unsafe fn prune_full(input: &[u8; 16], out: &mut [u8; 16]) -> usize {
    unsafe {
        let v = vld1q_u8(input.as_ptr());
        let blank = blank_mask(v);
        let index = partition_index(blank, &BITONIC_16);
        vst1q_u8(out.as_mut_ptr(), vqtbl1q_u8(v, index));
        16 - count_set(blank)
    }
}
