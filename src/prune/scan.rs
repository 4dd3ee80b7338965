//! Log-step (Hillis–Steele) scans over lane vectors.
//!
//! Each scan runs `log2(W)` dependent steps; lanes within a step are
//! independent. Masks from `predicate` hold 0xFF per set lane, so a prefix
//! sum over a raw mask counts downwards; `ones` turns a mask into 0/1 lanes
//! for the callers that want positive counts.

use super::lanes::Lanes;

/// 0xFF lanes to 1, 0x00 lanes stay 0.
#[inline(always)]
pub fn ones<const W: usize>(mask: Lanes<W>) -> Lanes<W> {
    mask.and(Lanes::splat(1))
}

/// Inclusive left-to-right running sum: `out[i] = x[0] + ... + x[i]`.
#[inline]
pub fn prefix_sum<const W: usize>(mut x: Lanes<W>) -> Lanes<W> {
    let mut step = 1;
    while step < W {
        x = x.add(x.shift_up(step));
        step <<= 1;
    }
    x
}

/// Inclusive right-to-left running sum: `out[i] = x[i] + ... + x[W - 1]`.
#[inline]
pub fn suffix_sum<const W: usize>(mut x: Lanes<W>) -> Lanes<W> {
    let mut step = 1;
    while step < W {
        x = x.add(x.shift_down(step));
        step <<= 1;
    }
    x
}

/// Inclusive right-to-left running maximum.
#[inline]
pub fn suffix_max<const W: usize>(mut x: Lanes<W>) -> Lanes<W> {
    let mut step = 1;
    while step < W {
        x = x.max(x.shift_down(step));
        step <<= 1;
    }
    x
}
