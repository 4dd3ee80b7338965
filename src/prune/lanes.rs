//! Portable lane vectors.
//!
//! `Lanes<W>` models one W-byte register. Every operation mirrors a single
//! SSE/NEON instruction so the portable variants read like the hardware
//! kernels in `crate::simd`: wrapping byte arithmetic, whole-register lane
//! shifts with zero fill, and a table gather that yields 0 for out-of-range
//! indices (`pshufb` with the high bit set, `tbl` past the table).

use std::array;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lanes<const W: usize>(pub [u8; W]);

impl<const W: usize> Lanes<W> {
    #[inline(always)]
    pub fn splat(value: u8) -> Self {
        Lanes([value; W])
    }

    #[inline(always)]
    pub fn zero() -> Self {
        Self::splat(0)
    }

    /// `{ 0, 1, 2, ..., W - 1 }`
    #[inline(always)]
    pub fn iota() -> Self {
        Lanes(array::from_fn(|i| i as u8))
    }

    #[inline(always)]
    pub fn load(bytes: &[u8; W]) -> Self {
        Lanes(*bytes)
    }

    /// Load the first W bytes of a table row.
    #[inline(always)]
    pub fn load_row(row: &[u8]) -> Self {
        Lanes(array::from_fn(|i| row[i]))
    }

    #[inline(always)]
    pub fn store(self, out: &mut [u8; W]) {
        *out = self.0;
    }

    #[inline(always)]
    fn zip(self, other: Self, f: impl Fn(u8, u8) -> u8) -> Self {
        Lanes(array::from_fn(|i| f(self.0[i], other.0[i])))
    }

    #[inline(always)]
    pub fn add(self, other: Self) -> Self {
        self.zip(other, u8::wrapping_add)
    }

    #[inline(always)]
    pub fn sub(self, other: Self) -> Self {
        self.zip(other, u8::wrapping_sub)
    }

    #[inline(always)]
    pub fn and(self, other: Self) -> Self {
        self.zip(other, |a, b| a & b)
    }

    #[inline(always)]
    pub fn or(self, other: Self) -> Self {
        self.zip(other, |a, b| a | b)
    }

    /// `!self & other`, operand order as in `_mm_andnot_si128`.
    #[inline(always)]
    pub fn andnot(self, other: Self) -> Self {
        self.zip(other, |a, b| !a & b)
    }

    #[inline(always)]
    pub fn min(self, other: Self) -> Self {
        self.zip(other, u8::min)
    }

    #[inline(always)]
    pub fn max(self, other: Self) -> Self {
        self.zip(other, u8::max)
    }

    /// 0xFF where lanes are equal.
    #[inline(always)]
    pub fn cmpeq(self, other: Self) -> Self {
        self.zip(other, |a, b| if a == b { 0xFF } else { 0 })
    }

    /// 0xFF where `self <= other`, unsigned.
    #[inline(always)]
    pub fn cmple(self, other: Self) -> Self {
        self.zip(other, |a, b| if a <= b { 0xFF } else { 0 })
    }

    /// 0xFF where `self > other`, unsigned.
    #[inline(always)]
    pub fn cmpgt(self, other: Self) -> Self {
        self.zip(other, |a, b| if a > b { 0xFF } else { 0 })
    }

    /// Lane `j` receives lane `j - n`; the low `n` lanes are zero.
    #[inline(always)]
    pub fn shift_up(self, n: usize) -> Self {
        Lanes(array::from_fn(|j| if j >= n { self.0[j - n] } else { 0 }))
    }

    /// Lane `j` receives lane `j + n`; the high `n` lanes are zero.
    #[inline(always)]
    pub fn shift_down(self, n: usize) -> Self {
        Lanes(array::from_fn(|j| if j + n < W { self.0[j + n] } else { 0 }))
    }

    /// `out[j] = self[index[j]]`, or 0 when `index[j] >= W`.
    #[inline(always)]
    pub fn gather(self, index: Self) -> Self {
        Lanes(array::from_fn(|j| {
            let i = index.0[j] as usize;
            if i < W { self.0[i] } else { 0 }
        }))
    }

    /// Low half of `self` followed by the low half of `high`.
    #[inline(always)]
    pub fn concat_low_halves(self, high: Self) -> Self {
        let half = W / 2;
        Lanes(array::from_fn(|j| {
            if j < half {
                self.0[j]
            } else {
                high.0[j - half]
            }
        }))
    }

    /// Number of lanes with any bit set.
    #[inline(always)]
    pub fn count_set(self) -> usize {
        self.0.iter().filter(|&&b| b != 0).count()
    }

    /// Horizontal sum, wrapping like `vaddvq_u8`.
    #[inline(always)]
    pub fn horizontal_sum(self) -> u8 {
        self.0.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
    }

    #[inline(always)]
    pub fn last(self) -> u8 {
        self.0[W - 1]
    }
}
