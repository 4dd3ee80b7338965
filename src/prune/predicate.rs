//! Blank classification.

use super::lanes::Lanes;

/// Largest byte value treated as blank.
pub const BLANK_MAX: u8 = b' ';

/// True for control characters and space.
#[inline(always)]
pub fn is_blank(byte: u8) -> bool {
    byte <= BLANK_MAX
}

/// 0xFF in every lane holding a blank, 0x00 elsewhere.
#[inline(always)]
pub fn blank_mask<const W: usize>(input: Lanes<W>) -> Lanes<W> {
    input.cmple(Lanes::splat(BLANK_MAX))
}

/// 0xFF in every lane holding a non-blank.
#[inline(always)]
pub fn keep_mask<const W: usize>(input: Lanes<W>) -> Lanes<W> {
    input.cmpgt(Lanes::splat(BLANK_MAX))
}

/// Count of blanks in a batch.
#[inline]
pub fn count_blanks(input: &[u8]) -> usize {
    input.iter().filter(|&&b| is_blank(b)).count()
}
