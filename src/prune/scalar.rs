//! Sequential reference pruner.

use super::predicate::is_blank;

/// Store every byte, advance only past non-blanks.
///
/// The unconditional store keeps the loop free of data-dependent branches.
/// Returns the number of non-blanks; bytes past that are leftovers.
#[inline]
pub fn prune_scalar<const W: usize>(input: &[u8; W], out: &mut [u8; W]) -> usize {
    let mut pos = 0;
    for &byte in input {
        out[pos] = byte;
        pos += usize::from(!is_blank(byte));
    }
    pos
}
