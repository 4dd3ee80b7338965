//! Composition of per-batch results into one output.

use crate::error::PruneError;

/// Prune consecutive W-byte batches of `input` into one contiguous run.
///
/// Each batch goes through `kernel` on its own; the only dependency
/// between batches is the running write offset: batch `b` stores its whole
/// W-byte result at the offset left by batch `b - 1` and advances it by
/// its valid length, so the next store overwrites the leftovers. `out`
/// must hold `input.len()` bytes because the last store is always W wide.
///
/// Returns the total valid length.
pub fn compact_batches<const W: usize, F>(
    input: &[u8],
    out: &mut [u8],
    kernel: F,
) -> Result<usize, PruneError>
where
    F: Fn(&[u8; W], &mut [u8; W]) -> usize,
{
    let (batches, rest) = input.as_chunks::<W>();
    if !rest.is_empty() {
        return Err(PruneError::PartialBatch {
            width: W,
            actual: input.len(),
        });
    }
    if out.len() < input.len() {
        return Err(PruneError::OutputTooSmall {
            needed: input.len(),
            actual: out.len(),
        });
    }

    let mut offset = 0;
    let mut scratch = [0u8; W];
    for batch in batches {
        let len = kernel(batch, &mut scratch);
        out[offset..offset + W].copy_from_slice(&scratch);
        offset += len;
    }

    Ok(offset)
}
