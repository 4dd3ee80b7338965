//! Kernel selection and dispatch.
//!
//! A [`Pruner`] pairs a [`Variant`] with a [`Capability`] that has been
//! checked once, up front. After that every call dispatches straight to a
//! kernel:
//! - Portable: lane arrays in plain Rust, 16 or 32 lanes
//! - SSSE3: `pshufb` kernels, 16 lanes (x86_64)
//! - NEON: `tbl` kernels, 16 lanes (aarch64)
//!
//! # Example
//!
//! ```
//! use blank_prune::{Pruner, Variant, Width};
//!
//! let pruner = Pruner::auto(Variant::NaiveSingle, Width::W16).unwrap();
//! let mut out = [0u8; 16];
//! let len = pruner.prune(b" 1  2  3    45  ", &mut out).unwrap();
//! assert_eq!(&out[..len], b"12345");
//! ```

use serde::Serialize;

use crate::core::capability::{Capability, Tier, Width};
use crate::core::config::Variant;
use crate::error::PruneError;
use crate::prune::{
    LaneCount, SupportedLaneCount, compact_batches, prune_full, prune_naive, prune_scalar,
    prune_semi,
};

/// A variant bound to a checked width and tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pruner {
    variant: Variant,
    capability: Capability,
}

impl Pruner {
    /// Bind `variant` to `capability`, failing if no kernel covers the pair
    /// on this CPU.
    pub fn new(variant: Variant, capability: Capability) -> Result<Self, PruneError> {
        capability.check(variant)?;
        tracing::debug!(%variant, tier = %capability.tier, width = %capability.width, "selected kernel");
        Ok(Pruner {
            variant,
            capability,
        })
    }

    /// Bind `variant` to the best detected tier for `width`.
    pub fn auto(variant: Variant, width: Width) -> Result<Self, PruneError> {
        Self::new(variant, Capability::detect(variant, width))
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Bytes consumed per call: the batch width times the variant's batch
    /// count.
    pub fn batch_len(&self) -> usize {
        self.capability.width.lanes() * self.variant.batches()
    }

    /// Prune one batch group.
    ///
    /// `input` must be exactly [`Pruner::batch_len`] bytes and `out` at
    /// least as long. Returns the number of valid bytes at the front of
    /// `out`; for [`Variant::Full`] the blanks follow them.
    pub fn prune(&self, input: &[u8], out: &mut [u8]) -> Result<usize, PruneError> {
        let expected = self.batch_len();
        if input.len() != expected {
            return Err(PruneError::InputLength {
                expected,
                actual: input.len(),
            });
        }
        if out.len() < expected {
            return Err(PruneError::OutputTooSmall {
                needed: expected,
                actual: out.len(),
            });
        }

        tracing::trace!(variant = %self.variant, tier = %self.capability.tier, "dispatch");
        match self.capability.tier {
            Tier::Portable => match self.capability.width {
                Width::W16 => prune_portable::<16>(self.variant, input, out),
                Width::W32 => prune_portable::<32>(self.variant, input, out),
            },
            Tier::Ssse3 => prune_ssse3(self.variant, input, out),
            Tier::Neon => prune_neon(self.variant, input, out),
        }
    }
}

fn prune_portable<const W: usize>(
    variant: Variant,
    input: &[u8],
    out: &mut [u8],
) -> Result<usize, PruneError>
where
    LaneCount<W>: SupportedLaneCount,
{
    match variant {
        Variant::Scalar => compact_batches::<W, _>(input, out, prune_scalar::<W>),
        Variant::NaiveSingle | Variant::NaiveDouble => {
            compact_batches::<W, _>(input, out, prune_naive::<W>)
        }
        Variant::Semi => compact_batches::<W, _>(input, out, prune_semi::<W>),
        Variant::Full => compact_batches::<W, _>(input, out, prune_full::<W>),
    }
}

/// Split off the two-batch input and output arrays of the double kernels.
#[cfg(all(feature = "simd", any(target_arch = "x86_64", target_arch = "aarch64")))]
fn double_batch<'a, 'b>(
    input: &'a [u8],
    out: &'b mut [u8],
) -> Result<(&'a [u8; 32], &'b mut [u8; 32]), PruneError> {
    let input: &[u8; 32] = input.try_into().map_err(|_| PruneError::InputLength {
        expected: 32,
        actual: input.len(),
    })?;
    let actual = out.len();
    let out: &mut [u8; 32] = out
        .get_mut(..32)
        .and_then(|o| o.try_into().ok())
        .ok_or(PruneError::OutputTooSmall { needed: 32, actual })?;
    Ok((input, out))
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
fn prune_ssse3(variant: Variant, input: &[u8], out: &mut [u8]) -> Result<usize, PruneError> {
    use crate::simd::x86_64;

    // SAFETY: Pruner::new verified SSSE3 through Capability::check
    match variant {
        Variant::NaiveSingle => {
            compact_batches::<16, _>(input, out, |i, o| unsafe { x86_64::prune_naive(i, o) })
        }
        Variant::NaiveDouble => {
            let (input, out) = double_batch(input, out)?;
            Ok(unsafe { x86_64::prune_naive_double(input, out) })
        }
        Variant::Semi => {
            compact_batches::<16, _>(input, out, |i, o| unsafe { x86_64::prune_semi(i, o) })
        }
        Variant::Full => {
            compact_batches::<16, _>(input, out, |i, o| unsafe { x86_64::prune_full(i, o) })
        }
        Variant::Scalar => Err(PruneError::Unsupported {
            variant,
            tier: Tier::Ssse3,
            width: Width::W16,
        }),
    }
}

#[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
fn prune_ssse3(_variant: Variant, _input: &[u8], _out: &mut [u8]) -> Result<usize, PruneError> {
    Err(PruneError::TierUnavailable { tier: Tier::Ssse3 })
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
fn prune_neon(variant: Variant, input: &[u8], out: &mut [u8]) -> Result<usize, PruneError> {
    use crate::simd::aarch64;

    // SAFETY: NEON is mandatory on aarch64
    match variant {
        Variant::NaiveSingle => {
            compact_batches::<16, _>(input, out, |i, o| unsafe { aarch64::prune_naive(i, o) })
        }
        Variant::NaiveDouble => {
            let (input, out) = double_batch(input, out)?;
            Ok(unsafe { aarch64::prune_naive_double(input, out) })
        }
        Variant::Semi => {
            compact_batches::<16, _>(input, out, |i, o| unsafe { aarch64::prune_semi(i, o) })
        }
        Variant::Full => {
            compact_batches::<16, _>(input, out, |i, o| unsafe { aarch64::prune_full(i, o) })
        }
        Variant::Scalar => Err(PruneError::Unsupported {
            variant,
            tier: Tier::Neon,
            width: Width::W16,
        }),
    }
}

#[cfg(not(all(feature = "simd", target_arch = "aarch64")))]
fn prune_neon(_variant: Variant, _input: &[u8], _out: &mut [u8]) -> Result<usize, PruneError> {
    Err(PruneError::TierUnavailable { tier: Tier::Neon })
}

/// Capabilities that can run `variant` on this CPU, portable first.
pub fn available_capabilities(variant: Variant) -> Vec<Capability> {
    let mut caps = Vec::new();
    for tier in Tier::ALL {
        if !tier.available() {
            continue;
        }
        for &width in tier.widths() {
            let cap = Capability::new(width, tier);
            if cap.check(variant).is_ok() {
                caps.push(cap);
            }
        }
    }
    caps
}

/// Platform capabilities for SIMD.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformInfo {
    pub arch: &'static str,
    pub simd_features: Vec<&'static str>,
}

impl PlatformInfo {
    /// Detect current platform capabilities.
    pub fn detect() -> Self {
        #[cfg(feature = "simd")]
        let simd_features = crate::simd::detected_features();
        #[cfg(not(feature = "simd"))]
        let simd_features = Vec::new();

        PlatformInfo {
            arch: std::env::consts::ARCH,
            simd_features,
        }
    }

    /// Format as display string.
    pub fn display(&self) -> String {
        if self.simd_features.is_empty() {
            self.arch.to_string()
        } else {
            format!("{} ({})", self.arch, self.simd_features.join(", "))
        }
    }
}

/// One cell of the variant × tier × width matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatrixEntry {
    pub variant: Variant,
    pub tier: Tier,
    pub width: Width,
    /// A kernel exists for the combination
    pub supported: bool,
    /// The kernel can run on this CPU
    pub available: bool,
}

/// Every variant, tier and width, with what this build and CPU can run.
pub fn support_matrix() -> Vec<MatrixEntry> {
    let mut entries = Vec::new();
    for variant in Variant::ALL {
        for tier in Tier::ALL {
            for width in Width::ALL {
                let supported = tier.supports(variant, width);
                entries.push(MatrixEntry {
                    variant,
                    tier,
                    width,
                    supported,
                    available: supported && tier.available(),
                });
            }
        }
    }
    entries
}
