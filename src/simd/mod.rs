//! Hardware pruning kernels.
//!
//! This module provides SSSE3 (x86_64) and NEON (aarch64) versions of the
//! 16-lane variants. Runtime CPU feature detection is cached here and
//! consulted once, when a `Pruner` is built; the kernels themselves are
//! `unsafe` and assume the check passed.

#[cfg(target_arch = "x86_64")]
use std::sync::OnceLock;

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

#[cfg(target_arch = "aarch64")]
pub mod aarch64;

// CPU feature detection cache
#[cfg(target_arch = "x86_64")]
static HAS_SSSE3: OnceLock<bool> = OnceLock::new();

#[cfg(target_arch = "x86_64")]
static HAS_AVX2: OnceLock<bool> = OnceLock::new();

/// Check if SSSE3 is available (cached after first call)
#[cfg(target_arch = "x86_64")]
pub fn has_ssse3() -> bool {
    *HAS_SSSE3.get_or_init(|| is_x86_feature_detected!("ssse3"))
}

/// Check if AVX2 is available (cached after first call)
///
/// Reported by `caps` only; no kernel uses 256-bit registers.
#[cfg(target_arch = "x86_64")]
pub fn has_avx2() -> bool {
    *HAS_AVX2.get_or_init(|| is_x86_feature_detected!("avx2"))
}

#[cfg(not(target_arch = "x86_64"))]
pub fn has_ssse3() -> bool {
    false
}

#[cfg(not(target_arch = "x86_64"))]
pub fn has_avx2() -> bool {
    false
}

/// Check if NEON is available (aarch64 only)
#[cfg(target_arch = "aarch64")]
pub fn has_neon() -> bool {
    true // NEON is mandatory on aarch64
}

#[cfg(not(target_arch = "aarch64"))]
pub fn has_neon() -> bool {
    false
}

/// Names of the detected SIMD extensions, widest first.
pub fn detected_features() -> Vec<&'static str> {
    let mut features = Vec::new();
    if has_avx2() {
        features.push("AVX2");
    }
    if has_ssse3() {
        features.push("SSSE3");
    }
    if has_neon() {
        features.push("NEON");
    }
    features
}
