//! Runtime capability model: batch width, instruction tier, and the
//! combinations that have a kernel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::config::Variant;
use crate::error::PruneError;

/// Batch width in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Width {
    W16,
    W32,
}

impl Width {
    pub const ALL: [Width; 2] = [Width::W16, Width::W32];

    /// Number of byte lanes.
    pub fn lanes(self) -> usize {
        match self {
            Width::W16 => 16,
            Width::W32 => 32,
        }
    }
}

impl TryFrom<u32> for Width {
    type Error = PruneError;

    fn try_from(lanes: u32) -> Result<Self, Self::Error> {
        match lanes {
            16 => Ok(Width::W16),
            32 => Ok(Width::W32),
            _ => Err(PruneError::UnknownName {
                kind: "width",
                name: lanes.to_string(),
            }),
        }
    }
}

impl From<Width> for u32 {
    fn from(width: Width) -> Self {
        width.lanes() as u32
    }
}

impl FromStr for Width {
    type Err = PruneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || PruneError::UnknownName {
            kind: "width",
            name: s.to_string(),
        };
        let lanes: u32 = s.trim_end_matches("-lane").parse().map_err(|_| unknown())?;
        Width::try_from(lanes).map_err(|_| unknown())
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-lane", self.lanes())
    }
}

/// Instruction tier a kernel is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Lane arrays in plain Rust, any width
    Portable,
    /// x86_64 SSSE3 (`pshufb`), 16 lanes
    Ssse3,
    /// aarch64 NEON (`tbl`), 16 lanes
    Neon,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Portable, Tier::Ssse3, Tier::Neon];

    /// Whether this CPU (and this build) can run the tier.
    pub fn available(self) -> bool {
        match self {
            Tier::Portable => true,
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            Tier::Ssse3 => crate::simd::has_ssse3(),
            #[cfg(all(feature = "simd", target_arch = "aarch64"))]
            Tier::Neon => crate::simd::has_neon(),
            _ => false,
        }
    }

    /// Widths the tier has kernels for.
    pub fn widths(self) -> &'static [Width] {
        match self {
            Tier::Portable => &Width::ALL,
            Tier::Ssse3 | Tier::Neon => &[Width::W16],
        }
    }

    /// Whether the tier has a kernel for `variant` at `width`.
    ///
    /// Hardware tiers cover the permute variants at 16 lanes; the scalar
    /// reference only exists as portable code.
    pub fn supports(self, variant: Variant, width: Width) -> bool {
        match self {
            Tier::Portable => true,
            Tier::Ssse3 | Tier::Neon => variant != Variant::Scalar && width == Width::W16,
        }
    }
}

impl FromStr for Tier {
    type Err = PruneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "portable" => Ok(Tier::Portable),
            "ssse3" => Ok(Tier::Ssse3),
            "neon" => Ok(Tier::Neon),
            _ => Err(PruneError::UnknownName {
                kind: "tier",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Portable => write!(f, "portable"),
            Tier::Ssse3 => write!(f, "ssse3"),
            Tier::Neon => write!(f, "neon"),
        }
    }
}

/// A width and tier chosen once, before any batch is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capability {
    pub width: Width,
    pub tier: Tier,
}

impl Capability {
    pub fn new(width: Width, tier: Tier) -> Self {
        Capability { width, tier }
    }

    /// Best available tier for `width` and `variant`.
    pub fn detect(variant: Variant, width: Width) -> Self {
        let tier = [Tier::Ssse3, Tier::Neon]
            .into_iter()
            .find(|&tier| tier.available() && tier.supports(variant, width))
            .unwrap_or(Tier::Portable);
        Capability { width, tier }
    }

    /// Confirm that `variant` can run here.
    pub fn check(&self, variant: Variant) -> Result<(), PruneError> {
        if !self.tier.available() {
            return Err(PruneError::TierUnavailable { tier: self.tier });
        }
        if !self.tier.supports(variant, self.width) {
            return Err(PruneError::Unsupported {
                variant,
                tier: self.tier,
                width: self.width,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tier, self.width)
    }
}
