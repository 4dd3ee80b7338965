use thiserror::Error;

use crate::core::capability::{Tier, Width};
use crate::core::config::Variant;

/// Errors raised while selecting or running a pruning kernel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PruneError {
    #[error("{variant} has no {width} kernel on the {tier} tier")]
    Unsupported {
        variant: Variant,
        tier: Tier,
        width: Width,
    },

    #[error("{tier} instructions are not available on this CPU")]
    TierUnavailable { tier: Tier },

    #[error("Input length mismatch: expected {expected} bytes, got {actual}")]
    InputLength { expected: usize, actual: usize },

    #[error("Input of {actual} bytes is not a whole number of {width}-byte batches")]
    PartialBatch { width: usize, actual: usize },

    #[error("Output buffer too small: need {needed} bytes, have {actual}")]
    OutputTooSmall { needed: usize, actual: usize },

    #[error("Unknown {kind} '{name}'")]
    UnknownName { kind: &'static str, name: String },

    #[error("Invalid {width}-lane network: {reason}")]
    InvalidNetwork { width: usize, reason: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for PruneError {
    fn from(err: toml::de::Error) -> Self {
        PruneError::Config(err.to_string())
    }
}

impl PruneError {
    /// True when the error comes from the CPU or the requested combination
    /// rather than the data.
    #[inline]
    pub fn is_capability(&self) -> bool {
        matches!(
            self,
            PruneError::Unsupported { .. } | PruneError::TierUnavailable { .. }
        )
    }
}
