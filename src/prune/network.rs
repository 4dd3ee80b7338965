//! Sorting networks as gather tables.
//!
//! A network is data: a list of stages, each a pair of gather tables
//! (`lo`, `hi`), plus a final `deshuffle` table. One stage is executed as
//! `a = gather(x, lo)`, `b = gather(x, hi)`, `x = concat_low_halves(min(a, b),
//! max(a, b))`, so the whole sort is permutes plus elementwise min/max with
//! no branches. The 16- and 32-lane bitonic tables are generated at build
//! time from [`super::layout`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::lanes::Lanes;
use super::layout::GatherLayout;
use crate::error::PruneError;

/// One compare-exchange layer as two gather tables of `width` bytes.
#[derive(Debug, Clone, Copy)]
pub struct Stage<'a> {
    pub lo: &'a [u8],
    pub hi: &'a [u8],
}

/// A comparator network lowered to gather tables.
#[derive(Debug, Clone, Copy)]
pub struct Network<'a> {
    pub width: usize,
    pub stages: &'a [Stage<'a>],
    pub deshuffle: &'a [u8],
}

include!(concat!(env!("OUT_DIR"), "/networks.rs"));

/// The network baked in at build time for `width`, if there is one.
pub fn baked(width: usize) -> Option<&'static Network<'static>> {
    match width {
        16 => Some(&BITONIC_16),
        32 => Some(&BITONIC_32),
        _ => None,
    }
}

/// Inputs checked by [`Network::validate`] above the exhaustive limit.
const SAMPLED_INPUTS: usize = 1 << 16;

/// Widths up to this size are checked against every 0/1 input.
const EXHAUSTIVE_WIDTH: usize = 20;

impl<'a> Network<'a> {
    /// Number of compare-exchange elements.
    pub fn comparators(&self) -> usize {
        self.stages.len() * self.width / 2
    }

    /// Borrow an owned layout as a network and run `f` on it.
    pub fn with_layout<R>(layout: &GatherLayout, f: impl FnOnce(&Network<'_>) -> R) -> R {
        let stages: Vec<Stage<'_>> = layout
            .stages
            .iter()
            .map(|(lo, hi)| Stage { lo, hi })
            .collect();
        let network = Network {
            width: layout.width,
            stages: &stages,
            deshuffle: &layout.deshuffle,
        };
        f(&network)
    }

    /// Sort W keys in one lane vector.
    #[inline]
    pub fn sort_lanes<const W: usize>(&self, mut keys: Lanes<W>) -> Lanes<W> {
        debug_assert_eq!(self.width, W);
        for stage in self.stages {
            let a = keys.gather(Lanes::load_row(stage.lo));
            let b = keys.gather(Lanes::load_row(stage.hi));
            keys = a.min(b).concat_low_halves(a.max(b));
        }
        keys.gather(Lanes::load_row(self.deshuffle))
    }

    /// Sort a slice of exactly `width` keys in place.
    ///
    /// Runtime-width counterpart of [`Network::sort_lanes`], used when the
    /// width is not known at compile time.
    pub fn sort_slice(&self, keys: &mut [u8]) -> Result<(), PruneError> {
        if keys.len() != self.width {
            return Err(PruneError::InputLength {
                expected: self.width,
                actual: keys.len(),
            });
        }
        let half = self.width / 2;
        let mut next = vec![0u8; self.width];
        for stage in self.stages {
            for c in 0..half {
                let a = keys[stage.lo[c] as usize];
                let b = keys[stage.hi[c] as usize];
                next[c] = a.min(b);
                next[half + c] = a.max(b);
            }
            keys.copy_from_slice(&next);
        }
        for (slot, &lane) in next.iter_mut().zip(self.deshuffle) {
            *slot = keys[lane as usize];
        }
        keys.copy_from_slice(&next);
        Ok(())
    }

    /// Check table shape and sorting behaviour.
    ///
    /// Every stage must read each lane exactly once and `deshuffle` must be
    /// a permutation. By the zero-one principle a comparator network sorts
    /// every input iff it sorts every 0/1 input; widths up to 20 lanes are
    /// checked exhaustively, wider ones on a fixed pseudo-random sample.
    pub fn validate(&self) -> Result<ValidationReport, PruneError> {
        let invalid = |reason: String| PruneError::InvalidNetwork {
            width: self.width,
            reason,
        };

        let width = self.width;
        if !width.is_power_of_two() || width < 2 {
            return Err(invalid(format!("width {} is not a power of two", width)));
        }
        let half = width / 2;

        for (s, stage) in self.stages.iter().enumerate() {
            if stage.lo.len() != width || stage.hi.len() != width {
                return Err(invalid(format!("stage {} tables are not {} bytes", s, width)));
            }
            let mut seen = vec![false; width];
            for &lane in stage.lo[..half].iter().chain(&stage.hi[..half]) {
                let lane = lane as usize;
                if lane >= width || seen[lane] {
                    return Err(invalid(format!("stage {} reads lane {} twice", s, lane)));
                }
                seen[lane] = true;
            }
        }

        let mut seen = vec![false; width];
        for &lane in self.deshuffle {
            let lane = lane as usize;
            if lane >= width || seen[lane] {
                return Err(invalid(format!("deshuffle repeats lane {}", lane)));
            }
            seen[lane] = true;
        }
        if self.deshuffle.len() != width {
            return Err(invalid("deshuffle is not a permutation".to_string()));
        }

        let exhaustive = width <= EXHAUSTIVE_WIDTH;
        let inputs = if exhaustive { 1usize << width } else { SAMPLED_INPUTS };
        let mut rng = StdRng::seed_from_u64(0x5eed_0001);
        let mut keys = vec![0u8; width];

        for n in 0..inputs {
            for (lane, key) in keys.iter_mut().enumerate() {
                *key = if exhaustive {
                    ((n >> lane) & 1) as u8
                } else {
                    rng.random_range(0..2)
                };
            }
            self.sort_slice(&mut keys)?;
            if keys.windows(2).any(|w| w[0] > w[1]) {
                return Err(invalid(format!("0/1 input #{} is left unsorted", n)));
            }
        }

        Ok(ValidationReport {
            width,
            stages: self.stages.len(),
            comparators: self.comparators(),
            inputs_checked: inputs,
            exhaustive,
        })
    }
}

/// Summary of a successful [`Network::validate`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ValidationReport {
    pub width: usize,
    pub stages: usize,
    pub comparators: usize,
    pub inputs_checked: usize,
    pub exhaustive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prune::layout;

    #[test]
    fn test_baked_16_lane_network_shape() {
        assert_eq!(BITONIC_16.width, 16);
        assert_eq!(BITONIC_16.stages.len(), 10);
        assert_eq!(BITONIC_16.comparators(), 80);
    }

    #[test]
    fn test_baked_32_lane_network_shape() {
        assert_eq!(BITONIC_32.width, 32);
        assert_eq!(BITONIC_32.stages.len(), 15);
        assert_eq!(BITONIC_32.comparators(), 240);
    }

    #[test]
    fn test_16_lane_network_passes_zero_one_principle() {
        let report = BITONIC_16.validate().unwrap();
        assert!(report.exhaustive);
        assert_eq!(report.inputs_checked, 1 << 16);
    }

    #[test]
    fn test_32_lane_network_passes_sampled_check() {
        let report = BITONIC_32.validate().unwrap();
        assert!(!report.exhaustive);
    }

    #[test]
    fn test_baked_tables_match_generator() {
        for network in [&BITONIC_16, &BITONIC_32] {
            let layout = layout::bitonic(network.width).unwrap();
            assert_eq!(layout.deshuffle, network.deshuffle);
            for ((lo, hi), stage) in layout.stages.iter().zip(network.stages) {
                assert_eq!(lo.as_slice(), stage.lo);
                assert_eq!(hi.as_slice(), stage.hi);
            }
        }
    }

    #[test]
    fn test_regenerated_widths_validate() {
        for width in [2, 4, 8, 64] {
            let layout = layout::bitonic(width).unwrap();
            let report = Network::with_layout(&layout, |n| n.validate()).unwrap();
            assert_eq!(report.width, width);
        }
    }

    #[test]
    fn test_baked_lookup() {
        assert_eq!(baked(16).map(|n| n.width), Some(16));
        assert_eq!(baked(32).map(|n| n.comparators()), Some(240));
        assert!(baked(64).is_none());
    }

    #[test]
    fn test_sort_lanes_sorts_distinct_keys() {
        let keys = Lanes::<16>([9, 3, 15, 0, 7, 12, 1, 14, 2, 8, 11, 4, 13, 6, 10, 5]);
        assert_eq!(BITONIC_16.sort_lanes(keys), Lanes::iota());
    }

    #[test]
    fn test_corrupted_stage_is_rejected() {
        let mut layout = layout::bitonic(16).unwrap();
        layout.stages[3].1[0] = layout.stages[3].0[0];
        let result = Network::with_layout(&layout, |n| n.validate());
        assert!(matches!(result, Err(PruneError::InvalidNetwork { width: 16, .. })));
    }

    #[test]
    fn test_too_shallow_network_fails_zero_one_check() {
        // no 5-layer network sorts 8 inputs; the tables stay well formed
        let layers = layout::bitonic_layers(8);
        let layout = layout::lower(8, &layers[..layers.len() - 1]).unwrap();
        let result = Network::with_layout(&layout, |n| n.validate());
        assert!(matches!(result, Err(PruneError::InvalidNetwork { width: 8, .. })));
    }
}
