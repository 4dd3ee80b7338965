//! Sorting-network layout generation.
//!
//! This file is compiled twice: by `build.rs`, which bakes the 16- and
//! 32-lane tables into `$OUT_DIR/networks.rs`, and by the library, which
//! regenerates tables for other widths and cross-checks the baked ones.
//! It must not reference anything outside `std`.

use std::fmt::Write;

/// One compare-exchange layer in sorted-position space: `(min_lane, max_lane)`.
pub type Layer = Vec<(usize, usize)>;

/// Largest width whose keys (`index | width`) still fit in a byte.
pub const MAX_WIDTH: usize = 128;

/// Ascending bitonic sorting network for `width` lanes.
///
/// Every layer is a perfect matching of the lanes, which is what lets each
/// layer run as exactly one gather-min / gather-max pair.
pub fn bitonic_layers(width: usize) -> Vec<Layer> {
    let mut layers = Vec::new();
    let mut k = 2;
    while k <= width {
        let mut j = k / 2;
        while j > 0 {
            let mut layer = Vec::with_capacity(width / 2);
            for i in 0..width {
                let partner = i ^ j;
                if partner > i {
                    if i & k == 0 {
                        layer.push((i, partner));
                    } else {
                        layer.push((partner, i));
                    }
                }
            }
            layers.push(layer);
            j /= 2;
        }
        k *= 2;
    }
    layers
}

/// A network lowered to gather tables.
///
/// Stage `s` computes `a = x[lo[c]]`, `b = x[hi[c]]` for every comparator
/// `c < width / 2`, then stores `min(a, b)` in lane `c` and `max(a, b)` in
/// lane `width / 2 + c`. The upper half of `lo` and `hi` mirrors the lower
/// half so a full-register gather stays in range. After the last stage,
/// sorted position `i` lives in lane `deshuffle[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatherLayout {
    pub width: usize,
    pub stages: Vec<(Vec<u8>, Vec<u8>)>,
    pub deshuffle: Vec<u8>,
}

/// Lower comparator layers into gather tables.
pub fn lower(width: usize, layers: &[Layer]) -> Result<GatherLayout, String> {
    if !width.is_power_of_two() || !(2..=MAX_WIDTH).contains(&width) {
        return Err(format!(
            "width {} must be a power of two in 2..={}",
            width, MAX_WIDTH
        ));
    }
    let half = width / 2;

    // phys[p] = lane currently holding sorted position p
    let mut phys: Vec<usize> = (0..width).collect();
    let mut stages = Vec::with_capacity(layers.len());

    for (s, layer) in layers.iter().enumerate() {
        if layer.len() != half {
            return Err(format!(
                "layer {} has {} comparators, expected {}",
                s,
                layer.len(),
                half
            ));
        }

        let mut seen = vec![false; width];
        let mut lo = vec![0u8; width];
        let mut hi = vec![0u8; width];
        let mut next = phys.clone();

        for (c, &(min_lane, max_lane)) in layer.iter().enumerate() {
            for lane in [min_lane, max_lane] {
                if lane >= width || seen[lane] {
                    return Err(format!("layer {} touches lane {} twice", s, lane));
                }
                seen[lane] = true;
            }
            lo[c] = phys[min_lane] as u8;
            hi[c] = phys[max_lane] as u8;
            lo[half + c] = lo[c];
            hi[half + c] = hi[c];
            next[min_lane] = c;
            next[max_lane] = half + c;
        }

        phys = next;
        stages.push((lo, hi));
    }

    Ok(GatherLayout {
        width,
        stages,
        deshuffle: phys.into_iter().map(|lane| lane as u8).collect(),
    })
}

/// Bitonic network for `width` lanes, lowered to gather tables.
pub fn bitonic(width: usize) -> Result<GatherLayout, String> {
    lower(width, &bitonic_layers(width))
}

/// Render a layout as a `Network` static.
pub fn render(name: &str, layout: &GatherLayout) -> String {
    fn row(bytes: &[u8]) -> String {
        let items: Vec<String> = bytes.iter().map(|b| b.to_string()).collect();
        format!("&[{}]", items.join(", "))
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "pub(crate) static {}: Network<'static> = Network {{",
        name
    );
    let _ = writeln!(out, "    width: {},", layout.width);
    let _ = writeln!(out, "    stages: &[");
    for (lo, hi) in &layout.stages {
        let _ = writeln!(
            out,
            "        Stage {{ lo: {}, hi: {} }},",
            row(lo),
            row(hi)
        );
    }
    let _ = writeln!(out, "    ],");
    let _ = writeln!(out, "    deshuffle: {},", row(&layout.deshuffle));
    let _ = writeln!(out, "}};");
    out
}
