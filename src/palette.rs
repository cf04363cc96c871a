//! Named color palettes for the heatmap buckets
//!
//! Sequential ColorBrewer ramps, sampled evenly without their end points so
//! that requesting `n` colors spreads them over the body of the ramp. A `_r`
//! suffix reverses a ramp.

use crate::error::{HeatmapError, Result};

/// Palette used when none is configured
pub const DEFAULT_PALETTE: &str = "YlOrBr";

/// Color of bucket 0
pub const BUCKET_ZERO_COLOR: &str = "#ffffff";

/// Supplies `count` hex colors (`#rrggbb`) for a named palette
pub trait PaletteProvider {
    fn colors(&self, name: &str, count: usize) -> Result<Vec<String>>;
}

/// Built-in ColorBrewer sequential palettes
#[derive(Debug, Clone, Copy, Default)]
pub struct BrewerPalettes;

const RAMPS: &[(&str, [u32; 9])] = &[
    ("YlOrBr", [0xffffe5, 0xfff7bc, 0xfee391, 0xfec44f, 0xfe9929, 0xec7014, 0xcc4c02, 0x993404, 0x662506]),
    ("YlOrRd", [0xffffcc, 0xffeda0, 0xfed976, 0xfeb24c, 0xfd8d3c, 0xfc4e2a, 0xe31a1c, 0xbd0026, 0x800026]),
    ("YlGnBu", [0xffffd9, 0xedf8b1, 0xc7e9b4, 0x7fcdbb, 0x41b6c4, 0x1d91c0, 0x225ea8, 0x253494, 0x081d58]),
    ("Blues", [0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c, 0x08306b]),
    ("Greens", [0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476, 0x41ab5d, 0x238b45, 0x006d2c, 0x00441b]),
    ("Reds", [0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c, 0xcb181d, 0xa50f15, 0x67000d]),
    ("Oranges", [0xfff5eb, 0xfee6ce, 0xfdd0a2, 0xfdae6b, 0xfd8d3c, 0xf16913, 0xd94801, 0xa63603, 0x7f2704]),
    ("Purples", [0xfcfbfd, 0xefedf5, 0xdadaeb, 0xbcbddc, 0x9e9ac8, 0x807dba, 0x6a51a3, 0x54278f, 0x3f007d]),
    ("Greys", [0xffffff, 0xf0f0f0, 0xd9d9d9, 0xbdbdbd, 0x969696, 0x737373, 0x525252, 0x252525, 0x000000]),
];

impl BrewerPalettes {
    /// Names of all built-in palettes (without `_r` variants)
    pub fn names() -> impl Iterator<Item = &'static str> {
        RAMPS.iter().map(|(name, _)| *name)
    }
}

fn channels(rgb: u32) -> [f64; 3] {
    [
        ((rgb >> 16) & 0xFF) as f64,
        ((rgb >> 8) & 0xFF) as f64,
        (rgb & 0xFF) as f64,
    ]
}

/// Linear interpolation along the ramp at `t` in [0, 1]
fn sample(ramp: &[u32; 9], t: f64) -> String {
    let scaled = t.clamp(0.0, 1.0) * (ramp.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(ramp.len() - 2);
    let frac = scaled - lower as f64;

    let a = channels(ramp[lower]);
    let b = channels(ramp[lower + 1]);
    let mix = |i: usize| (a[i] + (b[i] - a[i]) * frac).round() as u8;

    format!("#{:02x}{:02x}{:02x}", mix(0), mix(1), mix(2))
}

impl PaletteProvider for BrewerPalettes {
    fn colors(&self, name: &str, count: usize) -> Result<Vec<String>> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };

        let ramp = RAMPS
            .iter()
            .find(|(ramp_name, _)| ramp_name.eq_ignore_ascii_case(base))
            .map(|(_, ramp)| ramp)
            .ok_or_else(|| HeatmapError::UnknownPalette(name.to_string()))?;

        let colors = (0..count)
            .map(|i| {
                let t = (i + 1) as f64 / (count + 1) as f64;
                sample(ramp, if reversed { 1.0 - t } else { t })
            })
            .collect();

        Ok(colors)
    }
}

/// One color per bucket: white for bucket 0, then `num_buckets - 1` palette
/// colors from light to dark
pub fn bucket_colors(
    provider: &dyn PaletteProvider,
    palette: &str,
    num_buckets: usize,
) -> Result<Vec<String>> {
    let mut colors = Vec::with_capacity(num_buckets);
    colors.push(BUCKET_ZERO_COLOR.to_string());
    colors.extend(provider.colors(palette, num_buckets.saturating_sub(1))?);
    colors.truncate(num_buckets);
    Ok(colors)
}
