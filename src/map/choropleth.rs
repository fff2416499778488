//! Declarative options for the choropleth: which canonical region gets which
//! value, and how values map to colors.

use crate::model::EnrichedRecord;
use crate::names::{resolve, Resolution};
use log::debug;

/// Lower end of the color scale; indices below it share the darkest band
pub const VISUAL_MAP_MIN: f64 = 0.3;
/// Upper end of the color scale
pub const VISUAL_MAP_MAX: f64 = 0.8;
/// Dark red, red, amber
pub const PALETTE: [(u8, u8, u8); 3] = [(0x7f, 0x1d, 0x1d), (0xdc, 0x26, 0x26), (0xf5, 0x9e, 0x0b)];
/// Number of discrete color bands the scale is split into
pub const BAND_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualMap {
    pub min: f64,
    pub max: f64,
    pub bands: usize,
}

impl Default for VisualMap {
    fn default() -> Self {
        Self {
            min: VISUAL_MAP_MIN,
            max: VISUAL_MAP_MAX,
            bands: BAND_COUNT,
        }
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

impl VisualMap {
    /// Position of `value` along the scale, clamped to 0..=1
    pub fn position(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 || value.is_nan() {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    /// Color band for a value
    pub fn band_for(&self, value: f64) -> usize {
        let bands = self.bands.max(1);
        ((self.position(value) * bands as f64) as usize).min(bands - 1)
    }

    /// Palette color at a scale position
    pub fn color_at(&self, t: f64) -> (u8, u8, u8) {
        let t = t.clamp(0.0, 1.0);
        let (from, to, local) = if t < 0.5 {
            (PALETTE[0], PALETTE[1], t * 2.0)
        } else {
            (PALETTE[1], PALETTE[2], (t - 0.5) * 2.0)
        };
        (
            lerp(from.0, to.0, local),
            lerp(from.1, to.1, local),
            lerp(from.2, to.2, local),
        )
    }

    /// Color of a band, sampled at the band's center
    pub fn band_color(&self, band: usize) -> (u8, u8, u8) {
        let bands = self.bands.max(1);
        self.color_at((band.min(bands - 1) as f64 + 0.5) / bands as f64)
    }
}

/// One region's entry in the map series (also the tooltip payload)
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesEntry {
    pub canonical_name: String,
    pub short_name: String,
    pub value: f64,
    pub real_wage: f64,
    pub basket_price: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChoroplethOptions {
    pub series: Vec<SeriesEntry>,
    pub visual_map: VisualMap,
    /// Short names that matched no boundary feature; drawn nowhere
    pub unresolved: Vec<String>,
}

impl ChoroplethOptions {
    pub fn by_canonical(&self, canonical_name: &str) -> Option<&SeriesEntry> {
        self.series.iter().find(|e| e.canonical_name == canonical_name)
    }

    pub fn by_short(&self, short_name: &str) -> Option<&SeriesEntry> {
        self.series.iter().find(|e| e.short_name == short_name)
    }
}

/// Pair every record with its canonical boundary name
pub fn build_options<S: AsRef<str>>(records: &[EnrichedRecord], universe: &[S]) -> ChoroplethOptions {
    let mut unresolved = Vec::new();
    let series = records
        .iter()
        .map(|r| {
            let (canonical_name, resolution) = resolve(&r.name, universe);
            if resolution == Resolution::Unresolved {
                unresolved.push(r.name.clone());
            }
            SeriesEntry {
                canonical_name,
                short_name: r.name.clone(),
                value: r.real_index,
                real_wage: r.real_wage,
                basket_price: r.basket_price,
            }
        })
        .collect();

    if !unresolved.is_empty() {
        debug!("{} regions left uncolored: {:?}", unresolved.len(), unresolved);
    }

    ChoroplethOptions {
        series,
        visual_map: VisualMap::default(),
        unresolved,
    }
}
