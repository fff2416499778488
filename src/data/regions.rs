use crate::data::Source;
use crate::error::LoadResult;
use crate::model::RegionRecord;
use log::{info, warn};
use std::time::Duration;

/// Whether the region set came from the configured source or the built-in fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetOrigin {
    Loaded,
    Fallback,
}

/// Outcome of a region load: always usable records, plus where they came from
#[derive(Debug, Clone)]
pub struct RegionLoad {
    pub records: Vec<RegionRecord>,
    pub origin: DatasetOrigin,
}

/// Small built-in dataset used when the configured source cannot be read
pub fn fallback_regions() -> Vec<RegionRecord> {
    vec![
        RegionRecord::new("上海", 24.0, 19.2, 1.25),
        RegionRecord::new("北京", 26.0, 20.5, 1.27),
        RegionRecord::new("广东", 22.0, 17.0, 1.29),
        RegionRecord::new("辽宁", 19.0, 13.0, 1.46),
        RegionRecord::new("四川", 21.0, 15.8, 1.33),
    ]
}

/// Parse a JSON array of region records
pub fn parse_regions(bytes: &mut [u8]) -> LoadResult<Vec<RegionRecord>> {
    Ok(simd_json::serde::from_slice(bytes)?)
}

pub fn load_regions(source: &Source, timeout: Duration) -> LoadResult<Vec<RegionRecord>> {
    let mut bytes = source.fetch(timeout)?;
    parse_regions(&mut bytes)
}

/// Load regions, substituting [`fallback_regions`] on any failure
pub fn load_regions_or_fallback(source: &Source, timeout: Duration) -> RegionLoad {
    match load_regions(source, timeout) {
        Ok(records) => {
            info!("Loaded {} regions from {}", records.len(), source);
            RegionLoad {
                records,
                origin: DatasetOrigin::Loaded,
            }
        }
        Err(e) => {
            warn!("Failed to load {}, using fallback: {}", source, e);
            RegionLoad {
                records: fallback_regions(),
                origin: DatasetOrigin::Fallback,
            }
        }
    }
}
